//! Error types for the notification library.

use thiserror::Error;

/// Errors raised while building notification channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The channel tag is not one of `email`, `sms` or `push`.
    /// Carries the tag exactly as it was supplied.
    #[error("unsupported notification channel: '{0}'")]
    UnknownChannelKind(String),
}
