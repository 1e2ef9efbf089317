//! notifier - subject/subscriber broadcasting over factory-built channels
//!
//! This library provides the notification channels, the factory that
//! selects them by tag, the subject that broadcasts to subscribers, and the
//! configuration and wiring used by the `notifier` binary.

pub mod app;
pub mod channel;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod outputs;
pub mod subject;
pub mod subscriber;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export core types for convenience
pub use crate::channel::{Channel, ChannelKind, NotificationFactory};
pub use crate::core::*;
pub use crate::error::NotifyError;
pub use crate::subject::{BroadcastReport, NotificationSubject};
pub use crate::subscriber::User;
