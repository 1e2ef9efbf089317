//! Notification channels and the factory that builds them.
//!
//! A [`Channel`] simulates delivery over one medium (email, SMS or push) by
//! prefixing the message with a fixed, medium-specific label. Channels are
//! selected by a string tag through [`NotificationFactory`], which keeps the
//! textual interface at the edge and dispatches over the closed
//! [`ChannelKind`] enumeration internally.

use crate::core::Sink;
use crate::error::NotifyError;
use anyhow::Result;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The delivery media a [`Channel`] can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Email,
    Sms,
    Push,
}

impl ChannelKind {
    /// Every known kind, in declaration order.
    pub const ALL: [ChannelKind; 3] = [ChannelKind::Email, ChannelKind::Sms, ChannelKind::Push];

    /// The tag used to select this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::Push => "push",
        }
    }

    /// The fixed prefix placed in front of every message sent on this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Email => "📧 Enviando correo electrónico: ",
            ChannelKind::Sms => "📱 Enviando SMS: ",
            ChannelKind::Push => "🔔 Enviando notificación push: ",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = NotifyError;

    /// Parses a channel tag, ignoring surrounding whitespace and ASCII case.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_ascii_lowercase();
        ChannelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| NotifyError::UnknownChannelKind(tag.to_string()))
    }
}

/// A notification channel for a single delivery medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    kind: ChannelKind,
}

impl Channel {
    pub fn new(kind: ChannelKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Renders `message` for this channel without emitting it.
    pub fn render(&self, message: &str) -> String {
        format!("{}{}", self.kind.label(), message)
    }

    /// Renders `message`, writes the line to `sink` and returns it.
    pub fn send(&self, message: &str, sink: &dyn Sink) -> Result<String> {
        let line = self.render(message);
        sink.write_line(&line)?;
        debug!(channel = %self.kind, sink = sink.name(), "Channel line written");
        Ok(line)
    }
}

/// Builds [`Channel`]s from their string tags.
pub struct NotificationFactory;

impl NotificationFactory {
    /// Creates the channel matching `kind`.
    ///
    /// # Returns
    /// * `Ok(Channel)` for `email`, `sms` or `push` (case-insensitive)
    /// * `Err(NotifyError::UnknownChannelKind)` for any other tag
    pub fn create(kind: &str) -> Result<Channel, NotifyError> {
        let channel = match kind.parse::<ChannelKind>()? {
            ChannelKind::Email => Channel::new(ChannelKind::Email),
            ChannelKind::Sms => Channel::new(ChannelKind::Sms),
            ChannelKind::Push => Channel::new(ChannelKind::Push),
        };
        Ok(channel)
    }
}
