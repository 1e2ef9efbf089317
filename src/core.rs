//! Core service traits for the notifier
//!
//! This module defines the trait contracts that decouple the notification
//! subject from the concrete subscribers it broadcasts to and from the place
//! where rendered lines end up.

use anyhow::Result;

/// A destination for rendered notification lines.
pub trait Sink: Send + Sync {
    /// A short, descriptive name for the sink (e.g., "stdout", "memory").
    /// Used for logging.
    fn name(&self) -> &str;

    /// Writes a single line to the sink.
    ///
    /// # Arguments
    /// * `line` - The rendered line, without a trailing newline
    ///
    /// # Returns
    /// * `Ok(())` if the line was written
    /// * `Err` if the underlying writer failed
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Receives messages broadcast by a [`NotificationSubject`](crate::subject::NotificationSubject).
pub trait Subscriber: Send + Sync {
    /// The name identifying this subscriber in rendered output and logs.
    fn name(&self) -> &str;

    /// Handles a broadcast message.
    ///
    /// Implementations render the message, emit it to `sink` and return the
    /// rendered line.
    fn receive(&self, message: &str, sink: &dyn Sink) -> Result<String>;
}
