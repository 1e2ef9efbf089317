//! The notification subject.
//!
//! [`NotificationSubject`] keeps an ordered list of subscribers and forwards
//! every broadcast message to each of them in attachment order. Attaching the
//! same subscriber twice is allowed and results in two deliveries per
//! broadcast. Subscriber identity is the identity of the shared handle, so
//! two distinct users with the same name are different subscribers.
//!
//! A subscriber that fails to receive a message does not stop delivery to
//! the ones after it. Failures are collected into the [`BroadcastReport`].

use crate::core::{Sink, Subscriber};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A failed delivery to a single subscriber.
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Position of the subscriber in the attachment order.
    pub position: usize,
    /// Name of the subscriber that failed.
    pub subscriber: String,
    pub error: anyhow::Error,
}

/// The outcome of a single broadcast.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Lines rendered by the subscribers that received the message, in order.
    pub delivered: Vec<String>,
    pub failures: Vec<DeliveryFailure>,
}

impl BroadcastReport {
    /// Returns `true` if every attached subscriber received the message.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Holds the attached subscribers and broadcasts messages to them.
#[derive(Default)]
pub struct NotificationSubject {
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl NotificationSubject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `subscriber` to the notification order.
    pub fn attach(&mut self, subscriber: Arc<dyn Subscriber>) {
        debug!(subscriber = subscriber.name(), "Attaching subscriber");
        self.subscribers.push(subscriber);
    }

    /// Removes the first attachment of `subscriber`.
    ///
    /// Returns `false`, leaving the subject untouched, if it was not attached.
    pub fn detach(&mut self, subscriber: &Arc<dyn Subscriber>) -> bool {
        match self
            .subscribers
            .iter()
            .position(|attached| Arc::ptr_eq(attached, subscriber))
        {
            Some(index) => {
                self.subscribers.remove(index);
                debug!(subscriber = subscriber.name(), "Detached subscriber");
                true
            }
            None => {
                debug!(subscriber = subscriber.name(), "Detach ignored, subscriber not attached");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// The first attached subscriber called `name`, if any.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Subscriber>> {
        self.subscribers.iter().find(|s| s.name() == name).cloned()
    }

    /// Names of the attached subscribers, in notification order.
    pub fn subscriber_names(&self) -> Vec<&str> {
        self.subscribers.iter().map(|s| s.name()).collect()
    }

    /// Delivers `message` to every attached subscriber, in attachment order.
    #[instrument(skip(self, message, sink), fields(subscribers = self.subscribers.len(), sink = sink.name()))]
    pub fn broadcast(&self, message: &str, sink: &dyn Sink) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for (position, subscriber) in self.subscribers.iter().enumerate() {
            match subscriber.receive(message, sink) {
                Ok(line) => report.delivered.push(line),
                Err(error) => {
                    warn!(
                        subscriber = subscriber.name(),
                        position,
                        error = %error,
                        "Subscriber failed to receive message"
                    );
                    report.failures.push(DeliveryFailure {
                        position,
                        subscriber: subscriber.name().to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            delivered = report.delivered.len(),
            failed = report.failures.len(),
            "Broadcast finished"
        );
        report
    }
}
