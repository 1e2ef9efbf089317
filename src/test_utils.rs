//! Failing sinks and subscribers for exercising error isolation.

use crate::core::{Sink, Subscriber};
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A subscriber whose every delivery fails.
#[derive(Debug)]
pub struct FailingSubscriber {
    name: String,
    attempts: AtomicUsize,
}

impl FailingSubscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of times delivery was attempted.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Subscriber for FailingSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, _message: &str, _sink: &dyn Sink) -> Result<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        bail!("subscriber '{}' is unreachable", self.name)
    }
}

/// A sink that rejects every write.
#[derive(Debug, Default)]
pub struct FailingSink;

impl Sink for FailingSink {
    fn name(&self) -> &str {
        "failing_mock"
    }

    fn write_line(&self, _line: &str) -> Result<()> {
        bail!("sink is closed")
    }
}
