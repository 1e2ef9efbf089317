//! The user subscriber.

use crate::core::{Sink, Subscriber};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A named user that receives broadcast notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "crate::config::scalar_string")]
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Renders the line this user emits for `message`.
    pub fn render(&self, message: &str) -> String {
        format!("[Notificación para {}]: {}", self.name, message)
    }
}

impl Subscriber for User {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, message: &str, sink: &dyn Sink) -> Result<String> {
        let line = self.render(message);
        sink.write_line(&line)?;
        Ok(line)
    }
}
