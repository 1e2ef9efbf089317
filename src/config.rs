//! Configuration management for the notifier
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer, in increasing priority, the built-in
//! defaults, an optional `notifier.toml` file, `NOTIFIER_`-prefixed
//! environment variables, and command-line arguments.

use crate::cli::Cli;
use crate::subscriber::User;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for diagnostics written to stderr.
    pub log_level: String,
    /// Channel tags to broadcast on, in order. One broadcast per entry.
    pub channels: Vec<String>,
    /// The message to broadcast.
    #[serde(deserialize_with = "scalar_string")]
    pub message: String,
    /// The users attached to the notification subject, in order.
    pub subscribers: Vec<User>,
    /// Configuration for console output.
    pub output: OutputConfig,
    /// Unsubscribes users after the main broadcasts and sends one more message.
    #[serde(default)]
    pub follow_up: Option<FollowUpConfig>,
}

/// A second round sent after some users have unsubscribed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FollowUpConfig {
    /// Names of the users to detach before the follow-up is sent. The first
    /// attached user with each name is removed; unknown names are ignored.
    #[serde(default)]
    pub unsubscribe: Vec<String>,
    /// Channel tag for the follow-up message.
    #[serde(default = "default_follow_up_channel")]
    pub channel: String,
    /// The follow-up message.
    #[serde(deserialize_with = "scalar_string")]
    pub message: String,
}

fn default_follow_up_channel() -> String {
    "email".to_string()
}

/// Accepts any scalar where a string is expected.
///
/// Environment values are typed by figment, so `NOTIFIER_MESSAGE=2025`
/// arrives as an integer.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
        Char(char),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Char(c) => c.to_string(),
    })
}

/// The format for stdout output.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[serde(alias = "json", alias = "JSON")]
    Json,
    #[default]
    #[serde(alias = "plaintext", alias = "plain_text", alias = "plain", alias = "text")]
    PlainText,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "Json"),
            OutputFormat::PlainText => write!(f, "PlainText"),
        }
    }
}

/// Configuration for console output.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    /// The format to use for stdout output.
    pub format: OutputFormat,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// # Arguments
    /// * `cli` - Parsed command-line arguments. Supplies the optional config
    ///   file path and the highest-priority overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            // e.g., NOTIFIER_LOG_LEVEL=debug or NOTIFIER_OUTPUT__FORMAT=Json
            .merge(Env::prefixed("NOTIFIER_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            channels: vec!["email".to_string()],
            message: "Nueva actualización disponible".to_string(),
            subscribers: vec![User::new("Ana"), User::new("Carlos")],
            output: OutputConfig::default(),
            follow_up: None,
        }
    }
}
