//! Command-Line Interface (CLI) argument parsing.
//!
//! The arguments defined here are parsed at startup and merged on top of the
//! configuration file and environment variables, see [`Config::load`](crate::config::Config::load).

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Broadcasts a notification to a set of subscribers over a chosen channel.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Channel to send on (email, sms or push). Repeat to broadcast on several.
    #[arg(long = "channel", value_name = "TAG")]
    pub channels: Vec<String>,

    /// The message to broadcast.
    #[arg(short, long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Subscriber name. Repeat to attach several; replaces the configured list.
    #[arg(short, long = "subscriber", value_name = "NAME")]
    pub subscribers: Vec<String>,

    /// Unsubscribe a user by name before the follow-up message. Repeatable.
    #[arg(long = "unsubscribe", value_name = "NAME")]
    pub unsubscribe: Vec<String>,

    /// Message sent after the unsubscriptions.
    #[arg(long, value_name = "TEXT")]
    pub follow_up: Option<String>,

    /// Channel for the follow-up message (defaults to email).
    #[arg(long, value_name = "TAG")]
    pub follow_up_channel: Option<String>,

    /// Emit notification lines as JSON records.
    #[arg(long)]
    pub json: bool,

    /// Logging level for diagnostics (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if !self.channels.is_empty() {
            dict.insert("channels".into(), Value::from(self.channels.clone()));
        }

        if let Some(message) = &self.message {
            dict.insert("message".into(), Value::from(message.as_str()));
        }

        if !self.subscribers.is_empty() {
            let subscribers: Vec<Value> = self
                .subscribers
                .iter()
                .map(|name| {
                    let mut user = Dict::new();
                    user.insert("name".into(), Value::from(name.as_str()));
                    Value::from(user)
                })
                .collect();
            dict.insert("subscribers".into(), Value::from(subscribers));
        }

        let mut follow_up = Dict::new();
        if !self.unsubscribe.is_empty() {
            follow_up.insert("unsubscribe".into(), Value::from(self.unsubscribe.clone()));
        }
        if let Some(message) = &self.follow_up {
            follow_up.insert("message".into(), Value::from(message.as_str()));
        }
        if let Some(channel) = &self.follow_up_channel {
            follow_up.insert("channel".into(), Value::from(channel.as_str()));
        }
        if !follow_up.is_empty() {
            dict.insert("follow_up".into(), Value::from(follow_up));
        }

        // Only an explicit `--json` overrides the configured format.
        if self.json {
            let mut output = Dict::new();
            output.insert("format".into(), Value::from("Json"));
            dict.insert("output".into(), Value::from(output));
        }

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.as_str()));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
