//! The main application logic, decoupled from the entry point.

use crate::{
    channel::{Channel, NotificationFactory},
    config::Config,
    core::{Sink, Subscriber},
    outputs::StdoutSink,
    subject::{BroadcastReport, NotificationSubject},
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The outcome of broadcasting on one channel.
#[derive(Debug)]
pub struct ChannelBroadcast {
    pub channel: Channel,
    /// The line the channel emitted before subscribers were notified.
    pub channel_line: String,
    pub report: BroadcastReport,
}

/// The outcome of a full run: one entry per configured channel, followed by
/// the follow-up broadcast if one was configured.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub broadcasts: Vec<ChannelBroadcast>,
    /// Names of the users detached before the follow-up.
    pub unsubscribed: Vec<String>,
}

impl RunSummary {
    /// Total number of subscriber deliveries that failed across all channels.
    pub fn failed_deliveries(&self) -> usize {
        self.broadcasts.iter().map(|b| b.report.failures.len()).sum()
    }
}

/// A fully wired application: validated channels, a populated subject and
/// the sink everything is written to.
pub struct App {
    message: String,
    channels: Vec<Channel>,
    subject: NotificationSubject,
    follow_up: Option<FollowUp>,
    sink: Arc<dyn Sink>,
}

/// A resolved follow-up round.
struct FollowUp {
    unsubscribe: Vec<String>,
    channel: Channel,
    message: String,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn subject(&self) -> &NotificationSubject {
        &self.subject
    }

    /// Sends the message on each channel and broadcasts it to the subject
    /// after every send. If a follow-up is configured, the listed users are
    /// then detached and the follow-up message goes out on its channel.
    ///
    /// A sink failure on a channel line aborts the run. Subscriber failures
    /// are recorded in the returned summary.
    #[instrument(skip(self), fields(channels = self.channels.len(), subscribers = self.subject.len()))]
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for channel in &self.channels {
            let broadcast = self.notify(channel, &self.message)?;
            summary.broadcasts.push(broadcast);
        }

        if let Some(follow_up) = self.follow_up.take() {
            for name in &follow_up.unsubscribe {
                match self.subject.find(name) {
                    Some(subscriber) => {
                        self.subject.detach(&subscriber);
                        info!(subscriber = %name, "Unsubscribed");
                        summary.unsubscribed.push(name.clone());
                    }
                    None => warn!(subscriber = %name, "Cannot unsubscribe, no such subscriber"),
                }
            }
            let broadcast = self.notify(&follow_up.channel, &follow_up.message)?;
            summary.broadcasts.push(broadcast);
        }

        Ok(summary)
    }

    fn notify(&self, channel: &Channel, message: &str) -> Result<ChannelBroadcast> {
        info!(channel = %channel.kind(), "Sending notification");
        let channel_line = channel.send(message, self.sink.as_ref())?;
        let report = self.subject.broadcast(message, self.sink.as_ref());
        Ok(ChannelBroadcast {
            channel: *channel,
            channel_line,
            report,
        })
    }
}

/// Builder for the main application.
///
/// Separates constructing the components from running them, and lets tests
/// swap the stdout sink for a capturing one.
pub struct AppBuilder {
    config: Config,
    sink_override: Option<Arc<dyn Sink>>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sink_override: None,
        }
    }

    /// Overrides the output sink for testing.
    pub fn sink_override(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink_override = Some(sink);
        self
    }

    /// Builds the application.
    ///
    /// Every configured channel tag, the follow-up's included, is resolved
    /// up front, so an unknown tag
    /// fails with [`NotifyError::UnknownChannelKind`](crate::error::NotifyError)
    /// before anything is written.
    pub fn build(self) -> Result<App> {
        let channels = self
            .config
            .channels
            .iter()
            .map(|tag| NotificationFactory::create(tag))
            .collect::<Result<Vec<_>, _>>()?;

        let follow_up = match self.config.follow_up {
            Some(follow_up) => Some(FollowUp {
                channel: NotificationFactory::create(&follow_up.channel)?,
                unsubscribe: follow_up.unsubscribe,
                message: follow_up.message,
            }),
            None => None,
        };

        let mut subject = NotificationSubject::new();
        for user in self.config.subscribers {
            subject.attach(Arc::new(user) as Arc<dyn Subscriber>);
        }
        debug!(subscribers = ?subject.subscriber_names(), "Subject populated");

        let sink = self
            .sink_override
            .unwrap_or_else(|| Arc::new(StdoutSink::new(self.config.output.format)) as Arc<dyn Sink>);

        Ok(App {
            message: self.config.message,
            channels,
            subject,
            follow_up,
            sink,
        })
    }
}
