//! notifier - broadcasts a notification over a chosen channel to a list of
//! subscribers.

use anyhow::{bail, Result};
use clap::Parser;
use notifier::{app::App, cli::Cli, config::Config};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        init_logging("error");
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    init_logging(&config.log_level);

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Channels: {}", config.channels.join(", "));
    info!("Subscribers: {}", config.subscribers.len());
    info!("Output Format: {}", config.output.format);
    if let Some(follow_up) = &config.follow_up {
        info!(
            "Follow-up: on {}, unsubscribing [{}]",
            follow_up.channel,
            follow_up.unsubscribe.join(", ")
        );
    }
    info!("-------------------------------------------------------");

    let mut app = App::builder(config).build()?;
    let summary = app.run()?;

    let failed = summary.failed_deliveries();
    if failed > 0 {
        for broadcast in &summary.broadcasts {
            for failure in &broadcast.report.failures {
                warn!(
                    channel = %broadcast.channel.kind(),
                    subscriber = %failure.subscriber,
                    "Delivery failed: {:#}",
                    failure.error
                );
            }
        }
        bail!("{} notification deliveries failed", failed);
    }

    Ok(())
}

/// Initializes diagnostics on stderr. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
