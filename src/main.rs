mod availability;
mod catalog;
mod client;
mod config;
mod error;
mod ledger;
mod notifier;
mod watcher;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::DoctolibClient;
use crate::config::WatchConfig;
use crate::ledger::NotificationLedger;
use crate::notifier::SlackNotifier;
use crate::watcher::Watcher;

#[derive(Parser)]
#[command(name = "vaxwatch")]
#[command(about = "Polls Doctolib vaccination centers for open slots and posts Slack alerts")]
struct Cli {
    /// Path to a JSON file listing the centers to watch as {ville, name} objects.
    #[arg(long, value_name = "PATH", env = "SLUG_FILE")]
    slug_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaxwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting vaxwatch");
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if !cli.slug_file.exists() {
        bail!("slug file {} does not exist", cli.slug_file.display());
    }

    let config = WatchConfig::from_env()?;
    let centers = catalog::load_catalog(&cli.slug_file)?;
    tracing::info!(centers = centers.len(), "catalog loaded");

    let client = DoctolibClient::new(&config.base_url, config.call_spacing);
    let ledger = NotificationLedger::new(&config.ledger_path, config.debounce_minutes);
    let notifier = SlackNotifier::new(&config.slack_webhook_url);

    let mut watcher = Watcher::new(client, ledger, notifier, config.alert_threshold);
    if let Err(e) = watcher.run(&centers).await {
        tracing::error!("run aborted: {e}");
        return Err(e.into());
    }

    tracing::info!("catalog pass complete");
    Ok(())
}
