// src/app.rs
use anyhow::{Context, Result};
use deckhand_infra::{ClientConfig, GraphQlClient, HttpTransport, SystemClock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{self, Args, Command, SnapshotAction},
    commands,
    presentation::OutputFormat,
};

/// Installs the stderr subscriber; `log` records from the library crates are
/// forwarded through the `tracing-log` bridge.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn connect(config: &ClientConfig) -> Result<GraphQlClient<HttpTransport>> {
    let transport = HttpTransport::new(config).context("failed to set up the HTTP client")?;
    Ok(GraphQlClient::new(transport))
}

pub fn run(args: &Args) -> Result<()> {
    let config = cli::build_config(args).context("invalid configuration")?;
    let format = OutputFormat::from(args.format);
    let clock = SystemClock;

    let output = match &args.command {
        Command::Query(cmd) => commands::query(cmd).context("query conversion failed")?,
        Command::Catalog => commands::catalog(&connect(&config)?, format).context("catalog fetch failed")?,
        Command::Search(cmd) => commands::search(cmd, &connect(&config)?, format).context("search failed")?,
        Command::Presets { action } => {
            let client = connect(&config)?;
            commands::presets(action, &client, &clock, &config, format).context("preset command failed")?
        }
        Command::Tags { action } => commands::tags(action, &connect(&config)?, format).context("tag command failed")?,
        Command::Chains { action } => {
            commands::chains(action, &connect(&config)?, format).context("chain command failed")?
        }
        Command::Snapshot { action } => {
            let offline = match action {
                SnapshotAction::Save { offline, .. } | SnapshotAction::Load { offline, .. } => *offline,
            };
            let client = if offline { None } else { Some(connect(&config)?) };
            let source = client.as_ref().map(|c| c as &dyn deckhand_ports::CatalogSource);
            commands::snapshot(action, source, format).context("snapshot command failed")?
        }
    };
    println!("{output}");
    Ok(())
}
