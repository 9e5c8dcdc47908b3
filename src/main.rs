mod cli;
mod config;
mod error;
mod model;
mod report;
mod select;
mod tracker;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use error::TrackerError;
use tracker::pivotal::PivotalTracker;

/// Logs go to stderr so reports can be piped.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Token is checked before any request is made
    let config = match config::load_config(cli.base_url.clone()) {
        Ok(config) => config,
        Err(err) => {
            if let Some(TrackerError::MissingCredential) = err.downcast_ref::<TrackerError>() {
                eprintln!("{}\n", config::missing_token_help());
            }
            return Err(err);
        }
    };

    let tracker = PivotalTracker::new(&config);
    let text = cli::run(&tracker, &cli.command).await?;
    cli::write_report(&mut std::io::stdout().lock(), &text)?;

    Ok(())
}
