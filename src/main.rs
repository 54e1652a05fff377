//! youtube-transcript-server entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use youtube_transcript_server::cli::{commands, Cli, Commands};
use youtube_transcript_server::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(std::path::Path::new(path)))?,
        None => Settings::load()?,
    };
    cli.apply_overrides(&mut settings);

    // Initialize logging once; stdout belongs to the protocol
    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!(
                "youtube_transcript_server={}",
                settings.logging.level.as_filter()
            )
        })))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(?settings, "Loaded configuration");

    match &cli.command {
        None | Some(Commands::Serve) => {
            commands::run_serve(&settings).await?;
        }

        Some(Commands::Fetch { video, languages }) => {
            commands::run_fetch(video, languages, &settings).await?;
        }
    }

    Ok(())
}
