//! CLI module.

pub mod commands;
mod output;

pub use output::Output;

use crate::config::{LogLevel, Settings};
use clap::{Parser, Subcommand};

/// YouTube transcript server
///
/// Serves a `get_transcript` tool over MCP (JSON-RPC on stdio), or fetches a
/// single transcript from the command line.
#[derive(Parser, Debug)]
#[command(name = "youtube-transcript-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TRANSCRIPT_SERVER_CONFIG")]
    pub config: Option<String>,

    /// Log level (DEBUG, INFO, WARNING, ERROR)
    #[arg(long, global = true, env = "LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Flush stdout after every response (true/false, 1/0)
    #[arg(
        long,
        global = true,
        env = "UNBUFFERED",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub unbuffered: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the MCP server on stdio (default)
    Serve,

    /// Fetch one transcript and print it to stdout
    Fetch {
        /// YouTube URL or video ID
        video: String,

        /// Language codes to try, in order (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,
    },
}

impl Cli {
    /// Apply command-line and environment overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(level) = self.log_level {
            settings.logging.level = level;
        }
        settings.logging.level = settings.logging.level.louder(self.verbose);

        if let Some(unbuffered) = self.unbuffered {
            settings.server.unbuffered = unbuffered;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["youtube-transcript-server"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_fetch_languages_split() {
        let cli = Cli::try_parse_from([
            "youtube-transcript-server",
            "fetch",
            "dQw4w9WgXcQ",
            "--languages",
            "de,en",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Fetch {
                video: "dQw4w9WgXcQ".to_string(),
                languages: vec!["de".to_string(), "en".to_string()],
            })
        );
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "youtube-transcript-server",
            "--log-level",
            "WARNING",
            "--unbuffered",
            "0",
            "-v",
        ])
        .unwrap();

        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);

        assert_eq!(settings.logging.level, LogLevel::Info);
        assert!(!settings.server.unbuffered);
    }
}
