//! YouTube transcript server
//!
//! Exposes a single MCP tool, `get_transcript`, over JSON-RPC 2.0 on stdio.
//! A calling agent names a video and an ordered list of preferred languages;
//! the server fetches the captions from YouTube, drops the timing and returns
//! the text joined by newlines.
//!
//! # Architecture
//!
//! - `config` - Settings file and overrides
//! - `transcript` - Provider abstraction, YouTube provider and text normalization
//! - `mcp` - JSON-RPC endpoint and tool registry
//! - `cli` - `serve` and `fetch` commands
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use youtube_transcript_server::transcript::{TranscriptFetcher, YouTubeProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = TranscriptFetcher::new(Arc::new(YouTubeProvider::new(false)?));
//!     let text = fetcher.fetch("dQw4w9WgXcQ", &["en".to_string()]).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod transcript;

pub use error::{Error, ErrorKind, Result};
