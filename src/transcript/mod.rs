//! Transcript retrieval.
//!
//! A [`TranscriptProvider`] returns timed caption lines for a video; the
//! [`TranscriptFetcher`] drops the timing and joins the text into one block.

mod youtube;

pub use youtube::YouTubeProvider;

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// A single caption line as returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Source of timed transcript lines.
///
/// Implementations try `languages` in the given order and return the first
/// transcript available. Failures must already be classified into one of the
/// fetch variants of [`crate::Error`].
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Vec<TranscriptLine>>;
}

/// Fetches a transcript and normalizes it to plain text.
#[derive(Clone)]
pub struct TranscriptFetcher {
    provider: Arc<dyn TranscriptProvider>,
}

impl TranscriptFetcher {
    pub fn new(provider: Arc<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the transcript of `video_id` as newline-joined text.
    ///
    /// An empty transcript yields an empty string.
    pub async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<String> {
        tracing::debug!(video_id, ?languages, "Requesting transcript from provider");
        let lines = self.provider.fetch(video_id, languages).await?;
        tracing::debug!(video_id, lines = lines.len(), "Provider returned transcript");
        Ok(join_lines(&lines))
    }
}

/// Join line texts with a single newline, keeping their order.
pub fn join_lines(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Whole input must be a YouTube URL or a bare 11-character ID
        Regex::new(concat!(
            r"^(?:https?://)?(?:www\.|m\.)?",
            r"(?:youtube\.com/watch\?(?:[^#]*&)?v=|youtu\.be/|youtube\.com/(?:embed|v|shorts)/)",
            r"([a-zA-Z0-9_-]{11})(?:[?&#/].*)?$",
            r"|^([a-zA-Z0-9_-]{11})$",
        ))
        .expect("Invalid regex")
    })
}

/// Extract the video ID from a YouTube URL or bare ID.
pub fn parse_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
