//! Fetch command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{parse_video_id, TranscriptFetcher, YouTubeProvider};
use anyhow::Result;
use std::sync::Arc;

/// Fetch a single transcript and print it to stdout.
pub async fn run_fetch(video: &str, languages: &[String], settings: &Settings) -> Result<()> {
    let provider = YouTubeProvider::new(settings.transcript.preserve_formatting)?;
    let fetcher = TranscriptFetcher::new(Arc::new(provider));

    let (video_id, languages) = resolve_request(video, languages, settings);
    Output::info(&format!("Fetching transcript for video {}", video_id));
    Output::kv("Languages", &languages.join(", "));

    let spinner = Output::spinner("Contacting YouTube...");
    let result = fetcher.fetch(&video_id, &languages).await;
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            Output::success(&format!(
                "Retrieved transcript with {} lines",
                if text.is_empty() { 0 } else { text.lines().count() }
            ));
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to get transcript: {}", e));
            Err(e.into())
        }
    }
}

/// Normalize the video argument and fill in default languages.
fn resolve_request(video: &str, languages: &[String], settings: &Settings) -> (String, Vec<String>) {
    let video = video.trim();
    let video_id = parse_video_id(video).unwrap_or_else(|| video.to_string());

    let languages: Vec<String> = languages
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let languages = if languages.is_empty() {
        settings.transcript.default_languages.clone()
    } else {
        languages
    };

    (video_id, languages)
}
