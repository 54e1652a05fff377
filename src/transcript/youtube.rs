//! YouTube transcript provider backed by `yt-transcript-rs`.

use super::{TranscriptLine, TranscriptProvider};
use crate::error::{Error, Result};
use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Fetches transcripts straight from YouTube.
///
/// Language preference follows the library's lookup: codes are tried in the
/// order given, manually created transcripts before generated ones, and the
/// first match wins.
#[derive(Clone)]
pub struct YouTubeProvider {
    api: YouTubeTranscriptApi,
    preserve_formatting: bool,
}

impl YouTubeProvider {
    pub fn new(preserve_formatting: bool) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            Error::Config(format!("Failed to initialize YouTube client: {}", e))
        })?;
        Ok(Self {
            api,
            preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptProvider for YouTubeProvider {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Vec<TranscriptLine>> {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, self.preserve_formatting)
            .await
            .map_err(|e| classify(video_id, &languages, &e))?;

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| TranscriptLine {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}

/// Map the library's failure reason onto our error taxonomy.
fn classify(video_id: &str, languages: &[&str], err: &CouldNotRetrieveTranscript) -> Error {
    use CouldNotRetrieveTranscriptReason as Reason;

    let video_id = video_id.to_string();
    let cause = err.to_string();

    match err.reason.as_ref() {
        Some(Reason::VideoUnavailable { .. })
        | Some(Reason::InvalidVideoId { .. })
        | Some(Reason::VideoUnplayable { .. }) => Error::VideoNotFound { video_id, cause },
        Some(Reason::TranscriptsDisabled { .. }) => Error::TranscriptsDisabled { video_id, cause },
        Some(Reason::NoTranscriptFound { .. }) => Error::NoTranscriptAvailable {
            video_id,
            languages: languages.iter().map(|l| l.to_string()).collect(),
            cause,
        },
        Some(Reason::YouTubeRequestFailed { .. })
        | Some(Reason::IpBlocked { .. })
        | Some(Reason::RequestBlocked { .. }) => Error::Transport { video_id, cause },
        _ => Error::Unknown { video_id, cause },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;
    use yt_transcript_rs::TranscriptList;

    fn failure(reason: Option<CouldNotRetrieveTranscriptReason>) -> CouldNotRetrieveTranscript {
        CouldNotRetrieveTranscript {
            video_id: "dQw4w9WgXcQ".to_string(),
            reason,
        }
    }

    #[test]
    fn test_classify_every_reason() {
        use CouldNotRetrieveTranscriptReason as Reason;

        let cases = vec![
            (Some(Reason::VideoUnavailable), ErrorKind::VideoNotFound),
            (Some(Reason::InvalidVideoId), ErrorKind::VideoNotFound),
            (
                Some(Reason::VideoUnplayable {
                    reason: Some("Private video".to_string()),
                    sub_reasons: vec![],
                }),
                ErrorKind::VideoNotFound,
            ),
            (Some(Reason::TranscriptsDisabled), ErrorKind::TranscriptsDisabled),
            (
                Some(Reason::NoTranscriptFound {
                    requested_language_codes: vec!["fr".to_string()],
                    transcript_data: TranscriptList::new(
                        "dQw4w9WgXcQ".to_string(),
                        HashMap::new(),
                        HashMap::new(),
                        vec![],
                    ),
                }),
                ErrorKind::NoTranscriptAvailable,
            ),
            (
                Some(Reason::YouTubeRequestFailed("connection reset".to_string())),
                ErrorKind::TransportFailure,
            ),
            (Some(Reason::IpBlocked(None)), ErrorKind::TransportFailure),
            (Some(Reason::RequestBlocked(None)), ErrorKind::TransportFailure),
            (Some(Reason::AgeRestricted), ErrorKind::UnknownFailure),
            (
                Some(Reason::YouTubeDataUnparsable("bad json".to_string())),
                ErrorKind::UnknownFailure,
            ),
            (None, ErrorKind::UnknownFailure),
        ];

        for (reason, expected) in cases {
            let label = format!("{:?}", reason);
            let err = classify("dQw4w9WgXcQ", &["fr"], &failure(reason));
            assert_eq!(err.kind(), expected, "{}", label);
            assert!(err.is_fetch_failure());
            assert!(err.to_string().contains("dQw4w9WgXcQ"), "{}", label);
        }
    }

    #[test]
    fn test_no_transcript_keeps_requested_languages() {
        let reason = CouldNotRetrieveTranscriptReason::NoTranscriptFound {
            requested_language_codes: vec!["fr".to_string(), "de".to_string()],
            transcript_data: TranscriptList::new(
                "dQw4w9WgXcQ".to_string(),
                HashMap::new(),
                HashMap::new(),
                vec![],
            ),
        };

        let err = classify("dQw4w9WgXcQ", &["fr", "de"], &failure(Some(reason)));

        match &err {
            Error::NoTranscriptAvailable { languages, .. } => {
                assert_eq!(languages, &vec!["fr".to_string(), "de".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains(r#"["fr", "de"]"#));
    }
}
