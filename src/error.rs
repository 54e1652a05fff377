//! Error types for the transcript server.

use thiserror::Error;

/// Library-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Video {video_id} does not exist or is unavailable: {cause}")]
    VideoNotFound { video_id: String, cause: String },

    #[error("Transcripts are disabled for video {video_id}: {cause}")]
    TranscriptsDisabled { video_id: String, cause: String },

    #[error("No transcript available for video {video_id} in languages {languages:?}: {cause}")]
    NoTranscriptAvailable {
        video_id: String,
        languages: Vec<String>,
        cause: String,
    },

    #[error("Could not reach YouTube for video {video_id}: {cause}")]
    Transport { video_id: String, cause: String },

    #[error("Could not retrieve transcript for video {video_id}: {cause}")]
    Unknown { video_id: String, cause: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Classification of a failure, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    VideoNotFound,
    TranscriptsDisabled,
    NoTranscriptAvailable,
    TransportFailure,
    UnknownFailure,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::VideoNotFound { .. } => ErrorKind::VideoNotFound,
            Error::TranscriptsDisabled { .. } => ErrorKind::TranscriptsDisabled,
            Error::NoTranscriptAvailable { .. } => ErrorKind::NoTranscriptAvailable,
            Error::Transport { .. } => ErrorKind::TransportFailure,
            Error::Unknown { .. } => ErrorKind::UnknownFailure,
            Error::Config(_) | Error::Io(_) | Error::TomlParse(_) => ErrorKind::Internal,
        }
    }

    /// Whether this failure happened while talking to the transcript provider.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::VideoNotFound
                | ErrorKind::TranscriptsDisabled
                | ErrorKind::NoTranscriptAvailable
                | ErrorKind::TransportFailure
                | ErrorKind::UnknownFailure
        )
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_video() {
        let err = Error::VideoNotFound {
            video_id: "abc123def45".to_string(),
            cause: "The video is no longer available".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123def45"));
        assert!(msg.contains("does not exist"));
        assert_eq!(err.kind(), ErrorKind::VideoNotFound);
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_invalid_request_is_not_fetch_failure() {
        let err = Error::InvalidRequest("Missing 'video_id' argument".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(!err.is_fetch_failure());
    }

    #[test]
    fn test_process_errors_are_internal() {
        let err = Error::Config("transcript.default_languages is empty".to_string());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_fetch_failure());
    }
}
