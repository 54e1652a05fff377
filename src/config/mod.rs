//! Configuration module.
//!
//! Settings come from an optional TOML file; command-line flags and
//! environment variables override individual values.

mod settings;

pub use settings::{LogLevel, LoggingSettings, ServerSettings, Settings, TranscriptSettings};
