//! MCP tool registry and the `get_transcript` tool.

use super::protocol::{Tool, ToolCallResult};
use crate::error::{Error, Result};
use crate::transcript::{parse_video_id, TranscriptFetcher};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const GET_TRANSCRIPT: &str = "get_transcript";

/// A callable tool: its advertised definition plus the code that runs it.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, description and input schema shown in `tools/list`.
    fn definition(&self) -> Tool;

    /// Run the tool. Argument problems must surface as [`Error::InvalidRequest`].
    async fn call(&self, arguments: Option<Value>) -> Result<ToolCallResult>;
}

/// Tools known to the server, keyed by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under the name from its definition. Replaces any tool
    /// already registered with that name.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.definition().name;
        self.tools.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// All tool definitions, ordered by name.
    pub fn definitions(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self.tools.values().map(|t| t.definition()).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }
}

/// Validated arguments of a `get_transcript` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRequest {
    pub video_id: String,
    pub languages: Vec<String>,
}

impl TranscriptRequest {
    /// Extract `video_id` and `languages` from raw tool arguments.
    ///
    /// A missing, null or empty `languages` falls back to `default_languages`.
    pub fn from_arguments(arguments: Option<&Value>, default_languages: &[String]) -> Result<Self> {
        let args = match arguments {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => {
                return Err(Error::InvalidRequest("Missing 'video_id' argument".to_string()))
            }
            Some(_) => {
                return Err(Error::InvalidRequest(
                    "Tool arguments must be an object".to_string(),
                ))
            }
        };

        let raw_id = match args.get("video_id") {
            Some(Value::String(s)) => s.trim(),
            Some(Value::Null) | None => {
                return Err(Error::InvalidRequest("Missing 'video_id' argument".to_string()))
            }
            Some(_) => {
                return Err(Error::InvalidRequest(
                    "'video_id' must be a string".to_string(),
                ))
            }
        };
        if raw_id.is_empty() {
            return Err(Error::InvalidRequest(
                "'video_id' must not be empty".to_string(),
            ));
        }
        let video_id = parse_video_id(raw_id).unwrap_or_else(|| raw_id.to_string());

        let languages = match args.get("languages") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        Error::InvalidRequest("'languages' must be an array of strings".to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(Error::InvalidRequest(
                    "'languages' must be an array of strings".to_string(),
                ))
            }
        };
        let languages = if languages.is_empty() {
            default_languages.to_vec()
        } else {
            languages
        };

        Ok(Self {
            video_id,
            languages,
        })
    }
}

/// Fetches the transcript of a YouTube video as plain text.
pub struct GetTranscriptTool {
    fetcher: TranscriptFetcher,
    default_languages: Vec<String>,
}

impl GetTranscriptTool {
    pub fn new(fetcher: TranscriptFetcher, default_languages: Vec<String>) -> Self {
        Self {
            fetcher,
            default_languages,
        }
    }
}

#[async_trait]
impl ToolHandler for GetTranscriptTool {
    fn definition(&self) -> Tool {
        Tool {
            name: GET_TRANSCRIPT.to_string(),
            description: "Get transcript for a YouTube video".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_id": {
                        "type": "string",
                        "description": "YouTube video ID (e.g., dQw4w9WgXcQ from youtube.com/watch?v=dQw4w9WgXcQ)"
                    },
                    "languages": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of language codes to try (e.g., [\"en\"]). Optional."
                    }
                },
                "required": ["video_id"]
            }),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> Result<ToolCallResult> {
        let request = TranscriptRequest::from_arguments(arguments.as_ref(), &self.default_languages)?;

        tracing::info!(
            video_id = %request.video_id,
            languages = ?request.languages,
            "Fetching transcript"
        );

        let text = self
            .fetcher
            .fetch(&request.video_id, &request.languages)
            .await?;

        tracing::info!(video_id = %request.video_id, length = text.len(), "Formatted transcript");
        Ok(ToolCallResult::text(text))
    }
}
