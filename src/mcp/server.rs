//! MCP server implementation.

use super::protocol::*;
use super::tools::{GetTranscriptTool, ToolRegistry};
use crate::config::Settings;
use crate::error::Error;
use crate::transcript::{TranscriptFetcher, YouTubeProvider};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server exposing the registered tools over JSON-RPC.
pub struct McpServer {
    name: String,
    registry: ToolRegistry,
    unbuffered: bool,
    span: tracing::Span,
}

impl McpServer {
    /// Create a server over an explicit tool registry.
    pub fn new(settings: &Settings, registry: ToolRegistry) -> Self {
        let span = tracing::info_span!("mcp", server = %settings.server.name);
        Self {
            name: settings.server.name.clone(),
            registry,
            unbuffered: settings.server.unbuffered,
            span,
        }
    }

    /// Create a server with the `get_transcript` tool backed by YouTube.
    pub fn from_settings(settings: &Settings) -> crate::Result<Self> {
        let provider = YouTubeProvider::new(settings.transcript.preserve_formatting)?;
        let fetcher = TranscriptFetcher::new(Arc::new(provider));

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GetTranscriptTool::new(
            fetcher,
            settings.transcript.default_languages.clone(),
        )));

        Ok(Self::new(settings, registry))
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock()).await
    }

    /// Serve newline-delimited JSON-RPC messages until `reader` is exhausted.
    ///
    /// Unbuffered mode flushes each response as soon as it is written.
    /// Otherwise responses are flushed together right before the server
    /// blocks on the next read, so a client waiting for a reply always gets it.
    pub async fn serve<R: BufRead, W: Write>(&self, mut reader: R, writer: W) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        let mut buf = Vec::new();

        // Logs go to stderr so they don't interfere with JSON-RPC
        self.span.in_scope(|| {
            tracing::info!(
                version = SERVER_VERSION,
                tools = self.registry.definitions().len(),
                unbuffered = self.unbuffered,
                "Starting transcript server"
            )
        });

        loop {
            if !self.unbuffered {
                writer.flush()?;
            }

            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    self.handle_message(line).await
                }
                Err(e) => {
                    self.span
                        .in_scope(|| tracing::warn!(error = %e, "Request is not valid UTF-8"));
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                writeln!(writer, "{}", serde_json::to_string(&response)?)?;
                if self.unbuffered {
                    writer.flush()?;
                }
            }
        }

        writer.flush()?;
        self.span
            .in_scope(|| tracing::info!("Input closed, shutting down"));
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        async {
            tracing::debug!(raw = line, "Received message");
            let started = Instant::now();

            let value: Value = match serde_json::from_str(line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse request");
                    return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"));
                }
            };

            let id = value.get("id").cloned();
            let request: JsonRpcRequest = match serde_json::from_value(value) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed request");
                    return Some(JsonRpcResponse::error(id, INVALID_REQUEST, "Invalid Request"));
                }
            };
            if request.jsonrpc.as_deref().is_some_and(|v| v != "2.0") {
                return Some(JsonRpcResponse::error(
                    request.id,
                    INVALID_REQUEST,
                    "Invalid Request: unsupported jsonrpc version",
                ));
            }

            let method = request.method.clone();
            let response = self.handle_request(request).await;

            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &response {
                Some(JsonRpcResponse {
                    error: Some(err), ..
                }) => tracing::info!(
                    method = %method,
                    code = err.code,
                    elapsed_ms,
                    "Request failed"
                ),
                Some(_) => tracing::info!(method = %method, elapsed_ms, "Request completed"),
                None => tracing::debug!(method = %method, "Notification handled"),
            }

            response
        }
        .instrument(self.span.clone())
        .await
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id;
        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id, request.params)),
            "initialized" | "notifications/initialized" => None,
            "cancelled" | "notifications/cancelled" => {
                tracing::debug!(params = ?request.params, "Received cancellation");
                None
            }
            method if method.starts_with("notifications/") => {
                tracing::debug!(method, "Ignoring notification");
                None
            }
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, request.params).await),
            "resources/list" => Some(JsonRpcResponse::success(id, json!({ "resources": [] }))),
            "resources/templates/list" => Some(JsonRpcResponse::success(
                id,
                json!({ "resourceTemplates": [] }),
            )),
            method => Some(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", method),
            )),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        // Echo the client's protocol version
        let protocol_version = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION)
            .to_string();

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: SERVER_VERSION.to_string(),
            },
        };

        respond(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.registry.definitions(),
        };
        respond(id, &result)
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let Some(tool) = self.registry.get(&params.name) else {
            tracing::error!(tool = %params.name, "Unknown tool");
            return JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                &format!("Unknown tool: {}", params.name),
            );
        };

        match tool.call(params.arguments).await {
            Ok(result) => respond(id, &result),
            Err(Error::InvalidRequest(msg)) => {
                tracing::warn!(tool = %params.name, reason = %msg, "Rejected tool arguments");
                JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", msg))
            }
            Err(e) if e.is_fetch_failure() => {
                let message = format!("Error getting transcript: {}", e);
                tracing::error!(tool = %params.name, kind = ?e.kind(), "{}", message);
                JsonRpcResponse::error(id, SERVER_ERROR, &message)
            }
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "Tool failed");
                JsonRpcResponse::error(id, INTERNAL_ERROR, &e.to_string())
            }
        }
    }
}

/// Serialize `result` into a success envelope.
fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &e.to_string()),
    }
}
