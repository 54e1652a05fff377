//! MCP (Model Context Protocol) server.
//!
//! Lets AI assistants call `get_transcript` as a tool.
//! Implements JSON-RPC 2.0 over stdio.

pub mod protocol;
mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{GetTranscriptTool, ToolHandler, ToolRegistry, TranscriptRequest};
