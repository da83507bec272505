//! Prompt preview handler for the voice-notes MCP server

use crate::NoteServerHandler;
use crate::prompt::build_messages;
use mcp_attr::{Result as McpResult, bail_public};

impl NoteServerHandler {
    /// Returns the chat messages `analyze_note` would send for a transcript, as JSON.
    pub async fn handle_analysis_prompt(&self, transcription: String) -> McpResult<String> {
        let messages = build_messages(&transcription);
        match serde_json::to_string_pretty(&messages) {
            Ok(json) => Ok(json),
            Err(e) => bail_public!(_, "Failed to serialize prompt: {}", e),
        }
    }
}
