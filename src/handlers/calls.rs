//! Call-log handlers for the voice-notes MCP server

use crate::NoteServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl NoteServerHandler {
    /// Lists recorded analysis calls, newest first.
    pub async fn handle_recent_calls(&self, limit: Option<u32>) -> McpResult<String> {
        let limit = validation::parse_call_limit(limit)?;

        let calls = self.calls.lock().unwrap();
        let entries = calls.recent(limit);
        drop(calls);

        Ok(formatting::format_calls(&entries))
    }

    /// Empties the call log.
    pub async fn handle_clear_calls(&self) -> McpResult<String> {
        let count = self.calls.lock().unwrap().clear();
        Ok(format!("Cleared {} call(s)", count))
    }
}
