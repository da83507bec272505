//! Parse handler for the voice-notes MCP server

use crate::NoteServerHandler;
use crate::analysis;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use serde_json::json;
use std::time::Instant;
use tracing::info;

impl NoteServerHandler {
    /// Parses completion text that the client already has, without calling the
    /// completion service. Returns the analysis as JSON; with `include_diagnostics`
    /// the fallbacks are returned alongside it.
    pub async fn handle_parse_analysis(
        &self,
        content: String,
        include_diagnostics: Option<bool>,
    ) -> McpResult<String> {
        validation::require_content(&content)?;

        let started = Instant::now();
        let parsed = analysis::parse_analysis_with_diagnostics(&content);
        info!(
            title = %parsed.analysis.title,
            fallbacks = parsed.fallbacks.len(),
            "parsed completion text"
        );

        let body = if include_diagnostics.unwrap_or(false) {
            serde_json::to_value(&parsed)
        } else {
            serde_json::to_value(&parsed.analysis)
        };
        let body = match body {
            Ok(value) => value,
            Err(e) => bail_public!(_, "Failed to serialize analysis: {}", e),
        };

        self.record_call(
            "parse_analysis",
            json!({ "content": content }),
            Ok(body.clone()),
            started,
        );

        match serde_json::to_string_pretty(&body) {
            Ok(json) => Ok(json),
            Err(e) => bail_public!(_, "Failed to serialize analysis: {}", e),
        }
    }
}
