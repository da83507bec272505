//! Analyze handler for the voice-notes MCP server

use crate::NoteServerHandler;
use crate::analysis::{self, AnalysisResult};
use crate::prompt;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use serde_json::json;
use std::time::Instant;
use tracing::{error, info};

impl NoteServerHandler {
    /// **Analyze**: send a transcript to the completion service and parse the answer.
    ///
    /// A blank transcript (or the "Processing..." placeholder) short-circuits to
    /// the canned "Empty Note" analysis without calling the service. A failing or
    /// empty completion is returned as a tool error; the parser itself never fails.
    pub async fn handle_analyze_note(&self, transcription: String) -> McpResult<String> {
        let started = Instant::now();
        let request = json!({ "transcription": transcription });

        let analysis = if validation::is_blank_transcription(&transcription) {
            info!("blank transcription, returning empty note");
            AnalysisResult::empty_note()
        } else {
            let messages = prompt::build_messages(&transcription);
            match self.completion.complete(&messages).await {
                Ok(content) => analysis::parse_analysis(&content),
                Err(e) => {
                    error!("analysis failed: {}", e);
                    self.record_call("analyze_note", request, Err(e.to_string()), started);
                    bail_public!(_, "Failed to analyze note: {}", e);
                }
            }
        };

        let body = match serde_json::to_value(&analysis) {
            Ok(value) => value,
            Err(e) => bail_public!(_, "Failed to serialize analysis: {}", e),
        };
        info!(
            title = %analysis.title,
            items = analysis.item_count(),
            "note analyzed"
        );
        self.record_call("analyze_note", request, Ok(body.clone()), started);

        match serde_json::to_string_pretty(&body) {
            Ok(json) => Ok(json),
            Err(e) => bail_public!(_, "Failed to serialize analysis: {}", e),
        }
    }
}
