//! Voice Notes MCP Server Library
//!
//! This library turns voice-note transcripts into structured analyses. A
//! transcript is sent to a text-completion service together with a fixed
//! instruction template; the free-text answer is parsed into an
//! [`AnalysisResult`] with a title, categories, priority, due date, tags,
//! privacy and structured sub-items (shopping items, reading notes, project
//! references, goals with milestones).
//!
//! # Architecture
//!
//! - **MCP Layer**: `NoteServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `analysis` module - Analysis model and completion-text parser
//! - **Integration Layer**: `completion` and `prompt` modules - Completion service seam
//!
//! # Example
//!
//! ```
//! use voice_notes_mcp::{Priority, parse_analysis};
//!
//! let analysis = parse_analysis("Title: Call the bank\nPriority: High\n");
//! assert_eq!(analysis.title, "Call the bank");
//! assert_eq!(analysis.priority, Priority::high);
//! ```

pub mod analysis;
pub mod call_log;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod prompt;
pub mod validation;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::warn;

use call_log::CallLog;
use completion::{CompletionService, OpenAiClient, UnavailableCompletion};
use config::Config;

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, Category, FallbackReason, FieldFallback, Goal, GoalCategory, Milestone,
    ParsedAnalysis, Priority, ProjectReference, ProjectStatus, ProjectType, ReadingNote,
    ShoppingItem, Source, parse_analysis, parse_analysis_with_diagnostics,
};
pub use error::AnalyzeError;

/// MCP Server handler for voice-note analysis
///
/// Holds the completion service used by `analyze_note` and the in-memory
/// call log shared by all tools.
pub struct NoteServerHandler {
    pub(crate) completion: Arc<dyn CompletionService>,
    pub(crate) calls: Mutex<CallLog>,
}

impl NoteServerHandler {
    /// Create a handler around any completion service
    ///
    /// # Arguments
    /// * `completion` - Service that answers analysis prompts
    /// * `call_log_capacity` - Number of calls kept in the call log
    pub fn new(completion: Arc<dyn CompletionService>, call_log_capacity: usize) -> Self {
        Self {
            completion,
            calls: Mutex::new(CallLog::new(call_log_capacity)),
        }
    }

    /// Create a handler that talks to the OpenAI-compatible API in `config`
    ///
    /// If the client cannot be built (e.g. no API key), the handler still
    /// starts: `analyze_note` reports the configuration error while the
    /// other tools keep working.
    ///
    /// # Example
    /// ```no_run
    /// # use voice_notes_mcp::NoteServerHandler;
    /// # use voice_notes_mcp::config::Config;
    /// let mut config = Config::default();
    /// config.apply_overrides(Some("sk-...".to_string()), None, None);
    /// let handler = NoteServerHandler::from_config(&config);
    /// ```
    pub fn from_config(config: &Config) -> Self {
        let completion: Arc<dyn CompletionService> =
            match OpenAiClient::new(config.completion.clone()) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    warn!("analyze_note disabled: {}", e);
                    Arc::new(UnavailableCompletion::new(e.to_string()))
                }
            };
        Self::new(completion, config.call_log_capacity)
    }

    /// Number of calls currently held in the call log
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn record_call(
        &self,
        endpoint: &str,
        request: Value,
        outcome: std::result::Result<Value, String>,
        started: Instant,
    ) {
        let mut calls = self.calls.lock().unwrap();
        calls.record(endpoint, request, outcome, started.elapsed());
    }
}

/// Voice-note analysis server.
///
/// Turns a spoken note's transcript into a structured analysis: title,
/// categories (note, task, reminder, shopping, reading-note, project, goal),
/// priority, due date, tags, privacy, and structured sub-items such as
/// shopping items, reading notes, project references and goals with
/// milestones.
///
/// Typical flow:
/// - **analyze_note**: transcript in, JSON analysis out (calls the completion service)
/// - **parse_analysis**: parse completion text you already have
/// - **analysis_prompt**: preview the prompt that analyze_note sends
/// - **recent_calls** / **clear_calls**: inspect or reset the call log
#[mcp_server]
impl McpServer for NoteServerHandler {
    /// **Analyze**: Turn a voice-note transcript into a structured analysis (JSON).
    /// Blank transcripts return an "Empty Note" analysis without calling the model.
    #[tool]
    async fn analyze_note(
        &self,
        /// Transcript of the voice note
        transcription: String,
    ) -> McpResult<String> {
        self.handle_analyze_note(transcription).await
    }

    /// **Parse**: Parse completion text in the labeled analysis format into JSON.
    /// Never rejects malformed fields; they keep their defaults.
    #[tool]
    async fn parse_analysis(
        &self,
        /// Completion text ("Title: ...", "Categories: ...", section blocks)
        content: String,
        /// Also return the fields that fell back to defaults (optional, default false)
        include_diagnostics: Option<bool>,
    ) -> McpResult<String> {
        self.handle_parse_analysis(content, include_diagnostics)
            .await
    }

    /// **Prompt preview**: Show the chat messages analyze_note would send for a transcript.
    #[tool]
    async fn analysis_prompt(
        &self,
        /// Transcript of the voice note
        transcription: String,
    ) -> McpResult<String> {
        self.handle_analysis_prompt(transcription).await
    }

    /// **Call log**: List recent analyze/parse calls, newest first.
    #[tool]
    async fn recent_calls(
        &self,
        /// Maximum number of entries, 1-100 (optional, default all)
        limit: Option<u32>,
    ) -> McpResult<String> {
        self.handle_recent_calls(limit).await
    }

    /// **Call log**: Remove all recorded calls.
    #[tool]
    async fn clear_calls(&self) -> McpResult<String> {
        self.handle_clear_calls().await
    }
}
