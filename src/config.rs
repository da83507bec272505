//! Configuration loading
//!
//! Settings live in an optional TOML file. A missing file means defaults;
//! command-line flags and environment variables are applied on top by the
//! binary through [`Config::apply_overrides`].
//!
//! ```toml
//! log_filter = "voice_notes_mcp=debug"
//! call_log_capacity = 100
//!
//! [completion]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4"
//! temperature = 0.7
//! max_tokens = 1000
//! timeout_secs = 60
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::call_log::DEFAULT_CAPACITY;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_LOG_FILTER: &str = "voice_notes_mcp=info";

/// Settings for the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API, without trailing slash
    pub base_url: String,
    /// Bearer token; usually supplied through OPENAI_API_KEY instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tracing filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Maximum number of entries kept in the in-memory call log
    pub call_log_capacity: usize,
    pub completion: CompletionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            call_log_capacity: DEFAULT_CAPACITY,
            completion: CompletionConfig::default(),
        }
    }
}

impl Config {
    /// Apply values given on the command line or through the environment.
    /// `None` leaves the file value in place; blank strings are ignored.
    pub fn apply_overrides(
        &mut self,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.completion.api_key = Some(key);
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.completion.model = model;
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.completion.base_url = url;
        }
        self.completion.base_url = self.completion.base_url.trim_end_matches('/').to_string();
    }
}

/// Location of the TOML configuration file
pub struct ConfigFile {
    file_path: PathBuf,
}

impl ConfigFile {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Load the configuration, falling back to defaults if the file is absent
    pub fn load(&self) -> Result<Config> {
        if !self.file_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read config {}", self.file_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", self.file_path.display()))?;
        Ok(config)
    }
}
