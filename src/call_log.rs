//! In-memory log of analysis calls
//!
//! Keeps the most recent calls (newest first) so a client can inspect what
//! was sent to the completion service and what came back. Nothing is
//! written to disk.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;

pub const DEFAULT_CAPACITY: usize = 100;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallStatus {
    success,
    error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogEntry {
    pub id: String,
    /// RFC 3339 time the call finished
    pub timestamp: String,
    pub endpoint: String,
    pub request: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    pub duration_ms: u64,
    pub status: CallStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bounded, newest-first call log
#[derive(Debug)]
pub struct CallLog {
    entries: VecDeque<CallLogEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl CallLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Record a finished call and return its ID
    ///
    /// # Arguments
    /// * `endpoint` - Tool or endpoint name, e.g. "analyze_note"
    /// * `request` - What the caller sent
    /// * `outcome` - Response payload, or the error message
    /// * `duration` - Wall time the call took
    pub fn record(
        &mut self,
        endpoint: &str,
        request: Value,
        outcome: std::result::Result<Value, String>,
        duration: Duration,
    ) -> String {
        let id = format!("call-{}", self.next_id);
        self.next_id += 1;

        let (status, response, error) = match outcome {
            Ok(response) => (CallStatus::success, Some(response), None),
            Err(message) => (CallStatus::error, None, Some(message)),
        };

        self.entries.push_front(CallLogEntry {
            id: id.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            endpoint: endpoint.to_string(),
            request,
            response,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            status,
            error,
        });
        self.entries.truncate(self.capacity);

        id
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, limit: Option<usize>) -> Vec<CallLogEntry> {
        let limit = limit.unwrap_or(self.entries.len());
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Remove all entries, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
