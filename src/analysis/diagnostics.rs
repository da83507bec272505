//! Fallback diagnostics for degraded parses
//!
//! The parser never fails. When a recognized field cannot be used, or an
//! in-progress item is dropped, it records a [`FieldFallback`] instead so
//! callers and tests can see what was lost.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::AnalysisResult;

/// Why a field kept its default value
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Value is not in the field's fixed vocabulary
    out_of_vocabulary,
    /// Date value could not be resolved
    unparseable_date,
    /// Quantity had no leading positive integer, so 1 was used
    invalid_quantity,
    /// A half-built item was dropped by a section header
    item_discarded,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FallbackReason::out_of_vocabulary => "value not in vocabulary",
            FallbackReason::unparseable_date => "unparseable date",
            FallbackReason::invalid_quantity => "invalid quantity",
            FallbackReason::item_discarded => "in-progress item discarded",
        })
    }
}

/// A single degraded field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFallback {
    /// 1-based line number in the completion text
    pub line: usize,
    /// Label of the field, e.g. "Priority"
    pub field: String,
    /// The raw value that was rejected
    pub value: String,
    pub reason: FallbackReason,
}

impl fmt::Display for FieldFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} '{}' ({})",
            self.line, self.field, self.value, self.reason
        )
    }
}

/// Parser output together with the fallbacks hit while producing it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAnalysis {
    pub analysis: AnalysisResult,
    pub fallbacks: Vec<FieldFallback>,
}

impl ParsedAnalysis {
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Fallbacks recorded for one field label
    pub fn fallbacks_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldFallback> {
        self.fallbacks.iter().filter(move |f| f.field == field)
    }
}
