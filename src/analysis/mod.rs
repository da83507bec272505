//! Voice-note analysis domain
//!
//! This module contains the analysis record and the parser that builds it:
//! - `model`: `AnalysisResult` and its fixed-vocabulary enums
//! - `parser`: single-pass parser over the completion text
//! - `dates`: due-date normalization
//! - `diagnostics`: fallback reporting for degraded parses

mod dates;
mod diagnostics;
mod model;
mod parser;

pub use dates::{UnparseableDate, normalize_due_date};
pub use diagnostics::{FallbackReason, FieldFallback, ParsedAnalysis};
pub use model::{
    AnalysisResult, Category, Goal, GoalCategory, Milestone, Priority, ProjectReference,
    ProjectStatus, ProjectType, ReadingNote, ShoppingItem, Source,
};
pub use parser::{
    GOALS_HEADER, MILESTONES_MARKER, PROJECTS_HEADER, READING_HEADER, SHOPPING_HEADER,
    parse_analysis, parse_analysis_with_diagnostics,
};

/// True for an empty value or "N/A" in any case
pub fn is_not_applicable(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("n/a")
}
