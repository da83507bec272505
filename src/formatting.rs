//! Formatting helper functions
//!
//! Renders analyses back into the labeled completion format and renders
//! the call log for display.

use crate::analysis::{AnalysisResult, GOALS_HEADER, PROJECTS_HEADER, READING_HEADER, SHOPPING_HEADER};
use crate::call_log::CallLogEntry;

/// Render an analysis in the labeled format the parser reads
///
/// Top-level fields come first, then one block per non-empty section.
/// A section header drops the item still being built, so each Title-keyed
/// block ends with an empty `Title:` line that flushes its last item, and
/// shopping items (flushed by the next `- ` line or end of input) go last.
pub fn format_analysis(analysis: &AnalysisResult) -> String {
    let mut out = String::new();

    push_line(&mut out, "Title", &analysis.title);
    let categories: Vec<String> = analysis.categories.iter().map(|c| c.to_string()).collect();
    push_line(&mut out, "Categories", &categories.join(", "));
    push_line(&mut out, "Priority", &analysis.priority.to_string());
    push_line(&mut out, "Due Date", analysis.due_date.as_deref().unwrap_or("N/A"));
    push_line(&mut out, "Privacy", &analysis.source.to_string());
    push_line(&mut out, "Recipient", analysis.recipient.as_deref().unwrap_or("N/A"));
    push_line(&mut out, "Tags", &analysis.tags.join(", "));
    push_line(&mut out, "Summary", &analysis.summary);

    if !analysis.dlltw_notes.is_empty() {
        push_header(&mut out, READING_HEADER);
        for note in &analysis.dlltw_notes {
            push_line(&mut out, "Title", &note.title);
            push_opt(&mut out, "Chapter", note.chapter.as_deref());
            push_opt(&mut out, "Book Section", note.book_section.as_deref());
            push_line(&mut out, "Content", &note.content);
            if let Some(ref points) = note.key_points {
                push_line(&mut out, "Key Points", &points.join("; "));
            }
        }
        push_line(&mut out, "Title", "");
    }

    if !analysis.project_references.is_empty() {
        push_header(&mut out, PROJECTS_HEADER);
        for project in &analysis.project_references {
            push_line(&mut out, "Title", &project.title);
            push_line(&mut out, "Type", &project.kind.to_string());
            push_opt(&mut out, "Description", project.description.as_deref());
            push_opt(&mut out, "Estimated Time", project.estimated_time.as_deref());
            if let Some(priority) = project.priority {
                push_line(&mut out, "Priority", &priority.to_string());
            }
            push_line(&mut out, "Status", &project.status.to_string());
        }
        push_line(&mut out, "Title", "");
    }

    if !analysis.goals.is_empty() {
        push_header(&mut out, GOALS_HEADER);
        for goal in &analysis.goals {
            push_line(&mut out, "Title", &goal.title);
            push_opt(&mut out, "Description", goal.description.as_deref());
            push_opt(&mut out, "Target Date", goal.target_date.as_deref());
            if let Some(ref criteria) = goal.success_criteria {
                push_line(&mut out, "Success Criteria", &criteria.join("; "));
            }
            if let Some(category) = goal.category {
                push_line(&mut out, "Category", &category.to_string());
            }
            for milestone in goal.milestones.iter().flatten() {
                push_line(&mut out, "Milestone", &milestone.title);
                push_opt(&mut out, "Milestone Due", milestone.due_date.as_deref());
            }
        }
        push_line(&mut out, "Title", "");
    }

    if !analysis.shopping_items.is_empty() {
        push_header(&mut out, SHOPPING_HEADER);
        for item in &analysis.shopping_items {
            out.push_str(&format!("- {}\n", item.name));
            if let Some(quantity) = item.quantity {
                push_line(&mut out, "Quantity", &quantity.to_string());
            }
            push_opt(&mut out, "Notes", item.notes.as_deref());
            if let Some(urgency) = item.urgency {
                push_line(&mut out, "Urgency", &urgency.to_string());
            }
        }
    }

    out
}

/// Format call-log entries into a display string
pub fn format_calls(entries: &[CallLogEntry]) -> String {
    if entries.is_empty() {
        return "No calls recorded".to_string();
    }

    let mut result = format!("Found {} call(s):\n\n", entries.len());
    for entry in entries {
        result.push_str(&format!(
            "- [{}] {} (status: {:?}, {} ms)\n",
            entry.id, entry.endpoint, entry.status, entry.duration_ms
        ));
        result.push_str(&format!("  At: {}\n", entry.timestamp));
        result.push_str(&format!("  Request: {}\n", entry.request));
        if let Some(ref response) = entry.response {
            result.push_str(&format!("  Response: {}\n", response));
        }
        if let Some(ref error) = entry.error {
            result.push_str(&format!("  Error: {}\n", error));
        }
    }

    result
}

fn push_header(out: &mut String, header: &str) {
    out.push('\n');
    out.push_str(header);
    out.push('\n');
}

fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn push_opt(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_line(out, label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_log::CallLog;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_format_default_analysis() {
        let text = format_analysis(&AnalysisResult::default());
        assert!(text.starts_with("Title: \nCategories: note\nPriority: low\nDue Date: N/A\n"));
        assert!(!text.contains(SHOPPING_HEADER));
    }

    #[test]
    fn test_title_keyed_sections_end_with_empty_title() {
        let analysis = AnalysisResult {
            goals: vec![crate::analysis::Goal {
                title: "Learn Rust".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = format_analysis(&analysis);
        assert!(text.ends_with("Goals:\nTitle: Learn Rust\nTitle: \n"));
    }

    #[test]
    fn test_format_calls() {
        assert_eq!(format_calls(&[]), "No calls recorded");

        let mut log = CallLog::default();
        log.record(
            "analyze_note",
            json!({"transcription": "hi"}),
            Err("No content in completion response".to_string()),
            Duration::from_millis(42),
        );
        let text = format_calls(&log.recent(None));
        assert!(text.starts_with("Found 1 call(s):"));
        assert!(text.contains("[call-1] analyze_note (status: error, 42 ms)"));
        assert!(text.contains("Error: No content in completion response"));
    }
}
