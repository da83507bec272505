//! Completion-text parser
//!
//! Turns the labeled pseudo-format requested by the analysis prompt into an
//! [`AnalysisResult`]. The scan is a single pass over trimmed lines. Section
//! headers switch the parser into a section, and each section owns a typed
//! builder for the item currently being filled in.
//!
//! Parsing never fails. Unusable values keep their defaults and are reported
//! as [`FieldFallback`]s.

use std::str::FromStr;
use tracing::{debug, trace, warn};

use super::dates::normalize_due_date;
use super::diagnostics::{FallbackReason, FieldFallback, ParsedAnalysis};
use super::is_not_applicable;
use super::model::{
    AnalysisResult, Category, Goal, GoalCategory, Milestone, Priority, ProjectReference,
    ProjectStatus, ProjectType, ReadingNote, ShoppingItem, Source,
};

pub const SHOPPING_HEADER: &str = "Shopping Items:";
pub const READING_HEADER: &str = "DLLTW Notes:";
pub const READING_HEADER_ALT: &str = "Reading Notes:";
pub const PROJECTS_HEADER: &str = "Project References:";
pub const GOALS_HEADER: &str = "Goals:";
pub const MILESTONES_MARKER: &str = "Milestones:";

/// A goal under construction together with its in-progress milestone
#[derive(Debug, Default, PartialEq)]
struct GoalBuilder {
    goal: Goal,
    milestone: Option<Milestone>,
}

impl GoalBuilder {
    /// Move a titled pending milestone into the goal
    fn flush_milestone(&mut self) {
        if let Some(milestone) = self.milestone.take() {
            if has_value(&milestone.title) {
                self.goal.milestones.get_or_insert_with(Vec::new).push(milestone);
            }
        }
    }

    fn into_goal(mut self) -> Goal {
        self.flush_milestone();
        self.goal
    }
}

/// Section the scanner is in, owning the item being built there
#[derive(Debug, Default)]
enum Section {
    #[default]
    None,
    Shopping(ShoppingItem),
    Reading(ReadingNote),
    Projects(ProjectReference),
    Goals(GoalBuilder),
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            SHOPPING_HEADER => Some(Section::Shopping(ShoppingItem::default())),
            READING_HEADER | READING_HEADER_ALT => Some(Section::Reading(ReadingNote::default())),
            PROJECTS_HEADER => Some(Section::Projects(ProjectReference::default())),
            GOALS_HEADER => Some(Section::Goals(GoalBuilder::default())),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Section::None => "none",
            Section::Shopping(_) => "shopping",
            Section::Reading(_) => "reading",
            Section::Projects(_) => "projects",
            Section::Goals(_) => "goals",
        }
    }

    /// True when the builder holds an item that would have been appended,
    /// i.e. its discriminating field is set
    fn has_pending_item(&self) -> bool {
        match self {
            Section::None => false,
            Section::Shopping(item) => has_value(&item.name),
            Section::Reading(note) => has_value(&note.title),
            Section::Projects(project) => has_value(&project.title),
            Section::Goals(builder) => has_value(&builder.goal.title),
        }
    }
}

struct Parser {
    analysis: AnalysisResult,
    fallbacks: Vec<FieldFallback>,
    section: Section,
    line_no: usize,
}

/// Parse completion text into an analysis
///
/// # Arguments
/// * `content` - Text returned by the completion service
///
/// # Returns
/// The best-effort analysis. Missing or invalid fields keep their defaults.
pub fn parse_analysis(content: &str) -> AnalysisResult {
    parse_analysis_with_diagnostics(content).analysis
}

/// Parse completion text and report every field that fell back to its default
pub fn parse_analysis_with_diagnostics(content: &str) -> ParsedAnalysis {
    let mut parser = Parser {
        analysis: AnalysisResult::default(),
        fallbacks: Vec::new(),
        section: Section::None,
        line_no: 0,
    };

    for (index, raw_line) in content.lines().enumerate() {
        parser.line_no = index + 1;
        parser.process_line(raw_line.trim());
    }
    parser.finish()
}

impl Parser {
    fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(section) = Section::from_header(line) {
            self.enter_section(section);
            return;
        }

        if line == MILESTONES_MARKER {
            trace!(line = self.line_no, section = self.section.name(), "milestones marker");
            return;
        }

        if self.parse_section_field(line) {
            return;
        }

        if !self.parse_top_level_field(line) {
            trace!(line = self.line_no, text = line, "ignoring unrecognized line");
        }
    }

    /// Switch sections. The previous builder is replaced without being
    /// flushed, so an item still in progress is dropped.
    fn enter_section(&mut self, next: Section) {
        if self.section.has_pending_item() {
            let previous = self.section.name();
            self.record(previous, "", FallbackReason::item_discarded);
        }
        debug!(line = self.line_no, from = self.section.name(), to = next.name(), "entering section");
        self.section = next;
    }

    fn parse_top_level_field(&mut self, line: &str) -> bool {
        if let Some(value) = field(line, "Title:") {
            self.analysis.title = value.to_string();
        } else if let Some(value) = field(line, "Categories:") {
            self.parse_categories(value);
        } else if let Some(value) = field(line, "Privacy:") {
            match parse_vocab::<Source>(value) {
                Some(source) => {
                    self.analysis.is_private = Some(source == Source::private);
                    self.analysis.source = source;
                }
                None => self.record("Privacy", value, FallbackReason::out_of_vocabulary),
            }
        } else if let Some(value) = field(line, "Recipient:") {
            if !is_not_applicable(value) {
                self.analysis.recipient = Some(value.to_string());
            }
        } else if let Some(value) = field(line, "Priority:") {
            match parse_vocab::<Priority>(value) {
                Some(priority) => self.analysis.priority = priority,
                None => self.record("Priority", value, FallbackReason::out_of_vocabulary),
            }
        } else if let Some(value) = field(line, "Due Date:") {
            match normalize_due_date(value) {
                Ok(Some(date)) => self.analysis.due_date = Some(date),
                Ok(None) => {}
                Err(_) => self.record("Due Date", value, FallbackReason::unparseable_date),
            }
        } else if let Some(value) = field(line, "Tags:") {
            self.analysis.tags = value
                .split(',')
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect();
        } else if let Some(value) = field(line, "Summary:") {
            self.analysis.summary = value.to_string();
        } else {
            return false;
        }
        true
    }

    fn parse_categories(&mut self, value: &str) {
        let mut categories = Vec::new();
        for entry in value.split(',').map(|c| c.trim().to_lowercase()) {
            if entry.is_empty() {
                continue;
            }
            match entry.parse::<Category>() {
                Ok(category) => categories.push(category),
                Err(_) => self.record("Categories", &entry, FallbackReason::out_of_vocabulary),
            }
        }
        if !categories.is_empty() {
            self.analysis.categories = categories;
        }
    }

    /// Apply a line to the active section's builder.
    ///
    /// Returns false when the section does not claim the line, so top-level
    /// labels can still be picked up inside a section.
    fn parse_section_field(&mut self, line: &str) -> bool {
        let line_no = self.line_no;
        let mut fallbacks = Vec::new();
        let mut flag = |field: &str, value: &str, reason: FallbackReason| {
            fallbacks.push(fallback(line_no, field, value, reason));
        };

        let claimed = match &mut self.section {
            Section::None => false,
            Section::Shopping(item) => {
                parse_shopping_line(line, item, &mut self.analysis.shopping_items, &mut flag)
            }
            Section::Reading(note) => {
                parse_reading_line(line, note, &mut self.analysis.dlltw_notes)
            }
            Section::Projects(project) => parse_project_line(
                line,
                project,
                &mut self.analysis.project_references,
                &mut flag,
            ),
            Section::Goals(builder) => {
                parse_goal_line(line, builder, &mut self.analysis.goals, &mut flag)
            }
        };

        for f in fallbacks {
            self.push_fallback(f);
        }
        claimed
    }

    /// Flush whatever the active section still holds
    fn finish(mut self) -> ParsedAnalysis {
        match std::mem::take(&mut self.section) {
            Section::None => {}
            Section::Shopping(item) => {
                if has_value(&item.name) {
                    self.analysis.shopping_items.push(item);
                }
            }
            Section::Reading(note) => {
                if has_value(&note.title) {
                    self.analysis.dlltw_notes.push(note);
                }
            }
            Section::Projects(project) => {
                if has_value(&project.title) {
                    self.analysis.project_references.push(project);
                }
            }
            Section::Goals(builder) => {
                if has_value(&builder.goal.title) {
                    self.analysis.goals.push(builder.into_goal());
                }
            }
        }

        debug!(
            title = %self.analysis.title,
            items = self.analysis.item_count(),
            fallbacks = self.fallbacks.len(),
            "parsed analysis"
        );

        ParsedAnalysis {
            analysis: self.analysis,
            fallbacks: self.fallbacks,
        }
    }

    fn record(&mut self, field: &str, value: &str, reason: FallbackReason) {
        let f = fallback(self.line_no, field, value, reason);
        self.push_fallback(f);
    }

    fn push_fallback(&mut self, f: FieldFallback) {
        warn!("analysis field fell back to default: {}", f);
        self.fallbacks.push(f);
    }
}

fn parse_shopping_line(
    line: &str,
    item: &mut ShoppingItem,
    items: &mut Vec<ShoppingItem>,
    flag: &mut impl FnMut(&str, &str, FallbackReason),
) -> bool {
    if let Some(name) = line.strip_prefix("- ") {
        if has_value(&item.name) {
            items.push(std::mem::take(item));
        }
        item.name = name.trim().to_string();
    } else if let Some(value) = field(line, "Quantity:") {
        let quantity = leading_integer(value).filter(|q| *q > 0);
        if quantity.is_none() {
            flag("Quantity", value, FallbackReason::invalid_quantity);
        }
        item.quantity = Some(quantity.unwrap_or(1));
    } else if let Some(value) = field(line, "Notes:") {
        item.notes = non_empty(value);
    } else if let Some(value) = field(line, "Urgency:") {
        match parse_vocab::<Priority>(value) {
            Some(urgency) => item.urgency = Some(urgency),
            None => flag("Urgency", value, FallbackReason::out_of_vocabulary),
        }
    } else {
        return false;
    }
    true
}

fn parse_reading_line(line: &str, note: &mut ReadingNote, notes: &mut Vec<ReadingNote>) -> bool {
    if let Some(value) = field(line, "Title:") {
        if has_value(&note.title) {
            notes.push(std::mem::take(note));
        }
        note.title = value.to_string();
    } else if let Some(value) = field(line, "Chapter:") {
        note.chapter = non_empty(value);
    } else if let Some(value) = field(line, "Content:") {
        note.content = value.to_string();
    } else if let Some(value) = field(line, "Key Points:") {
        note.key_points = Some(split_semicolons(value));
    } else if let Some(value) = field(line, "Book Section:") {
        note.book_section = non_empty(value);
    } else {
        return false;
    }
    true
}

fn parse_project_line(
    line: &str,
    project: &mut ProjectReference,
    projects: &mut Vec<ProjectReference>,
    flag: &mut impl FnMut(&str, &str, FallbackReason),
) -> bool {
    if let Some(value) = field(line, "Title:") {
        if has_value(&project.title) {
            projects.push(std::mem::take(project));
        }
        project.title = value.to_string();
    } else if let Some(value) = field(line, "Type:") {
        match parse_vocab::<ProjectType>(value) {
            Some(kind) => project.kind = kind,
            None => flag("Type", value, FallbackReason::out_of_vocabulary),
        }
    } else if let Some(value) = field(line, "Description:") {
        project.description = non_empty(value);
    } else if let Some(value) = field(line, "Estimated Time:") {
        project.estimated_time = non_empty(value);
    } else if let Some(value) = field(line, "Priority:") {
        match parse_vocab::<Priority>(value) {
            Some(priority) => project.priority = Some(priority),
            None => flag("Priority", value, FallbackReason::out_of_vocabulary),
        }
    } else if let Some(value) = field(line, "Status:") {
        match parse_vocab::<ProjectStatus>(value) {
            Some(status) => project.status = status,
            None => flag("Status", value, FallbackReason::out_of_vocabulary),
        }
    } else {
        return false;
    }
    true
}

fn parse_goal_line(
    line: &str,
    builder: &mut GoalBuilder,
    goals: &mut Vec<Goal>,
    flag: &mut impl FnMut(&str, &str, FallbackReason),
) -> bool {
    if let Some(value) = field(line, "Title:") {
        if has_value(&builder.goal.title) {
            goals.push(std::mem::take(builder).into_goal());
        }
        builder.goal.title = value.to_string();
    } else if let Some(value) = field(line, "Description:") {
        builder.goal.description = non_empty(value);
    } else if let Some(value) = field(line, "Target Date:") {
        builder.goal.target_date = non_empty(value);
    } else if let Some(value) = field(line, "Success Criteria:") {
        builder.goal.success_criteria = Some(split_semicolons(value));
    } else if let Some(value) = field(line, "Category:") {
        match parse_vocab::<GoalCategory>(value) {
            Some(category) => builder.goal.category = Some(category),
            None => flag("Category", value, FallbackReason::out_of_vocabulary),
        }
    } else if let Some(value) = field(line, "Milestone:") {
        let titled = builder
            .milestone
            .as_ref()
            .is_some_and(|m| has_value(&m.title));
        if titled {
            builder.flush_milestone();
        }
        builder.milestone.get_or_insert_with(Milestone::default).title = value.to_string();
    } else if let Some(value) = field(line, "Milestone Due:") {
        builder.milestone.get_or_insert_with(Milestone::default).due_date = non_empty(value);
    } else {
        return false;
    }
    true
}

/// Value after `label`, trimmed, if the line starts with it
fn field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

/// Lower-case a value and look it up in an enum's vocabulary
fn parse_vocab<T: FromStr>(value: &str) -> Option<T> {
    value.trim().to_lowercase().parse().ok()
}

fn has_value(s: &str) -> bool {
    !s.trim().is_empty()
}

fn non_empty(value: &str) -> Option<String> {
    has_value(value).then(|| value.to_string())
}

/// Entries are trimmed; empty entries are kept as written
fn split_semicolons(value: &str) -> Vec<String> {
    value.split(';').map(|entry| entry.trim().to_string()).collect()
}

/// Leading run of ASCII digits, so "2 liters" gives 2
fn leading_integer(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn fallback(line: usize, field: &str, value: &str, reason: FallbackReason) -> FieldFallback {
    FieldFallback {
        line,
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_requires_label_prefix() {
        assert_eq!(field("Title:  Buy milk ", "Title:"), Some("Buy milk"));
        assert_eq!(field("Subtitle: x", "Title:"), None);
        assert_eq!(field("Milestone Due: 2025-01-01", "Milestone:"), None);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("2"), Some(2));
        assert_eq!(leading_integer("12 cartons"), Some(12));
        assert_eq!(leading_integer("a dozen"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_split_semicolons_keeps_empty_entries() {
        assert_eq!(split_semicolons("a; b ;;c"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_goal_builder_flushes_pending_milestone() {
        let mut builder = GoalBuilder::default();
        builder.goal.title = "Ship v1".to_string();
        builder.milestone = Some(Milestone {
            title: "Beta".to_string(),
            due_date: None,
        });

        let goal = builder.into_goal();
        assert_eq!(goal.milestones.unwrap()[0].title, "Beta");
    }

    #[test]
    fn test_untitled_milestone_is_dropped() {
        let mut builder = GoalBuilder::default();
        builder.goal.title = "Ship v1".to_string();
        builder.milestone = Some(Milestone {
            title: String::new(),
            due_date: Some("2025-06-01".to_string()),
        });

        assert!(builder.into_goal().milestones.is_none());
    }

    #[test]
    fn test_header_discards_pending_item() {
        let parsed = parse_analysis_with_diagnostics("Shopping Items:\n- Eggs\nGoals:\n");
        assert!(parsed.analysis.shopping_items.is_empty());
        assert_eq!(parsed.fallbacks.len(), 1);
        assert_eq!(parsed.fallbacks[0].reason, FallbackReason::item_discarded);
        assert_eq!(parsed.fallbacks[0].field, "shopping");
        assert_eq!(parsed.fallbacks[0].line, 3);
    }

    #[test]
    fn test_header_ignores_item_without_discriminator() {
        let parsed = parse_analysis_with_diagnostics(
            "Shopping Items:\nQuantity: 2\nGoals:\nDescription: someday\nProject References:\n",
        );
        assert!(parsed.analysis.shopping_items.is_empty());
        assert!(parsed.analysis.goals.is_empty());
        assert!(parsed.is_clean());
    }
}
