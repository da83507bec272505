use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Note category assigned by the language model
///
/// Uses snake_case variant names to match the serialized vocabulary.
/// `reading_note` serializes as `reading-note`; the prompt's older
/// spelling `dlltw` parses to the same variant.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    note,
    task,
    reminder,
    shopping,
    #[serde(rename = "reading-note", alias = "dlltw")]
    reading_note,
    project,
    goal,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Category::note),
            "task" => Ok(Category::task),
            "reminder" => Ok(Category::reminder),
            "shopping" => Ok(Category::shopping),
            "reading-note" | "dlltw" => Ok(Category::reading_note),
            "project" => Ok(Category::project),
            "goal" => Ok(Category::goal),
            _ => Err(format!(
                "Invalid category '{}'. Valid options are: note, task, reminder, shopping, reading-note, project, goal",
                s
            )),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::note => "note",
            Category::task => "task",
            Category::reminder => "reminder",
            Category::shopping => "shopping",
            Category::reading_note => "reading-note",
            Category::project => "project",
            Category::goal => "goal",
        };
        f.write_str(s)
    }
}

/// Priority of a note, a project, or the urgency of a shopping item
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    low,
    medium,
    high,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::low),
            "medium" => Ok(Priority::medium),
            "high" => Ok(Priority::high),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: low, medium, high",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::low => "low",
            Priority::medium => "medium",
            Priority::high => "high",
        })
    }
}

/// Where a note belongs, taken from the "Privacy:" line
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Source {
    #[default]
    local,
    public,
    private,
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Source::local),
            "public" => Ok(Source::public),
            "private" => Ok(Source::private),
            _ => Err(format!(
                "Invalid privacy '{}'. Valid options are: private, public, local",
                s
            )),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::local => "local",
            Source::public => "public",
            Source::private => "private",
        })
    }
}

/// Kind of project a reference points at
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectType {
    static_website,
    mentor_to_launch,
    #[default]
    other,
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static_website" => Ok(ProjectType::static_website),
            "mentor_to_launch" => Ok(ProjectType::mentor_to_launch),
            "other" => Ok(ProjectType::other),
            _ => Err(format!(
                "Invalid project type '{}'. Valid options are: static_website, mentor_to_launch, other",
                s
            )),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectType::static_website => "static_website",
            ProjectType::mentor_to_launch => "mentor_to_launch",
            ProjectType::other => "other",
        })
    }
}

/// Progress of a referenced project
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    planning,
    in_progress,
    review,
    completed,
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(ProjectStatus::planning),
            "in_progress" => Ok(ProjectStatus::in_progress),
            "review" => Ok(ProjectStatus::review),
            "completed" => Ok(ProjectStatus::completed),
            _ => Err(format!(
                "Invalid project status '{}'. Valid options are: planning, in_progress, review, completed",
                s
            )),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectStatus::planning => "planning",
            ProjectStatus::in_progress => "in_progress",
            ProjectStatus::review => "review",
            ProjectStatus::completed => "completed",
        })
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalCategory {
    personal,
    business,
}

impl FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(GoalCategory::personal),
            "business" => Ok(GoalCategory::business),
            _ => Err(format!(
                "Invalid goal category '{}'. Valid options are: personal, business",
                s
            )),
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalCategory::personal => "personal",
            GoalCategory::business => "business",
        })
    }
}

/// An item to buy, listed under "Shopping Items:"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Priority>,
}

/// A reading note, listed under "DLLTW Notes:"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadingNote {
    pub title: String,
    /// Main content; empty when the completion omitted it
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_section: Option<String>,
}

/// A project mentioned in the note, listed under "Project References:"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectReference {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// A goal, listed under "Goals:", with optional nested milestones
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Goal {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw target date as written by the model (not normalized)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<GoalCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
}

/// Structured analysis of one voice note
///
/// Built by [`parse_analysis`](crate::analysis::parse_analysis) from the
/// completion text. Every field has a default, so a completely garbled
/// completion still produces a valid (if empty) analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    /// Never empty; `[note]` when the completion named no valid category
    pub categories: Vec<Category>,
    pub priority: Priority,
    /// ISO-8601 timestamp (UTC), present only for a parseable date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub summary: String,
    /// Workflow status of a freshly analyzed note, always "new"
    pub status: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub source: Source,
    #[serde(default)]
    pub shopping_items: Vec<ShoppingItem>,
    #[serde(default)]
    pub dlltw_notes: Vec<ReadingNote>,
    #[serde(default)]
    pub project_references: Vec<ProjectReference>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            title: String::new(),
            categories: vec![Category::note],
            priority: Priority::low,
            due_date: None,
            summary: String::new(),
            status: "new".to_string(),
            tags: Vec::new(),
            is_private: None,
            recipient: None,
            source: Source::local,
            shopping_items: Vec::new(),
            dlltw_notes: Vec::new(),
            project_references: Vec::new(),
            goals: Vec::new(),
        }
    }
}

impl AnalysisResult {
    /// Analysis returned for a transcript with nothing in it
    pub fn empty_note() -> Self {
        Self {
            title: "Empty Note".to_string(),
            summary: "No transcription available".to_string(),
            ..Default::default()
        }
    }

    /// Total number of structured sub-items across all sections
    pub fn item_count(&self) -> usize {
        self.shopping_items.len()
            + self.dlltw_notes.len()
            + self.project_references.len()
            + self.goals.len()
    }
}
