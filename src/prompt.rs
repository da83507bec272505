//! Analysis prompt
//!
//! The output format requested here is the wire contract with
//! [`parse_analysis`](crate::analysis::parse_analysis): every label the
//! template asks for must be one the parser recognizes.

use serde::{Deserialize, Serialize};

/// Fixed system instructions sent with every analysis request
pub const SYSTEM_INSTRUCTIONS: &str = "\
You are a personal assistant that analyzes voice notes. Extract key information and categorize the note.

First, create a clear and concise title that summarizes the main point.
Then determine if this is a private note for the owner, a public note, or a local note.
Then categorize into multiple categories: note, task, reminder, shopping, dlltw, project, goal

For each category, provide detailed information:

Shopping Items:
- Name of item
- Quantity (if mentioned)
- Notes
- Urgency (low/medium/high)

DLLTW Notes:
- Title of the note
- Chapter reference
- Book section
- Main content
- Key points (separated by semicolons)

Project References:
- Project title
- Type (static_website, mentor_to_launch, other)
- Description
- Estimated time
- Priority level
- Status (planning/in_progress/review/completed)

Goals:
- Goal title
- Description
- Target date
- Success criteria (separated by semicolons)
- Category (personal/business)
- Milestones (if any):
  - Milestone title
  - Milestone due date

Also provide:
- Priority (low/medium/high)
- Due date (YYYY-MM-DD)
- Privacy (private/public/local)
- Recipient (if private note)
- Relevant tags
- Brief summary";

/// Output format the model is asked to follow
pub const OUTPUT_FORMAT: &str = "\
Title: [clear, concise title]
Categories: [comma-separated list]
Priority: [low/medium/high]
Due Date: [YYYY-MM-DD or N/A]
Privacy: [private/public/local]
Recipient: [name or N/A]
Tags: [comma-separated list]
Summary: [brief summary]

Shopping Items:
- [item name]
Quantity: [number]
Notes: [additional details]
Urgency: [low/medium/high]

DLLTW Notes:
Title: [note title]
Chapter: [chapter reference]
Book Section: [section name]
Content: [main content]
Key Points: [semicolon-separated list]

Project References:
Title: [project title]
Type: [static_website/mentor_to_launch/other]
Description: [project description]
Estimated Time: [time estimate]
Priority: [low/medium/high]
Status: [planning/in_progress/review/completed]

Goals:
Title: [goal title]
Description: [goal description]
Target Date: [YYYY-MM-DD]
Success Criteria: [semicolon-separated list]
Category: [personal/business]

Milestones:
Milestone: [milestone title]
Milestone Due: [YYYY-MM-DD]";

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    system,
    user,
}

/// One chat message in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::system,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::user,
            content: content.into(),
        }
    }
}

/// User message asking for the analysis of one transcript
pub fn build_user_prompt(transcription: &str) -> String {
    format!(
        "Analyze this voice note and provide in this exact format:\n{}\n\nVoice note: \"{}\"",
        OUTPUT_FORMAT,
        transcription.trim()
    )
}

/// Full message list for one analysis request
pub fn build_messages(transcription: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTIONS),
        ChatMessage::user(build_user_prompt(transcription)),
    ]
}
