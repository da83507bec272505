//! Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use voice_notes_mcp::NoteServerHandler;
use voice_notes_mcp::completion::CompletionService;
use voice_notes_mcp::error::{AnalyzeError, Result};
use voice_notes_mcp::prompt::ChatMessage;

/// Completion service that replays scripted answers in order
#[derive(Default)]
pub struct ScriptedCompletion {
    answers: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedCompletion {
    pub fn new(answers: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<Vec<ChatMessage>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AnalyzeError::EmptyCompletion))
    }
}

/// Create a test handler backed by a scripted completion service
pub fn get_test_handler(completion: Arc<ScriptedCompletion>) -> NoteServerHandler {
    NoteServerHandler::new(completion, 100)
}

pub const SCENARIO_A: &str = "Title: Buy milk\nCategories: shopping\nPriority: low\nSummary: grocery run\n\nShopping Items:\n- Milk\nQuantity: 2\nUrgency: medium";

/// Completion in the shape the prompt asks for, with every section filled
pub const FULL_COMPLETION: &str = "\
Title: Weekend plans and errands
Categories: task, shopping, dlltw, project, goal
Priority: Medium
Due Date: 2025-03-15
Privacy: private
Recipient: Sam
Tags: Errands, Weekend , ,Reading
Summary: Errands for Saturday plus reading and project notes

Shopping Items:
- Eggs
Quantity: 12
Notes: free range
Urgency: high
- Bread
Quantity: 1
Urgency: low

DLLTW Notes:
Title: On deep work
Chapter: 3
Book Section: Rules
Content: Schedule every minute of the day
Key Points: time blocking; shutdown ritual

Project References:
Title: Portfolio site
Type: static_website
Description: Personal landing page
Estimated Time: 2 weeks
Priority: high
Status: in_progress

Goals:
Title: Run a half marathon
Description: Finish under two hours
Target Date: 2025-10-01
Success Criteria: finish race; under 2h
Category: personal

Milestones:
Milestone: Run 10k
Milestone Due: 2025-05-01
Milestone: Run 15k
Milestone Due: 2025-07-01";
