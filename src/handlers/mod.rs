//! MCP tool handlers for the voice-notes server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod analyze;
pub mod calls;
pub mod parse;
pub mod prompt;
