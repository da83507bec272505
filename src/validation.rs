//! Validation helper functions for the voice-notes MCP server
//!
//! Checks on tool arguments before any work is done.

use mcp_attr::Result as McpResult;

/// Placeholder the capture UI sends while transcription is still running
pub const PROCESSING_PLACEHOLDER: &str = "Processing...";

/// Largest `limit` accepted by `recent_calls`
pub const MAX_CALL_LIMIT: usize = 100;

/// Check whether a transcription has nothing worth analyzing
///
/// # Arguments
/// * `transcription` - Transcript text from the capture client
///
/// # Returns
/// true for blank text or the "Processing..." placeholder
pub fn is_blank_transcription(transcription: &str) -> bool {
    let text = transcription.trim();
    text.is_empty() || text == PROCESSING_PLACEHOLDER
}

/// Parse and validate the `limit` parameter of `recent_calls`
///
/// # Returns
/// Result containing the limit, or an error for zero / oversized values
pub fn parse_call_limit(limit: Option<u32>) -> McpResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(0) => Err(invalid_params("Invalid limit 0. Use a value between 1 and 100")),
        Some(n) => {
            let n = n as usize;
            if n > MAX_CALL_LIMIT {
                Err(invalid_params(&format!(
                    "Invalid limit {}. Use a value between 1 and {}",
                    n, MAX_CALL_LIMIT
                )))
            } else {
                Ok(Some(n))
            }
        }
    }
}

/// Reject completion text that is empty before handing it to the parser
pub fn require_content(content: &str) -> McpResult<()> {
    if content.trim().is_empty() {
        return Err(invalid_params(
            "Content is empty. Provide the completion text to parse",
        ));
    }
    Ok(())
}

fn invalid_params(message: &str) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_transcription() {
        assert!(is_blank_transcription(""));
        assert!(is_blank_transcription("   \n"));
        assert!(is_blank_transcription("Processing..."));
        assert!(is_blank_transcription("  Processing...  "));
        assert!(!is_blank_transcription("buy milk"));
    }

    #[test]
    fn test_call_limit() {
        assert_eq!(parse_call_limit(None).unwrap(), None);
        assert_eq!(parse_call_limit(Some(5)).unwrap(), Some(5));
        assert!(parse_call_limit(Some(0)).is_err());
        assert!(parse_call_limit(Some(101)).is_err());
    }

    #[test]
    fn test_require_content() {
        assert!(require_content("Title: x").is_ok());
        assert!(require_content(" \n ").is_err());
    }
}
