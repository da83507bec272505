//! MCP handler tests with a scripted completion service
mod common;

use common::{FULL_COMPLETION, SCENARIO_A, ScriptedCompletion, get_test_handler};
use serde_json::Value;
use voice_notes_mcp::config::Config;
use voice_notes_mcp::{AnalyzeError, NoteServerHandler};
use voice_notes_mcp::prompt::Role;

#[tokio::test]
async fn test_analyze_note_parses_completion() {
    let completion = ScriptedCompletion::replying(SCENARIO_A);
    let handler = get_test_handler(completion.clone());

    let result = handler
        .handle_analyze_note("I need to pick up two milks".to_string())
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&result).unwrap();

    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["categories"][0], "shopping");
    assert_eq!(json["priority"], "low");
    assert_eq!(json["status"], "new");
    assert_eq!(json["shopping_items"][0]["name"], "Milk");
    assert_eq!(json["shopping_items"][0]["quantity"], 2);
    assert_eq!(json["shopping_items"][0]["urgency"], "medium");

    assert_eq!(completion.request_count(), 1);
    let request = completion.last_request().unwrap();
    assert_eq!(request[0].role, Role::system);
    assert!(request[1].content.contains("Voice note: \"I need to pick up two milks\""));

    assert_eq!(handler.call_count(), 1);
}

#[tokio::test]
async fn test_blank_transcription_skips_completion() {
    let completion = ScriptedCompletion::replying(SCENARIO_A);
    let handler = get_test_handler(completion.clone());

    for transcription in ["", "   ", "Processing..."] {
        let result = handler
            .handle_analyze_note(transcription.to_string())
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(json["title"], "Empty Note");
        assert_eq!(json["summary"], "No transcription available");
        assert_eq!(json["categories"][0], "note");
    }

    assert_eq!(completion.request_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_reported() {
    let completion = ScriptedCompletion::new(vec![
        Err(AnalyzeError::EmptyCompletion),
        Err(AnalyzeError::Api {
            status: 429,
            body: "rate limited".to_string(),
        }),
    ]);
    let handler = get_test_handler(completion.clone());

    assert!(handler.handle_analyze_note("hello".to_string()).await.is_err());
    assert!(handler.handle_analyze_note("hello again".to_string()).await.is_err());

    let log = handler.handle_recent_calls(None).await.unwrap();
    assert!(log.starts_with("Found 2 call(s):"));
    assert!(log.contains("status: error"));
    assert!(log.contains("Error: Completion service returned 429: rate limited"));
    assert!(log.contains("Error: No content in completion response"));
}

#[tokio::test]
async fn test_garbled_completion_still_succeeds() {
    let completion = ScriptedCompletion::replying("I'm sorry, I can't help with that.");
    let handler = get_test_handler(completion);

    let result = handler
        .handle_analyze_note("blah".to_string())
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(json["title"], "");
    assert_eq!(json["categories"][0], "note");
    assert_eq!(json["priority"], "low");
    assert_eq!(json["source"], "local");
}

#[tokio::test]
async fn test_parse_analysis_tool() {
    let handler = get_test_handler(ScriptedCompletion::new(vec![]));

    let plain = handler
        .handle_parse_analysis(FULL_COMPLETION.to_string(), None)
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&plain).unwrap();
    assert_eq!(json["title"], "Weekend plans and errands");
    assert_eq!(json["categories"][2], "reading-note");
    assert_eq!(json["goals"][0]["milestones"][0]["title"], "Run 10k");
    assert!(json.get("fallbacks").is_none());

    let detailed = handler
        .handle_parse_analysis("Priority: urgent\n".to_string(), Some(true))
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&detailed).unwrap();
    assert_eq!(json["analysis"]["priority"], "low");
    assert_eq!(json["fallbacks"][0]["field"], "Priority");
    assert_eq!(json["fallbacks"][0]["reason"], "out_of_vocabulary");
    assert_eq!(json["fallbacks"][0]["line"], 1);
}

#[tokio::test]
async fn test_parse_analysis_rejects_empty_content() {
    let handler = get_test_handler(ScriptedCompletion::new(vec![]));
    assert!(
        handler
            .handle_parse_analysis("  \n".to_string(), None)
            .await
            .is_err()
    );
    assert_eq!(handler.call_count(), 0);
}

#[tokio::test]
async fn test_analysis_prompt_tool() {
    let handler = get_test_handler(ScriptedCompletion::new(vec![]));

    let result = handler
        .handle_analysis_prompt("remember the dentist".to_string())
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(json[0]["role"], "system");
    assert_eq!(json[1]["role"], "user");
    assert!(
        json[1]["content"]
            .as_str()
            .unwrap()
            .contains("Due Date: [YYYY-MM-DD or N/A]")
    );
}

#[tokio::test]
async fn test_recent_calls_limit_and_clear() {
    let handler = get_test_handler(ScriptedCompletion::new(vec![]));
    for _ in 0..3 {
        handler
            .handle_parse_analysis("Title: x".to_string(), None)
            .await
            .unwrap();
    }

    let limited = handler.handle_recent_calls(Some(2)).await.unwrap();
    assert!(limited.starts_with("Found 2 call(s):"));
    assert!(limited.contains("[call-3] parse_analysis"));
    assert!(!limited.contains("[call-1]"));

    assert!(handler.handle_recent_calls(Some(0)).await.is_err());
    assert!(handler.handle_recent_calls(Some(500)).await.is_err());

    let cleared = handler.handle_clear_calls().await.unwrap();
    assert_eq!(cleared, "Cleared 3 call(s)");
    assert_eq!(
        handler.handle_recent_calls(None).await.unwrap(),
        "No calls recorded"
    );
}

#[tokio::test]
async fn test_call_log_keeps_last_hundred_calls() {
    let handler = get_test_handler(ScriptedCompletion::new(vec![]));
    for i in 0..101 {
        handler
            .handle_parse_analysis(format!("Title: note {}", i), None)
            .await
            .unwrap();
    }

    assert_eq!(handler.call_count(), 100);
    let log = handler.handle_recent_calls(Some(100)).await.unwrap();
    assert!(log.contains("[call-101] parse_analysis"));
    assert!(log.contains("[call-2] parse_analysis"));
    assert!(!log.contains("[call-1] "));
}

#[tokio::test]
async fn test_missing_api_key_only_disables_analyze_note() {
    let handler = NoteServerHandler::from_config(&Config::default());

    let parsed = handler
        .handle_parse_analysis("Title: offline".to_string(), None)
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&parsed).unwrap();
    assert_eq!(json["title"], "offline");
    assert!(
        handler
            .handle_analysis_prompt("hello".to_string())
            .await
            .is_ok()
    );

    assert!(handler.handle_analyze_note("hello".to_string()).await.is_err());
    let log = handler.handle_recent_calls(Some(1)).await.unwrap();
    assert!(log.contains("API key not configured"));

    let empty = handler
        .handle_analyze_note(String::new())
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&empty).unwrap();
    assert_eq!(json["title"], "Empty Note");
}
