// ABOUTME: Tests for recovering JSON payloads from raw model output
// ABOUTME: Covers code fences, surrounding prose, and unrecoverable text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodlog_fcp::errors::ErrorCode;
use foodlog_fcp::llm::{extract_json_payload, parse_json_payload, strip_code_fences, JsonRequest};
use serde_json::json;

#[test]
fn test_strip_code_fences() {
    assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("```\n[1]\n```\n"), "[1]");
    assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
}

#[test]
fn test_extract_payload_from_prose() {
    let text = "Here is what I found:\n{\"recalled\": false}\nStay safe.";
    assert_eq!(extract_json_payload(text), "{\"recalled\": false}");

    let array = "Results: [{\"a\": 1}] done";
    assert_eq!(extract_json_payload(array), "[{\"a\": 1}]");
}

#[test]
fn test_parse_payload() {
    let value = parse_json_payload("```JSON\n{\"items\": [1, 2]}\n```").unwrap();
    assert_eq!(value, json!({"items": [1, 2]}));
}

#[test]
fn test_unrecoverable_text_is_serialization_error() {
    let error = parse_json_payload("No recalls were found.").unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[test]
fn test_request_builder() {
    let request = JsonRequest::new("prompt")
        .with_system_instruction("system")
        .with_image_url("https://example.com/r.jpg")
        .with_model("m")
        .with_temperature(0.5)
        .with_grounding(true);

    assert_eq!(request.prompt, "prompt");
    assert_eq!(request.system_instruction.as_deref(), Some("system"));
    assert_eq!(request.image_url.as_deref(), Some("https://example.com/r.jpg"));
    assert_eq!(request.model.as_deref(), Some("m"));
    assert_eq!(request.temperature, Some(0.5));
    assert!(request.grounding);
}
