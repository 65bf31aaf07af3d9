// ABOUTME: Tests for AppError, ErrorCode, and ToolError conversions
// ABOUTME: Verifies HTTP status mapping, serialization, and tool error context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::error::Error as StdError;

use foodlog_core::errors::{AppError, ErrorCode, ErrorResponse, ToolError};
use uuid::Uuid;

#[test]
fn test_error_code_http_status() {
    assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
    assert_eq!(ErrorCode::MissingRequiredField.http_status(), 400);
    assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
    assert_eq!(ErrorCode::ExternalServiceError.http_status(), 502);
    assert_eq!(ErrorCode::ExternalRateLimited.http_status(), 503);
    assert_eq!(ErrorCode::InternalError.http_status(), 500);
}

#[test]
fn test_app_error_context() {
    let user_id = Uuid::new_v4();
    let error = AppError::invalid_input("food_items must not be empty")
        .with_request_id("req-123")
        .with_user_id(user_id);

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.context.request_id.as_deref(), Some("req-123"));
    assert_eq!(error.context.user_id, Some(user_id));
    assert!(error.to_string().contains("food_items must not be empty"));
}

#[test]
fn test_error_response_serialization() {
    let error = AppError::external_service("Gemini", "quota exceeded")
        .with_details(serde_json::json!({ "retry_after_secs": 7 }));
    let json = serde_json::to_string(&ErrorResponse::from(error)).unwrap();

    assert!(json.contains("EXTERNAL_SERVICE_ERROR"));
    assert!(json.contains("Gemini: quota exceeded"));
    assert!(json.contains("retry_after_secs"));
    assert!(!json.contains("request_id"));
}

#[test]
fn test_serde_json_error_maps_to_serialization_code() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = AppError::from(parse_error);
    assert_eq!(error.code, ErrorCode::SerializationError);
    assert!(StdError::source(&error).is_some());
}

#[test]
fn test_tool_error_display_and_conversion() {
    let error = ToolError::missing_parameter("check_food_recalls", "food_items");
    assert_eq!(error.tool_name(), "check_food_recalls");
    assert_eq!(
        error.to_string(),
        "Missing required parameter 'food_items' for tool 'check_food_recalls'"
    );

    let app_error = AppError::from(error);
    assert_eq!(app_error.code, ErrorCode::MissingRequiredField);
    assert_eq!(app_error.context.details["tool"], "check_food_recalls");
    assert_eq!(app_error.context.details["parameter"], "food_items");

    let not_found = AppError::from(ToolError::not_found("order_pizza"));
    assert!(not_found.context.details.get("parameter").is_none());
}

#[test]
fn test_tool_error_codes() {
    assert_eq!(ToolError::not_found("x").code(), ErrorCode::ResourceNotFound);
    assert_eq!(
        ToolError::already_registered("x").code(),
        ErrorCode::ResourceAlreadyExists
    );
    assert_eq!(
        ToolError::invalid_parameter("x", "limit", "must be positive").code(),
        ErrorCode::InvalidInput
    );
    assert_eq!(
        ToolError::execution_failed("x", "boom").code(),
        ErrorCode::InternalError
    );
}
