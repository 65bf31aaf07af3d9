// ABOUTME: Tests for the line-delimited tool call server
// ABOUTME: Drives handle_line and the full serve loop over in-memory streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::TestEnv;
use foodlog_fcp::server::{ToolCallServer, LIST_TOOLS};
use foodlog_fcp::store::DocumentStore;
use foodlog_fcp::tools::ToolRegistry;
use foodlog_intelligence::PantryItem;
use serde_json::{json, Value};
use uuid::Uuid;

fn server(env: &TestEnv) -> ToolCallServer {
    let registry = Arc::new(ToolRegistry::with_builtin_tools().unwrap());
    ToolCallServer::new(registry, env.resources.clone())
}

#[tokio::test]
async fn test_blank_line_is_ignored() {
    let env = TestEnv::new();
    assert!(server(&env).handle_line("   ").await.is_none());
}

#[tokio::test]
async fn test_malformed_json_reports_invalid_format() {
    let env = TestEnv::new();
    let response = server(&env).handle_line("{not json").await.unwrap();

    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["error"]["code"], "INVALID_FORMAT");
    assert!(response["error"].get("request_id").is_none());
}

#[tokio::test]
async fn test_list_tools_needs_no_user() {
    let env = TestEnv::new();
    let line = json!({"id": 1, "tool": LIST_TOOLS}).to_string();
    let response = server(&env).handle_line(&line).await.unwrap();

    assert_eq!(response["id"], 1);
    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 7);
    assert!(tools.iter().all(|tool| tool.get("inputSchema").is_some()));
}

#[tokio::test]
async fn test_missing_user_id_is_rejected() {
    let env = TestEnv::new();
    let line = json!({"id": "a", "tool": "list_pantry"}).to_string();
    let response = server(&env).handle_line(&line).await.unwrap();

    assert_eq!(response["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert_eq!(response["error"]["request_id"], "a");
}

#[tokio::test]
async fn test_non_object_arguments_are_rejected() {
    let env = TestEnv::new();
    let line = json!({
        "id": 2,
        "tool": "list_pantry",
        "user_id": Uuid::new_v4(),
        "arguments": [1, 2],
    })
    .to_string();
    let response = server(&env).handle_line(&line).await.unwrap();

    assert_eq!(response["error"]["code"], "INVALID_FORMAT");
    assert_eq!(response["error"]["request_id"], "2");
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let env = TestEnv::new();
    let line = json!({"id": 3, "tool": "order_pizza", "user_id": Uuid::new_v4()}).to_string();
    let response = server(&env).handle_line(&line).await.unwrap();

    assert_eq!(response["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_null_arguments_default_to_empty_object() {
    let env = TestEnv::new();
    let user_id = Uuid::new_v4();
    env.store
        .put_pantry(
            user_id,
            vec![PantryItem {
                id: "p1".to_owned(),
                name: "Oats".to_owned(),
                quantity: 500.0,
                unit: Some("g".to_owned()),
                expires_on: None,
            }],
        )
        .await
        .unwrap();
    let line = json!({"id": 4, "tool": "list_pantry", "user_id": user_id, "arguments": null}).to_string();
    let response = server(&env).handle_line(&line).await.unwrap();

    assert_eq!(response["result"]["count"], 1);
    assert_eq!(response["result"]["items"][0]["name"], "Oats");
}

#[tokio::test]
async fn test_serve_answers_each_line_in_order() {
    let env = TestEnv::new();
    let user_id = Uuid::new_v4();
    let input = format!(
        "{}\n\n{}\nnot json\n",
        json!({"id": 1, "tool": LIST_TOOLS}),
        json!({"id": 2, "tool": "list_notifications", "user_id": user_id}),
    );
    let mut output = Vec::new();

    server(&env).serve(input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["result"]["count"], 0);
    assert_eq!(lines[2]["error"]["code"], "INVALID_FORMAT");
}
