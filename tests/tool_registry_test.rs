// ABOUTME: Tests for the tool registry: registration, lookup, categories, schemas, and dispatch
// ABOUTME: Uses a stub tool so dispatch can be checked without the LLM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::TestEnv;
use foodlog_fcp::constants::categories;
use foodlog_fcp::errors::{AppResult, ErrorCode};
use foodlog_fcp::tools::{
    JsonSchema, McpTool, ToolCapabilities, ToolExecutionContext, ToolRegistry, ToolResult,
};
use serde_json::{json, Value};
use uuid::Uuid;

struct StubTool {
    name: &'static str,
}

#[async_trait]
impl McpTool for StubTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Stub tool for unit testing"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty_object()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(ToolResult::ok(json!({
            "echo": args,
            "user_id": context.user_id,
        })))
    }
}

#[test]
fn test_builtin_tools_are_registered_by_category() {
    let registry = ToolRegistry::with_builtin_tools().unwrap();

    assert_eq!(registry.len(), 7);
    assert_eq!(
        registry.tools_in_category(categories::SAFETY),
        vec![
            "check_food_recalls",
            "check_drug_food_interactions",
            "check_allergen_alerts"
        ]
    );
    assert_eq!(
        registry.tools_in_category(categories::PANTRY),
        vec!["deduct_pantry_for_meal", "list_pantry"]
    );
    assert_eq!(
        registry.tools_in_category(categories::RECEIPTS),
        vec!["parse_receipt"]
    );
    assert_eq!(
        registry.tools_in_category(categories::NOTIFICATIONS),
        vec!["list_notifications"]
    );
    assert!(registry.tools_in_category("unknown").is_empty());
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(StubTool { name: "echo" }))
        .unwrap();

    let error = registry
        .register(Arc::new(StubTool { name: "echo" }))
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_builtin_registration_twice_fails() {
    let mut registry = ToolRegistry::with_builtin_tools().unwrap();
    assert!(registry.register_builtin_tools().is_err());
}

#[test]
fn test_schemas_are_sorted_and_declare_required_fields() {
    let registry = ToolRegistry::with_builtin_tools().unwrap();
    let schemas = registry.list_schemas();

    let names: Vec<&str> = schemas.iter().map(|schema| schema.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    let interactions = schemas
        .iter()
        .find(|schema| schema.name == "check_drug_food_interactions")
        .unwrap();
    let required = interactions.input_schema.required.clone().unwrap();
    assert!(required.contains(&"food_items".to_owned()));
    assert!(required.contains(&"medications".to_owned()));

    let serialized = serde_json::to_value(interactions).unwrap();
    assert_eq!(
        serialized["inputSchema"]["properties"]["food_items"]["items"]["type"],
        "string"
    );
}

#[test]
fn test_capabilities_describe() {
    let caps = ToolCapabilities::USES_LLM | ToolCapabilities::WRITES_DATA;
    assert!(caps.uses_llm());
    assert!(caps.writes_data());
    assert!(!caps.reads_data());
    assert_eq!(caps.describe(), "writes_data, uses_llm");
    assert_eq!(ToolCapabilities::empty().describe(), "none");
}

#[tokio::test]
async fn test_execute_dispatches_to_tool() {
    let env = TestEnv::new();
    let mut registry = ToolRegistry::new();
    registry
        .register_with_category(Arc::new(StubTool { name: "echo" }), "testing")
        .unwrap();
    let user_id = Uuid::new_v4();

    let result = registry
        .execute("echo", json!({"x": 1}), &env.context(user_id))
        .await
        .unwrap();

    assert!(!result.is_error);
    assert_eq!(result.content["echo"], json!({"x": 1}));
    assert_eq!(result.content["user_id"], json!(user_id));
    assert_eq!(registry.tools_in_category("testing"), vec!["echo"]);
}

#[tokio::test]
async fn test_execute_unknown_tool_is_not_found() {
    let env = TestEnv::new();
    let registry = ToolRegistry::with_builtin_tools().unwrap();

    let error = registry
        .execute("order_pizza", json!({}), &env.context(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(error.message.contains("order_pizza"));
}
