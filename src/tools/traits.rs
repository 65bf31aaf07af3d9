// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Tool Trait and Capabilities

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;

use super::context::ToolExecutionContext;
use super::result::ToolResult;
use super::schema::JsonSchema;

bitflags! {
    /// Capabilities that tools declare for filtering and logging
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads user data from the store
        const READS_DATA = 0b0000_0001;
        /// Tool writes user data to the store
        const WRITES_DATA = 0b0000_0010;
        /// Tool calls the LLM provider
        const USES_LLM = 0b0000_0100;
        /// Tool asks for search-grounded answers
        const SEARCH_GROUNDING = 0b0000_1000;
    }
}

impl ToolCapabilities {
    /// Check if tool reads data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool writes data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Check if tool calls the LLM
    #[must_use]
    pub const fn uses_llm(self) -> bool {
        self.contains(Self::USES_LLM)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
            (Self::USES_LLM, "uses_llm"),
            (Self::SEARCH_GROUNDING, "search_grounding"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, label)| label)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait every tool implements.
///
/// Tools are `Send + Sync` and shared behind `Arc`, so concurrent requests
/// run the same instance.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use foodlog_fcp::errors::AppResult;
/// use foodlog_fcp::tools::{JsonSchema, McpTool, ToolCapabilities, ToolExecutionContext, ToolResult};
/// use serde_json::{json, Value};
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn description(&self) -> &'static str {
///         "Health check"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema::empty_object()
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::empty()
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::ok(json!({"pong": true})))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `check_food_recalls`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and logging
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for argument validation failures, LLM failures, or
    /// store failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
