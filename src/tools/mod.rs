// ABOUTME: Pluggable tool architecture: trait, schemas, execution context, registry, and built-in tools
// ABOUTME: Every stdio request is dispatched through the ToolRegistry built here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Tools
//!
//! - [`McpTool`]: the trait every tool implements
//! - [`ToolRegistry`]: name to handler map built once at startup
//! - [`ToolExecutionContext`]: caller identity plus shared resources
//! - [`implementations`]: safety, pantry, receipt, and notification tools

/// Execution context passed to every tool
pub mod context;
/// Built-in tool implementations
pub mod implementations;
/// Argument extraction helpers
pub mod params;
/// Tool registry
pub mod registry;
/// Tool result type
pub mod result;
/// JSON schema types for tool inputs
pub mod schema;
/// Tool trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use schema::{JsonSchema, PropertySchema, ToolSchema};
pub use traits::{McpTool, ToolCapabilities};
