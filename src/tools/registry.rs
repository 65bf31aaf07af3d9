// ABOUTME: Central registry mapping tool names to handlers, built once at startup
// ABOUTME: Provides registration, category lookup, schema listing, and dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Tool Registry
//!
//! The registry is built once at startup and then only read, so lookups need
//! no locking. Tools are `Arc`-wrapped for sharing across tasks.
//!
//! # Example
//!
//! ```
//! use foodlog_fcp::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::with_builtin_tools().unwrap();
//! assert!(registry.contains("check_food_recalls"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::categories;
use crate::errors::{AppResult, ToolError};

use super::context::ToolExecutionContext;
use super::implementations::{
    create_notification_tools, create_pantry_tools, create_receipt_tools, create_safety_tools,
};
use super::result::ToolResult;
use super::schema::ToolSchema;
use super::traits::McpTool;

/// Central registry for tools
#[derive(Default)]
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Tool names by category
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if two built-in tools share a name
    pub fn with_builtin_tools() -> AppResult<Self> {
        let mut registry = Self::new();
        registry.register_builtin_tools()?;
        Ok(registry)
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if a tool with the same name is registered
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> AppResult<()> {
        let name = tool.name();
        if self.tools.contains_key(name) {
            warn!("Tool '{}' is already registered", name);
            return Err(ToolError::already_registered(name).into());
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name.to_owned(), tool);
        Ok(())
    }

    /// Register a tool and categorize it
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if a tool with the same name is registered
    pub fn register_with_category(
        &mut self,
        tool: Arc<dyn McpTool>,
        category: &str,
    ) -> AppResult<()> {
        let name = tool.name().to_owned();
        self.register(tool)?;
        self.categories
            .entry(category.to_owned())
            .or_default()
            .push(name);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tool names in a category, in registration order
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Schemas of every registered tool, sorted by name
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for unknown tools, otherwise whatever the
    /// tool returns
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        debug!(tool = name, user_id = %context.user_id, "Executing tool");
        tool.execute(args, context).await
    }

    /// Register every built-in tool under its category
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if a built-in tool is already registered
    pub fn register_builtin_tools(&mut self) -> AppResult<()> {
        info!("Registering built-in tools...");

        let groups = [
            (categories::SAFETY, create_safety_tools()),
            (categories::PANTRY, create_pantry_tools()),
            (categories::RECEIPTS, create_receipt_tools()),
            (categories::NOTIFICATIONS, create_notification_tools()),
        ];
        for (category, tools) in groups {
            for tool in tools {
                self.register_with_category(Arc::from(tool), category)?;
            }
        }

        info!("Registered {} built-in tools", self.len());
        Ok(())
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .field("categories", &self.categories)
            .finish()
    }
}
