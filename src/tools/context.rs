// ABOUTME: Defines ToolExecutionContext which provides tools with access to resources and user context.
// ABOUTME: This replaces scattered parameter passing with a unified context object.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Tool Execution Context

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::resources::ServerResources;

/// Context provided to every tool execution
///
/// Cloning is cheap: `resources` is an `Arc`.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// User the call is made for
    pub user_id: Uuid,
    /// Caller-supplied request id, echoed in logs
    pub request_id: Option<Value>,
    /// Shared server resources
    pub resources: Arc<ServerResources>,
}

impl ToolExecutionContext {
    /// Create a context for `user_id`
    #[must_use]
    pub const fn new(user_id: Uuid, resources: Arc<ServerResources>) -> Self {
        Self {
            user_id,
            request_id: None,
            resources,
        }
    }

    /// Set the request id
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("user_id", &self.user_id)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
