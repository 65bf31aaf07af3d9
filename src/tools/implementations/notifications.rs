// ABOUTME: Notification listing tool returning reminders generated by the scheduler
// ABOUTME: Newest first, with a bounded page size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::limits::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::constants::{collections, LIST_NOTIFICATIONS};
use crate::errors::AppResult;
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::optional_usize;
use crate::tools::result::ToolResult;
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Lists generated notifications
pub struct ListNotificationsTool;

#[async_trait]
impl McpTool for ListNotificationsTool {
    fn name(&self) -> &'static str {
        LIST_NOTIFICATIONS
    }

    fn description(&self) -> &'static str {
        "List pantry reminders and weekly digests generated for the user, newest first"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "limit",
                PropertySchema::new(
                    "integer",
                    "Maximum number of notifications (default 20, max 100)",
                ),
            )],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let limit = optional_usize(&args, LIST_NOTIFICATIONS, "limit")?
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        let notifications = ctx
            .resources
            .store
            .list_documents(ctx.user_id, collections::NOTIFICATIONS, limit)
            .await?;

        Ok(ToolResult::ok(json!({
            "notifications": notifications,
            "count": notifications.len(),
        })))
    }
}

/// Create all notification tools for registration
#[must_use]
pub fn create_notification_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(ListNotificationsTool)]
}
