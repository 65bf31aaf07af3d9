// ABOUTME: Receipt parsing tool extracting items, store, and purchase date from text or a photo
// ABOUTME: Optionally merges the purchased items into the user's pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Receipt Tools
//!
//! - `ParseReceiptTool` - extract and store a receipt, optionally stocking the pantry

use async_trait::async_trait;
use chrono::Utc;
use foodlog_intelligence::{
    normalize_receipt_date, normalize_receipt_items, unwrap_singleton_or_default, PantryItem,
    ReceiptItem,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::constants::{collections, PARSE_RECEIPT};
use crate::errors::{AppResult, ToolError};
use crate::llm::prompts::{receipt_prompt, RECEIPT_SYSTEM_PROMPT};
use crate::llm::JsonRequest;
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{optional_bool, optional_str};
use crate::tools::result::ToolResult;
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Counts of pantry changes made by a receipt import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PantryMergeSummary {
    /// New pantry items created
    pub added: usize,
    /// Existing items whose quantity grew
    pub updated: usize,
}

fn same_unit(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

/// Add purchased items to `pantry`.
///
/// An item with the same name (case-insensitive) and unit is topped up;
/// anything else becomes a new pantry item.
pub fn merge_into_pantry(
    pantry: &mut Vec<PantryItem>,
    items: &[ReceiptItem],
) -> PantryMergeSummary {
    let mut summary = PantryMergeSummary::default();
    for item in items {
        let existing = pantry.iter_mut().find(|stocked| {
            stocked.name.eq_ignore_ascii_case(&item.name)
                && same_unit(stocked.unit.as_deref(), item.unit.as_deref())
        });
        if let Some(stocked) = existing {
            stocked.quantity += item.quantity;
            summary.updated += 1;
        } else {
            pantry.push(PantryItem {
                id: Uuid::new_v4().to_string(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                expires_on: None,
            });
            summary.added += 1;
        }
    }
    summary
}

/// Parses grocery receipts
pub struct ParseReceiptTool;

#[async_trait]
impl McpTool for ParseReceiptTool {
    fn name(&self) -> &'static str {
        PARSE_RECEIPT
    }

    fn description(&self) -> &'static str {
        "Extract purchased items, store, and purchase date from receipt text or a receipt photo"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "receipt_text",
                    PropertySchema::new("string", "Receipt text (OCR output or pasted)"),
                ),
                (
                    "image_url",
                    PropertySchema::new("string", "URL of a receipt photo"),
                ),
                (
                    "add_to_pantry",
                    PropertySchema::new("boolean", "Add the purchased items to the pantry"),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::WRITES_DATA | ToolCapabilities::USES_LLM
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let receipt_text = optional_str(&args, PARSE_RECEIPT, "receipt_text")?;
        let image_url = optional_str(&args, PARSE_RECEIPT, "image_url")?;
        let add_to_pantry = optional_bool(&args, PARSE_RECEIPT, "add_to_pantry", false)?;
        if receipt_text.is_none() && image_url.is_none() {
            return Err(
                ToolError::missing_parameter(PARSE_RECEIPT, "receipt_text or image_url").into(),
            );
        }
        if image_url.is_some() && !ctx.resources.llm.capabilities().supports_vision() {
            return Err(ToolError::invalid_parameter(
                PARSE_RECEIPT,
                "image_url",
                format!("provider '{}' cannot read images", ctx.resources.llm.name()),
            )
            .into());
        }

        let today = Utc::now().date_naive();
        let mut request = JsonRequest::new(receipt_prompt(receipt_text.as_deref(), today))
            .with_system_instruction(RECEIPT_SYSTEM_PROMPT);
        if let Some(url) = image_url {
            request = request.with_image_url(url);
        }
        let response = ctx.resources.llm.generate_json(&request).await?;
        let data = unwrap_singleton_or_default(response.data, Value::Object(Map::new()));

        let purchase_date =
            normalize_receipt_date(data.get("purchase_date").and_then(Value::as_str), today);
        let store_name = data
            .get("store")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let items = data
            .get("items")
            .map_or_else(Vec::new, normalize_receipt_items);
        let total: f64 = items.iter().filter_map(|item| item.price).sum();

        let pantry_summary = if add_to_pantry && !items.is_empty() {
            let store = &ctx.resources.store;
            let mut pantry = store.get_pantry(ctx.user_id).await?;
            let summary = merge_into_pantry(&mut pantry, &items);
            store.put_pantry(ctx.user_id, pantry).await?;
            Some(summary)
        } else {
            None
        };

        let mut content = json!({
            "purchase_date": purchase_date.to_string(),
            "store": store_name,
            "items": items,
            "item_count": items.len(),
            "total": total,
            "pantry": pantry_summary,
        });
        let receipt_id = ctx
            .resources
            .store
            .append_document(ctx.user_id, collections::RECEIPTS, content.clone())
            .await?;
        content["receipt_id"] = Value::String(receipt_id);

        info!(
            user_id = %ctx.user_id,
            items = items.len(),
            %purchase_date,
            add_to_pantry,
            "Receipt parsed"
        );
        Ok(ToolResult::ok(content))
    }
}

/// Create all receipt tools for registration
#[must_use]
pub fn create_receipt_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(ParseReceiptTool)]
}
