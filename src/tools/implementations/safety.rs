// ABOUTME: Food recall, drug-food interaction, and allergen alert tools
// ABOUTME: Prompts the LLM with search grounding, normalizes the answer, and optionally persists it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Safety Tools
//!
//! - `CheckFoodRecallsTool`
//! - `CheckDrugFoodInteractionsTool`
//! - `CheckAllergenAlertsTool`
//!
//! All three share [`run_safety_check`]. The LLM's structured flag is trusted
//! when present; otherwise the negation-aware classifier reads the narrative.

use async_trait::async_trait;
use chrono::Utc;
use foodlog_intelligence::{normalize_safety_response, unwrap_singleton_or_default, AlertDomain};
use serde_json::{Map, Value};
use tracing::info;

use crate::constants::limits::MAX_SAFETY_FOOD_ITEMS;
use crate::constants::{
    collections, CHECK_ALLERGEN_ALERTS, CHECK_DRUG_FOOD_INTERACTIONS, CHECK_FOOD_RECALLS,
};
use crate::errors::{AppResult, ToolError};
use crate::llm::prompts::{safety_prompt, SAFETY_SYSTEM_PROMPT};
use crate::llm::JsonRequest;
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{optional_bool, required_string_list};
use crate::tools::result::ToolResult;
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Keep at most `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> Option<String> {
    text.char_indices()
        .nth(max_chars)
        .map(|(cut, _)| text[..cut].to_owned())
}

/// Shorten an over-long narrative in place before it is classified
fn truncate_narrative(data: &mut Value, field: &str, max_chars: usize) {
    let shortened = data
        .get(field)
        .and_then(Value::as_str)
        .and_then(|text| truncate_chars(text, max_chars));
    if let (Some(shortened), Some(object)) = (shortened, data.as_object_mut()) {
        object.insert(field.to_owned(), Value::String(shortened));
    }
}

fn safety_schema(subjects: Option<(&str, &str)>) -> JsonSchema {
    let mut properties = vec![
        (
            "food_items",
            PropertySchema::string_array("Foods or products to check"),
        ),
        (
            "persist",
            PropertySchema::new(
                "boolean",
                "Save the result to the user's safety check history (default true)",
            ),
        ),
    ];
    let mut required = vec!["food_items"];
    if let Some((name, description)) = subjects {
        properties.push((name, PropertySchema::string_array(description)));
        required.push(name);
    }
    JsonSchema::object(properties, &required)
}

/// Shared body of the three safety tools
async fn run_safety_check(
    tool: &'static str,
    domain: AlertDomain,
    subjects_param: Option<&str>,
    args: &Value,
    ctx: &ToolExecutionContext,
) -> AppResult<ToolResult> {
    let food_items = required_string_list(args, tool, "food_items")?;
    if food_items.len() > MAX_SAFETY_FOOD_ITEMS {
        return Err(ToolError::invalid_parameter(
            tool,
            "food_items",
            format!("at most {MAX_SAFETY_FOOD_ITEMS} items per check"),
        )
        .into());
    }
    let subjects = match subjects_param {
        Some(name) => required_string_list(args, tool, name)?,
        None => Vec::new(),
    };
    let persist = optional_bool(args, tool, "persist", true)?;

    let config = &ctx.resources.config;
    let grounding =
        config.llm.grounding && ctx.resources.llm.capabilities().supports_grounding();
    let request = JsonRequest::new(safety_prompt(domain, &food_items, &subjects))
        .with_system_instruction(SAFETY_SYSTEM_PROMPT)
        .with_grounding(grounding);
    let response = ctx.resources.llm.generate_json(&request).await?;

    let mut data = unwrap_singleton_or_default(response.data, Value::Object(Map::new()));
    truncate_narrative(
        &mut data,
        domain.field_names().narrative,
        config.safety.max_narrative_chars,
    );
    let report = normalize_safety_response(domain, &data, response.sources);

    info!(
        tool,
        user_id = %ctx.user_id,
        domain = domain.as_str(),
        is_active = report.is_active,
        flag_source = ?report.flag_source,
        "Safety check completed"
    );

    let mut content = report.to_json();
    if let Some(object) = content.as_object_mut() {
        object.insert("domain".to_owned(), Value::from(domain.as_str()));
        object.insert("food_items".to_owned(), Value::from(food_items));
        if let Some(name) = subjects_param {
            object.insert(name.to_owned(), Value::from(subjects));
        }
        object.insert("checked_at".to_owned(), Value::from(Utc::now().to_rfc3339()));
    }

    if persist {
        let id = ctx
            .resources
            .store
            .append_document(ctx.user_id, collections::SAFETY_CHECKS, content.clone())
            .await?;
        if let Some(object) = content.as_object_mut() {
            object.insert("check_id".to_owned(), Value::String(id));
        }
    }

    Ok(ToolResult::ok(content))
}

// ============================================================================
// CheckFoodRecallsTool
// ============================================================================

/// Checks foods against current recalls and public health alerts
pub struct CheckFoodRecallsTool;

#[async_trait]
impl McpTool for CheckFoodRecallsTool {
    fn name(&self) -> &'static str {
        CHECK_FOOD_RECALLS
    }

    fn description(&self) -> &'static str {
        "Check foods for active recalls or public health alerts using live web search"
    }

    fn input_schema(&self) -> JsonSchema {
        safety_schema(None)
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::USES_LLM
            | ToolCapabilities::SEARCH_GROUNDING
            | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        run_safety_check(CHECK_FOOD_RECALLS, AlertDomain::Recall, None, &args, ctx).await
    }
}

// ============================================================================
// CheckDrugFoodInteractionsTool
// ============================================================================

/// Checks foods against the user's medications
pub struct CheckDrugFoodInteractionsTool;

#[async_trait]
impl McpTool for CheckDrugFoodInteractionsTool {
    fn name(&self) -> &'static str {
        CHECK_DRUG_FOOD_INTERACTIONS
    }

    fn description(&self) -> &'static str {
        "Check foods for known interactions with the given medications"
    }

    fn input_schema(&self) -> JsonSchema {
        safety_schema(Some(("medications", "Medications the user takes")))
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::USES_LLM
            | ToolCapabilities::SEARCH_GROUNDING
            | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        run_safety_check(
            CHECK_DRUG_FOOD_INTERACTIONS,
            AlertDomain::Interaction,
            Some("medications"),
            &args,
            ctx,
        )
        .await
    }
}

// ============================================================================
// CheckAllergenAlertsTool
// ============================================================================

/// Checks foods for undeclared-allergen alerts
pub struct CheckAllergenAlertsTool;

#[async_trait]
impl McpTool for CheckAllergenAlertsTool {
    fn name(&self) -> &'static str {
        CHECK_ALLERGEN_ALERTS
    }

    fn description(&self) -> &'static str {
        "Check foods for undeclared-allergen alerts relevant to the given allergens"
    }

    fn input_schema(&self) -> JsonSchema {
        safety_schema(Some(("allergens", "Allergens the user must avoid")))
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::USES_LLM
            | ToolCapabilities::SEARCH_GROUNDING
            | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        run_safety_check(
            CHECK_ALLERGEN_ALERTS,
            AlertDomain::Allergen,
            Some("allergens"),
            &args,
            ctx,
        )
        .await
    }
}

/// Create all safety tools for registration
#[must_use]
pub fn create_safety_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CheckFoodRecallsTool),
        Box::new(CheckDrugFoodInteractionsTool),
        Box::new(CheckAllergenAlertsTool),
    ]
}
