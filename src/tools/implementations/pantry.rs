// ABOUTME: Pantry tools: deduct a logged meal's ingredients and list the pantry
// ABOUTME: The LLM aligns ingredients to pantry items; quantities are applied deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Pantry Tools
//!
//! - `DeductPantryForMealTool` - match meal ingredients to the pantry and deduct them
//! - `ListPantryTool` - list pantry contents with items that expire soon

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use foodlog_intelligence::{
    items_expiring_within, plan_pantry_deduction, unwrap_singleton_or_default, IngredientMatch,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::constants::{collections, DEDUCT_PANTRY_FOR_MEAL, LIST_PANTRY};
use crate::errors::AppResult;
use crate::llm::prompts::{pantry_match_prompt, PANTRY_MATCH_SYSTEM_PROMPT};
use crate::llm::JsonRequest;
use crate::tools::context::ToolExecutionContext;
use crate::tools::params::{optional_bool, required_string_list};
use crate::tools::result::ToolResult;
use crate::tools::schema::{JsonSchema, PropertySchema};
use crate::tools::traits::{McpTool, ToolCapabilities};

#[derive(Debug, Default, Deserialize)]
struct MatchResponse {
    #[serde(default)]
    matches: Vec<IngredientMatch>,
}

fn ingredient_key(ingredient: &str) -> String {
    ingredient.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Read matches from `{"matches": [...]}` or a bare array of matches
fn parse_matches(data: Value) -> Vec<IngredientMatch> {
    match data {
        Value::Array(items) if items.iter().any(|item| item.get("ingredient").is_some()) => {
            serde_json::from_value(Value::Array(items)).unwrap_or_default()
        }
        other => unwrap_singleton_or_default(other, MatchResponse::default()).matches,
    }
}

// ============================================================================
// DeductPantryForMealTool
// ============================================================================

/// Deducts the ingredients of a logged meal from the pantry
pub struct DeductPantryForMealTool;

#[async_trait]
impl McpTool for DeductPantryForMealTool {
    fn name(&self) -> &'static str {
        DEDUCT_PANTRY_FOR_MEAL
    }

    fn description(&self) -> &'static str {
        "Match a meal's ingredients to pantry items and deduct the amounts used"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "ingredients",
                    PropertySchema::string_array("Ingredients of the meal, with amounts"),
                ),
                (
                    "dry_run",
                    PropertySchema::new("boolean", "Return the plan without saving it"),
                ),
            ],
            &["ingredients"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::WRITES_DATA | ToolCapabilities::USES_LLM
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let ingredients = required_string_list(&args, DEDUCT_PANTRY_FOR_MEAL, "ingredients")?;
        let dry_run = optional_bool(&args, DEDUCT_PANTRY_FOR_MEAL, "dry_run", false)?;
        let store = &ctx.resources.store;

        let mut pantry = store.get_pantry(ctx.user_id).await?;
        if pantry.is_empty() {
            debug!(user_id = %ctx.user_id, "Pantry is empty, nothing to deduct");
            return Ok(ToolResult::ok(json!({
                "updates": [],
                "unmatched": ingredients,
                "dry_run": dry_run,
                "applied": false,
            })));
        }

        let request = JsonRequest::new(pantry_match_prompt(&ingredients, &pantry))
            .with_system_instruction(PANTRY_MATCH_SYSTEM_PROMPT);
        let response = ctx.resources.llm.generate_json(&request).await?;
        let matches = parse_matches(response.data);

        let mut plan = plan_pantry_deduction(&pantry, &matches);
        // The model may echo ingredients with different casing or spacing
        let mentioned: HashSet<String> = matches
            .iter()
            .map(|found| ingredient_key(&found.ingredient))
            .collect();
        plan.unmatched.extend(
            ingredients
                .iter()
                .filter(|ingredient| !mentioned.contains(&ingredient_key(ingredient)))
                .cloned(),
        );

        let applied = !dry_run && !plan.is_empty();
        if applied {
            plan.apply(&mut pantry);
            store.put_pantry(ctx.user_id, pantry).await?;
        }
        if !dry_run {
            store
                .append_document(
                    ctx.user_id,
                    collections::MEALS,
                    json!({
                        "ingredients": ingredients,
                        "logged_at": Utc::now().to_rfc3339(),
                    }),
                )
                .await?;
        }

        info!(
            user_id = %ctx.user_id,
            updates = plan.updates.len(),
            unmatched = plan.unmatched.len(),
            dry_run,
            "Pantry deduction planned"
        );

        Ok(ToolResult::ok(json!({
            "updates": plan.updates,
            "unmatched": plan.unmatched,
            "dry_run": dry_run,
            "applied": applied,
        })))
    }
}

// ============================================================================
// ListPantryTool
// ============================================================================

/// Lists the pantry contents
pub struct ListPantryTool;

#[async_trait]
impl McpTool for ListPantryTool {
    fn name(&self) -> &'static str {
        LIST_PANTRY
    }

    fn description(&self) -> &'static str {
        "List pantry items and the ones expiring soon"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty_object()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let pantry = ctx.resources.store.get_pantry(ctx.user_id).await?;
        let within_days = ctx.resources.config.scheduler.expiring_within_days;
        let expiring: Vec<&str> =
            items_expiring_within(&pantry, Utc::now().date_naive(), within_days)
                .into_iter()
                .map(|item| item.id.as_str())
                .collect();

        Ok(ToolResult::ok(json!({
            "items": pantry,
            "count": pantry.len(),
            "expiring_soon": expiring,
            "expiring_within_days": within_days,
        })))
    }
}

/// Create all pantry tools for registration
#[must_use]
pub fn create_pantry_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(DeductPantryForMealTool), Box::new(ListPantryTool)]
}
