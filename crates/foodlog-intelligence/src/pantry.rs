// ABOUTME: Pantry deduction arithmetic applied after the LLM aligns meal ingredients to pantry items
// ABOUTME: Confidence filtering, quantity accumulation, clamping, and depletion tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Pantry Deduction
//!
//! The LLM is only trusted with the fuzzy part (which pantry item does
//! "2 cloves garlic" refer to?). Quantities are applied here so that the
//! arithmetic is deterministic and testable.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Matches below this confidence are treated as unmatched
pub const MIN_MATCH_CONFIDENCE: f64 = 0.6;

/// Quantity deducted when the LLM omits one
pub const DEFAULT_QUANTITY_USED: f64 = 1.0;

/// One item in a user's pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Stable item identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Remaining quantity in `unit`
    pub quantity: f64,
    /// Unit of measure (`g`, `ml`, `pcs`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Best-before date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

/// LLM alignment of one logged ingredient to a pantry item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMatch {
    /// Ingredient as logged
    pub ingredient: String,
    /// Matched pantry item, if any
    #[serde(default)]
    pub pantry_item_id: Option<String>,
    /// Amount consumed, in the pantry item's unit
    #[serde(default)]
    pub quantity_used: Option<f64>,
    /// Match confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Planned change to a single pantry item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryUpdate {
    /// Pantry item identifier
    pub item_id: String,
    /// Pantry item name
    pub name: String,
    /// Quantity before deduction
    pub previous_quantity: f64,
    /// Quantity after deduction, never negative
    pub new_quantity: f64,
    /// Whether the item ran out
    pub depleted: bool,
}

/// Result of aligning a meal against the pantry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantryDeductionPlan {
    /// Item updates, in pantry order
    pub updates: Vec<PantryUpdate>,
    /// Ingredients that could not be attributed to a pantry item
    pub unmatched: Vec<String>,
}

impl PantryDeductionPlan {
    /// Whether the plan changes anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Write the planned quantities into `pantry`
    pub fn apply(&self, pantry: &mut [PantryItem]) {
        for update in &self.updates {
            if let Some(item) = pantry.iter_mut().find(|item| item.id == update.item_id) {
                item.quantity = update.new_quantity;
            }
        }
    }
}

/// Turn LLM ingredient matches into a deduction plan.
///
/// Matches without an item id, with an unknown id, or below
/// `MIN_MATCH_CONFIDENCE` are reported as unmatched. A missing quantity
/// deducts `DEFAULT_QUANTITY_USED`; negative or non-finite quantities deduct
/// nothing. Several matches for the same item accumulate.
#[must_use]
pub fn plan_pantry_deduction(
    pantry: &[PantryItem],
    matches: &[IngredientMatch],
) -> PantryDeductionPlan {
    let mut consumed: HashMap<&str, f64> = HashMap::new();
    let mut unmatched = Vec::new();

    for ingredient in matches {
        let confident = ingredient
            .confidence
            .map_or(true, |confidence| confidence >= MIN_MATCH_CONFIDENCE);

        let item = ingredient
            .pantry_item_id
            .as_deref()
            .filter(|_| confident)
            .and_then(|id| pantry.iter().find(|item| item.id == id));

        let Some(item) = item else {
            debug!(ingredient = %ingredient.ingredient, "Ingredient not matched to pantry");
            unmatched.push(ingredient.ingredient.clone());
            continue;
        };

        let amount = match ingredient.quantity_used {
            None => DEFAULT_QUANTITY_USED,
            Some(quantity) if quantity.is_finite() && quantity > 0.0 => quantity,
            Some(_) => 0.0,
        };
        *consumed.entry(item.id.as_str()).or_insert(0.0) += amount;
    }

    let updates = pantry
        .iter()
        .filter_map(|item| {
            let amount = consumed.get(item.id.as_str())?;
            let new_quantity = (item.quantity - amount).max(0.0);
            Some(PantryUpdate {
                item_id: item.id.clone(),
                name: item.name.clone(),
                previous_quantity: item.quantity,
                new_quantity,
                depleted: new_quantity <= 0.0,
            })
        })
        .collect();

    PantryDeductionPlan { updates, unmatched }
}

/// Items whose best-before date falls within `days` of `today` (inclusive).
///
/// Already expired items are included; items without a date or with nothing
/// left are not. A horizon past the end of the calendar matches every dated item.
#[must_use]
pub fn items_expiring_within(
    pantry: &[PantryItem],
    today: NaiveDate,
    days: i64,
) -> Vec<&PantryItem> {
    let horizon = Duration::try_days(days).and_then(|span| today.checked_add_signed(span));
    pantry
        .iter()
        .filter(|item| item.quantity > 0.0)
        .filter(|item| {
            item.expires_on
                .is_some_and(|date| horizon.is_none_or(|horizon| date <= horizon))
        })
        .collect()
}
