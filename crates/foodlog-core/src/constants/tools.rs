// ABOUTME: Tool identifier constants to eliminate hardcoded tool names
// ABOUTME: Grouped by functional area (safety, pantry, receipts, notifications)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Tool identifier constants

/// Food recall check
pub const CHECK_FOOD_RECALLS: &str = "check_food_recalls";
/// Drug-food interaction check
pub const CHECK_DRUG_FOOD_INTERACTIONS: &str = "check_drug_food_interactions";
/// Allergen alert check
pub const CHECK_ALLERGEN_ALERTS: &str = "check_allergen_alerts";

/// Deduct a logged meal's ingredients from the pantry
pub const DEDUCT_PANTRY_FOR_MEAL: &str = "deduct_pantry_for_meal";
/// List the pantry contents
pub const LIST_PANTRY: &str = "list_pantry";

/// Extract items and purchase date from a grocery receipt
pub const PARSE_RECEIPT: &str = "parse_receipt";

/// List generated notifications
pub const LIST_NOTIFICATIONS: &str = "list_notifications";

/// Tool categories used by the registry
pub mod categories {
    /// Safety checks
    pub const SAFETY: &str = "safety";
    /// Pantry management
    pub const PANTRY: &str = "pantry";
    /// Receipt ingestion
    pub const RECEIPTS: &str = "receipts";
    /// Notifications
    pub const NOTIFICATIONS: &str = "notifications";
}
