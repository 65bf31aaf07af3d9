// ABOUTME: Pure food-safety and pantry algorithms for the FoodLog FCP backend
// ABOUTME: Safety narrative classifier, LLM field normalization, pantry deduction, receipt parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![deny(unsafe_code)]

//! # FoodLog Intelligence
//!
//! Deterministic post-processing of LLM output. Nothing here performs I/O or
//! holds state, so every function can be called from any task.
//!
//! ## Modules
//!
//! - **safety**: negation-aware classifier for recall, interaction, and allergen narratives
//! - **normalize**: coercion of loosely typed LLM fields into stable shapes
//! - **pantry**: ingredient-to-pantry deduction arithmetic
//! - **receipts**: receipt date, price, and item normalization

/// Negation-aware safety narrative classifier
pub mod safety;

/// Structured field normalization for safety responses
pub mod normalize;

/// Pantry deduction planning
pub mod pantry;

/// Receipt normalization
pub mod receipts;

pub use normalize::{
    normalize_affected_list, normalize_alert_severity, normalize_alert_type,
    normalize_recommended_action, normalize_safety_response, unwrap_singleton_or_default,
    AlertSeverity, FlagSource, SafetyReport,
};
pub use pantry::{
    items_expiring_within, plan_pantry_deduction, IngredientMatch, PantryDeductionPlan,
    PantryItem, PantryUpdate,
};
pub use receipts::{
    normalize_receipt_date, normalize_receipt_items, parse_price, parse_receipt_date,
    ReceiptItem,
};
pub use safety::{
    classify_allergen_alert, classify_interaction, classify_recall, is_phrase_negated,
    AlertDomain, ClassificationOutcome,
};
