// ABOUTME: Prompt templates for safety checks, pantry matching, receipt parsing, and notifications
// ABOUTME: The safety system prompt is loaded at compile time from a markdown file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Prompts
//!
//! Every prompt asks for a single JSON object with a fixed set of field
//! names. The field names come from [`AlertDomain::field_names`] so the
//! prompt and the normalizer cannot drift apart.

use chrono::NaiveDate;
use foodlog_intelligence::{AlertDomain, PantryItem};
use serde_json::{json, Value};

/// System prompt shared by the three safety tools
pub const SAFETY_SYSTEM_PROMPT: &str = include_str!("safety_system.md");

/// System prompt for receipt extraction
pub const RECEIPT_SYSTEM_PROMPT: &str = "You extract structured data from grocery receipts. \
Answer with a single JSON object and nothing else. Skip taxes, discounts, deposits, \
bag fees, subtotals, and payment lines. Expand abbreviated product names when the \
meaning is obvious.";

/// System prompt for pantry matching
pub const PANTRY_MATCH_SYSTEM_PROMPT: &str = "You match recipe ingredients to items in a \
home pantry. Answer with a single JSON object and nothing else. Only match an ingredient \
when the pantry item is clearly the same food; never guess.";

/// System prompt for notification copy
pub const NOTIFICATION_SYSTEM_PROMPT: &str = "You write short, friendly push notifications \
for a food journaling app. Answer with a single JSON object and nothing else. The title \
is at most 60 characters and the body at most 200 characters. No emoji.";

/// Join a list for display inside a prompt
fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the user prompt for a safety check.
///
/// `subjects` holds the medications (interaction checks) or allergens
/// (allergen checks); it is ignored for recalls.
#[must_use]
pub fn safety_prompt(domain: AlertDomain, food_items: &[String], subjects: &[String]) -> String {
    let fields = domain.field_names();
    let alert_types = domain.alert_types().join("\", \"");

    let question = match domain {
        AlertDomain::Recall => {
            "Are there any active or recent (last 12 months) recalls or public health alerts for these foods?".to_owned()
        }
        AlertDomain::Interaction => format!(
            "Are there any known interactions between these foods and the following medications?\n{}",
            bullet_list(subjects)
        ),
        AlertDomain::Allergen => format!(
            "Are there any current undeclared-allergen alerts or cross-contact warnings for these foods \
             that matter to someone allergic to the following?\n{}",
            bullet_list(subjects)
        ),
    };

    format!(
        "Foods:\n{foods}\n\n{question}\n\n\
         Respond with a JSON object with exactly these fields:\n\
         - \"{flag}\": boolean\n\
         - \"{narrative}\": string, what you found\n\
         - \"{affected}\": array of strings\n\
         - \"alert_type\": one of \"{alert_types}\", or null when the flag is false\n\
         - \"alert_severity\": one of \"low\", \"moderate\", \"high\", \"critical\", or null when the flag is false\n\
         - \"recommended_action\": string, or null when the flag is false",
        foods = bullet_list(food_items),
        flag = fields.flag,
        narrative = fields.narrative,
        affected = fields.affected,
    )
}

/// Build the user prompt for matching meal ingredients against the pantry
#[must_use]
pub fn pantry_match_prompt(ingredients: &[String], pantry: &[PantryItem]) -> String {
    let pantry_json: Vec<Value> = pantry
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "name": item.name,
                "quantity": item.quantity,
                "unit": item.unit,
            })
        })
        .collect();

    format!(
        "Meal ingredients:\n{ingredients}\n\nPantry items (JSON):\n{pantry}\n\n\
         Respond with {{\"matches\": [...]}} where each match is \
         {{\"ingredient\": string, \"pantry_item_id\": string, \"quantity_used\": number in the pantry item's unit, \
         \"confidence\": number between 0 and 1}}. Leave out ingredients with no pantry match.",
        ingredients = bullet_list(ingredients),
        pantry = Value::Array(pantry_json),
    )
}

/// Build the user prompt for receipt extraction.
///
/// With no `receipt_text` the receipt is expected as an attached image.
#[must_use]
pub fn receipt_prompt(receipt_text: Option<&str>, today: NaiveDate) -> String {
    let source = receipt_text.map_or_else(
        || "Read the attached receipt image.".to_owned(),
        |text| format!("Receipt text:\n{text}"),
    );
    format!(
        "{source}\n\nToday is {today}. Respond with {{\"purchase_date\": \"YYYY-MM-DD\" or null, \
         \"store\": string or null, \"items\": [{{\"name\": string, \"quantity\": number, \
         \"unit\": string or null, \"price\": number or null}}]}}."
    )
}

/// Build the prompt for an expiring-pantry reminder
#[must_use]
pub fn expiring_pantry_prompt(items: &[PantryItem], today: NaiveDate) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            let expires = item
                .expires_on
                .map_or_else(|| "unknown".to_owned(), |date| date.to_string());
            let unit = item.unit.as_deref().unwrap_or("");
            format!("{} ({} {unit}), expires {expires}", item.name, item.quantity)
        })
        .collect();
    format!(
        "Today is {today}. These pantry items expire soon:\n{}\n\n\
         Write a reminder that names the items and suggests using them in a meal. \
         Respond with {{\"title\": string, \"body\": string}}.",
        bullet_list(&lines)
    )
}

/// Build the prompt for the weekly meal digest
#[must_use]
pub fn weekly_digest_prompt(meals: &[Value]) -> String {
    format!(
        "Here are the meals the user logged this week (JSON):\n{}\n\n\
         Write an encouraging weekly summary mentioning one pattern you notice. \
         Respond with {{\"title\": string, \"body\": string}}.",
        Value::Array(meals.to_vec())
    )
}
