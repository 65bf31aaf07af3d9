// ABOUTME: Normalization of structured fields in LLM safety responses into stable shapes
// ABOUTME: Affected lists, severity/type enums, recommended actions, flag resolution, singleton unwrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Structured Field Normalization
//!
//! LLM JSON is loosely typed: lists arrive as bare strings, enums in random
//! casing, single objects wrapped in one-element arrays. These helpers coerce
//! each field to the nearest valid value and never fail.

use foodlog_core::constants::limits::MAX_AFFECTED_ITEMS;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::safety::AlertDomain;

/// Severity reported for a safety alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational
    Low,
    /// Worth acting on
    Moderate,
    /// Act promptly
    High,
    /// Act immediately
    Critical,
}

impl AlertSeverity {
    /// Parse a severity, case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field names a safety domain uses in LLM output and tool responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyFieldNames {
    /// Narrative text field
    pub narrative: &'static str,
    /// Structured boolean field
    pub flag: &'static str,
    /// Affected products or medications
    pub affected: &'static str,
}

impl AlertDomain {
    /// Field names for this domain
    #[must_use]
    pub const fn field_names(self) -> SafetyFieldNames {
        match self {
            Self::Recall => SafetyFieldNames {
                narrative: "recall_info",
                flag: "has_active_recall",
                affected: "affected_products",
            },
            Self::Interaction => SafetyFieldNames {
                narrative: "interaction_info",
                flag: "has_interaction",
                affected: "affected_medications",
            },
            Self::Allergen => SafetyFieldNames {
                narrative: "allergen_alerts",
                flag: "has_alert",
                affected: "affected_products",
            },
        }
    }

    /// Accepted `alert_type` values for this domain
    #[must_use]
    pub const fn alert_types(self) -> &'static [&'static str] {
        match self {
            Self::Recall => &["recall", "outbreak", "public_health_alert"],
            Self::Interaction => &[
                "pharmacokinetic",
                "pharmacodynamic",
                "absorption",
                "contraindication",
            ],
            Self::Allergen => &[
                "undeclared_allergen",
                "cross_contamination",
                "mislabeling",
                "recall",
            ],
        }
    }
}

/// Coerce an affected products/medications field into trimmed, non-empty strings.
///
/// A bare string becomes a one-element list, array elements are stringified
/// and blank ones dropped, the result is capped at `MAX_AFFECTED_ITEMS`.
/// Any other JSON type yields an empty list.
#[must_use]
pub fn normalize_affected_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(item) => {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_owned()]
            }
        }
        Value::Array(items) => items
            .iter()
            .filter_map(stringify_element)
            .take(MAX_AFFECTED_ITEMS)
            .collect(),
        _ => Vec::new(),
    }
}

fn stringify_element(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_owned(),
        other => other.to_string().trim().to_owned(),
    };
    (!text.is_empty()).then_some(text)
}

/// Validate `alert_severity`; anything outside the enum becomes `None`
#[must_use]
pub fn normalize_alert_severity(value: &Value) -> Option<AlertSeverity> {
    value.as_str().and_then(AlertSeverity::parse)
}

/// Validate `alert_type` against the domain's enum
#[must_use]
pub fn normalize_alert_type(value: &Value, domain: AlertDomain) -> Option<&'static str> {
    let raw = value.as_str()?.trim().to_lowercase();
    domain
        .alert_types()
        .iter()
        .copied()
        .find(|allowed| *allowed == raw)
}

/// Collapse `recommended_action` into a single string.
///
/// Lists are joined with a space; non-string, non-list values are dropped.
#[must_use]
pub fn normalize_recommended_action(value: &Value) -> Option<String> {
    let joined = match value {
        Value::String(action) => action.trim().to_owned(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(stringify_element)
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    (!joined.is_empty()).then_some(joined)
}

/// Read a structured boolean, accepting `"true"`/`"false"` strings
#[must_use]
pub fn structured_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(raw) => match raw.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Unwrap an LLM payload that is either an object or a list holding one.
///
/// Objects deserialize directly; arrays use their first element when it is an
/// object. Every other shape, and any deserialization failure, yields
/// `default`.
pub fn unwrap_singleton_or_default<T: DeserializeOwned>(value: Value, default: T) -> T {
    let candidate = match value {
        Value::Object(_) => value,
        Value::Array(items) => match items.into_iter().next() {
            Some(first @ Value::Object(_)) => first,
            _ => return default,
        },
        _ => return default,
    };
    serde_json::from_value(candidate).unwrap_or(default)
}

/// Where the resolved alert flag came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagSource {
    /// The LLM's structured boolean
    Structured,
    /// The narrative classifier
    Classifier,
    /// Neither was available
    Default,
}

/// Normalized safety check result for one domain
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyReport {
    /// Domain the report belongs to
    pub domain: AlertDomain,
    /// Narrative text, empty when absent
    pub narrative: String,
    /// Whether an alert is active
    pub is_active: bool,
    /// Where `is_active` came from
    pub flag_source: FlagSource,
    /// Affected products or medications
    pub affected: Vec<String>,
    /// Validated alert type
    pub alert_type: Option<&'static str>,
    /// Validated severity
    pub alert_severity: Option<AlertSeverity>,
    /// Recommended action as one string
    pub recommended_action: Option<String>,
    /// Grounding citations, passed through unchanged
    pub sources: Vec<Value>,
}

impl SafetyReport {
    /// Render with the domain's field names
    #[must_use]
    pub fn to_json(&self) -> Value {
        let names = self.domain.field_names();
        let mut body = Map::new();
        body.insert(names.narrative.to_owned(), Value::from(self.narrative.clone()));
        body.insert(names.flag.to_owned(), Value::Bool(self.is_active));
        body.insert(names.affected.to_owned(), Value::from(self.affected.clone()));
        body.insert(
            "alert_type".to_owned(),
            self.alert_type.map_or(Value::Null, Value::from),
        );
        body.insert(
            "alert_severity".to_owned(),
            self.alert_severity
                .map_or(Value::Null, |severity| Value::from(severity.as_str())),
        );
        body.insert(
            "recommended_action".to_owned(),
            self.recommended_action
                .clone()
                .map_or(Value::Null, Value::from),
        );
        body.insert("sources".to_owned(), Value::Array(self.sources.clone()));
        Value::Object(body)
    }
}

static NULL: Value = Value::Null;

fn field_or_null<'a>(data: &'a Value, name: &str) -> &'a Value {
    data.get(name).unwrap_or(&NULL)
}

/// Merge an LLM `data` object into a [`SafetyReport`].
///
/// The structured flag wins when present. Otherwise a warning names the
/// missing field and the narrative classifier decides, or `false` when the
/// narrative is empty.
#[must_use]
pub fn normalize_safety_response(
    domain: AlertDomain,
    data: &Value,
    sources: Vec<Value>,
) -> SafetyReport {
    let names = domain.field_names();
    let field = |name: &str| field_or_null(data, name);

    let narrative = field(names.narrative)
        .as_str()
        .map(str::to_owned)
        .unwrap_or_default();

    let (is_active, flag_source) = match structured_flag(field(names.flag)) {
        Some(flag) => (flag, FlagSource::Structured),
        None => {
            warn!(
                domain = domain.as_str(),
                field = names.flag,
                "LLM response missing field {}, defaulting to False unless the narrative says otherwise",
                names.flag
            );
            if narrative.trim().is_empty() {
                (false, FlagSource::Default)
            } else {
                (domain.classify(&narrative), FlagSource::Classifier)
            }
        }
    };

    SafetyReport {
        domain,
        narrative,
        is_active,
        flag_source,
        affected: normalize_affected_list(field(names.affected)),
        alert_type: normalize_alert_type(field("alert_type"), domain),
        alert_severity: normalize_alert_severity(field("alert_severity")),
        recommended_action: normalize_recommended_action(field("recommended_action")),
        sources,
    }
}
