// ABOUTME: JSON Schema subset used to describe tool inputs to callers
// ABOUTME: Serialized as-is in tool listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tool description returned by tool listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Schema of the `arguments` object
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object` for tool inputs
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required property names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema from `(name, property)` pairs
    #[must_use]
    pub fn object(properties: Vec<(&str, PropertySchema)>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, property)| (name.to_owned(), property))
                    .collect(),
            ),
            required: (!required.is_empty())
                .then(|| required.iter().map(|name| (*name).to_owned()).collect()),
        }
    }

    /// Object schema without properties
    #[must_use]
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: None,
            required: None,
        }
    }
}

/// Schema of a single property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element schema for arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    /// Property of `property_type` with a description
    #[must_use]
    pub fn new(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
            items: None,
        }
    }

    /// Array of strings
    #[must_use]
    pub fn string_array(description: &str) -> Self {
        Self {
            items: Some(Box::new(Self {
                property_type: "string".to_owned(),
                description: None,
                items: None,
            })),
            ..Self::new("array", description)
        }
    }
}
