// ABOUTME: Typed extraction of tool arguments from the JSON arguments object
// ABOUTME: Maps absent or mistyped values to ToolError so callers get consistent messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use serde_json::Value;

use crate::errors::{AppResult, ToolError};

/// Non-empty list of non-blank strings
///
/// # Errors
///
/// `MissingRequiredField` when absent, `InvalidInput` when not an array of
/// strings or when no non-blank entry remains
pub fn required_string_list(args: &Value, tool: &str, name: &str) -> AppResult<Vec<String>> {
    let value = args
        .get(name)
        .filter(|value| !value.is_null())
        .ok_or_else(|| ToolError::missing_parameter(tool, name))?;
    let list = string_list(value, tool, name)?;
    if list.is_empty() {
        return Err(ToolError::invalid_parameter(tool, name, "must contain at least one item").into());
    }
    Ok(list)
}

fn string_list(value: &Value, tool: &str, name: &str) -> AppResult<Vec<String>> {
    let Value::Array(entries) = value else {
        return Err(ToolError::invalid_parameter(tool, name, "expected an array of strings").into());
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Ok(trimmed.to_owned()))
            }
            _ => Some(Err(ToolError::invalid_parameter(
                tool,
                name,
                "expected an array of strings",
            )
            .into())),
        })
        .collect()
}

/// Optional boolean with a default
///
/// # Errors
///
/// `InvalidInput` when present but not a boolean
pub fn optional_bool(args: &Value, tool: &str, name: &str, default: bool) -> AppResult<bool> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(ToolError::invalid_parameter(tool, name, "expected a boolean").into()),
    }
}

/// Optional non-blank string
///
/// # Errors
///
/// `InvalidInput` when present but not a string
pub fn optional_str(args: &Value, tool: &str, name: &str) -> AppResult<Option<String>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_owned()))
        }
        Some(_) => Err(ToolError::invalid_parameter(tool, name, "expected a string").into()),
    }
}

/// Optional non-negative integer
///
/// # Errors
///
/// `InvalidInput` when present but not a non-negative integer
pub fn optional_usize(args: &Value, tool: &str, name: &str) -> AppResult<Option<usize>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|number| usize::try_from(number).ok())
            .map(Some)
            .ok_or_else(|| {
                ToolError::invalid_parameter(tool, name, "expected a non-negative integer").into()
            }),
    }
}
