// ABOUTME: Errors raised while looking up, registering, or parsing arguments for tools
// ABOUTME: Converts into AppError with the tool and parameter attached as details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Tool registry and argument errors.
//!
//! Tool implementations return `AppResult`, so every `ToolError` converts
//! into an [`AppError`] and `?` works across the boundary.

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Failure tied to a single tool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("Tool '{tool}' not found")]
    NotFound {
        /// Requested tool
        tool: String,
    },
    /// An argument was present but unusable
    #[error("Invalid parameter '{parameter}' for tool '{tool}': {reason}")]
    InvalidParameter {
        /// Tool being called
        tool: String,
        /// Offending argument
        parameter: String,
        /// What was wrong with it
        reason: String,
    },
    /// A required argument was absent
    #[error("Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingParameter {
        /// Tool being called
        tool: String,
        /// Absent argument
        parameter: String,
    },
    /// The tool ran but could not produce a result
    #[error("Tool '{tool}' execution failed: {details}")]
    ExecutionFailed {
        /// Tool that failed
        tool: String,
        /// Failure description
        details: String,
    },
    /// A tool with this name was registered twice
    #[error("Tool '{tool}' is already registered")]
    AlreadyRegistered {
        /// Duplicate tool name
        tool: String,
    },
}

impl ToolError {
    /// Unknown tool
    #[must_use]
    pub fn not_found(tool: impl Into<String>) -> Self {
        Self::NotFound { tool: tool.into() }
    }

    /// Unusable argument
    #[must_use]
    pub fn invalid_parameter(
        tool: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool: tool.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Absent required argument
    #[must_use]
    pub fn missing_parameter(tool: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool: tool.into(),
            parameter: parameter.into(),
        }
    }

    /// Tool-level failure
    #[must_use]
    pub fn execution_failed(tool: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            details: details.into(),
        }
    }

    /// Duplicate registration
    #[must_use]
    pub fn already_registered(tool: impl Into<String>) -> Self {
        Self::AlreadyRegistered { tool: tool.into() }
    }

    /// Tool this error belongs to
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool }
            | Self::InvalidParameter { tool, .. }
            | Self::MissingParameter { tool, .. }
            | Self::ExecutionFailed { tool, .. }
            | Self::AlreadyRegistered { tool } => tool,
        }
    }

    /// Argument involved, for parameter errors
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { parameter, .. } | Self::MissingParameter { parameter, .. } => {
                Some(parameter)
            }
            Self::NotFound { .. } | Self::ExecutionFailed { .. } | Self::AlreadyRegistered { .. } => {
                None
            }
        }
    }

    /// Application error code
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::InvalidParameter { .. } => ErrorCode::InvalidInput,
            Self::MissingParameter { .. } => ErrorCode::MissingRequiredField,
            Self::ExecutionFailed { .. } => ErrorCode::InternalError,
            Self::AlreadyRegistered { .. } => ErrorCode::ResourceAlreadyExists,
        }
    }
}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let mut details = Map::new();
        details.insert("tool".to_owned(), json!(error.tool_name()));
        if let Some(parameter) = error.parameter() {
            details.insert("parameter".to_owned(), json!(parameter));
        }
        Self::new(error.code(), error.to_string()).with_details(Value::Object(details))
    }
}
