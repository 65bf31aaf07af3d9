// ABOUTME: Line-delimited JSON tool-call loop over stdin/stdout
// ABOUTME: Parses one request per line, dispatches through the registry, writes one response per line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Tool Call Server
//!
//! Request, one per line:
//!
//! ```json
//! {"id": 1, "tool": "check_food_recalls", "arguments": {"food_items": ["spinach"]}, "user_id": "..."}
//! ```
//!
//! Response, one per line, in request order:
//!
//! ```json
//! {"id": 1, "result": {...}}
//! {"id": 1, "error": {"code": "INVALID_INPUT", "message": "..."}}
//! ```
//!
//! The `list_tools` request needs no `user_id` and returns every tool schema.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use crate::resources::ServerResources;
use crate::tools::{ToolExecutionContext, ToolRegistry};

/// Pseudo-tool returning the registry's schemas
pub const LIST_TOOLS: &str = "list_tools";

/// One request line
#[derive(Debug, Deserialize)]
struct ToolCallRequest {
    #[serde(default)]
    id: Value,
    tool: String,
    #[serde(default)]
    arguments: Value,
    #[serde(default)]
    user_id: Option<Uuid>,
}

/// Dispatches tool calls read from a line-oriented stream
pub struct ToolCallServer {
    registry: Arc<ToolRegistry>,
    resources: Arc<ServerResources>,
}

impl ToolCallServer {
    /// Create a server over a built registry
    #[must_use]
    pub const fn new(registry: Arc<ToolRegistry>, resources: Arc<ServerResources>) -> Self {
        Self {
            registry,
            resources,
        }
    }

    fn error_line(id: &Value, error: AppError) -> Value {
        let error = if id.is_null() {
            error
        } else {
            let request_id = id.as_str().map_or_else(|| id.to_string(), str::to_owned);
            error.with_request_id(request_id)
        };
        json!({ "id": id, "error": ErrorResponse::from(error).error })
    }

    async fn dispatch(&self, request: ToolCallRequest) -> AppResult<Value> {
        if request.tool == LIST_TOOLS {
            return Ok(json!({ "tools": self.registry.list_schemas() }));
        }

        let user_id = request
            .user_id
            .ok_or_else(|| AppError::missing_field("user_id"))?;
        let arguments = if request.arguments.is_null() {
            json!({})
        } else {
            request.arguments
        };
        if !arguments.is_object() {
            return Err(AppError::new(
                ErrorCode::InvalidFormat,
                "arguments must be a JSON object",
            ));
        }

        let context = ToolExecutionContext::new(user_id, self.resources.clone())
            .with_request_id(request.id);
        let result = self
            .registry
            .execute(&request.tool, arguments, &context)
            .await?;
        Ok(result.content)
    }

    /// Handle one input line. Blank lines produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: ToolCallRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid request line: {}", e);
                let error =
                    AppError::new(ErrorCode::InvalidFormat, format!("Invalid request: {e}"));
                return Some(Self::error_line(&Value::Null, error));
            }
        };

        let id = request.id.clone();
        let tool = request.tool.clone();
        debug!(tool = %tool, id = %id, "Handling tool call");

        Some(match self.dispatch(request).await {
            Ok(result) => json!({ "id": id, "result": result }),
            Err(error) => {
                warn!(
                    tool = %tool,
                    id = %id,
                    code = ?error.code,
                    "Tool call failed: {}",
                    error.message
                );
                Self::error_line(&id, error)
            }
        })
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when reading or writing the stream fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read request: {e}")))?
        {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer
                .write_all(&encoded)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write response: {e}")))?;
            writer
                .flush()
                .await
                .map_err(|e| AppError::internal(format!("Failed to flush response: {e}")))?;
        }
        info!("Input closed, tool call loop finished");
        Ok(())
    }

    /// Serve on the process's stdin and stdout
    ///
    /// # Errors
    ///
    /// Returns `InternalError` on stdio failures
    pub async fn serve_stdio(&self) -> AppResult<()> {
        info!("Tool call server ready - listening on stdin/stdout");
        self.serve(BufReader::new(stdin()), stdout()).await
    }
}
