// ABOUTME: LLM provider abstraction for JSON-producing prompts with optional search grounding
// ABOUTME: Defines the provider contract, request/response types, and JSON payload extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # LLM Provider Interface
//!
//! Every tool talks to the model through [`LlmProvider::generate_json`]: a
//! prompt goes in, a parsed JSON value and any grounding citations come out.
//!
//! ## Example
//!
//! ```rust,no_run
//! use foodlog_fcp::llm::{JsonRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = JsonRequest::new("List three high-iron foods as a JSON array.")
//!         .with_temperature(0.2);
//!     let response = provider.generate_json(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult, ErrorCode};

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider can be forced to emit JSON
        const JSON_MODE = 0b0000_0001;
        /// Provider can ground answers in live web search
        const SEARCH_GROUNDING = 0b0000_0010;
        /// Provider accepts image input
        const VISION = 0b0000_0100;
        /// Provider supports system instructions
        const SYSTEM_MESSAGES = 0b0000_1000;
    }
}

impl LlmCapabilities {
    /// Check if search grounding is supported
    #[must_use]
    pub const fn supports_grounding(&self) -> bool {
        self.contains(Self::SEARCH_GROUNDING)
    }

    /// Check if image input is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A single JSON generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRequest {
    /// System instruction, if any
    pub system_instruction: Option<String>,
    /// User prompt
    pub prompt: String,
    /// Image to attach (receipt photos)
    pub image_url: Option<String>,
    /// Model override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Ground the answer in web search results
    pub grounding: bool,
}

impl JsonRequest {
    /// Create a request for `prompt`
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Set the system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Attach an image by URL
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Enable or disable search grounding
    #[must_use]
    pub const fn with_grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }
}

/// Parsed model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonResponse {
    /// The JSON payload the model produced
    pub data: Value,
    /// Grounding citations (`{"title", "uri"}` objects)
    pub sources: Vec<Value>,
    /// Model that answered
    pub model: String,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for JSON generation
///
/// Implementations must be cheap to share: tools and scheduler jobs hold the
/// provider behind an `Arc` and call it concurrently.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Default model to use if not specified in the request
    fn default_model(&self) -> &str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Run a prompt and parse the answer as JSON
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` for transport or API failures,
    /// `ExternalRateLimited` when the provider throttles, and
    /// `SerializationError` when the answer is not valid JSON
    async fn generate_json(&self, request: &JsonRequest) -> AppResult<JsonResponse>;
}

// ============================================================================
// JSON Payload Extraction
// ============================================================================

/// Strip a Markdown code fence (```` ```json ... ``` ````) around model output
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Locate the JSON payload inside model output.
///
/// Grounded answers cannot use JSON mode and sometimes wrap the object in
/// prose, so after fence stripping the span from the first `{`/`[` to the
/// last matching closer is taken.
#[must_use]
pub fn extract_json_payload(text: &str) -> &str {
    let unfenced = strip_code_fences(text);
    if unfenced.starts_with('{') || unfenced.starts_with('[') {
        return unfenced;
    }
    let Some(start) = unfenced.find(['{', '[']) else {
        return unfenced;
    };
    let closer = if unfenced[start..].starts_with('{') {
        '}'
    } else {
        ']'
    };
    unfenced
        .rfind(closer)
        .filter(|end| *end > start)
        .map_or(unfenced, |end| &unfenced[start..=end])
}

/// Parse model output into JSON
///
/// # Errors
///
/// Returns `SerializationError` when no valid JSON can be recovered
pub fn parse_json_payload(text: &str) -> AppResult<Value> {
    let payload = extract_json_payload(text);
    serde_json::from_str(payload).map_err(|e| {
        AppError::new(
            ErrorCode::SerializationError,
            format!("LLM returned invalid JSON: {e}"),
        )
        .with_source(e)
    })
}
