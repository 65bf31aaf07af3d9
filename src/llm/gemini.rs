// ABOUTME: Google Gemini provider producing JSON answers, optionally grounded in Google Search
// ABOUTME: Handles request building, image inlining, error mapping, and citation extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Gemini Provider
//!
//! Implementation of [`LlmProvider`] against the Generative Language API
//! `generateContent` endpoint.
//!
//! Gemini rejects JSON response mode when the Google Search tool is enabled,
//! so grounded requests rely on the prompt asking for JSON and on
//! [`parse_json_payload`] to recover it.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument};

use super::{parse_json_payload, JsonRequest, JsonResponse, LlmCapabilities, LlmProvider};
use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Service label used in error messages
const SERVICE: &str = "gemini";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inline_data", alias = "inlineData")]
        inline_data: InlineData,
    },
    /// Function calls, thoughts, and other parts this provider does not use
    Other(Value),
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mime_type", alias = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    default_temperature: f32,
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_MODEL.to_owned(),
            default_temperature: 0.2,
        }
    }

    /// Create a provider from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if no API key is configured
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "GEMINI_API_KEY environment variable not set",
            )
        })?;
        Ok(Self {
            default_model: config.model.clone(),
            default_temperature: config.temperature,
            ..Self::new(api_key)
        })
    }

    fn build_url(model: &str) -> String {
        format!("{API_BASE_URL}/models/{model}:generateContent")
    }

    /// Download an image and inline it as base64
    async fn fetch_image(&self, url: &str) -> AppResult<ContentPart> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::external_service("image", format!("fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::invalid_input(format!(
                "Image URL returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.starts_with("image/"))
            .unwrap_or("image/jpeg")
            .to_owned();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::external_service("image", format!("read failed: {e}")))?;

        Ok(ContentPart::InlineData {
            inline_data: InlineData {
                mime_type,
                data: STANDARD.encode(&bytes),
            },
        })
    }

    async fn build_request(&self, request: &JsonRequest) -> AppResult<GeminiRequest> {
        let mut parts = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];
        if let Some(url) = &request.image_url {
            parts.push(self.fetch_image(url).await?);
        }

        let system_instruction = request
            .system_instruction
            .as_ref()
            .map(|text| GeminiContent {
                role: None,
                parts: vec![ContentPart::Text { text: text.clone() }],
            });

        let (response_mime_type, tools) = if request.grounding {
            (None, vec![json!({"google_search": {}})])
        } else {
            (Some("application/json"), Vec::new())
        };

        Ok(GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts,
            }],
            system_instruction,
            generation_config: GenerationConfig {
                temperature: Some(request.temperature.unwrap_or(self.default_temperature)),
                response_mime_type,
                candidate_count: 1,
            },
            tools,
        })
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: &GeminiResponse) -> AppResult<String> {
        let text: String = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        ContentPart::Text { text } => Some(text.as_str()),
                        ContentPart::InlineData { .. } | ContentPart::Other(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::external_service(
                SERVICE,
                "No content in Gemini response",
            ));
        }
        Ok(text)
    }

    /// Collect web citations from grounding metadata, de-duplicated by URI
    fn extract_sources(response: &GeminiResponse) -> Vec<Value> {
        let Some(metadata) = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };

        let mut seen = Vec::new();
        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                let uri = web.uri.clone()?;
                if seen.contains(&uri) {
                    return None;
                }
                seen.push(uri.clone());
                Some(json!({"title": web.title.clone().unwrap_or_default(), "uri": uri}))
            })
            .collect()
    }

    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            StatusCode::SERVICE_UNAVAILABLE => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Gemini API unavailable: {message}"),
            ),
            _ => AppError::external_service(
                SERVICE,
                format!("API error ({}): {message}", status.as_u16()),
            ),
        }
    }

    /// Extract a user-friendly quota message from "Please retry in 6.40s." style errors
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        let seconds = message.find(RETRY_PREFIX).and_then(|pos| {
            let after = &message[pos + RETRY_PREFIX.len()..];
            let end = after.find('s')?;
            after[..end].parse::<f64>().ok()
        });
        match seconds {
            Some(seconds) => format!(
                "AI service quota exceeded. Please try again in {} seconds.",
                seconds.ceil() as u64
            ),
            None => "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::all()
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model), grounding = request.grounding))]
    async fn generate_json(&self, request: &JsonRequest) -> AppResult<JsonResponse> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let body = self.build_request(request).await?;

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(Self::build_url(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(SERVICE, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text)?;
        if let Some(api_error) = parsed.error {
            return Err(AppError::external_service(SERVICE, api_error.message));
        }

        let text = Self::extract_text(&parsed)?;
        let data = parse_json_payload(&text)?;
        let sources = Self::extract_sources(&parsed);

        debug!(sources = sources.len(), "Received JSON response from Gemini");

        Ok(JsonResponse {
            data,
            sources,
            model: model.to_owned(),
        })
    }
}
