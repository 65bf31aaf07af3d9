// ABOUTME: Notification copy generation for scheduler jobs
// ABOUTME: The LLM-backed generator prompts for a title and body and normalizes the answer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use foodlog_intelligence::{unwrap_singleton_or_default, PantryItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JobKind;
use crate::errors::AppResult;
use crate::llm::prompts::{
    expiring_pantry_prompt, weekly_digest_prompt, NOTIFICATION_SYSTEM_PROMPT,
};
use crate::llm::{JsonRequest, LlmProvider};

/// A notification ready to be stored for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Job that produced it
    pub kind: JobKind,
    /// Short headline
    pub title: String,
    /// Message body
    pub body: String,
}

/// Produces notification copy for scheduler jobs.
///
/// Returning `Ok(None)` means there is nothing worth sending.
#[async_trait]
pub trait NotificationGenerator: Send + Sync {
    /// Reminder about pantry items that expire soon
    async fn expiring_pantry(
        &self,
        items: &[PantryItem],
        today: NaiveDate,
    ) -> AppResult<Option<Notification>>;

    /// Summary of the meals logged during the past week
    async fn weekly_digest(&self, meals: &[Value]) -> AppResult<Option<Notification>>;
}

#[derive(Debug, Default, Deserialize)]
struct NotificationDraft {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

impl NotificationDraft {
    /// Trim both fields; a missing title falls back, a missing body drops the notification
    fn finish(self, kind: JobKind) -> Option<Notification> {
        let body = self
            .body
            .map(|body| body.trim().to_owned())
            .filter(|body| !body.is_empty())?;
        let title = self
            .title
            .map(|title| title.trim().to_owned())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| kind.default_title().to_owned());
        Some(Notification { kind, title, body })
    }
}

/// Generator that asks the LLM for notification copy
pub struct LlmNotificationGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl LlmNotificationGenerator {
    /// Create a generator backed by `llm`
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    async fn generate(&self, kind: JobKind, prompt: String) -> AppResult<Option<Notification>> {
        let request = JsonRequest::new(prompt).with_system_instruction(NOTIFICATION_SYSTEM_PROMPT);
        let response = self.llm.generate_json(&request).await?;
        Ok(unwrap_singleton_or_default(response.data, NotificationDraft::default()).finish(kind))
    }
}

#[async_trait]
impl NotificationGenerator for LlmNotificationGenerator {
    async fn expiring_pantry(
        &self,
        items: &[PantryItem],
        today: NaiveDate,
    ) -> AppResult<Option<Notification>> {
        if items.is_empty() {
            return Ok(None);
        }
        self.generate(JobKind::ExpiringPantry, expiring_pantry_prompt(items, today))
            .await
    }

    async fn weekly_digest(&self, meals: &[Value]) -> AppResult<Option<Notification>> {
        if meals.is_empty() {
            return Ok(None);
        }
        self.generate(JobKind::WeeklyDigest, weekly_digest_prompt(meals))
            .await
    }
}
