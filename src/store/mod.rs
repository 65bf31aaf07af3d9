// ABOUTME: Document store abstraction for per-user pantries and append-only collections
// ABOUTME: Tools and scheduler jobs persist through this trait so storage can be swapped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Document Store
//!
//! Two kinds of data are kept per user:
//!
//! - the pantry, replaced as a whole after every deduction or receipt import
//! - append-only collections of JSON documents (`safety_checks`, `meals`,
//!   `receipts`, `notifications`)
//!
//! Appended documents are stamped with `id` and `created_at` by the store.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use foodlog_intelligence::PantryItem;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppResult;

/// Persistence seam shared by tools and the notification scheduler
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every user that has a pantry or at least one document
    async fn list_user_ids(&self) -> AppResult<Vec<Uuid>>;

    /// Current pantry of `user_id` (empty when none was stored)
    async fn get_pantry(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>>;

    /// Replace the pantry of `user_id`
    async fn put_pantry(&self, user_id: Uuid, items: Vec<PantryItem>) -> AppResult<()>;

    /// Append a JSON object to `collection` and return its generated id
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `document` is not a JSON object
    async fn append_document(
        &self,
        user_id: Uuid,
        collection: &str,
        document: Value,
    ) -> AppResult<String>;

    /// Up to `limit` documents from `collection`, newest first
    async fn list_documents(
        &self,
        user_id: Uuid,
        collection: &str,
        limit: usize,
    ) -> AppResult<Vec<Value>>;
}
