// ABOUTME: In-memory DocumentStore backed by DashMap for single-process deployments and tests
// ABOUTME: Data lives for the lifetime of the process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use foodlog_intelligence::PantryItem;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::DocumentStore;
use crate::errors::{AppError, AppResult};

/// In-memory document store
///
/// `DashMap` shards its locks, so concurrent tool calls for different users
/// do not contend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pantries: DashMap<Uuid, Vec<PantryItem>>,
    documents: DashMap<(Uuid, String), Vec<Value>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_user_ids(&self) -> AppResult<Vec<Uuid>> {
        let mut users: BTreeSet<Uuid> = self.pantries.iter().map(|entry| *entry.key()).collect();
        users.extend(self.documents.iter().map(|entry| entry.key().0));
        Ok(users.into_iter().collect())
    }

    async fn get_pantry(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>> {
        Ok(self
            .pantries
            .get(&user_id)
            .map(|items| items.value().clone())
            .unwrap_or_default())
    }

    async fn put_pantry(&self, user_id: Uuid, items: Vec<PantryItem>) -> AppResult<()> {
        debug!(%user_id, items = items.len(), "Storing pantry");
        self.pantries.insert(user_id, items);
        Ok(())
    }

    async fn append_document(
        &self,
        user_id: Uuid,
        collection: &str,
        document: Value,
    ) -> AppResult<String> {
        let Value::Object(mut fields) = document else {
            return Err(AppError::invalid_input(format!(
                "Documents in '{collection}' must be JSON objects"
            )));
        };

        let id = Uuid::new_v4().to_string();
        fields.insert("id".to_owned(), Value::String(id.clone()));
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        self.documents
            .entry((user_id, collection.to_owned()))
            .or_default()
            .push(Value::Object(fields));
        debug!(%user_id, collection, %id, "Appended document");
        Ok(id)
    }

    async fn list_documents(
        &self,
        user_id: Uuid,
        collection: &str,
        limit: usize,
    ) -> AppResult<Vec<Value>> {
        Ok(self
            .documents
            .get(&(user_id, collection.to_owned()))
            .map(|docs| docs.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
