// ABOUTME: Shared resource container handed to every tool execution and scheduler job
// ABOUTME: Holds configuration, the LLM provider, and the document store behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Server Resources
//!
//! Built once at startup and shared through `Arc<ServerResources>`.

use std::fmt;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::LlmProvider;
use crate::store::DocumentStore;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// LLM provider used by every AI-backed tool
    pub llm: Arc<dyn LlmProvider>,
    /// Persistence
    pub store: Arc<dyn DocumentStore>,
}

impl ServerResources {
    /// Bundle the shared resources
    #[must_use]
    pub fn new(
        config: ServerConfig,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            llm,
            store,
        }
    }
}

impl fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerResources")
            .field("config", &self.config)
            .field("llm", &self.llm.name())
            .finish_non_exhaustive()
    }
}
