// ABOUTME: Shared test helpers: a scripted LLM provider and resource builders
// ABOUTME: Lets tool and scheduler tests run without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use foodlog_fcp::config::ServerConfig;
use foodlog_fcp::errors::{AppError, AppResult};
use foodlog_fcp::llm::{JsonRequest, JsonResponse, LlmCapabilities, LlmProvider};
use foodlog_fcp::resources::ServerResources;
use foodlog_fcp::store::InMemoryStore;
use foodlog_fcp::tools::ToolExecutionContext;
use serde_json::Value;
use uuid::Uuid;

/// LLM provider that replays queued answers and records every request
pub struct StubLlm {
    responses: Mutex<VecDeque<AppResult<JsonResponse>>>,
    requests: Mutex<Vec<JsonRequest>>,
    capabilities: LlmCapabilities,
}

impl StubLlm {
    pub fn new() -> Self {
        Self::with_capabilities(LlmCapabilities::all())
    }

    pub fn with_capabilities(capabilities: LlmCapabilities) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            capabilities,
        }
    }

    /// Queue a successful answer
    pub fn respond(&self, data: Value) {
        self.respond_with_sources(data, Vec::new());
    }

    /// Queue a successful answer with grounding citations
    pub fn respond_with_sources(&self, data: Value, sources: Vec<Value>) {
        self.responses.lock().unwrap().push_back(Ok(JsonResponse {
            data,
            sources,
            model: "stub-model".to_owned(),
        }));
    }

    /// Queue a failure
    pub fn fail(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<JsonRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    async fn generate_json(&self, request: &JsonRequest) -> AppResult<JsonResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::external_service("stub", "no response queued")))
    }
}

/// Everything a test needs to drive tools
pub struct TestEnv {
    pub llm: Arc<StubLlm>,
    pub store: Arc<InMemoryStore>,
    pub resources: Arc<ServerResources>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_parts(config, StubLlm::new())
    }

    pub fn with_parts(config: ServerConfig, llm: StubLlm) -> Self {
        let llm = Arc::new(llm);
        let store = Arc::new(InMemoryStore::new());
        let resources = Arc::new(ServerResources::new(config, llm.clone(), store.clone()));
        Self {
            llm,
            store,
            resources,
        }
    }

    pub fn context(&self, user_id: Uuid) -> ToolExecutionContext {
        ToolExecutionContext::new(user_id, self.resources.clone())
    }
}
