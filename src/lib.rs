// ABOUTME: Main library entry point for the FoodLog FCP backend
// ABOUTME: Wires config, logging, LLM provider, document store, tools, and the notification scheduler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![deny(unsafe_code)]

//! # FoodLog FCP
//!
//! Food journaling backend exposing AI-assisted tools. A tool reads user data
//! from a document store, prompts a hosted LLM for JSON, normalizes that JSON
//! into a stable shape and optionally persists the result.
//!
//! ## Architecture
//!
//! - **`foodlog-core`**: errors and constants
//! - **`foodlog-intelligence`**: the safety classifier and the pure normalizers
//! - **this crate**: configuration, logging, the LLM and storage seams, tool
//!   registry and implementations, the notification scheduler, and the
//!   line-delimited JSON server loop
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use foodlog_fcp::config::ServerConfig;
//! use foodlog_fcp::llm::GeminiProvider;
//! use foodlog_fcp::resources::ServerResources;
//! use foodlog_fcp::store::InMemoryStore;
//! use foodlog_fcp::tools::ToolRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let llm = GeminiProvider::from_config(&config.llm)?;
//! let resources = Arc::new(ServerResources::new(
//!     config,
//!     Arc::new(llm),
//!     Arc::new(InMemoryStore::new()),
//! ));
//! let registry = ToolRegistry::with_builtin_tools()?;
//! # Ok(())
//! # }
//! ```

/// Error types shared with the foundation crate
pub use foodlog_core::errors;

/// Application constants shared with the foundation crate
pub use foodlog_core::constants;

/// Environment-based configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// LLM provider abstraction and the Gemini implementation
pub mod llm;

/// Per-user document storage
pub mod store;

/// Shared resource container handed to tools and background jobs
pub mod resources;

/// Tool trait, registry, and implementations
pub mod tools;

/// Background notification jobs
pub mod scheduler;

/// Line-delimited JSON tool-call loop
pub mod server;
