// ABOUTME: Configuration module for centralized server settings
// ABOUTME: Re-exports the environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Configuration for the FoodLog FCP server.
//!
//! All settings come from environment variables; there is no configuration
//! file. See [`environment::ServerConfig::from_env`] for the variables read.

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, LlmConfig, SafetyConfig, SchedulerConfig, ServerConfig};
