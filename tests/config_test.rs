// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use foodlog_fcp::config::environment::{
    DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS, DEFAULT_LLM_MODEL, DEFAULT_LLM_TEMPERATURE,
    MAX_EXPIRING_WITHIN_DAYS, MAX_JOB_INTERVAL_SECS,
};
use foodlog_fcp::config::{Environment, ServerConfig};
use serial_test::serial;

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "GEMINI_API_KEY",
    "FOODLOG_LLM_MODEL",
    "FOODLOG_LLM_TEMPERATURE",
    "FOODLOG_LLM_GROUNDING",
    "FOODLOG_SCHEDULER_ENABLED",
    "FOODLOG_EXPIRING_PANTRY_INTERVAL_SECS",
    "FOODLOG_WEEKLY_DIGEST_INTERVAL_SECS",
    "FOODLOG_EXPIRING_WITHIN_DAYS",
    "FOODLOG_MAX_NARRATIVE_CHARS",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_vars();
    let config = ServerConfig::from_env();

    assert_eq!(config.environment, Environment::Development);
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
    assert!((config.llm.temperature - DEFAULT_LLM_TEMPERATURE).abs() < f32::EPSILON);
    assert!(config.llm.grounding);
    assert!(config.scheduler.enabled);
    assert_eq!(
        config.scheduler.expiring_pantry_interval,
        Duration::from_secs(DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS)
    );
    assert_eq!(config.scheduler.expiring_within_days, 3);
}

#[test]
#[serial]
fn test_values_read_from_environment() {
    clear_vars();
    env::set_var("ENVIRONMENT", "prod");
    env::set_var("GEMINI_API_KEY", "secret-key");
    env::set_var("FOODLOG_LLM_MODEL", "gemini-2.5-pro");
    env::set_var("FOODLOG_LLM_TEMPERATURE", "0.7");
    env::set_var("FOODLOG_LLM_GROUNDING", "false");
    env::set_var("FOODLOG_SCHEDULER_ENABLED", "false");
    env::set_var("FOODLOG_WEEKLY_DIGEST_INTERVAL_SECS", "60");
    env::set_var("FOODLOG_MAX_NARRATIVE_CHARS", "500");

    let config = ServerConfig::from_env();
    clear_vars();

    assert!(config.environment.is_production());
    assert_eq!(config.llm.api_key.as_deref(), Some("secret-key"));
    assert_eq!(config.llm.model, "gemini-2.5-pro");
    assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
    assert!(!config.llm.grounding);
    assert!(!config.scheduler.enabled);
    assert_eq!(config.scheduler.weekly_digest_interval, Duration::from_secs(60));
    assert_eq!(config.safety.max_narrative_chars, 500);
}

#[test]
#[serial]
fn test_invalid_values_fall_back_to_defaults() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "   ");
    env::set_var("FOODLOG_LLM_TEMPERATURE", "5.0");
    env::set_var("FOODLOG_LLM_GROUNDING", "sometimes");
    env::set_var("FOODLOG_EXPIRING_PANTRY_INTERVAL_SECS", "0");
    env::set_var("FOODLOG_EXPIRING_WITHIN_DAYS", "-4");

    let config = ServerConfig::from_env();
    clear_vars();

    assert!(config.llm.api_key.is_none());
    assert!((config.llm.temperature - DEFAULT_LLM_TEMPERATURE).abs() < f32::EPSILON);
    assert!(config.llm.grounding);
    assert_eq!(
        config.scheduler.expiring_pantry_interval,
        Duration::from_secs(DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS)
    );
    assert_eq!(config.scheduler.expiring_within_days, 0);
}

#[test]
#[serial]
fn test_summary_and_debug_hide_api_key() {
    clear_vars();
    env::set_var("GEMINI_API_KEY", "super-secret");
    let config = ServerConfig::from_env();
    clear_vars();

    let summary = config.summary();
    assert!(summary.contains("LLM API Key: Configured"));
    assert!(!summary.contains("super-secret"));
    assert!(!format!("{config:?}").contains("super-secret"));

    let missing = ServerConfig::default().summary();
    assert!(missing.contains("LLM API Key: Missing"));
}

#[test]
#[serial]
fn test_oversized_values_are_capped() {
    clear_vars();
    env::set_var("FOODLOG_EXPIRING_WITHIN_DAYS", "1000000000");
    env::set_var("FOODLOG_WEEKLY_DIGEST_INTERVAL_SECS", "18446744073709551615");
    env::set_var("FOODLOG_EXPIRING_PANTRY_INTERVAL_SECS", "99999999999");

    let config = ServerConfig::from_env();
    clear_vars();

    assert_eq!(config.scheduler.expiring_within_days, MAX_EXPIRING_WITHIN_DAYS);
    assert_eq!(
        config.scheduler.weekly_digest_interval,
        Duration::from_secs(MAX_JOB_INTERVAL_SECS)
    );
    assert_eq!(
        config.scheduler.expiring_pantry_interval,
        Duration::from_secs(MAX_JOB_INTERVAL_SECS)
    );
}

#[test]
fn test_environment_parsing() {
    assert_eq!(Environment::from_str_or_default("TEST"), Environment::Testing);
    assert_eq!(Environment::from_str_or_default("production"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    assert_eq!(Environment::Testing.to_string(), "testing");
}
