// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses LLM, scheduler, and safety settings from environment variables with safe fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Environment-based configuration management

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default Gemini model
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Default sampling temperature for JSON generation
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.2;

/// Default interval of the expiring-pantry job (6 hours)
pub const DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS: u64 = 21_600;

/// Default interval of the weekly digest job (7 days)
pub const DEFAULT_WEEKLY_DIGEST_INTERVAL_SECS: u64 = 604_800;

/// Default look-ahead for expiring pantry items
pub const DEFAULT_EXPIRING_WITHIN_DAYS: i64 = 3;

/// Longest accepted look-ahead for expiring items (one year)
pub const MAX_EXPIRING_WITHIN_DAYS: i64 = 366;

/// Longest accepted job interval (one year)
pub const MAX_JOB_INTERVAL_SECS: u64 = 31_622_400;

/// Default cap on narrative text kept from an LLM safety response
pub const DEFAULT_MAX_NARRATIVE_CHARS: usize = 8_000;

/// Environment type for logging and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// LLM provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key (`GEMINI_API_KEY`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether safety checks use Google Search grounding
    pub grounding: bool,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("grounding", &self.grounding)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_owned(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            grounding: true,
        }
    }
}

/// Notification scheduler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the server starts the scheduler
    pub enabled: bool,
    /// Interval between expiring-pantry runs
    pub expiring_pantry_interval: Duration,
    /// Interval between weekly digest runs
    pub weekly_digest_interval: Duration,
    /// Look-ahead window for expiring items, in days
    pub expiring_within_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expiring_pantry_interval: Duration::from_secs(DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS),
            weekly_digest_interval: Duration::from_secs(DEFAULT_WEEKLY_DIGEST_INTERVAL_SECS),
            expiring_within_days: DEFAULT_EXPIRING_WITHIN_DAYS,
        }
    }
}

/// Safety tool settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Narratives longer than this are truncated before classification
    pub max_narrative_chars: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_narrative_chars: DEFAULT_MAX_NARRATIVE_CHARS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// LLM provider settings
    pub llm: LlmConfig,
    /// Scheduler settings
    pub scheduler: SchedulerConfig,
    /// Safety tool settings
    pub safety: SafetyConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparsable values are logged and replaced by their defaults, so this
    /// never fails. A missing `GEMINI_API_KEY` is reported when the provider
    /// is built, not here.
    #[must_use]
    pub fn from_env() -> Self {
        info!("Loading configuration from environment variables");

        let temperature = parse_env("FOODLOG_LLM_TEMPERATURE", DEFAULT_LLM_TEMPERATURE);
        let temperature = if (0.0..=2.0).contains(&temperature) {
            temperature
        } else {
            warn!(
                temperature,
                "FOODLOG_LLM_TEMPERATURE out of range 0.0..=2.0, using default"
            );
            DEFAULT_LLM_TEMPERATURE
        };

        Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env_var_or("FOODLOG_LLM_MODEL", DEFAULT_LLM_MODEL),
                temperature,
                grounding: parse_env("FOODLOG_LLM_GROUNDING", true),
            },
            scheduler: SchedulerConfig {
                enabled: parse_env("FOODLOG_SCHEDULER_ENABLED", true),
                expiring_pantry_interval: Duration::from_secs(parse_positive_secs(
                    "FOODLOG_EXPIRING_PANTRY_INTERVAL_SECS",
                    DEFAULT_EXPIRING_PANTRY_INTERVAL_SECS,
                )),
                weekly_digest_interval: Duration::from_secs(parse_positive_secs(
                    "FOODLOG_WEEKLY_DIGEST_INTERVAL_SECS",
                    DEFAULT_WEEKLY_DIGEST_INTERVAL_SECS,
                )),
                expiring_within_days: parse_expiring_within_days(),
            },
            safety: SafetyConfig {
                max_narrative_chars: parse_env(
                    "FOODLOG_MAX_NARRATIVE_CHARS",
                    DEFAULT_MAX_NARRATIVE_CHARS,
                ),
            },
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FoodLog FCP Configuration:\n\
             - Environment: {}\n\
             - LLM Model: {}\n\
             - LLM API Key: {}\n\
             - LLM Temperature: {}\n\
             - Search Grounding: {}\n\
             - Scheduler: {}\n\
             - Expiring Pantry Interval: {}s\n\
             - Weekly Digest Interval: {}s\n\
             - Expiring Within: {} days\n\
             - Max Narrative Chars: {}",
            self.environment,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.llm.temperature,
            if self.llm.grounding {
                "Enabled"
            } else {
                "Disabled"
            },
            if self.scheduler.enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.scheduler.expiring_pantry_interval.as_secs(),
            self.scheduler.weekly_digest_interval.as_secs(),
            self.scheduler.expiring_within_days,
            self.safety.max_narrative_chars,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` with a warning
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value '{raw}', using default {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Parse an interval in seconds within `1..=MAX_JOB_INTERVAL_SECS`.
/// Zero panics tokio intervals; huge values overflow `Instant`.
fn parse_positive_secs(key: &str, default: u64) -> u64 {
    let secs = parse_env(key, default);
    if secs == 0 {
        warn!("{key} must be greater than zero, using default {default}");
        return default;
    }
    if secs > MAX_JOB_INTERVAL_SECS {
        warn!("{key} value {secs} exceeds {MAX_JOB_INTERVAL_SECS}, capping");
        return MAX_JOB_INTERVAL_SECS;
    }
    secs
}

/// Look-ahead in days, clamped to `0..=MAX_EXPIRING_WITHIN_DAYS`
fn parse_expiring_within_days() -> i64 {
    const KEY: &str = "FOODLOG_EXPIRING_WITHIN_DAYS";
    let days = parse_env(KEY, DEFAULT_EXPIRING_WITHIN_DAYS);
    let clamped = days.clamp(0, MAX_EXPIRING_WITHIN_DAYS);
    if clamped != days {
        warn!("{KEY} value {days} outside 0..={MAX_EXPIRING_WITHIN_DAYS}, using {clamped}");
    }
    clamped
}
