// ABOUTME: FoodLog FCP server binary serving line-delimited JSON tool calls on stdio
// ABOUTME: Loads configuration, wires resources, and runs the notification scheduler alongside
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # FoodLog FCP Server Binary
//!
//! Reads one tool call per line on stdin and writes one response per line on
//! stdout until stdin closes or Ctrl-C is received. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use foodlog_fcp::{
    config::ServerConfig,
    llm::{GeminiProvider, LlmProvider},
    logging,
    resources::ServerResources,
    scheduler::{LlmNotificationGenerator, NotificationScheduler},
    server::ToolCallServer,
    store::InMemoryStore,
    tools::ToolRegistry,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "foodlog-fcp-server")]
#[command(about = "FoodLog FCP - food safety, pantry, and receipt tools over stdio")]
pub struct Args {
    /// Do not start the notification scheduler
    #[arg(long)]
    no_scheduler: bool,

    /// Override the LLM model
    #[arg(long)]
    model: Option<String>,

    /// Disable Google Search grounding for safety checks
    #[arg(long)]
    no_grounding: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if args.no_grounding {
        config.llm.grounding = false;
    }
    if args.no_scheduler {
        config.scheduler.enabled = false;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_config(&config.llm)?);
    info!("LLM provider ready: {} ({})", llm.name(), llm.default_model());

    let scheduler_config = config.scheduler.clone();
    let resources = Arc::new(ServerResources::new(
        config,
        llm.clone(),
        Arc::new(InMemoryStore::new()),
    ));
    let registry = Arc::new(ToolRegistry::with_builtin_tools()?);

    let scheduler = NotificationScheduler::new(
        resources.clone(),
        Arc::new(LlmNotificationGenerator::new(llm)),
        scheduler_config.clone(),
    );
    if scheduler_config.enabled {
        scheduler.start().await?;
    } else {
        info!("Notification scheduler disabled");
    }

    let server = ToolCallServer::new(registry, resources);
    tokio::select! {
        served = server.serve_stdio() => {
            if let Err(e) = served {
                error!("Tool call loop failed: {}", e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    scheduler.stop().await;
    info!("FoodLog FCP server stopped");
    Ok(())
}
