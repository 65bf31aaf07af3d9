// ABOUTME: Tests for the receipt parsing tool and pantry merging
// ABOUTME: Scripted LLM output exercises date, item, and pantry normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use common::{StubLlm, TestEnv};
use foodlog_fcp::constants::collections;
use foodlog_fcp::config::ServerConfig;
use foodlog_fcp::errors::ErrorCode;
use foodlog_fcp::llm::LlmCapabilities;
use foodlog_fcp::store::DocumentStore;
use foodlog_fcp::tools::implementations::receipts::merge_into_pantry;
use foodlog_fcp::tools::ToolRegistry;
use foodlog_intelligence::{PantryItem, ReceiptItem};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_parse_receipt_text_and_stock_pantry() {
    let user_id = Uuid::new_v4();
    let env = TestEnv::new();
    env.store
        .put_pantry(
            user_id,
            vec![PantryItem {
                id: "p1".to_owned(),
                name: "Bananas".to_owned(),
                quantity: 2.0,
                unit: None,
                expires_on: None,
            }],
        )
        .await
        .unwrap();
    let registry = ToolRegistry::with_builtin_tools().unwrap();
    env.llm.respond(json!({
        "purchase_date": "2026-03-14",
        "store": "  Corner Market ",
        "items": [
            {"name": "bananas", "quantity": 6, "price": "1,50"},
            {"name": "Oat milk", "quantity": 0, "unit": "l", "price": 3.5},
            {"quantity": 1, "price": 9.99},
        ],
    }));

    let result = registry
        .execute(
            "parse_receipt",
            json!({"receipt_text": "CORNER MARKET\nBANANAS 1.50\nOAT MILK 3.50", "add_to_pantry": true}),
            &env.context(user_id),
        )
        .await
        .unwrap();
    let content = result.content;

    assert_eq!(content["purchase_date"], "2026-03-14");
    assert_eq!(content["store"], "Corner Market");
    assert_eq!(content["item_count"], 2);
    assert_eq!(content["items"][1]["quantity"], 1.0);
    assert_eq!(content["total"], 5.0);
    assert_eq!(content["pantry"], json!({"added": 1, "updated": 1}));
    assert!(content["receipt_id"].is_string());

    let pantry = env.store.get_pantry(user_id).await.unwrap();
    assert_eq!(pantry.len(), 2);
    assert_eq!(pantry[0].quantity, 8.0);
    assert_eq!(pantry[1].name, "Oat milk");

    let receipts = env
        .store
        .list_documents(user_id, collections::RECEIPTS, 10)
        .await
        .unwrap();
    assert_eq!(receipts.len(), 1);
}

#[tokio::test]
async fn test_image_receipt_is_forwarded_and_future_date_clamped() {
    let env = TestEnv::new();
    let registry = ToolRegistry::with_builtin_tools().unwrap();
    env.llm.respond(json!({
        "purchase_date": "2199-01-01",
        "items": [{"name": "Bread"}],
    }));

    let result = registry
        .execute(
            "parse_receipt",
            json!({"image_url": "https://example.com/receipt.jpg"}),
            &env.context(Uuid::new_v4()),
        )
        .await
        .unwrap();

    let today = Utc::now().date_naive().to_string();
    assert_eq!(result.content["purchase_date"], today);
    assert!(result.content["pantry"].is_null());

    let request = &env.llm.requests()[0];
    assert_eq!(
        request.image_url.as_deref(),
        Some("https://example.com/receipt.jpg")
    );
    assert!(request.prompt.contains("attached receipt image"));
}

#[tokio::test]
async fn test_receipt_requires_text_or_image() {
    let env = TestEnv::new();
    let registry = ToolRegistry::with_builtin_tools().unwrap();

    let error = registry
        .execute(
            "parse_receipt",
            json!({"receipt_text": "   "}),
            &env.context(Uuid::new_v4()),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(env.llm.call_count(), 0);
}

#[test]
fn test_merge_respects_units() {
    let mut pantry = vec![PantryItem {
        id: "p1".to_owned(),
        name: "Flour".to_owned(),
        quantity: 500.0,
        unit: Some("g".to_owned()),
        expires_on: None,
    }];
    let items = vec![
        ReceiptItem {
            name: "flour".to_owned(),
            quantity: 1000.0,
            unit: Some("G".to_owned()),
            price: None,
        },
        ReceiptItem {
            name: "Flour".to_owned(),
            quantity: 1.0,
            unit: Some("kg".to_owned()),
            price: None,
        },
    ];

    let summary = merge_into_pantry(&mut pantry, &items);

    assert_eq!(summary.added, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(pantry[0].quantity, 1500.0);
    assert_eq!(pantry[1].unit.as_deref(), Some("kg"));
}

#[tokio::test]
async fn test_image_rejected_when_provider_is_text_only() {
    let env = TestEnv::with_parts(
        ServerConfig::default(),
        StubLlm::with_capabilities(LlmCapabilities::JSON_MODE),
    );
    let registry = ToolRegistry::with_builtin_tools().unwrap();

    let error = registry
        .execute(
            "parse_receipt",
            json!({"image_url": "https://example.com/receipt.jpg"}),
            &env.context(Uuid::new_v4()),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.context.details["parameter"], "image_url");
    assert_eq!(env.llm.call_count(), 0);
}
