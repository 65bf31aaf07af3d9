// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Tool identifiers, service names, collection names, and numeric limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! Application constants grouped by domain.

/// Tool identifiers exposed over the tool-call interface
pub mod tools;

pub use tools::*;

/// Service names used in structured logging
pub mod service_names {
    /// Main server service name
    pub const FOODLOG_FCP_SERVER: &str = "foodlog-fcp-server";
}

/// Document store collection names
pub mod collections {
    /// Persisted safety reports (recall, interaction, allergen)
    pub const SAFETY_CHECKS: &str = "safety_checks";
    /// Logged meals
    pub const MEALS: &str = "meals";
    /// Parsed receipts
    pub const RECEIPTS: &str = "receipts";
    /// Generated notifications
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Numeric limits shared by tools and normalizers
pub mod limits {
    /// Maximum entries kept in an affected products/medications list
    pub const MAX_AFFECTED_ITEMS: usize = 50;
    /// Maximum line items kept from a single receipt
    pub const MAX_RECEIPT_ITEMS: usize = 200;
    /// Maximum food items accepted by one safety check
    pub const MAX_SAFETY_FOOD_ITEMS: usize = 25;
    /// Default page size for document listings
    pub const DEFAULT_LIST_LIMIT: usize = 20;
    /// Upper bound for document listings
    pub const MAX_LIST_LIMIT: usize = 100;
}
