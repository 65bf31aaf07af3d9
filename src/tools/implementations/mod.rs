// ABOUTME: Built-in tool implementations grouped by functional area
// ABOUTME: Each submodule exposes a create_*_tools function used by the registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

/// Notification listing
pub mod notifications;
/// Pantry deduction and listing
pub mod pantry;
/// Receipt parsing
pub mod receipts;
/// Recall, interaction, and allergen checks
pub mod safety;

pub use notifications::create_notification_tools;
pub use pantry::create_pantry_tools;
pub use receipts::create_receipt_tools;
pub use safety::create_safety_tools;
