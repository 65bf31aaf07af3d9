// ABOUTME: Core types and constants for the FoodLog FCP backend
// ABOUTME: Foundation crate with error handling and application constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

#![deny(unsafe_code)]

//! # FoodLog Core
//!
//! Foundation crate shared by the algorithm crate and the server crate. It is
//! kept small so that it changes rarely.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, `ToolError`
//! - **constants**: tool identifiers, collection names, limits

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;
