// ABOUTME: Core types and constants for the Ayurdiet diet-plan engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ayurdiet Core
//!
//! Foundation crate providing shared types and constants for the Ayurdiet
//! diet-plan engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Nutrition constants and plan limits
//! - **models**: Patient profiles, recipe candidates, preferences, and plans

/// Unified error handling system with stable error kind tags
pub mod errors;

/// Nutrition constants and plan limits
pub mod constants;

/// Core data models (patients, recipes, preferences, plans)
pub mod models;
