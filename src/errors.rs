// ABOUTME: Error types for the plan generation service
// ABOUTME: Re-exports the unified AppError system from ayurdiet-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `ayurdiet-core` so the engine crates share them;
//! this module re-exports them for the service layer.

pub use ayurdiet_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails,
};
