// ABOUTME: Main library entry point for the Ayurvedic diet plan engine
// ABOUTME: Wires configuration, logging, stores, the external generator and plan orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Ayurdiet
//!
//! Generates personalized multi-day Ayurvedic meal plans for a patient.
//! The pure engine lives in `ayurdiet-intelligence`; this crate adds the
//! async shell around it.
//!
//! ## Pipeline
//!
//! 1. Load the patient profile and the active recipe corpus
//! 2. Compute daily nutrition requirements
//! 3. Hard-filter and score every recipe for suitability
//! 4. Ask the optional external generator for a plan, or assemble one
//!    deterministically
//! 5. Validate every recipe reference and rederive all nutrition totals
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ayurdiet::config::PlannerConfig;
//! use ayurdiet::errors::AppResult;
//! use ayurdiet::services::PlanGenerationService;
//! use ayurdiet::stores::MemoryStore;
//! use ayurdiet_core::models::PlanPreferences;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let service = PlanGenerationService::new(
//!         store.clone(),
//!         store.clone(),
//!         store,
//!         Arc::new(PlannerConfig::default()),
//!     );
//!
//!     let plan = service.generate("patient-1", &PlanPreferences::default()).await?;
//!     println!("{}: {} days", plan.plan_name, plan.duration);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// External plan generator seam and its LLM-backed implementation
pub mod generator;

/// LLM provider abstraction and the OpenAI-compatible client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain services orchestrating plan generation
pub mod services;

/// Collaborator traits and the in-memory store
pub mod stores;
