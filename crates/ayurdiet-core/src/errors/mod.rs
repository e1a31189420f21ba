// ABOUTME: Unified error handling with stable error kind tags and structured responses
// ABOUTME: Defines ErrorCode, AppError, ErrorContext and the serializable ErrorResponse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure of the plan engine surfaces as an [`AppError`] carrying a stable
//! [`ErrorCode`] (serialized as an upper-snake-case kind tag) and a human-readable
//! message. Callers map errors to transport responses through [`ErrorResponse`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Patient vital statistics are missing or non-positive
    #[serde(rename = "INVALID_PROFILE")]
    InvalidProfile = 3001,
    /// A meal slot has no candidate recipes after hard filtering
    #[serde(rename = "INSUFFICIENT_CANDIDATES")]
    InsufficientCandidates = 3002,

    // Resource Management (4000-4999)
    /// Requested patient, recipe or plan does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Generated plan referenced a recipe absent from the candidate pool
    #[serde(rename = "UNKNOWN_RECIPE_REFERENCE")]
    UnknownRecipeReference = 5000,
    /// External plan generator did not answer in time
    #[serde(rename = "EXTERNAL_GENERATOR_TIMEOUT")]
    ExternalGeneratorTimeout = 5001,
    /// External plan generator answered with unusable output
    #[serde(rename = "EXTERNAL_GENERATOR_MALFORMED")]
    ExternalGeneratorMalformed = 5002,
    /// External service transport or protocol failure
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5003,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Persistence collaborator failed
    #[serde(rename = "PERSISTENCE_ERROR")]
    PersistenceError = 9001,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 422 Unprocessable Entity
            Self::InvalidProfile | Self::InsufficientCandidates => 422,

            // 502 Bad Gateway
            Self::UnknownRecipeReference
            | Self::ExternalGeneratorMalformed
            | Self::ExternalServiceError => 502,

            // 504 Gateway Timeout
            Self::ExternalGeneratorTimeout => 504,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::InternalError
            | Self::PersistenceError
            | Self::SerializationError => 500,
        }
    }

    /// Stable kind tag, identical to the serialized form
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::InsufficientCandidates => "INSUFFICIENT_CANDIDATES",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::UnknownRecipeReference => "UNKNOWN_RECIPE_REFERENCE",
            Self::ExternalGeneratorTimeout => "EXTERNAL_GENERATOR_TIMEOUT",
            Self::ExternalGeneratorMalformed => "EXTERNAL_GENERATOR_MALFORMED",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::PersistenceError => "PERSISTENCE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidProfile => "The patient profile is missing required vital statistics",
            Self::InsufficientCandidates => "Not enough suitable recipes to build a plan",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::UnknownRecipeReference => "The generated plan referenced an unknown recipe",
            Self::ExternalGeneratorTimeout => "The plan generator did not respond in time",
            Self::ExternalGeneratorMalformed => "The plan generator returned malformed output",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::PersistenceError => "A storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the orchestrator recovers from this error by falling back to
    /// deterministic assembly
    #[must_use]
    pub const fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::UnknownRecipeReference
                | Self::ExternalGeneratorTimeout
                | Self::ExternalGeneratorMalformed
                | Self::ExternalServiceError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Resource ID if applicable (patient, plan, recipe)
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: Value,
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing or non-positive patient vital statistics
    #[must_use]
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProfile, message)
    }

    /// No candidate recipes left for a meal slot
    #[must_use]
    pub fn insufficient_candidates(slot: impl Into<String>) -> Self {
        let slot = slot.into();
        Self::new(
            ErrorCode::InsufficientCandidates,
            format!("No suitable recipes available for the {slot} slot"),
        )
        .with_details(json!({ "slot": slot }))
    }

    /// Generated plan referenced recipes absent from the candidate pool
    #[must_use]
    pub fn unknown_recipe_reference(missing: &[String]) -> Self {
        Self::new(
            ErrorCode::UnknownRecipeReference,
            format!("Plan references {} unknown recipe(s)", missing.len()),
        )
        .with_details(json!({ "missing_recipe_ids": missing }))
    }

    /// External generator timed out
    #[must_use]
    pub fn generator_timeout(timeout_secs: u64) -> Self {
        Self::new(
            ErrorCode::ExternalGeneratorTimeout,
            format!("No response within {timeout_secs}s"),
        )
    }

    /// External generator produced unusable output
    #[must_use]
    pub fn generator_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalGeneratorMalformed, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Persistence collaborator failure
    ///
    /// The message stays generic; the underlying cause is only kept as the
    /// error source for logging.
    #[must_use]
    pub fn persistence(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::new(ErrorCode::PersistenceError, "Storage operation failed").with_source(source)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload with stable kind tag and message
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error kind tag
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        // Persistence failures never leak collaborator details
        let details = if error.code == ErrorCode::PersistenceError {
            Value::Null
        } else {
            error.context.details
        };

        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details,
            },
        }
    }
}
