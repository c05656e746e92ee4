//! # KTM Error Types
//!
//! File: cli/src/core/error.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! This module defines the error types used throughout the KTM Assistant
//! binary. There are two layers:
//! - `KtmError`: a `thiserror` enum of the failures the assistant knows how to
//!   describe, including how each one maps to an HTTP status.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by the application
//!   plumbing (config loading, server startup) where context matters more than
//!   the concrete type.
//!
//! Request handlers return `KtmError` directly; it implements axum's
//! `IntoResponse`, so every failure reaches the client as
//! `{"error": "...", "status": "error"}` with the mapped status code.
//!
//! ## Examples
//!
//! ```rust
//! // Reject an empty chat message
//! if message.trim().is_empty() {
//!     return Err(KtmError::EmptyMessage);
//! }
//!
//! // Surface a configuration problem during startup
//! return Err(anyhow!(KtmError::Config("temperature must be within 0.0..=2.0".into())));
//! ```
//!
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Custom error type for the KTM Assistant.
#[derive(Error, Debug)]
pub enum KtmError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request body was not JSON or had no string `message` field.
    #[error("Invalid request format. Please provide a message field.")]
    InvalidRequest,

    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl KtmError {
    /// HTTP status reported when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KtmError::InvalidRequest | KtmError::EmptyMessage => StatusCode::BAD_REQUEST,
            KtmError::Config(_)
            | KtmError::ModelUnavailable(_)
            | KtmError::Generation(_)
            | KtmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body sent with every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: &'static str,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: "error",
        }
    }
}

impl IntoResponse for KtmError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Type alias for Result using anyhow::Error for application plumbing.
pub type Result<T> = anyhow::Result<T>;
