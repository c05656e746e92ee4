//! # KTM HTTP Helpers (`common::http`)
//!
//! File: cli/src/common/http/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Request handling shared by both chat servers:
//! - `require_message`: turns the raw JSON extractor result into a trimmed,
//!   non-empty message or the matching 400 error
//! - `with_middleware`: request tracing plus optional permissive CORS
//!
use crate::assistant::ChatRequest;
use crate::core::error::KtmError;
use axum::{extract::rejection::JsonRejection, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, Level};

/// Validates a chat body.
///
/// * Not JSON, not an object, or no string `message` → `KtmError::InvalidRequest`
/// * `message` empty after trimming → `KtmError::EmptyMessage`
///
/// Returns the trimmed message otherwise.
pub fn require_message(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<String, KtmError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Chat body rejected: {}", rejection.body_text());
        KtmError::InvalidRequest
    })?;
    let message = request.message.ok_or(KtmError::InvalidRequest)?;
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(KtmError::EmptyMessage);
    }
    Ok(trimmed.to_string())
}

/// Wraps `router` with request tracing and, when enabled, permissive CORS.
pub fn with_middleware(router: Router, enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router.layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_body(message: Option<&str>) -> Result<Json<ChatRequest>, JsonRejection> {
        Ok(Json(ChatRequest {
            message: message.map(str::to_string),
        }))
    }

    #[test]
    fn test_require_message_trims() {
        assert_eq!(require_message(ok_body(Some("  hi  "))).unwrap(), "hi");
    }

    #[test]
    fn test_require_message_empty_and_whitespace() {
        assert!(matches!(
            require_message(ok_body(Some(""))),
            Err(KtmError::EmptyMessage)
        ));
        assert!(matches!(
            require_message(ok_body(Some(" \t\n "))),
            Err(KtmError::EmptyMessage)
        ));
    }

    #[test]
    fn test_require_message_missing_field() {
        assert!(matches!(
            require_message(ok_body(None)),
            Err(KtmError::InvalidRequest)
        ));
    }
}
