//! # Model Server Routes
//!
//! File: cli/src/commands/llm/routes.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! - `POST /chat`: validate the message, wrap it in the instruction prompt,
//!   run the model on a blocking worker, reply with `{"reply": "..."}`
//! - `GET /health`: liveness plus whether a model is loaded
//!
//! A server whose model failed to load keeps running and answers every chat
//! with a 500 carrying the load failure.
//!
use crate::assistant::{identity, ChatRequest};
use crate::common::http::{require_message, with_middleware};
use crate::core::error::KtmError;
use crate::llm::{prompt::instruct_prompt, CompletionModel, GenerationParams};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// The model behind the server, or why there is none.
#[derive(Clone)]
pub enum ModelSlot {
    Loaded(Arc<dyn CompletionModel>),
    Unavailable(String),
}

impl ModelSlot {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }
}

#[derive(Clone)]
pub struct LlmState {
    pub model: ModelSlot,
    pub system_prompt: Arc<str>,
    pub params: GenerationParams,
}

/// Successful body of `POST /chat`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReplyResponse {
    pub reply: String,
}

/// # Create Axum Application (`create_app`)
///
/// ## Arguments
///
/// * `state`: the model slot, system prompt and generation limits shared by all requests.
/// * `enable_cors`: adds permissive CORS headers when `true`.
///
/// ## Returns
///
/// A `Router` serving `POST /chat` and `GET /health`.
pub fn create_app(state: LlmState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state);
    with_middleware(router, enable_cors)
}

/// # Model Chat Handler (`chat`)
///
/// `POST /chat`: wraps the message in the instruction prompt and runs the
/// model on a blocking worker thread.
///
/// ## Returns
///
/// `200` with `{"reply": "..."}`, the generated text trimmed of surrounding whitespace.
///
/// ## Errors
///
/// * `KtmError::InvalidRequest` / `KtmError::EmptyMessage` (400): bad or blank message.
///   The model is not invoked.
/// * `KtmError::ModelUnavailable` (500): no model was loaded at startup.
/// * `KtmError::Generation` (500): the backend failed while generating.
/// * `KtmError::Internal` (500): the worker thread panicked or was cancelled.
async fn chat(
    State(state): State<LlmState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ReplyResponse>, KtmError> {
    let message = require_message(payload)?;

    let model = match &state.model {
        ModelSlot::Loaded(model) => Arc::clone(model),
        ModelSlot::Unavailable(reason) => return Err(KtmError::ModelUnavailable(reason.clone())),
    };

    let prompt = instruct_prompt(&state.system_prompt, &message);
    let params = state.params;
    let text = tokio::task::spawn_blocking(move || model.complete(&prompt, &params))
        .await
        .map_err(|e| KtmError::Internal(format!("inference task failed: {}", e)))??;

    info!("Generated a {} character reply", text.len());
    Ok(Json(ReplyResponse {
        reply: text.trim().to_string(),
    }))
}

/// GET /health
async fn health(State(state): State<LlmState>) -> Json<Value> {
    let model_name = match &state.model {
        ModelSlot::Loaded(model) => Some(model.name().to_string()),
        ModelSlot::Unavailable(_) => None,
    };
    Json(json!({
        "status": "healthy",
        "model_loaded": state.model.is_loaded(),
        "model": model_name,
        "timestamp": identity::timestamp(),
    }))
}
