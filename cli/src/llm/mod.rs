//! # Local Language Model
//!
//! File: cli/src/llm/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! This module is the seam between the `ktm llm` server and whatever turns a
//! prompt into text. The server only sees the `CompletionModel` trait, so the
//! router can be exercised with a stub while production builds load a GGUF
//! model through llama.cpp.
//!
//! ## Architecture
//!
//! - `prompt`: the fixed instruction template wrapping system prompt and user text
//! - `llama` (feature `llama`): `LlamaCppModel`, the llama.cpp backend
//! - `pieces`: reassembles UTF-8 characters split across token pieces
//! - `ModelSettings`: file path, context size, thread count and generation defaults
//! - `load_model`: builds the configured backend once at startup
//!
//! Inference is synchronous and CPU bound. Callers run `complete` inside
//! `tokio::task::spawn_blocking`.
//!
//! ## Examples
//!
//! ```rust
//! let model = llm::load_model(&settings)?;
//! let prompt = llm::prompt::instruct_prompt(&settings.system_prompt, "What is Rust?");
//! let text = model.complete(&prompt, &settings.generation())?;
//! ```
//!
use crate::core::error::KtmError;
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "llama")]
pub mod llama;
#[cfg(any(feature = "llama", test))]
pub mod pieces;
pub mod prompt;

/// Model file loaded when neither `--model`, `KTM_MODEL_PATH` nor the config names one.
pub const DEFAULT_MODEL_PATH: &str = "openhermes-2.5-mistral-7b.Q4_K_M.gguf";
pub const DEFAULT_CONTEXT_SIZE: u32 = 4096;
pub const DEFAULT_THREADS: i32 = 4;
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are KTM Assistant, a custom AI assistant. Answer clearly, helpfully, and respectfully.";

/// Sampling limits for a single completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Resolved model configuration for `ktm llm`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub path: PathBuf,
    pub context_size: u32,
    pub threads: i32,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            context_size: DEFAULT_CONTEXT_SIZE,
            threads: DEFAULT_THREADS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelSettings {
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Anything that can complete a prompt. Implementations block the calling
/// thread for the duration of the generation.
pub trait CompletionModel: Send + Sync {
    /// Short label for logs (usually the model file name).
    fn name(&self) -> &str;

    /// Generates a continuation of `prompt`. The returned text is not trimmed.
    fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, KtmError>;
}

/// Loads the model described by `settings`.
///
/// ## Errors
///
/// `KtmError::ModelUnavailable` when the file does not exist, when llama.cpp
/// rejects it, or when the binary was built without the `llama` feature.
pub fn load_model(settings: &ModelSettings) -> Result<Arc<dyn CompletionModel>, KtmError> {
    if !settings.path.is_file() {
        return Err(KtmError::ModelUnavailable(format!(
            "model file not found: {}",
            settings.path.display()
        )));
    }

    #[cfg(feature = "llama")]
    {
        let model = llama::LlamaCppModel::load(settings)?;
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "llama"))]
    {
        Err(KtmError::ModelUnavailable(
            "this build does not include the llama.cpp backend (rebuild with `--features llama`)"
                .to_string(),
        ))
    }
}
