//! # llama.cpp Backend
//!
//! File: cli/src/llm/llama.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! `LlamaCppModel` keeps the llama.cpp backend and the loaded GGUF weights for
//! the lifetime of the server. Every `complete` call creates its own context
//! (KV cache), so concurrent requests never share decoding state; they only
//! share the read-only weights.
//!
//! Generation loop:
//! 1. Tokenize the prompt and decode it as one batch.
//! 2. Sample with temperature followed by a distribution sampler.
//! 3. Stop on an end-of-generation token or after `max_tokens`.
//!
//! Token bytes go through `PieceDecoder`, so characters split over several
//! byte-fallback tokens come out whole.
//!
use super::pieces::PieceDecoder;
use super::{CompletionModel, GenerationParams, ModelSettings};
use crate::core::error::KtmError;
use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::sampling::LlamaSampler;
use std::num::NonZeroU32;
use tracing::debug;

fn generation_error(e: impl std::fmt::Display) -> KtmError {
    KtmError::Generation(e.to_string())
}

pub struct LlamaCppModel {
    backend: LlamaBackend,
    model: LlamaModel,
    context_size: u32,
    threads: i32,
    name: String,
}

impl LlamaCppModel {
    /// Initializes llama.cpp and loads the weights at `settings.path`.
    pub fn load(settings: &ModelSettings) -> Result<Self, KtmError> {
        let backend = LlamaBackend::init().map_err(|e| {
            KtmError::ModelUnavailable(format!("failed to initialize llama.cpp backend: {}", e))
        })?;

        debug!("Reading GGUF weights from {}", settings.path.display());
        let model_params = LlamaModelParams::default();
        let model = LlamaModel::load_from_file(&backend, &settings.path, &model_params).map_err(
            |e| {
                KtmError::ModelUnavailable(format!(
                    "unable to load model {}: {}",
                    settings.path.display(),
                    e
                ))
            },
        )?;

        let name = settings
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| settings.path.display().to_string());
        Ok(Self {
            backend,
            model,
            context_size: settings.context_size,
            threads: settings.threads,
            name,
        })
    }
}

impl CompletionModel for LlamaCppModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, KtmError> {
        let ctx_params = LlamaContextParams::default()
            .with_n_ctx(NonZeroU32::new(self.context_size))
            .with_n_threads(self.threads)
            .with_n_threads_batch(self.threads);
        let mut ctx = self
            .model
            .new_context(&self.backend, ctx_params)
            .map_err(generation_error)?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Always)
            .map_err(generation_error)?;
        let n_ctx = ctx.n_ctx() as usize;
        if tokens.is_empty() {
            return Err(KtmError::Generation("prompt produced no tokens".to_string()));
        }
        if tokens.len() + params.max_tokens as usize > n_ctx {
            return Err(KtmError::Generation(format!(
                "prompt of {} tokens plus {} new tokens exceeds the context of {}",
                tokens.len(),
                params.max_tokens,
                n_ctx
            )));
        }

        let mut batch = LlamaBatch::new(n_ctx, 1);
        let last_index = tokens.len() as i32 - 1;
        for (i, token) in (0_i32..).zip(tokens.iter().copied()) {
            batch
                .add(token, i, &[0], i == last_index)
                .map_err(generation_error)?;
        }
        ctx.decode(&mut batch).map_err(generation_error)?;

        let mut sampler = LlamaSampler::chain_simple([
            LlamaSampler::temp(params.temperature),
            LlamaSampler::dist(rand::random::<u32>()),
        ]);

        let mut n_cur = batch.n_tokens();
        let mut output = PieceDecoder::new();
        for _ in 0..params.max_tokens {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);

            if self.model.is_eog_token(token) {
                break;
            }

            let piece = self
                .model
                .token_to_bytes(token, Special::Tokenize)
                .map_err(generation_error)?;
            output.push(&piece);

            batch.clear();
            batch
                .add(token, n_cur, &[0], true)
                .map_err(generation_error)?;
            n_cur += 1;
            ctx.decode(&mut batch).map_err(generation_error)?;
        }

        let output = output.finish();
        debug!(
            "Generated {} tokens ({} chars)",
            n_cur - tokens.len() as i32,
            output.len()
        );
        Ok(output)
    }
}
