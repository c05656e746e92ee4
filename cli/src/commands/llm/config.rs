//! # Model Server Configuration
//!
//! File: cli/src/commands/llm/config.rs
//! Author: KTM Team
//!
//! Merges `ktm llm` flags over the `[server]` and `[model]` sections of the
//! configuration file, validates the result, and fills in the defaults
//! (`openhermes-2.5-mistral-7b.Q4_K_M.gguf`, 4096-token context, 4 threads,
//! 300 new tokens, temperature 0.7).
//!
use crate::common::network::{BindArgs, BindConfig};
use crate::core::config::{expand_config_paths, validate_config, Config, ModelSection};
use crate::core::error::Result;
use crate::llm::{
    ModelSettings, DEFAULT_CONTEXT_SIZE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_PATH,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_THREADS,
};
use clap::Parser;
use std::path::PathBuf;

/// # Model Server Arguments (`LlmArgs`)
#[derive(Parser, Debug, Default)]
pub struct LlmArgs {
    #[command(flatten)]
    pub bind: BindArgs,

    /// Path to the GGUF model file.
    #[arg(long, short, env = "KTM_MODEL_PATH")]
    pub model: Option<PathBuf>,

    /// Maximum number of tokens generated per reply.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 2.0).
    #[arg(long)]
    pub temperature: Option<f32>,

    /// CPU threads used for inference.
    #[arg(long)]
    pub threads: Option<i32>,

    /// Context window in tokens (prompt plus reply).
    #[arg(long)]
    pub ctx_size: Option<u32>,

    /// Configuration file to use instead of the discovered `.ktm.toml` / user config.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// Effective settings for `ktm llm`.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub bind: BindConfig,
    pub model: ModelSettings,
}

impl LlmConfig {
    /// ## Errors
    ///
    /// Fails when a flag pushes a model setting out of range (for example a
    /// temperature of 5.0 or zero threads).
    pub fn resolve(args: &LlmArgs, file: &Config) -> Result<Self> {
        let section = ModelSection {
            path: args
                .model
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .or_else(|| file.model.path.clone()),
            context_size: args.ctx_size.or(file.model.context_size),
            threads: args.threads.or(file.model.threads),
            max_tokens: args.max_tokens.or(file.model.max_tokens),
            temperature: args.temperature.or(file.model.temperature),
            system_prompt: file.model.system_prompt.clone(),
        };
        let mut merged = Config {
            server: file.server.clone(),
            model: section,
        };
        expand_config_paths(&mut merged);
        validate_config(&merged)?;

        let model = merged.model;
        Ok(Self {
            bind: BindConfig::resolve(&args.bind, &merged.server),
            model: ModelSettings {
                path: PathBuf::from(model.path.unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())),
                context_size: model.context_size.unwrap_or(DEFAULT_CONTEXT_SIZE),
                threads: model.threads.unwrap_or(DEFAULT_THREADS),
                system_prompt: model
                    .system_prompt
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
                max_tokens: model.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
                temperature: model.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            },
        })
    }
}
