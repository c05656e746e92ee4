//! # KTM Local Model Server
//!
//! File: cli/src/commands/llm/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! `ktm llm` answers `POST /chat` with text generated by a local GGUF model.
//! Each message is wrapped in an instruction prompt with the configured system
//! prompt before generation.
//!
//! The llama.cpp backend is compiled only with `--features llama`. Without it
//! the server still starts and reports the model as unavailable.
//!
//! ## Examples
//!
//! ```bash
//! ktm llm --model ./openhermes-2.5-mistral-7b.Q4_K_M.gguf
//! KTM_MODEL_PATH=/models/mistral.gguf ktm llm --port 5001 --max-tokens 200
//! ```
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use tracing::info;

pub use config::LlmArgs;

pub mod config;
pub mod routes;
pub mod server_logic;

/// # Handle LLM Command (`handle_llm`)
pub async fn handle_llm(args: LlmArgs) -> Result<()> {
    info!("Handling llm command with args: {:?}", args);

    let file_config = core_config::load_config(args.config.as_deref())?;
    let llm_config = config::LlmConfig::resolve(&args, &file_config)?;
    info!("Effective model server config: {:?}", llm_config);

    server_logic::run_llm_server(llm_config).await
}
