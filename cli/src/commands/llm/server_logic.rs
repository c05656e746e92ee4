//! # Model Server Runtime
//!
//! File: cli/src/commands/llm/server_logic.rs
//! Author: KTM Team
//!
//! Loads the model on a blocking worker, binds the listener and serves until
//! Ctrl+C or SIGTERM. A model that fails to load is reported and the server
//! comes up anyway.
//!
use super::config::LlmConfig;
use super::routes::{self, LlmState, ModelSlot};
use crate::assistant::identity;
use crate::common::network::{self, MAX_PORT_ATTEMPTS};
use crate::core::error::Result;
use crate::llm;
use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};

async fn load_slot(config: &LlmConfig) -> ModelSlot {
    let settings = config.model.clone();
    info!("Loading model from {}", settings.path.display());

    let loaded = tokio::task::spawn_blocking(move || llm::load_model(&settings)).await;
    match loaded {
        Ok(Ok(model)) => {
            info!("Model '{}' loaded", model.name());
            ModelSlot::Loaded(model)
        }
        Ok(Err(e)) => {
            error!("Model failed to load: {}", e);
            eprintln!("Warning: {}", e);
            ModelSlot::Unavailable(e.to_string())
        }
        Err(e) => {
            error!("Model loader task failed: {}", e);
            ModelSlot::Unavailable(format!("model loader task failed: {}", e))
        }
    }
}

/// # Run Model Server (`run_llm_server`)
///
/// ## Errors
///
/// Fails if no port in the fallback range can be bound or the server loop
/// itself errors. Model load failures are not errors here.
pub async fn run_llm_server(config: LlmConfig) -> Result<()> {
    let model = load_slot(&config).await;
    let model_loaded = model.is_loaded();

    let state = LlmState {
        model,
        system_prompt: Arc::from(config.model.system_prompt.as_str()),
        params: config.model.generation(),
    };
    let app = routes::create_app(state, config.bind.enable_cors);

    let listener =
        network::bind_with_fallback(config.bind.host, config.bind.port, MAX_PORT_ATTEMPTS).await?;
    let addr = network::listener_addr(&listener)?;

    println!("\n=================================================================");
    println!("{} (local model) {}", identity::ASSISTANT_NAME, identity::VERSION);
    println!("=================================================================");
    println!("🌐 Local URL:    http://localhost:{}", addr.port());
    if let Some(ip) = network::local_ip() {
        println!("🔗 Network URL:  http://{}:{}", ip, addr.port());
    }
    println!("💬 Chat:         POST http://localhost:{}/chat", addr.port());
    println!("📦 Model:        {}", config.model.path.display());
    println!("✅ Model loaded: {}", model_loaded);
    println!("=================================================================\n");

    info!("Starting model server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(network::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}
