//! # Keyword Server Runtime
//!
//! File: cli/src/commands/serve/server_logic.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Binds the listener (with port fallback), prints the startup banner and runs
//! the axum application until Ctrl+C or SIGTERM.
//!
use super::config::ServeConfig;
use super::routes;
use crate::assistant::identity;
use crate::common::network::{self, MAX_PORT_ATTEMPTS};
use crate::core::error::Result;
use anyhow::Context;
use tracing::info;

/// # Run HTTP Server (`run_server`)
///
/// ## Errors
///
/// Fails if no port in the fallback range can be bound or the server loop
/// itself errors.
pub async fn run_server(config: ServeConfig) -> Result<()> {
    let listener =
        network::bind_with_fallback(config.bind.host, config.bind.port, MAX_PORT_ATTEMPTS).await?;
    let addr = network::listener_addr(&listener)?;
    let base_url = format!("http://localhost:{}", addr.port());

    let app = routes::create_app(&config, base_url.clone());

    println!("\n=================================================================");
    println!("{} {}", identity::API_NAME, identity::VERSION);
    println!("Developer:         {}", identity::DEVELOPER);
    println!("Founder:           {}", identity::FOUNDER);
    println!("Launch Date:       {}", identity::LAUNCH_DATE);
    println!("=================================================================");
    println!("🌐 Local URL:         {}", base_url);
    if let Some(ip) = network::local_ip() {
        println!("🔗 Network URL:       http://{}:{}", ip, addr.port());
    }
    println!("💬 API Endpoint:      {}/api/ktm/chat", base_url);
    println!("📂 Browser Interface: {}", config.static_dir.display());
    println!("🔒 CORS enabled:      {}", config.bind.enable_cors);
    println!("=================================================================\n");

    info!("Starting keyword server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(network::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}
