//! # KTM Keyword Responder Server
//!
//! File: cli/src/commands/serve/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! `ktm serve` runs the KTM Assistant API: keyword-classified canned replies on
//! `POST /api/ktm/chat`, the info/health/overview documents, and the static
//! browser interface.
//!
//! ## Architecture
//!
//! - `config.rs`: flags, config-file merge, static directory resolution
//! - `routes.rs`: axum router and handlers
//! - `server_logic.rs`: listener, banner, graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Default: 0.0.0.0:5000, interface from ./static
//! ktm serve
//!
//! # Local only, custom port and interface directory
//! ktm serve --host 127.0.0.1 --port 8080 --static-dir ./web
//!
//! # Port from the environment
//! PORT=9000 ktm serve
//! ```
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

pub mod config;
pub mod routes;
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Loads the configuration file, merges it with `args`, and runs the server.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let file_config = core_config::load_config(args.config.as_deref())?;
    let serve_config = config::ServeConfig::resolve(&args, &file_config)?;
    info!("Effective server config: {:?}", serve_config);

    server_logic::run_server(serve_config).await
}
