//! # KTM Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Listener plumbing shared by `ktm serve` and `ktm llm`:
//! - `BindArgs` / `BindConfig`: host, port and CORS flags, merged with the
//!   `[server]` section of the config file
//! - `bind_with_fallback`: binds the requested port, moving up to the next
//!   free port when it is taken
//! - `local_ip`: best-effort LAN address for the startup banner
//! - `shutdown_signal`: resolves on Ctrl+C or SIGTERM for graceful shutdown
//!
//! ## Examples
//!
//! ```rust
//! let bind = BindConfig::resolve(&args.bind, &cfg.server);
//! let listener = network::bind_with_fallback(bind.host, bind.port, MAX_PORT_ATTEMPTS).await?;
//! axum::serve(listener, app).with_graceful_shutdown(network::shutdown_signal()).await?;
//! ```
//!
use crate::core::config::ServerSection;
use crate::core::error::Result;
use anyhow::Context;
use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;
/// How many consecutive ports are tried before giving up.
pub const MAX_PORT_ATTEMPTS: u8 = 10;

/// Listener flags shared by both server commands.
#[derive(Args, Debug, Clone, Default)]
pub struct BindArgs {
    /// IP address to bind to. `0.0.0.0` (the default) accepts connections on
    /// every interface; `127.0.0.1` restricts to the local machine.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on. Defaults to 5000.
    #[arg(long, short, env = "PORT")]
    pub port: Option<u16>,

    /// Disables Cross-Origin Resource Sharing (CORS) headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective listener settings after merging flags, config file and defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            enable_cors: true,
        }
    }
}

impl BindConfig {
    /// Flags (including `PORT`) win over the config file, which wins over defaults.
    /// `--no-cors` always disables CORS; otherwise the file decides.
    pub fn resolve(args: &BindArgs, file: &ServerSection) -> Self {
        let defaults = Self::default();
        Self {
            host: args.host.or(file.host).unwrap_or(defaults.host),
            port: args.port.or(file.port).unwrap_or(defaults.port),
            enable_cors: !args.no_cors && file.enable_cors.unwrap_or(defaults.enable_cors),
        }
    }
}

/// Binds a TCP listener on `host`, starting at `start_port` and trying up to
/// `max_attempts` consecutive ports.
///
/// ## Errors
///
/// Fails when every port in the range is unavailable.
pub async fn bind_with_fallback(
    host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<TcpListener> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 0 {
                    warn!(
                        "Port {} was unavailable, listening on {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(listener);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable ({}). Trying next port...",
                    attempt + 1,
                    current_port,
                    host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host,
        start_port,
        max_attempts
    )
}

/// Address of the listener, with context for the error case.
pub fn listener_addr(listener: &TcpListener) -> Result<SocketAddr> {
    listener
        .local_addr()
        .context("Failed to read the bound listener address")
}

/// Best-effort non-loopback address of this machine, used only for display.
///
/// Connecting a UDP socket sends no packets; it only asks the OS which local
/// interface would route to the target.
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    if ip.is_loopback() || ip.is_unspecified() {
        debug!("No routable local address found");
        None
    } else {
        Some(ip)
    }
}

/// Completes on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
