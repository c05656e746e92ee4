//! # Keyword Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Combines the `ktm serve` flags with the `[server]` section of the loaded
//! configuration file. Precedence, highest first:
//! 1. Command-line flags (and `PORT` for the port)
//! 2. Configuration file (`--config`, `.ktm.toml`, or the user config)
//! 3. Defaults: `0.0.0.0:5000`, CORS on, static directory `./static`
//!
//! The static directory does not have to exist. Without it the server still
//! answers the API routes and returns a plain-text 404 for the interface.
//!
use crate::common::network::{BindArgs, BindConfig};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::{env, path::PathBuf};
use tracing::{debug, warn};

/// Static directory used when neither a flag nor the config file sets one.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// # Serve Command Arguments (`ServeArgs`)
///
/// Flags accepted by `ktm serve`.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub bind: BindArgs,

    /// Directory holding the browser interface (`index.html` and its assets).
    /// Defaults to `./static`.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Configuration file to use instead of the discovered `.ktm.toml` / user config.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// # Effective Server Configuration (`ServeConfig`)
#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    pub bind: BindConfig,
    /// Absolute path of the browser interface directory.
    pub static_dir: PathBuf,
}

impl ServeConfig {
    /// Merges `args` over `file` and makes the static directory absolute.
    pub fn resolve(args: &ServeArgs, file: &Config) -> Result<Self> {
        let bind = BindConfig::resolve(&args.bind, &file.server);

        let static_dir = args
            .static_dir
            .clone()
            .or_else(|| file.server.static_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let static_dir = if static_dir.is_absolute() {
            static_dir
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(static_dir)
        };

        if !static_dir.is_dir() {
            warn!(
                "Static directory '{}' not found; the browser interface will not be served.",
                static_dir.display()
            );
        } else {
            debug!("Serving browser interface from {}", static_dir.display());
        }

        Ok(Self { bind, static_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ServerSection;
    use std::net::Ipv4Addr;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_defaults() -> Result<()> {
        let config = ServeConfig::resolve(&ServeArgs::default(), &Config::default())?;
        assert_eq!(config.bind, BindConfig::default());
        assert_eq!(config.static_dir, env::current_dir()?.join(DEFAULT_STATIC_DIR));
        Ok(())
    }

    #[test]
    fn test_resolve_file_values() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = Config {
            server: ServerSection {
                port: Some(8081),
                static_dir: Some(temp_dir.path().to_path_buf()),
                enable_cors: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = ServeConfig::resolve(&ServeArgs::default(), &file)?;
        assert_eq!(config.bind.port, 8081);
        assert!(!config.bind.enable_cors);
        assert_eq!(config.static_dir, temp_dir.path());
        Ok(())
    }

    #[test]
    fn test_resolve_args_override_file() -> Result<()> {
        let from_file = TempDir::new()?;
        let from_args = TempDir::new()?;
        let file = Config {
            server: ServerSection {
                host: Some("192.168.1.1".parse()?),
                port: Some(8081),
                static_dir: Some(from_file.path().to_path_buf()),
                ..Default::default()
            },
            ..Default::default()
        };
        let args = ServeArgs {
            bind: BindArgs {
                host: Some(Ipv4Addr::LOCALHOST.into()),
                port: Some(9999),
                no_cors: true,
            },
            static_dir: Some(from_args.path().to_path_buf()),
            config: None,
        };

        let config = ServeConfig::resolve(&args, &file)?;
        assert_eq!(config.bind.host.to_string(), "127.0.0.1");
        assert_eq!(config.bind.port, 9999);
        assert!(!config.bind.enable_cors);
        assert_eq!(config.static_dir, from_args.path());
        Ok(())
    }

    #[test]
    fn test_resolve_relative_static_dir_is_absolute() -> Result<()> {
        let args = ServeArgs {
            static_dir: Some(PathBuf::from("public")),
            ..Default::default()
        };
        let config = ServeConfig::resolve(&args, &Config::default())?;
        assert!(config.static_dir.is_absolute());
        assert!(config.static_dir.ends_with("public"));
        Ok(())
    }
}
