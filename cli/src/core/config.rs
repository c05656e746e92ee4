//! # KTM Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! This module loads the optional TOML configuration shared by `ktm serve`
//! and `ktm llm`. Every setting is optional in the file; the commands merge
//! the loaded values with their command-line flags and built-in defaults.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config FILE` (used alone when given)
//! 2. Project-specific `.ktm.toml` in the current directory or an ancestor
//! 3. User-specific `config.toml` in the platform config dir (`~/.config/ktm` on Linux)
//!
//! Project values override user values field by field. After merging, `~` in
//! the model path is expanded and the numeric model settings are validated.
//! A relative `static_dir` is resolved against the directory of the file that
//! declared it.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! port = 5000
//! static_dir = "static"
//!
//! [model]
//! path = "~/models/openhermes-2.5-mistral-7b.Q4_K_M.gguf"
//! max_tokens = 300
//! temperature = 0.7
//! ```
//!
//! ```rust
//! let cfg = config::load_config(args.config.as_deref())?;
//! let port = args.bind.port.or(cfg.server.port).unwrap_or(DEFAULT_PORT);
//! ```
//!
use crate::core::error::{KtmError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".ktm.toml";

/// Represents the configuration file as written by the user.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub model: ModelSection,
}

/// `[server]`: bind address and static interface for both servers.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    /// Directory holding the browser interface (`index.html` and assets).
    pub static_dir: Option<PathBuf>,
    pub enable_cors: Option<bool>,
}

/// `[model]`: local language model used by `ktm llm`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Path to a GGUF file (can use ~). Will be expanded.
    pub path: Option<String>,
    pub context_size: Option<u32>,
    pub threads: Option<i32>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

/// Loads, merges, expands and validates the configuration.
///
/// With `explicit` set, only that file is read and it must exist. Otherwise
/// the user and project files are merged; neither is required.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(KtmError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "KTM", "ktm") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start_dir` looking for `.ktm.toml`, stopping at the first
/// directory that contains `.git`.
fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;

    // Relative static directories are relative to the file, not the caller.
    if let (Some(dir), Some(parent)) = (config.server.static_dir.as_ref(), path.parent()) {
        if dir.is_relative() {
            let resolved = parent.join(dir);
            debug!("Resolved static_dir from config to: {}", resolved.display());
            config.server.static_dir = Some(resolved);
        }
    }
    Ok(config)
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        server: ServerSection {
            host: project.server.host.or(user.server.host),
            port: project.server.port.or(user.server.port),
            static_dir: project.server.static_dir.or(user.server.static_dir),
            enable_cors: project.server.enable_cors.or(user.server.enable_cors),
        },
        model: ModelSection {
            path: project.model.path.or(user.model.path),
            context_size: project.model.context_size.or(user.model.context_size),
            threads: project.model.threads.or(user.model.threads),
            max_tokens: project.model.max_tokens.or(user.model.max_tokens),
            temperature: project.model.temperature.or(user.model.temperature),
            system_prompt: project.model.system_prompt.or(user.model.system_prompt),
        },
    }
}

/// Expands `~` in the model path.
pub(crate) fn expand_config_paths(config: &mut Config) {
    if let Some(path) = config.model.path.as_mut() {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded model path: {}", path);
    }
}

/// Checks the generation and context settings that would otherwise only fail
/// on the first request.
pub fn validate_config(config: &Config) -> Result<()> {
    let model = &config.model;
    if let Some(temperature) = model.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(anyhow!(KtmError::Config(format!(
                "temperature must be within 0.0..=2.0, got {}",
                temperature
            ))));
        }
    }
    if model.max_tokens == Some(0) {
        return Err(anyhow!(KtmError::Config(
            "max_tokens must be greater than zero".to_string()
        )));
    }
    if model.context_size == Some(0) {
        return Err(anyhow!(KtmError::Config(
            "context_size must be greater than zero".to_string()
        )));
    }
    if let Some(threads) = model.threads {
        if threads <= 0 {
            return Err(anyhow!(KtmError::Config(format!(
                "threads must be greater than zero, got {}",
                threads
            ))));
        }
    }
    if matches!(model.system_prompt.as_deref(), Some(p) if p.trim().is_empty()) {
        return Err(anyhow!(KtmError::Config(
            "system_prompt must not be empty".to_string()
        )));
    }
    Ok(())
}
