//! # KTM Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: discovery, merging and validation of `.ktm.toml`
//! - `error`: the `KtmError` enum, its HTTP mapping, and the `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{KtmError, Result};
//! ```
//!
pub mod config;
pub mod error;
