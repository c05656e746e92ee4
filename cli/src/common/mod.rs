//! # KTM Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Shared plumbing used by more than one command:
//! - `http`: chat body validation and the tracing/CORS middleware stack
//! - `network`: listener binding with port fallback, LAN address lookup, and
//!   the graceful shutdown signal
//!
pub mod http;
pub mod network;
