//! # KTM Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: KTM Team
//!
//! ## Command Groups
//!
//! - `serve`: the keyword-classifier API and browser interface
//! - `llm`: the local-model chat server
//! - `ask`: one-shot classification from the terminal
//!
//! Each command defines its own arguments structure and an async handler.
//!

/// One-shot keyword reply without a server.
pub mod ask;
/// Chat server backed by a local GGUF model.
pub mod llm;
/// KTM Assistant API server with static file hosting.
pub mod serve;
