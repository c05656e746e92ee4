//! # Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: KTM Team
//!
//! Answers one message from the terminal with the same classifier and canned
//! replies the HTTP API uses. Handy for checking keyword coverage without
//! starting a server.
//!
//! ```bash
//! ktm ask hello there
//! ktm ask --json "what can you do"
//! ```
//!
use crate::assistant;
use crate::core::error::{KtmError, Result};
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Message to classify. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Print the full API response as JSON instead of just the reply.
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let joined = args.message.join(" ");
    let message = joined.trim();
    if message.is_empty() {
        return Err(KtmError::EmptyMessage.into());
    }

    let (category, response) = assistant::answer(message);
    info!("Classified message as '{}'", category);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        println!("{}", rendered);
    } else {
        println!("{}", response.response);
    }
    Ok(())
}
