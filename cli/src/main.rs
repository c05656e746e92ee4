//! # KTM Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Entry point for the `ktm` binary. Parses arguments with Clap, sets up
//! logging from the verbosity flags and dispatches to the command handlers.
//! Errors from any handler are reported once here and end the process with
//! exit code 1.
//!
//! ## Examples
//!
//! ```bash
//! # Keyword API on port 5000
//! ktm serve
//!
//! # Local model server with debug logging
//! ktm -vv llm --model ./model.gguf
//!
//! # Quick check from the terminal
//! ktm ask hello
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod assistant; // Classifier, canned replies, identity constants
mod commands; // serve, llm, ask
mod common; // HTTP helpers and listener utilities
mod core; // Errors and configuration files
mod llm; // Completion model seam and llama.cpp backend

#[derive(Parser, Debug)]
#[command(
    name = "ktm",
    about = "💬 KTM Assistant: keyword chat API and local model server",
    long_about = "Serve the KTM Assistant keyword API and browser interface, run a chat server\n\
                  backed by a local GGUF model, or classify a single message from the terminal.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    Llm(commands::llm::LlmArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Llm(args) => commands::llm::handle_llm(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_joins_trailing_words() {
        let cli = Cli::try_parse_from(["ktm", "ask", "--json", "hello", "there"]).unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.message, vec!["hello", "there"]);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "ktm", "-v", "serve", "--host", "127.0.0.1", "--port", "8080", "--no-cors",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind.port, Some(8080));
                assert!(args.bind.no_cors);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
