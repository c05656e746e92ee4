//! # KTM Assistant Core
//!
//! File: cli/src/assistant/mod.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! The request classifier and responder behind `POST /api/ktm/chat` and
//! `ktm ask`:
//! 1. `category::classify` picks one of five intents by keyword substring.
//! 2. `responses::respond` draws a canned reply for that intent.
//! 3. `ChatResponse::success` wraps the reply with the identity metadata.
//!
//! All tables are `'static` constants; nothing here holds state between calls.
//!
//! ## Examples
//!
//! ```rust
//! let (category, reply) = assistant::answer("Hello there");
//! assert_eq!(category, Category::Greeting);
//! assert_eq!(reply.status, "success");
//! ```
//!
use serde::{Deserialize, Serialize};

pub mod category;
pub mod identity;
pub mod responses;

pub use category::{classify, Category};

/// Incoming chat body. A missing or `null` message deserializes to `None`
/// and is rejected by `common::http::require_message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful reply from the keyword responder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub assistant: String,
    pub developer: String,
    pub founder: String,
}

impl ChatResponse {
    /// Wraps `reply` with the status, timestamp and identity fields.
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            response: reply.into(),
            status: "success".to_string(),
            timestamp: identity::timestamp(),
            version: identity::VERSION.to_string(),
            assistant: identity::ASSISTANT_NAME.to_string(),
            developer: identity::DEVELOPER.to_string(),
            founder: identity::FOUNDER.to_string(),
        }
    }
}

/// Classifies an already-validated message and builds the full reply.
pub fn answer(message: &str) -> (Category, ChatResponse) {
    let category = classify(message);
    let reply = responses::respond(category);
    tracing::debug!("Classified message as '{}'", category);
    (category, ChatResponse::success(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_hello_there() {
        let (category, reply) = answer("Hello there");
        assert_eq!(category, Category::Greeting);
        assert!(responses::responses(Category::Greeting).contains(&reply.response.as_str()));
        assert_eq!(reply.status, "success");
        assert_eq!(reply.version, "R1.0");
        assert_eq!(reply.assistant, "KTM Assistant");
        assert_eq!(reply.developer, "KTM Team");
        assert_eq!(reply.founder, "Sandeep Ghimeere");
    }

    #[test]
    fn test_chat_request_missing_message() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.message.is_none());

        let request: ChatRequest = serde_json::from_str(r#"{"message": "hey"}"#).unwrap();
        assert_eq!(request.message.as_deref(), Some("hey"));
    }
}
