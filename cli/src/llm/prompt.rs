//! # Prompt Template
//!
//! File: cli/src/llm/prompt.rs
//! Author: KTM Team
//!
//! Llama-2 style `[INST]` template used for every chat request.
//!

/// Wraps `user_message` and `system_prompt` in the instruction template.
pub fn instruct_prompt(system_prompt: &str, user_message: &str) -> String {
    format!(
        "[INST] <<SYS>> {} <</SYS>> {} [/INST]",
        system_prompt, user_message
    )
}
