//! # Canned Response Table
//!
//! File: cli/src/assistant/responses.rs
//! Author: KTM Team
//!
//! Fixed replies for each category and the uniform picker over them.
//!
use super::category::Category;
use rand::seq::SliceRandom;
use rand::Rng;

const GREETING_RESPONSES: [&str; 3] = [
    "Hello! I'm KTM Assistant, developed by the KTM Team. How can I help you today?",
    "Hi there! Welcome to KTM Assistant. What would you like to know?",
    "Greetings! I'm here to assist you. What can I do for you?",
];

const ABOUT_RESPONSES: [&str; 2] = [
    "I'm KTM Assistant R1.0, created by the KTM Team under the leadership of founder Sandeep Ghimeere. I was launched on May 11, 2025, and I support multi-language communication, voice mode, file attachments, online search, and real-time customization.",
    "KTM Assistant is an AI-powered assistant developed by the KTM Team. I offer comprehensive support with advanced features like voice interaction and file processing capabilities.",
];

const FEATURES_RESPONSES: [&str; 2] = [
    "I offer several key features: Multi-language support for global communication, Voice mode for hands-free interaction, File attachment functionality for document processing, Online search integration for real-time information, and Real-time customization to adapt to your needs.",
    "My core capabilities include voice interaction, multi-language support, file processing, web search integration, and personalized responses based on your preferences.",
];

const HELP_RESPONSES: [&str; 2] = [
    "I can assist you with various tasks including answering questions, providing information, helping with research, and offering guidance on different topics. Feel free to ask me anything!",
    "I'm here to help with information, research, problem-solving, and general assistance. What specific topic would you like help with?",
];

const DEFAULT_RESPONSES: [&str; 3] = [
    "Thank you for your question. As KTM Assistant, I'm here to provide helpful information and assistance. Could you please provide more details about what you'd like to know?",
    "I understand you're looking for information. As your KTM Assistant, I'm ready to help. Could you elaborate on your query?",
    "I'm processing your request. As KTM Assistant, I aim to provide accurate and helpful responses. How can I better assist you with this?",
];

/// All candidate replies for `category`, in table order.
pub fn responses(category: Category) -> &'static [&'static str] {
    match category {
        Category::Greeting => &GREETING_RESPONSES,
        Category::About => &ABOUT_RESPONSES,
        Category::Features => &FEATURES_RESPONSES,
        Category::Help => &HELP_RESPONSES,
        Category::Default => &DEFAULT_RESPONSES,
    }
}

/// Picks one reply for `category` uniformly at random using `rng`.
pub fn pick_response<R: Rng + ?Sized>(category: Category, rng: &mut R) -> &'static str {
    // Every list is a non-empty array, so the fallback is never taken.
    responses(category)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_RESPONSES[0])
}

/// Picks a reply with the thread-local generator.
pub fn respond(category: Category) -> &'static str {
    pick_response(category, &mut rand::thread_rng())
}
