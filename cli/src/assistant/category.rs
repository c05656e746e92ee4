//! # Message Classification
//!
//! File: cli/src/assistant/category.rs
//! Author: KTM Team
//!
//! ## Overview
//!
//! Maps a free-text message onto one of five fixed intents. The message is
//! lower-cased and each keyword set is checked in priority order
//! (greeting, about, features, help); the first set with a keyword contained
//! anywhere in the message wins, otherwise the message is `Default`.
//!
//! Matching is plain substring containment. "this" contains "hi" and is
//! therefore a greeting; that behaviour is kept as-is.
//!
use serde::Serialize;
use std::fmt;

/// The intents a message can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greeting,
    About,
    Features,
    Help,
    Default,
}

/// Keyword-driven categories, highest priority first. `Default` is the
/// fall-through and has no keywords.
pub const PRIORITY: [Category; 4] = [
    Category::Greeting,
    Category::About,
    Category::Features,
    Category::Help,
];

const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

const ABOUT_KEYWORDS: &[&str] = &[
    "about",
    "who are you",
    "what are you",
    "tell me about yourself",
];

const FEATURES_KEYWORDS: &[&str] = &["features", "capabilities", "what can you do", "functions"];

const HELP_KEYWORDS: &[&str] = &["help", "assist", "support", "how to"];

impl Category {
    /// Lower-case trigger substrings for this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Greeting => GREETING_KEYWORDS,
            Category::About => ABOUT_KEYWORDS,
            Category::Features => FEATURES_KEYWORDS,
            Category::Help => HELP_KEYWORDS,
            Category::Default => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::About => "about",
            Category::Features => "features",
            Category::Help => "help",
            Category::Default => "default",
        }
    }

    /// True when any of this category's keywords occurs in `lowered`.
    fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|keyword| lowered.contains(keyword))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `message` into the first matching category in `PRIORITY`.
pub fn classify(message: &str) -> Category {
    let lowered = message.to_lowercase();
    PRIORITY
        .into_iter()
        .find(|category| category.matches(&lowered))
        .unwrap_or(Category::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_greeting_keyword_matches_case_insensitively() {
        for keyword in GREETING_KEYWORDS {
            assert_eq!(classify(keyword), Category::Greeting, "{keyword}");
            assert_eq!(
                classify(&keyword.to_uppercase()),
                Category::Greeting,
                "{keyword}"
            );
            assert_eq!(
                classify(&format!("well, {keyword} friend")),
                Category::Greeting,
                "{keyword}"
            );
        }
    }

    #[test]
    fn test_each_category_keyword_set() {
        assert_eq!(classify("Who are you?"), Category::About);
        assert_eq!(classify("Tell me ABOUT the team"), Category::About);
        assert_eq!(classify("List your capabilities"), Category::Features);
        assert_eq!(classify("What can you do"), Category::Features);
        assert_eq!(classify("I need support"), Category::Help);
        assert_eq!(classify("How to reset a password"), Category::Help);
    }

    #[test]
    fn test_priority_order() {
        // greeting beats about
        assert_eq!(classify("Hello, who are you?"), Category::Greeting);
        // about beats features
        assert_eq!(classify("Tell me about your features"), Category::About);
        // features beats help
        assert_eq!(classify("Do your functions help me"), Category::Features);
    }

    #[test]
    fn test_substring_matching_is_not_word_bounded() {
        // "this" contains "hi"
        assert_eq!(classify("Is this working"), Category::Greeting);
        // "they" contains "hey"
        assert_eq!(classify("Where did they go"), Category::Greeting);
    }

    #[test]
    fn test_default_category() {
        assert_eq!(classify("Quantum mechanics question"), Category::Default);
        assert_eq!(classify(""), Category::Default);
    }

    #[test]
    fn test_keywords_and_names() {
        assert!(Category::Default.keywords().is_empty());
        for category in PRIORITY {
            assert!(!category.keywords().is_empty());
            assert!(category
                .keywords()
                .iter()
                .all(|k| k.to_lowercase() == *k));
        }
        assert_eq!(Category::Features.to_string(), "features");
        assert_eq!(
            serde_json::to_string(&Category::Greeting).unwrap(),
            "\"greeting\""
        );
    }
}
