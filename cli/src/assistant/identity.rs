//! # Assistant Identity
//!
//! File: cli/src/assistant/identity.rs
//! Author: KTM Team
//!
//! Static metadata attached to replies and published by the info endpoints.
//!

/// Release label reported in every response.
pub const VERSION: &str = "R1.0";
pub const ASSISTANT_NAME: &str = "KTM Assistant";
pub const API_NAME: &str = "KTM Assistant API";
pub const DEVELOPER: &str = "KTM Team";
pub const FOUNDER: &str = "Sandeep Ghimeere";
pub const LAUNCH_DATE: &str = "May 11, 2025";

/// Capabilities advertised by `GET /api/ktm/info`.
pub const FEATURES: [&str; 5] = [
    "Multi-language support",
    "Voice mode capability",
    "File attachment functionality",
    "Online search integration",
    "Real-time customization",
];

/// Current local time as an RFC 3339 string with microsecond precision.
pub fn timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}
