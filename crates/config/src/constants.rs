//! Centralized constants
//!
//! Single source of truth for defaults shared by the config, llm and server
//! crates.

/// Indian numbering units
pub mod units {
    /// 1 lakh = 10^5
    pub const LAKH: f64 = fincalc_core::format::LAKH as f64;

    /// 1 crore = 10^7
    pub const CRORE: f64 = fincalc_core::format::CRORE as f64;
}

/// Retry defaults for the number-parsing service
pub mod retry {
    /// Total attempts, including the first one
    pub const MAX_ATTEMPTS: u32 = 5;

    /// First backoff; doubles after every transient failure (1s, 2s, 4s, 8s)
    pub const INITIAL_BACKOFF_MS: u64 = 1_000;

    /// Upper bound accepted by validation
    pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

    /// Upper bound accepted by validation
    pub const MAX_INITIAL_BACKOFF_MS: u64 = 60_000;
}

/// Service endpoints
pub mod endpoints {
    /// Gemini REST API base
    pub const GEMINI_DEFAULT: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Model used for text-to-number parsing
    pub const GEMINI_MODEL_DEFAULT: &str = "gemini-2.5-flash-preview-05-20";

    /// Environment variable holding the API key
    pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
}

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;

    /// Request timeout towards the parsing service
    pub const PARSER_TIMEOUT_SECS: u64 = 30;
}
