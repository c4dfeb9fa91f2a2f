//! Indian-locale formatting
//!
//! - `to_indian_currency`: ₹ with 3-then-2 digit grouping
//! - `to_indian_words`: crore / lakh / thousand number names

pub mod currency;
pub mod words;

pub use currency::to_indian_currency;
pub use words::to_indian_words;

/// 1 lakh = 10^5
pub const LAKH: u64 = 100_000;
/// 1 crore = 10^7
pub const CRORE: u64 = 10_000_000;
