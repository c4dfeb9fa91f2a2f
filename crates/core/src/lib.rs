//! Core types and calculations for fincalc
//!
//! This crate provides the pure building blocks used by every other crate:
//! - SIP, FD and EMI calculators
//! - Indian currency formatting (₹1,23,45,678.9)
//! - Indian number naming (crore / lakh / thousand)
//! - Calculation result and error types

pub mod calculator;
pub mod error;
pub mod format;
pub mod types;

pub use calculator::{compute_emi, compute_fd, compute_sip, CalculationRequest};
pub use error::{CalculationError, Error, Result};
pub use format::{to_indian_currency, to_indian_words};
pub use types::{CalculationOutcome, CalculationResult, CalculatorKind};
