//! Error types

use thiserror::Error;

/// Crate-level error for failures outside a calculation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Calculation error, returned as a value and rendered to the user
///
/// A resolver that could not turn free text into a number is reported the same
/// way as an out-of-range input: both carry a message the UI shows as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Precondition violated (non-positive amount, negative rate, zero tenure...)
    #[error("Invalid input '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Free-text field could not be resolved to a number
    #[error("Could not read a number from '{field}'")]
    Unresolved { field: String },
}

impl CalculationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unresolved(field: impl Into<String>) -> Self {
        Self::Unresolved {
            field: field.into(),
        }
    }

    /// Field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. } | Self::Unresolved { field } => field,
        }
    }

    /// Message suitable for display next to the calculator
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message, .. } => format!("ERROR: {}", message),
            Self::Unresolved { field } => format!(
                "ERROR: Please ensure {} is a valid number or text description (e.g. \"1.5 lakh\", \"12 percent\").",
                field
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefix() {
        let err = CalculationError::invalid("amount", "Amount must be positive");
        assert_eq!(err.field(), "amount");
        assert_eq!(err.user_message(), "ERROR: Amount must be positive");

        let err = CalculationError::unresolved("rate");
        assert!(err.user_message().starts_with("ERROR:"));
        assert!(err.user_message().contains("rate"));
    }
}
