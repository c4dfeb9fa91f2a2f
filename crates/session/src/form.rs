//! Raw calculator inputs
//!
//! Amount and rate accept free text ("1.5 lakh", "12 percent") and go through
//! the resolver. Tenure and inflation are read locally, taking the leading
//! number of the field the way a browser number input would.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use fincalc_core::CalculationError;

static INTEGER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([-+]?\d+)").unwrap());

static DECIMAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+))").unwrap());

/// A form field: free text or an already-parsed number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Number(f64),
    Text(String),
}

impl FieldInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Blank text; a number is never blank
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }

    /// Leading whole number ("10 years" -> 10, "7.9" -> 7)
    pub fn leading_integer(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.trunc()),
            Self::Text(t) => INTEGER_PREFIX
                .captures(t)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .map(|v| v as f64),
        }
    }

    /// Leading decimal number ("2.5 years" -> 2.5)
    pub fn leading_decimal(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => DECIMAL_PREFIX
                .captures(t)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok()),
        }
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Raw field values for one calculator
///
/// `amount` is the monthly investment (SIP) or the principal (FD, EMI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorForm {
    pub amount: FieldInput,
    pub rate: FieldInput,
    pub tenure: FieldInput,
    /// SIP / FD only; absent or blank reads as 0
    #[serde(default)]
    pub inflation: Option<FieldInput>,
}

impl CalculatorForm {
    pub fn new(
        amount: impl Into<FieldInput>,
        rate: impl Into<FieldInput>,
        tenure: impl Into<FieldInput>,
    ) -> Self {
        Self {
            amount: amount.into(),
            rate: rate.into(),
            tenure: tenure.into(),
            inflation: None,
        }
    }

    pub fn with_inflation(mut self, inflation: impl Into<FieldInput>) -> Self {
        self.inflation = Some(inflation.into());
        self
    }

    /// Tenure in whole years (SIP, EMI)
    pub fn whole_years(&self) -> Result<u32, CalculationError> {
        let years = self
            .tenure
            .leading_integer()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CalculationError::invalid("tenure", "tenure must be a number of years"))?;

        if years < 1.0 {
            return Err(CalculationError::invalid(
                "tenure",
                "tenure must be at least one year",
            ));
        }
        Ok(years.min(u32::MAX as f64) as u32)
    }

    /// Tenure in years, fractions kept (FD)
    pub fn fractional_years(&self) -> Result<f64, CalculationError> {
        self.tenure
            .leading_decimal()
            .ok_or_else(|| CalculationError::invalid("tenure", "tenure must be a number of years"))
    }

    /// Annual inflation percentage
    pub fn inflation_percent(&self) -> Result<f64, CalculationError> {
        match &self.inflation {
            None => Ok(0.0),
            Some(field) if field.is_blank() => Ok(0.0),
            Some(field) => field.leading_decimal().ok_or_else(|| {
                CalculationError::invalid("inflation", "inflation must be a number")
            }),
        }
    }
}
