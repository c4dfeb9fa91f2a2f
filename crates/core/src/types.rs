//! Calculation data model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Error};

/// Calculator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    /// Systematic Investment Plan
    #[default]
    Sip,
    /// Fixed Deposit
    Fd,
    /// Equated Monthly Installment
    Emi,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 3] = [Self::Sip, Self::Fd, Self::Emi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Fd => "fd",
            Self::Emi => "emi",
        }
    }

    /// Upper-case label used in titles ("SIP Analysis")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sip => "SIP",
            Self::Fd => "FD",
            Self::Emi => "EMI",
        }
    }

    /// Whether the calculator takes an inflation input
    pub fn uses_inflation(&self) -> bool {
        !matches!(self, Self::Emi)
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(Self::Sip),
            "fd" => Ok(Self::Fd),
            "emi" => Ok(Self::Emi),
            other => Err(Error::UnknownCalculator(other.to_string())),
        }
    }
}

/// Result of one calculator invocation
///
/// For SIP this is {invested, maturity}, for FD {principal, maturity} and for
/// EMI {loan amount, total payable}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub kind: CalculatorKind,
    pub principal_or_invested: f64,
    pub maturity_or_payable: f64,
    pub interest: f64,
    /// Maturity discounted by inflation (SIP / FD only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_value_adjusted: Option<f64>,
    /// Monthly installment (EMI only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<f64>,
}

pub type CalculationOutcome = std::result::Result<CalculationResult, CalculationError>;
