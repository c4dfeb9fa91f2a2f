//! SIP, FD and EMI calculators
//!
//! All functions are pure: they take already-resolved numbers and return a
//! `CalculationResult`, or a `CalculationError` describing the first input
//! that violated a precondition. Nothing is computed on invalid input.
//!
//! Rates are annual percentages (12.0 means 12%).

use serde::{Deserialize, Serialize};

use crate::error::CalculationError;
use crate::types::{CalculationOutcome, CalculationResult, CalculatorKind};

fn require_finite(field: &str, value: f64) -> Result<f64, CalculationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::invalid(
            field,
            format!("{} must be a finite number", field),
        ))
    }
}

fn require_positive(field: &str, value: f64) -> Result<f64, CalculationError> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::invalid(
            field,
            format!("{} must be greater than zero", field),
        ))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<f64, CalculationError> {
    let value = require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculationError::invalid(
            field,
            format!("{} cannot be negative", field),
        ))
    }
}

fn require_years(years: u32) -> Result<f64, CalculationError> {
    if years == 0 {
        return Err(CalculationError::invalid(
            "tenure",
            "tenure must be at least one year",
        ));
    }
    Ok(years as f64)
}

/// Systematic Investment Plan maturity
///
/// Deposits are made at the start of each month (annuity due):
/// FV = P × [((1 + r)^n − 1) / r] × (1 + r), with r = rate / 12 / 100 and
/// n = years × 12. At 0% the maturity is simply P × n.
pub fn compute_sip(
    monthly_amount: f64,
    annual_rate_percent: f64,
    years: u32,
    annual_inflation_percent: f64,
) -> CalculationOutcome {
    let amount = require_positive("amount", monthly_amount)?;
    let rate = require_non_negative("rate", annual_rate_percent)?;
    let years = require_years(years)?;
    let inflation = require_non_negative("inflation", annual_inflation_percent)?;

    let monthly_rate = rate / 100.0 / 12.0;
    let months = years * 12.0;

    let maturity = if monthly_rate == 0.0 {
        amount * months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        amount * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
    };

    let invested = amount * months;
    let monthly_inflation = inflation / 100.0 / 12.0;
    let present_value = maturity / (1.0 + monthly_inflation).powf(months);

    Ok(CalculationResult {
        kind: CalculatorKind::Sip,
        principal_or_invested: invested,
        maturity_or_payable: maturity,
        interest: maturity - invested,
        present_value_adjusted: Some(present_value),
        installment: None,
    })
}

/// Fixed Deposit maturity with annual compounding
///
/// M = P × (1 + rate / 100)^years. Tenure may be fractional.
pub fn compute_fd(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    annual_inflation_percent: f64,
) -> CalculationOutcome {
    let principal = require_positive("amount", principal)?;
    let rate = require_non_negative("rate", annual_rate_percent)?;
    let years = require_positive("tenure", years)?;
    let inflation = require_non_negative("inflation", annual_inflation_percent)?;

    let maturity = principal * (1.0 + rate / 100.0).powf(years);
    let present_value = maturity / (1.0 + inflation / 100.0).powf(years);

    Ok(CalculationResult {
        kind: CalculatorKind::Fd,
        principal_or_invested: principal,
        maturity_or_payable: maturity,
        interest: maturity - principal,
        present_value_adjusted: Some(present_value),
        installment: None,
    })
}

/// Equated Monthly Installment for a loan
///
/// EMI = P × r × (1 + r)^n / [(1 + r)^n − 1], with r = rate / 12 / 100 and
/// n = years × 12. At 0% the EMI is P / n.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, years: u32) -> CalculationOutcome {
    let principal = require_positive("amount", principal)?;
    let rate = require_non_negative("rate", annual_rate_percent)?;
    let years = require_years(years)?;

    let monthly_rate = rate / 100.0 / 12.0;
    let months = years * 12.0;

    let emi = if monthly_rate == 0.0 {
        principal / months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let total_payable = emi * months;

    Ok(CalculationResult {
        kind: CalculatorKind::Emi,
        principal_or_invested: principal,
        maturity_or_payable: total_payable,
        interest: total_payable - principal,
        present_value_adjusted: None,
        installment: Some(emi),
    })
}

/// Resolved inputs for one of the calculators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalculationRequest {
    Sip {
        monthly_amount: f64,
        annual_rate_percent: f64,
        years: u32,
        #[serde(default)]
        annual_inflation_percent: f64,
    },
    Fd {
        principal: f64,
        annual_rate_percent: f64,
        years: f64,
        #[serde(default)]
        annual_inflation_percent: f64,
    },
    Emi {
        principal: f64,
        annual_rate_percent: f64,
        years: u32,
    },
}

impl CalculationRequest {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::Sip { .. } => CalculatorKind::Sip,
            Self::Fd { .. } => CalculatorKind::Fd,
            Self::Emi { .. } => CalculatorKind::Emi,
        }
    }

    pub fn compute(&self) -> CalculationOutcome {
        match *self {
            Self::Sip {
                monthly_amount,
                annual_rate_percent,
                years,
                annual_inflation_percent,
            } => compute_sip(
                monthly_amount,
                annual_rate_percent,
                years,
                annual_inflation_percent,
            ),
            Self::Fd {
                principal,
                annual_rate_percent,
                years,
                annual_inflation_percent,
            } => compute_fd(principal, annual_rate_percent, years, annual_inflation_percent),
            Self::Emi {
                principal,
                annual_rate_percent,
                years,
            } => compute_emi(principal, annual_rate_percent, years),
        }
    }
}
