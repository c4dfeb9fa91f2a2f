//! Calculation pipeline and per-user calculator state

use std::collections::{HashMap, VecDeque};

use fincalc_config::SessionConfig;
use fincalc_core::{
    compute_emi, compute_fd, compute_sip, CalculationError, CalculationResult, CalculatorKind,
};
use fincalc_llm::TextToNumberResolver;

use crate::form::{CalculatorForm, FieldInput};
use crate::log::{ResultsLog, SavedCalculation};
use crate::report::CalculationReport;

pub type ReportOutcome = Result<CalculationReport, CalculationError>;

/// Turns raw form fields into a report
///
/// Stateless apart from the resolver, so one instance can serve every session.
#[derive(Clone)]
pub struct CalculationService {
    resolver: TextToNumberResolver,
}

impl CalculationService {
    pub fn new(resolver: TextToNumberResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &TextToNumberResolver {
        &self.resolver
    }

    /// Resolve inputs, compute and format
    pub async fn calculate(&self, kind: CalculatorKind, form: &CalculatorForm) -> ReportOutcome {
        let outcome = self.compute(kind, form).await;

        let label = if outcome.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "fincalc_calculations_total",
            "kind" => kind.as_str(),
            "outcome" => label
        )
        .increment(1);

        match outcome {
            Ok(result) => {
                tracing::info!(
                    kind = %kind,
                    maturity_or_payable = result.maturity_or_payable,
                    "Calculation complete"
                );
                Ok(CalculationReport::from_result(result))
            }
            Err(e) => {
                tracing::info!(kind = %kind, field = e.field(), error = %e, "Calculation rejected");
                Err(e)
            }
        }
    }

    async fn compute(
        &self,
        kind: CalculatorKind,
        form: &CalculatorForm,
    ) -> Result<CalculationResult, CalculationError> {
        let amount = self.resolve_field("amount", &form.amount).await?;
        let rate = self.resolve_field("rate", &form.rate).await?;

        match kind {
            CalculatorKind::Sip => {
                let years = form.whole_years()?;
                let inflation = form.inflation_percent()?;
                compute_sip(amount, rate, years, inflation)
            }
            CalculatorKind::Fd => {
                let years = form.fractional_years()?;
                let inflation = form.inflation_percent()?;
                compute_fd(amount, rate, years, inflation)
            }
            CalculatorKind::Emi => {
                let years = form.whole_years()?;
                compute_emi(amount, rate, years)
            }
        }
    }

    async fn resolve_field(
        &self,
        field: &str,
        input: &FieldInput,
    ) -> Result<f64, CalculationError> {
        match input {
            FieldInput::Number(value) => Ok(*value),
            FieldInput::Text(text) => self
                .resolver
                .resolve(text)
                .await
                .ok_or_else(|| CalculationError::unresolved(field)),
        }
    }
}

/// Calculator UI state for one user
///
/// Tracks the visible calculator, the last successful report of each
/// calculator and the saved-results log.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    active: CalculatorKind,
    last_reports: HashMap<CalculatorKind, CalculationReport>,
    log: ResultsLog,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            log: ResultsLog::with_capacity(config.max_saved_results),
            ..Self::default()
        }
    }

    pub fn active(&self) -> CalculatorKind {
        self.active
    }

    /// Switch the visible calculator
    pub fn show(&mut self, kind: CalculatorKind) {
        if self.active != kind {
            tracing::debug!(from = %self.active, to = %kind, "Switching calculator");
        }
        self.active = kind;
    }

    /// Store the outcome of a calculation; an error clears the previous report
    pub fn record(&mut self, kind: CalculatorKind, outcome: &ReportOutcome) {
        match outcome {
            Ok(report) => {
                self.last_reports.insert(kind, report.clone());
            }
            Err(_) => {
                self.last_reports.remove(&kind);
            }
        }
    }

    pub fn last_report(&self, kind: CalculatorKind) -> Option<&CalculationReport> {
        self.last_reports.get(&kind)
    }

    /// Save the last successful report of `kind`; `None` if there is none
    pub fn save(&mut self, kind: CalculatorKind) -> Option<&SavedCalculation> {
        let summary = self.last_reports.get(&kind)?.summary();
        let entry = self.log.push(kind, summary);
        tracing::info!(id = %entry.id, kind = %kind, "Saved calculation");
        Some(entry)
    }

    /// Saved calculations, oldest first
    pub fn saved(&self) -> &VecDeque<SavedCalculation> {
        self.log.entries()
    }

    pub fn log(&self) -> &ResultsLog {
        &self.log
    }
}
