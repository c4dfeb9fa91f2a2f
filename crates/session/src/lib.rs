//! Calculator session
//!
//! Features:
//! - Form inputs as free text or numbers, resolved through the LLM resolver
//! - Reports with currency lines, the headline figure in words and chart series
//! - Per-user state: active calculator, last report per calculator, saved results

pub mod form;
pub mod log;
pub mod report;
pub mod session;

pub use form::{CalculatorForm, FieldInput};
pub use log::{ResultsLog, SavedCalculation};
pub use report::{CalculationReport, ChartSeries};
pub use session::{CalculationService, CalculatorSession, ReportOutcome};
