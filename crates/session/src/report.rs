//! Display lines and chart series for a calculation result

use serde::{Deserialize, Serialize};

use fincalc_core::{to_indian_currency, to_indian_words, CalculationResult, CalculatorKind};

/// Three-bar chart data; drawing is left to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: [String; 3],
    pub values: [f64; 3],
}

impl ChartSeries {
    pub fn for_result(result: &CalculationResult) -> Self {
        let labels = match result.kind {
            CalculatorKind::Emi => ["Loan Amount", "Total Payable", "Total Interest"],
            CalculatorKind::Sip | CalculatorKind::Fd => {
                ["Amount Invested", "Maturity Value", "Interest Earned"]
            }
        };

        Self {
            title: format!("{} Analysis", result.kind.label()),
            labels: labels.map(String::from),
            values: [
                result.principal_or_invested,
                result.maturity_or_payable,
                result.interest,
            ],
        }
    }
}

/// Formatted outcome of a successful calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub kind: CalculatorKind,
    pub result: CalculationResult,
    /// Result lines, currency formatted
    pub lines: Vec<String>,
    /// Headline figure spelled out
    pub words: String,
    pub chart: ChartSeries,
}

impl CalculationReport {
    pub fn from_result(result: CalculationResult) -> Self {
        let (lines, words) = match result.kind {
            CalculatorKind::Emi => {
                let emi = round_to_paise(result.installment.unwrap_or_default());
                (
                    vec![format!("Estimated Monthly EMI: {}", to_indian_currency(emi))],
                    format!(
                        "Estimated Monthly EMI (in words): {}",
                        to_indian_words(emi)
                    ),
                )
            }
            CalculatorKind::Sip | CalculatorKind::Fd => {
                let first = if result.kind == CalculatorKind::Fd {
                    "Principal Amount"
                } else {
                    "Total Investment"
                };

                let mut lines = vec![
                    format!("{}: {}", first, to_indian_currency(result.principal_or_invested)),
                    format!(
                        "Estimated Maturity Value: {}",
                        to_indian_currency(result.maturity_or_payable)
                    ),
                    format!("Interest Earned: {}", to_indian_currency(result.interest)),
                ];
                if let Some(pv) = result.present_value_adjusted {
                    lines.push(format!(
                        "Estimated Present Value (Inflation Adjusted): {}",
                        to_indian_currency(pv)
                    ));
                }

                (
                    lines,
                    format!(
                        "Estimated Maturity Value (in words): {}",
                        to_indian_words(result.maturity_or_payable)
                    ),
                )
            }
        };

        Self {
            kind: result.kind,
            chart: ChartSeries::for_result(&result),
            result,
            lines,
            words,
        }
    }

    /// Result lines joined into one line, as stored in the results log
    pub fn summary(&self) -> String {
        self.lines.join(" ")
    }
}

fn round_to_paise(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::compute_emi;

    fn sip_result() -> CalculationResult {
        CalculationResult {
            kind: CalculatorKind::Sip,
            principal_or_invested: 600_000.0,
            maturity_or_payable: 1_161_695.38,
            interest: 561_695.38,
            present_value_adjusted: Some(638_505.81),
            installment: None,
        }
    }

    #[test]
    fn test_sip_lines() {
        let report = CalculationReport::from_result(sip_result());

        assert_eq!(
            report.lines,
            vec![
                "Total Investment: ₹6,00,000",
                "Estimated Maturity Value: ₹11,61,695.38",
                "Interest Earned: ₹5,61,695.38",
                "Estimated Present Value (Inflation Adjusted): ₹6,38,505.81",
            ]
        );
        assert_eq!(
            report.words,
            "Estimated Maturity Value (in words): Eleven Lakh Sixty One Thousand Six Hundred Ninety Five"
        );
    }

    #[test]
    fn test_fd_first_line_is_principal() {
        let result = CalculationResult {
            kind: CalculatorKind::Fd,
            principal_or_invested: 100_000.0,
            maturity_or_payable: 140_255.17,
            interest: 40_255.17,
            present_value_adjusted: Some(109_893.6),
            installment: None,
        };
        let report = CalculationReport::from_result(result);

        assert_eq!(report.lines[0], "Principal Amount: ₹1,00,000");
        assert_eq!(report.lines.len(), 4);
        assert_eq!(report.chart.title, "FD Analysis");
        assert_eq!(report.chart.labels[0], "Amount Invested");
    }

    #[test]
    fn test_emi_report() {
        let result = compute_emi(120_000.0, 0.0, 1).unwrap();
        let report = CalculationReport::from_result(result);

        assert_eq!(report.lines, vec!["Estimated Monthly EMI: ₹10,000"]);
        assert_eq!(report.words, "Estimated Monthly EMI (in words): Ten Thousand");
        assert_eq!(report.summary(), "Estimated Monthly EMI: ₹10,000");
        assert_eq!(
            report.chart.labels,
            ["Loan Amount", "Total Payable", "Total Interest"].map(String::from)
        );
        assert_eq!(report.chart.values, [120_000.0, 120_000.0, 0.0]);
        assert_eq!(report.chart.title, "EMI Analysis");
    }

    #[test]
    fn test_emi_rounded_to_paise() {
        let result = compute_emi(100_000.0, 10.0, 1).unwrap();
        let report = CalculationReport::from_result(result);
        assert_eq!(report.lines[0], "Estimated Monthly EMI: ₹8,791.59");
        assert!(report.words.ends_with("Eight Thousand Seven Hundred Ninety Two"));
    }

    #[test]
    fn test_summary_joins_lines() {
        let report = CalculationReport::from_result(sip_result());
        assert!(report
            .summary()
            .starts_with("Total Investment: ₹6,00,000 Estimated Maturity Value:"));
        assert!(!report.summary().contains('\n'));
    }

    #[test]
    fn test_chart_series_values() {
        let chart = ChartSeries::for_result(&sip_result());
        assert_eq!(chart.title, "SIP Analysis");
        assert_eq!(chart.values, [600_000.0, 1_161_695.38, 561_695.38]);
    }
}
