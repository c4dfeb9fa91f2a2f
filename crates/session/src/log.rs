//! Saved-results log
//!
//! Append-only and in-memory; lives as long as the session that owns it.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fincalc_core::CalculatorKind;

/// One saved calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: Uuid,
    pub kind: CalculatorKind,
    /// Report lines joined on one line
    pub summary: String,
    pub timestamp: DateTime<Local>,
}

impl SavedCalculation {
    /// "SIP Calculation (19/10/2026, 14:05:09): Total Investment: ..."
    pub fn display(&self) -> String {
        format!(
            "{} Calculation ({}): {}",
            self.kind.label(),
            self.timestamp.format("%d/%m/%Y, %H:%M:%S"),
            self.summary
        )
    }
}

/// Saved calculations, oldest first
#[derive(Debug, Clone, Default)]
pub struct ResultsLog {
    entries: VecDeque<SavedCalculation>,
    capacity: Option<usize>,
}

impl ResultsLog {
    /// Unbounded log
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that evicts its oldest entry once `capacity` is reached
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.filter(|c| *c > 0),
        }
    }

    /// Append a summary, stamping it with an id and the local time
    pub fn push(&mut self, kind: CalculatorKind, summary: impl Into<String>) -> &SavedCalculation {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                if let Some(evicted) = self.entries.pop_front() {
                    tracing::debug!(id = %evicted.id, kind = %evicted.kind, "Evicted oldest saved result");
                }
            }
        }

        self.entries.push_back(SavedCalculation {
            id: Uuid::new_v4(),
            kind,
            summary: summary.into(),
            timestamp: Local::now(),
        });

        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &VecDeque<SavedCalculation> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// One display line per entry, or the empty-log notice
    pub fn render(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No results saved yet.".to_string()];
        }
        self.entries.iter().map(SavedCalculation::display).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_in_order() {
        let mut log = ResultsLog::new();
        let first = log.push(CalculatorKind::Sip, "first").id;
        log.push(CalculatorKind::Emi, "second");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].id, first);
        assert_eq!(log.entries()[0].summary, "first");
        assert_eq!(log.entries()[1].kind, CalculatorKind::Emi);
        assert_ne!(log.entries()[0].id, log.entries()[1].id);
        assert!(log.entries()[0].timestamp <= log.entries()[1].timestamp);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = ResultsLog::with_capacity(Some(2));
        log.push(CalculatorKind::Sip, "a");
        log.push(CalculatorKind::Fd, "b");
        log.push(CalculatorKind::Emi, "c");

        let summaries: Vec<_> = log.entries().iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["b", "c"]);
    }

    #[test]
    fn test_capacity_holds_under_repeated_saves() {
        let mut log = ResultsLog::with_capacity(Some(3));
        for i in 0..10 {
            log.push(CalculatorKind::Sip, i.to_string());
        }

        assert_eq!(log.len(), 3);
        let summaries: Vec<_> = log.entries().iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["7", "8", "9"]);
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let mut log = ResultsLog::with_capacity(Some(0));
        assert_eq!(log.capacity(), None);
        log.push(CalculatorKind::Sip, "a");
        log.push(CalculatorKind::Sip, "b");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_render() {
        let mut log = ResultsLog::new();
        assert_eq!(log.render(), vec!["No results saved yet."]);

        log.push(CalculatorKind::Fd, "Principal Amount: ₹1,000");
        let lines = log.render();
        assert!(lines[0].starts_with("FD Calculation ("));
        assert!(lines[0].ends_with("): Principal Amount: ₹1,000"));
    }

    #[test]
    fn test_entry_serialization() {
        let mut log = ResultsLog::new();
        let entry = log.push(CalculatorKind::Sip, "x").clone();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "sip");
        assert_eq!(json["summary"], "x");
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }
}
