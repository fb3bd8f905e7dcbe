//! Symptom and vital-sign triage.
//!
//! Pipeline: Input Combination → Symptom Matching → Vital Evaluation → Report

mod evaluator;
mod matcher;
mod rules;

pub use evaluator::*;
pub use matcher::*;
pub use rules::*;

use thiserror::Error;

use crate::models::{VitalBounds, VitalReading, VitalsMode};
use crate::report::TriageReport;

/// Triage errors.
///
/// Matching and evaluation never fail; these cover rule tables and
/// user-supplied readings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriageError {
    #[error("Duplicate symptom keyword: {0}")]
    DuplicateKeyword(String),

    #[error("Invalid symptom rule: {0}")]
    InvalidRule(String),

    #[error("{vital} value {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        vital: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type TriageResult<T> = Result<T, TriageError>;

/// Runs the matcher and the evaluator for one interaction.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    matcher: SymptomMatcher,
}

impl TriageEngine {
    /// Create an engine over a custom rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            matcher: SymptomMatcher::new(rules),
        }
    }

    /// Check a user-entered reading against the input bounds, then evaluate it.
    pub fn triage_entered_vitals(
        &self,
        typed: &str,
        transcript: &str,
        reading: VitalReading,
    ) -> TriageResult<TriageReport> {
        VitalBounds::INPUT.validate(&reading)?;
        Ok(self.triage(typed, transcript, VitalsMode::UserInput, reading))
    }

    /// Full triage of one round of input.
    pub fn triage(
        &self,
        typed: &str,
        transcript: &str,
        mode: VitalsMode,
        reading: VitalReading,
    ) -> TriageReport {
        let (input, symptoms) = self.matcher.assess(typed, transcript);
        let alerts = evaluate(&reading);
        TriageReport::new(input, symptoms, mode, reading, alerts)
    }

    /// Get the matcher for direct access.
    pub fn matcher(&self) -> &SymptomMatcher {
        &self.matcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SymptomOutcome, VitalCondition};

    #[test]
    fn test_triage_combines_both_checks() {
        let engine = TriageEngine::default();
        let report = engine.triage(
            "I have a fever",
            "and a cough",
            VitalsMode::UserInput,
            VitalReading::new(38.5, 75, 120, 80),
        );

        assert_eq!(report.input_text, "i have a fever and a cough");
        let labels = report
            .symptoms
            .detection()
            .map(|d| d.labels())
            .unwrap_or_default();
        assert_eq!(labels, vec!["Cough", "Fever"]);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].condition, VitalCondition::HighTemperature);
    }

    #[test]
    fn test_entered_vitals_are_bounded() {
        let engine = TriageEngine::default();
        let err = engine
            .triage_entered_vitals("", "", VitalReading::new(43.0, 75, 120, 80))
            .unwrap_err();
        assert!(matches!(
            err,
            TriageError::OutOfRange {
                vital: "temperature",
                ..
            }
        ));

        let report = engine
            .triage_entered_vitals("", "", VitalReading::default())
            .unwrap();
        assert_eq!(report.symptoms, SymptomOutcome::NoInput);
        assert!(report.alerts.is_empty());
    }
}
