//! Keyword-based symptom matcher.

use tracing::debug;

use crate::models::{DetectionResult, SymptomFinding, SymptomOutcome};

use super::RuleSet;

/// Build the matcher input from typed and transcribed text.
///
/// The two parts are joined with a single space, trimmed and lower-cased.
pub fn combine_input(typed: &str, transcript: &str) -> String {
    format!("{} {}", typed, transcript).trim().to_lowercase()
}

/// Scan `free_text` for every rule keyword in table order.
///
/// A label is reported once, at the position of its first matching rule,
/// with the canonical advice of the rule set.
pub fn detect(free_text: &str, rules: &RuleSet) -> DetectionResult {
    let text = free_text.to_lowercase();
    let mut result = DetectionResult::new();

    if text.is_empty() {
        return result;
    }

    for rule in rules.iter() {
        if result.contains(&rule.label) || !text.contains(rule.keyword.as_str()) {
            continue;
        }
        let canonical = rules.canonical(&rule.label).unwrap_or(rule);
        result.push(SymptomFinding {
            label: rule.label.clone(),
            advice: canonical.advice.clone(),
            matched_keyword: rule.keyword.clone(),
            urgent: canonical.urgent,
        });
    }

    debug!(matched = result.len(), "symptom scan complete");
    result
}

/// Symptom matcher bound to one rule set.
#[derive(Debug, Clone, Default)]
pub struct SymptomMatcher {
    rules: RuleSet,
}

impl SymptomMatcher {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Detect symptoms in already-normalized text.
    pub fn detect(&self, free_text: &str) -> DetectionResult {
        detect(free_text, &self.rules)
    }

    /// Combine typed and transcribed text and classify the result.
    ///
    /// Returns the normalized input alongside the outcome.
    pub fn assess(&self, typed: &str, transcript: &str) -> (String, SymptomOutcome) {
        let input = combine_input(typed, transcript);
        let result = self.detect(&input);
        let outcome = SymptomOutcome::classify(&input, result);
        (input, outcome)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
