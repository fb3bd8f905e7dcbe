//! Symptom rule and detection models.

use serde::{Deserialize, Serialize};

/// A single keyword rule in the symptom table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomRule {
    /// Literal substring searched for in normalized input
    pub keyword: String,
    /// Human-readable symptom name shown to the user
    pub label: String,
    /// Canned advice for this symptom
    pub advice: String,
    /// Advice asks the user to seek care immediately
    #[serde(default)]
    pub urgent: bool,
}

impl SymptomRule {
    /// Create a new non-urgent rule.
    pub fn new(keyword: &str, label: &str, advice: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            label: label.to_string(),
            advice: advice.to_string(),
            urgent: false,
        }
    }

    /// Mark this rule as urgent.
    pub fn urgent(mut self) -> Self {
        self.urgent = true;
        self
    }
}

/// A recognized symptom with its advice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomFinding {
    pub label: String,
    pub advice: String,
    /// Keyword that first matched this label
    pub matched_keyword: String,
    pub urgent: bool,
}

/// Ordered, label-deduplicated symptom findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionResult {
    findings: Vec<SymptomFinding>,
}

impl DetectionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding unless its label is already present.
    ///
    /// Returns `true` if the finding was added.
    pub fn push(&mut self, finding: SymptomFinding) -> bool {
        if self.contains(&finding.label) {
            return false;
        }
        self.findings.push(finding);
        true
    }

    /// Check whether a label has been detected.
    pub fn contains(&self, label: &str) -> bool {
        self.findings.iter().any(|f| f.label == label)
    }

    /// Labels in detection order.
    pub fn labels(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.label.as_str()).collect()
    }

    /// Advice associated with a detected label.
    pub fn advice_for(&self, label: &str) -> Option<&str> {
        self.findings
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.advice.as_str())
    }

    pub fn findings(&self) -> &[SymptomFinding] {
        &self.findings
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomFinding> {
        self.findings.iter()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether any detected symptom needs immediate attention.
    pub fn has_urgent(&self) -> bool {
        self.findings.iter().any(|f| f.urgent)
    }
}

/// What the symptom checker has to say about one round of input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymptomOutcome {
    /// Nothing was typed or recognized
    NoInput,
    /// Input was given but no keyword matched
    NoneDetected,
    /// At least one symptom was recognized
    Detected(DetectionResult),
}

impl SymptomOutcome {
    /// Classify a detection against the normalized input that produced it.
    pub fn classify(normalized_input: &str, result: DetectionResult) -> Self {
        if normalized_input.is_empty() {
            SymptomOutcome::NoInput
        } else if result.is_empty() {
            SymptomOutcome::NoneDetected
        } else {
            SymptomOutcome::Detected(result)
        }
    }

    /// The detection, if any symptoms were found.
    pub fn detection(&self) -> Option<&DetectionResult> {
        match self {
            SymptomOutcome::Detected(result) => Some(result),
            _ => None,
        }
    }
}
