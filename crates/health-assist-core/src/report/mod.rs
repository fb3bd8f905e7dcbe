//! Triage report export.

mod text;

pub use text::*;

use serde::{Deserialize, Serialize};

use crate::models::{SymptomOutcome, VitalAlert, VitalReading, VitalsMode};

/// Result of one full triage round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageReport {
    /// Unique report ID
    pub report_id: String,
    /// Creation timestamp (RFC 3339)
    pub generated_at: String,
    /// Normalized symptom text that was scanned
    pub input_text: String,
    pub symptoms: SymptomOutcome,
    pub vitals_mode: VitalsMode,
    pub reading: VitalReading,
    /// Empty when all vitals are normal
    pub alerts: Vec<VitalAlert>,
}

impl TriageReport {
    pub fn new(
        input_text: String,
        symptoms: SymptomOutcome,
        vitals_mode: VitalsMode,
        reading: VitalReading,
        alerts: Vec<VitalAlert>,
    ) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_text,
            symptoms,
            vitals_mode,
            reading,
            alerts,
        }
    }

    /// Whether anything in the report asks the user to seek care now.
    pub fn needs_attention(&self) -> bool {
        let urgent_symptom = self
            .symptoms
            .detection()
            .is_some_and(|d| d.has_urgent());
        urgent_symptom || !self.alerts.is_empty()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export as plain text.
    pub fn to_text(&self) -> String {
        let mut out = render_symptoms(&self.symptoms);
        out.push('\n');
        out.push_str(&render_vitals(&self.reading, self.vitals_mode, &self.alerts));
        out
    }
}
