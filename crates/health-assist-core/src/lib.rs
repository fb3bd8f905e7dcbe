//! Health Assist Core Library
//!
//! Symptom matching and vital-sign triage for the Health Assist tool.
//!
//! # Architecture
//!
//! ```text
//!   Typed text ──┐
//!                ├─→ combine_input ─→ SymptomMatcher ─→ SymptomOutcome ─┐
//!   Transcript ──┘        (RuleSet: keyword → label, advice)            │
//!                                                                       ├─→ TriageReport
//!   Entered vitals ──┐                                                  │      │
//!                    ├─→ VitalReading ─→ evaluate ─→ Vec<VitalAlert> ───┘      ▼
//!   VitalSimulator ──┘                                                  JSON / text
//!
//!   Room name ─→ ConsultRoom ─→ meeting URL
//! ```
//!
//! # Core Principle
//!
//! **The engine is pure.** Matching and evaluation do no I/O, hold no state,
//! and never fail; the same input always yields the same output.
//!
//! # Modules
//!
//! - [`models`]: Domain types (SymptomRule, DetectionResult, VitalReading, VitalAlert, etc.)
//! - [`triage`]: Rule table, symptom matcher and vital threshold evaluator
//! - [`simulator`]: Random vital-sign generator
//! - [`teleconsult`]: Video-consultation room links
//! - [`report`]: JSON and text export

pub mod models;
pub mod report;
pub mod simulator;
pub mod teleconsult;
pub mod triage;

// Re-export commonly used types
pub use models::{
    DetectionResult, SymptomFinding, SymptomOutcome, SymptomRule, VitalAlert, VitalBounds,
    VitalCondition, VitalKind, VitalReading, VitalsMode,
};
pub use report::TriageReport;
pub use simulator::VitalSimulator;
pub use teleconsult::ConsultRoom;
pub use triage::{combine_input, detect, evaluate, RuleSet, SymptomMatcher, TriageEngine};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HealthAssistError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Teleconsultation error: {0}")]
    Teleconsult(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<triage::TriageError> for HealthAssistError {
    fn from(e: triage::TriageError) -> Self {
        HealthAssistError::InvalidInput(e.to_string())
    }
}

impl From<teleconsult::TeleconsultError> for HealthAssistError {
    fn from(e: teleconsult::TeleconsultError) -> Self {
        HealthAssistError::Teleconsult(e.to_string())
    }
}

impl From<serde_json::Error> for HealthAssistError {
    fn from(e: serde_json::Error) -> Self {
        HealthAssistError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Exported Functions
// =========================================================================

/// Detect symptoms in typed and transcribed text using the built-in table.
#[uniffi::export]
pub fn detect_symptoms(typed: String, transcript: String) -> FfiSymptomReport {
    let (input, outcome) = SymptomMatcher::default().assess(&typed, &transcript);
    FfiSymptomReport::from_outcome(input, &outcome)
}

/// Evaluate a reading against the alert thresholds.
#[uniffi::export]
pub fn evaluate_vitals(reading: FfiVitalReading) -> Vec<FfiVitalAlert> {
    evaluate(&reading.into())
        .into_iter()
        .map(FfiVitalAlert::from)
        .collect()
}

/// Check a manually entered reading against the input limits.
#[uniffi::export]
pub fn validate_vitals(reading: FfiVitalReading) -> Result<(), HealthAssistError> {
    VitalBounds::INPUT.validate(&reading.into())?;
    Ok(())
}

/// Generate a simulated reading, optionally from a fixed seed.
#[uniffi::export]
pub fn simulate_vitals(seed: Option<u64>) -> FfiVitalReading {
    let reading = match seed {
        Some(seed) => VitalSimulator::seeded(seed).sample(),
        None => VitalSimulator::new().sample(),
    };
    reading.into()
}

/// Meeting URL for a user-entered room name.
#[uniffi::export]
pub fn consult_url(room: String) -> Result<String, HealthAssistError> {
    Ok(ConsultRoom::parse(&room)?.url())
}

/// Full triage of text and a user-entered reading, exported as JSON.
#[uniffi::export]
pub fn triage_json(
    typed: String,
    transcript: String,
    reading: FfiVitalReading,
) -> Result<String, HealthAssistError> {
    let report =
        TriageEngine::default().triage_entered_vitals(&typed, &transcript, reading.into())?;
    Ok(report.to_json()?)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe vital reading.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVitalReading {
    pub temperature: f64,
    pub heart_rate: i32,
    pub systolic: i32,
    pub diastolic: i32,
}

impl From<VitalReading> for FfiVitalReading {
    fn from(reading: VitalReading) -> Self {
        Self {
            temperature: reading.temperature,
            heart_rate: reading.heart_rate,
            systolic: reading.systolic,
            diastolic: reading.diastolic,
        }
    }
}

impl From<FfiVitalReading> for VitalReading {
    fn from(reading: FfiVitalReading) -> Self {
        VitalReading::new(
            reading.temperature,
            reading.heart_rate,
            reading.systolic,
            reading.diastolic,
        )
    }
}

/// FFI-safe vital alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVitalAlert {
    pub condition: String,
    pub advice: String,
}

impl From<VitalAlert> for FfiVitalAlert {
    fn from(alert: VitalAlert) -> Self {
        Self {
            condition: alert.label,
            advice: alert.advice,
        }
    }
}

/// FFI-safe symptom finding.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptomFinding {
    pub label: String,
    pub advice: String,
    pub urgent: bool,
}

impl From<&SymptomFinding> for FfiSymptomFinding {
    fn from(finding: &SymptomFinding) -> Self {
        Self {
            label: finding.label.clone(),
            advice: finding.advice.clone(),
            urgent: finding.urgent,
        }
    }
}

/// FFI-safe symptom check result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptomReport {
    pub input_text: String,
    /// "no_input", "none_detected" or "detected"
    pub status: String,
    pub findings: Vec<FfiSymptomFinding>,
}

impl FfiSymptomReport {
    fn from_outcome(input_text: String, outcome: &SymptomOutcome) -> Self {
        let (status, findings) = match outcome {
            SymptomOutcome::NoInput => ("no_input", Vec::new()),
            SymptomOutcome::NoneDetected => ("none_detected", Vec::new()),
            SymptomOutcome::Detected(result) => {
                ("detected", result.iter().map(FfiSymptomFinding::from).collect())
            }
        };
        Self {
            input_text,
            status: status.to_string(),
            findings,
        }
    }
}
