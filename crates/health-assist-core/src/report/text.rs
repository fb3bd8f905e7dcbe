//! Plain-text rendering of triage results.

use crate::models::{SymptomOutcome, VitalAlert, VitalReading, VitalsMode};

pub const NO_INPUT_MESSAGE: &str = "No symptoms entered.";
pub const NO_SYMPTOMS_MESSAGE: &str = "No major symptoms detected. You seem fine.";
pub const VITALS_NORMAL_MESSAGE: &str = "All vitals appear normal!";

/// Render the symptom section.
pub fn render_symptoms(outcome: &SymptomOutcome) -> String {
    match outcome {
        SymptomOutcome::NoInput => format!("{}\n", NO_INPUT_MESSAGE),
        SymptomOutcome::NoneDetected => format!("{}\n", NO_SYMPTOMS_MESSAGE),
        SymptomOutcome::Detected(result) => {
            let mut out = format!("Detected symptoms: {}\n", result.labels().join(", "));
            for finding in result.iter() {
                let marker = if finding.urgent { "[urgent] " } else { "" };
                out.push_str(&format!("  {}: {}{}\n", finding.label, marker, finding.advice));
            }
            out
        }
    }
}

/// Render the vitals section: the reading, then alerts or the all-clear.
pub fn render_vitals(reading: &VitalReading, mode: VitalsMode, alerts: &[VitalAlert]) -> String {
    let heading = match mode {
        VitalsMode::UserInput => "Entered Vitals:",
        VitalsMode::RandomSimulation => "Simulated Vitals:",
    };
    let mut out = format!(
        "{}\n  Temperature: {:.1} °C\n  Heart Rate: {} bpm\n  Blood Pressure: {}/{} mmHg\n",
        heading, reading.temperature, reading.heart_rate, reading.systolic, reading.diastolic
    );

    if alerts.is_empty() {
        out.push_str(VITALS_NORMAL_MESSAGE);
        out.push('\n');
        return out;
    }

    out.push_str("Abnormal Vitals Detected:\n");
    for alert in alerts {
        out.push_str(&format!("  • {}\n", alert.label));
    }
    out.push_str("Health Suggestions:\n");
    for alert in alerts {
        out.push_str(&format!("  {}\n", alert.advice));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{evaluate, SymptomMatcher};

    #[test]
    fn test_render_detected_symptoms() {
        let (_, outcome) = SymptomMatcher::default().assess("headache and chest pain", "");
        let text = render_symptoms(&outcome);

        assert!(text.starts_with("Detected symptoms: Headache, Chest Pain\n"));
        assert!(text.contains("  Chest Pain: [urgent] Seek emergency medical attention immediately!"));
    }

    #[test]
    fn test_render_empty_states_differ() {
        assert_eq!(render_symptoms(&SymptomOutcome::NoInput), "No symptoms entered.\n");
        assert_eq!(
            render_symptoms(&SymptomOutcome::NoneDetected),
            "No major symptoms detected. You seem fine.\n"
        );
    }

    #[test]
    fn test_render_normal_vitals() {
        let reading = VitalReading::default();
        let text = render_vitals(&reading, VitalsMode::UserInput, &evaluate(&reading));

        assert!(text.contains("Temperature: 36.5 °C"));
        assert!(text.contains("Blood Pressure: 120/80 mmHg"));
        assert!(text.ends_with("All vitals appear normal!\n"));
    }

    #[test]
    fn test_render_alerts() {
        let reading = VitalReading::new(39.2, 120, 120, 80);
        let text = render_vitals(&reading, VitalsMode::RandomSimulation, &evaluate(&reading));

        assert!(text.starts_with("Simulated Vitals:\n"));
        assert!(text.contains("  • High Temperature (Fever)\n  • High Heart Rate\n"));
        assert!(text.contains("Health Suggestions:\n  Rest and hydrate. Seek help if fever persists.\n"));
    }
}
