//! Vital-sign models.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::triage::{TriageError, TriageResult};

/// One snapshot of the four measured vitals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VitalReading {
    /// Body temperature in °C
    pub temperature: f64,
    /// Heart rate in beats per minute
    pub heart_rate: i32,
    /// Systolic blood pressure in mmHg
    pub systolic: i32,
    /// Diastolic blood pressure in mmHg
    pub diastolic: i32,
}

impl VitalReading {
    pub fn new(temperature: f64, heart_rate: i32, systolic: i32, diastolic: i32) -> Self {
        Self {
            temperature,
            heart_rate,
            systolic,
            diastolic,
        }
    }
}

impl Default for VitalReading {
    /// Resting adult reading used as the initial form value.
    fn default() -> Self {
        Self::new(36.5, 75, 120, 80)
    }
}

/// Where a reading came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VitalsMode {
    #[default]
    UserInput,
    RandomSimulation,
}

/// The vital a condition belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    Temperature,
    HeartRate,
    BloodPressure,
}

/// Abnormal vital conditions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VitalCondition {
    HighTemperature,
    LowTemperature,
    HighHeartRate,
    LowHeartRate,
    HighBloodPressure,
    LowBloodPressure,
}

impl VitalCondition {
    /// Display name of the condition.
    pub fn label(self) -> &'static str {
        match self {
            VitalCondition::HighTemperature => "High Temperature (Fever)",
            VitalCondition::LowTemperature => "Low Temperature",
            VitalCondition::HighHeartRate => "High Heart Rate",
            VitalCondition::LowHeartRate => "Low Heart Rate",
            VitalCondition::HighBloodPressure => "High Blood Pressure",
            VitalCondition::LowBloodPressure => "Low Blood Pressure",
        }
    }

    /// Canned advice for the condition.
    pub fn advice(self) -> &'static str {
        match self {
            VitalCondition::HighTemperature => "Rest and hydrate. Seek help if fever persists.",
            VitalCondition::LowTemperature => "Stay warm and monitor for chills.",
            VitalCondition::HighHeartRate => "Rest and breathe deeply.",
            VitalCondition::LowHeartRate => "Monitor. Seek advice if accompanied by symptoms.",
            VitalCondition::HighBloodPressure => "Reduce salt, manage stress.",
            VitalCondition::LowBloodPressure => "Stay hydrated, avoid sudden movements.",
        }
    }

    pub fn vital(self) -> VitalKind {
        match self {
            VitalCondition::HighTemperature | VitalCondition::LowTemperature => {
                VitalKind::Temperature
            }
            VitalCondition::HighHeartRate | VitalCondition::LowHeartRate => VitalKind::HeartRate,
            VitalCondition::HighBloodPressure | VitalCondition::LowBloodPressure => {
                VitalKind::BloodPressure
            }
        }
    }
}

impl fmt::Display for VitalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An out-of-range vital with its advice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VitalAlert {
    pub condition: VitalCondition,
    /// Display name of `condition`, e.g. "High Temperature (Fever)"
    pub label: String,
    pub advice: String,
}

impl From<VitalCondition> for VitalAlert {
    fn from(condition: VitalCondition) -> Self {
        Self {
            condition,
            label: condition.label().to_string(),
            advice: condition.advice().to_string(),
        }
    }
}

/// Inclusive ranges a reading is allowed to take.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalBounds {
    pub temperature: RangeInclusive<f64>,
    pub heart_rate: RangeInclusive<i32>,
    pub systolic: RangeInclusive<i32>,
    pub diastolic: RangeInclusive<i32>,
}

impl VitalBounds {
    /// Limits of manually entered values.
    pub const INPUT: VitalBounds = VitalBounds {
        temperature: 35.0..=42.0,
        heart_rate: 40..=180,
        systolic: 90..=200,
        diastolic: 60..=130,
    };

    /// Ranges used when simulating a reading.
    pub const SIMULATION: VitalBounds = VitalBounds {
        temperature: 36.0..=40.0,
        heart_rate: 60..=150,
        systolic: 100..=180,
        diastolic: 70..=110,
    };

    /// Check every vital of `reading` against these bounds.
    ///
    /// Reports the first vital that falls outside its range.
    pub fn validate(&self, reading: &VitalReading) -> TriageResult<()> {
        if !self.temperature.contains(&reading.temperature) {
            return Err(out_of_range(
                "temperature",
                reading.temperature,
                *self.temperature.start(),
                *self.temperature.end(),
            ));
        }
        let integer_checks = [
            ("heart rate", reading.heart_rate, &self.heart_rate),
            ("systolic", reading.systolic, &self.systolic),
            ("diastolic", reading.diastolic, &self.diastolic),
        ];
        for (vital, value, range) in integer_checks {
            if !range.contains(&value) {
                return Err(out_of_range(
                    vital,
                    f64::from(value),
                    f64::from(*range.start()),
                    f64::from(*range.end()),
                ));
            }
        }
        Ok(())
    }

    pub fn contains(&self, reading: &VitalReading) -> bool {
        self.validate(reading).is_ok()
    }
}

fn out_of_range(vital: &'static str, value: f64, min: f64, max: f64) -> TriageError {
    TriageError::OutOfRange {
        vital,
        value,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reading_is_within_input_bounds() {
        assert!(VitalBounds::INPUT.contains(&VitalReading::default()));
    }

    #[test]
    fn test_input_bounds_are_inclusive() {
        let low = VitalReading::new(35.0, 40, 90, 60);
        let high = VitalReading::new(42.0, 180, 200, 130);
        assert!(VitalBounds::INPUT.contains(&low));
        assert!(VitalBounds::INPUT.contains(&high));
    }

    #[test]
    fn test_validate_names_offending_vital() {
        let reading = VitalReading::new(36.5, 75, 210, 80);
        match VitalBounds::INPUT.validate(&reading) {
            Err(TriageError::OutOfRange { vital, value, .. }) => {
                assert_eq!(vital, "systolic");
                assert_eq!(value, 210.0);
            }
            other => panic!("expected out of range error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_temperature_rejected() {
        let reading = VitalReading::new(f64::NAN, 75, 120, 80);
        assert!(VitalBounds::INPUT.validate(&reading).is_err());
    }

    #[test]
    fn test_condition_labels_and_kinds() {
        assert_eq!(
            VitalCondition::HighTemperature.to_string(),
            "High Temperature (Fever)"
        );
        assert_eq!(VitalCondition::LowHeartRate.vital(), VitalKind::HeartRate);
        assert_eq!(
            VitalCondition::HighBloodPressure.vital(),
            VitalKind::BloodPressure
        );
    }

    #[test]
    fn test_alert_from_condition_carries_advice() {
        let alert = VitalAlert::from(VitalCondition::LowBloodPressure);
        assert_eq!(alert.label, "Low Blood Pressure");
        assert_eq!(alert.advice, "Stay hydrated, avoid sudden movements.");
    }
}
