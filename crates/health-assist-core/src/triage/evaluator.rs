//! Threshold checks for vital signs.
//!
//! Each vital is checked independently and fires at most one alert. All
//! comparisons are strict: a value sitting exactly on a threshold is normal.

use tracing::debug;

use crate::models::{VitalAlert, VitalCondition, VitalReading};

/// Fever above this temperature (°C).
pub const TEMPERATURE_HIGH_C: f64 = 38.0;
/// Hypothermia below this temperature (°C).
pub const TEMPERATURE_LOW_C: f64 = 36.0;

pub const HEART_RATE_HIGH_BPM: i32 = 100;
pub const HEART_RATE_LOW_BPM: i32 = 60;

pub const SYSTOLIC_HIGH_MMHG: i32 = 140;
pub const DIASTOLIC_HIGH_MMHG: i32 = 90;
pub const SYSTOLIC_LOW_MMHG: i32 = 90;
pub const DIASTOLIC_LOW_MMHG: i32 = 60;

/// Evaluate a reading; alerts come out in temperature, heart rate,
/// blood pressure order. An empty result means all vitals are normal.
pub fn evaluate(reading: &VitalReading) -> Vec<VitalAlert> {
    let alerts: Vec<VitalAlert> = [
        check_temperature(reading.temperature),
        check_heart_rate(reading.heart_rate),
        check_blood_pressure(reading.systolic, reading.diastolic),
    ]
    .into_iter()
    .flatten()
    .map(VitalAlert::from)
    .collect();

    debug!(?reading, alerts = alerts.len(), "vitals evaluated");
    alerts
}

fn check_temperature(celsius: f64) -> Option<VitalCondition> {
    if celsius > TEMPERATURE_HIGH_C {
        Some(VitalCondition::HighTemperature)
    } else if celsius < TEMPERATURE_LOW_C {
        Some(VitalCondition::LowTemperature)
    } else {
        None
    }
}

fn check_heart_rate(bpm: i32) -> Option<VitalCondition> {
    if bpm > HEART_RATE_HIGH_BPM {
        Some(VitalCondition::HighHeartRate)
    } else if bpm < HEART_RATE_LOW_BPM {
        Some(VitalCondition::LowHeartRate)
    } else {
        None
    }
}

// High is tested first, so a mixed reading like 150/50 counts as high.
fn check_blood_pressure(systolic: i32, diastolic: i32) -> Option<VitalCondition> {
    if systolic > SYSTOLIC_HIGH_MMHG || diastolic > DIASTOLIC_HIGH_MMHG {
        Some(VitalCondition::HighBloodPressure)
    } else if systolic < SYSTOLIC_LOW_MMHG || diastolic < DIASTOLIC_LOW_MMHG {
        Some(VitalCondition::LowBloodPressure)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(reading: VitalReading) -> Vec<VitalCondition> {
        evaluate(&reading).into_iter().map(|a| a.condition).collect()
    }

    #[test]
    fn test_normal_reading() {
        assert!(evaluate(&VitalReading::new(36.5, 75, 120, 80)).is_empty());
    }

    #[test]
    fn test_fever() {
        assert_eq!(
            conditions(VitalReading::new(38.5, 75, 120, 80)),
            vec![VitalCondition::HighTemperature]
        );
    }

    #[test]
    fn test_high_systolic() {
        assert_eq!(
            conditions(VitalReading::new(36.5, 75, 145, 80)),
            vec![VitalCondition::HighBloodPressure]
        );
    }

    #[test]
    fn test_temperature_boundaries() {
        assert!(conditions(VitalReading::new(38.0, 75, 120, 80)).is_empty());
        assert!(conditions(VitalReading::new(36.0, 75, 120, 80)).is_empty());
        assert_eq!(
            conditions(VitalReading::new(38.01, 75, 120, 80)),
            vec![VitalCondition::HighTemperature]
        );
        assert_eq!(
            conditions(VitalReading::new(35.99, 75, 120, 80)),
            vec![VitalCondition::LowTemperature]
        );
    }

    #[test]
    fn test_heart_rate_boundaries() {
        assert!(conditions(VitalReading::new(36.5, 60, 120, 80)).is_empty());
        assert!(conditions(VitalReading::new(36.5, 100, 120, 80)).is_empty());
        assert_eq!(
            conditions(VitalReading::new(36.5, 101, 120, 80)),
            vec![VitalCondition::HighHeartRate]
        );
        assert_eq!(
            conditions(VitalReading::new(36.5, 59, 120, 80)),
            vec![VitalCondition::LowHeartRate]
        );
    }

    #[test]
    fn test_blood_pressure_boundaries() {
        assert!(conditions(VitalReading::new(36.5, 75, 140, 90)).is_empty());
        assert!(conditions(VitalReading::new(36.5, 75, 90, 60)).is_empty());
        assert_eq!(
            conditions(VitalReading::new(36.5, 75, 120, 91)),
            vec![VitalCondition::HighBloodPressure]
        );
        assert_eq!(
            conditions(VitalReading::new(36.5, 75, 89, 70)),
            vec![VitalCondition::LowBloodPressure]
        );
        assert_eq!(
            conditions(VitalReading::new(36.5, 75, 110, 59)),
            vec![VitalCondition::LowBloodPressure]
        );
    }

    #[test]
    fn test_mixed_blood_pressure_is_high() {
        assert_eq!(
            conditions(VitalReading::new(36.5, 75, 150, 50)),
            vec![VitalCondition::HighBloodPressure]
        );
    }

    #[test]
    fn test_all_abnormal_in_fixed_order() {
        assert_eq!(
            conditions(VitalReading::new(35.0, 180, 200, 130)),
            vec![
                VitalCondition::LowTemperature,
                VitalCondition::HighHeartRate,
                VitalCondition::HighBloodPressure,
            ]
        );
    }
}
