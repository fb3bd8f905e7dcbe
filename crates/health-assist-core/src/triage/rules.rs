//! The symptom keyword table.

use std::collections::HashSet;

use crate::models::SymptomRule;

use super::{TriageError, TriageResult};

/// Ordered, validated collection of symptom rules.
///
/// Order is the scan order of the matcher and decides which advice a label
/// carries when several rules share it: the first rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<SymptomRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// Build a rule set, lower-casing keywords and rejecting duplicates.
    pub fn new(rules: Vec<SymptomRule>) -> TriageResult<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());

        for mut rule in rules {
            rule.keyword = rule.keyword.trim().to_lowercase();

            if rule.keyword.is_empty() {
                return Err(TriageError::InvalidRule(format!(
                    "empty keyword for label '{}'",
                    rule.label
                )));
            }
            if rule.label.trim().is_empty() || rule.advice.trim().is_empty() {
                return Err(TriageError::InvalidRule(format!(
                    "keyword '{}' has no label or advice",
                    rule.keyword
                )));
            }
            if !seen.insert(rule.keyword.clone()) {
                return Err(TriageError::DuplicateKeyword(rule.keyword));
            }

            normalized.push(rule);
        }

        Ok(Self { rules: normalized })
    }

    /// The default symptom table.
    pub fn builtin() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn rules(&self) -> &[SymptomRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Canonical rule for a label: the first one in table order.
    pub fn canonical(&self, label: &str) -> Option<&SymptomRule> {
        self.rules.iter().find(|r| r.label == label)
    }

    /// Canonical advice for a label.
    pub fn advice_for(&self, label: &str) -> Option<&str> {
        self.canonical(label).map(|r| r.advice.as_str())
    }

    /// Distinct labels in first-appearance order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !labels.contains(&rule.label.as_str()) {
                labels.push(&rule.label);
            }
        }
        labels
    }
}

fn default_rules() -> Vec<SymptomRule> {
    vec![
        // General
        SymptomRule::new(
            "headache",
            "Headache",
            "Rest in a quiet room, stay hydrated, and consider pain relievers.",
        ),
        SymptomRule::new(
            "cough",
            "Cough",
            "Drink warm fluids and avoid irritants. Consult if persistent.",
        ),
        SymptomRule::new(
            "fever",
            "Fever",
            "Keep hydrated, monitor temperature, seek help if >39°C or >3 days.",
        ),
        SymptomRule::new(
            "sore throat",
            "Sore Throat",
            "Gargle warm salt water, avoid irritants.",
        ),
        // Digestive
        SymptomRule::new("nausea", "Nausea", "Eat small bland meals, stay hydrated."),
        SymptomRule::new(
            "vomiting",
            "Vomiting",
            "Sip water or oral rehydration solutions.",
        ),
        SymptomRule::new(
            "diarrhea",
            "Diarrhea",
            "Maintain hydration, avoid dairy, see doctor if severe.",
        ),
        SymptomRule::new("fatigue", "Fatigue", "Get rest and balanced nutrition."),
        SymptomRule::new("tired", "Fatigue", "Get rest and balanced nutrition."),
        SymptomRule::new(
            "dizzy",
            "Dizziness",
            "Sit or lie down, avoid sudden movements.",
        ),
        SymptomRule::new(
            "dizziness",
            "Dizziness",
            "Sit or lie down, avoid sudden movements.",
        ),
        // Cardiorespiratory
        SymptomRule::new(
            "chest pain",
            "Chest Pain",
            "Seek emergency medical attention immediately!",
        )
        .urgent(),
        SymptomRule::new(
            "shortness of breath",
            "Shortness of Breath",
            "Seek urgent medical help!",
        )
        .urgent(),
        SymptomRule::new(
            "difficulty breathing",
            "Shortness of Breath",
            "Seek urgent medical help!",
        )
        .urgent(),
        // Upper respiratory
        SymptomRule::new("runny nose", "Runny Nose", "Use saline sprays, rest."),
        SymptomRule::new(
            "congestion",
            "Nasal Congestion",
            "Use steam inhalation or decongestants.",
        ),
        SymptomRule::new("sneezing", "Sneezing", "Avoid allergens."),
        // Musculoskeletal and skin
        SymptomRule::new("muscle pain", "Muscle Pain", "Rest and warm compresses."),
        SymptomRule::new(
            "body ache",
            "Body Ache",
            "Rest, hydrate, consider painkillers.",
        ),
        SymptomRule::new(
            "rash",
            "Skin Rash",
            "Avoid scratching, use soothing lotions.",
        ),
        SymptomRule::new(
            "itchy skin",
            "Itchy Skin",
            "Use moisturizers, avoid irritants.",
        ),
        // Senses
        SymptomRule::new(
            "loss of smell",
            "Loss of Smell",
            "Monitor and consult if persistent.",
        ),
        SymptomRule::new(
            "loss of taste",
            "Loss of Taste",
            "Maintain oral hygiene, consult if persistent.",
        ),
        // Abdominal
        SymptomRule::new(
            "abdominal pain",
            "Abdominal Pain",
            "Monitor severity, seek help if severe.",
        ),
        SymptomRule::new(
            "stomach ache",
            "Stomach Ache",
            "Eat bland foods, avoid heavy meals.",
        ),
        SymptomRule::new("chills", "Chills", "Keep warm and rest."),
        SymptomRule::new(
            "blurred vision",
            "Blurred Vision",
            "Seek immediate medical attention!",
        )
        .urgent(),
        SymptomRule::new(
            "earache",
            "Earache",
            "Avoid inserting objects, consult if persists.",
        ),
        SymptomRule::new("joint pain", "Joint Pain", "Rest and apply ice or heat."),
        SymptomRule::new(
            "swelling",
            "Swelling",
            "Elevate and apply cold compresses.",
        ),
        SymptomRule::new(
            "bleeding",
            "Bleeding",
            "Apply pressure, seek emergency care if severe.",
        )
        .urgent(),
        SymptomRule::new(
            "palpitations",
            "Heart Palpitations",
            "Avoid stimulants, seek evaluation if frequent.",
        ),
    ]
}
