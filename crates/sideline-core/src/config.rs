//! Configuration for an assessment administration.
//!
//! Stimulus material (word lists, digit sequences, the symptom inventory)
//! and timing bounds are data, not code. A config can be loaded from a TOML
//! file supplied by the host application; every field has a clinical default
//! so an empty file is a valid config.

use crate::error::{AssessmentError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one assessment administration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Word list presented in every immediate-memory trial.
    #[serde(default = "default_word_list")]
    pub word_list: Vec<String>,
    /// Digit sequences for the digit-span-backwards task, in presentation
    /// order (increasing length).
    #[serde(default = "default_digit_sequences")]
    pub digit_sequences: Vec<Vec<u8>>,
    /// Fixed symptom inventory rated 0-6 by the athlete.
    #[serde(default = "default_symptom_inventory")]
    pub symptom_inventory: Vec<String>,
    /// Orientation questions asked verbatim by the examiner.
    #[serde(default = "default_orientation_questions")]
    pub orientation_questions: Vec<String>,
    /// Named checks in the neurological screen.
    #[serde(default = "default_neurological_checks")]
    pub neurological_checks: Vec<String>,
    /// Observation window for one balance stance trial, in seconds.
    #[serde(default = "default_balance_trial_secs")]
    pub balance_trial_secs: u64,
    /// Bounded wait for a display show/hide confirmation, in milliseconds.
    #[serde(default = "default_display_timeout_ms")]
    pub display_timeout_ms: u64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            word_list: default_word_list(),
            digit_sequences: default_digit_sequences(),
            symptom_inventory: default_symptom_inventory(),
            orientation_questions: default_orientation_questions(),
            neurological_checks: default_neurological_checks(),
            balance_trial_secs: default_balance_trial_secs(),
            display_timeout_ms: default_display_timeout_ms(),
        }
    }
}

impl AssessmentConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AssessmentError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            AssessmentError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }
}

fn default_word_list() -> Vec<String> {
    ["finger", "penny", "blanket", "lemon", "insect"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_digit_sequences() -> Vec<Vec<u8>> {
    vec![
        vec![4, 9, 3],
        vec![3, 8, 1, 4],
        vec![6, 2, 9, 7, 1],
        vec![7, 1, 8, 4, 6, 2],
    ]
}

fn default_symptom_inventory() -> Vec<String> {
    [
        "Headache",
        "Pressure in head",
        "Neck pain",
        "Nausea or vomiting",
        "Dizziness",
        "Blurred vision",
        "Balance problems",
        "Sensitivity to light",
        "Sensitivity to noise",
        "Feeling slowed down",
        "Feeling like in a fog",
        "Don't feel right",
        "Difficulty concentrating",
        "Difficulty remembering",
        "Fatigue or low energy",
        "Confusion",
        "Drowsiness",
        "More emotional",
        "Irritability",
        "Sadness",
        "Nervous or anxious",
        "Trouble falling asleep",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_orientation_questions() -> Vec<String> {
    [
        "What month is it?",
        "What is the date today?",
        "What is the day of the week?",
        "What year is it?",
        "What time is it right now? (within 1 hour)",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_neurological_checks() -> Vec<String> {
    [
        "Full pain-free passive cervical range of motion",
        "Normal gaze without diplopia",
        "Reads aloud and follows instructions without difficulty",
        "Finger-to-nose coordination normal",
        "Tandem gait normal",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_balance_trial_secs() -> u64 {
    20
}

fn default_display_timeout_ms() -> u64 {
    5000
}
