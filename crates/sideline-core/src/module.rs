//! Module and session-type identifiers.
//!
//! A module is one discrete sub-test of the assessment. The session type
//! fixes which modules run and in which order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one discrete sub-test of the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Self-reported symptom severity inventory.
    Symptom,
    /// Five fixed orientation questions.
    Orientation,
    /// Word-list recall, three trials of the same list.
    ImmediateMemory,
    /// Digit span backwards plus months in reverse.
    Concentration,
    /// Neurological screen (neck, vision, reading, coordination, gait).
    Neurological,
    /// Stance trials with counted error events.
    Balance,
    /// Recall of the immediate-memory word list after a delay.
    DelayedRecall,
}

impl ModuleKind {
    /// Human-readable label used by rendering collaborators.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Symptom => "Symptom Evaluation",
            Self::Orientation => "Orientation",
            Self::ImmediateMemory => "Immediate Memory",
            Self::Concentration => "Concentration",
            Self::Neurological => "Neurological Screen",
            Self::Balance => "Balance Examination",
            Self::DelayedRecall => "Delayed Recall",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of administration being run.
///
/// The module order is fixed per session type at session creation and never
/// changes while the session is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Complete multi-module examination.
    Full,
    /// Abbreviated sideline screen for rapid triage.
    Emergency,
}

impl SessionType {
    /// Returns the fixed module order for this session type.
    pub fn module_order(&self) -> &'static [ModuleKind] {
        match self {
            Self::Full => &[
                ModuleKind::Symptom,
                ModuleKind::Orientation,
                ModuleKind::ImmediateMemory,
                ModuleKind::Concentration,
                ModuleKind::Neurological,
                ModuleKind::Balance,
                ModuleKind::DelayedRecall,
            ],
            Self::Emergency => &[
                ModuleKind::Orientation,
                ModuleKind::Concentration,
                ModuleKind::Balance,
            ],
        }
    }
}
