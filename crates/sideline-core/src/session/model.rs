//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! administration of the assessment to one athlete.

use crate::module::{ModuleKind, SessionType};
use crate::sequencer::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One administration of the ordered module sequence to one athlete.
///
/// A session carries:
/// - Creation and last-update timestamps
/// - The session type and the fixed module order it implies
/// - The monotonically growing completed-module set
/// - The current position within the order
///
/// This is the "pure" domain model; it is owned exclusively by the session
/// orchestrator while the flow is live and handed to the persistence
/// collaborator when the flow exits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// The kind of administration being run
    pub session_type: SessionType,
    /// Ordered module sequence, fixed at creation
    pub module_order: Vec<ModuleKind>,
    /// Modules completed so far; each identifier enters exactly once
    #[serde(default)]
    pub completed_modules: BTreeSet<ModuleKind>,
    /// Current position within the module order
    pub position: Position,
}

impl Session {
    /// Creates a fresh, not-yet-started session of the given type.
    pub fn new(session_type: SessionType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now.clone(),
            updated_at: now,
            session_type,
            module_order: session_type.module_order().to_vec(),
            completed_modules: BTreeSet::new(),
            position: Position::NotStarted,
        }
    }

    /// Refreshes the last-updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// Records a module completion. Idempotent.
    pub fn mark_completed(&mut self, module: ModuleKind) {
        if self.completed_modules.insert(module) {
            self.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_matches_its_type() {
        let session = Session::new(SessionType::Emergency);
        assert_eq!(session.module_order, SessionType::Emergency.module_order());
        assert_eq!(session.position, Position::NotStarted);
        assert!(session.completed_modules.is_empty());
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_sessions_have_unique_ids() {
        let a = Session::new(SessionType::Full);
        let b = Session::new(SessionType::Full);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut session = Session::new(SessionType::Emergency);
        session.mark_completed(ModuleKind::Orientation);
        session.mark_completed(ModuleKind::Orientation);
        assert_eq!(session.completed_modules.len(), 1);
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let session = Session::new(SessionType::Full);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
