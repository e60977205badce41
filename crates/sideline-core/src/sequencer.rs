//! Module sequencing for one session.
//!
//! The sequencer owns the ordered module list, the completed set and the
//! current position. It never talks to the display subsystem; the session
//! orchestrator translates completions into presentation changes.

use crate::module::ModuleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the sequencer is within the module order.
///
/// The invariant "index is -1, in range, or equal to the sequence length"
/// holds by construction: those three cases are the three variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// Before `start()`. Integer view: -1.
    NotStarted,
    /// The module at this index is live.
    Active(usize),
    /// Past the last module. Integer view: the sequence length.
    Finished,
}

impl Position {
    /// The classic integer view (-1 / index / length) for persistence.
    pub fn as_index(&self, sequence_len: usize) -> i64 {
        match self {
            Self::NotStarted => -1,
            Self::Active(i) => *i as i64,
            Self::Finished => sequence_len as i64,
        }
    }
}

/// Sequences the modules of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSequencer {
    order: Vec<ModuleKind>,
    completed: BTreeSet<ModuleKind>,
    position: Position,
    /// Completion count already translated into advancement. Guards against
    /// stale duplicate completion notifications double-firing an advance.
    acknowledged_completions: usize,
}

impl ModuleSequencer {
    /// Creates a sequencer over a fixed module order.
    pub fn new(order: Vec<ModuleKind>) -> Self {
        Self {
            order,
            completed: BTreeSet::new(),
            position: Position::NotStarted,
            acknowledged_completions: 0,
        }
    }

    pub fn order(&self) -> &[ModuleKind] {
        &self.order
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The currently active module, if any.
    pub fn current(&self) -> Option<ModuleKind> {
        match self.position {
            Position::Active(i) => self.order.get(i).copied(),
            _ => None,
        }
    }

    /// Activates the first module, or finishes immediately on an empty order.
    pub fn start(&mut self) -> Position {
        self.position = if self.order.is_empty() {
            Position::Finished
        } else {
            Position::Active(0)
        };
        self.position
    }

    /// Marks the current module completed. Idempotent.
    ///
    /// Returns `true` only when the completed set actually changed; a
    /// duplicate completion signal returns `false` and changes nothing.
    pub fn complete_current(&mut self) -> bool {
        let Some(current) = self.current() else {
            tracing::debug!("complete_current with no active module, ignoring");
            return false;
        };
        let inserted = self.completed.insert(current);
        if !inserted {
            tracing::debug!(module = %current, "duplicate completion signal, ignoring");
        }
        inserted
    }

    /// Moves to the next module, or to `Finished` past the last one.
    ///
    /// Outside of an active module this is an absorbed no-op.
    pub fn advance(&mut self) -> Position {
        if let Position::Active(i) = self.position {
            self.position = if i + 1 < self.order.len() {
                Position::Active(i + 1)
            } else {
                Position::Finished
            };
        }
        self.position
    }

    /// Steps back one module, flooring at the first. Never un-completes.
    pub fn retreat(&mut self) -> Position {
        if let Position::Active(i) = self.position {
            if i > 0 {
                self.position = Position::Active(i - 1);
            }
        }
        self.position
    }

    pub fn is_completed(&self, module: ModuleKind) -> bool {
        self.completed.contains(&module)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn completed_modules(&self) -> &BTreeSet<ModuleKind> {
        &self.completed
    }

    /// Whether a completion has been recorded but not yet acknowledged.
    pub fn has_unacknowledged_completions(&self) -> bool {
        self.completed.len() > self.acknowledged_completions
    }

    /// Completions recorded since the last call, and acknowledges them.
    ///
    /// The orchestrator advances once per returned completion, so an
    /// external signal observed twice only ever produces one advancement.
    pub fn unacknowledged_completions(&mut self) -> usize {
        let delta = self
            .completed
            .len()
            .saturating_sub(self.acknowledged_completions);
        self.acknowledged_completions = self.completed.len();
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::SessionType;

    fn sequencer() -> ModuleSequencer {
        ModuleSequencer::new(SessionType::Emergency.module_order().to_vec())
    }

    #[test]
    fn test_start_activates_first_module() {
        let mut seq = sequencer();
        assert_eq!(seq.position(), Position::NotStarted);
        assert_eq!(seq.start(), Position::Active(0));
        assert_eq!(seq.current(), Some(ModuleKind::Orientation));
    }

    #[test]
    fn test_empty_order_finishes_immediately() {
        let mut seq = ModuleSequencer::new(Vec::new());
        assert_eq!(seq.start(), Position::Finished);
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn test_advance_walks_the_order_then_finishes() {
        let mut seq = sequencer();
        seq.start();
        assert_eq!(seq.advance(), Position::Active(1));
        assert_eq!(seq.current(), Some(ModuleKind::Concentration));
        assert_eq!(seq.advance(), Position::Active(2));
        assert_eq!(seq.advance(), Position::Finished);
        // Advancing past the end stays finished.
        assert_eq!(seq.advance(), Position::Finished);
    }

    #[test]
    fn test_complete_current_is_idempotent() {
        let mut seq = sequencer();
        seq.start();

        assert!(seq.complete_current());
        assert!(!seq.complete_current());
        assert_eq!(seq.completed_count(), 1);

        // Two completion signals, exactly one advancement.
        assert_eq!(seq.unacknowledged_completions(), 1);
        assert_eq!(seq.unacknowledged_completions(), 0);
    }

    #[test]
    fn test_retreat_floors_at_zero_and_keeps_completions() {
        let mut seq = sequencer();
        seq.start();
        seq.complete_current();
        seq.advance();

        assert_eq!(seq.retreat(), Position::Active(0));
        assert_eq!(seq.retreat(), Position::Active(0));
        assert!(seq.is_completed(ModuleKind::Orientation));
    }

    #[test]
    fn test_position_integer_view() {
        let mut seq = sequencer();
        let len = seq.order().len();
        assert_eq!(seq.position().as_index(len), -1);
        seq.start();
        assert_eq!(seq.position().as_index(len), 0);
        seq.advance();
        seq.advance();
        seq.advance();
        assert_eq!(seq.position().as_index(len), len as i64);
    }

    #[test]
    fn test_complete_with_no_active_module_is_absorbed() {
        let mut seq = sequencer();
        assert!(!seq.complete_current());
        seq.start();
        seq.advance();
        seq.advance();
        seq.advance();
        assert!(!seq.complete_current());
        assert_eq!(seq.completed_count(), 0);
    }
}
