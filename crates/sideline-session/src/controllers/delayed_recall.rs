//! Delayed-recall module controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{DelayedRecallResult, ModuleResult};

/// Collects the delayed recall of the canonical word list.
///
/// The list must be the one captured from the first immediate-memory
/// trial; the orchestrator supplies it at activation.
pub struct DelayedRecallController {
    result: DelayedRecallResult,
}

impl DelayedRecallController {
    pub fn new(canonical_words: Vec<String>) -> Self {
        Self {
            result: DelayedRecallResult::new(canonical_words),
        }
    }

    pub fn result(&self) -> &DelayedRecallResult {
        &self.result
    }

    pub fn toggle_recalled(&mut self, word: &str) {
        self.result.toggle_recalled(word);
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::DelayedRecall(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for DelayedRecallController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::DelayedRecall
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::ToggleWord { word } => {
                self.result.toggle_recalled(word);
                Dispatch::Handled
            }
            Command::Next | Command::CompleteModule | Command::SkipModule => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
