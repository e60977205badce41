//! Immediate-memory module controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{ImmediateMemoryResult, ModuleResult, MEMORY_TRIAL_COUNT};

/// Runs the three recall trials of the same word list.
///
/// The first trial begins when the controller is built. `next` seals the
/// current trial and starts the following one; after the last trial it
/// completes the module. Binary correctness marks mean nothing on a recall
/// grid and are ignored.
pub struct MemoryController {
    result: ImmediateMemoryResult,
}

impl MemoryController {
    pub fn new(word_list: Vec<String>) -> Self {
        let mut result = ImmediateMemoryResult::new(word_list);
        result.begin_trial();
        Self { result }
    }

    /// 1-based number of the trial currently collecting recall.
    pub fn current_trial(&self) -> usize {
        self.result.trials_run()
    }

    pub fn result(&self) -> &ImmediateMemoryResult {
        &self.result
    }

    /// Toggles one word on the current trial's recall grid.
    pub fn toggle_recalled(&mut self, word: &str) {
        self.result.toggle_recalled(word);
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::ImmediateMemory(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for MemoryController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::ImmediateMemory
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::ToggleWord { word } => {
                self.result.toggle_recalled(word);
                Dispatch::Handled
            }
            Command::Next => {
                if self.result.trials_run() < MEMORY_TRIAL_COUNT {
                    self.result.begin_trial();
                    Dispatch::Handled
                } else {
                    self.finish()
                }
            }
            Command::CompleteModule | Command::SkipModule => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
