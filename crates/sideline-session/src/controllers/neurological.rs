//! Neurological screen controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{ModuleResult, NeurologicalResult};

/// Steps through the named pass/fail checks of the neurological screen.
pub struct NeurologicalController {
    result: NeurologicalResult,
    check: usize,
}

impl NeurologicalController {
    pub fn new(check_names: &[String]) -> Self {
        Self {
            result: NeurologicalResult::new(check_names),
            check: 0,
        }
    }

    pub fn current_check(&self) -> usize {
        self.check
    }

    pub fn result(&self) -> &NeurologicalResult {
        &self.result
    }

    fn record(&mut self, passed: bool) -> Dispatch {
        self.result.record(self.check, passed);
        if self.check + 1 < self.result.check_count() {
            self.check += 1;
            Dispatch::Handled
        } else {
            self.finish()
        }
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::Neurological(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for NeurologicalController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Neurological
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::MarkCorrect => self.record(true),
            Command::MarkIncorrect => self.record(false),
            Command::Next => {
                if self.check + 1 < self.result.check_count() {
                    self.check += 1;
                }
                Dispatch::Handled
            }
            Command::Back => {
                self.check = self.check.saturating_sub(1);
                Dispatch::Handled
            }
            Command::CompleteModule | Command::SkipModule => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
