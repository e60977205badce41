//! Symptom evaluation controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{ModuleResult, SymptomResult};

/// Walks the athlete through the symptom inventory.
///
/// Rating an item advances to the next; rating the last item completes
/// the module. Unrated items keep their default rating of zero.
pub struct SymptomController {
    result: SymptomResult,
    item: usize,
}

impl SymptomController {
    pub fn new(item_count: usize) -> Self {
        Self {
            result: SymptomResult::new(item_count),
            item: 0,
        }
    }

    pub fn current_item(&self) -> usize {
        self.item
    }

    pub fn result(&self) -> &SymptomResult {
        &self.result
    }

    /// Rates the current item and advances.
    pub fn rate_current(&mut self, rating: u8) -> bool {
        self.result.rate(self.item, rating);
        if self.item + 1 < self.result.item_count() {
            self.item += 1;
            false
        } else {
            true
        }
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::Symptom(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for SymptomController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Symptom
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::RateSymptom { rating } => {
                if self.rate_current(*rating) {
                    self.finish()
                } else {
                    Dispatch::Handled
                }
            }
            Command::Next => {
                if self.item + 1 < self.result.item_count() {
                    self.item += 1;
                }
                Dispatch::Handled
            }
            Command::Back => {
                self.item = self.item.saturating_sub(1);
                Dispatch::Handled
            }
            Command::CompleteModule | Command::SkipModule => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
