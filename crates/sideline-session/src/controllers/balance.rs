//! Balance module controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{BalanceResult, ModuleResult, Stance};

const STANCES: [Stance; 3] = [Stance::DoubleLeg, Stance::SingleLeg, Stance::Tandem];

/// Counts error events across the three stance trials.
///
/// The observation timer is owned by the rendering collaborator; this
/// controller only counts `mark error` events for the stance in progress
/// and steps to the next stance on `next`.
pub struct BalanceController {
    result: BalanceResult,
}

impl BalanceController {
    pub fn new() -> Self {
        let mut result = BalanceResult::new();
        result.begin_trial(STANCES[0]);
        Self { result }
    }

    /// The stance currently under observation.
    pub fn current_stance(&self) -> Stance {
        self.result
            .trials()
            .last()
            .map(|t| t.stance)
            .unwrap_or(STANCES[0])
    }

    pub fn result(&self) -> &BalanceResult {
        &self.result
    }

    /// Counts one error event in the current stance trial.
    pub fn record_error(&mut self) {
        self.result.record_error();
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::Balance(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl Default for BalanceController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleController for BalanceController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Balance
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::RecordError => {
                self.result.record_error();
                Dispatch::Handled
            }
            Command::Next => {
                let next = self.result.trials().len();
                if next < STANCES.len() {
                    self.result.begin_trial(STANCES[next]);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_count_against_the_current_stance() {
        let mut controller = BalanceController::new();
        assert_eq!(controller.current_stance(), Stance::DoubleLeg);

        for _ in 0..3 {
            controller.dispatch(&Command::RecordError);
        }
        controller.dispatch(&Command::Next);
        assert_eq!(controller.current_stance(), Stance::SingleLeg);
        controller.dispatch(&Command::RecordError);

        assert_eq!(controller.result().trial_score(0), 3);
        assert_eq!(controller.result().trial_score(1), 1);
    }

    #[test]
    fn test_next_after_tandem_completes() {
        let mut controller = BalanceController::new();
        controller.dispatch(&Command::Next);
        controller.dispatch(&Command::Next);
        assert_eq!(controller.current_stance(), Stance::Tandem);

        let Dispatch::Completed(result) = controller.dispatch(&Command::Next) else {
            panic!("expected completion after the last stance");
        };
        assert_eq!(result.score(), 0);
    }

    #[test]
    fn test_three_errors_in_the_window_score_three() {
        let mut controller = BalanceController::new();
        for _ in 0..3 {
            controller.record_error();
        }
        let Dispatch::Completed(result) = controller.dispatch(&Command::CompleteModule) else {
            panic!("expected completion");
        };
        assert_eq!(result.score(), 3);
    }
}
