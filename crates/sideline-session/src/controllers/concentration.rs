//! Concentration module controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{ConcentrationResult, ModuleResult};

/// Phase of the concentration module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Digit sequences are being presented.
    Digits,
    /// Months-in-reverse, a single judged response.
    Months,
}

/// Administers digit span backwards, then months in reverse.
///
/// Sequences are presented in order of increasing length. Presentation
/// stops after two consecutive misses; sequences never attempted are not
/// stored. The months task is judged with a single mark, which also
/// completes the module.
pub struct ConcentrationController {
    result: ConcentrationResult,
    sequences: Vec<Vec<u8>>,
    next_sequence: usize,
    phase: Phase,
}

impl ConcentrationController {
    pub fn new(sequences: Vec<Vec<u8>>) -> Self {
        let phase = if sequences.is_empty() {
            Phase::Months
        } else {
            Phase::Digits
        };
        Self {
            result: ConcentrationResult::new(),
            sequences,
            next_sequence: 0,
            phase,
        }
    }

    /// The sequence the examiner should read aloud, if any remain.
    pub fn presented_sequence(&self) -> Option<&[u8]> {
        if self.phase != Phase::Digits {
            return None;
        }
        self.sequences.get(self.next_sequence).map(Vec::as_slice)
    }

    /// Whether the module has moved on to months in reverse.
    pub fn months_pending(&self) -> bool {
        self.phase == Phase::Months
    }

    pub fn result(&self) -> &ConcentrationResult {
        &self.result
    }

    /// Records the transcribed response for the current sequence.
    pub fn record_digit_response(&mut self, raw: &str) -> bool {
        let Some(presented) = self.sequences.get(self.next_sequence).cloned() else {
            return false;
        };
        let correct = self.result.record_response(&presented, raw);
        self.after_trial();
        correct
    }

    fn record_marked(&mut self, correct: bool) {
        let Some(presented) = self.sequences.get(self.next_sequence).cloned() else {
            return;
        };
        self.result.record_marked(&presented, correct);
        self.after_trial();
    }

    fn after_trial(&mut self) {
        self.next_sequence += 1;
        if self.result.should_stop() || self.next_sequence >= self.sequences.len() {
            self.phase = Phase::Months;
        }
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::Concentration(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for ConcentrationController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Concentration
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match (command, self.phase) {
            (Command::RecordDigits { response }, Phase::Digits) => {
                self.record_digit_response(response);
                Dispatch::Handled
            }
            (Command::MarkCorrect, Phase::Digits) => {
                self.record_marked(true);
                Dispatch::Handled
            }
            (Command::MarkIncorrect, Phase::Digits) => {
                self.record_marked(false);
                Dispatch::Handled
            }
            (Command::MarkCorrect, Phase::Months) => {
                self.result.record_months(true);
                self.finish()
            }
            (Command::MarkIncorrect, Phase::Months) => {
                self.result.record_months(false);
                self.finish()
            }
            (Command::CompleteModule | Command::SkipModule, _) => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
