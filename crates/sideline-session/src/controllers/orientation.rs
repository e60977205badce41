//! Orientation module controller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::Command;
use sideline_core::module::ModuleKind;
use sideline_core::result::{ModuleResult, OrientationResult};

/// Steps the examiner through the fixed orientation questions.
///
/// Each `mark correct` / `mark incorrect` judges the current question and
/// advances; the module completes itself once every question is judged.
pub struct OrientationController {
    result: OrientationResult,
    question: usize,
}

impl OrientationController {
    pub fn new(question_count: usize) -> Self {
        Self {
            result: OrientationResult::new(question_count),
            question: 0,
        }
    }

    /// Index of the question currently being asked.
    pub fn current_question(&self) -> usize {
        self.question
    }

    pub fn result(&self) -> &OrientationResult {
        &self.result
    }

    fn record(&mut self, correct: bool) -> Dispatch {
        self.result.record(self.question, correct);
        if self.result.answered_count() == self.result.question_count() {
            return self.finish();
        }
        // Move to the next unanswered question.
        if self.question + 1 < self.result.question_count() {
            self.question += 1;
        }
        Dispatch::Handled
    }

    fn finish(&mut self) -> Dispatch {
        let mut result = ModuleResult::Orientation(self.result.clone());
        result.complete();
        Dispatch::Completed(result)
    }
}

impl ModuleController for OrientationController {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Orientation
    }

    fn dispatch(&mut self, command: &Command) -> Dispatch {
        match command {
            Command::MarkCorrect => self.record(true),
            Command::MarkIncorrect => self.record(false),
            Command::Next => {
                if self.question + 1 < self.result.question_count() {
                    self.question += 1;
                }
                Dispatch::Handled
            }
            Command::Back => {
                self.question = self.question.saturating_sub(1);
                Dispatch::Handled
            }
            Command::CompleteModule | Command::SkipModule => self.finish(),
            _ => Dispatch::Ignored,
        }
    }
}
