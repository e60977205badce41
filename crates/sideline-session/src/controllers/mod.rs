//! Module controller implementations, one per module kind.
//!
//! Controller-local presentation rules (question stepping, the digit-span
//! early stop, stance ordering) live here; scoring stays in
//! `sideline_core::scoring` behind the result entities.

mod balance;
mod concentration;
mod delayed_recall;
mod memory;
mod neurological;
mod orientation;
mod symptom;

pub use balance::BalanceController;
pub use concentration::ConcentrationController;
pub use delayed_recall::DelayedRecallController;
pub use memory::MemoryController;
pub use neurological::NeurologicalController;
pub use orientation::OrientationController;
pub use symptom::SymptomController;

use crate::controller::ModuleController;
use sideline_core::config::AssessmentConfig;
use sideline_core::module::ModuleKind;

/// Builds the controller for a module about to become active.
///
/// `canonical_words` is the word list captured from the first
/// immediate-memory trial; delayed recall scores against it.
pub fn build_controller(
    kind: ModuleKind,
    config: &AssessmentConfig,
    canonical_words: &[String],
) -> Box<dyn ModuleController> {
    match kind {
        ModuleKind::Symptom => Box::new(SymptomController::new(config.symptom_inventory.len())),
        ModuleKind::Orientation => {
            Box::new(OrientationController::new(config.orientation_questions.len()))
        }
        ModuleKind::ImmediateMemory => Box::new(MemoryController::new(config.word_list.clone())),
        ModuleKind::Concentration => {
            Box::new(ConcentrationController::new(config.digit_sequences.clone()))
        }
        ModuleKind::Neurological => {
            Box::new(NeurologicalController::new(&config.neurological_checks))
        }
        ModuleKind::Balance => Box::new(BalanceController::new()),
        ModuleKind::DelayedRecall => {
            Box::new(DelayedRecallController::new(canonical_words.to_vec()))
        }
    }
}
