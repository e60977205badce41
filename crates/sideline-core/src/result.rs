//! Per-module result entities.
//!
//! Each module kind has its own result variant holding the raw responses
//! recorded while the module was live. Derived scores are never stored:
//! every score accessor recomputes from the raw fields via the pure rules
//! in [`crate::scoring`], so a derived value can never diverge from its
//! inputs.
//!
//! A result is created empty when its module first becomes active, mutated
//! only by that module's controller, and frozen at completion. Mutating a
//! frozen result is a programming error and panics.

use crate::module::ModuleKind;
use crate::scoring;
use serde::{Deserialize, Serialize};

/// Maximum rating on the symptom severity scale.
pub const MAX_SYMPTOM_RATING: u8 = 6;

/// Consecutive digit-span misses that stop further presentation.
pub const MAX_CONSECUTIVE_MISSES: u8 = 2;

/// Number of immediate-memory trials in one administration.
pub const MEMORY_TRIAL_COUNT: usize = 3;

/// Raw responses and derived scores for one module, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum ModuleResult {
    Symptom(SymptomResult),
    Orientation(OrientationResult),
    ImmediateMemory(ImmediateMemoryResult),
    Concentration(ConcentrationResult),
    Neurological(NeurologicalResult),
    Balance(BalanceResult),
    DelayedRecall(DelayedRecallResult),
}

impl ModuleResult {
    /// The module kind this result belongs to.
    pub fn kind(&self) -> ModuleKind {
        match self {
            Self::Symptom(_) => ModuleKind::Symptom,
            Self::Orientation(_) => ModuleKind::Orientation,
            Self::ImmediateMemory(_) => ModuleKind::ImmediateMemory,
            Self::Concentration(_) => ModuleKind::Concentration,
            Self::Neurological(_) => ModuleKind::Neurological,
            Self::Balance(_) => ModuleKind::Balance,
            Self::DelayedRecall(_) => ModuleKind::DelayedRecall,
        }
    }

    /// The module's standardized sub-score, recomputed from raw fields.
    pub fn score(&self) -> u8 {
        match self {
            Self::Symptom(r) => r.severity_score(),
            Self::Orientation(r) => r.score(),
            Self::ImmediateMemory(r) => r.total_score(),
            Self::Concentration(r) => r.score(),
            Self::Neurological(r) => r.score(),
            Self::Balance(r) => r.total_score(),
            Self::DelayedRecall(r) => r.score(),
        }
    }

    /// Freezes the result. Idempotent.
    pub fn complete(&mut self) {
        match self {
            Self::Symptom(r) => r.completed = true,
            Self::Orientation(r) => r.completed = true,
            Self::ImmediateMemory(r) => r.completed = true,
            Self::Concentration(r) => r.completed = true,
            Self::Neurological(r) => r.completed = true,
            Self::Balance(r) => r.completed = true,
            Self::DelayedRecall(r) => r.completed = true,
        }
    }

    /// Whether the result has been frozen.
    pub fn is_completed(&self) -> bool {
        match self {
            Self::Symptom(r) => r.completed,
            Self::Orientation(r) => r.completed,
            Self::ImmediateMemory(r) => r.completed,
            Self::Concentration(r) => r.completed,
            Self::Neurological(r) => r.completed,
            Self::Balance(r) => r.completed,
            Self::DelayedRecall(r) => r.completed,
        }
    }
}

// ============================================================================
// Symptom evaluation
// ============================================================================

/// Severity ratings over the fixed symptom inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomResult {
    ratings: Vec<u8>,
    completed: bool,
}

impl SymptomResult {
    /// Creates an unrated inventory of the given length.
    pub fn new(item_count: usize) -> Self {
        Self {
            ratings: vec![0; item_count],
            completed: false,
        }
    }

    /// Rates one inventory item, clamping to the 0-6 scale.
    pub fn rate(&mut self, item: usize, rating: u8) {
        assert!(!self.completed, "rated a completed symptom result");
        assert!(item < self.ratings.len(), "symptom item out of range");
        self.ratings[item] = rating.min(MAX_SYMPTOM_RATING);
    }

    pub fn rating(&self, item: usize) -> u8 {
        self.ratings[item]
    }

    pub fn item_count(&self) -> usize {
        self.ratings.len()
    }

    /// Count of items rated above zero.
    pub fn symptom_count(&self) -> u8 {
        scoring::symptom_totals(&self.ratings).0
    }

    /// Sum of all ratings.
    pub fn severity_score(&self) -> u8 {
        scoring::symptom_totals(&self.ratings).1
    }
}

// ============================================================================
// Orientation
// ============================================================================

/// Per-question correctness for the fixed orientation questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationResult {
    answers: Vec<Option<bool>>,
    completed: bool,
}

impl OrientationResult {
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: vec![None; question_count],
            completed: false,
        }
    }

    /// Records the examiner's judgment for one question.
    pub fn record(&mut self, question: usize, correct: bool) {
        assert!(!self.completed, "recorded into a completed orientation result");
        assert!(question < self.answers.len(), "orientation question out of range");
        self.answers[question] = Some(correct);
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// One point per correct answer; unanswered questions score nothing.
    pub fn score(&self) -> u8 {
        let answers: Vec<bool> = self
            .answers
            .iter()
            .map(|a| a.unwrap_or(false))
            .collect();
        scoring::orientation_score(&answers)
    }
}

// ============================================================================
// Concentration
// ============================================================================

/// One attempted digit-span sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitTrial {
    /// Digits as presented, in presentation order.
    pub presented: Vec<u8>,
    /// The athlete's response, normalized to digits only.
    pub response: String,
    /// Whether the response was the exact reverse of the presented digits.
    pub correct: bool,
}

/// Digit span backwards plus months in reverse.
///
/// Only attempted sequences are stored; sequences presented after the
/// early stop never enter the trial array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationResult {
    trials: Vec<DigitTrial>,
    consecutive_misses: u8,
    months_correct: Option<bool>,
    completed: bool,
}

impl ConcentrationResult {
    pub fn new() -> Self {
        Self {
            trials: Vec::new(),
            consecutive_misses: 0,
            months_correct: None,
            completed: false,
        }
    }

    /// Records the athlete's transcribed response for one sequence.
    ///
    /// Returns whether the response matched the exact reverse of the
    /// presented digits.
    pub fn record_response(&mut self, presented: &[u8], raw_response: &str) -> bool {
        assert!(!self.completed, "recorded into a completed concentration result");
        let correct = scoring::digit_response_matches(presented, raw_response);
        self.trials.push(DigitTrial {
            presented: presented.to_vec(),
            response: scoring::normalize_digits(raw_response),
            correct,
        });
        if correct {
            self.consecutive_misses = 0;
        } else {
            self.consecutive_misses += 1;
        }
        correct
    }

    /// Records an examiner judgment for a sequence answered aloud.
    ///
    /// The stored response is kept consistent with the judgment: a correct
    /// mark stores the exact reverse of the presented digits, an incorrect
    /// mark stores an empty response, so `correct` always equals what
    /// rescoring the raw fields would produce.
    pub fn record_marked(&mut self, presented: &[u8], correct: bool) {
        let response = if correct {
            scoring::reversed_digits(presented)
        } else {
            String::new()
        };
        self.record_response(presented, &response);
    }

    /// Whether presentation must stop (two consecutive misses).
    pub fn should_stop(&self) -> bool {
        self.consecutive_misses >= MAX_CONSECUTIVE_MISSES
    }

    pub fn consecutive_misses(&self) -> u8 {
        self.consecutive_misses
    }

    /// Records the months-in-reverse judgment.
    pub fn record_months(&mut self, correct: bool) {
        assert!(!self.completed, "recorded into a completed concentration result");
        self.months_correct = Some(correct);
    }

    pub fn trials(&self) -> &[DigitTrial] {
        &self.trials
    }

    /// Running count of exact reverse matches.
    pub fn digit_score(&self) -> u8 {
        let matches: Vec<bool> = self.trials.iter().map(|t| t.correct).collect();
        scoring::digit_span_score(&matches)
    }

    pub fn months_score(&self) -> u8 {
        scoring::months_reverse_score(self.months_correct.unwrap_or(false))
    }

    /// Digit span score plus the months point.
    pub fn score(&self) -> u8 {
        self.digit_score() + self.months_score()
    }
}

impl Default for ConcentrationResult {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Immediate memory
// ============================================================================

/// One recall trial over the fixed word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTrial {
    /// The list as presented in this trial.
    pub words: Vec<String>,
    /// The words the athlete recalled.
    pub recalled: Vec<String>,
}

impl MemoryTrial {
    /// Set-intersection score for this trial.
    pub fn score(&self) -> u8 {
        scoring::word_recall_score(&self.words, &self.recalled)
    }
}

/// Three trials of the same word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmediateMemoryResult {
    word_list: Vec<String>,
    trials: Vec<MemoryTrial>,
    completed: bool,
}

impl ImmediateMemoryResult {
    pub fn new(word_list: Vec<String>) -> Self {
        Self {
            word_list,
            trials: Vec::new(),
            completed: false,
        }
    }

    /// Starts the next trial. Panics past the fixed trial count.
    pub fn begin_trial(&mut self) {
        assert!(!self.completed, "began a trial on a completed memory result");
        assert!(
            self.trials.len() < MEMORY_TRIAL_COUNT,
            "memory trial count exceeded"
        );
        self.trials.push(MemoryTrial {
            words: self.word_list.clone(),
            recalled: Vec::new(),
        });
    }

    /// Toggles one word on the current trial's recall grid.
    ///
    /// Comparison is normalized, so "Penny!" toggles a previously recalled
    /// "penny" off rather than adding a duplicate.
    pub fn toggle_recalled(&mut self, word: &str) {
        assert!(!self.completed, "recorded into a completed memory result");
        let trial = self
            .trials
            .last_mut()
            .expect("toggle_recalled before begin_trial");
        let normalized = scoring::normalize_word(word);
        if let Some(pos) = trial
            .recalled
            .iter()
            .position(|w| scoring::normalize_word(w) == normalized)
        {
            trial.recalled.remove(pos);
        } else {
            trial.recalled.push(word.to_string());
        }
    }

    pub fn trials(&self) -> &[MemoryTrial] {
        &self.trials
    }

    pub fn trials_run(&self) -> usize {
        self.trials.len()
    }

    /// The canonical word list: the one presented in the first trial.
    ///
    /// Delayed recall must score against this list even if later trials
    /// mutate their own local copies.
    pub fn canonical_words(&self) -> &[String] {
        self.trials
            .first()
            .map(|t| t.words.as_slice())
            .unwrap_or(&self.word_list)
    }

    pub fn trial_score(&self, trial: usize) -> u8 {
        self.trials.get(trial).map(MemoryTrial::score).unwrap_or(0)
    }

    /// Sum of all trial scores.
    pub fn total_score(&self) -> u8 {
        self.trials.iter().map(MemoryTrial::score).sum()
    }
}

// ============================================================================
// Delayed recall
// ============================================================================

/// Recall of the canonical word list after a delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayedRecallResult {
    word_list: Vec<String>,
    recalled: Vec<String>,
    completed: bool,
}

impl DelayedRecallResult {
    /// `word_list` must be the canonical list captured from the first
    /// immediate-memory trial.
    pub fn new(word_list: Vec<String>) -> Self {
        Self {
            word_list,
            recalled: Vec::new(),
            completed: false,
        }
    }

    pub fn toggle_recalled(&mut self, word: &str) {
        assert!(!self.completed, "recorded into a completed delayed-recall result");
        let normalized = scoring::normalize_word(word);
        if let Some(pos) = self
            .recalled
            .iter()
            .position(|w| scoring::normalize_word(w) == normalized)
        {
            self.recalled.remove(pos);
        } else {
            self.recalled.push(word.to_string());
        }
    }

    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    pub fn recalled(&self) -> &[String] {
        &self.recalled
    }

    pub fn score(&self) -> u8 {
        scoring::word_recall_score(&self.word_list, &self.recalled)
    }
}

// ============================================================================
// Balance
// ============================================================================

/// Stance held during one balance trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    DoubleLeg,
    SingleLeg,
    Tandem,
}

impl Stance {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DoubleLeg => "Double-leg stance",
            Self::SingleLeg => "Single-leg stance",
            Self::Tandem => "Tandem stance",
        }
    }
}

/// Counted error events for one stance over the observation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceTrial {
    pub stance: Stance,
    pub errors: u32,
}

/// Error counts across stance trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    trials: Vec<BalanceTrial>,
    completed: bool,
}

impl BalanceResult {
    pub fn new() -> Self {
        Self {
            trials: Vec::new(),
            completed: false,
        }
    }

    pub fn begin_trial(&mut self, stance: Stance) {
        assert!(!self.completed, "began a trial on a completed balance result");
        self.trials.push(BalanceTrial { stance, errors: 0 });
    }

    /// Counts one error event in the current stance trial.
    pub fn record_error(&mut self) {
        assert!(!self.completed, "recorded into a completed balance result");
        let trial = self
            .trials
            .last_mut()
            .expect("record_error before begin_trial");
        trial.errors += 1;
    }

    pub fn trials(&self) -> &[BalanceTrial] {
        &self.trials
    }

    /// Error count for one trial, capped at 10.
    pub fn trial_score(&self, trial: usize) -> u8 {
        self.trials
            .get(trial)
            .map(|t| scoring::balance_trial_score(t.errors))
            .unwrap_or(0)
    }

    /// Sum of capped trial scores across stances.
    pub fn total_score(&self) -> u8 {
        self.trials
            .iter()
            .map(|t| scoring::balance_trial_score(t.errors))
            .sum()
    }
}

impl Default for BalanceResult {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Neurological screen
// ============================================================================

/// One named pass/fail check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuroCheck {
    pub name: String,
    pub passed: Option<bool>,
}

/// Named pass/fail checks of the neurological screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeurologicalResult {
    checks: Vec<NeuroCheck>,
    completed: bool,
}

impl NeurologicalResult {
    pub fn new(check_names: &[String]) -> Self {
        Self {
            checks: check_names
                .iter()
                .map(|name| NeuroCheck {
                    name: name.clone(),
                    passed: None,
                })
                .collect(),
            completed: false,
        }
    }

    pub fn record(&mut self, check: usize, passed: bool) {
        assert!(!self.completed, "recorded into a completed neurological result");
        assert!(check < self.checks.len(), "neurological check out of range");
        self.checks[check].passed = Some(passed);
    }

    pub fn checks(&self) -> &[NeuroCheck] {
        &self.checks
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Count of passed checks.
    pub fn score(&self) -> u8 {
        self.checks
            .iter()
            .filter(|c| c.passed == Some(true))
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_list() -> Vec<String> {
        ["finger", "penny", "blanket", "lemon", "insect"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_concentration_running_score_and_early_stop() {
        let mut result = ConcentrationResult::new();

        assert!(result.record_response(&[4, 2, 7], "724"));
        assert_eq!(result.consecutive_misses(), 0);

        assert!(!result.record_response(&[8, 1, 5, 3], "531"));
        assert_eq!(result.consecutive_misses(), 1);
        assert!(!result.should_stop());

        assert!(!result.record_response(&[6, 2, 9, 7, 1], "17926"));
        assert!(result.should_stop());

        // Score is the match count, independent of skipped sequences.
        assert_eq!(result.digit_score(), 1);
        assert_eq!(result.trials().len(), 3);
    }

    #[test]
    fn test_concentration_marked_trials_rescore_consistently() {
        let mut result = ConcentrationResult::new();
        result.record_marked(&[4, 9, 3], true);
        result.record_marked(&[3, 8, 1, 4], false);

        for trial in result.trials() {
            assert_eq!(
                trial.correct,
                crate::scoring::digit_response_matches(&trial.presented, &trial.response)
            );
        }
        assert_eq!(result.digit_score(), 1);
    }

    #[test]
    fn test_concentration_months_point() {
        let mut result = ConcentrationResult::new();
        result.record_response(&[4, 9, 3], "394");
        assert_eq!(result.score(), 1);
        result.record_months(true);
        assert_eq!(result.score(), 2);
    }

    #[test]
    fn test_memory_trials_share_the_list_and_sum() {
        let mut result = ImmediateMemoryResult::new(word_list());

        result.begin_trial();
        result.toggle_recalled("finger");
        result.toggle_recalled("penny");

        result.begin_trial();
        result.toggle_recalled("lemon");

        assert_eq!(result.trial_score(0), 2);
        assert_eq!(result.trial_score(1), 1);
        assert_eq!(result.trial_score(2), 0);
        assert_eq!(result.total_score(), 3);
    }

    #[test]
    fn test_memory_toggle_collapses_duplicates() {
        let mut result = ImmediateMemoryResult::new(word_list());
        result.begin_trial();
        result.toggle_recalled("penny");
        result.toggle_recalled("Penny!");
        assert_eq!(result.trial_score(0), 0);
    }

    #[test]
    fn test_delayed_recall_uses_first_trial_words() {
        let mut memory = ImmediateMemoryResult::new(word_list());
        memory.begin_trial();
        memory.begin_trial();
        // A later trial mutating its local list must not move the canonical one.
        memory.trials.last_mut().unwrap().words = vec!["walrus".to_string()];

        assert_eq!(memory.canonical_words(), word_list().as_slice());

        let mut delayed = DelayedRecallResult::new(memory.canonical_words().to_vec());
        delayed.toggle_recalled("insect");
        delayed.toggle_recalled("walrus");
        assert_eq!(delayed.score(), 1);
    }

    #[test]
    fn test_balance_trials_cap_and_sum() {
        let mut result = BalanceResult::new();
        result.begin_trial(Stance::DoubleLeg);
        for _ in 0..3 {
            result.record_error();
        }
        result.begin_trial(Stance::SingleLeg);
        for _ in 0..14 {
            result.record_error();
        }

        assert_eq!(result.trial_score(0), 3);
        assert_eq!(result.trial_score(1), 10);
        assert_eq!(result.total_score(), 13);
    }

    #[test]
    fn test_symptom_totals_recompute_from_ratings() {
        let mut result = SymptomResult::new(22);
        result.rate(0, 3);
        result.rate(4, 9); // clamped to 6
        assert_eq!(result.rating(4), 6);
        assert_eq!(result.symptom_count(), 2);
        assert_eq!(result.severity_score(), 9);
    }

    #[test]
    fn test_module_result_score_dispatch() {
        let mut orientation = OrientationResult::new(5);
        for (i, correct) in [true, true, false, true, true].into_iter().enumerate() {
            orientation.record(i, correct);
        }
        let result = ModuleResult::Orientation(orientation);
        assert_eq!(result.kind(), ModuleKind::Orientation);
        assert_eq!(result.score(), 4);
        assert!(!result.is_completed());
    }

    #[test]
    #[should_panic(expected = "completed orientation result")]
    fn test_mutating_a_frozen_result_panics() {
        let mut result = ModuleResult::Orientation(OrientationResult::new(5));
        result.complete();
        if let ModuleResult::Orientation(inner) = &mut result {
            inner.record(0, true);
        }
    }

    #[test]
    #[should_panic(expected = "trial count exceeded")]
    fn test_fourth_memory_trial_panics() {
        let mut result = ImmediateMemoryResult::new(word_list());
        for _ in 0..4 {
            result.begin_trial();
        }
    }
}
