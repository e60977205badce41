//! Pure scoring rules, one per module kind.
//!
//! Every function here is total and side-effect-free: degenerate input
//! (empty lists, unparseable responses) scores 0 rather than failing.
//! Raw responses are normalized before comparison; normalization never
//! rejects input.

use std::collections::HashSet;

/// Number of correct orientation answers, 1 point each.
pub fn orientation_score(answers: &[bool]) -> u8 {
    answers.iter().filter(|a| **a).count() as u8
}

/// Strips every non-digit character from a raw response.
///
/// Speech transcription produces text like "seven, two, four" already
/// rendered to digits by the input widget, but may carry separators and
/// whitespace. Anything that is not an ASCII digit is dropped.
pub fn normalize_digits(response: &str) -> String {
    response.chars().filter(char::is_ascii_digit).collect()
}

/// Renders a presented digit sequence in reverse as the expected response.
pub fn reversed_digits(presented: &[u8]) -> String {
    presented
        .iter()
        .rev()
        .map(|d| char::from(b'0' + (d % 10)))
        .collect()
}

/// Whether a raw response matches the exact reverse of the presented
/// sequence, character for character.
///
/// Repeated digits must appear the same number of times in the same
/// positions; the comparison is on the digit string, never a numeric value.
/// An empty presented sequence never matches.
pub fn digit_response_matches(presented: &[u8], response: &str) -> bool {
    if presented.is_empty() {
        return false;
    }
    normalize_digits(response) == reversed_digits(presented)
}

/// One point per exact reverse match across attempted sequences.
pub fn digit_span_score(matches: &[bool]) -> u8 {
    matches.iter().filter(|m| **m).count() as u8
}

/// Months-in-reverse contributes a fixed single point when fully correct.
pub fn months_reverse_score(correct: bool) -> u8 {
    u8::from(correct)
}

/// Lowercases a recalled word and strips punctuation for comparison.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Size of the intersection between presented and recalled words.
///
/// Set semantics: recall order is irrelevant, duplicates collapse, and the
/// comparison is case- and punctuation-insensitive. The result is naturally
/// capped at the presented list length.
pub fn word_recall_score(presented: &[String], recalled: &[String]) -> u8 {
    let presented: HashSet<String> = presented.iter().map(|w| normalize_word(w)).collect();
    let recalled: HashSet<String> = recalled.iter().map(|w| normalize_word(w)).collect();
    presented.intersection(&recalled).count() as u8
}

/// Error events counted during one stance trial, capped at 10.
pub fn balance_trial_score(errors: u32) -> u8 {
    errors.min(10) as u8
}

/// (number of symptoms, symptom severity) over the rated inventory.
///
/// Number of symptoms is the count of nonzero ratings; severity is the sum
/// of ratings. Ratings are clamped to the 0-6 scale at record time, so the
/// severity of a full 22-item inventory fits in a u8.
pub fn symptom_totals(ratings: &[u8]) -> (u8, u8) {
    let count = ratings.iter().filter(|r| **r > 0).count() as u8;
    let severity = ratings.iter().fold(0u8, |acc, r| acc.saturating_add(*r));
    (count, severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_orientation_score_counts_correct_answers() {
        assert_eq!(orientation_score(&[true, true, false, true, true]), 4);
        assert_eq!(orientation_score(&[]), 0);
        assert_eq!(orientation_score(&[false; 5]), 0);
    }

    #[test]
    fn test_normalize_digits_strips_everything_else() {
        assert_eq!(normalize_digits("7 2 4"), "724");
        assert_eq!(normalize_digits("seven"), "");
        assert_eq!(normalize_digits("7, 2... 4!"), "724");
    }

    #[test]
    fn test_exact_reverse_always_matches() {
        assert!(digit_response_matches(&[4, 2, 7], "724"));
        assert!(digit_response_matches(&[3, 8, 1, 4], "4 1 8 3"));
    }

    #[test]
    fn test_single_substitution_never_matches() {
        // Same length, one digit swapped.
        assert!(!digit_response_matches(&[4, 2, 7], "714"));
        assert!(!digit_response_matches(&[8, 1, 5, 3], "531"));
    }

    #[test]
    fn test_repeated_digits_compare_character_for_character() {
        assert!(digit_response_matches(&[5, 5, 2], "255"));
        assert!(!digit_response_matches(&[5, 5, 2], "25"));
        assert!(!digit_response_matches(&[5, 5, 2], "2555"));
    }

    #[test]
    fn test_degenerate_digit_input_scores_zero() {
        assert!(!digit_response_matches(&[], ""));
        assert!(!digit_response_matches(&[4, 2], ""));
        assert_eq!(digit_span_score(&[]), 0);
    }

    #[test]
    fn test_word_recall_uses_set_semantics() {
        let list = words(&["finger", "penny", "blanket", "lemon", "insect"]);

        // Order irrelevant, duplicates collapse.
        let recalled = words(&["lemon", "finger", "lemon", "FINGER."]);
        assert_eq!(word_recall_score(&list, &recalled), 2);

        // Case and punctuation normalized.
        let recalled = words(&["Penny!", "blanket"]);
        assert_eq!(word_recall_score(&list, &recalled), 2);
    }

    #[test]
    fn test_word_recall_monotone_and_capped() {
        let list = words(&["finger", "penny", "blanket", "lemon", "insect"]);
        let mut recalled = Vec::new();
        let mut last = 0;
        for word in &list {
            recalled.push(word.clone());
            let score = word_recall_score(&list, &recalled);
            assert!(score >= last);
            last = score;
        }
        assert_eq!(last, 5);

        // Intrusions never push the score past the list length.
        recalled.push("walrus".to_string());
        recalled.push("finger".to_string());
        assert_eq!(word_recall_score(&list, &recalled), 5);
    }

    #[test]
    fn test_word_recall_empty_inputs() {
        assert_eq!(word_recall_score(&[], &[]), 0);
        assert_eq!(word_recall_score(&words(&["finger"]), &[]), 0);
        assert_eq!(word_recall_score(&[], &words(&["finger"])), 0);
    }

    #[test]
    fn test_balance_trial_score_caps_at_ten() {
        assert_eq!(balance_trial_score(0), 0);
        assert_eq!(balance_trial_score(3), 3);
        assert_eq!(balance_trial_score(10), 10);
        assert_eq!(balance_trial_score(47), 10);
    }

    #[test]
    fn test_symptom_totals() {
        assert_eq!(symptom_totals(&[]), (0, 0));
        assert_eq!(symptom_totals(&[0, 0, 0]), (0, 0));
        assert_eq!(symptom_totals(&[3, 0, 6, 1]), (3, 10));
    }
}
