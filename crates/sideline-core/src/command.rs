//! Command vocabulary for the out-of-band control channel.
//!
//! Commands are stateless value objects delivered at most once per
//! utterance. The router forwards them to whichever module controller is
//! live; the help surface is driven by a static, context-filtered table.

use crate::module::ModuleKind;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A symbolic action delivered over the command channel.
///
/// The set is closed: voice grammar, rendering shortcuts and tests all
/// speak this vocabulary. Payload-carrying variants originate from input
/// widgets (speech transcription, word grids, rating rows) rather than the
/// fixed voice phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Advance within the active module (next question, trial or stance).
    Next,
    /// Step back within the active module.
    Back,
    /// Judge the athlete's current response correct.
    MarkCorrect,
    /// Judge the athlete's current response incorrect.
    MarkIncorrect,
    /// Finish the active module with whatever has been recorded.
    CompleteModule,
    /// Abandon the active module, freezing its result as-is.
    SkipModule,
    /// Toggle the help surface. Handled by the router itself.
    ToggleHelp,
    /// Re-read the active module's instructions to the athlete.
    RepeatInstructions,
    /// Count one balance error event in the current stance trial.
    RecordError,
    /// Transcribed digit response for the current concentration sequence.
    RecordDigits { response: String },
    /// Toggle one word on a recall grid.
    ToggleWord { word: String },
    /// Rate the current symptom inventory item (0-6).
    RateSymptom { rating: u8 },
}

impl Command {
    /// Whether the router handles this command itself, regardless of target.
    pub fn is_global(&self) -> bool {
        matches!(self, Self::ToggleHelp)
    }
}

/// Names the screen currently accepting commands.
///
/// Mirrors the active module one-for-one, plus `Idle` for the gaps between
/// modules when no controller is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandContext {
    Idle,
    Symptom,
    Orientation,
    ImmediateMemory,
    Concentration,
    Neurological,
    Balance,
    DelayedRecall,
}

impl CommandContext {
    /// The context shown while the given module is live.
    pub fn for_module(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Symptom => Self::Symptom,
            ModuleKind::Orientation => Self::Orientation,
            ModuleKind::ImmediateMemory => Self::ImmediateMemory,
            ModuleKind::Concentration => Self::Concentration,
            ModuleKind::Neurological => Self::Neurological,
            ModuleKind::Balance => Self::Balance,
            ModuleKind::DelayedRecall => Self::DelayedRecall,
        }
    }
}

/// A spoken phrase and its meaning, for the help surface.
#[derive(Debug, Clone, Serialize)]
pub struct CommandHelp {
    /// The phrase the examiner says.
    pub phrase: &'static str,
    /// Human-readable description of the effect.
    pub description: &'static str,
    /// Contexts in which the phrase does something. Empty means everywhere.
    contexts: &'static [CommandContext],
}

impl CommandHelp {
    const fn new(
        phrase: &'static str,
        description: &'static str,
        contexts: &'static [CommandContext],
    ) -> Self {
        Self {
            phrase,
            description,
            contexts,
        }
    }

    /// Whether this phrase is worth showing in the given context.
    pub fn applies_in(&self, context: CommandContext) -> bool {
        self.contexts.is_empty() || self.contexts.contains(&context)
    }
}

const JUDGED: &[CommandContext] = &[
    CommandContext::Orientation,
    CommandContext::Concentration,
    CommandContext::Neurological,
];

const ANY_MODULE: &[CommandContext] = &[
    CommandContext::Symptom,
    CommandContext::Orientation,
    CommandContext::ImmediateMemory,
    CommandContext::Concentration,
    CommandContext::Neurological,
    CommandContext::Balance,
    CommandContext::DelayedRecall,
];

/// Static storage for the help table (initialized once).
static HELP_TABLE: OnceLock<Vec<CommandHelp>> = OnceLock::new();

/// Returns the full phrase table.
///
/// Initialized on first access and cached for the lifetime of the process.
pub fn help_table() -> &'static [CommandHelp] {
    HELP_TABLE.get_or_init(|| {
        vec![
            CommandHelp::new("next", "Advance to the next item", ANY_MODULE),
            CommandHelp::new("go back", "Return to the previous item", ANY_MODULE),
            CommandHelp::new("mark correct", "Score the current response correct", JUDGED),
            CommandHelp::new(
                "mark incorrect",
                "Score the current response incorrect",
                JUDGED,
            ),
            CommandHelp::new(
                "mark error",
                "Count one balance error in the current stance",
                &[CommandContext::Balance],
            ),
            CommandHelp::new(
                "complete module",
                "Finish this module and move on",
                ANY_MODULE,
            ),
            CommandHelp::new(
                "skip module",
                "Skip this module without finishing it",
                ANY_MODULE,
            ),
            CommandHelp::new(
                "repeat instructions",
                "Read the module instructions again",
                ANY_MODULE,
            ),
            CommandHelp::new("show help", "Show or hide this command list", &[]),
        ]
    })
}

/// Lazy, finite, restartable sequence of phrases available in a context.
pub fn available_commands(
    context: CommandContext,
) -> impl Iterator<Item = &'static CommandHelp> {
    help_table()
        .iter()
        .filter(move |help| help.applies_in(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_available_everywhere() {
        for context in [
            CommandContext::Idle,
            CommandContext::Balance,
            CommandContext::Concentration,
        ] {
            assert!(available_commands(context).any(|h| h.phrase == "show help"));
        }
    }

    #[test]
    fn test_idle_context_offers_only_global_phrases() {
        let phrases: Vec<_> = available_commands(CommandContext::Idle)
            .map(|h| h.phrase)
            .collect();
        assert_eq!(phrases, vec!["show help"]);
    }

    #[test]
    fn test_mark_error_is_balance_only() {
        assert!(available_commands(CommandContext::Balance).any(|h| h.phrase == "mark error"));
        assert!(!available_commands(CommandContext::Orientation).any(|h| h.phrase == "mark error"));
    }

    #[test]
    fn test_available_commands_is_restartable() {
        let first: Vec<_> = available_commands(CommandContext::Orientation)
            .map(|h| h.phrase)
            .collect();
        let second: Vec<_> = available_commands(CommandContext::Orientation)
            .map(|h| h.phrase)
            .collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_only_toggle_help_is_global() {
        assert!(Command::ToggleHelp.is_global());
        assert!(!Command::Next.is_global());
        assert!(!Command::MarkCorrect.is_global());
    }

    #[test]
    fn test_command_serialization_round_trip() {
        let command = Command::RecordDigits {
            response: "724".to_string(),
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
