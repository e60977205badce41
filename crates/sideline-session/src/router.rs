//! Command routing to the active module controller.
//!
//! At most one controller is addressable at any time. Installing a new
//! target replaces the previous one, never stacks. Routing is best-effort:
//! absence of a target or a command the current screen does not understand
//! is a logged, ignored condition, never an error surfaced to the caller.

use crate::controller::{Dispatch, ModuleController};
use sideline_core::command::{self, Command, CommandContext, CommandHelp};
use sideline_core::result::ModuleResult;

/// What the router did with a command.
#[derive(Debug)]
pub enum Routed {
    /// Forwarded and handled by the active controller.
    Handled,
    /// Dropped: no target, or the target did not understand it.
    Dropped,
    /// The global help toggle, handled by the router itself.
    HelpToggled,
    /// The active module finished. Carries the frozen result.
    ModuleCompleted(ModuleResult),
}

/// Routes commands from the out-of-band channel to the active controller.
pub struct CommandRouter {
    target: Option<Box<dyn ModuleController>>,
    context: CommandContext,
    help_visible: bool,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            target: None,
            context: CommandContext::Idle,
            help_visible: false,
        }
    }

    /// Installs a controller, atomically replacing the previous target.
    pub fn set_target(&mut self, controller: Box<dyn ModuleController>) {
        self.context = controller.context();
        tracing::debug!(module = %controller.kind(), context = ?self.context, "router target installed");
        self.target = Some(controller);
    }

    /// Removes the target. Routed module commands are dropped until the
    /// next `set_target`.
    pub fn clear_target(&mut self) {
        if self.target.is_some() {
            tracing::debug!("router target cleared");
        }
        self.target = None;
        self.context = CommandContext::Idle;
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// The active controller, for read-only presentation accessors.
    pub fn target(&self) -> Option<&dyn ModuleController> {
        self.target.as_deref()
    }

    /// The active controller, for rendering collaborators' mutators.
    pub fn target_mut(&mut self) -> Option<&mut (dyn ModuleController + '_)> {
        match self.target.as_deref_mut() {
            Some(t) => Some(t as &mut (dyn ModuleController + '_)),
            None => None,
        }
    }

    pub fn context(&self) -> CommandContext {
        self.context
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Routes one command. Never fails.
    pub fn route(&mut self, command: &Command) -> Routed {
        if command.is_global() {
            self.help_visible = !self.help_visible;
            return Routed::HelpToggled;
        }

        let Some(controller) = self.target.as_deref_mut() else {
            tracing::debug!(?command, "no active target, dropping command");
            return Routed::Dropped;
        };

        match controller.dispatch(command) {
            Dispatch::Handled => Routed::Handled,
            Dispatch::Ignored => {
                tracing::debug!(?command, context = ?self.context, "command not understood here, dropping");
                Routed::Dropped
            }
            Dispatch::Completed(result) => Routed::ModuleCompleted(result),
        }
    }

    /// Phrases available in the current context, for the help surface.
    pub fn available_commands(&self) -> impl Iterator<Item = &'static CommandHelp> {
        command::available_commands(self.context)
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sideline_core::module::ModuleKind;
    use sideline_core::result::OrientationResult;

    /// Counts dispatches and never completes.
    struct ProbeController {
        kind: ModuleKind,
        dispatched: usize,
    }

    impl ProbeController {
        fn new(kind: ModuleKind) -> Self {
            Self {
                kind,
                dispatched: 0,
            }
        }
    }

    impl ModuleController for ProbeController {
        fn kind(&self) -> ModuleKind {
            self.kind
        }

        fn dispatch(&mut self, _command: &Command) -> Dispatch {
            self.dispatched += 1;
            Dispatch::Handled
        }
    }

    /// Completes on the first command it sees.
    struct OneShotController;

    impl ModuleController for OneShotController {
        fn kind(&self) -> ModuleKind {
            ModuleKind::Orientation
        }

        fn dispatch(&mut self, _command: &Command) -> Dispatch {
            let mut result = ModuleResult::Orientation(OrientationResult::new(5));
            result.complete();
            Dispatch::Completed(result)
        }
    }

    #[test]
    fn test_route_without_target_returns_normally() {
        let mut router = CommandRouter::new();
        assert!(matches!(router.route(&Command::MarkCorrect), Routed::Dropped));
        assert!(matches!(router.route(&Command::Next), Routed::Dropped));
        assert_eq!(router.context(), CommandContext::Idle);
        assert!(!router.help_visible());
    }

    #[test]
    fn test_help_toggles_without_a_target() {
        let mut router = CommandRouter::new();
        assert!(matches!(
            router.route(&Command::ToggleHelp),
            Routed::HelpToggled
        ));
        assert!(router.help_visible());
        router.route(&Command::ToggleHelp);
        assert!(!router.help_visible());
    }

    #[test]
    fn test_set_target_replaces_never_stacks() {
        let mut router = CommandRouter::new();
        router.set_target(Box::new(ProbeController::new(ModuleKind::Orientation)));
        router.set_target(Box::new(ProbeController::new(ModuleKind::Balance)));

        assert_eq!(router.context(), CommandContext::Balance);
        router.route(&Command::Next);
        assert_eq!(router.target().unwrap().kind(), ModuleKind::Balance);
    }

    #[test]
    fn test_clear_target_resets_context() {
        let mut router = CommandRouter::new();
        router.set_target(Box::new(ProbeController::new(ModuleKind::Concentration)));
        assert_eq!(router.context(), CommandContext::Concentration);

        router.clear_target();
        assert!(!router.has_target());
        assert_eq!(router.context(), CommandContext::Idle);
        assert!(matches!(router.route(&Command::MarkCorrect), Routed::Dropped));
    }

    #[test]
    fn test_completion_surfaces_the_frozen_result() {
        let mut router = CommandRouter::new();
        router.set_target(Box::new(OneShotController));

        let Routed::ModuleCompleted(result) = router.route(&Command::CompleteModule) else {
            panic!("expected completion to surface");
        };
        assert!(result.is_completed());
    }

    #[test]
    fn test_available_commands_follow_the_context() {
        let mut router = CommandRouter::new();
        assert_eq!(router.available_commands().count(), 1);

        router.set_target(Box::new(ProbeController::new(ModuleKind::Balance)));
        assert!(router
            .available_commands()
            .any(|help| help.phrase == "mark error"));
    }
}
