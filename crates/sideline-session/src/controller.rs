//! The polymorphic control surface for the active module.
//!
//! Whichever module is on screen is addressed through this one interface.
//! The command router owns a single mutable slot of it; nothing else in
//! the system dispatches commands.

use sideline_core::command::{Command, CommandContext};
use sideline_core::module::ModuleKind;
use sideline_core::result::ModuleResult;

/// Outcome of dispatching one command to a module controller.
#[derive(Debug)]
pub enum Dispatch {
    /// The command changed module state.
    Handled,
    /// The command means nothing on this screen; it is dropped.
    Ignored,
    /// The module finished. Carries the frozen result.
    Completed(ModuleResult),
}

/// The object currently authorized to receive routed commands.
///
/// Implementations own their module's [`ModuleResult`] while the module is
/// live and freeze it when they report completion. A controller never sees
/// a command after reporting `Completed`; the router's target is replaced
/// before the next command arrives.
pub trait ModuleController: Send {
    /// The module this controller administers.
    fn kind(&self) -> ModuleKind;

    /// The command context shown while this controller is live.
    fn context(&self) -> CommandContext {
        CommandContext::for_module(self.kind())
    }

    /// Single dispatch entry point for routed commands.
    fn dispatch(&mut self, command: &Command) -> Dispatch;
}
