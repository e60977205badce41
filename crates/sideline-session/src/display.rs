//! Display-mode collaborator interface.

use async_trait::async_trait;
use sideline_core::error::Result;
use sideline_core::module::ModuleKind;

/// The immersive display subsystem, seen from the core.
///
/// The orchestrator requests presentation changes and observes the shown
/// boolean; confirmations arrive asynchronously as
/// [`crate::events::SessionSignal::DisplayChanged`] signals. Failures from
/// either request are caught and logged by the orchestrator, never
/// propagated.
#[async_trait]
pub trait DisplayGate: Send + Sync {
    /// Asks the subsystem to present the given module.
    async fn request_show(&self, module: ModuleKind) -> Result<()>;

    /// Asks the subsystem to dismiss whatever it is presenting.
    async fn request_hide(&self) -> Result<()>;

    /// Current value of the observable shown boolean.
    fn is_shown(&self) -> bool;
}
