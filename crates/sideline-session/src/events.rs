//! External signals delivered to a running session.

use serde::{Deserialize, Serialize};
use sideline_core::command::Command;

/// Discrete events the orchestrator consumes, one at a time.
///
/// Commands come from the voice channel, display changes from the
/// immersive display subsystem, and exit from the examiner's emergency
/// action. Delivery timing is owned by the collaborators; handling one
/// signal always runs to completion before the next is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionSignal {
    /// A command uttered on the out-of-band channel.
    Command { command: Command },
    /// The display subsystem's observable "is shown" boolean changed.
    DisplayChanged { shown: bool },
    /// User-initiated exit, honorable from any state.
    Exit,
}
