//! Runtime layer of the assessment engine.
//!
//! Composes the domain types from `sideline-core` into a live session:
//! module controllers implement the polymorphic control surface, the
//! command router keeps exactly one controller addressable at a time, and
//! the session orchestrator sequences modules against the external display
//! subsystem.

pub mod controller;
pub mod controllers;
pub mod display;
pub mod events;
pub mod orchestrator;
pub mod router;

// Re-export public API
pub use controller::{Dispatch, ModuleController};
pub use display::DisplayGate;
pub use events::SessionSignal;
pub use orchestrator::{FlowState, SessionOrchestrator};
pub use router::{CommandRouter, Routed};
