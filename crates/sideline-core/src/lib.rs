pub mod command;
pub mod config;
pub mod error;
pub mod module;
pub mod result;
pub mod scoring;
pub mod sequencer;
pub mod session;

// Re-export common error type
pub use error::AssessmentError;
pub use module::{ModuleKind, SessionType};
