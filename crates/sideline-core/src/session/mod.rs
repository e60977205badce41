//! Session domain module.
//!
//! This module contains the session domain model and the repository
//! interface through which completed results leave the core.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `repository`: Repository trait for result persistence

mod model;
mod repository;

// Re-export public API
pub use model::Session;
pub use repository::ResultRepository;
