//! Result repository trait.
//!
//! Defines the interface through which completed module results and the
//! finished session leave the core.

use super::model::Session;
use crate::error::Result;
use crate::result::ModuleResult;
use async_trait::async_trait;

/// An abstract repository for persisting assessment output.
///
/// This trait defines the contract between the orchestration core and the
/// storage collaborator, decoupling the engine from the specific storage
/// mechanism (local records store, sync service, export file). The core
/// only calls into it at module completion and at session end, and never
/// reads results back mid-session.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Stores one completed module result.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session the result belongs to
    /// * `result` - The frozen module result
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Result stored successfully
    /// - `Err(_)`: Error occurred during storage
    async fn save_result(&self, session_id: &str, result: &ModuleResult) -> Result<()>;

    /// Stores the session record itself.
    ///
    /// Called when the assessment flow exits, normally or via early
    /// termination.
    async fn save_session(&self, session: &Session) -> Result<()>;
}
