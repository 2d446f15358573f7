//! Pipeline errors.

use portico_engine::EngineError;
use thiserror::Error;

/// Errors the pipeline reports to its caller.
///
/// These cover request setup only (store resolution, engine session
/// construction). Engine failures during reconciliation or totals
/// computation never surface here; they become degraded outcomes.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// The active store's configuration could not be resolved.
    #[error("failed to resolve store configuration: {0}")]
    StoreResolution(String),

    /// The engine session for the store could not be obtained.
    #[error("engine session unavailable")]
    Engine(#[from] EngineError),
}
