//! Engine client errors.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a commerce-engine client.
///
/// The pipeline never lets one of these reach the rendering layer; every
/// call site converts them into a logged, degraded outcome.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The call exceeded its configured timeout.
    #[error("engine call timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure talking to the engine.
    #[error("engine transport failure: {0}")]
    Transport(String),

    /// The engine rejected the call.
    #[error("engine rejected the call: {0}")]
    Rejected(String),

    /// The engine client for a store could not be constructed.
    #[error("failed to initialize engine client for store {0}")]
    Initialization(String),
}
