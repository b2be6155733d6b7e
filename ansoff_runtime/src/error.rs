//! Runtime error type.

use thiserror::Error;

use ansoff_engine::EngineError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot rejected: {0}")]
    InvalidSnapshot(String),

    #[error("determinism failure: first replay {first}, second replay {second}")]
    DeterminismFailure { first: String, second: String },

    #[error("replay mismatch: live hash {expected}, replayed hash {actual}")]
    ReplayMismatch { expected: String, actual: String },

    #[error("unknown session {0:?}")]
    UnknownSession(String),

    #[error("session {0:?} already exists")]
    DuplicateSession(String),
}
