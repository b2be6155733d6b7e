#![forbid(unsafe_code)]

//! Ansoff Runtime
//!
//! Wraps the quarter engine with sessions, replay, drift comparison,
//! reporting and a JSON snapshot codec.
//!
//! No model logic lives here — every state transition is delegated to
//! the engine.

pub mod error;
pub mod replay;
pub mod snapshot_codec;
pub mod session;
pub mod drift;
pub mod report;

pub use error::RuntimeError;
