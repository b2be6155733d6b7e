/// Ansoff Engine — Error Types

use thiserror::Error;

use crate::domain::{Move, TargetKind};

/// Why an allocation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationFault {
    #[error("slot {slot} has negative points ({points})")]
    NegativeComponent { slot: Move, points: i64 },

    #[error("allocate points across A/B/C/D")]
    NothingAllocated,

    #[error("allocation must sum to {budget}, got {total}")]
    SumMismatch { total: i64, budget: i64 },

    #[error("allocation total overflows, must sum to {budget}")]
    TotalOverflow { budget: i64 },
}

/// Every failure the engine reports to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Submission rejected; no state was touched.
    #[error("invalid allocation: {0}")]
    InvalidAllocation(#[from] AllocationFault),

    /// All quarters have been played.
    #[error("simulation complete: quarter {quarter} exceeds max_quarters {max_quarters}")]
    SimulationComplete { quarter: u32, max_quarters: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown {kind} shock target {name:?}")]
    UnknownShockTarget { kind: TargetKind, name: String },

    #[error("shock deck must contain at least one card")]
    EmptyDeck,

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineError::SimulationComplete { .. })
    }
}
