#![forbid(unsafe_code)]

/// Model v1. Any change to a formula, constant or draw order bumps this.
pub const MODEL_VERSION: u32 = 1;

pub mod arithmetic;
pub mod error;
pub mod domain;
pub mod config;
pub mod validation;
pub mod shocks;
pub mod deck;
pub mod capability;
pub mod kpi;
pub mod state;
pub mod history;
pub mod invariants;
pub mod hashing;
pub mod engine;

pub use config::SimulationConfig;
pub use domain::{Allocation, Capability, CapabilityState, Kpi, KpiState, Move, ShockCard};
pub use engine::{QuarterEngine, QuarterOutcome, SimulationStatus};
pub use error::{AllocationFault, EngineError};
pub use history::{HistoryEntry, HistoryLog};
