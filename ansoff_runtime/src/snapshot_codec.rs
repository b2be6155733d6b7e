//! Snapshot Codec — run snapshots to and from JSON.
//!
//! Pure codec layer. No files, no timestamps.
//!
//! - `capture`:          QuarterEngine → EngineSnapshot
//! - `encode_snapshot`:  EngineSnapshot → JSON string
//! - `decode_snapshot`:  JSON string → EngineSnapshot (strict, no defaults)
//! - `restore_snapshot`: decode + config and invariant validation
//! - `snapshot_hash`:    canonical hash, equal to the live engine's
//! - `document_digest`:  SHA-256 of an encoded document

use rand::RngCore;
use serde::{Deserialize, Serialize};

use ansoff_engine::domain::{CapabilityState, KpiState, ShockCard};
use ansoff_engine::hashing::{canonical_hash, hex_digest};
use ansoff_engine::invariants::try_validate_invariants;
use ansoff_engine::state::SimulationState;
use ansoff_engine::{HistoryLog, QuarterEngine, SimulationConfig};

use crate::error::RuntimeError;

/// Everything an external reporter needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSnapshot {
    pub config: SimulationConfig,
    pub quarter: u32,
    pub capabilities: CapabilityState,
    pub kpis: KpiState,
    pub last_shock: Option<ShockCard>,
    pub history: HistoryLog,
}

impl EngineSnapshot {
    /// The mutable-state part of the snapshot.
    pub fn state(&self) -> SimulationState {
        SimulationState {
            quarter: self.quarter,
            capabilities: self.capabilities.clone(),
            kpis: self.kpis.clone(),
            last_shock: self.last_shock.clone(),
        }
    }
}

/// Copy the engine's read-only view into a snapshot.
pub fn capture<R: RngCore + Clone>(engine: &QuarterEngine<R>) -> EngineSnapshot {
    let state = engine.state();
    EngineSnapshot {
        config: engine.config().clone(),
        quarter: state.quarter,
        capabilities: state.capabilities.clone(),
        kpis: state.kpis.clone(),
        last_shock: state.last_shock.clone(),
        history: engine.history().clone(),
    }
}

pub fn encode_snapshot(snapshot: &EngineSnapshot) -> Result<String, RuntimeError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Strict decode: unknown or missing fields are errors.
pub fn decode_snapshot(json: &str) -> Result<EngineSnapshot, RuntimeError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode and check that the snapshot describes a reachable run.
pub fn restore_snapshot(json: &str) -> Result<EngineSnapshot, RuntimeError> {
    let snapshot = decode_snapshot(json)?;
    snapshot.config.validate()?;
    try_validate_invariants(&snapshot.state(), &snapshot.history)
        .map_err(RuntimeError::InvalidSnapshot)?;
    if snapshot.quarter > snapshot.config.max_quarters.saturating_add(1) {
        return Err(RuntimeError::InvalidSnapshot(format!(
            "quarter {} past max_quarters {}",
            snapshot.quarter, snapshot.config.max_quarters
        )));
    }
    Ok(snapshot)
}

/// Same value `QuarterEngine::current_hash` returns for the captured run.
pub fn snapshot_hash(snapshot: &EngineSnapshot) -> String {
    canonical_hash(&snapshot.config, &snapshot.state(), &snapshot.history)
}

/// SHA-256 of an encoded document, for integrity checks in transit.
pub fn document_digest(encoded: &str) -> String {
    hex_digest(encoded.as_bytes())
}
