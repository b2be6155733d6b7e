//! Drift detection — determinism verification and run comparison.

use std::collections::BTreeMap;

use ansoff_engine::{Allocation, Capability, Kpi, SimulationConfig};

use crate::error::RuntimeError;
use crate::replay;
use crate::snapshot_codec::EngineSnapshot;

/// Replay the same submissions twice and require identical hashes.
/// Returns the agreed hash.
pub fn verify_determinism(
    config: &SimulationConfig,
    seed: u64,
    allocations: &[Allocation],
) -> Result<String, RuntimeError> {
    let first = replay::rebuild_hash(config, seed, allocations)?;
    let second = replay::rebuild_hash(config, seed, allocations)?;
    if first != second {
        return Err(RuntimeError::DeterminismFailure { first, second });
    }
    Ok(first)
}

/// Structured comparison of two runs: `b - a` for every value.
pub fn compare_states(a: &EngineSnapshot, b: &EngineSnapshot) -> DriftReport {
    let capability_deltas: BTreeMap<Capability, f64> = Capability::ALL
        .into_iter()
        .map(|cap| (cap, b.capabilities.get(cap) - a.capabilities.get(cap)))
        .collect();
    let kpi_deltas: BTreeMap<Kpi, f64> = Kpi::ALL
        .into_iter()
        .map(|kpi| (kpi, b.kpis.get(kpi) - a.kpis.get(kpi)))
        .collect();

    // Shared quarters whose allocations differ
    let diverged_quarters: Vec<u32> = a
        .history
        .iter()
        .zip(b.history.iter())
        .filter(|(x, y)| x.allocation != y.allocation)
        .map(|(x, _)| x.quarter)
        .collect();

    DriftReport {
        quarter_a: a.quarter,
        quarter_b: b.quarter,
        quarter_delta: b.quarter as i64 - a.quarter as i64,
        history_len_delta: b.history.len() as i64 - a.history.len() as i64,
        capability_deltas,
        kpi_deltas,
        diverged_quarters,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriftReport {
    pub quarter_a: u32,
    pub quarter_b: u32,
    pub quarter_delta: i64,
    pub history_len_delta: i64,
    pub capability_deltas: BTreeMap<Capability, f64>,
    pub kpi_deltas: BTreeMap<Kpi, f64>,
    pub diverged_quarters: Vec<u32>,
}

impl DriftReport {
    /// True when nothing differs.
    pub fn is_identical(&self) -> bool {
        self.quarter_delta == 0
            && self.history_len_delta == 0
            && self.diverged_quarters.is_empty()
            && self.capability_deltas.values().all(|d| *d == 0.0)
            && self.kpi_deltas.values().all(|d| *d == 0.0)
    }

    /// KPI with the largest absolute change, if any changed.
    pub fn largest_kpi_move(&self) -> Option<(Kpi, f64)> {
        self.kpi_deltas
            .iter()
            .filter(|(_, d)| **d != 0.0)
            .max_by(|x, y| x.1.abs().total_cmp(&y.1.abs()))
            .map(|(k, d)| (*k, *d))
    }
}
