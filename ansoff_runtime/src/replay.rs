//! Replay orchestrator — rebuild a run from its seed and submissions.
//!
//! Delegates every transition to the engine. No cached state.

use ansoff_engine::{Allocation, QuarterEngine, SimulationConfig};

use crate::error::RuntimeError;

/// Rebuild a run from scratch.
///
/// 1. Create a fresh engine seeded with `seed`
/// 2. Pass each allocation to `advance` in order
/// 3. Return (engine, canonical_hash)
///
/// Any rejected allocation aborts the replay: a recorded submission log
/// only ever holds accepted turns.
pub fn rebuild_state(
    config: &SimulationConfig,
    seed: u64,
    allocations: &[Allocation],
) -> Result<(QuarterEngine, String), RuntimeError> {
    let mut engine = QuarterEngine::from_seed(config.clone(), seed)?;
    for alloc in allocations {
        engine.advance(alloc)?;
    }
    let hash = engine.current_hash();
    Ok((engine, hash))
}

/// Rebuild a run and return only its canonical hash.
pub fn rebuild_hash(
    config: &SimulationConfig,
    seed: u64,
    allocations: &[Allocation],
) -> Result<String, RuntimeError> {
    let (_, hash) = rebuild_state(config, seed, allocations)?;
    Ok(hash)
}
