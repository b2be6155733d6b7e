/// Ansoff Engine — Invariant Checks
///
/// Two forms: `validate_invariants` panics (harness and tests),
/// `try_validate_invariants` reports the first failure (engine commit
/// path and snapshot restore).

use crate::domain::{Capability, Kpi};
use crate::history::HistoryLog;
use crate::state::{SimulationState, FIRST_QUARTER};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every check. Panics on the first failure.
pub fn validate_invariants(state: &SimulationState, history: &HistoryLog) {
    if let Err(msg) = try_validate_invariants(state, history) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_invariants`.
pub fn try_validate_invariants(
    state: &SimulationState,
    history: &HistoryLog,
) -> Result<(), String> {
    check_capability_bounds(state)?;
    check_kpi_bounds(state)?;
    check_quarter_counter(state, history)?;
    check_history_order(history)?;
    check_history_bounds(history)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

fn capability_in_range(value: f64) -> bool {
    value.is_finite() && (Capability::MIN..=Capability::MAX).contains(&value)
}

fn kpi_in_range(kpi: Kpi, value: f64) -> bool {
    let (lo, hi) = kpi.bounds();
    value.is_finite() && value >= lo && value <= hi
}

/// Every capability in [0, 100].
fn check_capability_bounds(state: &SimulationState) -> Result<(), String> {
    for (cap, value) in state.capabilities.iter() {
        if !capability_in_range(value) {
            return Err(format!(
                "[INVARIANT:capability_bounds] {} = {} outside [0, 100]",
                cap, value
            ));
        }
    }
    Ok(())
}

/// Every KPI inside its own range.
fn check_kpi_bounds(state: &SimulationState) -> Result<(), String> {
    for (kpi, value) in state.kpis.iter() {
        if !kpi_in_range(kpi, value) {
            let (lo, hi) = kpi.bounds();
            return Err(format!(
                "[INVARIANT:kpi_bounds] {} = {} outside [{}, {}]",
                kpi, value, lo, hi
            ));
        }
    }
    Ok(())
}

/// One history entry per completed quarter.
fn check_quarter_counter(state: &SimulationState, history: &HistoryLog) -> Result<(), String> {
    if state.quarter < FIRST_QUARTER {
        return Err(format!(
            "[INVARIANT:quarter_counter] quarter {} precedes first quarter",
            state.quarter
        ));
    }
    let played = (state.quarter - FIRST_QUARTER) as usize;
    if played != history.len() {
        return Err(format!(
            "[INVARIANT:quarter_counter] quarter {} implies {} entries, history has {}",
            state.quarter,
            played,
            history.len()
        ));
    }
    Ok(())
}

/// Entries numbered 1, 2, 3, ... in insertion order.
fn check_history_order(history: &HistoryLog) -> Result<(), String> {
    for (i, entry) in history.iter().enumerate() {
        let expected = FIRST_QUARTER + i as u32;
        if entry.quarter != expected {
            return Err(format!(
                "[INVARIANT:history_order] entry {} records quarter {}, expected {}",
                i, entry.quarter, expected
            ));
        }
    }
    Ok(())
}

fn check_history_bounds(history: &HistoryLog) -> Result<(), String> {
    for entry in history {
        for (cap, value) in entry.capabilities.iter() {
            if !capability_in_range(value) {
                return Err(format!(
                    "[INVARIANT:history_bounds] quarter {}: {} = {} outside [0, 100]",
                    entry.quarter, cap, value
                ));
            }
        }
        for (kpi, value) in entry.kpis.iter() {
            if !kpi_in_range(kpi, value) {
                return Err(format!(
                    "[INVARIANT:history_bounds] quarter {}: {} = {} out of range",
                    entry.quarter, kpi, value
                ));
            }
        }
    }
    Ok(())
}
