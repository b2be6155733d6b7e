/// Ansoff Engine — Canonical Hashing
///
/// Deterministic serialization + SHA-256 of a run, used to compare
/// replays and sessions.
///
/// Rules:
///   - model_version first, then config, quarter, capabilities, kpis,
///     last_shock, history
///   - capabilities and KPIs keyed by display label, in declaration order
///   - shocks identified by title
///   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::config::SimulationConfig;
use crate::domain::{Allocation, CapabilityState, KpiState};
use crate::history::HistoryLog;
use crate::state::SimulationState;
use crate::MODEL_VERSION;

/// Canonical serialization to UTF-8 JSON bytes.
pub fn canonical_serialize(
    config: &SimulationConfig,
    state: &SimulationState,
    history: &HistoryLog,
) -> Vec<u8> {
    build_canonical_value(config, state, history)
        .to_string()
        .into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex.
pub fn canonical_hash(
    config: &SimulationConfig,
    state: &SimulationState,
    history: &HistoryLog,
) -> String {
    hex_digest(&canonical_serialize(config, state, history))
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

fn capabilities_value(caps: &CapabilityState) -> Value {
    let mut map = Map::new();
    for (cap, value) in caps.iter() {
        map.insert(cap.label().to_string(), Value::from(value));
    }
    Value::Object(map)
}

fn kpis_value(kpis: &KpiState) -> Value {
    let mut map = Map::new();
    for (kpi, value) in kpis.iter() {
        map.insert(kpi.label().to_string(), Value::from(value));
    }
    Value::Object(map)
}

fn allocation_value(alloc: &Allocation) -> Value {
    Value::Array(vec![
        Value::from(alloc.a),
        Value::from(alloc.b),
        Value::from(alloc.c),
        Value::from(alloc.d),
    ])
}

fn build_canonical_value(
    config: &SimulationConfig,
    state: &SimulationState,
    history: &HistoryLog,
) -> Value {
    let mut cfg = Map::new();
    cfg.insert("budget".to_string(), Value::from(config.budget));
    cfg.insert("max_quarters".to_string(), Value::from(config.max_quarters));

    let mut entries = Vec::with_capacity(history.len());
    for entry in history {
        let mut e = Map::new();
        e.insert("quarter".to_string(), Value::from(entry.quarter));
        e.insert("allocation".to_string(), allocation_value(&entry.allocation));
        e.insert("kpis".to_string(), kpis_value(&entry.kpis));
        e.insert("capabilities".to_string(), capabilities_value(&entry.capabilities));
        e.insert("shock".to_string(), Value::String(entry.shock.title.clone()));
        entries.push(Value::Object(e));
    }

    // model_version MUST be first.
    let mut root = Map::new();
    root.insert("model_version".to_string(), Value::from(MODEL_VERSION));
    root.insert("config".to_string(), Value::Object(cfg));
    root.insert("quarter".to_string(), Value::from(state.quarter));
    root.insert("capabilities".to_string(), capabilities_value(&state.capabilities));
    root.insert("kpis".to_string(), kpis_value(&state.kpis));
    root.insert(
        "last_shock".to_string(),
        state
            .last_shock
            .as_ref()
            .map(|card| Value::String(card.title.clone()))
            .unwrap_or(Value::Null),
    );
    root.insert("history".to_string(), Value::Array(entries));

    Value::Object(root)
}
