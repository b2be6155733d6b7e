/// Ansoff Engine — State Construction
///
/// Every run starts from the same capability and KPI values.

use serde::{Deserialize, Serialize};

use crate::domain::{CapabilityState, KpiState, ShockCard};

/// First quarter of a run.
pub const FIRST_QUARTER: u32 = 1;

pub fn initial_capabilities() -> CapabilityState {
    CapabilityState {
        brand: 55.0,
        rnd: 55.0,
        supply_chain: 55.0,
        retail_carrier_channels: 55.0,
        software_services: 50.0,
        enterprise_sales: 40.0,
    }
}

pub fn initial_kpis() -> KpiState {
    KpiState {
        revenue_index: 100.0,
        gross_margin_pct: 34.0,
        market_share_pct: 8.0,
        cash: 100.0,
        risk: 20.0,
        optionality: 20.0,
    }
}

/// Mutable per-run state owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationState {
    /// Quarter awaiting an allocation (`max_quarters + 1` once complete).
    pub quarter: u32,
    pub capabilities: CapabilityState,
    pub kpis: KpiState,
    pub last_shock: Option<ShockCard>,
}

impl Default for SimulationState {
    fn default() -> Self {
        create_initial_state()
    }
}

pub fn create_initial_state() -> SimulationState {
    SimulationState {
        quarter: FIRST_QUARTER,
        capabilities: initial_capabilities(),
        kpis: initial_kpis(),
        last_shock: None,
    }
}
