/// Ansoff Engine — KPI Model
///
/// Capabilities are first folded into four composite indices in [0, 1].
/// Each KPI delta is then a linear mix of allocation shares, composites
/// and one bounded uniform draw. Revenue compounds; everything else is
/// additive and clamped to the KPI's range.
///
/// Draw order is fixed (Revenue, Market Share, Gross Margin, Cash,
/// Optionality, Risk) so a seeded RNG replays exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{clamp, floor_at, grow_by_percent};
use crate::capability::allocation_fractions;
use crate::domain::{Allocation, CapabilityState, Kpi, KpiState};

/// Diversification fit below this is penalised in Risk.
pub const DIVERSIFICATION_FIT_TARGET: f64 = 0.55;
/// Risk points per unit of diversification penalty.
pub const DIVERSIFICATION_RISK_WEIGHT: f64 = 16.0;
/// Cash below this (before the quarter's cash update) adds `LOW_CASH_RISK`.
pub const LOW_CASH_THRESHOLD: f64 = 35.0;
pub const LOW_CASH_RISK: f64 = 6.0;

pub const REVENUE_NOISE: (f64, f64) = (-0.9, 0.9);
pub const MARKET_SHARE_NOISE: (f64, f64) = (-0.25, 0.25);
pub const GROSS_MARGIN_NOISE: (f64, f64) = (-0.6, 0.6);
pub const CASH_NOISE: (f64, f64) = (-3.0, 3.0);
pub const OPTIONALITY_NOISE: (f64, f64) = (-0.8, 0.8);
pub const RISK_NOISE: (f64, f64) = (-1.0, 1.2);

// ---------------------------------------------------------------------------
// Composites
// ---------------------------------------------------------------------------

/// Derived [0, 1] indices used only inside the KPI formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composites {
    pub diversification_fit: f64,
    pub core_efficiency: f64,
    pub innovation: f64,
    pub channel: f64,
}

impl Composites {
    pub fn from_capabilities(caps: &CapabilityState) -> Self {
        Self {
            diversification_fit: (caps.enterprise_sales * 0.6 + caps.software_services * 0.4)
                / 100.0,
            core_efficiency: (caps.supply_chain * 0.35
                + caps.retail_carrier_channels * 0.35
                + caps.brand * 0.30)
                / 100.0,
            innovation: (caps.rnd * 0.55 + caps.software_services * 0.45) / 100.0,
            channel: caps.retail_carrier_channels / 100.0,
        }
    }

    /// `max(0, 0.55 - diversification_fit)`
    pub fn diversification_penalty(&self) -> f64 {
        (DIVERSIFICATION_FIT_TARGET - self.diversification_fit).max(0.0)
    }
}

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

/// One quarter's independent uniform draws, one per KPI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiNoise {
    pub revenue: f64,
    pub market_share: f64,
    pub gross_margin: f64,
    pub cash: f64,
    pub optionality: f64,
    pub risk: f64,
}

impl KpiNoise {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            revenue: draw(rng, REVENUE_NOISE),
            market_share: draw(rng, MARKET_SHARE_NOISE),
            gross_margin: draw(rng, GROSS_MARGIN_NOISE),
            cash: draw(rng, CASH_NOISE),
            optionality: draw(rng, OPTIONALITY_NOISE),
            risk: draw(rng, RISK_NOISE),
        }
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    rng.gen_range(lo..=hi)
}

// ---------------------------------------------------------------------------
// Deltas
// ---------------------------------------------------------------------------

/// Per-KPI change for one quarter. Revenue is a percentage; the rest
/// are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiDeltas {
    pub revenue_pct: f64,
    pub market_share: f64,
    pub gross_margin: f64,
    pub cash: f64,
    pub optionality: f64,
    pub risk: f64,
}

/// Compute every KPI delta. Pure: all randomness arrives via `noise`.
///
/// `kpis_before` is the state at the start of the quarter; only its Cash
/// is read (for the low-cash Risk surcharge).
pub fn compute_deltas(
    composites: &Composites,
    fractions: &[f64; 4],
    kpis_before: &KpiState,
    noise: &KpiNoise,
) -> KpiDeltas {
    let [a, b, c, d] = *fractions;
    let Composites {
        core_efficiency,
        innovation,
        channel,
        ..
    } = *composites;

    let base_growth = 0.8 + 3.8 * a + 3.2 * b + 2.6 * c + 2.2 * d;
    let capability_bonus = 1.8 * core_efficiency + 1.2 * channel + 1.4 * innovation;
    let revenue_pct = base_growth + capability_bonus + noise.revenue;

    let market_share = (0.08 + 1.3 * a + 1.1 * b + 0.6 * c + 0.4 * d) * (0.55 + 0.45 * channel)
        + noise.market_share;

    let gross_margin = (0.20 + 2.0 * a - 1.3 * c - 0.6 * d + 0.4 * b)
        + (core_efficiency - 0.55) * 3.0
        + noise.gross_margin;

    let cash = revenue_pct * 0.55 + gross_margin * 0.45 - (c * 8.0 + d * 10.0) + noise.cash;

    let optionality = (2.0 * c + 3.0 * d) * (0.40 + 0.60 * innovation) + noise.optionality;

    let mut risk = (2.0 * d + 0.6 * c + 0.4 * b - 1.2 * a)
        + composites.diversification_penalty() * DIVERSIFICATION_RISK_WEIGHT;
    if kpis_before.cash < LOW_CASH_THRESHOLD {
        risk += LOW_CASH_RISK;
    }
    risk += noise.risk;

    KpiDeltas {
        revenue_pct,
        market_share,
        gross_margin,
        cash,
        optionality,
        risk,
    }
}

/// Apply `deltas` to `kpis`, honouring every KPI's range.
pub fn apply_deltas(kpis: &KpiState, deltas: &KpiDeltas) -> KpiState {
    let (rev_floor, _) = Kpi::RevenueIndex.bounds();
    KpiState {
        revenue_index: floor_at(grow_by_percent(kpis.revenue_index, deltas.revenue_pct), rev_floor),
        gross_margin_pct: clamp_kpi(Kpi::GrossMarginPct, kpis.gross_margin_pct + deltas.gross_margin),
        market_share_pct: clamp_kpi(Kpi::MarketSharePct, kpis.market_share_pct + deltas.market_share),
        cash: clamp_kpi(Kpi::Cash, kpis.cash + deltas.cash),
        risk: clamp_kpi(Kpi::Risk, kpis.risk + deltas.risk),
        optionality: clamp_kpi(Kpi::Optionality, kpis.optionality + deltas.optionality),
    }
}

/// Clamp `value` into `kpi`'s range.
pub fn clamp_kpi(kpi: Kpi, value: f64) -> f64 {
    let (lo, hi) = kpi.bounds();
    clamp(value, lo, hi)
}

/// Result of one KPI update, kept together so callers can explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiUpdate {
    pub kpis: KpiState,
    pub deltas: KpiDeltas,
    pub composites: Composites,
    pub noise: KpiNoise,
}

/// Full KPI step: composites from `capabilities` (already updated for
/// this quarter), six fresh draws from `rng`, then deltas applied to
/// `kpis`.
pub fn apply_allocation<R: Rng + ?Sized>(
    capabilities: &CapabilityState,
    allocation: &Allocation,
    budget: i64,
    kpis: &KpiState,
    rng: &mut R,
) -> KpiUpdate {
    let composites = Composites::from_capabilities(capabilities);
    let fractions = allocation_fractions(allocation, budget);
    let noise = KpiNoise::sample(rng);
    let deltas = compute_deltas(&composites, &fractions, kpis, &noise);
    KpiUpdate {
        kpis: apply_deltas(kpis, &deltas),
        deltas,
        composites,
        noise,
    }
}
