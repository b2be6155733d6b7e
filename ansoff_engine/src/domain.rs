/// Ansoff Engine — Core Domain Types
///
/// Pure data. No model logic.
/// Capabilities live in [0, 100]; each KPI carries its own range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ── Strategic moves ───────────────────────────────────────────────

/// The four Ansoff moves a quarter's points are split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    A,
    B,
    C,
    D,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::A, Move::B, Move::C, Move::D];

    pub fn name(self) -> &'static str {
        match self {
            Move::A => "Win the core smartphone business",
            Move::B => "Expand into new markets and channels",
            Move::C => "Build the next offering for current customers",
            Move::D => "Enter a new arena",
        }
    }

    /// Ansoff quadrant.
    pub fn ansoff(self) -> &'static str {
        match self {
            Move::A => "Market penetration",
            Move::B => "Market development",
            Move::C => "Product development",
            Move::D => "Diversification",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Move::A => {
                "Improve conversion, retention, pricing, and unit economics in current segments. \
                 Examples: carrier promos, cost-down, reliability, mid-cycle refresh."
            }
            Move::B => {
                "Take current phones into new geographies or channels. Examples: India growth push, \
                 LATAM distributors, online D2C store, new carrier partnerships."
            }
            Move::C => {
                "New products or major upgrades for existing customers. Examples: foldables, \
                 camera AI stack, wearables bundle, OS features, premium services."
            }
            Move::D => {
                "New customers and new economics. Examples: enterprise mobility suite, device \
                 financing, refurbished marketplace, IoT edge devices, AR glasses."
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::A => "A",
            Move::B => "B",
            Move::C => "C",
            Move::D => "D",
        };
        f.write_str(s)
    }
}

/// Points assigned to each move for one quarter.
///
/// Signed so that a negative submission can be represented and rejected
/// by validation rather than by the type system at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Allocation {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
}

impl Allocation {
    pub fn new(a: i64, b: i64, c: i64, d: i64) -> Self {
        Self { a, b, c, d }
    }

    /// Equal points per move; any remainder goes to A.
    pub fn even_split(budget: i64) -> Self {
        let share = budget / 4;
        Self::new(budget - 3 * share, share, share, share)
    }

    pub fn points(&self, slot: Move) -> i64 {
        match slot {
            Move::A => self.a,
            Move::B => self.b,
            Move::C => self.c,
            Move::D => self.d,
        }
    }

    /// Sum of all four slots; `None` if it does not fit in an `i64`.
    pub fn total(&self) -> Option<i64> {
        self.a
            .checked_add(self.b)?
            .checked_add(self.c)?
            .checked_add(self.d)
    }

    /// Move with the most points. Ties go to the earliest of A, B, C, D.
    pub fn largest_move(&self) -> Move {
        let mut best = Move::A;
        for slot in Move::ALL {
            if self.points(slot) > self.points(best) {
                best = slot;
            }
        }
        best
    }
}

// ── Capabilities ──────────────────────────────────────────────────

/// Latent organizational strengths, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    Brand,
    RnD,
    SupplyChain,
    RetailCarrierChannels,
    SoftwareServices,
    EnterpriseSales,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Brand,
        Capability::RnD,
        Capability::SupplyChain,
        Capability::RetailCarrierChannels,
        Capability::SoftwareServices,
        Capability::EnterpriseSales,
    ];

    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn label(self) -> &'static str {
        match self {
            Capability::Brand => "Brand",
            Capability::RnD => "R&D",
            Capability::SupplyChain => "Supply Chain",
            Capability::RetailCarrierChannels => "Retail & Carrier Channels",
            Capability::SoftwareServices => "Software & Services",
            Capability::EnterpriseSales => "Enterprise Sales",
        }
    }

    pub fn from_label(label: &str) -> Option<Capability> {
        Capability::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Row index into per-capability tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current value of every capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityState {
    pub brand: f64,
    pub rnd: f64,
    pub supply_chain: f64,
    pub retail_carrier_channels: f64,
    pub software_services: f64,
    pub enterprise_sales: f64,
}

impl CapabilityState {
    pub fn get(&self, cap: Capability) -> f64 {
        match cap {
            Capability::Brand => self.brand,
            Capability::RnD => self.rnd,
            Capability::SupplyChain => self.supply_chain,
            Capability::RetailCarrierChannels => self.retail_carrier_channels,
            Capability::SoftwareServices => self.software_services,
            Capability::EnterpriseSales => self.enterprise_sales,
        }
    }

    /// Raw setter. Callers clamp first.
    pub(crate) fn set(&mut self, cap: Capability, value: f64) {
        let slot = match cap {
            Capability::Brand => &mut self.brand,
            Capability::RnD => &mut self.rnd,
            Capability::SupplyChain => &mut self.supply_chain,
            Capability::RetailCarrierChannels => &mut self.retail_carrier_channels,
            Capability::SoftwareServices => &mut self.software_services,
            Capability::EnterpriseSales => &mut self.enterprise_sales,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Capability, f64)> + '_ {
        Capability::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

// ── KPIs ──────────────────────────────────────────────────────────

/// Observable outcome metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kpi {
    RevenueIndex,
    GrossMarginPct,
    MarketSharePct,
    Cash,
    Risk,
    Optionality,
}

impl Kpi {
    pub const ALL: [Kpi; 6] = [
        Kpi::RevenueIndex,
        Kpi::GrossMarginPct,
        Kpi::MarketSharePct,
        Kpi::Cash,
        Kpi::Risk,
        Kpi::Optionality,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Kpi::RevenueIndex => "Revenue Index",
            Kpi::GrossMarginPct => "Gross Margin %",
            Kpi::MarketSharePct => "Market Share %",
            Kpi::Cash => "Cash",
            Kpi::Risk => "Risk",
            Kpi::Optionality => "Optionality",
        }
    }

    pub fn from_label(label: &str) -> Option<Kpi> {
        Kpi::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Inclusive `(min, max)`. Revenue Index is floor-only.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Kpi::RevenueIndex => (40.0, f64::INFINITY),
            Kpi::GrossMarginPct => (10.0, 60.0),
            Kpi::MarketSharePct => (0.5, 40.0),
            Kpi::Cash => (0.0, 200.0),
            Kpi::Risk => (0.0, 100.0),
            Kpi::Optionality => (0.0, 100.0),
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current value of every KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KpiState {
    pub revenue_index: f64,
    pub gross_margin_pct: f64,
    pub market_share_pct: f64,
    pub cash: f64,
    pub risk: f64,
    pub optionality: f64,
}

impl KpiState {
    pub fn get(&self, kpi: Kpi) -> f64 {
        match kpi {
            Kpi::RevenueIndex => self.revenue_index,
            Kpi::GrossMarginPct => self.gross_margin_pct,
            Kpi::MarketSharePct => self.market_share_pct,
            Kpi::Cash => self.cash,
            Kpi::Risk => self.risk,
            Kpi::Optionality => self.optionality,
        }
    }

    /// Raw setter. Callers clamp first.
    pub(crate) fn set(&mut self, kpi: Kpi, value: f64) {
        let slot = match kpi {
            Kpi::RevenueIndex => &mut self.revenue_index,
            Kpi::GrossMarginPct => &mut self.gross_margin_pct,
            Kpi::MarketSharePct => &mut self.market_share_pct,
            Kpi::Cash => &mut self.cash,
            Kpi::Risk => &mut self.risk,
            Kpi::Optionality => &mut self.optionality,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kpi, f64)> + '_ {
        Kpi::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

// ── Shocks ────────────────────────────────────────────────────────

/// Which layer a shock effect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Capability,
    Kpi,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Capability => f.write_str("capability"),
            TargetKind::Kpi => f.write_str("kpi"),
        }
    }
}

/// Resolved shock target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShockTarget {
    Capability(Capability),
    Kpi(Kpi),
}

/// One signed delta applied by a shock card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShockEffect {
    pub target: ShockTarget,
    pub delta: f64,
}

impl ShockEffect {
    pub fn capability(cap: Capability, delta: f64) -> Self {
        Self { target: ShockTarget::Capability(cap), delta }
    }

    pub fn kpi(kpi: Kpi, delta: f64) -> Self {
        Self { target: ShockTarget::Kpi(kpi), delta }
    }

    /// Resolve a display name against a declared kind.
    /// A name that is not of that kind is rejected, never ignored.
    pub fn parse(kind: TargetKind, name: &str, delta: f64) -> Result<Self, EngineError> {
        let target = match kind {
            TargetKind::Capability => Capability::from_label(name).map(ShockTarget::Capability),
            TargetKind::Kpi => Kpi::from_label(name).map(ShockTarget::Kpi),
        };
        match target {
            Some(target) => Ok(Self { target, delta }),
            None => Err(EngineError::UnknownShockTarget {
                kind,
                name: name.to_string(),
            }),
        }
    }
}

/// Exogenous event card. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShockCard {
    pub title: String,
    pub text: String,
    pub effects: Vec<ShockEffect>,
}
