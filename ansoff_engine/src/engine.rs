/// Ansoff Engine — Quarter Engine
///
/// Top-level orchestrator and the only owner of mutable run state.
/// One `advance()` call plays one quarter:
///
///   1. Validate the allocation
///   2. Refuse if the run is complete
///   3. Update capabilities
///   4. Update KPIs (fresh draws)
///   5. Draw and apply a shock
///   6. Append a history entry
///   7. Advance the quarter counter
///
/// Steps 3-7 run on staged copies of state, deck and RNG; the new history
/// entry is rolled back unless the invariant checks pass, so a failed
/// call leaves the engine untouched.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::arithmetic::clamp;
use crate::capability;
use crate::config::SimulationConfig;
use crate::deck::ShockDeck;
use crate::domain::{
    Allocation, Capability, CapabilityState, KpiState, ShockCard, ShockTarget,
};
use crate::error::EngineError;
use crate::hashing::canonical_hash;
use crate::history::{HistoryEntry, HistoryLog};
use crate::invariants::try_validate_invariants;
use crate::kpi::{self, clamp_kpi, Composites, KpiDeltas};
use crate::shocks::standard_cards;
use crate::state::{create_initial_state, SimulationState};
use crate::validation::validate_allocation;

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    AwaitingAllocation,
    Completed,
}

/// What one accepted quarter did.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterOutcome {
    /// Quarter that was just played.
    pub quarter: u32,
    pub kpi_deltas: KpiDeltas,
    pub composites: Composites,
    pub shock: ShockCard,
    /// Status after the quarter counter moved.
    pub status: SimulationStatus,
}

/// Stateful engine over an injected RNG.
pub struct QuarterEngine<R: RngCore = ChaCha8Rng> {
    config: SimulationConfig,
    state: SimulationState,
    deck: ShockDeck,
    history: HistoryLog,
    rng: R,
}

impl QuarterEngine<ChaCha8Rng> {
    /// Engine over a ChaCha8 stream seeded with `seed`.
    pub fn from_seed(config: SimulationConfig, seed: u64) -> Result<Self, EngineError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Clone> QuarterEngine<R> {
    /// Engine with the standard shock cards.
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, EngineError> {
        Self::with_cards(config, standard_cards(), rng)
    }

    /// Engine over a custom card set. Misconfiguration is fatal here:
    /// no engine is returned until config and deck are valid.
    pub fn with_cards(
        config: SimulationConfig,
        cards: Vec<ShockCard>,
        mut rng: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mut deck = ShockDeck::new(cards)?;
        deck.reset(&mut rng);
        info!(
            budget = config.budget,
            max_quarters = config.max_quarters,
            cards = deck.len(),
            "quarter engine ready"
        );
        Ok(Self {
            config,
            state: create_initial_state(),
            deck,
            history: HistoryLog::new(),
            rng,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn capabilities(&self) -> &CapabilityState {
        &self.state.capabilities
    }

    pub fn kpis(&self) -> &KpiState {
        &self.state.kpis
    }

    pub fn last_shock(&self) -> Option<&ShockCard> {
        self.state.last_shock.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn deck(&self) -> &ShockDeck {
        &self.deck
    }

    /// Quarter awaiting an allocation; `max_quarters + 1` once complete.
    pub fn quarter(&self) -> u32 {
        self.state.quarter
    }

    /// Quarter shown to a player: never past `max_quarters`.
    pub fn display_quarter(&self) -> u32 {
        self.state.quarter.min(self.config.max_quarters)
    }

    pub fn status(&self) -> SimulationStatus {
        if self.state.quarter > self.config.max_quarters {
            SimulationStatus::Completed
        } else {
            SimulationStatus::AwaitingAllocation
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SimulationStatus::Completed
    }

    /// Canonical hash of the current run.
    pub fn current_hash(&self) -> String {
        canonical_hash(&self.config, &self.state, &self.history)
    }

    /// Check an allocation without touching the engine.
    pub fn check_allocation(&self, allocation: &Allocation) -> Result<(), EngineError> {
        validate_allocation(allocation, self.config.budget)
    }

    /// Play one quarter. All-or-nothing.
    pub fn advance(&mut self, allocation: &Allocation) -> Result<QuarterOutcome, EngineError> {
        if let Err(err) = self.check_allocation(allocation) {
            warn!(quarter = self.state.quarter, %err, "allocation rejected");
            return Err(err);
        }
        if self.is_complete() {
            warn!(quarter = self.state.quarter, "advance after final quarter");
            return Err(EngineError::SimulationComplete {
                quarter: self.state.quarter,
                max_quarters: self.config.max_quarters,
            });
        }

        let budget = self.config.budget;
        let played = self.state.quarter;
        let mut next = self.state.clone();
        let mut rng = self.rng.clone();

        next.capabilities = capability::apply_allocation(&self.state.capabilities, allocation, budget);

        let update = kpi::apply_allocation(
            &next.capabilities,
            allocation,
            budget,
            &self.state.kpis,
            &mut rng,
        );
        next.kpis = update.kpis;
        debug!(
            quarter = played,
            revenue_pct = update.deltas.revenue_pct,
            market_share = update.deltas.market_share,
            gross_margin = update.deltas.gross_margin,
            cash = update.deltas.cash,
            optionality = update.deltas.optionality,
            risk = update.deltas.risk,
            "kpi deltas"
        );

        let mut deck = self.deck.clone();
        let card = deck.draw(&mut rng);
        apply_shock(&mut next.capabilities, &mut next.kpis, &card);
        next.last_shock = Some(card.clone());

        next.quarter = played + 1;
        self.history.append(HistoryEntry {
            quarter: played,
            allocation: *allocation,
            kpis: next.kpis.clone(),
            capabilities: next.capabilities.clone(),
            shock: card.clone(),
        });

        if let Err(violation) = try_validate_invariants(&next, &self.history) {
            self.history.discard_latest();
            return Err(EngineError::InvariantViolation(violation));
        }

        self.state = next;
        self.deck = deck;
        self.rng = rng;

        let status = self.status();
        info!(quarter = played, shock = %card.title, "quarter played");
        if status == SimulationStatus::Completed {
            info!(quarters = self.config.max_quarters, "simulation complete");
        }

        Ok(QuarterOutcome {
            quarter: played,
            kpi_deltas: update.deltas,
            composites: update.composites,
            shock: card,
            status,
        })
    }

    /// Back to quarter 1 with initial values, empty history and a freshly
    /// shuffled deck. The RNG stream continues.
    pub fn reset(&mut self) {
        self.state = create_initial_state();
        self.history = HistoryLog::new();
        self.deck.reset(&mut self.rng);
        info!("simulation reset");
    }
}

/// Apply every effect of `card`, clamping each target to its range.
pub fn apply_shock(capabilities: &mut CapabilityState, kpis: &mut KpiState, card: &ShockCard) {
    for effect in &card.effects {
        match effect.target {
            ShockTarget::Capability(cap) => {
                let value = clamp(
                    capabilities.get(cap) + effect.delta,
                    Capability::MIN,
                    Capability::MAX,
                );
                capabilities.set(cap, value);
            }
            ShockTarget::Kpi(k) => {
                kpis.set(k, clamp_kpi(k, kpis.get(k) + effect.delta));
            }
        }
    }
}
