/// Quarter engine behaviour — bounds, rejection purity, deck passes,
/// terminal state and reproducibility, driven through the public API.

use std::collections::BTreeSet;

use ansoff_engine::capability::apply_allocation;
use ansoff_engine::domain::{ShockEffect, TargetKind};
use ansoff_engine::hashing::canonical_serialize;
use ansoff_engine::invariants::validate_invariants;
use ansoff_engine::shocks::standard_cards;
use ansoff_engine::state::{create_initial_state, initial_capabilities};
use ansoff_engine::{
    Allocation, AllocationFault, Capability, EngineError, Kpi, QuarterEngine, SimulationConfig,
    SimulationStatus,
};
use proptest::prelude::*;
use rand::rngs::mock::StepRng;

fn engine(seed: u64) -> QuarterEngine {
    QuarterEngine::from_seed(SimulationConfig::default(), seed).expect("default config is valid")
}

fn even() -> Allocation {
    Allocation::new(25, 25, 25, 25)
}

// ─────────────────────────────────────────────────────────────
// Rejection purity
// ─────────────────────────────────────────────────────────────

#[test]
fn over_budget_allocation_leaves_engine_untouched() {
    let mut engine = engine(42);
    engine.advance(&even()).unwrap();

    let before_state = engine.state().clone();
    let before_history = engine.history().clone();
    let before_bytes = canonical_serialize(engine.config(), engine.state(), engine.history());
    let before_remaining = engine.deck().remaining();

    let err = engine.advance(&Allocation::new(30, 30, 30, 30)).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAllocation(AllocationFault::SumMismatch { total: 120, budget: 100 })
    );

    assert_eq!(engine.state(), &before_state);
    assert_eq!(engine.history(), &before_history);
    assert_eq!(engine.quarter(), 2);
    assert_eq!(engine.deck().remaining(), before_remaining);
    assert_eq!(
        canonical_serialize(engine.config(), engine.state(), engine.history()),
        before_bytes
    );
}

#[test]
fn overflowing_allocation_is_rejected_without_side_effects() {
    let mut engine = engine(8);
    let before_bytes = canonical_serialize(engine.config(), engine.state(), engine.history());

    let err = engine
        .advance(&Allocation::new(i64::MAX, i64::MAX, 2, 100))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAllocation(AllocationFault::TotalOverflow { budget: 100 })
    );
    assert_eq!(engine.quarter(), 1);
    assert!(engine.history().is_empty());
    assert_eq!(
        canonical_serialize(engine.config(), engine.state(), engine.history()),
        before_bytes
    );
}

#[test]
fn rejected_submission_does_not_consume_randomness() {
    let mut a = engine(9);
    let mut b = engine(9);
    let _ = a.advance(&Allocation::new(-5, 55, 25, 25));
    a.advance(&even()).unwrap();
    b.advance(&even()).unwrap();
    assert_eq!(a.current_hash(), b.current_hash());
}

// ─────────────────────────────────────────────────────────────
// Terminal state
// ─────────────────────────────────────────────────────────────

#[test]
fn advance_after_max_quarters_reports_complete() {
    let mut engine = engine(1);
    for q in 1..=6 {
        assert_eq!(engine.status(), SimulationStatus::AwaitingAllocation);
        let outcome = engine.advance(&even()).unwrap();
        assert_eq!(outcome.quarter, q);
    }
    assert_eq!(engine.status(), SimulationStatus::Completed);
    assert_eq!(engine.history().len(), 6);

    let before = engine.current_hash();
    let err = engine.advance(&even()).unwrap_err();
    assert_eq!(err, EngineError::SimulationComplete { quarter: 7, max_quarters: 6 });
    assert!(err.is_terminal());
    assert_eq!(engine.history().len(), 6);
    assert_eq!(engine.current_hash(), before);
}

#[test]
fn final_outcome_reports_completed_status() {
    let config = SimulationConfig::new(100, 2).unwrap();
    let mut engine = QuarterEngine::from_seed(config, 3).unwrap();
    assert_eq!(engine.advance(&even()).unwrap().status, SimulationStatus::AwaitingAllocation);
    assert_eq!(engine.advance(&even()).unwrap().status, SimulationStatus::Completed);
}

#[test]
fn validation_precedes_completion_check() {
    let config = SimulationConfig::new(100, 1).unwrap();
    let mut engine = QuarterEngine::from_seed(config, 3).unwrap();
    engine.advance(&even()).unwrap();
    let err = engine.advance(&Allocation::new(10, 10, 10, 10)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAllocation(_)));
}

// ─────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────

#[test]
fn history_records_post_quarter_snapshots() {
    let mut engine = engine(5);
    let alloc = Allocation::new(40, 30, 20, 10);
    let outcome = engine.advance(&alloc).unwrap();

    let entry = engine.history().latest().expect("one entry");
    assert_eq!(entry.quarter, 1);
    assert_eq!(entry.allocation, alloc);
    assert_eq!(&entry.kpis, engine.kpis());
    assert_eq!(&entry.capabilities, engine.capabilities());
    assert_eq!(entry.shock, outcome.shock);
    assert_eq!(engine.last_shock(), Some(&outcome.shock));
}

// ─────────────────────────────────────────────────────────────
// Shock deck through the engine
// ─────────────────────────────────────────────────────────────

#[test]
fn each_deck_pass_shows_every_shock_once() {
    let config = SimulationConfig::new(100, 10).unwrap();
    let mut engine = QuarterEngine::from_seed(config, 77).unwrap();
    let mut titles = Vec::new();
    for _ in 0..10 {
        titles.push(engine.advance(&even()).unwrap().shock.title);
    }
    let first: BTreeSet<&String> = titles[..5].iter().collect();
    let second: BTreeSet<&String> = titles[5..].iter().collect();
    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 5);
}

#[test]
fn second_pass_is_reshuffled() {
    let passes = |seed: u64| -> (Vec<String>, Vec<String>) {
        let config = SimulationConfig::new(100, 10).unwrap();
        let mut e = QuarterEngine::from_seed(config, seed).unwrap();
        let titles: Vec<String> = (0..10)
            .map(|_| e.advance(&even()).unwrap().shock.title)
            .collect();
        (titles[..5].to_vec(), titles[5..].to_vec())
    };
    let reshuffled = (0..10u64)
        .map(passes)
        .filter(|(first, second)| first != second)
        .count();
    assert!(reshuffled > 0, "ten seeds repeated the first pass order");
}

#[test]
fn pass_order_depends_only_on_seed() {
    let order = |seed: u64| -> Vec<String> {
        let mut e = engine(seed);
        (0..5).map(|_| e.advance(&even()).unwrap().shock.title).collect()
    };
    assert_eq!(order(123), order(123));
    let distinct: BTreeSet<Vec<String>> = (0..20).map(order).collect();
    assert!(distinct.len() > 1, "twenty seeds produced a single permutation");
}

// ─────────────────────────────────────────────────────────────
// Strategy divergence
// ─────────────────────────────────────────────────────────────

#[test]
fn all_core_carries_less_risk_than_all_diversification() {
    let mut core = engine(2024);
    let mut diversify = engine(2024);
    let core_out = core.advance(&Allocation::new(100, 0, 0, 0)).unwrap();
    let div_out = diversify.advance(&Allocation::new(0, 0, 0, 100)).unwrap();
    assert!(core_out.kpi_deltas.risk < div_out.kpi_deltas.risk);
}

#[test]
fn all_core_barely_builds_rnd_or_enterprise_sales() {
    let before = initial_capabilities();
    let after = apply_allocation(&before, &Allocation::new(100, 0, 0, 0), 100);
    assert!(after.get(Capability::RnD) - before.get(Capability::RnD) <= 1.0 + 1e-9);
    assert_eq!(
        after.get(Capability::EnterpriseSales),
        before.get(Capability::EnterpriseSales)
    );
}

#[test]
fn low_cash_surcharge_is_six_risk_points() {
    // Same seed, same allocation, only starting cash differs.
    use ansoff_engine::kpi::apply_allocation as apply_kpis;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let caps = initial_capabilities();
    let alloc = even();
    let mut poor = create_initial_state().kpis;
    poor.cash = 30.0;
    let mut flush = create_initial_state().kpis;
    flush.cash = 50.0;

    let mut rng_a = ChaCha8Rng::seed_from_u64(8);
    let mut rng_b = ChaCha8Rng::seed_from_u64(8);
    let a = apply_kpis(&caps, &alloc, 100, &poor, &mut rng_a);
    let b = apply_kpis(&caps, &alloc, 100, &flush, &mut rng_b);
    assert!((a.deltas.risk - b.deltas.risk - 6.0).abs() < 1e-12);
}

// ─────────────────────────────────────────────────────────────
// Reproducibility and reset
// ─────────────────────────────────────────────────────────────

#[test]
fn same_seed_and_allocations_reproduce_run() {
    let plan = [
        Allocation::new(40, 30, 20, 10),
        Allocation::new(10, 20, 30, 40),
        Allocation::new(0, 0, 50, 50),
    ];
    let run = |seed: u64| {
        let mut e = engine(seed);
        for a in &plan {
            e.advance(a).unwrap();
        }
        (e.current_hash(), e.kpis().clone())
    };
    assert_eq!(run(31), run(31));
    assert_ne!(run(31).0, run(32).0);
}

#[test]
fn reset_restores_initial_run() {
    let mut engine = engine(4);
    engine.advance(&even()).unwrap();
    engine.advance(&even()).unwrap();
    engine.reset();

    assert_eq!(engine.state(), &create_initial_state());
    assert!(engine.history().is_empty());
    assert!(engine.last_shock().is_none());
    assert_eq!(engine.deck().remaining(), engine.deck().len());
    assert_eq!(engine.status(), SimulationStatus::AwaitingAllocation);
}

// ─────────────────────────────────────────────────────────────
// Construction-time failures and injected RNGs
// ─────────────────────────────────────────────────────────────

#[test]
fn misconfiguration_is_fatal() {
    let bad = SimulationConfig { budget: 0, max_quarters: 6 };
    assert!(matches!(
        QuarterEngine::from_seed(bad, 1),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        QuarterEngine::with_cards(SimulationConfig::default(), Vec::new(), StepRng::new(0, 1)),
        Err(EngineError::EmptyDeck)
    ));
}

#[test]
fn invalid_shock_target_fails_at_construction() {
    let err = ShockEffect::parse(TargetKind::Kpi, "Supply Chain", -8.0).unwrap_err();
    assert!(matches!(err, EngineError::UnknownShockTarget { .. }));
}

#[test]
fn custom_rng_and_cards_are_honoured() {
    let cards = vec![standard_cards().remove(4)];
    let mut engine =
        QuarterEngine::with_cards(SimulationConfig::default(), cards, StepRng::new(0, 0)).unwrap();
    for _ in 0..3 {
        let outcome = engine.advance(&even()).unwrap();
        assert_eq!(outcome.shock.title, "FX swing boosts profitability in one region");
    }
    validate_invariants(engine.state(), engine.history());
}

#[test]
fn failed_invariant_check_rolls_back_the_quarter() {
    let runaway = ansoff_engine::ShockCard {
        title: "Runaway demand".to_string(),
        text: String::new(),
        effects: vec![ShockEffect::kpi(Kpi::RevenueIndex, f64::INFINITY)],
    };
    let mut engine =
        QuarterEngine::with_cards(SimulationConfig::default(), vec![runaway], StepRng::new(0, 1))
            .unwrap();
    let before_bytes = canonical_serialize(engine.config(), engine.state(), engine.history());

    let err = engine.advance(&even()).unwrap_err();
    assert!(matches!(err, EngineError::InvariantViolation(_)));
    assert_eq!(engine.quarter(), 1);
    assert!(engine.history().is_empty());
    assert!(engine.last_shock().is_none());
    assert_eq!(
        canonical_serialize(engine.config(), engine.state(), engine.history()),
        before_bytes
    );
}

#[test]
fn budget_other_than_hundred() {
    let config = SimulationConfig::new(40, 3).unwrap();
    let mut engine = QuarterEngine::from_seed(config, 6).unwrap();
    assert!(engine.advance(&even()).is_err());
    engine.advance(&Allocation::new(10, 10, 10, 10)).unwrap();
    assert_eq!(engine.quarter(), 2);
}

// ─────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────

fn allocation_strategy(budget: i64) -> impl Strategy<Value = Allocation> {
    (0..=budget, 0..=budget, 0..=budget).prop_map(move |(x, y, z)| {
        let mut cuts = [x, y, z];
        cuts.sort_unstable();
        Allocation::new(cuts[0], cuts[1] - cuts[0], cuts[2] - cuts[1], budget - cuts[2])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn values_stay_in_range_for_any_run(
        seed in any::<u64>(),
        plan in prop::collection::vec(allocation_strategy(100), 1..=20),
    ) {
        let config = SimulationConfig::new(100, 20).unwrap();
        let mut engine = QuarterEngine::from_seed(config, seed).unwrap();
        for alloc in &plan {
            engine.advance(alloc).unwrap();
            for (_, v) in engine.capabilities().iter() {
                prop_assert!((0.0..=100.0).contains(&v));
            }
            for (kpi, v) in engine.kpis().iter() {
                let (lo, hi) = kpi.bounds();
                prop_assert!(v >= lo && v <= hi, "{} = {}", kpi, v);
            }
        }
        prop_assert_eq!(engine.history().len(), plan.len());
        prop_assert!(engine.kpis().get(Kpi::RevenueIndex) >= 40.0);
    }
}
