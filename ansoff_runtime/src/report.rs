//! Reporting — trend series and quarter narratives from a history log.
//!
//! Read-only over the engine's history. Nothing here feeds back into
//! the model.

use serde::{Deserialize, Serialize};

use ansoff_engine::{HistoryEntry, HistoryLog, Kpi, Move};

/// KPI values at the end of one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub quarter: u32,
    pub revenue_index: f64,
    pub market_share_pct: f64,
    pub gross_margin_pct: f64,
    pub cash: f64,
    pub risk: f64,
    pub optionality: f64,
}

/// One row per played quarter, ordered by quarter.
pub fn trend_series(history: &HistoryLog) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = history
        .iter()
        .map(|e| TrendRow {
            quarter: e.quarter,
            revenue_index: e.kpis.revenue_index,
            market_share_pct: e.kpis.market_share_pct,
            gross_margin_pct: e.kpis.gross_margin_pct,
            cash: e.kpis.cash,
            risk: e.kpis.risk,
            optionality: e.kpis.optionality,
        })
        .collect();
    rows.sort_by_key(|r| r.quarter);
    rows
}

/// `(quarter, value)` pairs for a single KPI.
pub fn kpi_series(history: &HistoryLog, kpi: Kpi) -> Vec<(u32, f64)> {
    history.iter().map(|e| (e.quarter, e.kpis.get(kpi))).collect()
}

/// What the largest bet of a quarter did to the business.
pub fn driver_text(slot: Move) -> &'static str {
    match slot {
        Move::A => "your core focus improved execution and near-term efficiency",
        Move::B => "market expansion increased reach but added channel complexity",
        Move::C => {
            "product bets built innovation and optionality but weighed on near-term margin"
        }
        Move::D => "diversification created option value but required new capabilities",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterNarrative {
    pub quarter: u32,
    pub largest_move: Move,
    pub driver: String,
    pub shock_title: String,
}

impl QuarterNarrative {
    pub fn render(&self) -> String {
        format!(
            "In Quarter {}, your largest bet was {}. Overall, {}. \
             An external event also hit the industry: {}.",
            self.quarter, self.largest_move, self.driver, self.shock_title
        )
    }
}

pub fn quarter_narrative(entry: &HistoryEntry) -> QuarterNarrative {
    let largest_move = entry.allocation.largest_move();
    QuarterNarrative {
        quarter: entry.quarter,
        largest_move,
        driver: driver_text(largest_move).to_string(),
        shock_title: entry.shock.title.clone(),
    }
}

/// Narrative for the most recent quarter, if any has been played.
pub fn latest_narrative(history: &HistoryLog) -> Option<QuarterNarrative> {
    history.latest().map(quarter_narrative)
}

/// "Allocation  A 40  B 30  C 20  D 10"
pub fn allocation_line(entry: &HistoryEntry) -> String {
    let a = &entry.allocation;
    format!("Allocation  A {}  B {}  C {}  D {}", a.a, a.b, a.c, a.d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansoff_engine::{Allocation, QuarterEngine, SimulationConfig};

    fn run(plan: &[Allocation]) -> QuarterEngine {
        let mut engine = QuarterEngine::from_seed(SimulationConfig::default(), 17).unwrap();
        for a in plan {
            engine.advance(a).unwrap();
        }
        engine
    }

    #[test]
    fn test_trend_series_follows_history() {
        let engine = run(&[Allocation::new(25, 25, 25, 25), Allocation::new(70, 10, 10, 10)]);
        let rows = trend_series(engine.history());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quarter, 1);
        assert_eq!(rows[1].quarter, 2);
        assert_eq!(rows[1].cash, engine.kpis().cash);
        assert_eq!(
            kpi_series(engine.history(), Kpi::Risk),
            vec![(1, rows[0].risk), (2, rows[1].risk)]
        );
    }

    #[test]
    fn test_narrative_names_largest_bet_and_shock() {
        let engine = run(&[Allocation::new(10, 10, 60, 20)]);
        let narrative = latest_narrative(engine.history()).unwrap();
        assert_eq!(narrative.largest_move, Move::C);
        let text = narrative.render();
        assert!(text.starts_with("In Quarter 1, your largest bet was C."));
        assert!(text.contains(driver_text(Move::C)));
        assert!(text.ends_with(&format!("{}.", engine.last_shock().unwrap().title)));
    }

    #[test]
    fn test_no_narrative_before_first_quarter() {
        let engine = run(&[]);
        assert!(latest_narrative(engine.history()).is_none());
        assert!(trend_series(engine.history()).is_empty());
    }

    #[test]
    fn test_allocation_line() {
        let engine = run(&[Allocation::new(40, 30, 20, 10)]);
        let entry = engine.history().latest().unwrap();
        assert_eq!(allocation_line(entry), "Allocation  A 40  B 30  C 20  D 10");
    }
}
