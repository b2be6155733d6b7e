//! Session manager — isolated runs with record-after-apply semantics.
//!
//! Each session owns its own engine, seed and submission log. Sessions
//! never share state.
//!
//! Apply-before-record order:
//!   1. engine.advance(allocation)   — may reject
//!   2. submissions.push(allocation) — only if step 1 succeeded

use std::collections::BTreeMap;

use tracing::{info, warn};

use ansoff_engine::{
    Allocation, CapabilityState, HistoryLog, KpiState, QuarterEngine, QuarterOutcome,
    SimulationConfig, SimulationStatus,
};

use crate::error::RuntimeError;
use crate::replay;

pub const DEFAULT_COMPANY_NAME: &str = "Orion Mobile";

/// One player's run.
pub struct Session {
    session_id: String,
    company_name: String,
    seed: u64,
    engine: QuarterEngine,
    submissions: Vec<Allocation>,
}

impl Session {
    pub fn new(
        session_id: &str,
        company_name: &str,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self, RuntimeError> {
        let engine = QuarterEngine::from_seed(config, seed)?;
        info!(session = session_id, seed, "session created");
        Ok(Self {
            session_id: session_id.to_string(),
            company_name: company_name.to_string(),
            seed,
            engine,
            submissions: Vec::new(),
        })
    }

    /// Play one quarter and record the submission if accepted.
    pub fn submit(&mut self, allocation: &Allocation) -> Result<QuarterOutcome, RuntimeError> {
        let outcome = self.engine.advance(allocation)?;
        self.submissions.push(*allocation);
        Ok(outcome)
    }

    /// Starting point for the next quarter's sliders: the last accepted
    /// allocation, or an even split before the first quarter.
    pub fn default_allocation(&self) -> Allocation {
        self.submissions
            .last()
            .copied()
            .unwrap_or_else(|| Allocation::even_split(self.engine.config().budget))
    }

    /// Start over from quarter 1 with the session's seed.
    pub fn reset(&mut self) -> Result<(), RuntimeError> {
        self.engine = QuarterEngine::from_seed(self.engine.config().clone(), self.seed)?;
        self.submissions.clear();
        info!(session = %self.session_id, "session reset");
        Ok(())
    }

    /// Rebuild from the submission log and require the live hash.
    pub fn replay_full(&self) -> Result<String, RuntimeError> {
        let expected = self.engine.current_hash();
        let actual = replay::rebuild_hash(self.engine.config(), self.seed, &self.submissions)?;
        if actual != expected {
            warn!(session = %self.session_id, %expected, %actual, "replay mismatch");
            return Err(RuntimeError::ReplayMismatch { expected, actual });
        }
        info!(session = %self.session_id, quarters = self.submissions.len(), "replay verified");
        Ok(actual)
    }

    pub fn engine(&self) -> &QuarterEngine {
        &self.engine
    }

    pub fn capabilities(&self) -> &CapabilityState {
        self.engine.capabilities()
    }

    pub fn kpis(&self) -> &KpiState {
        self.engine.kpis()
    }

    pub fn history(&self) -> &HistoryLog {
        self.engine.history()
    }

    pub fn status(&self) -> SimulationStatus {
        self.engine.status()
    }

    pub fn current_hash(&self) -> String {
        self.engine.current_hash()
    }

    pub fn submissions(&self) -> &[Allocation] {
        &self.submissions
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn set_company_name(&mut self, name: &str) {
        self.company_name = name.to_string();
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Independent sessions keyed by id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: BTreeMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        session_id: &str,
        company_name: &str,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<&mut Session, RuntimeError> {
        if self.sessions.contains_key(session_id) {
            return Err(RuntimeError::DuplicateSession(session_id.to_string()));
        }
        let session = Session::new(session_id, company_name, config, seed)?;
        Ok(self.sessions.entry(session_id.to_string()).or_insert(session))
    }

    pub fn get(&self, session_id: &str) -> Result<&Session, RuntimeError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| RuntimeError::UnknownSession(session_id.to_string()))
    }

    pub fn get_mut(&mut self, session_id: &str) -> Result<&mut Session, RuntimeError> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| RuntimeError::UnknownSession(session_id.to_string()))
    }

    pub fn remove(&mut self, session_id: &str) -> Result<Session, RuntimeError> {
        self.sessions
            .remove(session_id)
            .ok_or_else(|| RuntimeError::UnknownSession(session_id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
