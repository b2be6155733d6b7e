/// Ansoff Engine — Simulation Configuration
///
/// Construction-time parameters. A config that fails `validate()`
/// never reaches a running engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_BUDGET: i64 = 100;
pub const DEFAULT_MAX_QUARTERS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Points to allocate each quarter.
    #[serde(default = "default_budget")]
    pub budget: i64,
    /// Number of playable quarters.
    #[serde(default = "default_max_quarters")]
    pub max_quarters: u32,
}

fn default_budget() -> i64 {
    DEFAULT_BUDGET
}

fn default_max_quarters() -> u32 {
    DEFAULT_MAX_QUARTERS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            max_quarters: DEFAULT_MAX_QUARTERS,
        }
    }
}

impl SimulationConfig {
    pub fn new(budget: i64, max_quarters: u32) -> Result<Self, EngineError> {
        let config = Self { budget, max_quarters };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.budget <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "budget must be positive, got {}",
                self.budget
            )));
        }
        if self.max_quarters == 0 {
            return Err(EngineError::InvalidConfig(
                "max_quarters must be positive, got 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let config: SimulationConfig = serde_json::from_str(s)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
