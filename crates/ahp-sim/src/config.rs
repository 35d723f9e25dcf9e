//! Configuration System
//!
//! Loads simulation parameters from tuning.toml so runs can be adjusted
//! without recompiling.

use ahp_preference::PreferenceConfig;
use ahp_reasoning::WorldGenConfig;
use ahp_types::{AttackRules, MovementRules, ResourceRules, Rules, RulesError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub rules: Rules,
    #[serde(default)]
    pub world: WorldGenConfig,
    #[serde(default)]
    pub preference: PreferenceConfig,
}

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Team whose members are assessed; everyone else is a rival
    pub this_team: u32,
    pub sweep: SweepConfig,
}

/// Secure-to-invasive ratios to evaluate, spaced evenly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl SweepConfig {
    /// Evenly spaced ratios from `start` to `end` inclusive
    pub fn ratios(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        let sweep = &self.simulation.sweep;
        for ratio in [sweep.start, sweep.end] {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(ConfigError::InvalidSweep(ratio));
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                seed: 42,
                this_team: 1,
                sweep: SweepConfig {
                    start: 0.1,
                    end: 2.0,
                    steps: 20,
                },
            },
            rules: Rules {
                movement: MovementRules {
                    gain_energy_waiting: 0.02,
                    loss_energy_moving: 0.05,
                    speed: 0.2,
                },
                attack: AttackRules {
                    loss_energy_aggressive: 0.05,
                    gain_energy_win: 0.6,
                    gain_resource_win: 0.3,
                    loss_resource_lose: 2.0,
                },
                resource: ResourceRules {
                    gain_energy: 0.5,
                    gain_resource: 0.5,
                },
                ticks_max: 5,
            },
            world: WorldGenConfig::default(),
            preference: PreferenceConfig::default(),
        }
    }
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid rules: {0}")]
    Rules(#[from] RulesError),
    #[error("secure-to-invasive ratio must be positive, got {0}")]
    InvalidSweep(f64),
}
