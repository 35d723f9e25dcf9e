//! Team decision simulation over generated worlds.
//!
//! Ties the scoring engine and the preference hierarchy together: generate or
//! load a world, assess one team, and sweep the strategic ratio.

pub mod config;
pub mod simulation;

pub use config::{ConfigError, SimConfig, SimulationConfig, SweepConfig, DEFAULT_TUNING_PATH};
pub use simulation::{
    format_table, hist_action, AgentChoice, SimError, Simulation, SweepPoint, SweepReport,
};
