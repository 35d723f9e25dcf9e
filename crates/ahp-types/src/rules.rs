//! Game Rules
//!
//! Immutable constants shared by every calculation in an assessment. Every
//! coefficient must be given explicitly: deserialisation rejects missing
//! fields and [`Rules::validate`] rejects out-of-range values.

use serde::{Deserialize, Serialize};

/// Movement costs and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementRules {
    /// Energy gained per idle tick
    pub gain_energy_waiting: f64,
    /// Energy lost per moving tick
    pub loss_energy_moving: f64,
    /// Distance covered per tick
    pub speed: f64,
}

/// Combat coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttackRules {
    /// Fraction of energy an attacker sacrifices to land a hit, in `[0, 1]`
    pub loss_energy_aggressive: f64,
    /// Fraction of the loser's energy the winner gains as energy
    pub gain_energy_win: f64,
    /// Fraction of the loser's energy the winner's team gains as resource
    pub gain_resource_win: f64,
    /// Team resource lost per unit of the loser's energy
    pub loss_resource_lose: f64,
}

/// How a harvested resource is split between harvester and team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceRules {
    pub gain_energy: f64,
    pub gain_resource: f64,
}

/// The complete ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rules {
    pub movement: MovementRules,
    pub attack: AttackRules,
    pub resource: ResourceRules,
    /// Lookahead horizon, shared by every agent in an assessment
    pub ticks_max: u32,
}

/// Invalid ruleset
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RulesError {
    #[error("rule coefficient `{name}` must be finite and non-negative, got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },
    #[error("attack.loss_energy_aggressive must lie in [0, 1], got {0}")]
    AggressionOutOfRange(f64),
    #[error("ticks_max must be at least 1")]
    EmptyHorizon,
}

impl Rules {
    /// Build a ruleset, rejecting invalid coefficients
    pub fn new(
        movement: MovementRules,
        attack: AttackRules,
        resource: ResourceRules,
        ticks_max: u32,
    ) -> Result<Self, RulesError> {
        let rules = Self {
            movement,
            attack,
            resource,
            ticks_max,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Check every coefficient
    pub fn validate(&self) -> Result<(), RulesError> {
        let coefficients = [
            ("movement.gain_energy_waiting", self.movement.gain_energy_waiting),
            ("movement.loss_energy_moving", self.movement.loss_energy_moving),
            ("movement.speed", self.movement.speed),
            ("attack.loss_energy_aggressive", self.attack.loss_energy_aggressive),
            ("attack.gain_energy_win", self.attack.gain_energy_win),
            ("attack.gain_resource_win", self.attack.gain_resource_win),
            ("attack.loss_resource_lose", self.attack.loss_resource_lose),
            ("resource.gain_energy", self.resource.gain_energy),
            ("resource.gain_resource", self.resource.gain_resource),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidCoefficient { name, value });
            }
        }

        if self.attack.loss_energy_aggressive > 1.0 {
            return Err(RulesError::AggressionOutOfRange(self.attack.loss_energy_aggressive));
        }
        if self.ticks_max == 0 {
            return Err(RulesError::EmptyHorizon);
        }
        Ok(())
    }
}
