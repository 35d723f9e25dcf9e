//! Outcome Types
//!
//! Expected consequences of one interaction, seen from the focal agent.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

use crate::SubStrategy;

/// An amount of energy and team resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub energy: f64,
    pub resource: f64,
}

impl Score {
    pub fn new(energy: f64, resource: f64) -> Self {
        Self { energy, resource }
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score::new(self.energy + rhs.energy, self.resource + rhs.resource)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.energy += rhs.energy;
        self.resource += rhs.resource;
    }
}

impl Mul<f64> for Score {
    type Output = Score;

    fn mul(self, rhs: f64) -> Score {
        Score::new(self.energy * rhs, self.resource * rhs)
    }
}

/// What the focal agent gains, what it loses, and what its opponent loses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub gain: Score,
    pub loss: Score,
    pub enemy_loss: Score,
}

impl Outcome {
    /// Project the outcome onto a single decision criterion.
    ///
    /// Saving criteria score the reciprocal of the matching loss, and score 0
    /// when there is nothing to lose.
    pub fn project(&self, aspect: SubStrategy) -> f64 {
        match aspect {
            SubStrategy::EnemyWeakening => self.enemy_loss.energy,
            SubStrategy::EnemyResourceDeprivation => self.enemy_loss.resource,
            SubStrategy::ResourceSaving => reciprocal(self.loss.resource),
            SubStrategy::StrengthSaving => reciprocal(self.loss.energy),
            SubStrategy::StrengthGaining => self.gain.energy,
            SubStrategy::ResourceAcquisition => self.gain.resource,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Outcome::default()
    }
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        self.gain += rhs.gain;
        self.loss += rhs.loss;
        self.enemy_loss += rhs.enemy_loss;
    }
}

fn reciprocal(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        1.0 / value
    }
}
