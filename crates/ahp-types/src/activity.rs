//! Activities and Decision Criteria
//!
//! The four things an agent can do during an assessment step, and the
//! criteria those activities are scored against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a name does not match any variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

/// A candidate activity for one assessment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Aggressive engagement
    Hit,
    /// Non-aggressive movement, usually away from trouble
    Run,
    /// Moving to harvest a resource
    Take,
    /// Staying put
    Idle,
}

impl Activity {
    /// Every variant, in declaration order
    pub const ALL: [Activity; 4] = [Activity::Hit, Activity::Run, Activity::Take, Activity::Idle];

    /// Anything but idling costs movement energy and closes distance
    pub fn is_moving(self) -> bool {
        !matches!(self, Activity::Idle)
    }

    /// Only hitting carries the aggression penalty
    pub fn is_aggressive(self) -> bool {
        matches!(self, Activity::Hit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Hit => "hit",
            Activity::Run => "run",
            Activity::Take => "take",
            Activity::Idle => "idle",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseNameError {
                kind: "activity",
                name: s.to_string(),
            })
    }
}

/// Top-level strategic stance in the preference tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Invasive,
    Secure,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Invasive, Strategy::Secure];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Invasive => "invasive",
            Strategy::Secure => "secure",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision criterion. Each one reads a single field of an
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStrategy {
    EnemyWeakening,
    EnemyResourceDeprivation,
    ResourceAcquisition,
    StrengthGaining,
    StrengthSaving,
    ResourceSaving,
}

impl SubStrategy {
    pub const ALL: [SubStrategy; 6] = [
        SubStrategy::EnemyWeakening,
        SubStrategy::EnemyResourceDeprivation,
        SubStrategy::ResourceAcquisition,
        SubStrategy::StrengthGaining,
        SubStrategy::StrengthSaving,
        SubStrategy::ResourceSaving,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubStrategy::EnemyWeakening => "enemy_weakening",
            SubStrategy::EnemyResourceDeprivation => "enemy_resource_deprivation",
            SubStrategy::ResourceAcquisition => "resource_acquisition",
            SubStrategy::StrengthGaining => "strength_gaining",
            SubStrategy::StrengthSaving => "strength_saving",
            SubStrategy::ResourceSaving => "resource_saving",
        }
    }

    /// Saving criteria score the reciprocal of a loss
    pub fn is_saving(self) -> bool {
        matches!(self, SubStrategy::StrengthSaving | SubStrategy::ResourceSaving)
    }
}

impl fmt::Display for SubStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubStrategy {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubStrategy::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseNameError {
                kind: "sub-strategy",
                name: s.to_string(),
            })
    }
}
