//! Agent Types
//!
//! Snapshot of a single agent as seen by the reasoning engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Team an agent fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team_{}", self.0)
    }
}

/// What an agent is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// A harvestable pile of energy. Never moves, never fights, has no team.
    Resource,
    /// A mobile combatant belonging to a team
    Hitter,
}

/// An agent snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Position, one entry per world dimension
    pub coord: Vec<f64>,
    /// Stored energy. For a resource this is the amount a harvester can take.
    pub energy: f64,
    pub kind: AgentKind,
    /// Meaningless for resources
    pub team: TeamId,
}

impl Agent {
    pub fn new(id: u32, coord: Vec<f64>, energy: f64, kind: AgentKind, team: u32) -> Self {
        Self {
            id: AgentId(id),
            coord,
            energy,
            kind,
            team: TeamId(team),
        }
    }

    /// Create a hitter belonging to `team`
    pub fn hitter(id: u32, coord: Vec<f64>, energy: f64, team: u32) -> Self {
        Self::new(id, coord, energy, AgentKind::Hitter, team)
    }

    /// Create a resource. Resources carry team 0 but belong to nobody.
    pub fn resource(id: u32, coord: Vec<f64>, energy: f64) -> Self {
        Self::new(id, coord, energy, AgentKind::Resource, 0)
    }

    pub fn is_hitter(&self) -> bool {
        matches!(self.kind, AgentKind::Hitter)
    }

    pub fn is_resource(&self) -> bool {
        matches!(self.kind, AgentKind::Resource)
    }

    /// Whether both agents fight on the same side.
    ///
    /// A resource is never anyone's teammate, whatever its `team` field says.
    pub fn is_teammate(&self, other: &Agent) -> bool {
        self.is_hitter() && other.is_hitter() && self.team == other.team
    }

    /// Manhattan distance between the two agents' coordinates
    pub fn distance_to(&self, other: &Agent) -> f64 {
        self.coord
            .iter()
            .zip(other.coord.iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_is_never_a_teammate() {
        let hitter = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let resource = Agent::resource(2, vec![0.0, 0.0], 5.0);
        let other_resource = Agent::resource(3, vec![1.0, 0.0], 5.0);

        assert!(!hitter.is_teammate(&resource));
        assert!(!resource.is_teammate(&hitter));
        assert!(!resource.is_teammate(&other_resource));
    }

    #[test]
    fn test_teammates_share_team() {
        let a = Agent::hitter(1, vec![0.0, 0.0], 5.0, 1);
        let b = Agent::hitter(2, vec![0.0, 0.0], 5.0, 1);
        let c = Agent::hitter(3, vec![0.0, 0.0], 5.0, 2);

        assert!(a.is_teammate(&b));
        assert!(!a.is_teammate(&c));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Agent::hitter(1, vec![1.0, 1.0], 5.0, 0);
        let b = Agent::hitter(2, vec![4.0, -1.0], 5.0, 1);

        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_agent_serialization() {
        let agent = Agent::hitter(7, vec![1.5, 2.5], 4.0, 3);
        let json = serde_json::to_string(&agent).unwrap();
        assert!(json.contains("\"kind\":\"hitter\""));
        assert!(json.contains("\"id\":7"));

        let parsed: Agent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, agent);
    }
}
