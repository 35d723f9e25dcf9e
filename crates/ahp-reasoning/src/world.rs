//! World Bookkeeping
//!
//! Agents indexed by id and by team, with JSON persistence. The world is a
//! passive container: the reasoning engine reads snapshots from it and never
//! writes back.

use ahp_types::{Agent, AgentId, TeamId};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Errors from world bookkeeping
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("agent {0} already exists")]
    DuplicateAgent(AgentId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct World {
    agents: BTreeMap<AgentId, Agent>,
    teams: BTreeMap<TeamId, Vec<AgentId>>,
    resources: Vec<AgentId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent. Resources are tracked apart from the teams.
    pub fn add_agent(&mut self, agent: Agent) -> Result<(), WorldError> {
        if self.agents.contains_key(&agent.id) {
            return Err(WorldError::DuplicateAgent(agent.id));
        }

        if agent.is_resource() {
            self.resources.push(agent.id);
        } else {
            self.teams.entry(agent.team).or_default().push(agent.id);
        }
        self.agents.insert(agent.id, agent);
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Hitters of one team, `None` if the team has no members
    pub fn team(&self, team: TeamId) -> Option<Vec<&Agent>> {
        let ids = self.teams.get(&team)?;
        Some(ids.iter().filter_map(|id| self.agents.get(id)).collect())
    }

    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.teams.keys().copied()
    }

    pub fn resources(&self) -> Vec<&Agent> {
        self.resources.iter().filter_map(|id| self.agents.get(id)).collect()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Everything a member of `team` may run into: other teams' hitters and
    /// every resource
    pub fn rivals_of(&self, team: TeamId) -> Vec<Agent> {
        let mut rivals: Vec<Agent> = self
            .teams
            .iter()
            .filter(|(id, _)| **id != team)
            .flat_map(|(_, members)| members.iter())
            .filter_map(|id| self.agents.get(id))
            .cloned()
            .collect();
        rivals.extend(self.resources().into_iter().cloned());
        rivals
    }

    /// Write all agents to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorldError> {
        let agents: Vec<&Agent> = self.agents.values().collect();
        let json = serde_json::to_string_pretty(&agents)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a world previously written by [`World::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let content = fs::read_to_string(path.as_ref())?;
        let agents: Vec<Agent> = serde_json::from_str(&content)?;
        debug!(path = %path.as_ref().display(), count = agents.len(), "loading agents");

        let mut world = World::new();
        for agent in agents {
            world.add_agent(agent)?;
        }
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> World {
        let mut world = World::new();
        world.add_agent(Agent::hitter(1, vec![0.0, 0.0], 5.0, 1)).unwrap();
        world.add_agent(Agent::hitter(2, vec![1.0, 0.0], 4.0, 1)).unwrap();
        world.add_agent(Agent::hitter(3, vec![2.0, 0.0], 6.0, 2)).unwrap();
        world.add_agent(Agent::resource(4, vec![3.0, 0.0], 5.0)).unwrap();
        world
    }

    #[test]
    fn test_indexing() {
        let world = sample_world();
        assert_eq!(world.agent_count(), 4);
        assert_eq!(world.team_count(), 2);
        assert_eq!(world.team(TeamId(1)).unwrap().len(), 2);
        assert!(world.team(TeamId(9)).is_none());
        assert_eq!(world.resources().len(), 1);
        assert_eq!(world.agent(AgentId(3)).unwrap().energy, 6.0);
    }

    #[test]
    fn test_resources_do_not_form_a_team() {
        let mut world = World::new();
        world.add_agent(Agent::resource(1, vec![0.0], 1.0)).unwrap();
        world.add_agent(Agent::resource(2, vec![0.0], 1.0)).unwrap();
        assert_eq!(world.team_count(), 0);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut world = sample_world();
        let err = world.add_agent(Agent::hitter(1, vec![0.0], 1.0, 3)).unwrap_err();
        assert!(matches!(err, WorldError::DuplicateAgent(AgentId(1))));
        assert_eq!(world.agent_count(), 4);
    }

    #[test]
    fn test_rivals_exclude_own_team() {
        let world = sample_world();
        let ids: Vec<u32> = world.rivals_of(TeamId(1)).iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
