//! World Generation
//!
//! Seeded generation of hitters and resources. Same seed, same world.

use ahp_types::{Agent, AgentKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{World, WorldError};

/// Parameters for generating a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldGenConfig {
    /// Extent of each dimension; coordinates are drawn from `[0, dim)`
    pub world_dim: Vec<f64>,
    pub n_teams: u32,
    pub n_hitters: usize,
    pub n_resources: usize,
    pub hitter_energy_mean: f64,
    pub hitter_energy_deviation: f64,
    pub resource_energy_mean: f64,
    pub resource_energy_deviation: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            world_dim: vec![8.0, 8.0],
            n_teams: 2,
            n_hitters: 50,
            n_resources: 20,
            hitter_energy_mean: 5.0,
            hitter_energy_deviation: 1.0,
            resource_energy_mean: 5.0,
            resource_energy_deviation: 1.0,
        }
    }
}

pub struct WorldFactory {
    config: WorldGenConfig,
    rng: SmallRng,
    next_id: u32,
}

impl WorldFactory {
    pub fn new(config: WorldGenConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    pub fn gen_coord(&mut self) -> Vec<f64> {
        let rng = &mut self.rng;
        self.config
            .world_dim
            .iter()
            .map(|dim| rng.gen::<f64>() * dim)
            .collect()
    }

    /// Normally distributed energy for the given kind, floored at 0
    pub fn gen_energy(&mut self, kind: AgentKind) -> f64 {
        let (mean, deviation) = match kind {
            AgentKind::Hitter => (self.config.hitter_energy_mean, self.config.hitter_energy_deviation),
            AgentKind::Resource => (
                self.config.resource_energy_mean,
                self.config.resource_energy_deviation,
            ),
        };
        (mean + deviation * self.standard_normal()).max(0.0)
    }

    pub fn gen_team_id(&mut self) -> u32 {
        self.rng.gen_range(0..self.config.n_teams.max(1))
    }

    pub fn gen_resource(&mut self) -> Agent {
        let coord = self.gen_coord();
        let energy = self.gen_energy(AgentKind::Resource);
        Agent::resource(self.take_id(), coord, energy)
    }

    /// A hitter on `team`, or on a random team when `None`
    pub fn gen_hitter(&mut self, team: Option<u32>) -> Agent {
        let coord = self.gen_coord();
        let energy = self.gen_energy(AgentKind::Hitter);
        let team = match team {
            Some(team) => team,
            None => self.gen_team_id(),
        };
        Agent::hitter(self.take_id(), coord, energy, team)
    }

    /// Generate a full world: resources first, then hitters on random teams
    pub fn populate(&mut self) -> Result<World, WorldError> {
        let mut world = World::new();
        for _ in 0..self.config.n_resources {
            world.add_agent(self.gen_resource())?;
        }
        for _ in 0..self.config.n_hitters {
            world.add_agent(self.gen_hitter(None))?;
        }
        Ok(world)
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // Box-Muller transform
    fn standard_normal(&mut self) -> f64 {
        let u1: f64 = self.rng.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
