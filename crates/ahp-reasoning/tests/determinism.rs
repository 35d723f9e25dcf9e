//! Determinism verification tests
//!
//! Tests to ensure world generation and scoring produce identical results
//! given the same seed.

use ahp_reasoning::{ReasoningModel, World, WorldFactory, WorldGenConfig};
use ahp_types::{AgentId, AttackRules, MovementRules, ResourceRules, Rules, TeamId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tempfile::tempdir;

fn model() -> ReasoningModel {
    let rules = Rules::new(
        MovementRules {
            gain_energy_waiting: 0.02,
            loss_energy_moving: 0.05,
            speed: 0.2,
        },
        AttackRules {
            loss_energy_aggressive: 0.05,
            gain_energy_win: 0.6,
            gain_resource_win: 0.3,
            loss_resource_lose: 2.0,
        },
        ResourceRules {
            gain_energy: 0.5,
            gain_resource: 0.5,
        },
        5,
    )
    .expect("valid rules");
    ReasoningModel::new(rules).expect("valid model")
}

fn small_world(seed: u64) -> World {
    let config = WorldGenConfig {
        n_hitters: 16,
        n_resources: 6,
        ..Default::default()
    };
    WorldFactory::new(config, seed).populate().expect("world")
}

/// Test that SmallRng produces identical sequences with the same seed
#[test]
fn test_rng_determinism() {
    let mut rng1 = SmallRng::seed_from_u64(42);
    let values1: Vec<f64> = (0..100).map(|_| rng1.gen()).collect();

    let mut rng2 = SmallRng::seed_from_u64(42);
    let values2: Vec<f64> = (0..100).map(|_| rng2.gen()).collect();

    assert_eq!(values1, values2, "RNG sequences should be identical with same seed");
}

/// Test that different seeds produce different worlds
#[test]
fn test_different_seeds_different_worlds() {
    let a = small_world(42);
    let b = small_world(43);

    let differs = (0..a.agent_count() as u32).any(|id| a.agent(AgentId(id)) != b.agent(AgentId(id)));
    assert!(differs, "Different seeds should produce different worlds");
}

/// Test that assessments of a generated world are reproducible
#[test]
fn test_assessment_determinism() {
    let model = model();

    let run = |seed: u64| {
        let world = small_world(seed);
        let rivals = world.rivals_of(TeamId(1));
        world
            .team(TeamId(1))
            .unwrap_or_default()
            .into_iter()
            .map(|agent| serde_json::to_string(&model.assess(agent, &rivals)).expect("serialize"))
            .collect::<Vec<_>>()
    };

    let first = run(7);
    let second = run(7);
    assert!(!first.is_empty());
    assert_eq!(first, second, "Assessments should be identical with same seed");
}

/// Test that a saved world loads back unchanged and scores the same
#[test]
fn test_save_load_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("world.json");
    let model = model();

    let world = small_world(99);
    world.save(&path).expect("save");
    let loaded = World::load(&path).expect("load");

    assert_eq!(loaded.agent_count(), world.agent_count());
    assert_eq!(loaded.resources().len(), world.resources().len());
    assert_eq!(loaded.team_count(), world.team_count());

    let focal = world.team(TeamId(0)).and_then(|t| t.first().copied().cloned());
    if let Some(focal) = focal {
        let before = model.assess(&focal, &world.rivals_of(TeamId(0)));
        let after = model.assess(&focal, &loaded.rivals_of(TeamId(0)));
        assert_eq!(before.scores, after.scores);
    }
}
