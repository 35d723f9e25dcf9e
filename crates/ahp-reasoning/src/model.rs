//! Expected Gain
//!
//! Convolution of movement and interaction outcomes over the lookahead
//! horizon and over every neighbour the focal agent could meet.

use ahp_types::{Activity, Agent, AgentId, Outcome, Rules, SubStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::interaction::{calc_int_hit, calc_int_take, calc_mv};
use crate::interp;
use crate::{ReasoningError, Situation};

/// The scoring engine. Holds a validated ruleset and nothing else.
#[derive(Debug, Clone)]
pub struct ReasoningModel {
    rules: Rules,
}

/// A (criterion, activity) cell that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFailure {
    pub aspect: SubStrategy,
    pub activity: Activity,
    pub error: String,
}

/// Every criterion × activity score for one agent
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub agent: AgentId,
    pub scores: BTreeMap<SubStrategy, BTreeMap<Activity, f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ScoreFailure>,
}

impl Assessment {
    /// Activity scores for one criterion, empty if every cell failed
    pub fn scores_for(&self, aspect: SubStrategy) -> BTreeMap<Activity, f64> {
        self.scores.get(&aspect).cloned().unwrap_or_default()
    }

    pub fn score(&self, aspect: SubStrategy, activity: Activity) -> Option<f64> {
        self.scores.get(&aspect)?.get(&activity).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ReasoningModel {
    pub fn new(rules: Rules) -> Result<Self, ReasoningError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Neighbours the agent could plausibly meet while doing `activity`.
    ///
    /// Everyone who could attack within reach counts. When taking, reachable
    /// resources count as well: foraging exposes the agent to the same
    /// opportunistic attacks.
    pub fn eligible_neighbors<'a>(
        &self,
        agent: &Agent,
        agents: &'a [Agent],
        activity: Activity,
    ) -> Result<Vec<&'a Agent>, ReasoningError> {
        let mut eligible = Vec::new();
        for other in agents.iter().filter(|other| other.id != agent.id) {
            let situation = Situation::between(agent, other, activity, None, None);
            let interacts = if activity == Activity::Take {
                interp::is_gatherable(&situation) || interp::is_fightable(&situation)
            } else {
                interp::is_fightable(&situation)
            };
            if interacts && interp::is_reachable(&self.rules, &situation)? {
                eligible.push(other);
            }
        }
        Ok(eligible)
    }

    /// Expected per-tick value of `activity` for the `aspect` criterion.
    pub fn calc_expected_gain(
        &self,
        agent: &Agent,
        agents: &[Agent],
        aspect: SubStrategy,
        activity: Activity,
    ) -> Result<f64, ReasoningError> {
        let horizon = interp::ticks_available(&self.rules, &Situation::new(agent, activity));
        if horizon == 0 {
            // Cannot afford a single tick of this activity
            return Ok(0.0);
        }

        let eligible = self.eligible_neighbors(agent, agents, activity)?;
        let weights = interaction_weights(agent, &eligible);

        let mut total = 0.0;
        for ticks in 1..=horizon {
            total += calc_mv(&self.rules, ticks, activity).project(aspect);
        }

        // An interaction must leave at least one tick to act on its result
        for ticks in 1..horizon {
            for (neighbor, weight) in eligible.iter().zip(&weights) {
                let outcome = self.calc_int(agent, neighbor, ticks, activity)?;
                total += outcome.project(aspect) * weight;
            }
        }

        Ok(total / f64::from(horizon))
    }

    /// Score all criteria for all activities.
    ///
    /// A cell that fails is logged and recorded in
    /// [`Assessment::failures`]; the remaining cells are still scored.
    pub fn assess(&self, agent: &Agent, agents: &[Agent]) -> Assessment {
        let mut assessment = Assessment {
            agent: agent.id,
            scores: BTreeMap::new(),
            failures: Vec::new(),
        };

        for aspect in SubStrategy::ALL {
            let mut scores = BTreeMap::new();
            for activity in Activity::ALL {
                match self.calc_expected_gain(agent, agents, aspect, activity) {
                    Ok(score) => {
                        scores.insert(activity, score);
                    }
                    Err(e) => {
                        warn!(agent = %agent.id, %aspect, %activity, "could not score: {}", e);
                        assessment.failures.push(ScoreFailure {
                            aspect,
                            activity,
                            error: e.to_string(),
                        });
                    }
                }
            }
            debug!(agent = %agent.id, %aspect, ?scores, "assessed criterion");
            assessment.scores.insert(aspect, scores);
        }

        assessment
    }

    fn calc_int(
        &self,
        agent: &Agent,
        neighbor: &Agent,
        ticks: u32,
        activity: Activity,
    ) -> Result<Outcome, ReasoningError> {
        let situation = Situation::between(agent, neighbor, activity, None, None);
        if interp::is_gatherable(&situation) {
            calc_int_take(&self.rules, agent, ticks, activity, neighbor)
        } else {
            calc_int_hit(&self.rules, agent, ticks, activity, neighbor)
        }
    }
}

/// Probability of meeting each neighbour, proportional to its distance.
///
/// Co-located neighbours share the probability evenly.
fn interaction_weights(agent: &Agent, neighbors: &[&Agent]) -> Vec<f64> {
    let distances: Vec<f64> = neighbors.iter().map(|n| agent.distance_to(n)).collect();
    let dist_sum: f64 = distances.iter().sum();

    if dist_sum > 0.0 {
        distances.iter().map(|d| d / dist_sum).collect()
    } else {
        let uniform = 1.0 / neighbors.len().max(1) as f64;
        vec![uniform; neighbors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahp_types::{AttackRules, MovementRules, ResourceRules};

    fn model() -> ReasoningModel {
        let rules = Rules::new(
            MovementRules {
                gain_energy_waiting: 0.02,
                loss_energy_moving: 0.05,
                speed: 0.3,
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
        .unwrap();
        ReasoningModel::new(rules).unwrap()
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut rules = model().rules().clone();
        rules.attack.loss_energy_aggressive = 2.0;
        assert!(matches!(
            ReasoningModel::new(rules),
            Err(ReasoningError::Rules(_))
        ));
    }

    #[test]
    fn test_interaction_weights_follow_distance() {
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let near = Agent::hitter(2, vec![1.0, 0.0], 5.0, 1);
        let far = Agent::hitter(3, vec![3.0, 0.0], 5.0, 1);

        let weights = interaction_weights(&agent, &[&near, &far]);
        assert_eq!(weights, vec![0.25, 0.75]);
    }

    #[test]
    fn test_interaction_weights_colocated_and_empty() {
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let a = Agent::hitter(2, vec![0.0, 0.0], 5.0, 1);
        let b = Agent::hitter(3, vec![0.0, 0.0], 5.0, 1);

        assert_eq!(interaction_weights(&agent, &[&a, &b]), vec![0.5, 0.5]);
        assert!(interaction_weights(&agent, &[]).is_empty());
    }

    #[test]
    fn test_alone_only_movement_counts() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);

        // Idle for 5 ticks: (0.02 + 0.04 + ... + 0.10) / 5 = 0.06
        let idle = model
            .calc_expected_gain(&agent, &[], SubStrategy::StrengthGaining, Activity::Idle)
            .unwrap();
        assert!((idle - 0.06).abs() < 1e-9);

        // Running: loss (0.05 + ... + 0.25) / 5 = 0.15, scored as reciprocals
        let expected: f64 = (1..=5).map(|t| 1.0 / (0.05 * t as f64)).sum::<f64>() / 5.0;
        let run = model
            .calc_expected_gain(&agent, &[], SubStrategy::StrengthSaving, Activity::Run)
            .unwrap();
        assert!((run - expected).abs() < 1e-9);

        let hit = model
            .calc_expected_gain(&agent, &[], SubStrategy::EnemyWeakening, Activity::Hit)
            .unwrap();
        assert_eq!(hit, 0.0);
    }

    #[test]
    fn test_starving_agent_scores_zero() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 0.0, 0);
        let enemy = Agent::hitter(2, vec![0.0, 0.0], 5.0, 1);

        for aspect in SubStrategy::ALL {
            let score = model
                .calc_expected_gain(&agent, &[enemy.clone()], aspect, Activity::Run)
                .unwrap();
            assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn test_take_sees_resources_and_enemies() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let agents = vec![
            Agent::resource(2, vec![0.5, 0.0], 4.0),
            Agent::hitter(3, vec![0.0, 1.0], 5.0, 1),
            Agent::hitter(4, vec![1.0, 0.0], 5.0, 0),
        ];

        let take = model.eligible_neighbors(&agent, &agents, Activity::Take).unwrap();
        let ids: Vec<u32> = take.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![2, 3]);

        let run = model.eligible_neighbors(&agent, &agents, Activity::Run).unwrap();
        let ids: Vec<u32> = run.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_focal_agent_in_neighbour_list_is_ignored() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let enemy = Agent::hitter(2, vec![0.5, 0.0], 5.0, 1);

        let with_self = vec![agent.clone(), enemy.clone()];
        let without = vec![enemy];
        for activity in Activity::ALL {
            let a = model
                .calc_expected_gain(&agent, &with_self, SubStrategy::EnemyWeakening, activity)
                .unwrap();
            let b = model
                .calc_expected_gain(&agent, &without, SubStrategy::EnemyWeakening, activity)
                .unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_take_scores_resource_acquisition() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let pile = Agent::resource(2, vec![0.5, 0.0], 4.0);

        let take = model
            .calc_expected_gain(&agent, &[pile.clone()], SubStrategy::ResourceAcquisition, Activity::Take)
            .unwrap();
        let idle = model
            .calc_expected_gain(&agent, &[pile], SubStrategy::ResourceAcquisition, Activity::Idle)
            .unwrap();

        // Reachable from tick 2 on, horizon 5: ticks 2..=4 each yield 2.0
        assert!((take - 6.0 / 5.0).abs() < 1e-9);
        assert_eq!(idle, 0.0);
    }

    #[test]
    fn test_assessment_covers_every_cell() {
        let model = model();
        let agent = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let agents = vec![
            Agent::hitter(2, vec![0.5, 0.5], 4.0, 1),
            Agent::resource(3, vec![0.2, 0.0], 3.0),
        ];

        let assessment = model.assess(&agent, &agents);
        assert!(assessment.is_complete());
        assert_eq!(assessment.scores.len(), SubStrategy::ALL.len());
        for aspect in SubStrategy::ALL {
            let scores = assessment.scores_for(aspect);
            assert_eq!(scores.len(), Activity::ALL.len());
            assert!(scores.values().all(|s| s.is_finite() && *s >= 0.0));
        }
        assert!(assessment.score(SubStrategy::ResourceAcquisition, Activity::Take).unwrap() > 0.0);
    }
}
