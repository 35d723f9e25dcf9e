//! Team decision simulation.
//!
//! Every member of the assessed team is scored against all rivals and
//! resources once. Those scores are then pushed through the preference tree
//! for each secure-to-invasive ratio of the sweep, and the activity with the
//! largest global weight is taken as the member's choice.

use ahp_preference::{PreferenceError, PreferenceTree};
use ahp_reasoning::{Assessment, ReasoningError, ReasoningModel, World};
use ahp_types::{Activity, Agent, AgentId, SubStrategy, TeamId};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::SimConfig;

/// Errors from running a simulation
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("team {0} has no members")]
    EmptyTeam(TeamId),
    #[error(transparent)]
    Reasoning(#[from] ReasoningError),
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

/// One member's synthesised preferences under a given ratio
#[derive(Debug, Clone, Serialize)]
pub struct AgentChoice {
    pub agent: AgentId,
    /// Global weight per activity
    pub weights: BTreeMap<Activity, f64>,
    pub chosen: Option<Activity>,
}

/// Activity histogram for one secure-to-invasive ratio
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub secure_to_invasive: f64,
    pub histogram: BTreeMap<Activity, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub seed: u64,
    pub this_team: TeamId,
    pub members: usize,
    pub rivals: usize,
    pub points: Vec<SweepPoint>,
}

pub struct Simulation {
    tree: PreferenceTree,
    this_team: TeamId,
    rivals: usize,
    assessments: Vec<Assessment>,
}

impl Simulation {
    /// Score every member of the configured team against everyone else
    pub fn new(config: &SimConfig, world: &World) -> Result<Self, SimError> {
        let model = ReasoningModel::new(config.rules.clone())?;
        let tree = config.preference.build_tree()?;
        let this_team = TeamId(config.simulation.this_team);

        let members: Vec<Agent> = world
            .team(this_team)
            .ok_or(SimError::EmptyTeam(this_team))?
            .into_iter()
            .cloned()
            .collect();
        let rivals = world.rivals_of(this_team);
        info!(
            team = %this_team,
            members = members.len(),
            rivals = rivals.len(),
            "assessing team"
        );

        let assessments: Vec<Assessment> = members
            .iter()
            .map(|agent| model.assess(agent, &rivals))
            .collect();
        let failed = assessments.iter().filter(|a| !a.is_complete()).count();
        if failed > 0 {
            warn!(failed, "some members have incomplete assessments");
        }

        Ok(Self {
            tree,
            this_team,
            rivals: rivals.len(),
            assessments,
        })
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn update_secure_to_invasive(&mut self, ratio: f64) -> Result<(), SimError> {
        self.tree.set_secure_to_invasive(ratio)?;
        Ok(())
    }

    /// Synthesise each member's global activity weights under the current tree
    pub fn run(&mut self) -> Result<Vec<AgentChoice>, SimError> {
        let mut choices = Vec::with_capacity(self.assessments.len());
        for assessment in &self.assessments {
            let weights = assess_weights(&mut self.tree, assessment)?;
            let chosen = weights
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(activity, _)| *activity);
            debug!(agent = %assessment.agent, ?chosen, ?weights, "synthesised");
            choices.push(AgentChoice {
                agent: assessment.agent,
                weights,
                chosen,
            });
        }
        Ok(choices)
    }

    /// Run once per ratio and count the chosen activities
    pub fn sweep(&mut self, seed: u64, ratios: &[f64]) -> Result<SweepReport, SimError> {
        let mut points = Vec::with_capacity(ratios.len());
        for &ratio in ratios {
            self.update_secure_to_invasive(ratio)?;
            let histogram = hist_action(&self.run()?);
            info!(secure_to_invasive = ratio, ?histogram, "sweep point");
            points.push(SweepPoint {
                secure_to_invasive: ratio,
                histogram,
            });
        }

        Ok(SweepReport {
            seed,
            this_team: self.this_team,
            members: self.assessments.len(),
            rivals: self.rivals,
            points,
        })
    }
}

/// Write one member's scores into the tree and read back the global weights
fn assess_weights(
    tree: &mut PreferenceTree,
    assessment: &Assessment,
) -> Result<BTreeMap<Activity, f64>, SimError> {
    for aspect in SubStrategy::ALL {
        // Failed cells count as no gain
        let scores: BTreeMap<Activity, f64> = Activity::ALL
            .iter()
            .map(|&activity| (activity, assessment.score(aspect, activity).unwrap_or(0.0)))
            .collect();
        tree.set_activity_scores(aspect, &scores)?;
    }

    let weights = tree
        .priorities()?
        .into_iter()
        .filter_map(|(name, weight)| name.parse::<Activity>().ok().map(|a| (a, weight)))
        .collect();
    Ok(weights)
}

/// Count how often each activity was chosen
pub fn hist_action(choices: &[AgentChoice]) -> BTreeMap<Activity, usize> {
    let mut hist = BTreeMap::new();
    for activity in choices.iter().filter_map(|c| c.chosen) {
        *hist.entry(activity).or_insert(0) += 1;
    }
    hist
}

/// Plain-text table of a sweep, one row per ratio
pub fn format_table(report: &SweepReport) -> String {
    let mut out = format!("{:>10}", "ratio");
    for activity in Activity::ALL {
        out.push_str(&format!("{:>8}", activity.as_str()));
    }
    out.push('\n');
    for point in &report.points {
        out.push_str(&format!("{:>10.3}", point.secure_to_invasive));
        for activity in Activity::ALL {
            let count = point.histogram.get(&activity).copied().unwrap_or(0);
            out.push_str(&format!("{count:>8}"));
        }
        out.push('\n');
    }
    out
}
