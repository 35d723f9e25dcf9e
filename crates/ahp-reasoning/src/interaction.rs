//! Interaction Outcomes
//!
//! Expected outcome of one focal agent meeting one neighbour (or nobody)
//! within a fixed number of ticks.

use ahp_types::{Activity, Agent, Outcome, Rules, Score};

use crate::interp;
use crate::{ReasoningError, Situation};

/// Probability of winning a fight, proportional to adjusted energy.
///
/// Two exhausted fighters are an even match.
pub fn win_probability(energy: f64, energy_other: f64) -> f64 {
    let total = energy + energy_other;
    if total > 0.0 {
        energy / total
    } else {
        0.5
    }
}

/// Expected combat outcome against `agent_other`.
///
/// The opponent's activity is unknown, so every activity is equally likely.
/// Hypotheses under which the pair cannot fight or cannot meet contribute
/// nothing.
pub fn calc_int_hit(
    rules: &Rules,
    agent: &Agent,
    ticks: u32,
    activity: Activity,
    agent_other: &Agent,
) -> Result<Outcome, ReasoningError> {
    let weight = 1.0 / Activity::ALL.len() as f64;
    let mut outcome = Outcome::default();

    for activity_other in Activity::ALL {
        let direct = Situation::between(agent, agent_other, activity, Some(activity_other), Some(ticks));
        if !interp::is_fightable(&direct) || !interp::is_reachable(rules, &direct)? {
            continue;
        }
        let mirror = direct.mirror()?;

        let energy = interp::energy_before_fight(rules, &direct)?;
        let energy_other = interp::energy_before_fight(rules, &mirror)?;
        let p_win = win_probability(energy, energy_other);

        outcome.gain += Score::new(
            interp::fight_energy_gain(rules, &direct)?,
            interp::fight_resource_gain(rules, &direct)?,
        ) * (p_win * weight);
        outcome.loss += Score::new(
            interp::fight_energy_loss(rules, &direct)?,
            interp::fight_resource_loss(rules, &direct)?,
        ) * ((1.0 - p_win) * weight);
        outcome.enemy_loss += Score::new(
            interp::fight_energy_loss(rules, &mirror)?,
            interp::fight_resource_loss(rules, &mirror)?,
        ) * (p_win * weight);
    }

    Ok(outcome)
}

/// Outcome of harvesting `resource`. Harvests are not contested, so the
/// gain is certain once the resource is in reach.
pub fn calc_int_take(
    rules: &Rules,
    agent: &Agent,
    ticks: u32,
    activity: Activity,
    resource: &Agent,
) -> Result<Outcome, ReasoningError> {
    let situation = Situation::between(agent, resource, activity, None, Some(ticks));
    if !interp::is_gatherable(&situation) || !interp::is_reachable(rules, &situation)? {
        return Ok(Outcome::default());
    }

    Ok(Outcome {
        gain: Score::new(
            interp::gather_energy_gain(rules, &situation)?,
            interp::gather_resource_gain(rules, &situation)?,
        ),
        ..Default::default()
    })
}

/// Outcome of `ticks` ticks of the activity on its own, with nobody around
pub fn calc_mv(rules: &Rules, ticks: u32, activity: Activity) -> Outcome {
    let delta = interp::movement_delta(rules, activity, ticks);
    let mut outcome = Outcome::default();
    if delta > 0.0 {
        outcome.gain.energy = delta;
    } else {
        outcome.loss.energy = -delta;
    }
    outcome
}
