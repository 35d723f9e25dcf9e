//! Situational Physics
//!
//! Pure functions turning a ruleset and a [`Situation`] into energy,
//! resource, distance and reachability quantities. Nothing here mutates
//! state; every function is deterministic in its inputs.

use ahp_types::{Activity, Agent, Rules};

use crate::{ReasoningError, Situation};

/// Energy change from `ticks` ticks of `activity`: a cost when moving, a
/// recovery when idling.
pub fn movement_delta(rules: &Rules, activity: Activity, ticks: u32) -> f64 {
    let ticks = f64::from(ticks);
    if activity.is_moving() {
        -rules.movement.loss_energy_moving * ticks
    } else {
        rules.movement.gain_energy_waiting * ticks
    }
}

/// Energy change of the focal agent over the situation's ticks
pub fn energy_delta_movement(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(movement_delta(rules, situation.activity, situation.ticks()?))
}

/// Adjusted energy the focal agent brings into a fight: stored energy plus
/// the movement delta, reduced by the aggression penalty when hitting.
/// Never negative.
pub fn energy_before_fight(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    let mut energy = situation.agent.energy + energy_delta_movement(rules, situation)?;
    if situation.activity.is_aggressive() {
        energy *= 1.0 - rules.attack.loss_energy_aggressive;
    }
    Ok(energy.max(0.0))
}

/// Energy won from the opponent, proportional to its adjusted energy
pub fn fight_energy_gain(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(energy_before_fight(rules, &situation.mirror()?)? * rules.attack.gain_energy_win)
}

/// Team resource won from the opponent
pub fn fight_resource_gain(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(energy_before_fight(rules, &situation.mirror()?)? * rules.attack.gain_resource_win)
}

/// Energy lost outright on defeat
pub fn fight_energy_loss(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    energy_before_fight(rules, situation)
}

/// Team resource lost on defeat
pub fn fight_resource_loss(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(energy_before_fight(rules, situation)? * rules.attack.loss_resource_lose)
}

/// Harvester energy from consuming the counterpart resource whole
pub fn gather_energy_gain(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(situation.other()?.energy * rules.resource.gain_energy)
}

/// Team resource from consuming the counterpart resource whole
pub fn gather_resource_gain(rules: &Rules, situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(situation.other()?.energy * rules.resource.gain_resource)
}

/// Two hitters of different teams can fight when at least one of them is
/// (or may be) aggressive. An unknown counterpart activity counts as
/// possibly aggressive.
pub fn is_fightable(situation: &Situation) -> bool {
    let Some(other) = situation.agent_other else {
        return false;
    };

    situation.agent.is_hitter()
        && other.is_hitter()
        && !situation.agent.is_teammate(other)
        && (situation.activity.is_aggressive()
            || situation.activity_other.map_or(true, Activity::is_aggressive))
}

/// A hitter can harvest a resource, but only when it sets out to
pub fn is_gatherable(situation: &Situation) -> bool {
    let Some(other) = situation.agent_other else {
        return false;
    };

    situation.agent.is_hitter() && other.is_resource() && situation.activity == Activity::Take
}

/// Manhattan distance between the two agents
pub fn distance(situation: &Situation) -> Result<f64, ReasoningError> {
    Ok(situation.agent.distance_to(situation.other()?))
}

/// Number of ticks the focal agent can keep up its activity without
/// starving, capped by the rules' horizon
pub fn ticks_available(rules: &Rules, situation: &Situation) -> u32 {
    let loss = rules.movement.loss_energy_moving;
    if !situation.activity.is_moving() || loss <= 0.0 {
        return rules.ticks_max;
    }

    // NaN energy saturates to 0 on the cast
    (situation.agent.energy / loss)
        .floor()
        .clamp(0.0, f64::from(rules.ticks_max)) as u32
}

/// Whether the two agents can close the distance between them within the
/// lookahead, both moving towards each other
pub fn is_reachable(rules: &Rules, situation: &Situation) -> Result<bool, ReasoningError> {
    let other = situation.other()?;
    let range = closing_range(rules, situation.agent, Some(situation.activity), situation.ticks)
        + closing_range(rules, other, situation.activity_other, situation.ticks);

    Ok(range >= distance(situation)?)
}

/// Distance one agent can cover. Resources and idlers stay put; an unknown
/// activity counts as moving.
fn closing_range(rules: &Rules, agent: &Agent, activity: Option<Activity>, ticks: Option<u32>) -> f64 {
    let activity = activity.unwrap_or(Activity::Run);
    if !agent.is_hitter() || !activity.is_moving() {
        return 0.0;
    }

    let available = ticks_available(rules, &Situation::new(agent, activity));
    let time = ticks.map_or(available, |t| t.min(available));
    rules.movement.speed * f64::from(time)
}
