//! Evaluation Context
//!
//! A [`Situation`] pairs a focal agent with an optional counterpart, the
//! activities both are hypothesised to perform, and an optional lookahead.
//! Situations borrow their agents and are rebuilt for every sub-calculation.

use ahp_types::{Activity, Agent};

use crate::ReasoningError;

#[derive(Debug, Clone, Copy)]
pub struct Situation<'a> {
    pub agent: &'a Agent,
    pub agent_other: Option<&'a Agent>,
    /// Hypothesised activity of `agent`
    pub activity: Activity,
    /// Hypothesised activity of `agent_other`, `None` when unknown
    pub activity_other: Option<Activity>,
    /// Lookahead length, `None` for the agent's own available horizon
    pub ticks: Option<u32>,
}

impl<'a> Situation<'a> {
    /// A single-agent situation with no counterpart and no tick bound
    pub fn new(agent: &'a Agent, activity: Activity) -> Self {
        Self {
            agent,
            agent_other: None,
            activity,
            activity_other: None,
            ticks: None,
        }
    }

    /// A two-agent situation
    pub fn between(
        agent: &'a Agent,
        agent_other: &'a Agent,
        activity: Activity,
        activity_other: Option<Activity>,
        ticks: Option<u32>,
    ) -> Self {
        Self {
            agent,
            agent_other: Some(agent_other),
            activity,
            activity_other,
            ticks,
        }
    }

    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn other(&self) -> Result<&'a Agent, ReasoningError> {
        self.agent_other.ok_or(ReasoningError::MissingCounterpart)
    }

    pub fn ticks(&self) -> Result<u32, ReasoningError> {
        self.ticks.ok_or(ReasoningError::MissingTicks)
    }

    /// The same situation seen from the counterpart's side
    pub fn mirror(&self) -> Result<Situation<'a>, ReasoningError> {
        let other = self.other()?;
        let activity_other = self
            .activity_other
            .ok_or(ReasoningError::UnknownCounterpartActivity)?;

        Ok(Situation {
            agent: other,
            agent_other: Some(self.agent),
            activity: activity_other,
            activity_other: Some(self.activity),
            ticks: self.ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_swaps_roles() {
        let a = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let b = Agent::hitter(2, vec![1.0, 0.0], 3.0, 1);
        let situation = Situation::between(&a, &b, Activity::Hit, Some(Activity::Idle), Some(4));

        let mirror = situation.mirror().unwrap();
        assert_eq!(mirror.agent.id, b.id);
        assert_eq!(mirror.agent_other.map(|o| o.id), Some(a.id));
        assert_eq!(mirror.activity, Activity::Idle);
        assert_eq!(mirror.activity_other, Some(Activity::Hit));
        assert_eq!(mirror.ticks, Some(4));
    }

    #[test]
    fn test_mirror_requires_known_counterpart() {
        let a = Agent::hitter(1, vec![0.0, 0.0], 5.0, 0);
        let b = Agent::hitter(2, vec![1.0, 0.0], 3.0, 1);

        let lone = Situation::new(&a, Activity::Run);
        assert_eq!(lone.mirror().unwrap_err(), ReasoningError::MissingCounterpart);

        let unknown = Situation::between(&a, &b, Activity::Run, None, None);
        assert_eq!(
            unknown.mirror().unwrap_err(),
            ReasoningError::UnknownCounterpartActivity
        );
    }

    #[test]
    fn test_ticks_accessor() {
        let a = Agent::hitter(1, vec![0.0], 5.0, 0);
        let situation = Situation::new(&a, Activity::Idle);
        assert_eq!(situation.ticks(), Err(ReasoningError::MissingTicks));
        assert_eq!(situation.with_ticks(3).ticks(), Ok(3));
    }
}
