//! Shared data types for the AHP-coordinated agent simulation.
//!
//! This crate contains pure data structures: agents, activities, decision
//! criteria, interaction outcomes and the game ruleset. It has no reasoning
//! logic and is a dependency for all other crates in the workspace.

pub mod activity;
pub mod agent;
pub mod outcome;
pub mod rules;

pub use activity::{Activity, ParseNameError, Strategy, SubStrategy};
pub use agent::{Agent, AgentId, AgentKind, TeamId};
pub use outcome::{Outcome, Score};
pub use rules::{AttackRules, MovementRules, ResourceRules, Rules, RulesError};
