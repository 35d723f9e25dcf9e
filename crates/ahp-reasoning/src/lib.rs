//! Reasoning engine: expected-gain scoring of candidate activities.
//!
//! Given a ruleset, a focal agent and its neighbours, the engine estimates
//! for every decision criterion how much each activity is worth over the
//! lookahead horizon. The scores feed the preference tree in
//! `ahp-preference`.
//!
//! # Modules
//!
//! - [`situation`]: the two-agent evaluation context
//! - [`interp`]: situational physics derived from the rules
//! - [`interaction`]: per-neighbour combat, harvest and movement outcomes
//! - [`model`]: horizon and neighbour convolution, full assessments
//! - [`world`]: agent bookkeeping and persistence
//! - [`factory`]: seeded world generation

pub mod error;
pub mod factory;
pub mod interaction;
pub mod interp;
pub mod model;
pub mod situation;
pub mod world;

pub use error::ReasoningError;
pub use factory::{WorldFactory, WorldGenConfig};
pub use interaction::{calc_int_hit, calc_int_take, calc_mv, win_probability};
pub use model::{Assessment, ReasoningModel, ScoreFailure};
pub use situation::Situation;
pub use world::{World, WorldError};
