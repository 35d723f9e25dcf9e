//! Reasoning errors.

use ahp_types::RulesError;

/// Errors raised while scoring a situation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReasoningError {
    /// The calculation needs a second agent and the situation has none
    #[error("situation has no counterpart agent")]
    MissingCounterpart,
    /// The calculation needs an explicit tick count
    #[error("situation has no tick count")]
    MissingTicks,
    /// The counterpart's activity must be known to mirror the situation
    #[error("counterpart activity is unknown")]
    UnknownCounterpartActivity,
    #[error("invalid rules: {0}")]
    Rules(#[from] RulesError),
}
