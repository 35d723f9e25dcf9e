//! Analytic Hierarchy Process preference tree.
//!
//! The tree turns pairwise comparisons at every level (strategy, criteria,
//! activities) into a single global weight per alternative. The reasoning
//! engine supplies the leaf-level activity scores; this crate normalises and
//! propagates them.
//!
//! # Modules
//!
//! - [`pairwise`]: pairwise comparison matrices and their priority vectors
//! - [`tree`]: the weighted hierarchy and global synthesis
//! - [`config`]: TOML configuration of the default hierarchy

pub mod config;
pub mod pairwise;
pub mod tree;

pub use config::{default_config_toml, PreferenceConfig};
pub use pairwise::{to_pairwise, Comparison, Pairwise};
pub use tree::PreferenceTree;

/// Errors from building or evaluating a preference tree
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// A comparison ratio or plain weight is zero, negative or not finite
    #[error("weight for `{item}` must be positive and finite, got {value}")]
    NonPositiveWeight { item: String, value: f64 },
    /// Two items of a node were never compared
    #[error("node `{node}` has no comparison between `{a}` and `{b}`")]
    MissingComparison { node: String, a: String, b: String },
    #[error("node `{0}` compares nothing")]
    EmptyNode(String),
    #[error("unknown node `{0}`")]
    UnknownNode(String),
    #[error("node `{0}` is its own ancestor")]
    Cycle(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
