//! Configuration loading for the preference hierarchy.
//!
//! Each node lists the plain weights of its children; ratios are derived on
//! load.

use ahp_types::{Activity, Strategy, SubStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::tree::{PreferenceTree, STRATEGY_NODE};
use crate::PreferenceError;

/// Plain weights of every node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceConfig {
    /// Name of the node synthesis starts from
    #[serde(default = "default_root")]
    pub root: String,
    /// Node name to child weights
    pub nodes: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_root() -> String {
    STRATEGY_NODE.to_string()
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        let mut nodes = BTreeMap::new();
        let weights = |pairs: &[(&str, f64)]| -> BTreeMap<String, f64> {
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };

        nodes.insert(
            STRATEGY_NODE.to_string(),
            weights(&[
                (Strategy::Invasive.as_str(), 2.0),
                (Strategy::Secure.as_str(), 1.0),
            ]),
        );
        nodes.insert(
            Strategy::Invasive.as_str().to_string(),
            weights(&[
                (SubStrategy::EnemyResourceDeprivation.as_str(), 1.0),
                (SubStrategy::ResourceAcquisition.as_str(), 5.0),
                (SubStrategy::EnemyWeakening.as_str(), 2.0),
                (SubStrategy::StrengthGaining.as_str(), 4.0),
            ]),
        );
        nodes.insert(
            Strategy::Secure.as_str().to_string(),
            weights(&[
                (SubStrategy::StrengthGaining.as_str(), 1.0),
                (SubStrategy::StrengthSaving.as_str(), 4.0),
                (SubStrategy::ResourceSaving.as_str(), 2.0),
            ]),
        );
        for aspect in SubStrategy::ALL {
            let activities: BTreeMap<String, f64> = Activity::ALL
                .iter()
                .map(|activity| {
                    let weight = if *activity == Activity::Take { 100.0 } else { 1.0 };
                    (activity.as_str().to_string(), weight)
                })
                .collect();
            nodes.insert(aspect.as_str().to_string(), activities);
        }

        Self {
            root: default_root(),
            nodes,
        }
    }
}

impl PreferenceConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PreferenceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PreferenceError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, PreferenceError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the tree, checking every node on the way.
    pub fn build_tree(&self) -> Result<PreferenceTree, PreferenceError> {
        if !self.nodes.contains_key(&self.root) {
            return Err(PreferenceError::UnknownNode(self.root.clone()));
        }
        let mut tree = PreferenceTree::new(self.root.clone());
        for (node, children) in &self.nodes {
            if children.is_empty() {
                return Err(PreferenceError::EmptyNode(node.clone()));
            }
            let weights: Vec<(&str, f64)> =
                children.iter().map(|(child, w)| (child.as_str(), *w)).collect();
            if weights.len() == 1 {
                // A lone child has nothing to be compared with
                let (child, weight) = weights[0];
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(PreferenceError::NonPositiveWeight {
                        item: child.to_string(),
                        value: weight,
                    });
                }
                let mut pairwise = crate::Pairwise::new();
                pairwise.insert((child.to_string(), child.to_string()), 1.0);
                tree.set_weights(node, &pairwise)?;
                continue;
            }
            tree.set_plain_weights(node, &weights)?;
        }
        // Surface cycles at load time rather than on first use
        tree.priorities()?;
        Ok(tree)
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Preference hierarchy
#
# Each [nodes.<name>] table holds plain weights of its children. Children
# that have no table of their own are alternatives (activities).
# Criterion weights are overwritten per agent by the scoring engine.

root = "strategy"

[nodes.strategy]
invasive = 2.0
secure = 1.0

[nodes.invasive]
enemy_resource_deprivation = 1.0
resource_acquisition = 5.0
enemy_weakening = 2.0
strength_gaining = 4.0

[nodes.secure]
strength_gaining = 1.0
strength_saving = 4.0
resource_saving = 2.0

[nodes.enemy_resource_deprivation]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0

[nodes.resource_acquisition]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0

[nodes.enemy_weakening]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0

[nodes.strength_gaining]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0

[nodes.strength_saving]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0

[nodes.resource_saving]
hit = 1.0
idle = 1.0
run = 1.0
take = 100.0
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_parses() {
        let config = PreferenceConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, PreferenceConfig::default());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = PreferenceConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(PreferenceConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_default_tree_prefers_take() {
        let tree = PreferenceConfig::default().build_tree().unwrap();
        let (best, _) = tree.best().unwrap().unwrap();
        assert_eq!(best, "take");

        let strategy = tree.local_priorities("strategy").unwrap();
        assert!((strategy["invasive"] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_root() {
        let config = PreferenceConfig {
            root: "missing".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.build_tree(), Err(PreferenceError::UnknownNode(_))));
    }

    #[test]
    fn test_root_defaults_to_strategy() {
        let config = PreferenceConfig::from_str("[nodes.strategy]\na = 1.0\nb = 2.0\n").unwrap();
        assert_eq!(config.root, "strategy");
        let priorities = config.build_tree().unwrap().priorities().unwrap();
        assert!((priorities["b"] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_child_takes_everything() {
        let config = PreferenceConfig::from_str("[nodes.strategy]\nonly = 3.0\n").unwrap();
        let priorities = config.build_tree().unwrap().priorities().unwrap();
        assert!((priorities["only"] - 1.0).abs() < 1e-12);
    }
}
