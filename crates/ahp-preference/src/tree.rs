//! Preference Hierarchy
//!
//! Nodes are named comparisons. A child that is itself a node passes its
//! share of weight down; any other child is an alternative and collects it.

use ahp_types::{Activity, SubStrategy};
use std::collections::BTreeMap;
use tracing::trace;

use crate::pairwise::{to_pairwise, Comparison, Pairwise};
use crate::PreferenceError;

/// Root node comparing the two strategies
pub const STRATEGY_NODE: &str = "strategy";

/// Added to every engine score so a zero score still yields a positive ratio
pub const SCORE_EPSILON: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct PreferenceTree {
    root: String,
    nodes: BTreeMap<String, Comparison>,
}

impl PreferenceTree {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            nodes: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Replace the comparison held by `node`, creating the node if needed
    pub fn set_weights(&mut self, node: &str, pairwise: &Pairwise) -> Result<(), PreferenceError> {
        let comparison = Comparison::new(node, pairwise)?;
        self.nodes.insert(node.to_string(), comparison);
        Ok(())
    }

    /// Same as [`PreferenceTree::set_weights`] from plain weights
    pub fn set_plain_weights<K: AsRef<str>>(
        &mut self,
        node: &str,
        weights: &[(K, f64)],
    ) -> Result<(), PreferenceError> {
        for (item, weight) in weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(PreferenceError::NonPositiveWeight {
                    item: item.as_ref().to_string(),
                    value: *weight,
                });
            }
        }
        self.set_weights(node, &to_pairwise(weights))
    }

    /// Write one criterion's activity scores into its node
    pub fn set_activity_scores(
        &mut self,
        aspect: SubStrategy,
        scores: &BTreeMap<Activity, f64>,
    ) -> Result<(), PreferenceError> {
        let weights: Vec<(&str, f64)> = scores
            .iter()
            .map(|(activity, score)| (activity.as_str(), score + SCORE_EPSILON))
            .collect();
        self.set_plain_weights(aspect.as_str(), &weights)
    }

    /// Set how many times the secure strategy outweighs the invasive one
    pub fn set_secure_to_invasive(&mut self, ratio: f64) -> Result<(), PreferenceError> {
        let mut pairwise = Pairwise::new();
        pairwise.insert(("secure".to_string(), "invasive".to_string()), ratio);
        let root = self.root.clone();
        self.set_weights(&root, &pairwise)
    }

    pub fn node(&self, node: &str) -> Option<&Comparison> {
        self.nodes.get(node)
    }

    pub fn local_priorities(&self, node: &str) -> Result<BTreeMap<String, f64>, PreferenceError> {
        self.nodes
            .get(node)
            .map(Comparison::priorities)
            .ok_or_else(|| PreferenceError::UnknownNode(node.to_string()))
    }

    /// Global weight of every alternative reachable from the root.
    ///
    /// Alternatives listed under several nodes accumulate all their shares,
    /// so the result sums to 1.
    pub fn priorities(&self) -> Result<BTreeMap<String, f64>, PreferenceError> {
        if !self.nodes.contains_key(&self.root) {
            return Err(PreferenceError::UnknownNode(self.root.clone()));
        }
        let mut totals = BTreeMap::new();
        let mut path = Vec::new();
        self.distribute(&self.root, 1.0, &mut path, &mut totals)?;
        Ok(totals)
    }

    /// Alternative with the largest global weight
    pub fn best(&self) -> Result<Option<(String, f64)>, PreferenceError> {
        let best = self
            .priorities()?
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1));
        Ok(best)
    }

    fn distribute<'a>(
        &'a self,
        node: &'a str,
        weight: f64,
        path: &mut Vec<&'a str>,
        totals: &mut BTreeMap<String, f64>,
    ) -> Result<(), PreferenceError> {
        if path.contains(&node) {
            return Err(PreferenceError::Cycle(node.to_string()));
        }
        let Some(comparison) = self.nodes.get(node) else {
            *totals.entry(node.to_string()).or_insert(0.0) += weight;
            return Ok(());
        };

        path.push(node);
        for item in comparison.items() {
            let share = comparison.priority(item).unwrap_or(0.0) * weight;
            trace!(parent = node, child = %item, share, "distribute");
            self.distribute(item, share, path, totals)?;
        }
        path.pop();
        Ok(())
    }
}
