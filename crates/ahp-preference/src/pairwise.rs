//! Pairwise Comparisons
//!
//! A node of the hierarchy compares its children two at a time. The ratio
//! stored for `(a, b)` says how many times more `a` matters than `b`. The
//! reciprocal matrix built from those ratios yields the node's local
//! priorities through its principal eigenvector.

use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::PreferenceError;

/// Pairwise ratios keyed by `(a, b)`, meaning `a` is `ratio` times `b`
pub type Pairwise = BTreeMap<(String, String), f64>;

/// Saaty's random consistency index for matrices of order 1 to 10
const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Judgements above this consistency ratio are usually revisited
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

const MAX_ITERATIONS: usize = 1000;
const TOLERANCE: f64 = 1e-12;

/// Convert plain weights into the complete set of pairwise ratios.
///
/// `[("a", 33), ("b", 44), ("c", 66)]` becomes
/// `{(a, b): 33/44, (a, c): 33/66, (b, c): 44/66}`.
pub fn to_pairwise<K: AsRef<str>>(weights: &[(K, f64)]) -> Pairwise {
    let mut pairwise = Pairwise::new();
    for (i, (a, wa)) in weights.iter().enumerate() {
        for (b, wb) in weights.iter().skip(i + 1) {
            pairwise.insert((a.as_ref().to_string(), b.as_ref().to_string()), wa / wb);
        }
    }
    pairwise
}

/// One node's comparison matrix and the priorities derived from it
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Compared items, sorted by name
    items: Vec<String>,
    matrix: Vec<Vec<f64>>,
    priorities: Vec<f64>,
    lambda_max: f64,
}

impl Comparison {
    /// Build the reciprocal matrix for `node` and solve for its priorities.
    ///
    /// Every pair of items must be compared exactly once, in either order.
    pub fn new(node: &str, pairwise: &Pairwise) -> Result<Self, PreferenceError> {
        let items: Vec<String> = pairwise
            .keys()
            .flat_map(|(a, b)| [a.clone(), b.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if items.is_empty() {
            return Err(PreferenceError::EmptyNode(node.to_string()));
        }

        let index: BTreeMap<&str, usize> =
            items.iter().enumerate().map(|(i, name)| (name.as_str(), i)).collect();
        let n = items.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        for ((a, b), &ratio) in pairwise {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(PreferenceError::NonPositiveWeight {
                    item: format!("{a}/{b}"),
                    value: ratio,
                });
            }
            let (i, j) = (index[a.as_str()], index[b.as_str()]);
            matrix[i][j] = ratio;
            matrix[j][i] = 1.0 / ratio;
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if matrix[i][j] == 0.0 {
                    return Err(PreferenceError::MissingComparison {
                        node: node.to_string(),
                        a: items[i].clone(),
                        b: items[j].clone(),
                    });
                }
            }
        }

        let (priorities, lambda_max) = principal_eigenvector(&matrix);
        let comparison = Self {
            items,
            matrix,
            priorities,
            lambda_max,
        };

        let cr = comparison.consistency_ratio();
        if cr > CONSISTENCY_THRESHOLD {
            warn!(node, consistency_ratio = cr, "inconsistent pairwise judgements");
        }
        Ok(comparison)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Local priority of every item, summing to 1
    pub fn priorities(&self) -> BTreeMap<String, f64> {
        self.items
            .iter()
            .cloned()
            .zip(self.priorities.iter().copied())
            .collect()
    }

    pub fn priority(&self, item: &str) -> Option<f64> {
        let i = self.items.iter().position(|name| name == item)?;
        Some(self.priorities[i])
    }

    /// Ratio stored for `(a, b)` after reciprocal completion
    pub fn ratio(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.items.iter().position(|name| name == a)?;
        let j = self.items.iter().position(|name| name == b)?;
        Some(self.matrix[i][j])
    }

    pub fn lambda_max(&self) -> f64 {
        self.lambda_max
    }

    /// Saaty's consistency ratio; 0 for perfectly consistent judgements
    pub fn consistency_ratio(&self) -> f64 {
        let n = self.items.len();
        if n <= 2 {
            return 0.0;
        }
        let ci = (self.lambda_max - n as f64) / (n as f64 - 1.0);
        let ri = RANDOM_INDEX.get(n - 1).copied().unwrap_or(RANDOM_INDEX[9]);
        (ci / ri).max(0.0)
    }
}

/// Power iteration on a positive reciprocal matrix
fn principal_eigenvector(matrix: &[Vec<f64>]) -> (Vec<f64>, f64) {
    let n = matrix.len();
    let mut vector = vec![1.0 / n as f64; n];

    for _ in 0..MAX_ITERATIONS {
        let mut next = multiply(matrix, &vector);
        let sum: f64 = next.iter().sum();
        next.iter_mut().for_each(|v| *v /= sum);

        let delta: f64 = next.iter().zip(&vector).map(|(a, b)| (a - b).abs()).sum();
        vector = next;
        if delta < TOLERANCE {
            break;
        }
    }

    let product = multiply(matrix, &vector);
    let lambda_max = product
        .iter()
        .zip(&vector)
        .map(|(p, v)| p / v)
        .sum::<f64>()
        / n as f64;

    (vector, lambda_max)
}

fn multiply(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
        .collect()
}
