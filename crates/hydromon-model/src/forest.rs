//! Isolation forest over standardized feature rows.
//!
//! Each tree is grown on a random subsample (without replacement) by
//! picking a uniformly random feature and a uniformly random split
//! point inside that feature's range in the current partition, down to
//! a depth cap of ceil(log2(subsample)). Anomalous rows need fewer
//! splits to isolate, so their average path length across the ensemble
//! is short. Scores are normalized with the average unsuccessful-search
//! path length c(n) = 2*H(n-1) - 2*(n-1)/n and reported as
//! -2^(-E[h(x)]/c(psi)), which lands in (-1, 0) with lower meaning more
//! anomalous.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use hydromon_types::{AnomalyLabel, AnomalyResult};

/// Euler-Mascheroni constant for the harmonic-number approximation.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Tuning parameters for [`IsolationForest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub tree_count: usize,
    /// Rows sampled without replacement per tree, capped at the corpus size.
    pub subsample_size: usize,
    /// Expected fraction of anomalous rows in the training set; sets the
    /// label cut.
    pub contamination: f64,
    /// Seed for subsampling and split selection.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 100,
            subsample_size: 256,
            contamination: 0.1,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Validates parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] naming the offending field.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.tree_count == 0 {
            return Err(ModelError::Configuration("tree_count must be at least 1"));
        }
        if self.subsample_size < 2 {
            return Err(ModelError::Configuration(
                "subsample_size must be at least 2",
            ));
        }
        if self.contamination <= 0.0 || self.contamination > 0.5 {
            return Err(ModelError::Configuration(
                "contamination must be in (0, 0.5]",
            ));
        }
        Ok(())
    }
}

/// One arena node of an isolation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    /// Internal split: rows with `feature < threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal partition holding `size` training rows.
    Leaf { size: usize },
}

/// A single isolation tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
    root: usize,
}

impl Tree {
    fn grow<R: Rng + ?Sized>(
        rows: &[Vec<f64>],
        indices: &[usize],
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        let mut nodes = Vec::new();
        let root = grow_node(rows, indices, 0, max_depth, rng, &mut nodes);
        Self { nodes, root }
    }

    /// Path length from the root to the leaf this row falls into, plus
    /// the c(size) adjustment for the unresolved partition at the leaf.
    fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = self.root;
        let mut depth = 0.0;
        // The step bound keeps a corrupt arena from looping forever.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(node) {
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    node = if value < *threshold { *left } else { *right };
                    depth += 1.0;
                }
                Some(Node::Leaf { size }) => return depth + average_path_length(*size),
                None => return depth,
            }
        }
        depth
    }
}

fn grow_node<R: Rng + ?Sized>(
    rows: &[Vec<f64>],
    indices: &[usize],
    depth: usize,
    max_depth: usize,
    rng: &mut R,
    nodes: &mut Vec<Node>,
) -> usize {
    if depth >= max_depth || indices.len() <= 1 {
        return push_leaf(nodes, indices.len());
    }

    let dims = indices
        .first()
        .and_then(|i| rows.get(*i))
        .map_or(0, Vec::len);
    if dims == 0 {
        return push_leaf(nodes, indices.len());
    }
    let feature = rng.gen_range(0..dims);

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &i in indices {
        let value = column_value(rows, i, feature);
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if hi <= lo {
        // Every row agrees on this feature; the partition cannot split.
        return push_leaf(nodes, indices.len());
    }
    let threshold = rng.gen_range(lo..hi);

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| column_value(rows, i, feature) < threshold);

    let left = grow_node(rows, &left_rows, depth + 1, max_depth, rng, nodes);
    let right = grow_node(rows, &right_rows, depth + 1, max_depth, rng, nodes);
    nodes.push(Node::Split {
        feature,
        threshold,
        left,
        right,
    });
    nodes.len() - 1
}

fn push_leaf(nodes: &mut Vec<Node>, size: usize) -> usize {
    nodes.push(Node::Leaf { size });
    nodes.len() - 1
}

fn column_value(rows: &[Vec<f64>], row: usize, feature: usize) -> f64 {
    rows.get(row)
        .and_then(|values| values.get(feature))
        .copied()
        .unwrap_or(0.0)
}

/// Trained isolation-forest ensemble plus its fitted label cut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    trees: Vec<Tree>,
    subsample_size: usize,
    offset: f64,
}

impl IsolationForest {
    /// Fits the ensemble on standardized rows and derives the offset
    /// from the contamination quantile of the training scores.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] for invalid parameters and
    /// [`ModelError::InsufficientData`] for an empty training set.
    pub fn fit(rows: &[Vec<f64>], config: &ForestConfig) -> Result<Self, ModelError> {
        config.validate()?;
        if rows.is_empty() {
            return Err(ModelError::InsufficientData {
                rows: 0,
                required: 1,
            });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let subsample = config.subsample_size.min(rows.len());
        let max_depth = depth_cap(subsample);

        let mut trees = Vec::with_capacity(config.tree_count);
        for _ in 0..config.tree_count {
            let indices = index::sample(&mut rng, rows.len(), subsample).into_vec();
            trees.push(Tree::grow(rows, &indices, max_depth, &mut rng));
        }

        let mut forest = Self {
            trees,
            subsample_size: subsample,
            offset: 0.0,
        };
        let mut scores: Vec<f64> = rows.iter().map(|row| forest.score(row)).collect();
        scores.sort_by(f64::total_cmp);
        forest.offset = quantile_sorted(&scores, config.contamination);
        Ok(forest)
    }

    /// Anomaly score in (-1, 0); lower is more anomalous.
    pub fn score(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|tree| tree.path_length(row)).sum();
        let mean_path = total / self.trees.len() as f64;
        let normalizer = average_path_length(self.subsample_size);
        if normalizer <= 0.0 {
            return -1.0;
        }
        -(2.0_f64.powf(-mean_path / normalizer))
    }

    /// Score cut separating anomalous rows from normal ones.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Scores one row and labels it against the fitted cut.
    pub fn classify(&self, row: &[f64]) -> AnomalyResult {
        let score = self.score(row);
        let label = if score < self.offset {
            AnomalyLabel::Anomaly
        } else {
            AnomalyLabel::Normal
        };
        AnomalyResult::new(label, score)
    }

    /// Number of trees in the ensemble.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Subsample size each tree was grown on.
    pub fn subsample_size(&self) -> usize {
        self.subsample_size
    }
}

/// Depth cap ceil(log2(subsample)) used while growing trees.
fn depth_cap(subsample: usize) -> usize {
    subsample.max(2).next_power_of_two().ilog2() as usize
}

/// Average unsuccessful-search path length of a binary search tree over
/// `size` rows, the c(n) normalizer of the isolation-forest score.
fn average_path_length(size: usize) -> f64 {
    match size {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = size as f64;
            2.0 * harmonic(n - 1.0) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Harmonic number H(x) via the ln(x) + gamma approximation.
fn harmonic(x: f64) -> f64 {
    x.ln() + EULER_GAMMA
}

/// Linear-interpolated quantile of an ascending-sorted slice.
fn quantile_sorted(sorted: &[f64], fraction: f64) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let rank = fraction.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
            let below = rank.floor();
            let weight = rank - below;
            let index = usize::try_from(below as i64).unwrap_or(0);
            let lower = sorted.get(index).copied().unwrap_or(0.0);
            let upper = sorted
                .get(index.saturating_add(1))
                .copied()
                .unwrap_or(lower);
            lower + (upper - lower) * weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn clustered_rows() -> Vec<Vec<f64>> {
        // A tight cluster near the origin plus a handful of far outliers.
        let mut rng = StdRng::seed_from_u64(7);
        let mut rows: Vec<Vec<f64>> = (0..120)
            .map(|_| {
                (0..4)
                    .map(|_| rng.r#gen::<f64>() - 0.5)
                    .collect::<Vec<f64>>()
            })
            .collect();
        for _ in 0..6 {
            rows.push(
                (0..4)
                    .map(|_| 8.0 + rng.r#gen::<f64>())
                    .collect::<Vec<f64>>(),
            );
        }
        rows
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let no_trees = ForestConfig {
            tree_count: 0,
            ..ForestConfig::default()
        };
        assert_eq!(
            no_trees.validate(),
            Err(ModelError::Configuration("tree_count must be at least 1"))
        );

        let bad_contamination = ForestConfig {
            contamination: 0.9,
            ..ForestConfig::default()
        };
        assert!(matches!(
            bad_contamination.validate(),
            Err(ModelError::Configuration(_))
        ));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        assert!(matches!(
            IsolationForest::fit(&[], &ForestConfig::default()),
            Err(ModelError::InsufficientData { .. })
        ));
    }

    #[test]
    fn outliers_score_lower_than_the_cluster() -> Result<(), ModelError> {
        let rows = clustered_rows();
        let forest = IsolationForest::fit(&rows, &ForestConfig::default())?;

        let inlier = forest.score(&[0.1, -0.2, 0.05, 0.3]);
        let outlier = forest.score(&[8.5, 8.2, 8.9, 8.1]);
        assert!(outlier < inlier);
        assert!(forest.classify(&[8.5, 8.2, 8.9, 8.1]).is_anomaly());
        Ok(())
    }

    #[test]
    fn scores_stay_in_the_open_unit_interval_below_zero() -> Result<(), ModelError> {
        let rows = clustered_rows();
        let forest = IsolationForest::fit(&rows, &ForestConfig::default())?;

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let probe: Vec<f64> = (0..4).map(|_| rng.r#gen::<f64>() * 20.0 - 10.0).collect();
            let score = forest.score(&probe);
            assert!(score > -1.0 && score < 0.0, "score out of range: {score}");
        }
        Ok(())
    }

    #[test]
    fn identical_seed_gives_identical_scores() -> Result<(), ModelError> {
        let rows = clustered_rows();
        let first = IsolationForest::fit(&rows, &ForestConfig::default())?;
        let second = IsolationForest::fit(&rows, &ForestConfig::default())?;

        let probe = [0.4, -0.1, 0.2, 0.0];
        assert_abs_diff_eq!(first.score(&probe), second.score(&probe));
        assert_abs_diff_eq!(first.offset(), second.offset());
        Ok(())
    }

    #[test]
    fn contamination_bounds_the_flagged_fraction() -> Result<(), ModelError> {
        let rows = clustered_rows();
        let config = ForestConfig {
            contamination: 0.25,
            ..ForestConfig::default()
        };
        let forest = IsolationForest::fit(&rows, &config)?;

        let flagged = rows
            .iter()
            .filter(|row| forest.classify(row).is_anomaly())
            .count();
        // Strictly-below-the-quantile labeling keeps the flagged share at
        // or just under the contamination fraction.
        let expected = rows.len().div_ceil(4);
        assert!(flagged <= expected, "flagged {flagged} of {}", rows.len());
        assert!(flagged >= expected.saturating_sub(3));
        Ok(())
    }

    #[test]
    fn constant_rows_collapse_to_leaves() -> Result<(), ModelError> {
        let rows = vec![vec![1.0, 2.0, 3.0]; 50];
        let forest = IsolationForest::fit(&rows, &ForestConfig::default())?;
        // No feature can split, so every row shares the same path length.
        let a = forest.score(&[1.0, 2.0, 3.0]);
        let b = forest.score(&[1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(a, b);
        Ok(())
    }

    #[test]
    fn normalization_constants_match_the_closed_form() {
        assert_abs_diff_eq!(average_path_length(0), 0.0);
        assert_abs_diff_eq!(average_path_length(1), 0.0);
        assert_abs_diff_eq!(average_path_length(2), 1.0);
        // c(256) = 2*(ln(255) + gamma) - 2*255/256
        assert_abs_diff_eq!(average_path_length(256), 10.244_77, epsilon = 1e-4);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_abs_diff_eq!(quantile_sorted(&sorted, 1.0), 4.0);
        assert_abs_diff_eq!(quantile_sorted(&sorted, 0.5), 2.5);
        assert_abs_diff_eq!(quantile_sorted(&[7.0], 0.3), 7.0);
        assert_abs_diff_eq!(quantile_sorted(&[], 0.3), 0.0);
    }

    #[test]
    fn depth_cap_follows_log2() {
        assert_eq!(depth_cap(2), 1);
        assert_eq!(depth_cap(256), 8);
        assert_eq!(depth_cap(300), 9);
        assert_eq!(depth_cap(1), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn quantiles_stay_inside_the_sample_range(
                mut values in proptest::collection::vec(-1.0_f64..0.0, 1..200),
                fraction in 0.0_f64..=1.0,
            ) {
                values.sort_by(f64::total_cmp);
                let quantile = quantile_sorted(&values, fraction);
                let lowest = values.first().copied().unwrap_or(0.0);
                let highest = values.last().copied().unwrap_or(0.0);
                prop_assert!(quantile >= lowest && quantile <= highest);
            }

            #[test]
            fn path_normalizer_grows_with_partition_size(size in 2_usize..10_000) {
                prop_assert!(average_path_length(size) > 0.0);
                prop_assert!(average_path_length(size + 1) > average_path_length(size));
            }
        }
    }
}
