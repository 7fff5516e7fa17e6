//! Word-alignment similarity
//!
//! Two families of metrics compare the in-vocabulary words of Arg1 and Arg2:
//!
//! - **aligned**: for each Arg1 word, the cosine of its best match in Arg2,
//!   averaged over Arg1. One-directional.
//! - **top-k**: Arg2's words are ranked by closeness to the Arg1 centroid;
//!   the centroid of the best `k` is compared with the Arg1 centroid.
//!
//! Both score 0.0 when either word list is empty. The numeric definitions
//! live behind [`AlignmentMetrics`] so a reference implementation can be
//! swapped in; [`CentroidAlignment`] is the default.

use crate::block::{FeatureBlock, SparseFeatureMap};
use discsim_core::{EmbeddingSpace, Error, Result, Vector};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// k values of the default configuration, in column order
pub const DEFAULT_K_VALUES: [usize; 4] = [1, 2, 3, 5];

pub const ALIGNED_FEATURE: &str = "max_sim_aligned";
pub const TOP_K_FEATURE: &str = "max_sim_avg_top";

/// Numeric definition of the alignment metrics
pub trait AlignmentMetrics: Send + Sync + fmt::Debug {
    /// Mean over `words_a` of the best cosine against `words_b`
    fn aligned_similarity(&self, space: &dyn EmbeddingSpace, words_a: &[&str], words_b: &[&str]) -> f32;

    /// Centroid of `words_a` against the centroid of the top `k` of `words_b`
    fn top_k_similarity(&self, space: &dyn EmbeddingSpace, words_a: &[&str], words_b: &[&str], k: usize) -> f32;
}

/// Default metric definitions based on cosine similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct CentroidAlignment;

impl AlignmentMetrics for CentroidAlignment {
    fn aligned_similarity(&self, space: &dyn EmbeddingSpace, words_a: &[&str], words_b: &[&str]) -> f32 {
        let vectors_a = space.vectors_of(words_a);
        let vectors_b = space.vectors_of(words_b);
        if vectors_a.is_empty() || vectors_b.is_empty() {
            return 0.0;
        }

        let total: f32 = vectors_a
            .iter()
            .map(|a| {
                vectors_b
                    .iter()
                    .map(|b| a.cosine_similarity(b))
                    .fold(f32::NEG_INFINITY, f32::max)
            })
            .sum();

        total / vectors_a.len() as f32
    }

    fn top_k_similarity(&self, space: &dyn EmbeddingSpace, words_a: &[&str], words_b: &[&str], k: usize) -> f32 {
        let vectors_b = space.vectors_of(words_b);
        if k == 0 || vectors_b.is_empty() {
            return 0.0;
        }
        let centroid_a = match Vector::mean(space.vectors_of(words_a)) {
            Some(c) => c,
            None => return 0.0,
        };

        let mut ranked: Vec<(&Vector, OrderedFloat<f32>)> = vectors_b
            .iter()
            .map(|v| (*v, OrderedFloat(v.cosine_similarity(&centroid_a))))
            .collect();
        // Stable: equal scores keep their order in Arg2
        ranked.sort_by_key(|(_, score)| Reverse(*score));

        match Vector::mean(ranked.iter().take(k).map(|(v, _)| *v)) {
            Some(centroid_top) => centroid_a.cosine_similarity(&centroid_top),
            None => 0.0,
        }
    }
}

/// Computes the aligned metric followed by one top-k metric per k value
#[derive(Debug, Clone)]
pub struct AlignmentSimilarityEngine {
    k_values: Vec<usize>,
    prefix: String,
    metrics: Arc<dyn AlignmentMetrics>,
}

impl Default for AlignmentSimilarityEngine {
    fn default() -> Self {
        Self {
            k_values: DEFAULT_K_VALUES.to_vec(),
            prefix: String::new(),
            metrics: Arc::new(CentroidAlignment),
        }
    }
}

impl AlignmentSimilarityEngine {
    /// `k_values` must be non-empty, positive and strictly ascending
    pub fn new(k_values: Vec<usize>) -> Result<Self> {
        validate_k_values(&k_values)?;
        Ok(Self {
            k_values,
            ..Default::default()
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn AlignmentMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn k_values(&self) -> &[usize] {
        &self.k_values
    }

    /// Number of columns produced: the aligned metric plus one per k
    pub fn len(&self) -> usize {
        1 + self.k_values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn feature_names(&self) -> Vec<String> {
        std::iter::once(format!("{}{ALIGNED_FEATURE}", self.prefix))
            .chain(
                self.k_values
                    .iter()
                    .map(|k| format!("{}{TOP_K_FEATURE}{k}", self.prefix)),
            )
            .collect()
    }

    /// Score in-vocabulary word lists. Filtering against the vocabulary is
    /// the caller's job.
    pub fn compute(&self, words_a: &[&str], words_b: &[&str], space: &dyn EmbeddingSpace) -> FeatureBlock {
        let mut block = FeatureBlock::with_capacity(self.len());
        let empty = words_a.is_empty() || words_b.is_empty();

        let aligned = if empty {
            0.0
        } else {
            self.metrics.aligned_similarity(space, words_a, words_b)
        };
        trace!(aligned, "aligned similarity");
        block.push(format!("{}{ALIGNED_FEATURE}", self.prefix), aligned);

        for &k in &self.k_values {
            let top_k = if empty {
                0.0
            } else {
                self.metrics.top_k_similarity(space, words_a, words_b, k)
            };
            trace!(k, top_k, "top-k similarity");
            block.push(format!("{}{TOP_K_FEATURE}{k}", self.prefix), top_k);
        }

        block
    }
}

pub fn validate_k_values(k_values: &[usize]) -> Result<()> {
    if k_values.is_empty() {
        return Err(Error::InvalidConfig("alignment k values cannot be empty".into()));
    }
    if k_values.contains(&0) {
        return Err(Error::InvalidConfig("alignment k values must be positive".into()));
    }
    if k_values.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidConfig(
            "alignment k values must be strictly ascending".into(),
        ));
    }
    Ok(())
}

/// Ordered values plus the matching sparse map, default metric definitions
pub fn compute_alignment_similarities(
    words_a: &[&str],
    words_b: &[&str],
    space: &dyn EmbeddingSpace,
    k_values: &[usize],
) -> Result<(Vec<f32>, SparseFeatureMap)> {
    let block = AlignmentSimilarityEngine::new(k_values.to_vec())?.compute(words_a, words_b, space);
    let sparse = block.to_sparse();
    Ok((block.into_values(), sparse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use discsim_core::EmbeddingTable;

    fn space() -> EmbeddingTable {
        EmbeddingTable::from_pairs(
            2,
            [
                ("north", Vector::new(vec![0.0, 1.0])),
                ("east", Vector::new(vec![1.0, 0.0])),
                ("northeast", Vector::new(vec![1.0, 1.0])),
                ("south", Vector::new(vec![0.0, -1.0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_configuration_yields_five_columns() {
        let (values, sparse) =
            compute_alignment_similarities(&["north"], &["east", "north"], &space(), &DEFAULT_K_VALUES).unwrap();

        assert_eq!(values.len(), 5);
        assert_eq!(sparse.len(), 5);
        let engine = AlignmentSimilarityEngine::default();
        assert_eq!(
            engine.feature_names(),
            vec![
                "max_sim_aligned",
                "max_sim_avg_top1",
                "max_sim_avg_top2",
                "max_sim_avg_top3",
                "max_sim_avg_top5"
            ]
        );
    }

    #[test]
    fn test_aligned_is_mean_of_best_matches() {
        let s = space();
        // north -> north (1.0), east -> east (1.0)
        let sim = CentroidAlignment.aligned_similarity(&s, &["north", "east"], &["east", "north", "south"]);
        assert!((sim - 1.0).abs() < 1e-6);

        // north -> northeast (0.7071), south -> northeast (-0.7071)
        let sim = CentroidAlignment.aligned_similarity(&s, &["north", "south"], &["northeast"]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_aligned_is_one_directional() {
        let s = space();
        let ab = CentroidAlignment.aligned_similarity(&s, &["north"], &["north", "south"]);
        let ba = CentroidAlignment.aligned_similarity(&s, &["north", "south"], &["north"]);
        assert!((ab - 1.0).abs() < 1e-6);
        assert!(ba.abs() < 1e-6);
    }

    #[test]
    fn test_top_k_ranks_by_closeness_to_centroid() {
        let s = space();
        let b = ["south", "east", "north"];
        // top1 = north, identical direction
        let top1 = CentroidAlignment.top_k_similarity(&s, &["north"], &b, 1);
        assert!((top1 - 1.0).abs() < 1e-6);
        // top2 = north + east -> centroid (0.5, 0.5)
        let top2 = CentroidAlignment.top_k_similarity(&s, &["north"], &b, 2);
        assert!((top2 - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
        // k beyond the list uses every word: centroid (1/3, 0)
        let top5 = CentroidAlignment.top_k_similarity(&s, &["north"], &b, 5);
        assert!(top5.abs() < 1e-6);
    }

    #[test]
    fn test_empty_lists_score_zero() {
        let engine = AlignmentSimilarityEngine::default();
        let s = space();
        for (a, b) in [(&[][..], &["north"][..]), (&["north"][..], &[][..]), (&[][..], &[][..])] {
            let block = engine.compute(a, b, &s);
            assert_eq!(block.len(), 5);
            assert!(block.values().iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn test_k_value_validation() {
        assert!(AlignmentSimilarityEngine::new(vec![]).is_err());
        assert!(AlignmentSimilarityEngine::new(vec![0, 1]).is_err());
        assert!(AlignmentSimilarityEngine::new(vec![3, 2]).is_err());
        assert!(AlignmentSimilarityEngine::new(vec![2, 2]).is_err());
        assert_eq!(AlignmentSimilarityEngine::new(vec![1, 4]).unwrap().len(), 3);
    }

    #[derive(Debug)]
    struct Constant;

    impl AlignmentMetrics for Constant {
        fn aligned_similarity(&self, _: &dyn EmbeddingSpace, _: &[&str], _: &[&str]) -> f32 {
            0.25
        }

        fn top_k_similarity(&self, _: &dyn EmbeddingSpace, _: &[&str], _: &[&str], k: usize) -> f32 {
            k as f32
        }
    }

    #[test]
    fn test_custom_metrics_in_ascending_k_order() {
        let engine = AlignmentSimilarityEngine::default()
            .with_metrics(Arc::new(Constant))
            .with_prefix("w2v_");
        let block = engine.compute(&["north"], &["east"], &space());
        assert_eq!(block.values(), &[0.25, 1.0, 2.0, 3.0, 5.0]);
        assert_eq!(block.names()[4], "w2v_max_sim_avg_top5");
    }
}
