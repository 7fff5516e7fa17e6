//! # discsim Similarity
//!
//! Similarity engines that turn two tagged token sequences into fixed-width
//! feature columns.
//!
//! ## Features
//!
//! - **POS axes**: one embedding similarity per (Arg1 tag class, Arg2 tag class)
//!   pair, driven by a data table ([`AxisProfile`]) rather than code
//! - **Alignment**: best-match and top-k centroid similarities between the
//!   in-vocabulary words of both arguments
//! - **Named columns**: every engine returns a [`FeatureBlock`], keeping the
//!   dense values and their sparse feature names in lockstep
//!
//! ## Example
//!
//! ```rust
//! use discsim_core::{EmbeddingTable, TaggedToken, Vector};
//! use discsim_similarity::{AxisProfile, AxisSimilarityEngine};
//!
//! let space = EmbeddingTable::from_pairs(2, [
//!     ("dog", Vector::new(vec![1.0, 0.0])),
//!     ("cat", Vector::new(vec![0.8, 0.6])),
//! ]).unwrap();
//!
//! let engine = AxisSimilarityEngine::from_profile(&AxisProfile::default()).unwrap();
//! let block = engine.compute(
//!     &[TaggedToken::new("dog", "NN")],
//!     &[TaggedToken::new("cat", "NNS")],
//!     &space,
//! );
//!
//! assert_eq!(block.len(), 16);
//! assert!((block.get("sim_pos_arg1_NN_arg2_NN").unwrap() - 0.8).abs() < 1e-6);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ AxisProfile │────>│ AxisEngine  │────>│             │
//! │  (table)    │     │ (tag×vocab) │     │ FeatureBlock│
//! └─────────────┘     └─────────────┘     │ (names,     │
//!                     ┌─────────────┐     │  values)    │
//!                     │ Alignment   │────>│             │
//!                     │ (k values)  │     └─────────────┘
//!                     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │ Embedding   │
//!                     │ Space       │
//!                     └─────────────┘
//! ```

pub mod alignment;
pub mod axis;
pub mod block;

pub use alignment::{
    compute_alignment_similarities, AlignmentMetrics, AlignmentSimilarityEngine, CentroidAlignment,
    DEFAULT_K_VALUES,
};
pub use axis::{compute_axis_similarities, validate_axes, AxisProfile, AxisSimilarityEngine, AxisSpec};
pub use block::{FeatureBlock, SparseFeatureMap};
