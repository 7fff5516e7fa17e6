//! # discsim Features
//!
//! Turns a discourse relation record (Arg1, Arg2, optional connective, all
//! given as token coordinates into a parsed document) into the fixed-width
//! vector a relation-sense classifier consumes.
//!
//! ## Features
//!
//! - **Assembly**: [`FeatureAssembler`] averages argument embeddings, adds
//!   the Arg1/Arg2 cosine distance, alignment metrics and POS-axis
//!   similarities, then sanitizes the result
//! - **Stable layout**: [`FeatureAssembler::layout`] names every column; the
//!   optional sparse map uses the same names
//! - **Raw tokens**: [`extract_raw`] for callers that featurize text themselves
//! - **Batches**: [`extract_batch`] runs records in parallel with rayon,
//!   keeping input order
//!
//! ## Example
//!
//! ```rust
//! use discsim_core::{EmbeddingTable, ParseStore, RelationRecord, TaggedToken, TokenRef, Vector};
//! use discsim_features::{AssemblerOptions, FeatureAssembler};
//!
//! let space = EmbeddingTable::from_pairs(2, [
//!     ("rain", Vector::new(vec![1.0, 0.0])),
//!     ("wet", Vector::new(vec![0.6, 0.8])),
//! ]).unwrap();
//!
//! let mut parses = ParseStore::new();
//! parses.insert_document("wsj_0001", vec![vec![
//!     TaggedToken::new("rain", "NN"),
//!     TaggedToken::new("so", "IN"),
//!     TaggedToken::new("wet", "JJ"),
//! ]]);
//!
//! let record = RelationRecord::new(
//!     "wsj_0001",
//!     vec![TokenRef::new(0, 0)],
//!     vec![TokenRef::new(0, 2)],
//!     vec![TokenRef::new(0, 1)],
//! );
//!
//! let options = AssemblerOptions { emit_sparse_features: true, ..Default::default() };
//! let assembler = FeatureAssembler::builder(&space).options(options).build().unwrap();
//! let features = assembler.extract(&record, &parses).unwrap();
//!
//! assert_eq!(features.dense.len(), assembler.layout().len());
//! let sparse = features.sparse.unwrap();
//! assert_eq!(sparse["has_connective"], 1.0);
//! assert!((sparse["sim_arg1arg2"] - 0.4).abs() < 1e-6);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   resolve   ┌──────────────────┐
//! │RelationRecord│────────────>│ ResolvedRelation │
//! └──────────────┘ (ParseStore)└──────────────────┘
//!                                       │
//!                                       v
//!                         ┌──────────────────────────┐
//!                         │     FeatureAssembler     │
//!                         │ averages │ distance      │
//!                         │ alignment│ POS axes      │
//!                         │ candidates               │
//!                         └──────────────────────────┘
//!                                       │ sanitize
//!                                       v
//!                         ┌──────────────────────────┐
//!                         │ RecordFeatures           │
//!                         │ dense + optional sparse  │
//!                         └──────────────────────────┘
//! ```

pub mod assembler;
pub mod batch;
pub mod layout;
pub mod options;
pub mod raw;
pub mod sanitize;

pub use assembler::{AssemblerBuilder, FeatureAssembler, RecordFeatures};
pub use batch::{extract_batch, extract_batch_values, extract_raw_batch};
pub use layout::{FeatureLayout, LAYOUT_VERSION};
pub use options::{AssemblerOptions, FeatureConfig};
pub use raw::{extract_raw, RawTokens};
pub use sanitize::{sanitize_block, sanitize_sparse, sanitize_values};
