//! # discsim
//!
//! Embedding-similarity features for discourse relation classification.
//!
//! Given a relation (Arg1, Arg2 and an optional connective, each a list of
//! token coordinates into a parsed document) and one or two word embedding
//! spaces, discsim produces a fixed-width feature vector: averaged argument
//! embeddings, the Arg1/Arg2 cosine distance, best-match and top-k alignment
//! scores, and similarities restricted to part-of-speech classes.
//!
//! ## Quick Start
//!
//! ```rust
//! use discsim::prelude::*;
//!
//! let space = EmbeddingTable::from_pairs(2, [
//!     ("prices", Vector::new(vec![1.0, 0.0])),
//!     ("fell", Vector::new(vec![0.0, 1.0])),
//!     ("rose", Vector::new(vec![0.1, 0.9])),
//! ]).unwrap();
//!
//! let parses = ParseStore::from_json_str(r#"{
//!     "wsj_0001": {"sentences": [{"words": [
//!         ["prices", {"PartOfSpeech": "NNS"}],
//!         ["fell", {"PartOfSpeech": "VBD"}],
//!         ["but", {"PartOfSpeech": "CC"}],
//!         ["rose", {"PartOfSpeech": "VBD"}]
//!     ]}]}
//! }"#).unwrap();
//!
//! let record = RelationRecord::from_json_str(r#"{
//!     "DocID": "wsj_0001",
//!     "Arg1": {"TokenList": [[0, 6, 0, 0, 0], [7, 11, 1, 0, 1]]},
//!     "Connective": {"TokenList": [[12, 15, 2, 0, 2]]},
//!     "Arg2": {"TokenList": [[16, 20, 3, 0, 3]]}
//! }"#, &RecordSchema::default()).unwrap();
//!
//! let assembler = FeatureAssembler::new(&space).unwrap();
//! let features = assembler.extract(&record, &parses).unwrap();
//! assert_eq!(features.dense.len(), assembler.width());
//! ```
//!
//! ## Crate Structure
//!
//! - `discsim-core` - vectors, embedding spaces, tag classes, parses and records
//! - `discsim-similarity` - POS-axis and alignment similarity engines
//! - `discsim-features` - record feature assembly, raw tokens, batches
//!
//! ## Features
//!
//! - **POS Axes**: data-driven tag class pairs, legacy/experimental/best profiles
//! - **Alignment**: aligned max similarity and top-k centroid similarity
//! - **Dual Spaces**: optional second embedding space for argument averages
//! - **Sanitized Output**: no NaN or infinity ever reaches the caller
//! - **Parallel Batches**: rayon-backed, input order preserved

pub use discsim_core::{
    EmbeddingSpace, EmbeddingTable,
    Error, Result,
    ParseStore, TokenResolver,
    RecordSchema, RelationRecord, ResolvedRelation, TokenRef,
    TagClass, TaggedToken,
    Vector, Vocabulary,
};

pub use discsim_similarity::{
    AlignmentMetrics, AlignmentSimilarityEngine, CentroidAlignment,
    AxisProfile, AxisSimilarityEngine, AxisSpec,
    FeatureBlock, SparseFeatureMap,
};

pub use discsim_features::{
    AssemblerOptions, FeatureAssembler, FeatureConfig, FeatureLayout,
    RawTokens, RecordFeatures,
    extract_batch, extract_batch_values, extract_raw, extract_raw_batch,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EmbeddingSpace, EmbeddingTable,
        Error, Result,
        ParseStore, TokenResolver,
        RecordSchema, RelationRecord, TokenRef,
        TagClass, TaggedToken, Vector,
        AxisProfile, AssemblerOptions, FeatureAssembler, FeatureConfig, RecordFeatures,
        extract_batch, extract_raw,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use discsim_core::simd::{dot_product_simd, norm_simd};
}
