//! # discsim Core
//!
//! Core data model for the discsim feature extractor.
//!
//! This crate provides the leaf primitives every similarity feature is built on:
//!
//! - [`Vector`] - Dense embedding vector with cosine/mean operations
//! - [`TaggedToken`] - A word with its part-of-speech tag
//! - [`TagClass`] - POS prefix predicate (single prefix, union, or wildcard)
//! - [`vocab::project`] - Restrict token sequences to an embedding vocabulary
//! - [`EmbeddingSpace`] - Read-only word embedding oracle, with [`EmbeddingTable`]
//! - [`ParseStore`] / [`RelationRecord`] - Parser output and relation coordinates
//! - [`RecordSchema`] - Field names and coordinate positions of relation records
//!
//! ## Example
//!
//! ```rust
//! use discsim_core::{EmbeddingSpace, EmbeddingTable, TagClass, TaggedToken, Vector};
//! use discsim_core::vocab::project;
//!
//! let space = EmbeddingTable::from_pairs(2, [
//!     ("dog", Vector::new(vec![1.0, 0.0])),
//!     ("barks", Vector::new(vec![0.0, 1.0])),
//! ]).unwrap();
//!
//! let tokens = vec![
//!     TaggedToken::new("the", "DT"),
//!     TaggedToken::new("dog", "NN"),
//!     TaggedToken::new("barks", "VBZ"),
//! ];
//!
//! let known = project(&tokens, &space);
//! assert_eq!(known.len(), 2);
//!
//! let nouns: Vec<&str> = known
//!     .iter()
//!     .filter(|t| TagClass::from("NN").matches(&t.tag))
//!     .map(|t| t.word())
//!     .collect();
//! assert_eq!(nouns, vec!["dog"]);
//! assert_eq!(space.average_vector(&nouns).as_slice(), &[1.0, 0.0]);
//! ```

pub mod embedding;
pub mod error;
pub mod parse;
pub mod record;
pub mod schema;
pub mod tag;
pub mod token;
pub mod vector;
pub mod vocab;

/// Dot product and norm kernels
///
/// AVX2/FMA on x86_64 for longer vectors, scalar elsewhere
pub mod simd;

pub use embedding::{EmbeddingSpace, EmbeddingTable};
pub use error::{Error, Result};
pub use parse::{ParseStore, ParsedDocument, ParsedSentence, ParsedWord, TokenResolver};
pub use record::{RelationRecord, ResolvedRelation, TokenRef};
pub use schema::RecordSchema;
pub use tag::TagClass;
pub use token::TaggedToken;
pub use vector::Vector;
pub use vocab::Vocabulary;
