//! Embedding spaces
//!
//! [`EmbeddingSpace`] is the read-only oracle the similarity engines consult:
//! word lookup, averaging, and group-to-group similarity. Implementations
//! must be shareable across worker threads without locking.
//!
//! [`EmbeddingTable`] is an in-memory implementation backed by a hash map,
//! used for tests, benchmarks and callers that already hold the vectors.

use crate::vocab::Vocabulary;
use crate::{Error, Result, Vector};
use ahash::AHashMap;

/// Read-only word embedding oracle
pub trait EmbeddingSpace: Vocabulary + Send + Sync {
    /// Length of every vector in the space
    fn dim(&self) -> usize;

    /// Vector for `word`, or `None` when out of vocabulary
    fn vector_of(&self, word: &str) -> Option<&Vector>;

    /// Number of known words
    fn vocabulary_size(&self) -> usize;

    /// Mean of the in-vocabulary vectors of `words`.
    ///
    /// Returns the zero vector of length [`dim`](Self::dim) when no word is
    /// known, so the result always has a fixed width.
    fn average_vector(&self, words: &[&str]) -> Vector {
        Vector::mean(words.iter().filter_map(|w| self.vector_of(w)))
            .unwrap_or_else(|| Vector::zeros(self.dim()))
    }

    /// Cosine similarity between the mean vectors of two word groups.
    ///
    /// Out-of-vocabulary words are skipped; 0.0 when either group has no
    /// known word.
    fn group_similarity(&self, words_a: &[&str], words_b: &[&str]) -> f32 {
        let mean_a = Vector::mean(words_a.iter().filter_map(|w| self.vector_of(w)));
        let mean_b = Vector::mean(words_b.iter().filter_map(|w| self.vector_of(w)));
        match (mean_a, mean_b) {
            (Some(a), Some(b)) => a.cosine_similarity(&b),
            _ => 0.0,
        }
    }

    /// Known vectors of `words`, in order, skipping unknown words
    fn vectors_of<'s>(&'s self, words: &[&str]) -> Vec<&'s Vector> {
        words.iter().filter_map(|w| self.vector_of(w)).collect()
    }
}

/// Hash-map backed embedding space
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    dim: usize,
    vectors: AHashMap<String, Vector>,
}

impl EmbeddingTable {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: AHashMap::new(),
        }
    }

    /// Build a table from `(word, vector)` pairs, all of dimension `dim`
    pub fn from_pairs<I, W>(dim: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, Vector)>,
        W: Into<String>,
    {
        let mut table = Self::new(dim);
        for (word, vector) in pairs {
            table.insert(word, vector)?;
        }
        Ok(table)
    }

    /// Insert or replace a word vector
    pub fn insert(&mut self, word: impl Into<String>, vector: Vector) -> Result<()> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        self.vectors.insert(word.into(), vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }
}

impl Vocabulary for EmbeddingTable {
    #[inline]
    fn contains_word(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }
}

impl EmbeddingSpace for EmbeddingTable {
    #[inline]
    fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    fn vector_of(&self, word: &str) -> Option<&Vector> {
        self.vectors.get(word)
    }

    fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_pairs(
            2,
            [
                ("dog", Vector::new(vec![1.0, 0.0])),
                ("cat", Vector::new(vec![0.8, 0.6])),
                ("car", Vector::new(vec![0.0, 1.0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut t = EmbeddingTable::new(3);
        let err = t.insert("x", Vector::new(vec![1.0])).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_average_vector_skips_unknown_words() {
        let t = table();
        let avg = t.average_vector(&["dog", "unknown", "car"]);
        assert_eq!(avg.as_slice(), &[0.5, 0.5]);
    }

    #[test]
    fn test_average_vector_all_unknown_is_zero() {
        let t = table();
        let avg = t.average_vector(&["unknown"]);
        assert_eq!(avg.dim(), 2);
        assert!(avg.is_zero());
        assert!(t.average_vector(&[]).is_zero());
    }

    #[test]
    fn test_group_similarity() {
        let t = table();
        assert!((t.group_similarity(&["dog"], &["cat"]) - 0.8).abs() < 1e-6);
        assert!((t.group_similarity(&["dog"], &["dog"]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_group_similarity_empty_group() {
        let t = table();
        assert_eq!(t.group_similarity(&[], &["cat"]), 0.0);
        assert_eq!(t.group_similarity(&["dog"], &["unknown"]), 0.0);
    }

    #[test]
    fn test_vocabulary() {
        let t = table();
        assert!(t.contains_word("dog"));
        assert!(!t.contains_word("Dog"));
        assert_eq!(t.vocabulary_size(), 3);
    }
}
