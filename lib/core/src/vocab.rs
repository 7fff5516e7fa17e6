//! Vocabulary membership and projection of token sequences onto it

use crate::token::TaggedToken;
use ahash::AHashSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A set of known surface forms
pub trait Vocabulary {
    fn contains_word(&self, word: &str) -> bool;
}

impl Vocabulary for AHashSet<String> {
    #[inline]
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl<S: BuildHasher> Vocabulary for HashSet<String, S> {
    #[inline]
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl Vocabulary for BTreeSet<String> {
    #[inline]
    fn contains_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl<V: Vocabulary + ?Sized> Vocabulary for &V {
    #[inline]
    fn contains_word(&self, word: &str) -> bool {
        (**self).contains_word(word)
    }
}

/// Keep the tokens whose surface form is in `vocabulary`, preserving order.
///
/// An empty result is a normal outcome and means "no signal" downstream.
pub fn project<'a, V>(tokens: &'a [TaggedToken], vocabulary: &V) -> Vec<&'a TaggedToken>
where
    V: Vocabulary + ?Sized,
{
    tokens
        .iter()
        .filter(|t| vocabulary.contains_word(&t.word))
        .collect()
}

/// Word-list counterpart of [`project`]
pub fn project_words<'a, S, V>(words: &'a [S], vocabulary: &V) -> Vec<&'a str>
where
    S: AsRef<str>,
    V: Vocabulary + ?Sized,
{
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| vocabulary.contains_word(w))
        .collect()
}
