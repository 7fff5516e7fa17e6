//! Named, ordered feature scalars
//!
//! A [`FeatureBlock`] keeps a dense value list and the matching feature
//! names side by side, so position `i` of the dense vector and the sparse
//! key for that column can never drift apart.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Feature name to value; insertion order carries no meaning
pub type SparseFeatureMap = AHashMap<String, f32>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureBlock {
    names: Vec<String>,
    values: Vec<f32>,
}

impl FeatureBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, name: impl Into<String>, value: f32) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Append a vector as columns `<prefix>0`, `<prefix>1`, ...
    pub fn push_vector(&mut self, prefix: &str, values: &[f32]) {
        self.names.reserve(values.len());
        self.values.reserve(values.len());
        for (i, v) in values.iter().enumerate() {
            self.names.push(format!("{prefix}{i}"));
            self.values.push(*v);
        }
    }

    pub fn append(&mut self, other: FeatureBlock) {
        self.names.extend(other.names);
        self.values.extend(other.values);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn to_sparse(&self) -> SparseFeatureMap {
        self.iter().map(|(n, v)| (n.to_string(), v)).collect()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<f32>) {
        (self.names, self.values)
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}
