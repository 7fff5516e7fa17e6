use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// All-zero vector; the convention for "no in-vocabulary words"
    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        crate::simd::norm_simd(&self.data)
    }

    /// True when every component is exactly zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Cosine similarity in [-1, 1].
    /// Returns 0.0 for mismatched dimensions or a zero-length operand.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let dot_product = crate::simd::dot_product_simd(&self.data, &other.data);
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }

    /// Cosine distance, `1 - cos(a, b)`.
    ///
    /// Undefined (NaN) when either operand has zero length or the
    /// dimensions differ; callers decide how to absorb that.
    #[inline]
    pub fn cosine_distance(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() || self.norm() == 0.0 || other.norm() == 0.0 {
            return f32::NAN;
        }
        1.0 - self.cosine_similarity(other)
    }

    /// Component-wise mean. `None` for an empty iterator or mixed dimensions.
    pub fn mean<'a, I>(vectors: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next()?;
        let mut acc = first.data.clone();
        let mut count = 1usize;

        for v in iter {
            if v.dim() != acc.len() {
                return None;
            }
            crate::simd::accumulate(&mut acc, &v.data);
            count += 1;
        }

        let inv = 1.0 / count as f32;
        for x in &mut acc {
            *x *= inv;
        }
        Some(Vector::new(acc))
    }

    /// Point halfway between `self` and `other`
    #[must_use]
    pub fn midpoint(&self, other: &Vector) -> Vector {
        &(self + other) * 0.5
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        assert_eq!(self.dim(), other.dim());
        Vector::new(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        )
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        Vector::new(self.data.iter().map(|x| x * scalar).collect())
    }
}
