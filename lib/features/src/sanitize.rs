//! Replacement of indeterminate values
//!
//! Degenerate similarity computations (a zero-length vector in a cosine, a
//! reference oracle returning NaN) must not reach the classifier. The
//! assembler runs these functions once, as its last step. Non-finite values
//! become 0.0; running them again changes nothing.

use discsim_similarity::{FeatureBlock, SparseFeatureMap};

/// Zero every non-finite entry, returning how many were replaced
pub fn sanitize_values(values: &mut [f32]) -> usize {
    let mut replaced = 0;
    for v in values.iter_mut().filter(|v| !v.is_finite()) {
        *v = 0.0;
        replaced += 1;
    }
    replaced
}

pub fn sanitize_sparse(features: &mut SparseFeatureMap) -> usize {
    let mut replaced = 0;
    for v in features.values_mut().filter(|v| !v.is_finite()) {
        *v = 0.0;
        replaced += 1;
    }
    replaced
}

pub fn sanitize_block(block: &mut FeatureBlock) -> usize {
    sanitize_values(block.values_mut())
}
