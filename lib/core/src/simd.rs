// Vector kernels used by averaging and cosine similarity.
// Embedding dimensions are typically 50-300, so only the dot product has an
// explicit AVX2 path; everything else is left to the autovectorizer.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "x86_64")]
const MIN_DIM_SIZE_AVX: usize = 32;

/// Dot product of two equal-length slices.
/// Returns 0.0 when the lengths differ.
#[inline]
pub fn dot_product_simd(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2")
            && is_x86_feature_detected!("fma")
            && a.len() >= MIN_DIM_SIZE_AVX
        {
            return unsafe { dot_product_avx2(a, b) };
        }
    }

    dot_product_scalar(a, b)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
unsafe fn dot_product_avx2(a: &[f32], b: &[f32]) -> f32 {
    let dim = a.len();
    let mut i = 0;
    let mut acc = _mm256_setzero_ps();

    while i + 7 < dim {
        let va = _mm256_loadu_ps(a.as_ptr().add(i));
        let vb = _mm256_loadu_ps(b.as_ptr().add(i));
        acc = _mm256_fmadd_ps(va, vb, acc);
        i += 8;
    }

    let high = _mm256_extractf128_ps(acc, 1);
    let low = _mm256_castps256_ps128(acc);
    let mut sum = _mm_add_ps(high, low);
    sum = _mm_hadd_ps(sum, sum);
    sum = _mm_hadd_ps(sum, sum);

    let mut dot = _mm_cvtss_f32(sum);
    while i < dim {
        dot += a[i] * b[i];
        i += 1;
    }
    dot
}

/// Two accumulators over 8-wide chunks
#[inline]
fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    let mut even = 0.0f32;
    let mut odd = 0.0f32;

    let chunks_a = a.chunks_exact(8);
    let tail_a = chunks_a.remainder();
    let chunks_b = b.chunks_exact(8);
    let tail_b = chunks_b.remainder();

    for (ca, cb) in chunks_a.zip(chunks_b) {
        even += ca[0] * cb[0] + ca[2] * cb[2] + ca[4] * cb[4] + ca[6] * cb[6];
        odd += ca[1] * cb[1] + ca[3] * cb[3] + ca[5] * cb[5] + ca[7] * cb[7];
    }
    for (x, y) in tail_a.iter().zip(tail_b) {
        even += x * y;
    }

    even + odd
}

/// Euclidean length
#[inline]
pub fn norm_simd(v: &[f32]) -> f32 {
    dot_product_simd(v, v).sqrt()
}

/// `acc += v`, element-wise. Lengths must match.
#[inline]
pub fn accumulate(acc: &mut [f32], v: &[f32]) {
    debug_assert_eq!(acc.len(), v.len());
    for (a, x) in acc.iter_mut().zip(v) {
        *a += x;
    }
}
