//! Element-wise multiplication and summation over `f32` vectors

use wide::f32x4;

/// Factor applied by the multiplication kernels
pub const MULTIPLIER: f32 = 34.1;

const RAMP_STEP: f32 = 0.3333;

#[inline(always)]
pub(crate) fn load(chunk: &[f32]) -> f32x4 {
    f32x4::new([chunk[0], chunk[1], chunk[2], chunk[3]])
}

/// Fill `a` with `i * 0.3333`
pub fn fill_ramp(a: &mut [f32]) {
    for (i, x) in a.iter_mut().enumerate() {
        *x = i as f32 * RAMP_STEP;
    }
}

/// `b[i] = a[i] * factor`, one element at a time
#[inline(never)]
pub fn multiply_scalar(a: &[f32], b: &mut [f32], factor: f32) {
    for (dst, &src) in b.iter_mut().zip(a) {
        *dst = src * factor;
    }
}

/// `b[i] = a[i] * factor`, four lanes at a time
#[inline(never)]
pub fn multiply_simd(a: &[f32], b: &mut [f32], factor: f32) {
    let f = f32x4::splat(factor);
    let src = a.chunks_exact(4);
    let tail = src.remainder();
    let mut dst = b.chunks_exact_mut(4);

    for (s, d) in src.zip(&mut dst) {
        d.copy_from_slice(&(load(s) * f).to_array());
    }
    for (d, &s) in dst.into_remainder().iter_mut().zip(tail) {
        *d = s * factor;
    }
}

/// Sequential sum of all elements
#[inline(never)]
pub fn sum_scalar(a: &[f32]) -> f32 {
    let mut total = 0.0f32;
    for &x in a {
        total += x;
    }
    total
}

/// In-place pairwise tree reduction over 4-lane blocks.
///
/// The stride doubles from 4 until it covers the whole slice; afterwards
/// lanes `0..4` hold the partial sums. Blocks without a partner carry over
/// unchanged, so lengths that are not a power of two still reduce fully.
/// Elements past the last whole block are added scalar.
#[inline(never)]
pub fn sum_simd(a: &mut [f32]) -> f32 {
    let blocks = a.len() / 4 * 4;
    if blocks == 0 {
        return sum_scalar(a);
    }

    let mut k = 4;
    while k < blocks {
        let mut i = 0;
        while i + k < blocks {
            let v = load(&a[i..]) + load(&a[i + k..]);
            a[i..i + 4].copy_from_slice(&v.to_array());
            i += k * 2;
        }
        k <<= 1;
    }

    load(a).reduce_add() + sum_scalar(&a[blocks..])
}

/// Scratch state of the multiplication and sum workloads
#[derive(Debug, Default)]
pub struct VectorState {
    /// Input ramp
    pub a: Vec<f32>,
    /// Multiplication output
    pub b: Vec<f32>,
    /// Sum output
    pub total: f32,
}

impl VectorState {
    /// Allocate buffers for vectors of `len` elements
    pub fn new(len: usize) -> Self {
        Self {
            a: vec![0.0; len],
            b: vec![0.0; len],
            total: 0.0,
        }
    }

    /// Refill the ramp and zero the outputs
    pub fn reset(&mut self) {
        fill_ramp(&mut self.a);
        self.b.fill(0.0);
        self.total = 0.0;
    }
}
