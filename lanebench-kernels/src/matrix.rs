//! 4x4 column-major matrix products

use crate::vector::load;
use std::hint::black_box;
use wide::f32x4;

/// Column-major 4x4 matrix
pub type Mat4 = [f32; 16];

/// Matrix with `m[i] = i * 0.1`
pub fn ramp_matrix() -> Mat4 {
    std::array::from_fn(|i| i as f32 * 0.1)
}

/// `a * b`, element by element
#[inline(never)]
pub fn multiply_scalar(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut c = [0.0f32; 16];
    for j in (0..16).step_by(4) {
        c[j] = a[0] * b[j] + a[4] * b[j + 1] + a[8] * b[j + 2] + a[12] * b[j + 3];
        c[j + 1] = a[1] * b[j] + a[5] * b[j + 1] + a[9] * b[j + 2] + a[13] * b[j + 3];
        c[j + 2] = a[2] * b[j] + a[6] * b[j + 1] + a[10] * b[j + 2] + a[14] * b[j + 3];
        c[j + 3] = a[3] * b[j] + a[7] * b[j + 1] + a[11] * b[j + 2] + a[15] * b[j + 3];
    }
    c
}

/// `a * b`, one output column per broadcast-multiply-add chain
#[inline(never)]
pub fn multiply_simd(a: &Mat4, b: &Mat4) -> Mat4 {
    let cols = [load(&a[0..]), load(&a[4..]), load(&a[8..]), load(&a[12..])];
    let mut c = [0.0f32; 16];

    for j in 0..4 {
        let col = (f32x4::splat(b[4 * j]) * cols[0] + f32x4::splat(b[4 * j + 1]) * cols[1])
            + (f32x4::splat(b[4 * j + 2]) * cols[2] + f32x4::splat(b[4 * j + 3]) * cols[3]);
        c[4 * j..4 * j + 4].copy_from_slice(&col.to_array());
    }
    c
}

/// Scratch state of the matrix workloads
#[derive(Debug)]
pub struct MatrixState {
    /// Left operand
    pub a: Mat4,
    /// Right operand
    pub b: Mat4,
    /// Products per execution
    pub iterations: usize,
    /// Folded output, keeps the products observable
    pub accumulator: f32,
}

impl MatrixState {
    /// Operands for `iterations` products per execution
    pub fn new(iterations: usize) -> Self {
        Self {
            a: ramp_matrix(),
            b: ramp_matrix(),
            iterations,
            accumulator: 0.0,
        }
    }

    /// Restore operands and clear the accumulator
    pub fn reset(&mut self) {
        self.a = ramp_matrix();
        self.b = ramp_matrix();
        self.accumulator = 0.0;
    }

    /// Run `iterations` products with `multiply`, folding `c[1] * i`
    #[inline(always)]
    pub fn run(&mut self, multiply: fn(&Mat4, &Mat4) -> Mat4) {
        let mut acc = 0.0f32;
        for i in 0..self.iterations {
            let c = multiply(black_box(&self.a), black_box(&self.b));
            acc += c[1] * i as f32;
        }
        self.accumulator = black_box(acc);
    }
}
