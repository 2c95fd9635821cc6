//! Sobel edge magnitude over interleaved RGBA `f32` pixels
//!
//! Border pixels are left untouched. Alpha is opaque in the scalar output;
//! the SIMD output carries a meaningless alpha lane that the canvas
//! write-back replaces.

use crate::image::{RgbaImage, pixel_index};
use crate::vector::load;
use wide::f32x4;

/// Per-channel gradient magnitude, clamped to `0..=255`
#[inline(never)]
pub fn sobel_scalar(src: &[f32], dst: &mut [f32], width: usize, height: usize) {
    let at = |x: usize, y: usize, c: usize| src[pixel_index(width, x, y) + c];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let i = pixel_index(width, x, y);
            for c in 0..3 {
                let gx = (at(x + 1, y - 1, c) + 2.0 * at(x + 1, y, c) + at(x + 1, y + 1, c))
                    - (at(x - 1, y - 1, c) + 2.0 * at(x - 1, y, c) + at(x - 1, y + 1, c));
                let gy = (at(x - 1, y + 1, c) + 2.0 * at(x, y + 1, c) + at(x + 1, y + 1, c))
                    - (at(x - 1, y - 1, c) + 2.0 * at(x, y - 1, c) + at(x + 1, y - 1, c));
                dst[i + c] = (gx * gx + gy * gy).sqrt().clamp(0.0, 255.0);
            }
            dst[i + 3] = 255.0;
        }
    }
}

/// Gradient magnitude of all four channels of a pixel at once
#[inline(never)]
pub fn sobel_simd(src: &[f32], dst: &mut [f32], width: usize, height: usize) {
    let two = f32x4::splat(2.0);
    let max = f32x4::splat(255.0);
    let px = |x: usize, y: usize| load(&src[pixel_index(width, x, y)..]);

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let (nw, n, ne) = (px(x - 1, y - 1), px(x, y - 1), px(x + 1, y - 1));
            let (w, e) = (px(x - 1, y), px(x + 1, y));
            let (sw, s, se) = (px(x - 1, y + 1), px(x, y + 1), px(x + 1, y + 1));

            let gx = (ne + two * e + se) - (nw + two * w + sw);
            let gy = (sw + two * s + se) - (nw + two * n + ne);
            let magnitude = (gx * gx + gy * gy).sqrt().min(max);

            let i = pixel_index(width, x, y);
            dst[i..i + 4].copy_from_slice(&magnitude.to_array());
        }
    }
}

/// Scratch state of the Sobel workloads
#[derive(Debug)]
pub struct SobelState {
    /// Source picture
    pub image: RgbaImage,
    /// Source channels as floats
    pub src: Vec<f32>,
    /// Filter output
    pub dst: Vec<f32>,
    /// Canvas receiving the output after each execution
    pub canvas: RgbaImage,
}

impl SobelState {
    /// State filtering `image`
    pub fn new(image: RgbaImage) -> Self {
        let canvas = RgbaImage::new(image.width(), image.height());
        let len = image.data().len();
        Self {
            image,
            src: Vec::with_capacity(len),
            dst: vec![0.0; len],
            canvas,
        }
    }

    /// Convert the picture and clear the output
    pub fn reset(&mut self) {
        self.image.to_f32(&mut self.src);
        self.dst.fill(0.0);
    }

    /// Run `filter` over the picture
    #[inline(always)]
    pub fn run(&mut self, filter: fn(&[f32], &mut [f32], usize, usize)) {
        filter(
            &self.src,
            &mut self.dst,
            self.image.width(),
            self.image.height(),
        );
    }

    /// Copy the output onto the canvas
    pub fn present(&mut self) {
        self.canvas.put_f32(&self.dst);
    }
}
