//! Synthetic RGBA8 test image and output canvas

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// Interleaved RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Opaque black image
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = vec![0; width * height * CHANNELS];
        for px in data.chunks_exact_mut(CHANNELS) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Deterministic test picture: colour gradients, a checkerboard and a
    /// filled disc, so every channel carries edges.
    pub fn synthesize(width: usize, height: usize) -> Self {
        let mut image = Self::new(width, height);
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let radius = width.min(height) as f32 / 3.0;

        for y in 0..height {
            for x in 0..width {
                let i = image.index(x, y);
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let inside = dx * dx + dy * dy <= radius * radius;
                let checker = ((x / 16) + (y / 16)) % 2 == 0;

                image.data[i] = (x * 255 / width.max(1)) as u8;
                image.data[i + 1] = (y * 255 / height.max(1)) as u8;
                image.data[i + 2] = if checker { 200 } else { 40 };
                if inside {
                    image.data[i] = 255 - image.data[i];
                    image.data[i + 2] = 255;
                }
            }
        }
        image
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Offset of the first channel of pixel (x, y)
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        pixel_index(self.width, x, y)
    }

    /// Channels as `f32`, written into `out`
    pub fn to_f32(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.data.iter().map(|&b| b as f32));
    }

    /// Write float channels back, rounding and clamping to `0..=255` with
    /// alpha forced opaque.
    pub fn put_f32(&mut self, pixels: &[f32]) {
        for (i, (dst, &src)) in self.data.iter_mut().zip(pixels).enumerate() {
            *dst = if i % CHANNELS == 3 {
                255
            } else {
                src.round().clamp(0.0, 255.0) as u8
            };
        }
    }
}

#[inline(always)]
pub(crate) fn pixel_index(width: usize, x: usize, y: usize) -> usize {
    (y * width + x) * CHANNELS
}
