#![warn(missing_docs)]
//! LaneBench Kernels - Scalar vs SIMD Workloads
//!
//! Four groups, each registered once per kind:
//!
//! | group | workload |
//! |---|---|
//! | `multiplication` | `b[i] = a[i] * 34.1` over a large vector |
//! | `sum` | total of a large vector (SIMD: pairwise tree reduction) |
//! | `matrix` | repeated 4x4 column-major products |
//! | `sobel` | edge magnitude of a synthetic RGBA picture |
//!
//! SIMD variants use `wide::f32x4`.

use lanebench_core::{FnWorkload, Registry};
use serde::Deserialize;
use std::hint::black_box;
use thiserror::Error;
use tracing::debug;

mod image;
mod matrix;
mod sobel;
mod vector;

pub use image::{CHANNELS, RgbaImage};
pub use matrix::{Mat4, MatrixState, ramp_matrix};
pub use sobel::{SobelState, sobel_scalar, sobel_simd};
pub use vector::{MULTIPLIER, VectorState, fill_ramp, sum_scalar, sum_simd};

/// Matrix product kernels
pub mod mat4 {
    pub use crate::matrix::{multiply_scalar, multiply_simd};
}

/// Vector multiplication kernels
pub mod mul {
    pub use crate::vector::{multiply_scalar, multiply_simd};
}

/// Kind label of the one-element-at-a-time variants
pub const KIND_SCALAR: &str = "scalar";
/// Kind label of the `f32x4` variants
pub const KIND_SIMD: &str = "simd";

/// Group labels, in registration order
pub const GROUPS: [&str; 4] = ["multiplication", "sum", "matrix", "sobel"];

/// Kernel sizing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Elements in the multiplication and sum vectors
    pub vector_len: usize,
    /// Matrix products per execution
    pub matrix_iterations: usize,
    /// Sobel picture width in pixels
    pub image_width: usize,
    /// Sobel picture height in pixels
    pub image_height: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            vector_len: 2_097_152,
            matrix_iterations: 10_000,
            image_width: 400,
            image_height: 225,
        }
    }
}

/// Invalid kernel sizing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    /// Vector length is zero or not a multiple of the lane count
    #[error("vector_len must be a positive multiple of 4, got {0}")]
    VectorLength(usize),

    /// No matrix products requested
    #[error("matrix_iterations must be at least 1")]
    NoIterations,

    /// Picture has no interior pixels
    #[error("image must be at least 3x3 pixels, got {width}x{height}")]
    ImageTooSmall {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

impl KernelConfig {
    /// Check sizing constraints
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.vector_len == 0 || self.vector_len % 4 != 0 {
            return Err(KernelError::VectorLength(self.vector_len));
        }
        if self.matrix_iterations == 0 {
            return Err(KernelError::NoIterations);
        }
        if self.image_width < 3 || self.image_height < 3 {
            return Err(KernelError::ImageTooSmall {
                width: self.image_width,
                height: self.image_height,
            });
        }
        Ok(())
    }
}

/// Register the scalar and SIMD variant of every group
pub fn register_suite(registry: &mut Registry, config: &KernelConfig) -> Result<(), KernelError> {
    config.validate()?;
    let len = config.vector_len;

    registry
        .register(
            "multiplication",
            KIND_SCALAR,
            vector_workload(len, |s: &mut VectorState| {
                mul::multiply_scalar(&s.a, &mut s.b, MULTIPLIER);
                black_box(&s.b);
            }),
        )
        .register(
            "multiplication",
            KIND_SIMD,
            vector_workload(len, |s: &mut VectorState| {
                mul::multiply_simd(&s.a, &mut s.b, MULTIPLIER);
                black_box(&s.b);
            }),
        )
        .register(
            "sum",
            KIND_SCALAR,
            vector_workload(len, |s: &mut VectorState| {
                s.total = black_box(sum_scalar(&s.a));
            }),
        )
        .register(
            "sum",
            KIND_SIMD,
            vector_workload(len, |s: &mut VectorState| {
                s.total = black_box(sum_simd(&mut s.a));
            }),
        );

    for (kind, multiply) in [
        (KIND_SCALAR, mat4::multiply_scalar as fn(&Mat4, &Mat4) -> Mat4),
        (KIND_SIMD, mat4::multiply_simd as fn(&Mat4, &Mat4) -> Mat4),
    ] {
        let workload = FnWorkload::new(MatrixState::new(config.matrix_iterations), move |s| {
            s.run(multiply);
            Ok(())
        })
        .with_prepare(|s| {
            s.reset();
            Ok(())
        });
        registry.register("matrix", kind, workload);
    }

    let image = RgbaImage::synthesize(config.image_width, config.image_height);
    for (kind, filter) in [
        (KIND_SCALAR, sobel_scalar as fn(&[f32], &mut [f32], usize, usize)),
        (KIND_SIMD, sobel_simd as fn(&[f32], &mut [f32], usize, usize)),
    ] {
        let workload = FnWorkload::new(SobelState::new(image.clone()), move |s| {
            s.run(filter);
            Ok(())
        })
        .with_prepare(|s| {
            s.reset();
            Ok(())
        })
        .with_cleanup(|s| {
            s.present();
            Ok(())
        });
        registry.register("sobel", kind, workload);
    }

    debug!(
        registrations = registry.len(),
        vector_len = len,
        matrix_iterations = config.matrix_iterations,
        "registered kernel suite"
    );
    Ok(())
}

fn vector_workload<F>(len: usize, mut execute: F) -> FnWorkload<VectorState>
where
    F: FnMut(&mut VectorState) + Send + 'static,
{
    FnWorkload::new(VectorState::new(len), move |s| {
        execute(s);
        Ok(())
    })
    .with_prepare(|s| {
        s.reset();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanebench_core::{Runner, RunnerConfig, YieldPolicy};

    fn small() -> KernelConfig {
        KernelConfig {
            vector_len: 256,
            matrix_iterations: 10,
            image_width: 16,
            image_height: 12,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(KernelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let bad_len = KernelConfig {
            vector_len: 10,
            ..small()
        };
        assert_eq!(bad_len.validate(), Err(KernelError::VectorLength(10)));

        let no_iter = KernelConfig {
            matrix_iterations: 0,
            ..small()
        };
        assert_eq!(no_iter.validate(), Err(KernelError::NoIterations));

        let tiny = KernelConfig {
            image_width: 2,
            ..small()
        };
        assert!(matches!(
            tiny.validate(),
            Err(KernelError::ImageTooSmall { width: 2, .. })
        ));
    }

    #[test]
    fn test_register_suite() {
        let mut registry = Registry::with_replication(3);
        register_suite(&mut registry, &small()).unwrap();

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.total_trials(), 24);
        for group in GROUPS {
            for kind in [KIND_SCALAR, KIND_SIMD] {
                assert!(
                    registry
                        .registrations()
                        .iter()
                        .any(|r| r.group() == group && r.kind() == kind),
                    "{group}/{kind} missing"
                );
            }
        }
    }

    #[test]
    fn test_register_rejects_invalid_config() {
        let mut registry = Registry::new();
        let config = KernelConfig {
            vector_len: 6,
            ..small()
        };
        assert!(register_suite(&mut registry, &config).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_suite_runs_to_completion() {
        let mut registry = Registry::with_replication(2);
        register_suite(&mut registry, &small()).unwrap();

        let config = RunnerConfig {
            seed: Some(11),
            yield_policy: YieldPolicy::None,
            ..Default::default()
        };
        let outcome = Runner::new(registry, config).run().unwrap();

        assert_eq!(outcome.statistics.len(), 8);
        for (_, _, stat) in outcome.statistics.iter() {
            assert_eq!(stat.sample_count, 6);
            assert!(stat.mean >= 0.0);
        }
    }
}
