//! Perceptual image comparison.
//!
//! Computes root-mean-squared error over all RGBA channels (normalized to
//! [0,1], so 0 = identical and 1 = the metric ceiling). Threshold decisions
//! belong to the caller; this module only measures. Anything that prevents a
//! measurement (unreadable file, mismatched geometry) fails closed as an
//! unconditional difference rather than an error.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Decoded, same geometry, zero distortion.
    Match,
    /// Decoded, same geometry, nonzero RMSE distortion.
    Distortion(f64),
    /// Geometry differs; the metric is meaningless and was not computed.
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },
    /// One side failed to decode. Could not verify, assume broken.
    Unreadable { path: PathBuf },
}

impl Comparison {
    /// Strict inequality-to-zero flag; tolerance is the caller's business.
    pub fn is_different(&self) -> bool {
        !matches!(self, Comparison::Match)
    }

    /// Measured distortion, with the fail-closed arms pinned to the metric
    /// ceiling so they always read as maximum severity.
    pub fn distortion(&self) -> f64 {
        match self {
            Comparison::Match => 0.0,
            Comparison::Distortion(d) => *d,
            Comparison::DimensionMismatch { .. } | Comparison::Unreadable { .. } => 1.0,
        }
    }

    /// Whether this comparison should fail a run at the given tolerance.
    pub fn exceeds(&self, tolerance: f64) -> bool {
        match self {
            Comparison::Match => false,
            Comparison::Distortion(d) => *d > tolerance,
            Comparison::DimensionMismatch { .. } | Comparison::Unreadable { .. } => true,
        }
    }
}

/// Compare two images on disk. Decoded pixel data lives only for the duration
/// of the call.
pub fn compare(path_a: &Path, path_b: &Path) -> Comparison {
    let left = match load_rgba(path_a) {
        Some(img) => img,
        None => {
            return Comparison::Unreadable {
                path: path_a.to_path_buf(),
            }
        }
    };
    let right = match load_rgba(path_b) {
        Some(img) => img,
        None => {
            return Comparison::Unreadable {
                path: path_b.to_path_buf(),
            }
        }
    };

    if left.dimensions() != right.dimensions() {
        return Comparison::DimensionMismatch {
            left: left.dimensions(),
            right: right.dimensions(),
        };
    }

    let distortion = rmse(&left, &right);
    if distortion == 0.0 {
        Comparison::Match
    } else {
        Comparison::Distortion(distortion)
    }
}

fn load_rgba(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            debug!("decode failed for {}: {e}", path.display());
            None
        }
    }
}

fn rmse(a: &RgbaImage, b: &RgbaImage) -> f64 {
    let mut sum = 0.0f64;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        for c in 0..4 {
            let d = (f64::from(pa.0[c]) - f64::from(pb.0[c])) / 255.0;
            sum += d * d;
        }
    }
    let samples = f64::from(a.width()) * f64::from(a.height()) * 4.0;
    (sum / samples).sqrt()
}
