//! Pixel <-> genomic coordinate mapping.
//!
//! The mapper is a set of pure functions over a [`PixelFrame`] (where a plot
//! sits on the canvas) and a [`GenomicRegion`] (what span it displays).
//! `GenomicRegion` guarantees a non-zero width at construction, so the
//! division by the span width here can never hit zero.

use crate::types::{GenomicPos, GenomicRegion};

/// The horizontal pixel extent a region is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFrame {
    pub origin: f64,
    pub width: f64,
}

impl PixelFrame {
    pub fn new(origin: f64, width: f64) -> PixelFrame {
        PixelFrame { origin, width }
    }
}

/// Map a base-pair position into pixel space.
pub fn to_pixel(region: &GenomicRegion, pos: GenomicPos, frame: &PixelFrame) -> f64 {
    let offset = pos as f64 - region.start as f64;
    frame.origin + frame.width * offset / region.width() as f64
}

/// Map a pixel back to a base-pair position, floored to an integer.
///
/// Inverse of [`to_pixel`] up to one pixel's worth of floor rounding.
/// Pixels left of the region's start clamp to position 0.
pub fn to_genomic(region: &GenomicRegion, pixel: f64, frame: &PixelFrame) -> GenomicPos {
    let offset = (pixel - frame.origin) * region.width() as f64 / frame.width;
    (region.start as f64 + offset).floor().max(0.0) as GenomicPos
}

/// Pixels per base pair at the current zoom, the factor that converts a
/// pixel drag distance into a pan offset.
pub fn scale(region: &GenomicRegion, frame: &PixelFrame) -> f64 {
    frame.width / region.width() as f64
}
