//! Full-genome overview layout.
//!
//! Every chromosome gets a horizontal pixel slot proportional to its length,
//! in canonical order, with a small fixed gap between slots. The table is
//! built once per layout pass and stays immutable while in use.

use crate::error::{Error, Result};
use crate::types::{Chromosome, GenomicPos};
use std::collections::BTreeMap;

/// Width in pixels of the gap separating two chromosome slots.
pub const SLOT_GAP: f64 = 4.0;

/// One chromosome's slot in the overview.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeDimension {
    pub chromosome: Chromosome,
    pub size_bp: u64,
    pub x_pos: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct ChromosomeLayoutTable {
    dims: Vec<ChromosomeDimension>,
}

impl ChromosomeLayoutTable {
    /// Allocate slots across `full_plot_width` pixels from per-chromosome
    /// base-pair sizes. All 24 chromosomes must be present.
    pub fn build(
        sizes: &BTreeMap<Chromosome, u64>,
        x_start: f64,
        full_plot_width: f64,
    ) -> Result<ChromosomeLayoutTable> {
        for chrom in Chromosome::all() {
            if !sizes.contains_key(&chrom) {
                return Err(Error::MissingChromosome(chrom));
            }
        }
        let total_bp: u64 = sizes.values().sum();
        let drawable = full_plot_width - SLOT_GAP * (Chromosome::COUNT - 1) as f64;

        let mut dims = Vec::with_capacity(Chromosome::COUNT);
        let mut x = x_start;
        for chrom in Chromosome::all() {
            let size_bp = sizes[&chrom];
            let width = drawable * size_bp as f64 / total_bp as f64;
            dims.push(ChromosomeDimension {
                chromosome: chrom,
                size_bp,
                x_pos: x,
                width,
            });
            x += width + SLOT_GAP;
        }
        Ok(ChromosomeLayoutTable { dims })
    }

    /// Adopt slots computed elsewhere (the backend's `chrom_dims` table).
    /// Entries are reordered into canonical order; all 24 must be present.
    pub fn from_dimensions(mut dims: Vec<ChromosomeDimension>) -> Result<ChromosomeLayoutTable> {
        dims.sort_by_key(|d| d.chromosome);
        dims.dedup_by_key(|d| d.chromosome);
        for chrom in Chromosome::all() {
            if dims.get(chrom.index()).map(|d| d.chromosome) != Some(chrom) {
                return Err(Error::MissingChromosome(chrom));
            }
        }
        Ok(ChromosomeLayoutTable { dims })
    }

    pub fn dimension_of(&self, chromosome: Chromosome) -> &ChromosomeDimension {
        &self.dims[chromosome.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChromosomeDimension> {
        self.dims.iter()
    }

    /// Find the chromosome whose slot contains `pixel_x` and the base-pair
    /// position the pixel maps to. Pixels in an inter-slot gap or outside
    /// the layout fail with `OutOfLayout`.
    pub fn locate(&self, pixel_x: f64) -> Result<(Chromosome, GenomicPos)> {
        for dim in &self.dims {
            if pixel_x > dim.x_pos && pixel_x < dim.x_pos + dim.width {
                let pos = (dim.size_bp as f64 * (pixel_x - dim.x_pos) / dim.width).floor();
                return Ok((dim.chromosome, pos as GenomicPos));
            }
        }
        Err(Error::OutOfLayout { pixel: pixel_x })
    }

    /// Like [`locate`](Self::locate), but a pixel outside every slot snaps
    /// to the nearest slot edge instead of failing. Gesture paths use this
    /// so a drag ending in a gap still resolves.
    pub fn locate_clamped(&self, pixel_x: f64) -> (Chromosome, GenomicPos) {
        if let Ok(hit) = self.locate(pixel_x) {
            return hit;
        }
        let mut nearest = (self.dims[0].chromosome, 0);
        let mut best = f64::INFINITY;
        for dim in &self.dims {
            let left = (pixel_x - dim.x_pos).abs();
            if left < best {
                best = left;
                nearest = (dim.chromosome, 0);
            }
            let right = (pixel_x - (dim.x_pos + dim.width)).abs();
            if right < best {
                best = right;
                nearest = (dim.chromosome, dim.size_bp.saturating_sub(1));
            }
        }
        nearest
    }
}
