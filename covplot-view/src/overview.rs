//! Full-genome overview: gesture resolution, marker overlay and the
//! 24-strip composite.

use crate::fetch::{CoverageRequest, CoverageResponse, FetchParams, Result};
use covplot_core::{ChromosomeLayoutTable, Chromosome, GenomicPos, GenomicRegion};
use covplot_render::{overview_strip_scene, DrawCommand, OverviewStripLayout, TrackStyle};

/// The interactive region projected onto the overview layout. Derived and
/// recomputable; never mutated independently of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerOverlay {
    pub chromosome: Chromosome,
    pub x: f64,
    pub width: f64,
}

/// Progress of the per-chromosome strip fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeProgress {
    Pending { completed: usize },
    Complete,
}

pub struct OverviewController {
    layout: ChromosomeLayoutTable,
    strip_layout: OverviewStripLayout,
    params: FetchParams,
    press_pixel: Option<f64>,
    completed: usize,
    scene: Vec<DrawCommand>,
}

impl OverviewController {
    pub fn new(
        layout: ChromosomeLayoutTable,
        strip_layout: OverviewStripLayout,
        params: FetchParams,
    ) -> OverviewController {
        OverviewController {
            layout,
            strip_layout,
            params,
            press_pixel: None,
            completed: 0,
            scene: Vec::new(),
        }
    }

    pub fn layout(&self) -> &ChromosomeLayoutTable {
        &self.layout
    }

    /// One coverage request per chromosome, issued independently and in any
    /// order; completions are counted, not sequenced.
    pub fn strip_requests(&self) -> Vec<CoverageRequest> {
        let baf = TrackStyle::baf();
        let log2 = TrackStyle::log2_overview();
        self.layout
            .iter()
            .map(|dim| CoverageRequest {
                region: format!("{}:0-None", dim.chromosome),
                sample_name: self.params.sample_name.clone(),
                hg_type: self.params.hg_type.clone(),
                hg_filedir: self.params.hg_filedir.clone(),
                xpos: dim.x_pos + self.strip_layout.left_right_padding,
                ypos: self.strip_layout.y,
                plot_height: self.strip_layout.plot_height,
                extra_plot_width: 0.0,
                top_bottom_padding: self.strip_layout.top_bottom_padding,
                x_ampl: dim.width - 2.0 * self.strip_layout.left_right_padding,
                baf_y_start: baf.y_start,
                baf_y_end: baf.y_end,
                log2_y_start: log2.y_start,
                log2_y_end: log2.y_end,
                overview: Some(true),
            })
            .collect()
    }

    /// Record one finished strip fetch and add its panels to the pending
    /// composite.
    pub fn strip_completed(&mut self, response: &CoverageResponse) -> Result<CompositeProgress> {
        let dim = self.layout.dimension_of(response.chrom).clone();
        let strip = overview_strip_scene(
            &dim,
            &response.baf_points(),
            &response.coverage_points(),
            &self.strip_layout,
        )?;
        self.scene.extend(strip);
        self.completed += 1;
        Ok(self.progress())
    }

    /// A failed strip still advances the counter so the composite is never
    /// blocked on a missing chromosome; the strip stays blank.
    pub fn strip_failed(&mut self, chromosome: Chromosome) -> CompositeProgress {
        log::warn!("overview data for chromosome {chromosome} not available");
        self.completed += 1;
        self.progress()
    }

    fn progress(&self) -> CompositeProgress {
        if self.completed >= Chromosome::COUNT {
            CompositeProgress::Complete
        } else {
            CompositeProgress::Pending {
                completed: self.completed,
            }
        }
    }

    /// Take the finished composite for rendering. The accumulated scene and
    /// the counter reset, ready for the next full pass.
    pub fn take_composite(&mut self) -> Option<Vec<DrawCommand>> {
        if self.completed < Chromosome::COUNT {
            return None;
        }
        self.completed = 0;
        Some(std::mem::take(&mut self.scene))
    }

    /// Pointer-down on the overview starts a select gesture.
    pub fn press(&mut self, pixel: f64) {
        if self.press_pixel.is_none() {
            self.press_pixel = Some(pixel);
        }
    }

    /// Pointer-up resolves the gesture into a region for the interactive
    /// view. A pixel in an inter-chromosome gap snaps to the nearest slot
    /// edge rather than failing.
    pub fn release(&mut self, pixel: f64) -> Option<GenomicRegion> {
        let press_pixel = self.press_pixel.take()?;
        let (start_chrom, start_pos) = self.layout.locate_clamped(press_pixel);
        let (end_chrom, end_pos) = self.layout.locate_clamped(pixel);

        let resolved = if start_chrom == end_chrom {
            if start_pos != end_pos {
                GenomicRegion::new(start_chrom, start_pos, end_pos)
            } else {
                // A click, not a drag: show the whole chromosome.
                let size = self.layout.dimension_of(start_chrom).size_bp;
                GenomicRegion::new(start_chrom, 0, size.saturating_sub(1))
            }
        } else if end_chrom > start_chrom {
            // The drag left the chromosome; keep the side of the start
            // chromosome it covered and discard the rest.
            let size = self.layout.dimension_of(start_chrom).size_bp;
            GenomicRegion::new(start_chrom, start_pos, size.saturating_sub(1))
        } else {
            GenomicRegion::new(start_chrom, 0, start_pos)
        };

        match resolved {
            Ok(region) => Some(region),
            Err(err) => {
                log::warn!("selection resolved to an unusable region: {err}");
                None
            }
        }
    }

    /// Project a region onto the overview layout. Sub-pixel regions keep a
    /// minimum visible width of 2 so the marker stays clickable; the half
    /// pixel nudge centers the rectangle on the slot border.
    pub fn marker_for(&self, region: &GenomicRegion) -> MarkerOverlay {
        let dim = self.layout.dimension_of(region.chromosome);
        let scale = dim.width / dim.size_bp as f64;
        let span = (region.end - region.start) as f64 * scale;
        let (x, width) = if span < 2.0 {
            (1.0 + dim.x_pos + region.start as f64 * scale, 2.0)
        } else {
            (
                1.5 + dim.x_pos + region.start as f64 * scale,
                (span.ceil() - 1.0).max(2.0),
            )
        };
        MarkerOverlay {
            chromosome: region.chromosome,
            x,
            width,
        }
    }

    /// Base-pair position under an overview pixel, for hit testing.
    pub fn locate(&self, pixel: f64) -> covplot_core::Result<(Chromosome, GenomicPos)> {
        self.layout.locate(pixel)
    }
}
