//! Interactive single-chromosome viewport.
//!
//! The controller is a state machine over Idle / Dragging / Loading. Redraws
//! are split into explicit transitions so they stay independent of any I/O
//! mechanism: `begin_redraw` emits the backend request and arms the
//! in-flight guard, `complete_redraw`/`fail_redraw` release it. While
//! Loading, further navigation is dropped, not queued — at most one redraw
//! is ever in flight, which is what keeps late completions from racing.

use crate::fetch::{CoverageRequest, CoverageResponse, FetchParams, Result};
use covplot_core::{scale, ChromosomeLayoutTable, Chromosome, GenomicRegion, PixelFrame};
use covplot_render::{region_scene, DrawCommand, RegionPlotLayout, TrackStyle};

/// Fraction of the visible span the navigation keys pan by.
pub const PAN_FRACTION: f64 = 0.1;

/// Pixel bounds for the current drag, derived at drag-start from how far
/// the region sits from the chromosome's 0 and max-length edges. Never
/// cached across region changes: the scale factor moves with the region.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MaxDrag {
    up: f64,
    down: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub start_pixel: f64,
    pub current_pixel: f64,
    max_drag: MaxDrag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging(DragGesture),
    Loading,
}

/// Result of a completed redraw: the adopted region (to forward to the
/// overview marker) and the composed scene.
#[derive(Debug, Clone)]
pub struct RegionUpdate {
    pub region: GenomicRegion,
    pub scene: Vec<DrawCommand>,
}

pub struct ViewportController {
    region: GenomicRegion,
    layout: ChromosomeLayoutTable,
    plot: RegionPlotLayout,
    params: FetchParams,
    state: State,
}

impl ViewportController {
    pub fn new(
        region: GenomicRegion,
        layout: ChromosomeLayoutTable,
        plot: RegionPlotLayout,
        params: FetchParams,
    ) -> ViewportController {
        ViewportController {
            region,
            layout,
            plot,
            params,
            state: State::Idle,
        }
    }

    pub fn region(&self) -> GenomicRegion {
        self.region
    }

    pub fn is_loading(&self) -> bool {
        self.state == State::Loading
    }

    fn frame(&self) -> PixelFrame {
        PixelFrame::new(self.plot.x, self.plot.plot_width)
    }

    /// Extra pixel width of edge data requested beyond the visible span, so
    /// a drag has pre-rendered margin on both sides.
    pub fn extra_width(&self) -> f64 {
        self.plot.plot_width / 1.5
    }

    /// The base-pair span the backend will actually return for the current
    /// region: the visible span widened by `extra_width` on each side,
    /// clamped at position 0.
    pub fn fetch_span(&self) -> (u64, u64) {
        let per_pixel = self.region.width() as f64 / self.plot.plot_width;
        let extra = (self.extra_width() * per_pixel) as u64;
        (
            self.region.start.saturating_sub(extra),
            self.region.end + extra,
        )
    }

    /// Arm the redraw guard and emit the backend request. Returns `None`
    /// while a redraw is already in flight; the caller drops the attempt.
    pub fn begin_redraw(&mut self) -> Option<CoverageRequest> {
        if self.state != State::Idle {
            log::debug!("redraw dropped, another one is in flight");
            return None;
        }
        self.state = State::Loading;
        let baf = TrackStyle::baf();
        let log2 = TrackStyle::log2_interactive();
        Some(CoverageRequest {
            region: self.region.to_string(),
            sample_name: self.params.sample_name.clone(),
            hg_type: self.params.hg_type.clone(),
            hg_filedir: self.params.hg_filedir.clone(),
            xpos: self.extra_width(),
            ypos: self.plot.y,
            plot_height: self.plot.plot_height,
            extra_plot_width: self.extra_width(),
            top_bottom_padding: self.plot.top_bottom_padding,
            x_ampl: self.plot.plot_width,
            baf_y_start: baf.y_start,
            baf_y_end: baf.y_end,
            log2_y_start: log2.y_start,
            log2_y_end: log2.y_end,
            overview: None,
        })
    }

    /// Apply a fetched result: adopt the returned span as the new region
    /// and compose the scene. Releases the guard unconditionally, even when
    /// the response turns out to be unusable.
    pub fn complete_redraw(&mut self, response: &CoverageResponse) -> Result<RegionUpdate> {
        self.state = State::Idle;
        let region = GenomicRegion::new(response.chrom, response.start, response.end)?;
        self.region = region;
        let scene = region_scene(
            &region,
            &response.baf_points(),
            &response.coverage_points(),
            &self.plot,
        );
        Ok(RegionUpdate { region, scene })
    }

    /// Release the guard after a failed fetch, retaining the last good view.
    pub fn fail_redraw(&mut self) {
        log::warn!("coverage fetch failed, keeping {}", self.region);
        self.state = State::Idle;
    }

    /// Shift the visible span by `fraction` of its width (negative pans
    /// left). No-op while a redraw is in flight.
    pub fn pan(&mut self, fraction: f64) -> Option<CoverageRequest> {
        if self.state != State::Idle {
            return None;
        }
        let magnitude = (fraction.abs() * self.region.width() as f64).floor() as i64;
        let shift = if fraction < 0.0 { -magnitude } else { magnitude };
        self.shift_region(shift);
        self.begin_redraw()
    }

    /// Shrink the span by a quarter from each edge. Zooming in on a window
    /// already at the 1 bp minimum is a no-op.
    pub fn zoom_in(&mut self) -> Option<CoverageRequest> {
        if self.state != State::Idle {
            return None;
        }
        let step = (self.region.width() as f64 * 0.25).floor() as u64;
        let start = self.region.start + step;
        let end = self.region.end - step;
        if end > start {
            self.region = GenomicRegion {
                start,
                end,
                ..self.region
            };
        }
        self.begin_redraw()
    }

    /// Expand the span by half its width on each edge, clamping the start
    /// to >= 1 rather than letting it go negative.
    pub fn zoom_out(&mut self) -> Option<CoverageRequest> {
        if self.state != State::Idle {
            return None;
        }
        let step = (self.region.width() as f64 * 0.5).floor() as u64;
        let start = if step > self.region.start {
            1
        } else {
            self.region.start - step
        };
        self.region = GenomicRegion {
            start,
            end: self.region.end + step,
            ..self.region
        };
        self.begin_redraw()
    }

    /// Replace the region with the target chromosome's full extent.
    pub fn jump_to_chromosome(&mut self, chromosome: Chromosome) -> Option<CoverageRequest> {
        if self.state != State::Idle {
            return None;
        }
        let size = self.layout.dimension_of(chromosome).size_bp;
        match GenomicRegion::new(chromosome, 0, size) {
            Ok(region) => {
                self.region = region;
                self.begin_redraw()
            }
            Err(err) => {
                log::warn!("cannot jump to {chromosome}: {err}");
                None
            }
        }
    }

    pub fn next_chromosome(&mut self) -> Option<CoverageRequest> {
        self.jump_to_chromosome(self.region.chromosome.next())
    }

    pub fn prev_chromosome(&mut self) -> Option<CoverageRequest> {
        self.jump_to_chromosome(self.region.chromosome.prev())
    }

    /// Begin a drag-to-pan gesture. The drag bounds are derived here, from
    /// the current scale, so the gesture can never scroll past either
    /// chromosome edge.
    pub fn drag_start(&mut self, pixel: f64) {
        if self.state != State::Idle {
            return;
        }
        let scale = scale(&self.region, &self.frame());
        let size = self.layout.dimension_of(self.region.chromosome).size_bp;
        let max_drag = MaxDrag {
            up: size.saturating_sub(self.region.end) as f64 * scale,
            down: -(self.region.start as f64) * scale,
        };
        self.state = State::Dragging(DragGesture {
            start_pixel: pixel,
            current_pixel: pixel,
            max_drag,
        });
    }

    /// Track pointer movement during a drag. Returns the clamped pixel
    /// offset the cached image should be shifted by while waiting for the
    /// next fetch.
    pub fn drag_move(&mut self, pixel: f64) -> Option<f64> {
        match &mut self.state {
            State::Dragging(gesture) => {
                gesture.current_pixel = clamp_drag(gesture.start_pixel, pixel, gesture.max_drag);
                Some(gesture.current_pixel - gesture.start_pixel)
            }
            _ => None,
        }
    }

    /// Finish the drag: convert the pixel delta into a base-pair pan offset
    /// and kick off the redraw.
    pub fn drag_end(&mut self, pixel: f64) -> Option<CoverageRequest> {
        let gesture = match self.state {
            State::Dragging(gesture) => gesture,
            _ => return None,
        };
        self.state = State::Idle;
        let end_pixel = clamp_drag(gesture.start_pixel, pixel, gesture.max_drag);
        let scale = scale(&self.region, &self.frame());
        let shift = ((gesture.start_pixel - end_pixel) / scale).floor() as i64;
        self.shift_region(shift);
        self.begin_redraw()
    }

    /// Apply a signed base-pair shift, clamped so the region never starts
    /// below position 0 (the width is preserved).
    fn shift_region(&mut self, shift: i64) {
        let mut shift = shift;
        let start = self.region.start as i64;
        if start + shift < 0 {
            shift = -start;
        }
        self.region = GenomicRegion {
            start: (start + shift) as u64,
            end: (self.region.end as i64 + shift) as u64,
            ..self.region
        };
    }
}

fn clamp_drag(start_pixel: f64, pixel: f64, max_drag: MaxDrag) -> f64 {
    let dist = start_pixel - pixel;
    if dist < max_drag.down {
        start_pixel - max_drag.down
    } else if dist > max_drag.up {
        start_pixel - max_drag.up
    } else {
        pixel
    }
}
