//! Density-dependent track rendering.
//!
//! Above [`DENSITY_THRESHOLD`] points, every sample becomes an independent
//! small square: stroking one path through hundreds of thousands of points
//! costs O(n) per frame and draws misleading connections across gaps in the
//! measurements. At or below the threshold a connected polyline shows the
//! trend better than isolated dots.

use crate::command::DrawCommand;
use crate::style::{PlotArea, TrackStyle};
use covplot_core::{to_pixel, GenomicRegion, PixelFrame, TrackPoint};

/// Point count above which a track is drawn as a decimated scatter.
pub const DENSITY_THRESHOLD: usize = 1000;

/// Side length of one scatter square, in pixels.
const POINT_SIZE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Scatter,
    Polyline,
}

impl RenderMode {
    pub fn for_len(len: usize) -> RenderMode {
        if len > DENSITY_THRESHOLD {
            RenderMode::Scatter
        } else {
            RenderMode::Polyline
        }
    }
}

/// Render one track's points inside `area` for the span `region`.
pub fn render_track(
    points: &[TrackPoint],
    region: &GenomicRegion,
    area: &PlotArea,
    style: &TrackStyle,
) -> Vec<DrawCommand> {
    if points.is_empty() {
        return Vec::new();
    }
    let frame = PixelFrame::new(area.x, area.width);
    let project = |point: &TrackPoint| {
        (
            to_pixel(region, point.pos, &frame),
            style.value_to_y(point.value, area),
        )
    };

    match RenderMode::for_len(points.len()) {
        RenderMode::Scatter => points
            .iter()
            .map(|point| {
                let (x, y) = project(point);
                DrawCommand::FilledRect {
                    x,
                    y,
                    width: POINT_SIZE,
                    height: POINT_SIZE,
                    color: style.color,
                }
            })
            .collect(),
        RenderMode::Polyline => vec![DrawCommand::Polyline {
            points: points.iter().map(|point| project(point)).collect(),
            color: style.color,
            width: 1.0,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covplot_core::Chromosome;

    fn points(n: usize) -> Vec<TrackPoint> {
        (0..n)
            .map(|i| TrackPoint::new(i as u64 * 10, (i % 7) as f64 / 10.0))
            .collect()
    }

    fn setup() -> (GenomicRegion, PlotArea, TrackStyle) {
        let chrom: Chromosome = "1".parse().unwrap();
        (
            GenomicRegion::new(chrom, 0, 100_000).unwrap(),
            PlotArea::new(0.0, 0.0, 1000.0, 180.0),
            TrackStyle::baf(),
        )
    }

    #[test]
    fn mode_boundary_is_exact_at_threshold() {
        assert_eq!(RenderMode::for_len(DENSITY_THRESHOLD), RenderMode::Polyline);
        assert_eq!(RenderMode::for_len(DENSITY_THRESHOLD + 1), RenderMode::Scatter);
    }

    #[test]
    fn sparse_track_renders_one_polyline() {
        let (region, area, style) = setup();
        let commands = render_track(&points(1000), &region, &area, &style);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawCommand::Polyline { points, .. } => assert_eq!(points.len(), 1000),
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn dense_track_renders_squares() {
        let (region, area, style) = setup();
        let commands = render_track(&points(1001), &region, &area, &style);
        assert_eq!(commands.len(), 1001);
        assert!(commands
            .iter()
            .all(|command| matches!(command, DrawCommand::FilledRect { .. })));
    }

    #[test]
    fn empty_track_renders_nothing() {
        let (region, area, style) = setup();
        assert!(render_track(&[], &region, &area, &style).is_empty());
    }

    #[test]
    fn points_project_into_the_area() {
        let (region, area, style) = setup();
        let track = vec![TrackPoint::new(50_000, 0.5)];
        match &render_track(&track, &region, &area, &style)[0] {
            DrawCommand::Polyline { points, .. } => {
                assert_eq!(points[0], (500.0, 90.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
