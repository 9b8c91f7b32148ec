//! Scene composition for the interactive region plot and the per-chromosome
//! overview strips: stacked BAF and log2 panels with their chrome.

use crate::axes::{centered_title, plot_border, rotated_legend, x_axis, y_axis};
use crate::command::{Color, DrawCommand};
use crate::style::{PlotArea, TrackStyle};
use crate::track::render_track;
use covplot_core::{ChromosomeDimension, GenomicRegion, Result, TrackPoint};

/// Geometry of the interactive two-panel plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPlotLayout {
    pub x: f64,
    pub y: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub top_bottom_padding: f64,
    pub title_margin: f64,
    pub legend_margin: f64,
}

impl RegionPlotLayout {
    pub fn new(x: f64, y: f64, plot_width: f64) -> RegionPlotLayout {
        RegionPlotLayout {
            x,
            y,
            plot_width,
            plot_height: 180.0,
            top_bottom_padding: 8.0,
            title_margin: 80.0,
            legend_margin: 45.0,
        }
    }
}

/// Geometry shared by all overview strips. Strips left of `leftmost_point`
/// carry the rotated legends and y labels; the rest stay unlabeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewStripLayout {
    pub y: f64,
    pub plot_height: f64,
    pub top_bottom_padding: f64,
    pub left_right_padding: f64,
    pub title_margin: f64,
    pub legend_margin: f64,
    pub leftmost_point: f64,
}

impl OverviewStripLayout {
    pub fn new(x_start: f64, y: f64) -> OverviewStripLayout {
        OverviewStripLayout {
            y,
            plot_height: 180.0,
            top_bottom_padding: 8.0,
            left_right_padding: 2.0,
            title_margin: 10.0,
            legend_margin: 45.0,
            leftmost_point: x_start + 10.0,
        }
    }
}

fn inset_vertical(area: PlotArea, padding: f64) -> PlotArea {
    PlotArea::new(area.x, area.y + padding, area.width, area.height - 2.0 * padding)
}

/// Compose the interactive region plot: title, legends, x axis and the two
/// stacked track panels.
pub fn region_scene(
    region: &GenomicRegion,
    baf: &[TrackPoint],
    log2: &[TrackPoint],
    layout: &RegionPlotLayout,
) -> Vec<DrawCommand> {
    let baf_style = TrackStyle::baf();
    let log2_style = TrackStyle::log2_interactive();

    let baf_panel = PlotArea::new(layout.x, layout.y, layout.plot_width, layout.plot_height);
    let log2_panel = PlotArea::new(
        layout.x,
        layout.y + layout.plot_height,
        layout.plot_width,
        layout.plot_height,
    );
    let baf_area = inset_vertical(baf_panel, layout.top_bottom_padding);
    let log2_area = inset_vertical(log2_panel, layout.top_bottom_padding);

    let mut scene = Vec::new();
    scene.push(centered_title(
        &format!("Chromosome {}", region.chromosome),
        layout.x + layout.plot_width / 2.0,
        layout.y - layout.title_margin / 2.0,
        15.0,
    ));
    scene.push(rotated_legend(
        "B Allele Freq",
        layout.x - layout.legend_margin,
        layout.y + layout.plot_height / 2.0,
    ));
    scene.push(rotated_legend(
        "Log2 Ratio",
        layout.x - layout.legend_margin,
        layout.y + 1.5 * layout.plot_height,
    ));
    scene.extend(x_axis(region, &baf_area));

    for (panel, area, style, points) in [
        (baf_panel, baf_area, baf_style, baf),
        (log2_panel, log2_area, log2_style, log2),
    ] {
        scene.push(plot_border(&panel));
        scene.extend(y_axis(&area, &style, true));
        scene.extend(render_track(points, region, &area, &style));
    }
    scene
}

/// Compose one chromosome's overview strip inside its layout slot.
pub fn overview_strip_scene(
    dim: &ChromosomeDimension,
    baf: &[TrackPoint],
    log2: &[TrackPoint],
    layout: &OverviewStripLayout,
) -> Result<Vec<DrawCommand>> {
    let region = GenomicRegion::new(dim.chromosome, 0, dim.size_bp.max(1))?;
    let leftmost = dim.x_pos < layout.leftmost_point;

    let baf_style = TrackStyle::baf();
    let log2_style = TrackStyle::log2_overview();

    let baf_panel = PlotArea::new(dim.x_pos, layout.y, dim.width, layout.plot_height);
    let log2_panel = PlotArea::new(
        dim.x_pos,
        layout.y + layout.plot_height,
        dim.width,
        layout.plot_height,
    );
    let data_width = dim.width - 2.0 * layout.left_right_padding;

    let mut scene = Vec::new();
    scene.push(centered_title(
        dim.chromosome.name(),
        dim.x_pos + dim.width / 2.0,
        layout.y - layout.title_margin,
        10.0,
    ));
    if leftmost {
        scene.push(rotated_legend(
            "B Allele Freq",
            dim.x_pos - layout.legend_margin,
            layout.y + layout.plot_height / 2.0,
        ));
        scene.push(rotated_legend(
            "Log2 Ratio",
            dim.x_pos - layout.legend_margin,
            layout.y + 1.5 * layout.plot_height,
        ));
    }

    for (panel, style, points) in [
        (baf_panel, baf_style, baf),
        (log2_panel, log2_style, log2),
    ] {
        let area = PlotArea::new(
            panel.x + layout.left_right_padding,
            panel.y + layout.top_bottom_padding,
            data_width,
            panel.height - 2.0 * layout.top_bottom_padding,
        );
        scene.push(plot_border(&panel));
        scene.extend(y_axis(&area, &style, leftmost));
        scene.extend(render_track(points, &region, &area, &style));
    }
    Ok(scene)
}

/// Marker rectangle projected onto the overview, spanning both panels.
pub fn marker_rect(x: f64, width: f64, layout: &OverviewStripLayout) -> DrawCommand {
    DrawCommand::Rect {
        x,
        y: layout.y,
        width,
        height: 2.0 * layout.plot_height,
        color: Color::new(0xdd, 0x33, 0x33),
        stroke_width: 1.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covplot_core::Chromosome;

    fn sample_points(n: usize) -> Vec<TrackPoint> {
        (0..n).map(|i| TrackPoint::new(i as u64 * 100, 0.4)).collect()
    }

    #[test]
    fn region_scene_has_title_legends_and_panels() {
        let chrom: Chromosome = "7".parse().unwrap();
        let region = GenomicRegion::new(chrom, 0, 10_000).unwrap();
        let layout = RegionPlotLayout::new(100.0, 90.0, 1200.0);
        let scene = region_scene(&region, &sample_points(50), &sample_points(50), &layout);

        let titles: Vec<&str> = scene
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, bold: true, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(titles.contains(&"Chromosome 7"));

        let legends = scene
            .iter()
            .filter(|c| matches!(c, DrawCommand::RotatedText { .. }))
            .count();
        assert_eq!(legends, 2);

        let borders = scene
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(borders, 2);
    }

    #[test]
    fn overview_strip_legends_only_leftmost() {
        let layout = OverviewStripLayout::new(20.0, 40.0);
        let leftmost = ChromosomeDimension {
            chromosome: "1".parse().unwrap(),
            size_bp: 1000,
            x_pos: 20.0,
            width: 120.0,
        };
        let inner = ChromosomeDimension {
            chromosome: "2".parse().unwrap(),
            size_bp: 1000,
            x_pos: 150.0,
            width: 120.0,
        };
        let scene = overview_strip_scene(&leftmost, &sample_points(10), &sample_points(10), &layout)
            .unwrap();
        assert!(scene
            .iter()
            .any(|c| matches!(c, DrawCommand::RotatedText { .. })));

        let scene =
            overview_strip_scene(&inner, &sample_points(10), &sample_points(10), &layout).unwrap();
        assert!(!scene
            .iter()
            .any(|c| matches!(c, DrawCommand::RotatedText { .. })));
        // Unlabeled strips still draw ticks but no y labels.
        assert!(!scene.iter().any(|c| matches!(c, DrawCommand::Text { bold: false, .. })));
    }
}
