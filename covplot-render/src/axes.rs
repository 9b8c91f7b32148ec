//! Plot chrome: borders, axes, gridlines, titles and legends.

use crate::command::{Color, DrawCommand, TextAnchor};
use crate::style::{PlotArea, TrackStyle};
use covplot_core::GenomicRegion;

const TICK_LEN: f64 = 6.0;
const BORDER_WIDTH: f64 = 2.0;
const GRID_WIDTH: f64 = 0.2;
const Y_LABEL_SIZE: f64 = 12.0;
const X_LABEL_SIZE: f64 = 9.0;
const LABEL_GAP: f64 = 5.0;

/// Approximate glyph advance as a fraction of the font size; the sinks do
/// not measure text, so collision checks use this estimate.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Bold bounding box around a panel.
pub fn plot_border(area: &PlotArea) -> DrawCommand {
    DrawCommand::Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height,
        color: Color::BORDER,
        stroke_width: BORDER_WIDTH,
    }
}

/// Y-axis ticks from `y_start` down to `y_end` in `step` decrements, each
/// labeled to one decimal place when `labels` is set. Every tick except the
/// first and last also gets a light full-width gridline; those two coincide
/// with the border, which is already drawn bold.
pub fn y_axis(area: &PlotArea, style: &TrackStyle, labels: bool) -> Vec<DrawCommand> {
    let steps = ((style.y_start - style.y_end) / style.step).round().abs() as usize;
    let mut commands = Vec::new();
    for i in 0..=steps {
        let value = style.y_start - i as f64 * style.step;
        let y = style.value_to_y(value, area);

        commands.push(DrawCommand::Line {
            x1: area.x - TICK_LEN / 2.0,
            y1: y,
            x2: area.x + TICK_LEN / 2.0,
            y2: y,
            color: Color::BLACK,
            width: 1.0,
        });

        if i != 0 && i != steps {
            commands.push(DrawCommand::Line {
                x1: area.x,
                y1: y,
                x2: area.x + area.width,
                y2: y,
                color: Color::GRID,
                width: GRID_WIDTH,
            });
        }

        if labels {
            commands.push(DrawCommand::Text {
                x: area.x - 8.0,
                y: y + 4.0,
                text: format!("{value:.1}"),
                size: Y_LABEL_SIZE,
                anchor: TextAnchor::End,
                color: Color::BLACK,
                bold: false,
            });
        }
    }
    commands
}

/// X-axis tick marks and position labels above a panel.
///
/// Tick spacing is the smallest power of ten that keeps the visible span at
/// ~15 ticks or fewer. When even those labels would collide, every other
/// label is skipped, and any label whose left edge would still overrun its
/// predecessor is suppressed.
pub fn x_axis(region: &GenomicRegion, area: &PlotArea) -> Vec<DrawCommand> {
    let span = region.width();
    let mut freq: u64 = 1;
    while span as f64 / freq as f64 > 15.0 {
        freq *= 10;
    }
    let scale = area.width / span as f64;
    let spacing = scale * freq as f64;

    // Width of the widest label decides whether full density fits.
    let widest = label_width(&format_commas(region.end));
    let every_other = spacing < widest + LABEL_GAP;

    let mut commands = Vec::new();
    let mut tick = region.start.div_ceil(freq) * freq;
    let mut counter = 0usize;
    let mut prev_label_x = 0.0;
    while tick < region.end {
        let x = area.x + scale * (tick - region.start) as f64;
        commands.push(DrawCommand::FilledRect {
            x,
            y: area.y - 2.0,
            width: 2.0,
            height: 5.0,
            color: Color::BLACK,
        });
        counter += 1;

        let text = format_commas(tick);
        let width = label_width(&text);
        let label_x = x - width / 2.0;
        if (!every_other || counter % 2 == 0) && (label_x - prev_label_x) > width + LABEL_GAP {
            commands.push(DrawCommand::Text {
                x: label_x,
                y: area.y - 10.0,
                text,
                size: X_LABEL_SIZE,
                anchor: TextAnchor::Start,
                color: Color::BLACK,
                bold: false,
            });
            prev_label_x = label_x;
        }
        tick += freq;
    }
    commands
}

/// Centered title in the margin above a plot.
pub fn centered_title(text: &str, center_x: f64, y: f64, size: f64) -> DrawCommand {
    DrawCommand::Text {
        x: center_x,
        y,
        text: text.to_string(),
        size,
        anchor: TextAnchor::Middle,
        color: Color::BLACK,
        bold: true,
    }
}

/// Rotated y-axis legend left of a panel.
pub fn rotated_legend(text: &str, x: f64, center_y: f64) -> DrawCommand {
    DrawCommand::RotatedText {
        x,
        y: center_y,
        text: text.to_string(),
        size: 18.0,
        color: Color::BLACK,
    }
}

fn label_width(text: &str) -> f64 {
    X_LABEL_SIZE * CHAR_WIDTH_FACTOR * text.len() as f64
}

/// Insert thousands separators: `1234567` -> `"1,234,567"`.
pub fn format_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use covplot_core::Chromosome;

    fn region(start: u64, end: u64) -> GenomicRegion {
        GenomicRegion::new("1".parse::<Chromosome>().unwrap(), start, end).unwrap()
    }

    #[test]
    fn commas_every_three_digits() {
        assert_eq!(format_commas(0), "0");
        assert_eq!(format_commas(999), "999");
        assert_eq!(format_commas(1_000), "1,000");
        assert_eq!(format_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn y_axis_ticks_and_gridlines() {
        let area = PlotArea::new(100.0, 0.0, 500.0, 200.0);
        let commands = y_axis(&area, &TrackStyle::baf(), true);
        // 6 ticks (1.0 down to 0.0 by 0.2), 4 gridlines, 6 labels.
        let ticks = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == Color::BLACK))
            .count();
        let grids = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == Color::GRID))
            .count();
        let labels: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, 6);
        assert_eq!(grids, 4);
        assert_eq!(labels, vec!["1.0", "0.8", "0.6", "0.4", "0.2", "0.0"]);
    }

    #[test]
    fn y_axis_without_labels() {
        let area = PlotArea::new(0.0, 0.0, 100.0, 100.0);
        let commands = y_axis(&area, &TrackStyle::log2_overview(), false);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn x_axis_spacing_keeps_at_most_fifteen_ticks() {
        let area = PlotArea::new(0.0, 50.0, 1000.0, 180.0);
        for span in [150u64, 1_000, 35_000, 2_000_000, 120_000_000] {
            let commands = x_axis(&region(0, span), &area);
            let marks = commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::FilledRect { .. }))
                .count();
            assert!(marks <= 15, "span {span} drew {marks} ticks");
            assert!(marks >= 1, "span {span} drew no ticks");
        }
    }

    #[test]
    fn x_axis_labels_do_not_collide() {
        let area = PlotArea::new(0.0, 50.0, 300.0, 180.0);
        let commands = x_axis(&region(0, 120_000_000), &area);
        let mut last_end = f64::NEG_INFINITY;
        for command in &commands {
            if let DrawCommand::Text { x, text, .. } = command {
                assert!(*x > last_end, "label {text} overlaps its predecessor");
                last_end = x + label_width(text);
            }
        }
    }

    #[test]
    fn x_axis_ticks_align_to_round_positions() {
        let area = PlotArea::new(0.0, 0.0, 1000.0, 180.0);
        let commands = x_axis(&region(12_345, 112_345), &area);
        // First tick lands on the next multiple of the spacing (10 kbp).
        match &commands[0] {
            DrawCommand::FilledRect { x, .. } => {
                let expected = (20_000.0 - 12_345.0) / 100_000.0 * 1000.0;
                assert!((x - expected).abs() < 1e-9);
            }
            other => panic!("expected tick mark, got {other:?}"),
        }
    }
}
