use crate::command::Color;

/// The rectangle a single track panel draws its data into, in canvas
/// pixels. Horizontal placement doubles as the pixel frame for coordinate
/// mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> PlotArea {
        PlotArea {
            x,
            y,
            width,
            height,
        }
    }
}

/// Y-axis scaling and tick configuration for one track.
///
/// `y_start` is the value drawn at the top edge and may be numerically
/// greater than `y_end`; both tracks use that inverted orientation (BAF
/// runs 1.0 down to 0.0, log2 ratio positive-up around 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    pub y_start: f64,
    pub y_end: f64,
    pub step: f64,
    pub color: Color,
}

impl TrackStyle {
    /// B-allele frequency, `[0, 1]` with ticks every 0.2.
    pub fn baf() -> TrackStyle {
        TrackStyle {
            y_start: 1.0,
            y_end: 0.0,
            step: 0.2,
            color: Color::BLACK,
        }
    }

    /// Log2 ratio in the interactive view, clipped to +-4.
    pub fn log2_interactive() -> TrackStyle {
        TrackStyle {
            y_start: 4.0,
            y_end: -4.0,
            step: 1.0,
            color: Color::BLACK,
        }
    }

    /// Log2 ratio in the overview strips, clipped to +-3.
    pub fn log2_overview() -> TrackStyle {
        TrackStyle {
            y_start: 3.0,
            y_end: -3.0,
            step: 1.0,
            color: Color::BLACK,
        }
    }

    /// Map a track value onto the vertical pixel axis of `area`.
    pub fn value_to_y(&self, value: f64, area: &PlotArea) -> f64 {
        area.y + area.height * (self.y_start - value) / (self.y_start - self.y_end)
    }
}
