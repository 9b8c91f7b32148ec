/*!
# covplot Rendering Pipeline

Turns track data and viewport state into draw commands, independent of any
particular output surface.

## Architecture

Rendering is split into three stages:
1. **Track decimation**: point series become scatter squares above the
   density threshold or a connected polyline below it
2. **Chrome**: borders, axes, gridlines, titles and legends
3. **Compositing**: the accumulated [`DrawCommand`] list is replayed onto a
   [`Surface`] sink (SVG or PNG)
*/

pub mod axes;
pub mod command;
pub mod plot;
pub mod png;
pub mod style;
pub mod svg;
pub mod track;

pub use command::{Color, DrawCommand, Surface, TextAnchor};
pub use plot::{
    marker_rect, overview_strip_scene, region_scene, OverviewStripLayout, RegionPlotLayout,
};
pub use png::PngSurface;
pub use style::{PlotArea, TrackStyle};
pub use svg::SvgSurface;
pub use track::{render_track, RenderMode, DENSITY_THRESHOLD};
