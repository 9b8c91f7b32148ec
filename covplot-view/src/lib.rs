/*!
# covplot View Controllers

State machines behind the three coordinated views: the zoomable interactive
region plot, the full-genome overview with its selection gesture and marker
overlay, and the keyboard navigation router. Each controller owns its view
state exclusively; cross-controller effects travel through explicit calls
(a completed interactive redraw hands its region to the overview marker),
never through shared mutable state.

All fetch I/O sits behind [`CoverageSource`]; the controllers only emit
requests and apply responses, so they run the same under a real backend,
a recorded-response file source or an in-memory test mock.
*/

pub mod fetch;
pub mod field;
pub mod keys;
pub mod overview;
pub mod viewport;

pub use fetch::{
    ChromDim, ChromDimsRequest, ChromDimsResponse, CoverageRequest, CoverageResponse,
    CoverageSource, FetchParams, ViewError,
};
pub use field::{RegionField, ERROR_REVERT_DELAY};
pub use keys::{Key, NavAction, NavigationKeyRouter, KEYSTROKE_DELAY};
pub use overview::{CompositeProgress, MarkerOverlay, OverviewController};
pub use viewport::{DragGesture, RegionUpdate, ViewportController, PAN_FRACTION};
