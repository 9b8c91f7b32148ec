//! End-to-end controller flow against an in-memory backend: overview
//! gesture -> region -> interactive fetch -> scene -> marker refresh.

use covplot_core::{parse_region_str, Chromosome, GenomicRegion};
use covplot_render::{OverviewStripLayout, RegionPlotLayout};
use covplot_view::{
    ChromDim, ChromDimsRequest, ChromDimsResponse, CoverageRequest, CoverageResponse,
    CoverageSource, FetchParams, NavAction, OverviewController, ViewportController,
};
use std::collections::BTreeMap;

const CHROM_SIZE: u64 = 100_000;

/// Backend stub: every chromosome is 100 kbp with synthetic tracks.
struct MockSource;

impl CoverageSource for MockSource {
    fn chrom_dims(
        &self,
        request: &ChromDimsRequest,
    ) -> Result<ChromDimsResponse, covplot_view::ViewError> {
        let slot = request.full_plot_width / Chromosome::COUNT as f64;
        let chrom_dims: BTreeMap<Chromosome, ChromDim> = Chromosome::all()
            .map(|chrom| {
                (
                    chrom,
                    ChromDim {
                        size: CHROM_SIZE,
                        x_pos: request.x_pos + chrom.index() as f64 * slot,
                        y_pos: request.y_pos,
                        width: slot - 4.0,
                    },
                )
            })
            .collect();
        Ok(ChromDimsResponse { chrom_dims })
    }

    fn coverage(
        &self,
        request: &CoverageRequest,
    ) -> Result<CoverageResponse, covplot_view::ViewError> {
        let query = parse_region_str(&request.region)
            .map_err(|err| covplot_view::ViewError::Fetch(err.to_string()))?;
        let start = query.start;
        let end = query.end.unwrap_or(CHROM_SIZE);
        let step = ((end - start) / 200).max(1);
        let rows: Vec<[f64; 4]> = (start..end)
            .step_by(step as usize)
            .map(|pos| [0.0, pos as f64, 0.0, 0.42])
            .collect();
        Ok(CoverageResponse {
            chrom: query.chromosome,
            start,
            end,
            y_pos: request.ypos,
            baf: rows.clone(),
            data: rows,
        })
    }
}

fn params() -> FetchParams {
    FetchParams {
        sample_name: "sample".to_string(),
        hg_type: "38".to_string(),
        hg_filedir: "/data".to_string(),
    }
}

fn build_controllers() -> (OverviewController, ViewportController) {
    let source = MockSource;
    let dims_request = ChromDimsRequest {
        hg_type: "38".to_string(),
        x_pos: 10.0,
        y_pos: 40.0,
        full_plot_width: 2400.0,
    };
    let layout = source
        .chrom_dims(&dims_request)
        .unwrap()
        .into_layout()
        .unwrap();

    let overview = OverviewController::new(
        layout.clone(),
        OverviewStripLayout::new(10.0, 40.0),
        params(),
    );
    let chrom: Chromosome = "1".parse().unwrap();
    let viewport = ViewportController::new(
        GenomicRegion::new(chrom, 0, CHROM_SIZE).unwrap(),
        layout,
        RegionPlotLayout::new(60.0, 90.0, 1400.0),
        params(),
    );
    (overview, viewport)
}

#[test]
fn overview_selection_drives_the_interactive_view() {
    let source = MockSource;
    let (mut overview, mut viewport) = build_controllers();

    // Drag across the middle half of chromosome 3's slot.
    let dim = overview.layout().dimension_of("3".parse().unwrap()).clone();
    overview.press(dim.x_pos + dim.width * 0.25);
    let region = overview.release(dim.x_pos + dim.width * 0.75).unwrap();
    assert_eq!(region.chromosome.name(), "3");

    // The selection replaces the viewport region and triggers one fetch.
    let request = viewport_set(&mut viewport, region);
    let response = source.coverage(&request).unwrap();
    let update = viewport.complete_redraw(&response).unwrap();
    assert_eq!(update.region.chromosome, region.chromosome);
    assert!(!update.scene.is_empty());

    // The marker reflects the newly adopted region.
    let marker = overview.marker_for(&update.region);
    assert_eq!(marker.chromosome, update.region.chromosome);
    assert!(marker.x >= dim.x_pos);
    assert!(marker.width >= 2.0);
}

/// Point the viewport at `region` and start the follow-up redraw. The
/// controller adopts whatever span a completed response carries, which is
/// exactly how the overview hands a selection over.
fn viewport_set(viewport: &mut ViewportController, region: GenomicRegion) -> CoverageRequest {
    let response = CoverageResponse {
        chrom: region.chromosome,
        start: region.start,
        end: region.end,
        y_pos: 90.0,
        baf: Vec::new(),
        data: Vec::new(),
    };
    viewport.complete_redraw(&response).unwrap();
    viewport.begin_redraw().unwrap()
}

#[test]
fn overview_composite_builds_from_independent_fetches() {
    let source = MockSource;
    let (mut overview, _) = build_controllers();

    let requests = overview.strip_requests();
    assert_eq!(requests.len(), 24);

    // Resolve out of order; completion is a counter, not a sequence.
    let mut progress = None;
    for request in requests.iter().rev() {
        let response = source.coverage(request).unwrap();
        progress = Some(overview.strip_completed(&response).unwrap());
    }
    assert_eq!(progress, Some(covplot_view::CompositeProgress::Complete));
    let scene = overview.take_composite().unwrap();
    assert!(scene.len() > 24 * 2);
}

#[test]
fn navigation_actions_map_onto_viewport_calls() {
    let (_, mut viewport) = build_controllers();
    let actions = [
        NavAction::ZoomIn,
        NavAction::ZoomOut,
        NavAction::PanRight,
        NavAction::PanLeft,
        NavAction::NextChromosome,
        NavAction::PrevChromosome,
    ];
    for action in actions {
        let request = match action {
            NavAction::JumpToChromosome(chrom) => viewport.jump_to_chromosome(chrom),
            NavAction::PrevChromosome => viewport.prev_chromosome(),
            NavAction::NextChromosome => viewport.next_chromosome(),
            NavAction::PanLeft => viewport.pan(-covplot_view::PAN_FRACTION),
            NavAction::PanRight => viewport.pan(covplot_view::PAN_FRACTION),
            NavAction::ZoomIn => viewport.zoom_in(),
            NavAction::ZoomOut => viewport.zoom_out(),
        };
        let request = request.expect("idle viewport accepts navigation");
        assert!(request.region.contains(':'));
        viewport.fail_redraw();
    }
}
