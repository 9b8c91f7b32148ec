use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use covplot_core::{parse_region_str, GenomicRegion};
use covplot_render::{
    marker_rect, OverviewStripLayout, PngSurface, RegionPlotLayout, Surface, SvgSurface,
};
use covplot_view::{
    ChromDimsRequest, CoverageSource, FetchParams, OverviewController, ViewportController,
};
use std::path::{Path, PathBuf};

mod source;
use source::FileSource;

#[derive(Parser)]
#[command(name = "covplot")]
#[command(about = "covplot - genome-wide BAF and log2 copy-ratio tracks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the interactive-style plot for one region
    Region {
        /// Directory of recorded backend responses
        #[arg(short, long)]
        data: PathBuf,

        /// Region to display, e.g. "1:100000-200000" or "X:0-None"
        #[arg(short, long)]
        region: String,

        /// Sample name reported to the data source
        #[arg(short, long, default_value = "sample")]
        sample_name: String,

        /// Output image file (SVG or PNG)
        #[arg(short, long)]
        output: PathBuf,

        /// Plot width in pixels
        #[arg(long, default_value = "1400")]
        width: u32,
    },

    /// Render the full-genome overview strips
    Overview {
        /// Directory of recorded backend responses
        #[arg(short, long)]
        data: PathBuf,

        /// Sample name reported to the data source
        #[arg(short, long, default_value = "sample")]
        sample_name: String,

        /// Output image file (SVG or PNG)
        #[arg(short, long)]
        output: PathBuf,

        /// Mark a region on the overview, e.g. "3:1000000-2000000"
        #[arg(short, long)]
        mark: Option<String>,

        /// Total layout width in pixels
        #[arg(long, default_value = "2400")]
        width: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Region {
            data,
            region,
            sample_name,
            output,
            width,
        } => cmd_region(data, region, sample_name, output, width),
        Commands::Overview {
            data,
            sample_name,
            output,
            mark,
            width,
        } => cmd_overview(data, sample_name, output, mark, width),
    }
}

fn params(sample_name: String) -> FetchParams {
    FetchParams {
        sample_name,
        hg_type: "38".to_string(),
        hg_filedir: String::new(),
    }
}

fn cmd_region(
    data: PathBuf,
    region: String,
    sample_name: String,
    output: PathBuf,
    width: u32,
) -> Result<()> {
    let source = FileSource::new(&data);
    let layout = load_layout(&source, width as f64)?;

    let query = parse_region_str(&region)?;
    let size = layout.dimension_of(query.chromosome).size_bp;
    let initial = query.into_region(size)?;
    log::info!("Rendering {initial}");

    let plot = RegionPlotLayout::new(60.0, 90.0, width as f64);
    let canvas_width = plot.x + plot.plot_width + 20.0;
    let canvas_height = plot.y + 2.0 * plot.plot_height + 20.0;

    let mut viewport = ViewportController::new(initial, layout, plot, params(sample_name));
    let request = viewport
        .begin_redraw()
        .context("viewport rejected the initial redraw")?;
    let update = match source.coverage(&request) {
        Ok(response) => viewport.complete_redraw(&response)?,
        Err(err) => {
            viewport.fail_redraw();
            return Err(err).context(format!("fetching {region}"));
        }
    };
    log::info!(
        "Fetched {} ({} draw commands)",
        update.region,
        update.scene.len()
    );

    write_scene(&update.scene, canvas_width, canvas_height, &output)
}

fn cmd_overview(
    data: PathBuf,
    sample_name: String,
    output: PathBuf,
    mark: Option<String>,
    width: u32,
) -> Result<()> {
    let source = FileSource::new(&data);
    let layout = load_layout(&source, width as f64)?;

    let strip_layout = OverviewStripLayout::new(60.0, 40.0);
    let canvas_height = strip_layout.y + 2.0 * strip_layout.plot_height + 20.0;
    let canvas_width = width as f64 + 120.0;
    let mut overview = OverviewController::new(layout, strip_layout, params(sample_name));

    for request in overview.strip_requests() {
        match source.coverage(&request) {
            Ok(response) => {
                let progress = overview.strip_completed(&response)?;
                log::debug!("strip {} done ({progress:?})", response.chrom);
            }
            Err(err) => {
                // One blank strip must not block the composite.
                let query = parse_region_str(&request.region)?;
                log::warn!("skipping chromosome {}: {err}", query.chromosome);
                overview.strip_failed(query.chromosome);
            }
        }
    }
    let mut scene = overview
        .take_composite()
        .context("overview composite did not complete")?;

    if let Some(mark) = mark {
        let query = parse_region_str(&mark)?;
        let size = overview.layout().dimension_of(query.chromosome).size_bp;
        let region: GenomicRegion = query.into_region(size)?;
        let marker = overview.marker_for(&region);
        scene.push(marker_rect(marker.x, marker.width, &strip_layout));
        log::info!("Marked {region}");
    }

    write_scene(&scene, canvas_width, canvas_height, &output)
}

fn load_layout(
    source: &FileSource,
    width: f64,
) -> Result<covplot_core::ChromosomeLayoutTable> {
    let request = ChromDimsRequest {
        hg_type: "38".to_string(),
        x_pos: 60.0,
        y_pos: 40.0,
        full_plot_width: width,
    };
    Ok(source.chrom_dims(&request)?.into_layout()?)
}

fn write_scene(
    scene: &[covplot_render::DrawCommand],
    width: f64,
    height: f64,
    output: &Path,
) -> Result<()> {
    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("svg") => {
            let mut surface = SvgSurface::new(width, height);
            surface.draw_all(scene);
            surface.write_to_file(output)?;
        }
        Some("png") => {
            let mut surface = PngSurface::new(width.ceil() as u32, height.ceil() as u32);
            surface.draw_all(scene);
            surface.save(output)?;
        }
        _ => bail!("unsupported output format (use .svg or .png)"),
    }
    log::info!("Wrote {}", output.display());
    Ok(())
}
