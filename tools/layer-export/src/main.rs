use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use trip_viz_core::config::ViewerConfig;
use trip_viz_core::map::HeadlessMap;
use trip_viz_core::resource::AnyFetcher;
use trip_viz_core::ui::{HeadlessUi, UiEvent};
use trip_viz_core::viewer::{BUS_ROUTE_LAYER, BUS_STOP_LAYER, RAIL_ROUTE_LAYER, RAIL_STOP_LAYER};
use trip_viz_core::Viewer;

mod output;

use output::{write_layers, write_view};

const FACILITY_LAYERS: [&str; 4] = [BUS_STOP_LAYER, RAIL_STOP_LAYER, BUS_ROUTE_LAYER, RAIL_ROUTE_LAYER];

#[derive(Parser, Debug)]
#[command(
    name = "layer-export",
    author,
    version,
    about = "Export the trip-visualization map layers as GeoJSON",
    long_about = "Loads stops, routes and trip samples (and linked trips for the \
                  origin_destination variant), renders them exactly as the map page would, \
                  and writes every visible layer group to its own GeoJSON file together \
                  with a view.json describing the fitted view and the active basemap."
)]
struct Args {
    /// Viewer config JSON; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory (or URL) relative data paths are resolved against
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Output directory for the exported layers
    #[arg(short, long)]
    output: PathBuf,

    /// Facility layer to show; repeat for several. All four are shown when omitted
    #[arg(short, long = "layer")]
    layers: Vec<String>,

    /// Basemap to switch to after loading
    #[arg(short, long)]
    basemap: Option<String>,

    /// Sample to draw, numbered from 1 as in the sample list
    #[arg(short, long)]
    sample: Option<usize>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

/// Checkboxes for every facility layer plus any unknown names asked for, which
/// the viewer warns about and skips.
fn checkboxes(requested: &[String]) -> HeadlessUi {
    let mut ui = HeadlessUi::new();
    for layer in FACILITY_LAYERS {
        let checked = requested.is_empty() || requested.iter().any(|r| r == layer);
        ui = ui.with_checkbox(layer, checked);
    }
    for layer in requested.iter().filter(|r| !FACILITY_LAYERS.contains(&r.as_str())) {
        ui = ui.with_checkbox(layer.as_str(), true);
    }
    ui
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
        .init();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_path(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(base) = &args.data_dir {
        config.data.base = base.clone();
    }

    tracing::info!(variant = ?config.variant, output = %args.output.display(), "exporting layers");

    let mut viewer = Viewer::new(config, HeadlessMap::new(), checkboxes(&args.layers))
        .context("Failed to set up the viewer")?;

    let report = viewer
        .initialize(&AnyFetcher::new())
        .await
        .context("Failed to initialize the viewer")?;
    if report.is_complete() {
        tracing::info!("{}", report.summary());
    } else {
        tracing::warn!("{} ({} datasets failed)", report.summary(), report.failures.len());
    }

    if let Some(name) = args.basemap {
        viewer
            .handle(UiEvent::BasemapRequested(name))
            .context("Failed to switch basemap")?;
    }

    if let Some(number) = args.sample {
        let index = number
            .checked_sub(1)
            .context("Samples are numbered from 1")?;
        viewer
            .handle(UiEvent::SampleClicked(index))
            .with_context(|| format!("Failed to select sample {number}"))?;
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let written = write_layers(viewer.map(), &args.output)?;
    write_view(viewer.map(), &args.output.join("view.json"))?;

    tracing::info!(layers = written, "done");
    Ok(())
}
