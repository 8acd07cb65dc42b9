use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use polymerge::combinator::CombineOutcome;
use polymerge::config::{FileConfig, MapConfig};
use polymerge::feature::write_collection;
use polymerge::files::FileList;
use polymerge::view::MapView;

/// Select polygons from a GeoJSON feature collection and merge them
///
/// Examples:
///   # Show the map summary and controls for a file
///   polymerge show fields.geojson --select 0,2
///
///   # Export the map scene (tiles, viewport, styled overlays) as JSON
///   polymerge show fields.geojson --read-only -o scene.json
///
///   # Union polygons 0, 1 and 3, writing fields.merged.geojson
///   polymerge union fields.geojson --select 0,1,3
///
///   # Intersect two polygons into a specific file
///   polymerge intersect fields.geojson --select 4,5 -o overlap.geojson
#[derive(Parser, Debug)]
#[command(name = "polymerge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (optional, auto-searches polymerge.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the map summary, optionally writing the render scene as JSON
    Show(ShowArgs),
    /// Replace the selected polygons with their union
    Union(CombineArgs),
    /// Replace the selected polygons with their intersection
    Intersect(CombineArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Input GeoJSON feature collection
    input: PathBuf,

    /// Comma-separated polygon indices to select
    #[arg(short = 's', long, value_delimiter = ',')]
    select: Vec<usize>,

    /// Render without Union/Intersect controls
    #[arg(long)]
    read_only: bool,

    /// Write the map scene as JSON to this path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CombineArgs {
    /// Input GeoJSON feature collection
    input: PathBuf,

    /// Comma-separated polygon indices to combine (at least two)
    #[arg(short = 's', long, value_delimiter = ',', required = true)]
    select: Vec<usize>,

    /// Output GeoJSON path (defaults to {input}.merged.geojson)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Union,
    Intersect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (file_config, config_errors) = if let Some(ref config_path) = cli.config {
        if config_path.exists() {
            let config = FileConfig::from_path(config_path)
                .context(format!("Failed to load config file: {:?}", config_path))?;
            (Some(config), Vec::new())
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = cli.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    init_logging(verbose);
    for e in &config_errors {
        log::warn!("{:#}", e);
    }

    let map_config = file_config
        .as_ref()
        .map(|c| c.map.clone())
        .unwrap_or_default();
    let output_dir = file_config.as_ref().and_then(|c| c.output_dir.clone());

    match cli.command {
        Command::Show(args) => show(args, map_config),
        Command::Union(args) => run_combine(Action::Union, args, map_config, output_dir),
        Command::Intersect(args) => run_combine(Action::Intersect, args, map_config, output_dir),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn show(args: ShowArgs, map_config: MapConfig) -> Result<()> {
    let mut files = FileList::new();
    let entry = files
        .open(&args.input)
        .context(format!("Failed to read {}", args.input.display()))?;
    let filename = entry.filename.clone();
    let collection = entry.collection.clone();

    let mut view = if args.read_only {
        MapView::read_only(collection, map_config)
    } else {
        MapView::read_write(&filename, collection, map_config)
    }
    .context("Failed to load polygons")?;

    for &index in &args.select {
        view.click(index)
            .context(format!("Cannot select polygon {}", index))?;
    }

    let Some(scene) = view.scene() else {
        println!("{}: no polygons to display", filename);
        return Ok(());
    };

    println!("{}", filename);
    println!("  Polygons: {}", scene.overlays.len());
    println!(
        "  Selected: {:?}",
        view.tracker().selected_indices()
    );
    println!(
        "  Center:   ({:.6}, {:.6}) zoom {}",
        scene.center.lat, scene.center.lng, scene.zoom
    );
    println!(
        "  Bounds:   {:.6}..{:.6} lat, {:.6}..{:.6} lng",
        scene.bounds.south, scene.bounds.north, scene.bounds.west, scene.bounds.east
    );
    match scene.controls {
        Some(controls) => println!(
            "  Controls: union {}, intersect {}",
            enabled_label(controls.union_enabled),
            enabled_label(controls.intersect_enabled)
        ),
        None => println!("  Controls: none (read-only)"),
    }

    if let Some(ref output) = args.output {
        let json = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;
        std::fs::write(output, json)
            .context(format!("Failed to write scene file: {}", output.display()))?;
        println!();
        println!("Scene: {}", output.display());
    }

    Ok(())
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn run_combine(
    action: Action,
    args: CombineArgs,
    map_config: MapConfig,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let total_start = Instant::now();

    if args.select.len() < 2 {
        bail!("Select at least two polygons with --select, e.g. --select 0,1");
    }

    let spinner = create_spinner("Loading feature collection...");
    let mut files = FileList::new();
    let entry = files
        .open(&args.input)
        .context(format!("Failed to read {}", args.input.display()))?;
    let filename = entry.filename.clone();
    let collection = entry.collection.clone();

    let mut view = MapView::read_write(&filename, collection, map_config)
        .context("Failed to load polygons")?;
    spinner.finish_with_message(format!(
        "Loaded {} polygons from {}",
        view.tracker().len(),
        filename
    ));

    for &index in &args.select {
        if view.tracker().selected_indices().contains(&index) {
            continue;
        }
        view.click(index)
            .context(format!("Cannot select polygon {}", index))?;
    }

    let label = match action {
        Action::Union => "Computing union...",
        Action::Intersect => "Computing intersection...",
    };
    let spinner = create_spinner(label);
    let start = Instant::now();
    let outcome = match action {
        Action::Union => view.union(&mut files),
        Action::Intersect => view.intersect(&mut files),
    }
    .context("Failed to combine polygons")?;

    match outcome {
        CombineOutcome::Combined { merged_from, .. } => {
            spinner.finish_with_message(format!(
                "Combined {} polygons -> {} remaining [{:.1}s]",
                merged_from,
                view.tracker().len(),
                start.elapsed().as_secs_f32()
            ));
        }
        CombineOutcome::Empty { .. } => {
            spinner.finish_with_message("Result is empty, nothing changed");
            return Ok(());
        }
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, output_dir.as_deref()));

    let updated = files
        .current()
        .map(|e| e.collection.clone())
        .context("Combined collection missing from file list")?;
    write_collection(&output_path, &updated)
        .context(format!("Failed to write {}", output_path.display()))?;

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", output_path.display());

    Ok(())
}

fn default_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "polygons".to_string());
    let name = format!("{}.merged.geojson", stem);

    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
