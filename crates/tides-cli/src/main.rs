/// Rising-tides driver: loads a terrain (JSON file or synthetic) and answers
/// flooding questions about it. Logs go to stderr, answers to stdout.
mod report;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tides_core::synthetic::{self, SyntheticParams};
use tides_core::{
    elevation_extrema, flood_report, flood_sweep, flooded_regions, height_above_water, is_flooded,
    land_delta, sweep_heights, total_visible_land, GridLocation, Terrain, MAX_SWEEP_STEPS,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tides", about = "Flood a terrain and report what stays above water")]
struct Args {
    /// Terrain JSON file: {"heights": [[..]], "sources": [{"row": r, "col": c}]}
    #[arg(short, long, conflicts_with = "synthetic")]
    terrain: Option<PathBuf>,

    /// Use a generated fBm terrain instead of a file
    #[arg(long)]
    synthetic: bool,

    /// Synthetic terrain rows
    #[arg(long, default_value = "32")]
    rows: usize,

    /// Synthetic terrain columns
    #[arg(long, default_value = "48")]
    cols: usize,

    /// Synthetic terrain seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Synthetic terrain elevation range
    #[arg(long, default_value = "100.0")]
    relief: f64,

    /// Number of water sources on the synthetic terrain's border
    #[arg(long, default_value = "3")]
    sources: usize,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lowest and highest elevation
    Extrema,
    /// Map of flooded cells at a water height
    Flood {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
        /// Print flooded coordinates as JSON instead of a character map
        #[arg(long)]
        json: bool,
    },
    /// Whether one cell is under water, and how far above or below it sits
    Cell {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
        #[arg(long)]
        row: usize,
        #[arg(long)]
        col: usize,
    },
    /// Count of cells above water
    Land {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },
    /// Land lost or gained when the water moves between two heights
    Delta {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
        #[arg(long, allow_negative_numbers = true)]
        new_height: f64,
    },
    /// Number of islands (8-connected dry regions)
    Islands {
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },
    /// JSON flood reports for a range of heights
    Sweep {
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value = "1.0")]
        step: f64,
    },
    /// Write the loaded terrain as JSON
    Dump,
}

#[derive(Serialize)]
struct FloodedCells {
    height: f64,
    flooded: Vec<GridLocation>,
}

// ── Terrain loading ──────────────────────────────────────────────────────────

fn load_terrain(args: &Args) -> Result<Terrain> {
    if let Some(path) = &args.terrain {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let terrain = Terrain::from_reader(BufReader::new(file))
            .with_context(|| format!("loading terrain from {}", path.display()))?;
        info!(path = %path.display(), rows = terrain.rows(), cols = terrain.cols(), "terrain loaded");
        Ok(terrain)
    } else if args.synthetic {
        let params = SyntheticParams {
            rows: args.rows,
            cols: args.cols,
            seed: args.seed,
            relief: args.relief,
            sources: args.sources,
            ..SyntheticParams::default()
        };
        debug!(?params, "generating synthetic terrain");
        synthetic::generate(&params).context("generating synthetic terrain")
    } else {
        bail!("no terrain given: pass --terrain <file> or --synthetic");
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let terrain = load_terrain(&args)?;

    match args.command {
        Command::Extrema => {
            let (lo, hi) = elevation_extrema(&terrain);
            println!("lowest elevation:  {lo}");
            println!("highest elevation: {hi}");
        }
        Command::Flood { height, json } => {
            let mask = flooded_regions(&terrain, height);
            if json {
                let out = FloodedCells { height, flooded: mask.flooded_cells().collect() };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", report::render_mask(&mask));
            }
        }
        Command::Cell { height, row, col } => {
            let cell = GridLocation::new(row, col);
            let flooded = is_flooded(&terrain, height, cell)?;
            let diff = height_above_water(&terrain, height, cell)?;
            println!(
                "cell {cell} is {}; it sits {}",
                if flooded { "flooded" } else { "dry" },
                report::describe_height_above_water(diff)
            );
        }
        Command::Land { height } => {
            println!("{} cells of visible land", total_visible_land(&terrain, height));
        }
        Command::Delta { height, new_height } => {
            let delta = land_delta(&terrain, height, new_height);
            println!("from {height} to {new_height}: {}", report::describe_land_delta(delta));
        }
        Command::Islands { height } => {
            let r = flood_report(&terrain, height);
            println!("{} islands (largest: {} cells)", r.islands, r.largest_island);
        }
        Command::Sweep { from, to, step } => {
            let heights = sweep_heights(from, to, step);
            if heights.is_empty() {
                bail!(
                    "empty sweep: need from <= to, a positive step, and at most {MAX_SWEEP_STEPS} heights"
                );
            }
            let reports = flood_sweep(&terrain, &heights);
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Command::Dump => {
            println!("{}", serde_json::to_string(&terrain)?);
        }
    }

    Ok(())
}
