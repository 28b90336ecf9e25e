// ./src/main.rs
use bevy::log::{error, info, warn};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

use charge_field::{
    debug::visualization::svg::{ChargeFieldPlot, PlotStyle, save_svg},
    input::{InputError, prompt_charges, random_charges},
    math::prelude::*,
    physics::electrostatics::{
        Charge, ChargeSet, FieldEvaluator, GridConfig, SampleGrid, StreamlineConfig,
        trace_field_lines,
    },
};

/// Halbe Breite des Bereichs für zufällige Ladungen ohne `--extent`
const RANDOM_EXTENT: f64 = 3.0;

#[derive(Parser, Debug)]
#[command(name = "charge_field")]
#[command(about = "Plot the electric field and potential of point charges as SVG")]
struct Args {
    /// Charge as `q,x,y` in Coulomb and meters (repeatable)
    #[arg(long = "charge", allow_hyphen_values = true)]
    charges: Vec<Charge>,

    /// Generate N random charges instead of prompting
    #[arg(long, conflicts_with = "charges")]
    random: Option<usize>,

    /// Seed for `--random`
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Grid samples per axis
    #[arg(long, default_value_t = 20)]
    samples: usize,

    /// Margin around the charges' bounding box in meters
    #[arg(long, default_value_t = 2.0)]
    margin: f64,

    /// Use a fixed grid of ±EXTENT meters instead of the bounding box
    #[arg(long)]
    extent: Option<f64>,

    /// Number of equipotential levels
    #[arg(long, default_value_t = 20)]
    levels: usize,

    /// Field lines started around each charge
    #[arg(long = "seeds-per-charge", default_value_t = 8)]
    seeds_per_charge: usize,

    /// Output SVG file
    #[arg(long, default_value = "charge_field.svg")]
    output: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,charge_field=debug"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn collect_charges(args: &Args) -> Result<ChargeSet, Box<dyn std::error::Error>> {
    if !args.charges.is_empty() {
        return Ok(args.charges.iter().copied().collect());
    }

    if let Some(count) = args.random {
        if count == 0 {
            return Err(InputError::NoCharges.into());
        }
        let bounds = Bounds2D::symmetric(args.extent.unwrap_or(RANDOM_EXTENT))?;
        return Ok(random_charges(count, &bounds, args.seed));
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    Ok(prompt_charges(&mut reader, &mut writer)?)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let charges = collect_charges(args)?;
    for (index, charge) in charges.iter().enumerate() {
        info!("{} = {}", ChargeSet::label(index), charge);
    }

    let mut grid_config = GridConfig::new()
        .with_samples(args.samples)
        .with_margin(args.margin);
    if let Some(extent) = args.extent {
        grid_config = grid_config.with_fixed_extent(extent);
    }
    let grid = SampleGrid::around_charges(&charges, &grid_config)?;
    let (rows, cols) = grid.shape();
    info!("Evaluating {} x {} grid (k = {:e})", cols, rows, COULOMB_K);

    let evaluation = FieldEvaluator::evaluate(&charges, &grid)?;
    if let Some((v_min, v_max)) = evaluation.potential_range() {
        info!("Potential range: {:.3e} V .. {:.3e} V", v_min, v_max);
    } else {
        warn!("Potential has no finite samples");
    }

    let interactions = FieldEvaluator::interaction_vectors(&charges)?;
    for iv in &interactions {
        info!(
            "Interaction vector {}: ({:.3e}, {:.3e})",
            ChargeSet::label(iv.charge_index),
            iv.vector.x,
            iv.vector.y
        );
    }

    let levels = contour_levels(evaluation.potential.iter().copied(), args.levels);
    let contours = iso_lines(&evaluation.potential_field(), &levels);

    let streamline_config = StreamlineConfig::new().with_seeds_per_charge(args.seeds_per_charge);
    let field_lines = trace_field_lines(&charges, &grid.bounds(), &streamline_config)?;

    let plot = ChargeFieldPlot {
        charges: &charges,
        evaluation: &evaluation,
        interactions: &interactions,
        iso_lines: &contours,
        field_lines: &field_lines,
    };
    let document = plot.render(&PlotStyle::default())?;
    save_svg(&args.output, &document)?;
    Ok(())
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
