use std::fs;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subsector_generator::grid::Topology;
use subsector_generator::seeds::SubsectorSeeds;
use subsector_generator::{Result, Subsector, SubsectorConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "subsector_generator")]
#[command(about = "Generate a Traveller-style subsector with trade and communication routes")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file (see SubsectorConfig)
    #[arg(short, long)]
    config: Option<String>,

    /// Write the map to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Measure route distances on a hex grid
    #[arg(long)]
    hex: bool,

    /// Gas giant present when 1d6 <= this value
    #[arg(long)]
    gas_giant_threshold: Option<i32>,

    /// Cell occupied when 1d6 >= this value
    #[arg(long)]
    occupancy_threshold: Option<i32>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SubsectorConfig::load(path)?,
        None => SubsectorConfig::default(),
    };
    if args.hex {
        config.topology = Topology::Hex;
    }
    if let Some(threshold) = args.gas_giant_threshold {
        config.gas_giant_threshold = threshold;
    }
    if let Some(threshold) = args.occupancy_threshold {
        config.occupancy_threshold = threshold;
    }
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating subsector with seed: {}", seed);

    let seeds = SubsectorSeeds::from_master(seed);
    let subsector = Subsector::generate_with_seeds(&config, &seeds);
    let routes = subsector.routes();
    info!(
        "Placed {} systems ({} communication, {} trade, {} rich trade routes)",
        subsector.worlds().len(),
        routes.communication.len(),
        routes.trade.len(),
        routes.rich_trade.len()
    );

    let rendered = match args.format {
        Format::Text => subsector.to_text(),
        Format::Json => subsector.to_json()?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Wrote map to {}", path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
