//! Bikeshare - command line front end
//!
//! Collects a city, month and weekday, runs the trip statistics pipeline and
//! prints the results or the matching trip rows.

use anyhow::{Context, Result};
use bikeshare::{City, CitySources, DataLoader, ErrorKind, LoadError, Summary};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(short = 'd', long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Override the Chicago data file
    #[arg(long, global = true, value_name = "FILE")]
    chicago: Option<PathBuf>,

    /// Override the New York City data file
    #[arg(long, global = true, value_name = "FILE")]
    new_york: Option<PathBuf>,

    /// Override the Washington data file
    #[arg(long, global = true, value_name = "FILE")]
    washington: Option<PathBuf>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Filters {
    /// chicago, new_york or washington
    #[arg(short, long)]
    city: String,

    /// Month name, or "all"
    #[arg(short, long, default_value = "all")]
    month: String,

    /// Weekday name, or "all"
    #[arg(short = 'w', long, default_value = "all")]
    day: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show statistics for the selected trips
    Stats {
        #[command(flatten)]
        filters: Filters,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the selected trip rows
    Data {
        #[command(flatten)]
        filters: Filters,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = 20)]
        rows: usize,
    },
}

impl Cli {
    fn sources(&self) -> CitySources {
        let overrides = [
            (City::Chicago, &self.chicago),
            (City::NewYork, &self.new_york),
            (City::Washington, &self.washington),
        ];
        overrides
            .into_iter()
            .fold(CitySources::in_dir(&self.data_dir), |sources, (city, path)| {
                match path {
                    Some(path) => sources.with_source(city, path.clone()),
                    None => sources,
                }
            })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LoadError>().map(LoadError::kind) {
                Some(ErrorKind::Configuration) => error!("Configuration error: {err:#}"),
                Some(ErrorKind::Validation) => error!("Invalid selection: {err:#}"),
                Some(ErrorKind::Io) => error!("Could not read trip data: {err:#}"),
                None => error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let loader = DataLoader::new(cli.sources());

    match cli.command {
        Commands::Stats { filters, json } => {
            info!("Calculating statistics...");
            let ds = loader.load(&filters.city, &filters.month, &filters.day)?;
            let summary = Summary::compute(&ds).context("Failed to compute statistics")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
        }
        Commands::Data { filters, rows } => {
            info!("Loading data...");
            let ds = loader.load(&filters.city, &filters.month, &filters.day)?;
            println!(
                "{} (month: {}, day: {}): showing {} of {} trips",
                ds.city(),
                ds.selection().month,
                ds.selection().day,
                rows.min(ds.len()),
                ds.len()
            );
            println!("{}", ds.head(rows));
        }
    }

    Ok(())
}
