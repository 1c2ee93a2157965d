//! Command line front end for the cloud seeding decision engine.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cloud_seeding::{batch, evaluate_with, Observation, ObservationField, Thresholds};
use std::{fs::File, io, path::PathBuf};
use tracing_subscriber::EnvFilter;

/// Decide whether a cloud is suitable for seeding
#[derive(Parser, Debug)]
#[command(name = "cloud-seeding")]
#[command(about = "Cloud seeding suitability analysis", long_about = None)]
struct Cli {
    /// JSON file overriding the operational thresholds
    #[arg(short, long, global = true)]
    thresholds: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single observation
    Evaluate(Measurements),
    /// Evaluate every row of a CSV file and write it back with decision columns
    Batch {
        /// CSV file with one observation per row
        input: PathBuf,
        /// Where to write the augmented CSV, stdout if not given
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct Measurements {
    /// Cloud base (m)
    #[arg(long)]
    cloud_base_m: Option<f64>,
    /// Cloud top (m)
    #[arg(long)]
    cloud_top_m: Option<f64>,
    /// Cloud top temperature (C)
    #[arg(long, allow_hyphen_values = true)]
    cloud_top_temp_c: Option<f64>,
    /// Radar reflectivity (dBZ)
    #[arg(long, allow_hyphen_values = true)]
    radar_reflectivity_dbz: Option<f64>,
    /// Precipitation rate (mm/h), 0 if not given
    #[arg(long)]
    precip_rate_mm_h: Option<f64>,
    /// Relative humidity (%), 80 if not given
    #[arg(long)]
    rel_humidity_pct: Option<f64>,
    /// Wind speed (m/s), 5 if not given
    #[arg(long)]
    wind_speed_m_s: Option<f64>,
    /// Precipitable water (mm)
    #[arg(long)]
    precipitable_water_mm: Option<f64>,
    /// Electrical activity observed
    #[arg(long)]
    lightning: bool,
    /// Target latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Target longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

impl Measurements {
    fn to_observation(&self) -> Observation {
        use ObservationField::*;

        let values = [
            (CloudBase, self.cloud_base_m),
            (CloudTop, self.cloud_top_m),
            (CloudTopTemperature, self.cloud_top_temp_c),
            (Reflectivity, self.radar_reflectivity_dbz),
            (PrecipRate, self.precip_rate_mm_h),
            (RelHumidity, self.rel_humidity_pct),
            (WindSpeed, self.wind_speed_m_s),
            (PrecipitableWater, self.precipitable_water_mm),
            (Latitude, self.lat),
            (Longitude, self.lon),
        ];

        values
            .iter()
            .fold(Observation::new(), |obs, &(field, value)| {
                obs.with_value(field, value)
            })
            .with_lightning(self.lightning)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let thresholds = match &cli.thresholds {
        Some(path) => Thresholds::load(path)
            .with_context(|| format!("loading thresholds from {}", path.display()))?,
        None => Thresholds::default(),
    };

    match &cli.command {
        Command::Evaluate(measurements) => {
            let obs = measurements.to_observation();
            let decision = evaluate_with(&obs, &thresholds);

            println!("{}", decision);
            if let Some((lat, lon)) = obs.target() {
                println!("TARGET: {:.4}, {:.4}", lat, lon);
            }
        }
        Command::Batch { input, output } => {
            let source = File::open(input)
                .with_context(|| format!("opening batch source {}", input.display()))?;

            let summary = match output {
                Some(path) => {
                    let sink = File::create(path)
                        .with_context(|| format!("creating report {}", path.display()))?;
                    batch::process_with(source, sink, &thresholds)
                }
                None => batch::process_with(source, io::stdout().lock(), &thresholds),
            }
            .with_context(|| format!("evaluating {}", input.display()))?;

            eprint!("{}", summary);
        }
    }

    Ok(())
}
