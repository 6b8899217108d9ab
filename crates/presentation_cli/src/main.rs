//! Pinpoint CLI
//!
//! Command-line front end for the location-resolution cascade: the
//! "use my location" trigger. Acquires a position (or takes explicit
//! coordinates), runs the provider cascade and prints the resolved place.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{LocationService, PositionOptions};
use clap::{Parser, Subcommand};
use domain::GeoPosition;
use integration_geocoding::{GeocodingConfig, ReverseGeocoder};
use integration_position::IpLookupPositionSource;

/// Pinpoint CLI
#[derive(Parser)]
#[command(name = "pinpoint")]
#[command(author, version, about = "Resolve your position to a place name", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the current location to a place name
    ///
    /// Tries Google Maps (when a key is configured), then Nominatim, then
    /// BigDataCloud; falls back to the six-decimal coordinate string when
    /// no provider has a name for the position.
    Locate {
        /// Latitude to resolve directly, skipping position acquisition
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to resolve directly, skipping position acquisition
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Google Maps Geocoding API key (enables the keyed provider)
        #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        google_api_key: Option<String>,

        /// Accept coarse network positioning without complaint
        #[arg(long)]
        coarse: bool,

        /// Position acquisition timeout in milliseconds
        #[arg(long, default_value_t = 15_000)]
        timeout_ms: u64,

        /// Accept a cached position up to this many milliseconds old
        /// (0 always acquires fresh)
        #[arg(long, default_value_t = 0)]
        max_age_ms: u64,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the configured geocoding providers in trial order
    Providers {
        /// Google Maps Geocoding API key (enables the keyed provider)
        #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        google_api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Locate {
            lat,
            lon,
            google_api_key,
            coarse,
            timeout_ms,
            max_age_ms,
            json,
        } => {
            let config = GeocodingConfig {
                google_api_key,
                ..Default::default()
            };
            config.validate().map_err(anyhow::Error::msg)?;
            let geocoder = ReverseGeocoder::new_shared(&config)?;

            let place = if let (Some(lat), Some(lon)) = (lat, lon) {
                let position =
                    GeoPosition::new(lat, lon, 0.0).context("coordinates out of range")?;
                geocoder.resolve(&position).await
            } else {
                let source = Arc::new(IpLookupPositionSource::with_defaults()?);
                let options = PositionOptions {
                    high_accuracy: !coarse,
                    timeout_ms,
                    max_age_ms,
                };
                LocationService::new(source, geocoder)
                    .with_options(options)
                    .locate()
                    .await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&place)?);
            } else {
                println!("{place}");
            }
        },

        Commands::Providers { google_api_key } => {
            let config = GeocodingConfig {
                google_api_key,
                ..Default::default()
            };
            let geocoder = ReverseGeocoder::new(&config)?;
            for name in geocoder.provider_names() {
                println!("{name}");
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
