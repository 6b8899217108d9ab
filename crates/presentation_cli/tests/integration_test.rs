//! Integration tests for CLI
//!
//! These tests verify command parsing and structure without running
//! actual commands.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "pinpoint")]
#[command(author, version, about = "Resolve your position to a place name", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        google_api_key: Option<String>,

        #[arg(long)]
        coarse: bool,

        #[arg(long, default_value_t = 15_000)]
        timeout_ms: u64,

        #[arg(long, default_value_t = 0)]
        max_age_ms: u64,

        #[arg(long)]
        json: bool,
    },
    Providers {
        #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        google_api_key: Option<String>,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_locate_command() {
    let cli = parse_args(&["pinpoint", "locate"]).unwrap();
    match cli.command {
        Commands::Locate {
            lat,
            lon,
            coarse,
            timeout_ms,
            max_age_ms,
            json,
            ..
        } => {
            assert!(lat.is_none());
            assert!(lon.is_none());
            assert!(!coarse);
            assert_eq!(timeout_ms, 15_000);
            assert_eq!(max_age_ms, 0);
            assert!(!json);
        },
        Commands::Providers { .. } => panic!("Expected Locate command"),
    }
}

#[test]
fn cli_parses_explicit_coordinates() {
    let cli = parse_args(&["pinpoint", "locate", "--lat", "51.5072", "--lon", "-0.1276"]).unwrap();
    match cli.command {
        Commands::Locate { lat, lon, .. } => {
            assert_eq!(lat, Some(51.5072));
            assert_eq!(lon, Some(-0.1276));
        },
        Commands::Providers { .. } => panic!("Expected Locate command"),
    }
}

#[test]
fn cli_rejects_latitude_without_longitude() {
    assert!(parse_args(&["pinpoint", "locate", "--lat", "51.5072"]).is_err());
    assert!(parse_args(&["pinpoint", "locate", "--lon", "-0.1276"]).is_err());
}

#[test]
fn cli_parses_acquisition_options() {
    let cli = parse_args(&[
        "pinpoint",
        "locate",
        "--coarse",
        "--timeout-ms",
        "3000",
        "--max-age-ms",
        "60000",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Locate {
            coarse,
            timeout_ms,
            max_age_ms,
            json,
            ..
        } => {
            assert!(coarse);
            assert_eq!(timeout_ms, 3_000);
            assert_eq!(max_age_ms, 60_000);
            assert!(json);
        },
        Commands::Providers { .. } => panic!("Expected Locate command"),
    }
}

#[test]
fn cli_parses_providers_command() {
    let cli = parse_args(&["pinpoint", "providers"]).unwrap();
    assert!(matches!(cli.command, Commands::Providers { .. }));
}

#[test]
fn cli_counts_verbosity() {
    let cli = parse_args(&["pinpoint", "-vv", "locate"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(parse_args(&["pinpoint", "teleport"]).is_err());
}
