//! CarbonTrace CLI
//!
//! Estimates the CO₂ emissions of freight shipments from the command line.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::ports::{GeocodingError, GeocodingPort};
use application::{CalculationFailure, EmissionService};
use clap::{Parser, Subcommand};
use domain::{EmissionFactor, EmissionReport, RouteMeasurement, RouteQuery, ShipmentRequest};
use infrastructure::{AppConfig, EnvSecretStore, GraphHopperAdapter, init_logging};
use tracing::warn;

/// CarbonTrace CLI
#[derive(Parser)]
#[command(name = "carbontrace-cli")]
#[command(author, version, about = "CarbonTrace freight emission calculator", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the CO₂ emissions of a shipment
    ///
    /// Example: carbontrace-cli estimate --from "New York, USA" --to "Los Angeles, USA" --weight 100
    Estimate {
        /// Source location
        #[arg(long)]
        from: String,

        /// Destination location
        #[arg(long)]
        to: String,

        /// Cargo weight in kilograms
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,

        /// Transport mode: truck, ship, airplane or train (unknown values count as truck)
        #[arg(short, long, default_value = "truck")]
        mode: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the road distance between two places
    Distance {
        /// Source location
        #[arg(long)]
        from: String,

        /// Destination location
        #[arg(long)]
        to: String,

        /// Print the measurement as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a place name to coordinates
    Geocode {
        /// Place to look up
        place: String,
    },

    /// List the emission factor of every transport mode
    Factors {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration (API key omitted)
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("Failed to load configuration"),
    }
}

fn format_report(report: &EmissionReport) -> String {
    let route = &report.route;
    let mut out = format!("{} {} shipment\n", report.mode.emoji(), report.mode.label());
    out.push_str(&format!(
        "   From:      {} ({})\n",
        route.query.source.trim(),
        route.origin
    ));
    out.push_str(&format!(
        "   To:        {} ({})\n",
        route.query.destination.trim(),
        route.destination
    ));
    out.push_str(&format!("   Distance:  {} (road)\n", route.distance));
    out.push_str(&format!("   Weight:    {} kg\n", report.weight_kg));
    out.push_str(&format!("   Emissions: {}", report.emissions));
    if report.mode.uses_road_proxy() {
        out.push_str(&format!(
            "\n   ℹ️  Road distance used for {} (great-circle: {:.2} km)",
            report.mode.label().to_lowercase(),
            route.great_circle_km()
        ));
    }
    out
}

fn format_measurement(measurement: &RouteMeasurement) -> String {
    format!(
        "📍 {} → {}\n   Road:         {}\n   Great-circle: {:.2} km",
        measurement.query.source.trim(),
        measurement.query.destination.trim(),
        measurement.distance,
        measurement.great_circle_km()
    )
}

fn format_factors() -> String {
    let mut out = String::from("🌍 Emission factors (kg CO₂ per km per kg of cargo):");
    for factor in EmissionFactor::table() {
        out.push_str(&format!("\n   {factor}"));
    }
    out
}

fn format_failure(failure: &CalculationFailure) -> String {
    format!("❌ {}\n   {failure}", failure.user_message())
}

/// Report a failure and yield the failing exit status
///
/// JSON output stays on stdout so scripts can parse it; text goes to stderr.
#[allow(clippy::print_stderr)]
fn fail(failure: &CalculationFailure, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "error": failure }))?
        );
    } else {
        eprintln!("{}", format_failure(failure));
    }
    Ok(ExitCode::FAILURE)
}

/// Report a geocoding failure and yield the failing exit status
#[allow(clippy::print_stderr)]
fn fail_geocode(place: &str, error: &GeocodingError) -> ExitCode {
    match error {
        GeocodingError::NotFound(_) => {
            eprintln!("❌ No match for \"{place}\". Check the spelling and try again.");
        },
        GeocodingError::Transport(e) => eprintln!("❌ Geocoding failed: {e}"),
    }
    ExitCode::FAILURE
}

async fn build_service(
    config: &mut AppConfig,
) -> anyhow::Result<(EmissionService, Arc<GraphHopperAdapter>)> {
    config.resolve_secrets(&EnvSecretStore::new()).await;
    config.validate()?;

    let adapter = Arc::new(GraphHopperAdapter::from_config(&config.graphhopper)?);
    let service = EmissionService::new(adapter.clone(), adapter.clone())
        .with_config(config.calculation.clone());
    Ok((service, adapter))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Factors { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&EmissionFactor::table())?
                );
            } else {
                println!("{}", format_factors());
            }
        },

        Commands::Config => {
            println!("{}", config.to_toml()?);
        },

        Commands::Estimate {
            from,
            to,
            weight,
            mode,
            json,
        } => {
            let (service, _) = build_service(&mut config).await?;
            let request = ShipmentRequest::new(from, to, weight, mode);
            if domain::TransportMode::from_key(&request.mode).is_none() {
                warn!(mode = %request.mode, "Unknown transport mode, using truck");
            }

            match service.calculate(&request).await {
                Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
                Ok(report) => println!("{}", format_report(&report)),
                Err(failure) => return fail(&failure, json),
            }
        },

        Commands::Distance { from, to, json } => {
            let (service, _) = build_service(&mut config).await?;

            match service.measure_route(&RouteQuery::new(from, to)).await {
                Ok(measurement) if json => {
                    println!("{}", serde_json::to_string_pretty(&measurement)?);
                },
                Ok(measurement) => println!("{}", format_measurement(&measurement)),
                Err(failure) => return fail(&failure, json),
            }
        },

        Commands::Geocode { place } => {
            let place = place.trim();
            if place.is_empty() {
                anyhow::bail!("Place must not be empty");
            }
            let (_, adapter) = build_service(&mut config).await?;

            match adapter.resolve(place).await {
                Ok(point) => println!("📍 {place}: {point}"),
                Err(e) => return Ok(fail_geocode(place, &e)),
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
