//! Weather agent CLI
//!
//! Runs the weather tools in-process, in a single session per invocation.

#![allow(clippy::print_stdout)]

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use application::{
    GET_COORDS_BY_CITY, GET_CURRENT_WEATHER_BY_COORDS, LocationContext, ToolOutput, WeatherTools,
};
use clap::{Parser, Subcommand};
use domain::CurrentWeatherReport;
use infrastructure::{AppConfig, TelemetryConfig, build_weather_tools, init_telemetry};
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Weather agent CLI
#[derive(Parser)]
#[command(name = "weather-cli")]
#[command(author, version, about = "Weather agent tools CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "WEATHER_AGENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a city to coordinates
    ///
    /// Example: weather-cli coords Springfield --country US
    Coords {
        /// City name
        city: String,

        /// Country code to disambiguate (e.g. US, GB)
        #[arg(long, default_value = "")]
        country: String,
    },

    /// Show current weather for a city or a position
    ///
    /// Example: weather-cli current --city Tokyo
    /// Example: weather-cli current --lat 52.52 --lon 13.41
    Current {
        /// City to resolve first
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        /// Country code for --city
        #[arg(long, requires = "city")]
        country: Option<String>,

        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the tool definitions as JSON
    Tools,
}

/// Map verbosity level to log filter string
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Arguments for the current weather tool
fn weather_args(lat: Option<f64>, lon: Option<f64>) -> Value {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            json!({ "coords": { "latitude": latitude, "longitude": longitude } })
        },
        _ => json!({}),
    }
}

/// Render a tool output for the terminal
fn render(output: &ToolOutput) -> anyhow::Result<String> {
    Ok(match &output.output {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other)?,
    })
}

/// Render a current weather output; a report becomes plain text unless JSON is asked for
fn render_weather(output: &ToolOutput, as_json: bool) -> anyhow::Result<String> {
    if output.success && !as_json {
        let report: CurrentWeatherReport = serde_json::from_value(output.output.clone())?;
        return Ok(report.summary());
    }
    render(output)
}

fn finish(output: &ToolOutput, rendered: &str) -> ExitCode {
    println!("{rendered}");
    if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(path: Option<&Path>) -> (AppConfig, Option<String>) {
    let loaded = match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e.to_string())),
    }
}

async fn run(tools: &WeatherTools, command: Commands) -> anyhow::Result<ExitCode> {
    let ctx = LocationContext::new();

    match command {
        Commands::Coords { city, country } => {
            let output = tools
                .call(&ctx, GET_COORDS_BY_CITY, json!({ "city": city, "country": country }))
                .await;
            Ok(finish(&output, &render(&output)?))
        },
        Commands::Current {
            city,
            country,
            lat,
            lon,
            json,
        } => {
            if let Some(city) = city {
                let resolved = tools
                    .call(
                        &ctx,
                        GET_COORDS_BY_CITY,
                        json!({ "city": city, "country": country.unwrap_or_default() }),
                    )
                    .await;
                if !resolved.success {
                    return Ok(finish(&resolved, &render(&resolved)?));
                }
                debug!(coords = %resolved.output, "City resolved");
            }

            let output = tools
                .call(&ctx, GET_CURRENT_WEATHER_BY_COORDS, weather_args(lat, lon))
                .await;
            Ok(finish(&output, &render_weather(&output, json)?))
        },
        Commands::Tools => {
            println!(
                "{}",
                serde_json::to_string_pretty(&WeatherTools::definitions())?
            );
            Ok(ExitCode::SUCCESS)
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, load_error) = load_config(cli.config.as_deref());

    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        log_format: config.telemetry.log_format,
    })?;
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    let tools = build_weather_tools(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize weather tools: {e}"))?;

    run(&tools, cli.command).await
}
