//! CLI entry point for the CWA forecast proxy.
//!
//! Provides subcommands for running the HTTP proxy, fetching a single
//! forecast, and listing the supported locations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cwa_forecast_proxy::{
    config::Config,
    infra::cwa::CwaClient,
    locations::Location,
    output::{print_pretty, write_json, write_locations},
    server::{self, AppState},
    services::forecast_api::fetch_forecast,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cwa_forecast_proxy")]
#[command(about = "A proxy that reshapes CWA township weather forecasts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP proxy
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch one forecast and print it as JSON
    Fetch {
        /// Location name; unknown names fall back to the default location
        #[arg(value_name = "LOCATION")]
        location: Option<String>,

        /// Pretty-print the JSON output
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
    /// List supported locations and their dataset ids
    Locations,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cwa_forecast_proxy.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cwa_forecast_proxy.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let state = AppState::new(config).context("Failed to build HTTP client")?;
            server::serve(state, port).await?;
            info!("Server stopped");
        }
        Commands::Fetch { location, pretty } => {
            let api_key = config
                .api_key
                .clone()
                .context("CWA_API_KEY must be set")?;
            let client = CwaClient::new(&config.base_url, api_key, config.request_timeout)?;
            let location = Location::resolve(location.as_deref(), config.default_location);

            let result = fetch_forecast(&client, location).await?;
            print_pretty(&result);
            write_json(std::io::stdout().lock(), &result, pretty)?;
        }
        Commands::Locations => {
            write_locations(std::io::stdout().lock(), config.default_location)?;
        }
    }

    Ok(())
}
