//! Prediksi CLI - Alzheimer risk inference server
//!
//! # Commands
//!
//! - `serve` - Start the inference server
//! - `info` - Show version info

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use prediksi::{
    api::{create_router, AppState},
    artifact,
    error::Result,
};

/// Prediksi - Alzheimer disease risk inference server
///
/// Serves a pre-fitted scaler + classifier pair over a small REST API.
#[derive(Parser)]
#[command(name = "prediksi")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the inference server
    ///
    /// Examples:
    ///   prediksi serve --demo
    ///   prediksi serve --model model.json --scaler scaler.json
    Serve {
        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value = "7860")]
        port: u16,

        /// Path to the fitted classifier artifact (JSON)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Path to the fitted scaler artifact (JSON)
        #[arg(long)]
        scaler: Option<PathBuf>,

        /// Use the built-in demo artifacts instead of files
        #[arg(long)]
        demo: bool,
    },
    /// Show version info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model,
            scaler,
            demo,
        } => {
            let state = if demo {
                println!("Using built-in demo artifacts");
                AppState::demo()
            } else if let (Some(model_path), Some(scaler_path)) = (model, scaler) {
                load_state(&model_path, &scaler_path)
            } else {
                eprintln!("Error: Either --demo or both --model and --scaler must be specified");
                eprintln!();
                eprintln!("Usage:");
                eprintln!("  prediksi serve --demo");
                eprintln!("  prediksi serve --model model.json --scaler scaler.json");
                std::process::exit(1);
            };

            serve(&host, port, state).await?;
        }
        Commands::Info => {
            println!("Prediksi v{}", prediksi::VERSION);
            println!("Alzheimer disease risk inference server");
            println!();
            println!("Features:");
            println!("  - Fixed 32-feature clinical schema");
            println!("  - Pre-fitted standard scaler + logistic classifier (JSON artifacts)");
            println!("  - Structured 400/500 error contract");
            println!("  - Prometheus metrics");
        }
    }

    Ok(())
}

/// Load both artifacts, or start degraded with neither.
///
/// The original service loads model and scaler as a unit; a failure of
/// either leaves both unset. The process keeps running so /health can
/// report the gap — the failure is permanent until restart.
fn load_state(model_path: &Path, scaler_path: &Path) -> AppState {
    println!("Loading model and scaler...");
    let loaded = artifact::load_model(model_path)
        .and_then(|model| artifact::load_scaler(scaler_path).map(|scaler| (scaler, model)));

    match loaded {
        Ok((scaler, model)) => {
            println!("Model and scaler loaded successfully!");
            AppState::new(scaler, model)
        }
        Err(e) => {
            eprintln!("Error loading model: {e}");
            eprintln!("Starting in degraded mode; predictions will fail until restart.");
            AppState::degraded()
        }
    }
}

async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = create_router(state);

    let addr: SocketAddr =
        format!("{host}:{port}")
            .parse()
            .map_err(|e| prediksi::error::PrediksiError::ArtifactError {
                reason: format!("Invalid address: {e}"),
            })?;

    println!();
    println!("{}", "=".repeat(70));
    println!("ALZHEIMER PREDICTION API");
    println!("{}", "=".repeat(70));
    println!("Server running on: http://{addr}");
    println!();
    println!("Available endpoints:");
    println!("  GET  /                 - API information");
    println!("  GET  /health           - Health check");
    println!("  GET  /metrics          - Prometheus metrics");
    println!("  POST /predict          - Predict with JSON body");
    println!("  GET  /predict-sample   - Predict with sample data");
    println!("{}", "=".repeat(70));
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        prediksi::error::PrediksiError::ArtifactError {
            reason: format!("Failed to bind: {e}"),
        }
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| prediksi::error::PrediksiError::ArtifactError {
            reason: format!("Server error: {e}"),
        })?;

    Ok(())
}
