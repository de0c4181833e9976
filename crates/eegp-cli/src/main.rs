//! `eegp`: upload an EEG `.set` recording and print the prediction.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eegp_client::{ClientConfig, PredictClient, ProgressObserver, SetFile};
use eegp_models::PredictionResult;

use crate::render::{render_result, TerminalProgress};

/// Command-line client for the EEG prediction API
#[derive(Parser)]
#[command(name = "eegp")]
#[command(about = "Upload EEG .set recordings and request predictions", long_about = None)]
struct Cli {
    /// API base URL (overrides EEGP_API_BASE)
    #[arg(short, long)]
    api: Option<String>,

    /// Content type to presign and upload with (overrides EEGP_CONTENT_TYPE)
    #[arg(long)]
    content_type: Option<String>,

    /// Print only the raw JSON result
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a .set file and predict on it
    Upload {
        /// Path to the .set recording
        path: PathBuf,
    },

    /// Predict on the backend's sample recording
    Demo {
        /// Sample object to use instead of the backend default
        #[arg(long)]
        demo_key: Option<String>,
    },

    /// Check whether the API is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only results.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("eegp_client=info,eegp_cli=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ClientConfig::from_env();
    if let Some(api) = &cli.api {
        config = config.with_api_base(api);
    }
    if cli.content_type.is_some() {
        config = config.with_content_type(cli.content_type.clone());
    }
    if let Commands::Demo {
        demo_key: Some(key),
    } = &cli.command
    {
        config = config.with_demo_key(Some(key.clone()));
    }

    info!("Using API at {}", config.api_base);
    let client = PredictClient::new(config)?;

    let result = match cli.command {
        Commands::Health => {
            return Ok(match client.health().await {
                Ok(()) => {
                    println!("✓ API reachable at {}", client.config().api_base);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!("✗ {}", e);
                    ExitCode::FAILURE
                }
            });
        }
        Commands::Upload { path } => upload(&client, &path, &TerminalProgress::upload()).await?,
        Commands::Demo { .. } => {
            ping(&client).await;
            client.run_demo_flow(&TerminalProgress::demo()).await?
        }
    };

    print_result(&result, cli.json)?;
    Ok(ExitCode::SUCCESS)
}

/// Load and check the file, then run the upload flow.
///
/// A rejected file name fails here, before the health ping or any other request.
async fn upload(
    client: &PredictClient,
    path: &Path,
    observer: &dyn ProgressObserver,
) -> Result<PredictionResult> {
    let file = SetFile::from_path(path).await?;
    ping(client).await;
    Ok(client.run_upload_flow(&file, observer).await?)
}

/// Silent best-effort reachability probe before a flow.
async fn ping(client: &PredictClient) {
    if client.check_health().await {
        debug!("API healthy");
    }
}

fn print_result(result: &PredictionResult, json_only: bool) -> Result<()> {
    if json_only {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", render_result(result)?);
    }
    Ok(())
}
