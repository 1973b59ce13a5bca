//! ClipReel pipeline binary.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use reel_pipeline::cli::{Cli, Command};
use reel_pipeline::config::PipelineConfig;
use reel_pipeline::logging::StageLogger;
use reel_pipeline::stages;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for CI
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("clipreel=info".parse().unwrap())
        .add_directive("reel_pipeline=info".parse().unwrap())
        .add_directive("reel_select=info".parse().unwrap())
        .add_directive("reel_twitch=info".parse().unwrap())
        .add_directive("reel_media=info".parse().unwrap())
        .add_directive("reel_youtube=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();
    let config = PipelineConfig::from_env();
    let run_id = Uuid::new_v4().to_string();
    info!(run_id = %run_id, "Starting clipreel");

    let result = match cli.command {
        Command::Fetch => stages::fetch::run(&config, &StageLogger::new(&run_id, "fetch")).await,
        Command::Download => {
            stages::download::run(&config, &StageLogger::new(&run_id, "download")).await
        }
        Command::Compile => {
            stages::compile::run(&config, &StageLogger::new(&run_id, "compile")).await
        }
        Command::Thumbnail => {
            stages::thumbnail::run(&config, &StageLogger::new(&run_id, "thumbnail")).await
        }
        Command::Metadata => {
            stages::metadata::run(&config, &StageLogger::new(&run_id, "metadata")).await
        }
        Command::Upload => stages::upload::run(&config, &StageLogger::new(&run_id, "upload")).await,
        Command::Run { skip_upload } => run_all(&config, &run_id, skip_upload).await,
        Command::ResolveLogin { login } => {
            stages::resolve::run(&login, &StageLogger::new(&run_id, "resolve-login")).await
        }
    };

    if let Err(e) = result {
        error!(run_id = %run_id, "Pipeline failed: {e:#}");
        std::process::exit(1);
    }

    info!(run_id = %run_id, "Done");
}

/// Run every stage in order.
async fn run_all(config: &PipelineConfig, run_id: &str, skip_upload: bool) -> anyhow::Result<()> {
    stages::fetch::run(config, &StageLogger::new(run_id, "fetch")).await?;
    stages::download::run(config, &StageLogger::new(run_id, "download")).await?;
    stages::compile::run(config, &StageLogger::new(run_id, "compile")).await?;
    stages::thumbnail::run(config, &StageLogger::new(run_id, "thumbnail")).await?;
    stages::metadata::run(config, &StageLogger::new(run_id, "metadata")).await?;
    if skip_upload {
        info!("Skipping upload stage");
        return Ok(());
    }
    stages::upload::run(config, &StageLogger::new(run_id, "upload")).await
}
