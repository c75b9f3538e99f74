//! Notice Bot CLI
//!
//! One-shot entry point meant to be run by an external scheduler (cron,
//! GitHub Actions). Exit status reflects the run outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use notice_bot::{
    error::Result,
    models::{Config, WEBHOOK_URL_ENV},
    pipeline::{self, RunOutcome},
    services::{BoardFetcher, DiscordNotifier, NoticeNotifier},
    storage::{LocalStorage, WatermarkStore},
    utils::http,
};

/// Notice Bot - Yonsei Mirae campus notice board to Discord
#[derive(Parser, Debug)]
#[command(name = "notice-bot", version, about = "Forward new board notices to Discord")]
struct Cli {
    /// Path to storage directory holding config.toml and the watermark
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Path to config file (default: {storage_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the board once and notify new notices (default)
    Run {
        /// Log new notices without sending or updating the watermark
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration
    Validate,

    /// Show the stored watermark
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Seed the environment from .env before anything reads it
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose);
    if let Ok(path) = dotenv {
        log::debug!("Loaded environment from {}", path.display());
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.storage_dir.join("config.toml"));
    let config = Config::load_or_default(&config_path).with_env();
    let storage =
        LocalStorage::new(&cli.storage_dir).with_watermark_key(&config.paths.watermark_file);

    match cli.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => {
            config.validate(!dry_run)?;

            let client = http::create_async_client(&config.crawler)?;
            let source = BoardFetcher::new(client.clone(), &config.board.url);
            let notifier = if dry_run {
                None
            } else {
                Some(DiscordNotifier::new(
                    client,
                    &config.webhook,
                    &config.board.url,
                )?)
            };

            let outcome = pipeline::run_notifier(
                &config,
                &source,
                notifier.as_ref().map(|n| n as &dyn NoticeNotifier),
                &storage,
            )
            .await?;

            report(&outcome);
            Ok(ExitCode::from(outcome.exit_code()))
        }

        Command::Validate => {
            log::info!("Validating configuration from {}", config_path.display());
            config.validate(true)?;
            log::info!("✓ Config OK ({} is set)", WEBHOOK_URL_ENV);
            Ok(ExitCode::SUCCESS)
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!("Board: {}", config.board.url);
            log::info!("Watermark file: {}", storage.watermark_path().display());

            match storage.load_watermark().await {
                Some(notice) => {
                    log::info!("Last notice: {} (ID: {})", notice.title, notice.id);
                    log::info!("    {}", notice.link);
                    if !notice.info.date.is_empty() {
                        log::info!("    Published: {}", notice.info.date);
                    }
                }
                None => log::info!("No watermark stored yet."),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::FetchFailed { .. } | RunOutcome::DeliveryFailures { .. } => {
            log::warn!("Run finished: {}", outcome)
        }
        _ => log::info!("Run finished: {}", outcome),
    }
}
