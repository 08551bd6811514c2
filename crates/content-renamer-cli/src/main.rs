use anyhow::Context;
use clap::{Parser, Subcommand};
use content_renamer_core::collaborators::{
    ChatDescriber, ChatSettings, Collaborators, DocumentTextExtractor, TikTokenEstimator,
};
use content_renamer_core::{
    logging, BatchSummary, Config, ContentRenamer, LogLevel, RenameOutcome, RenameStatus,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "content-renamer")]
#[command(about = "Rename all the files in a directory after their content")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Directory whose files you want to rename
    #[arg(required = true)]
    directory: Option<PathBuf>,

    /// Compute device for the description models (passed through)
    device: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show the new names without renaming anything
    #[arg(long)]
    dry_run: bool,

    /// Maximum directory depth for scanning
    #[arg(long)]
    max_depth: Option<usize>,

    /// Token budget for document text sent to the text model
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Base URL of the OpenAI-compatible description service
    #[arg(long)]
    endpoint: Option<String>,

    /// Model used to name documents
    #[arg(long)]
    text_model: Option<String>,

    /// Model used to caption images
    #[arg(long)]
    image_model: Option<String>,

    /// Write logs to a rotating file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "content-renamer.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    // API keys may live in a .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { path }) = &cli.command {
        Config::default().save_to_file(path)?;
        println!("Configuration file generated at: {}", path.display());
        return Ok(());
    }

    let config = build_config(&cli)?;
    init_logging(&cli, &config)?;

    let directory = cli
        .directory
        .clone()
        .context("a directory to rename is required")?;

    let settings = ChatSettings::from_config(&config);
    let describer = ChatDescriber::new(settings)?;
    let collaborators = Collaborators::new(
        describer.clone(),
        DocumentTextExtractor::new(),
        describer,
        TikTokenEstimator::new(),
    );

    let renamer = ContentRenamer::new(config, collaborators);

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {pos} files {msg}")
            .context("invalid progress template")?,
    );
    progress.enable_steady_tick(Duration::from_millis(120));

    info!("Starting rename of {}", directory.display());
    let dry_run = renamer.config().dry_run;
    let result = renamer.run_with(&directory, |outcome| {
        progress.inc(1);
        let line = report_line(outcome, dry_run);
        progress.suspend(|| println!("{}", line));
    });
    progress.finish_and_clear();

    let (outcomes, _) = result?;
    let summary = BatchSummary::from_outcomes(&outcomes);
    println!(
        "Done: {} renamed, {} skipped, {} failed ({} files)",
        summary.renamed,
        summary.skipped,
        summary.failed,
        summary.total()
    );
    info!("Rename complete");

    Ok(())
}

/// Merge the configuration file (if any) with command line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if cli.dry_run {
        config.dry_run = true;
    }
    if let Some(device) = &cli.device {
        config.device = device.clone();
    }
    if cli.max_depth.is_some() {
        config.max_depth = cli.max_depth;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(model) = &cli.text_model {
        config.text_model = model.clone();
    }
    if let Some(model) = &cli.image_model {
        config.image_model = model.clone();
    }

    // Set log level based on verbosity
    config.log_level = match cli.verbose {
        0 => config.log_level,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    config.validate()?;
    Ok(config)
}

fn init_logging(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let level = config.log_level.to_level_filter();
    match &cli.log_dir {
        Some(dir) => logging::init_logger(dir, level)
            .map_err(|e| anyhow::anyhow!("Failed to initialize file logging: {}", e)),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
            Ok(())
        }
    }
}

/// One console line per file
fn report_line(outcome: &RenameOutcome, dry_run: bool) -> String {
    match outcome.status {
        RenameStatus::Renamed if dry_run => format!(
            "[DRY RUN] Would rename {} to {}",
            outcome.path.display(),
            outcome.final_name.as_deref().unwrap_or_default()
        ),
        RenameStatus::Renamed => format!(
            "[SUCCESS] Renamed {} successfully!!",
            outcome.path.display()
        ),
        RenameStatus::SkippedUnsupported => "[ERROR] FILE TYPE NOT SUPPORTED".to_string(),
        RenameStatus::Failed => format!(
            "[ERROR] Failed to rename {}: {}",
            outcome.path.display(),
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
