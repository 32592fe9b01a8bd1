//! piimask CLI
//!
//! Command-line interface for masking PII in text before it leaves the machine

mod config;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use config::AppConfig;
use piimask_pii::PiiMasker;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "piimask")]
#[command(about = "piimask - Detect and tokenize PII in text", long_about = None)]
struct Cli {
    /// Path to a YAML or TOML config file
    #[arg(long, global = true, env = "PIIMASK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mask PII and print the masked text with its token map as JSON
    Mask {
        #[command(flatten)]
        input: InputArgs,

        /// Also write the JSON result to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
    /// Print detected entities with their offsets as JSON
    Detect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text to process
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// File to read text from (stdin when neither --text nor --input is given)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Gazetteer file with one person name per line
    #[arg(long)]
    names: Option<PathBuf>,
}

impl InputArgs {
    fn read_text(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.input {
            let path = expand(path);
            return std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input {}", path.display()));
        }

        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON result, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(format!("{}", log_level)))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn load_config(cli: &Cli, names: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(expand(path))?,
        None => AppConfig::default(),
    };
    config.merge_env();

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(names) = names {
        config.use_gazetteer(expand(names));
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let input = match &cli.command {
        Commands::Mask { input, .. } | Commands::Detect { input } => input,
    };

    let config = load_config(&cli, input.names.as_ref())?;
    init_tracing(&config.logging.level)?;

    // Loading the recognizer is fatal on failure; there is no name-less fallback
    let masker = PiiMasker::from_config(config.detector.clone(), &config.recognizer)
        .context("Failed to initialize PII detection")?;

    let text = input.read_text()?;

    match &cli.command {
        Commands::Mask { output, pretty, .. } => {
            let result = masker.process(&text)?;

            if let Some(path) = output {
                result.write_json(expand(path))?;
            }

            println!("{}", result.to_json(*pretty)?);
        }
        Commands::Detect { .. } => {
            let entities = masker.detect(&text)?;
            info!("Detected {} entities", entities.len());
            println!("{}", serde_json::to_string_pretty(&entities)?);
        }
    }

    Ok(())
}
