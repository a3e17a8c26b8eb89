//! Kilo Scan - Main entrypoint.
//!
//! This is the main entry point for the Kilo Scan application.
//! It initializes the logging system, loads configuration, and dispatches
//! the requested command.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kilo_scan_lib::config::{self, KiloConfig, LogConfig};
use kilo_scan_lib::detector::{self, Detector, FileReport};
use kilo_scan_lib::error::{get_error_reporting, ErrorContext, KiloError};
use kilo_scan_lib::text::SimpleNormalizer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Command line arguments for Kilo Scan.
#[derive(Parser, Debug)]
#[clap(name = "Kilo Scan", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Score texts or files for scam keywords
    Scan {
        /// Print full reports as JSON
        #[clap(long)]
        json: bool,

        /// Text to scan (may be repeated)
        #[clap(short, long, value_parser)]
        text: Vec<String>,

        /// Files to scan; standard input is read when neither files nor texts are given
        #[clap(value_parser)]
        files: Vec<PathBuf>,
    },

    /// Construct the automaton from the keyword catalog and save it
    Build {
        /// Where to write the automaton (defaults to the configured cache path)
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let fmt_layer = if log.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .with_thread_names(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .context("Failed to set global tracing subscriber")
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();

    let config = match kilo_scan_lib::init(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the config, so it is not up yet
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e:#}");
        process::exit(1);
    }

    if let Err(e) = run(args.command, &config) {
        let context = match e.downcast::<KiloError>() {
            Ok(error) => ErrorContext::new(error, "cli").with_span_trace(),
            Err(other) => ErrorContext::new(KiloError::Custom(format!("{other:#}")), "cli"),
        };
        get_error_reporting().report(context);
        process::exit(1);
    }
}

fn run(command: Command, config: &KiloConfig) -> anyhow::Result<()> {
    match command {
        Command::Scan { json, text, files } => scan(config, json, text, files),
        Command::Build { output } => {
            let output = output.or_else(|| config.automaton.cache_path.clone());
            let trie = detector::build_automaton(config, &SimpleNormalizer::new(), output.as_deref())?;

            info!(
                patterns = trie.pattern_count(),
                nodes = trie.node_count(),
                output = ?output,
                "Automaton built"
            );
            Ok(())
        }
        Command::Validate => {
            // Loading already validated the configuration; check the catalog too
            let global = config::get_global_config().map_err(KiloError::from)?;
            detector::build_automaton(global.get(), &SimpleNormalizer::new(), None)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = KiloConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(KiloError::Io)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .context("Failed to serialize config")?;
            std::fs::write(&output, toml).map_err(KiloError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

fn scan(config: &KiloConfig, json: bool, texts: Vec<String>, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let detector = Detector::from_config(config)?;

    let mut texts = texts;
    if texts.is_empty() && files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(KiloError::Io)?;
        texts.push(input);
    }

    for text in &texts {
        let report = detector.scan(text);
        if json {
            println!("{}", serde_json::to_string(&report).map_err(KiloError::Serialization)?);
        } else {
            println!("{:.3}", report.score);
        }
    }

    if files.is_empty() {
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.scan.max_concurrency)
        .enable_all()
        .build()
        .map_err(KiloError::Io)?;
    let reports = runtime.block_on(detector.scan_files(files, &config.scan));

    let mut failed = 0;
    for FileReport { path, result } in reports {
        match result {
            Ok(report) if json => {
                let line = serde_json::json!({ "path": path, "report": report });
                println!("{line}");
            }
            Ok(report) => println!("{:.3}\t{}", report.score, path.display()),
            Err(e) => {
                failed += 1;
                if json {
                    println!("{}", serde_json::json!({ "path": path, "error": e.to_string() }));
                }
                get_error_reporting().report(
                    ErrorContext::new(KiloError::Scan(e), "scanner")
                        .with_details(path.display().to_string()),
                );
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} file(s) could not be scanned");
    }
    Ok(())
}
