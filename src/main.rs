//! Dictbench - Main entrypoint.
//!
//! Loads configuration, initializes logging, and runs, validates or writes the
//! benchmark configuration depending on the subcommand.

use clap::{Parser, Subcommand};
use dictbench_lib::benchmark::run_benchmark;
use dictbench_lib::config::{
    ConfigLoader, DictBenchConfig, LogConfig, ReportFormat, Validate, ENV_PREFIX,
};
use dictbench_lib::data_structures::Strategy;
use dictbench_lib::error::{get_error_reporting, DictBenchError, DictBenchResult, ErrorContext};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for dictbench.
#[derive(Parser, Debug)]
#[clap(name = "dictbench", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Insert and verify a synthetic workload, reporting the elapsed time
    Run {
        /// Dictionary strategy: naive, chain, lp or cuckoo
        structure: Option<Strategy>,

        /// Input size (positive integer)
        n: Option<u32>,

        /// Seed for the workload permutation
        #[clap(long)]
        seed: Option<u64>,

        /// Report format: text or json
        #[clap(long)]
        format: Option<ReportFormat>,
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

/// Initialize the logging system. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(log: &LogConfig) -> DictBenchResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_writer(std::io::stderr);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| {
        DictBenchError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

/// Applies command line overrides to the loaded configuration.
fn apply_overrides(
    config: &mut DictBenchConfig,
    structure: Option<Strategy>,
    n: Option<u32>,
    seed: Option<u64>,
    format: Option<ReportFormat>,
) {
    if let Some(structure) = structure {
        config.benchmark.structure = structure;
    }
    if let Some(n) = n {
        config.benchmark.size = n;
    }
    if let Some(seed) = seed {
        config.benchmark.workload_seed = seed;
    }
    if let Some(format) = format {
        config.benchmark.format = format;
    }
}

/// Main entry point for the application.
fn main() -> DictBenchResult<()> {
    let args = <Args as clap::Parser>::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let loaded = config_loader.load();

    // Log with the configured settings when they load, defaults otherwise
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log_config)?;
    dictbench_lib::init();
    info!("dictbench v{}", dictbench_lib::VERSION);

    let command = args.command.unwrap_or(Command::Run {
        structure: None,
        n: None,
        seed: None,
        format: None,
    });

    match command {
        Command::Run {
            structure,
            n,
            seed,
            format,
        } => {
            let mut config = match loaded {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Configuration error: {}", e);
                    process::exit(1);
                }
            };
            apply_overrides(&mut config, structure, n, seed, format);
            if let Err(e) = config.benchmark.validate() {
                tracing::error!("Configuration error: {}", e);
                process::exit(1);
            }

            info!(
                "Running benchmark with structure: {}, n: {}",
                config.benchmark.structure, config.benchmark.size
            );
            let report = match run_benchmark(&config.benchmark, &config.dictionary) {
                Ok(report) => report,
                Err(e @ DictBenchError::Verification(_)) => {
                    let details = format!(
                        "structure={} n={} workload_seed={}",
                        config.benchmark.structure,
                        config.benchmark.size,
                        config.benchmark.workload_seed
                    );
                    get_error_reporting()
                        .report(ErrorContext::new(e, "benchmark").with_details(details));
                    process::exit(1);
                }
                Err(e) => return Err(e),
            };

            match config.benchmark.format {
                ReportFormat::Text => println!("{report}"),
                ReportFormat::Json => println!("{}", report.to_json()?),
            }
            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            match loaded {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = DictBenchConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| DictBenchError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
