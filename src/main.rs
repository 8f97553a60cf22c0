//! fleet-eol: OS support-lifecycle analysis for device-fleet inventories
//!
//! Enriches a device inventory export with release-cycle and end-of-life
//! data from `endoflife.date`.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use chrono::NaiveDate;
use fleet_eol::enrichment::{BuildDataClient, BuildDataConfig};
use fleet_eol::model::{BuildData, OsFamily, NOT_AVAILABLE};
use fleet_eol::pipeline::{exit_codes, run_check, CheckConfig};
use fleet_eol::reports::ReportFormat;
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fleet-eol")]
#[command(version)]
#[command(about = "OS support-lifecycle analysis for device-fleet inventories", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  All classified devices are supported (or --no-fail)
    1  End-of-life or unrecognized-version devices found
    3  Error occurred

EXAMPLES:
    # Check an inventory export, human-readable summary
    fleet-eol check devices.json

    # CI/CD gate with CSV artifact
    fleet-eol check devices.json -o csv -O report.csv

    # Air-gapped run from pre-fetched cycle files
    fleet-eol check devices.json --build-data ./cycles

    # Reproducible classification against a fixed date
    fleet-eol check devices.json --today 2024-06-15")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Path to the inventory export (JSON array of row objects)
    inventory: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Load build data from a directory of {family}.json files instead of
    /// the endoflife.date API
    #[arg(long, value_name = "DIR")]
    build_data: Option<PathBuf>,

    /// Classify against this date instead of the system date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    today: Option<String>,

    /// Cache directory for fetched cycle data
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Cache TTL in hours (default: 24)
    #[arg(long, default_value = "24")]
    cache_ttl: u64,

    /// Bypass cache and fetch fresh cycle data
    #[arg(long)]
    refresh: bool,

    /// API timeout in seconds (default: 15)
    #[arg(long, default_value = "15")]
    api_timeout: u64,

    /// Exit 0 even when findings are present
    #[arg(long)]
    no_fail: bool,
}

/// Arguments for the `cycles` subcommand
#[derive(Parser)]
struct CyclesArgs {
    /// OS family (windows, android, ios, macos)
    family: OsFamily,

    /// Load build data from a directory of {family}.json files
    #[arg(long, value_name = "DIR")]
    build_data: Option<PathBuf>,

    /// Cache directory for fetched cycle data
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Bypass cache and fetch fresh cycle data
    #[arg(long)]
    refresh: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an inventory export against current release cycles
    Check(CheckArgs),

    /// Print the release cycles known for one OS family
    Cycles(CyclesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Check(args) => {
            let data = acquire_build_data(
                args.build_data.as_deref(),
                args.cache_dir.clone(),
                args.cache_ttl,
                args.refresh,
                args.api_timeout,
            )?;

            let config = CheckConfig {
                format: args.output,
                today: args.today.as_deref().map(parse_today).transpose()?,
            };

            let outcome = run_check(&args.inventory, data, &config)?;

            match &args.output_file {
                Some(path) => {
                    std::fs::write(path, &outcome.report)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Report written to {}", path.display());
                }
                None => print!("{}", outcome.report),
            }

            if outcome.stats.has_findings() && !args.no_fail {
                std::process::exit(exit_codes::FINDINGS);
            }
            Ok(())
        }

        Commands::Cycles(args) => {
            let data = acquire_build_data(
                args.build_data.as_deref(),
                args.cache_dir.clone(),
                24,
                args.refresh,
                15,
            )?;
            print_cycles(&data, args.family);
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "fleet-eol", &mut io::stdout());
            Ok(())
        }
    }
}

/// Obtain build data either from a local directory or from the API client.
fn acquire_build_data(
    build_data_dir: Option<&std::path::Path>,
    cache_dir: Option<PathBuf>,
    cache_ttl_hours: u64,
    refresh: bool,
    api_timeout_secs: u64,
) -> Result<BuildData> {
    let (data, stats) = match build_data_dir {
        Some(dir) => BuildDataClient::load_dir(dir)?,
        None => {
            let mut config = BuildDataConfig {
                cache_ttl: Duration::from_secs(cache_ttl_hours * 3600),
                timeout: Duration::from_secs(api_timeout_secs),
                bypass_cache: refresh,
                ..Default::default()
            };
            if let Some(dir) = cache_dir {
                config.cache_dir = dir;
            }
            BuildDataClient::new(config).fetch_all()?
        }
    };
    tracing::debug!(
        api_calls = stats.api_calls,
        cache_hits = stats.cache_hits,
        local_loads = stats.local_loads,
        "build data ready"
    );
    Ok(data)
}

fn parse_today(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid --today value '{s}', expected YYYY-MM-DD"))
}

fn print_cycles(data: &BuildData, family: OsFamily) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{} release cycles:", family.label());
    for cycle in data.cycles(family) {
        let _ = writeln!(
            stdout,
            "  {:<12} latest {:<18} eol {}",
            cycle.cycle,
            cycle.latest.as_deref().unwrap_or(NOT_AVAILABLE),
            cycle
                .eol
                .as_ref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string),
        );
    }
}
