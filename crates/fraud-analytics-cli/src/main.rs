mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::AnalyzeArgs;
use commands::severity::SeverityArgs;
use commands::summary::{DistributionArgs, StatsArgs, TopCasesArgs};
use commands::trends::{HotspotsArgs, TrendsArgs};
use commands::year::{ResolveYearArgs, YearsArgs};

/// Fraud investigation graph analytics
#[derive(Parser)]
#[command(
    name = "fraudctl",
    version,
    about = "Fraud investigation graph analytics",
    long_about = "Scores fraud severity, resolves canonical years and aggregates yearly \
                  trends over knowledge-graph node exports. Reads a JSON/YAML record \
                  file via --input, or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the canonical year of every record
    ResolveYear(ResolveYearArgs),
    /// List every year mentioned in the dataset and its span
    Years(YearsArgs),
    /// Score fraud severity (all records, or one with --id)
    Severity(SeverityArgs),
    /// Aggregate records into yearly buckets
    Trends(TrendsArgs),
    /// Detect years with anomalous case volume
    Hotspots(HotspotsArgs),
    /// Dataset statistics (counts, totals, recovery rate)
    Stats(StatsArgs),
    /// Largest cases by fraud amount
    TopCases(TopCasesArgs),
    /// Count of fraud-type nodes per label
    Distribution(DistributionArgs),
    /// Run the full dashboard analysis in one pass
    Analyze(AnalyzeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::ResolveYear(args) => commands::year::run_resolve_year(args),
        Commands::Years(args) => commands::year::run_years(args),
        Commands::Severity(args) => commands::severity::run_severity(args),
        Commands::Trends(args) => commands::trends::run_trends(args),
        Commands::Hotspots(args) => commands::trends::run_hotspots(args),
        Commands::Stats(args) => commands::summary::run_stats(args),
        Commands::TopCases(args) => commands::summary::run_top_cases(args),
        Commands::Distribution(args) => commands::summary::run_distribution(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args),
        Commands::Version => {
            println!("fraudctl {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
