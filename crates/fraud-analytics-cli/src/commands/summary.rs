use clap::Args;
use serde_json::Value;

use fraud_analytics_core::summary;

use super::RecordArgs;

/// Arguments for dataset statistics
#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

/// Arguments for the largest-cases ranking
#[derive(Args)]
pub struct TopCasesArgs {
    #[command(flatten)]
    pub records: RecordArgs,

    /// Number of cases to return
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Arguments for the fraud-type distribution
#[derive(Args)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

pub fn run_stats(args: StatsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    Ok(serde_json::to_value(summary::calculate_stats(&records))?)
}

pub fn run_top_cases(args: TopCasesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.limit == 0 {
        return Err("--limit must be at least 1".into());
    }
    let records = args.records.load()?;
    Ok(serde_json::to_value(summary::top_cases(&records, args.limit))?)
}

pub fn run_distribution(args: DistributionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    Ok(serde_json::to_value(summary::fraud_distribution(&records))?)
}
