use clap::Args;
use serde_json::{json, Value};

use fraud_analytics_core::trends;

use super::RecordArgs;

/// Arguments for yearly trend aggregation
#[derive(Args)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

/// Arguments for hotspot detection
#[derive(Args)]
pub struct HotspotsArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

pub fn run_trends(args: TrendsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    let buckets = trends::aggregate(&records);

    // One row per year reads better in table/CSV output than a keyed map
    let rows: Vec<Value> = buckets
        .iter()
        .map(|(year, b)| {
            json!({
                "year": year,
                "case_count": b.case_count,
                "total_amount": b.total_amount,
                "average_amount": b.average_amount.round_dp(2),
                "category_count": b.category_count,
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

pub fn run_hotspots(args: HotspotsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    let hotspots = trends::detect_hotspots(&trends::aggregate(&records));
    Ok(serde_json::to_value(hotspots)?)
}
