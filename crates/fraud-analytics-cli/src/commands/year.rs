use clap::Args;
use serde_json::{json, Value};

use fraud_analytics_core::year;

use super::RecordArgs;

/// Arguments for canonical year resolution
#[derive(Args)]
pub struct ResolveYearArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

/// Arguments for the dataset year listing
#[derive(Args)]
pub struct YearsArgs {
    #[command(flatten)]
    pub records: RecordArgs,
}

pub fn run_resolve_year(args: ResolveYearArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    let rows: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "label": r.label,
                "canonical_year": year::resolve_year(r),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

pub fn run_years(args: YearsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;
    Ok(json!({
        "years": year::available_years(&records),
        "span": year::year_span(&records),
    }))
}
