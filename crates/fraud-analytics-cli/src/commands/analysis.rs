use clap::Args;
use serde_json::Value;

use fraud_analytics_core::analysis::{self, AnalysisInput};

use super::RecordArgs;
use crate::input;

/// Arguments for the full dataset analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub records: RecordArgs,

    /// Number of top cases to include
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// Edge count for the network summary (taken from the graph payload when present)
    #[arg(long)]
    pub edges: Option<usize>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::load_value(args.records.input.as_deref())?;

    // A prepared AnalysisInput document is used as-is; anything else is a record set
    let analysis_input = if document.get("records").is_some() && document.get("nodes").is_none() {
        serde_json::from_value::<AnalysisInput>(document)?
    } else {
        let edge_count = args.edges.or_else(|| input::edge_count(&document));
        let records = input::records_from_value(document)?;
        let filter = args.records.filter()?;
        AnalysisInput {
            records,
            filter: if filter.is_empty() { None } else { Some(filter) },
            edge_count,
            top_n: args.top_n,
        }
    };

    let result = analysis::analyze_dataset(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
