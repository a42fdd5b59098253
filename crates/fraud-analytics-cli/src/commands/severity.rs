use clap::Args;
use serde_json::Value;

use fraud_analytics_core::severity;

use super::RecordArgs;

/// Arguments for severity scoring
#[derive(Args)]
pub struct SeverityArgs {
    #[command(flatten)]
    pub records: RecordArgs,

    /// Score only the record with this id
    #[arg(long)]
    pub id: Option<String>,
}

pub fn run_severity(args: SeverityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = args.records.load()?;

    if let Some(ref id) = args.id {
        let record = records
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| format!("no record with id '{}'", id))?;
        let mut value = serde_json::to_value(severity::score_severity(record))?;
        if let Value::Object(ref mut map) = value {
            map.insert("id".into(), Value::String(record.id.clone()));
            map.insert(
                "node_size".into(),
                serde_json::to_value(severity::node_size(record))?,
            );
        }
        return Ok(value);
    }

    Ok(serde_json::to_value(severity::score_all(&records))?)
}
