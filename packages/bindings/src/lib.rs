use napi::Result as NapiResult;
use napi_derive::napi;

use fraud_analytics_core::types::Record;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_records(records_json: &str) -> NapiResult<Vec<Record>> {
    serde_json::from_str(records_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Per-record
// ---------------------------------------------------------------------------

/// Canonical year of one record, or null.
#[napi]
pub fn resolve_year(record_json: String) -> NapiResult<Option<i32>> {
    let record: Record = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    Ok(fraud_analytics_core::year::resolve_year(&record))
}

#[napi]
pub fn score_severity(record_json: String) -> NapiResult<String> {
    let record: Record = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let output = fraud_analytics_core::severity::score_severity(&record);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn node_size(record_json: String) -> NapiResult<String> {
    let record: Record = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let size = fraud_analytics_core::severity::node_size(&record);
    Ok(size.to_string())
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[napi]
pub fn available_years(records_json: String) -> NapiResult<Vec<i32>> {
    let records = parse_records(&records_json)?;
    Ok(fraud_analytics_core::year::available_years(&records))
}

#[napi]
pub fn aggregate_trends(records_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let output = fraud_analytics_core::trends::aggregate(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn detect_hotspots(records_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let buckets = fraud_analytics_core::trends::aggregate(&records);
    let output = fraud_analytics_core::trends::detect_hotspots(&buckets);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_stats(records_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let output = fraud_analytics_core::summary::calculate_stats(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn filter_records(records_json: String, filter_json: String) -> NapiResult<String> {
    let records = parse_records(&records_json)?;
    let filter: fraud_analytics_core::filters::RecordFilter =
        serde_json::from_str(&filter_json).map_err(to_napi_error)?;
    let output =
        fraud_analytics_core::filters::apply_filter(&records, &filter).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_dataset(input_json: String) -> NapiResult<String> {
    let input: fraud_analytics_core::analysis::AnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fraud_analytics_core::analysis::analyze_dataset(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
