use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;

use crate::filters::{apply_filter, RecordFilter};
use crate::severity::{score_all, SeverityTier};
use crate::summary::{
    calculate_stats, fraud_distribution, generate_summary, top_cases, DatasetStats,
    InvestigationSummary, TopCase,
};
use crate::trends::{aggregate, detect_hotspots, year_over_year, Hotspot, YearBucket, YearChange};
use crate::types::*;
use crate::year::{resolve_year, year_span};
use crate::{FraudAnalyticsError, FraudResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

fn default_top_n() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub records: Vec<Record>,
    #[serde(default)]
    pub filter: Option<RecordFilter>,
    /// Number of graph edges, for the network section of the summary
    #[serde(default)]
    pub edge_count: Option<usize>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl AnalysisInput {
    pub fn new(records: Vec<Record>) -> Self {
        AnalysisInput {
            records,
            filter: None,
            edge_count: None,
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub total_records: usize,
    pub filtered_records: usize,
    pub undated_records: usize,
    /// Year span of the unfiltered dataset, for the range control
    pub year_span: YearRange,
    pub stats: DatasetStats,
    pub trends: BTreeMap<i32, YearBucket>,
    pub hotspots: Vec<Hotspot>,
    pub year_over_year: Vec<YearChange>,
    pub top_cases: Vec<TopCase>,
    pub distribution: BTreeMap<String, usize>,
    pub tier_counts: BTreeMap<SeverityTier, usize>,
    pub summary: InvestigationSummary,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every dashboard aggregation over one record snapshot.
///
/// Stats, trends and rankings are computed on the filtered set; the year span
/// always reflects the full dataset so the range control does not shrink as
/// it is dragged.
pub fn analyze_dataset(input: &AnalysisInput) -> FraudResult<ComputationOutput<DatasetAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let filter = input.filter.clone().unwrap_or_default();
    let filtered = apply_filter(&input.records, &filter)?;

    let undated = filtered.iter().filter(|r| resolve_year(r).is_none()).count();
    if undated > 0 {
        warnings.push(format!(
            "{undated} record(s) have no resolvable year and are excluded from trends."
        ));
    }

    let trends = aggregate(&filtered);
    if trends.len() < 2 {
        warnings.push(
            "Fewer than two distinct years present; hotspot detection skipped.".to_string(),
        );
    }
    let hotspots = detect_hotspots(&trends);
    let changes = year_over_year(&trends);

    let output = DatasetAnalysis {
        total_records: input.records.len(),
        filtered_records: filtered.len(),
        undated_records: undated,
        year_span: year_span(&input.records),
        stats: calculate_stats(&filtered),
        hotspots,
        year_over_year: changes,
        top_cases: top_cases(&filtered, input.top_n),
        distribution: fraud_distribution(&filtered),
        tier_counts: score_all(&filtered).tier_counts,
        summary: generate_summary(&filtered, input.edge_count.unwrap_or(0)),
        trends,
    };

    debug!(
        total = output.total_records,
        filtered = output.filtered_records,
        hotspots = output.hotspots.len(),
        "dataset analysis complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "year_window": "1990-2030; numeric year fields before period text, last year in a period",
        "severity": "amount (40) + recovery (30) + impact (15/10/10) + recency (10); tiers 80/60/40",
        "hotspot_rule": "case count > 1.5 x mean yearly count, at least two years",
        "amount_parsing": "non [0-9.-] characters stripped, '.' decimal separator",
        "filter": filter,
    });

    Ok(with_metadata(
        "Fraud knowledge-graph severity, trend and hotspot analysis",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &AnalysisInput) -> FraudResult<()> {
    if input.records.is_empty() {
        return Err(FraudAnalyticsError::InsufficientData(
            "At least one record is required for dataset analysis.".into(),
        ));
    }
    if input.top_n == 0 {
        return Err(FraudAnalyticsError::InvalidInput {
            field: "top_n".into(),
            reason: "Must be at least 1.".into(),
        });
    }
    Ok(())
}
