use fraud_analytics_core::analysis::{self, AnalysisInput};
use fraud_analytics_core::filters::RecordFilter;
use fraud_analytics_core::severity::SeverityTier;
use fraud_analytics_core::types::{EntityCategory, YearRange};
use fraud_analytics_core::FraudAnalyticsError;
use rust_decimal_macros::dec;

fn graph_nodes() -> serde_json::Value {
    serde_json::json!([
        {"id": "org_dod", "label": "Department of Defense", "shape": "ellipse"},
        {"id": "ft_bribery", "label": "Bribery", "shape": "box"},
        {"id": "ft_overbilling", "label": "Overbilling", "category": "fraud_type"},
        {"id": "case_a", "label": "DoD Contractor X", "category": "case",
         "fraud_amount": "$1,200,000,000", "settlement_amount": "$100,000,000", "year": 2024},
        {"id": "case_b", "label": "Fuel theft ring", "category": "case",
         "fraud_amount": "$20,000,000", "settlement_amount": "$18,000,000", "fraud_period": "2015-2018"},
        {"id": "case_c", "label": "TRICARE kickbacks", "category": "case",
         "fraud_amount": "$65,000,000", "settlement_amount": "$5,000,000", "conviction_year": 2018},
        {"id": "case_d", "label": "Parts inflation", "category": "case",
         "fraud_amount": "$3,000,000", "discovered_year": 2018}
    ])
}

fn input() -> AnalysisInput {
    let records = serde_json::from_value(graph_nodes()).unwrap();
    AnalysisInput {
        edge_count: Some(9),
        ..AnalysisInput::new(records)
    }
}

// ===========================================================================
// Full dataset analysis
// ===========================================================================

#[test]
fn test_analyze_full_dataset() {
    let out = analysis::analyze_dataset(&input()).unwrap();
    let a = &out.result;

    assert_eq!(a.total_records, 7);
    assert_eq!(a.filtered_records, 7);
    assert_eq!(a.undated_records, 3);
    assert_eq!(a.year_span, YearRange { start: 2015, end: 2024 });

    assert_eq!(a.stats.total_cases, 4);
    assert_eq!(a.stats.fraud_type_count, 2);
    assert_eq!(a.stats.organization_count, 1);
    assert_eq!(a.stats.total_fraud_amount, dec!(1_288_000_000));

    assert_eq!(a.trends.len(), 2);
    assert_eq!(a.trends[&2018].case_count, 3);
    assert_eq!(a.trends[&2024].case_count, 1);
    // mean 2, threshold 3: 2018 at 3 is not strictly above
    assert!(a.hotspots.is_empty());

    assert_eq!(a.top_cases[0].id, "case_a");
    assert_eq!(a.distribution.len(), 2);
    assert_eq!(a.tier_counts[&SeverityTier::Critical], 1);
    assert_eq!(a.summary.network.connections, 9);

    assert!(out.warnings.iter().any(|w| w.contains("no resolvable year")));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_analyze_with_filter_keeps_full_span() {
    let mut inp = input();
    inp.filter = Some(RecordFilter {
        year_range: Some(YearRange { start: 2016, end: 2020 }),
        category: Some(EntityCategory::Case),
        ..Default::default()
    });
    inp.top_n = 1;

    let out = analysis::analyze_dataset(&inp).unwrap();
    let a = &out.result;
    assert_eq!(a.filtered_records, 3);
    assert_eq!(a.year_span, YearRange { start: 2015, end: 2024 });
    assert_eq!(a.top_cases.len(), 1);
    assert_eq!(a.top_cases[0].id, "case_c");
    assert!(out.warnings.iter().any(|w| w.contains("hotspot detection skipped")));
}

#[test]
fn test_analyze_rejects_bad_input() {
    let empty = AnalysisInput::new(Vec::new());
    assert!(matches!(
        analysis::analyze_dataset(&empty),
        Err(FraudAnalyticsError::InsufficientData(_))
    ));

    let mut inp = input();
    inp.top_n = 0;
    assert!(matches!(
        analysis::analyze_dataset(&inp),
        Err(FraudAnalyticsError::InvalidInput { .. })
    ));
}

#[test]
fn test_input_json_defaults() {
    let inp: AnalysisInput =
        serde_json::from_value(serde_json::json!({"records": graph_nodes()})).unwrap();
    assert_eq!(inp.top_n, 10);
    assert!(inp.filter.is_none());
}
