//! Dataset-level statistics for the sidebar and exported reports.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::amount::format_amount;
use crate::types::{EntityCategory, Money, Record};
use crate::year::resolve_year;

/// Fraud amount above which a record counts as a critical case.
const CRITICAL_CASE_AMOUNT: Decimal = dec!(100_000_000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_cases: usize,
    pub fraud_type_count: usize,
    pub organization_count: usize,
    pub total_fraud_amount: Money,
    pub total_recovered: Money,
    /// Percent, one decimal place
    pub recovery_rate_pct: Decimal,
    pub avg_case_value: Money,
    pub critical_cases: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCase {
    pub id: String,
    pub label: String,
    pub fraud_amount: Money,
    pub formatted_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_cases: usize,
    pub total_fraud_amount: String,
    pub total_recovered: String,
    pub recovery_rate: String,
    pub organizations: usize,
    pub fraud_types: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSize {
    pub nodes: usize,
    pub connections: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationSummary {
    pub title: String,
    pub statistics: SummaryStatistics,
    pub network: NetworkSize,
}

/// Counts and money totals over the given records.
///
/// Amounts from every record are summed, not only cases, since settlement
/// figures are often attached to organisation nodes.
pub fn calculate_stats(records: &[Record]) -> DatasetStats {
    let mut stats = DatasetStats {
        total_cases: 0,
        fraud_type_count: 0,
        organization_count: 0,
        total_fraud_amount: Decimal::ZERO,
        total_recovered: Decimal::ZERO,
        recovery_rate_pct: Decimal::ZERO,
        avg_case_value: Decimal::ZERO,
        critical_cases: 0,
    };

    for record in records {
        match record.category {
            EntityCategory::Case => stats.total_cases += 1,
            EntityCategory::FraudType => stats.fraud_type_count += 1,
            EntityCategory::Organization => stats.organization_count += 1,
            _ => {}
        }

        let fraud = record.fraud_value();
        stats.total_fraud_amount = stats.total_fraud_amount.saturating_add(fraud);
        stats.total_recovered = stats
            .total_recovered
            .saturating_add(record.settlement_value());
        if fraud > CRITICAL_CASE_AMOUNT {
            stats.critical_cases += 1;
        }
    }

    if stats.total_fraud_amount > Decimal::ZERO {
        stats.recovery_rate_pct = stats
            .total_recovered
            .checked_div(stats.total_fraud_amount)
            .and_then(|rate| rate.checked_mul(dec!(100)))
            .unwrap_or(Decimal::MAX)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    }
    if stats.total_cases > 0 {
        stats.avg_case_value = stats.total_fraud_amount / Decimal::from(stats.total_cases);
    }

    debug!(records = records.len(), cases = stats.total_cases, "calculated dataset stats");
    stats
}

/// Largest cases by parsed fraud amount. Cases without an amount are skipped.
pub fn top_cases(records: &[Record], limit: usize) -> Vec<TopCase> {
    let mut cases: Vec<TopCase> = records
        .iter()
        .filter(|r| r.category == EntityCategory::Case && r.fraud_amount.is_some())
        .map(|r| {
            let amount = r.fraud_value();
            TopCase {
                id: r.id.clone(),
                label: r.label.clone(),
                fraud_amount: amount,
                formatted_amount: format_amount(amount),
                canonical_year: resolve_year(r),
                status: r.status.clone(),
            }
        })
        .collect();

    cases.sort_by(|a, b| b.fraud_amount.cmp(&a.fraud_amount));
    cases.truncate(limit);
    cases
}

/// Number of fraud-type nodes per label.
pub fn fraud_distribution(records: &[Record]) -> BTreeMap<String, usize> {
    let mut dist = BTreeMap::new();
    for record in records.iter().filter(|r| r.category == EntityCategory::FraudType) {
        let key = if record.label.is_empty() {
            "Unknown".to_string()
        } else {
            record.label.clone()
        };
        *dist.entry(key).or_insert(0) += 1;
    }
    dist
}

/// Report header block with human-formatted totals.
pub fn generate_summary(records: &[Record], edge_count: usize) -> InvestigationSummary {
    let stats = calculate_stats(records);
    InvestigationSummary {
        title: "Fraud Investigation Summary".to_string(),
        statistics: SummaryStatistics {
            total_cases: stats.total_cases,
            total_fraud_amount: format_amount(stats.total_fraud_amount),
            total_recovered: format_amount(stats.total_recovered),
            recovery_rate: format!("{:.1}%", stats.recovery_rate_pct),
            organizations: stats.organization_count,
            fraud_types: stats.fraud_type_count,
        },
        network: NetworkSize {
            nodes: records.len(),
            connections: edge_count,
        },
    }
}
