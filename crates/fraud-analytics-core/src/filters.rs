//! Record filtering for the year slider, category selector, search box and
//! amount quick-filters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{EntityCategory, Money, Record, YearRange};
use crate::year::resolve_year;
use crate::{FraudAnalyticsError, FraudResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Inclusive. Records without a canonical year always pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityCategory>,
    /// Case-insensitive substring over label and id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Keep records whose fraud amount is strictly greater
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Money>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.year_range.is_none()
            && self.category.is_none()
            && self.search_query().is_none()
            && self.min_amount.is_none()
    }

    fn search_query(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    fn validate(&self) -> FraudResult<()> {
        if let Some(range) = self.year_range {
            if range.start > range.end {
                return Err(FraudAnalyticsError::InvalidInput {
                    field: "year_range".into(),
                    reason: format!("start {} is after end {}", range.start, range.end),
                });
            }
        }
        Ok(())
    }

    /// Whether a single record passes. Assumes the filter is valid.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(range) = self.year_range {
            if let Some(year) = resolve_year(record) {
                if !range.contains(year) {
                    return false;
                }
            }
        }
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(query) = self.search_query() {
            if !record.label.to_lowercase().contains(&query)
                && !record.id.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if record.fraud_value() <= min {
                return false;
            }
        }
        true
    }
}

/// Apply a filter, preserving input order.
pub fn apply_filter(records: &[Record], filter: &RecordFilter) -> FraudResult<Vec<Record>> {
    filter.validate()?;
    let kept: Vec<Record> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    debug!(before = records.len(), after = kept.len(), "applied record filter");
    Ok(kept)
}
