//! Yearly trend aggregation and hotspot detection.
//!
//! Records are bucketed by canonical year. A hotspot is a year whose case
//! count exceeds 1.5x the mean count across all populated years.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::types::{EntityCategory, Money, Record};
use crate::year::resolve_year;

const HOTSPOT_FACTOR: Decimal = dec!(1.5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBucket {
    pub case_count: usize,
    pub total_amount: Money,
    pub average_amount: Money,
    pub category_count: usize,
    pub categories: BTreeSet<EntityCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub year: i32,
    pub case_count: usize,
    /// Percent above the mean, one decimal place
    pub anomaly_percent: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendIndicator {
    pub direction: TrendDirection,
    pub symbol: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearChange {
    pub year: i32,
    pub previous_year: i32,
    pub case_count: usize,
    pub previous_case_count: usize,
    pub indicator: TrendIndicator,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group records by canonical year. Yearless records are left out.
pub fn aggregate(records: &[Record]) -> BTreeMap<i32, YearBucket> {
    let mut buckets: BTreeMap<i32, YearBucket> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(year) = resolve_year(record) else {
            skipped += 1;
            continue;
        };
        let bucket = buckets.entry(year).or_insert_with(|| YearBucket {
            case_count: 0,
            total_amount: Decimal::ZERO,
            average_amount: Decimal::ZERO,
            category_count: 0,
            categories: BTreeSet::new(),
        });
        bucket.case_count += 1;
        bucket.total_amount = bucket.total_amount.saturating_add(record.fraud_value());
        bucket.categories.insert(record.category);
    }

    for bucket in buckets.values_mut() {
        bucket.average_amount = bucket.total_amount / Decimal::from(bucket.case_count);
        bucket.category_count = bucket.categories.len();
    }

    debug!(years = buckets.len(), skipped, "aggregated yearly buckets");
    buckets
}

/// Years whose case count exceeds 1.5x the mean, most anomalous first.
///
/// Needs at least two years to compare against; otherwise empty.
pub fn detect_hotspots(buckets: &BTreeMap<i32, YearBucket>) -> Vec<Hotspot> {
    if buckets.len() < 2 {
        return Vec::new();
    }

    let total: usize = buckets.values().map(|b| b.case_count).sum();
    let mean = Decimal::from(total) / Decimal::from(buckets.len());
    let threshold = mean * HOTSPOT_FACTOR;

    let mut hotspots: Vec<Hotspot> = buckets
        .iter()
        .filter(|(_, b)| Decimal::from(b.case_count) > threshold)
        .map(|(year, b)| Hotspot {
            year: *year,
            case_count: b.case_count,
            anomaly_percent: ((Decimal::from(b.case_count) / mean - Decimal::ONE) * dec!(100))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect();

    // sort_by is stable: equal anomalies stay in ascending year order
    hotspots.sort_by(|a, b| b.anomaly_percent.cmp(&a.anomaly_percent));

    debug!(%mean, hotspots = hotspots.len(), "hotspot scan");
    hotspots
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

pub fn trend_indicator(current: Decimal, previous: Decimal) -> TrendIndicator {
    let (direction, symbol, color) = if current > previous {
        (TrendDirection::Up, "↑", "#ff4444")
    } else if current < previous {
        (TrendDirection::Down, "↓", "#44ff44")
    } else {
        (TrendDirection::Stable, "→", "#ffcc00")
    };
    TrendIndicator {
        direction,
        symbol: symbol.to_string(),
        color: color.to_string(),
    }
}

/// Case-count change between each pair of consecutive populated years.
pub fn year_over_year(buckets: &BTreeMap<i32, YearBucket>) -> Vec<YearChange> {
    let entries: Vec<(&i32, &YearBucket)> = buckets.iter().collect();
    entries
        .windows(2)
        .map(|pair| {
            let (prev_year, prev) = pair[0];
            let (year, cur) = pair[1];
            YearChange {
                year: *year,
                previous_year: *prev_year,
                case_count: cur.case_count,
                previous_case_count: prev.case_count,
                indicator: trend_indicator(
                    Decimal::from(cur.case_count),
                    Decimal::from(prev.case_count),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawAmount;

    fn bucket(count: usize) -> YearBucket {
        YearBucket {
            case_count: count,
            total_amount: Decimal::ZERO,
            average_amount: Decimal::ZERO,
            category_count: 1,
            categories: BTreeSet::from([EntityCategory::Case]),
        }
    }

    fn dated(id: &str, year: i64, amount: &str, category: EntityCategory) -> Record {
        Record {
            id: id.into(),
            category,
            year: Some(year),
            fraud_amount: Some(RawAmount::from(amount)),
            ..Default::default()
        }
    }

    #[test]
    fn test_hotspot_example() {
        let buckets = BTreeMap::from([(2019, bucket(2)), (2020, bucket(2)), (2021, bucket(8)), (2022, bucket(2))]);
        let hotspots = detect_hotspots(&buckets);
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].year, 2021);
        assert_eq!(hotspots[0].case_count, 8);
        assert_eq!(hotspots[0].anomaly_percent, dec!(128.6));
    }

    #[test]
    fn test_single_year_no_hotspots() {
        let buckets = BTreeMap::from([(2020, bucket(40))]);
        assert!(detect_hotspots(&buckets).is_empty());
        assert!(detect_hotspots(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_hotspots_sorted_desc() {
        let buckets = BTreeMap::from([
            (2010, bucket(1)),
            (2011, bucket(1)),
            (2012, bucket(1)),
            (2013, bucket(1)),
            (2014, bucket(1)),
            (2015, bucket(1)),
            (2016, bucket(6)),
            (2017, bucket(12)),
        ]);
        // mean = 24 / 8 = 3, threshold 4.5
        let hotspots = detect_hotspots(&buckets);
        let years: Vec<i32> = hotspots.iter().map(|h| h.year).collect();
        assert_eq!(years, vec![2017, 2016]);
        assert_eq!(hotspots[0].anomaly_percent, dec!(300));
        assert_eq!(hotspots[1].anomaly_percent, dec!(100));
    }

    #[test]
    fn test_aggregate_buckets() {
        let records = vec![
            dated("a", 2020, "$1,000", EntityCategory::Case),
            dated("b", 2020, "$3,000", EntityCategory::Organization),
            dated("c", 2020, "n/a", EntityCategory::Case),
            dated("d", 2021, "$500", EntityCategory::Case),
            Record::new("yearless", EntityCategory::Case),
        ];
        let buckets = aggregate(&records);
        assert_eq!(buckets.len(), 2);

        let b2020 = &buckets[&2020];
        assert_eq!(b2020.case_count, 3);
        assert_eq!(b2020.total_amount, dec!(4000));
        assert_eq!(b2020.average_amount.round_dp(2), dec!(1333.33));
        assert_eq!(b2020.category_count, 2);

        assert_eq!(buckets[&2021].case_count, 1);
    }

    #[test]
    fn test_aggregate_saturates_on_huge_amounts() {
        let max = "$79,228,162,514,264,337,593,543,950,335";
        let records = vec![
            dated("a", 2020, max, EntityCategory::Case),
            dated("b", 2020, max, EntityCategory::Case),
        ];
        let buckets = aggregate(&records);
        assert_eq!(buckets[&2020].case_count, 2);
        assert_eq!(buckets[&2020].total_amount, Decimal::MAX);
        assert_eq!(buckets[&2020].average_amount, Decimal::MAX / dec!(2));
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_year_over_year() {
        let buckets = BTreeMap::from([(2018, bucket(3)), (2019, bucket(5)), (2021, bucket(5)), (2022, bucket(1))]);
        let changes = year_over_year(&buckets);
        let dirs: Vec<TrendDirection> = changes.iter().map(|c| c.indicator.direction).collect();
        assert_eq!(dirs, vec![TrendDirection::Up, TrendDirection::Stable, TrendDirection::Down]);
        assert_eq!(changes[1].previous_year, 2019);
        assert_eq!(changes[1].year, 2021);
    }
}
