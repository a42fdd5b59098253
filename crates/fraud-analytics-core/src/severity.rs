//! Fraud severity scoring.
//!
//! Four additive factors produce an integer score: amount (max 40),
//! recovery shortfall (max 30), organisational impact (uncapped, up to 35)
//! and recency (max 10). The score maps onto a [`SeverityTier`]. Scoring is
//! total: missing or unparseable fields contribute their lowest band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{EntityCategory, Money, Rate, Record};
use crate::year::resolve_year;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::Critical
        } else if score >= 60 {
            Self::High
        } else if score >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Node size weight applied by the graph renderer.
    pub fn size_multiplier(&self) -> Decimal {
        match self {
            Self::Critical => dec!(1.8),
            Self::High => dec!(1.5),
            Self::Medium => dec!(1.2),
            Self::Low => dec!(0.9),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "#ff0000",
            Self::High => "#ff6600",
            Self::Medium => "#ffcc00",
            Self::Low => "#44ff44",
        }
    }

    pub fn pulse(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }

    pub const ALL: [SeverityTier; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityFactor {
    pub name: String,
    pub points: u32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    pub score: u32,
    pub tier: SeverityTier,
    pub size_multiplier: Decimal,
    pub label: String,
    pub color: String,
    pub pulse: bool,
    pub recovery_rate: Rate,
    pub factors: Vec<SeverityFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: String,
    pub label: String,
    pub category: EntityCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_year: Option<i32>,
    pub severity: SeverityAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityReport {
    pub records: Vec<ScoredRecord>,
    pub tier_counts: BTreeMap<SeverityTier, usize>,
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// (exclusive lower bound, points), checked top-down.
const AMOUNT_BANDS: [(Decimal, u32); 7] = [
    (dec!(1_000_000_000), 40),
    (dec!(500_000_000), 35),
    (dec!(100_000_000), 30),
    (dec!(50_000_000), 25),
    (dec!(10_000_000), 20),
    (dec!(1_000_000), 15),
    (dec!(100_000), 10),
];
const AMOUNT_FLOOR: u32 = 5;

/// (exclusive upper bound on recovery rate, points), checked bottom-up.
const RECOVERY_BANDS: [(Decimal, u32); 4] = [
    (dec!(0.2), 30),
    (dec!(0.4), 25),
    (dec!(0.6), 20),
    (dec!(0.8), 10),
];
const RECOVERY_FLOOR: u32 = 5;

const CASE_POINTS: u32 = 15;
const DEFENSE_POINTS: u32 = 10;
const MILITARY_POINTS: u32 = 10;

/// (inclusive minimum year, points)
const RECENCY_BANDS: [(i32, u32); 3] = [(2023, 10), (2020, 7), (2015, 5)];

/// Base node sizes by amount, same thresholds as the amount factor.
const SIZE_BANDS: [(Decimal, Decimal); 7] = [
    (dec!(1_000_000_000), dec!(2.5)),
    (dec!(500_000_000), dec!(2.2)),
    (dec!(100_000_000), dec!(2.0)),
    (dec!(50_000_000), dec!(1.8)),
    (dec!(10_000_000), dec!(1.6)),
    (dec!(1_000_000), dec!(1.4)),
    (dec!(100_000), dec!(1.2)),
];

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

pub fn amount_points(amount: Money) -> u32 {
    AMOUNT_BANDS
        .iter()
        .find(|(threshold, _)| amount > *threshold)
        .map(|(_, pts)| *pts)
        .unwrap_or(AMOUNT_FLOOR)
}

/// Settlement over fraud amount; zero when there is no positive fraud amount.
pub fn recovery_rate(fraud: Money, settlement: Money) -> Rate {
    if fraud > Decimal::ZERO {
        // saturates when a dust-sized fraud amount meets a huge settlement
        settlement.checked_div(fraud).unwrap_or(if settlement.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    } else {
        Decimal::ZERO
    }
}

pub fn recovery_points(rate: Rate) -> u32 {
    RECOVERY_BANDS
        .iter()
        .find(|(ceiling, _)| rate < *ceiling)
        .map(|(_, pts)| *pts)
        .unwrap_or(RECOVERY_FLOOR)
}

pub fn recency_points(year: Option<i32>) -> u32 {
    year.and_then(|y| {
        RECENCY_BANDS
            .iter()
            .find(|(min, _)| y >= *min)
            .map(|(_, pts)| *pts)
    })
    .unwrap_or(0)
}

fn impact_factors(record: &Record) -> Vec<SeverityFactor> {
    let mut factors = Vec::new();
    if record.category == EntityCategory::Case {
        factors.push(SeverityFactor {
            name: "case".into(),
            points: CASE_POINTS,
            detail: "Record is an investigated case".into(),
        });
    }
    if record.label.contains("DoD") || record.label.contains("Defense") {
        factors.push(SeverityFactor {
            name: "defense_involvement".into(),
            points: DEFENSE_POINTS,
            detail: "Label references DoD or Defense".into(),
        });
    }
    if record.label.contains("Military") {
        factors.push(SeverityFactor {
            name: "military_involvement".into(),
            points: MILITARY_POINTS,
            detail: "Label references Military".into(),
        });
    }
    factors
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a single record. Never fails.
pub fn score_severity(record: &Record) -> SeverityAssessment {
    let fraud = record.fraud_value();
    let rate = recovery_rate(fraud, record.settlement_value());
    let year = resolve_year(record);

    let mut factors = vec![
        SeverityFactor {
            name: "amount".into(),
            points: amount_points(fraud),
            detail: format!("Fraud amount {}", fraud.normalize()),
        },
        SeverityFactor {
            name: "recovery".into(),
            points: recovery_points(rate),
            detail: format!("Recovery rate {}", rate.round_dp(4).normalize()),
        },
    ];
    factors.extend(impact_factors(record));
    factors.push(SeverityFactor {
        name: "recency".into(),
        points: recency_points(year),
        detail: match year {
            Some(y) => format!("Canonical year {y}"),
            None => "No canonical year".into(),
        },
    });

    let score: u32 = factors.iter().map(|f| f.points).sum();
    let tier = SeverityTier::from_score(score);

    SeverityAssessment {
        score,
        tier,
        size_multiplier: tier.size_multiplier(),
        label: tier.label().to_string(),
        color: tier.color().to_string(),
        pulse: tier.pulse(),
        recovery_rate: rate,
        factors,
    }
}

/// Rendered node size: amount-based base size scaled by the tier multiplier.
pub fn node_size(record: &Record) -> Decimal {
    let fraud = record.fraud_value();
    let base = SIZE_BANDS
        .iter()
        .find(|(threshold, _)| fraud > *threshold)
        .map(|(_, size)| *size)
        .unwrap_or(Decimal::ONE);
    base * score_severity(record).size_multiplier
}

/// Score every record and tally tiers.
pub fn score_all(records: &[Record]) -> SeverityReport {
    let mut tier_counts: BTreeMap<SeverityTier, usize> =
        SeverityTier::ALL.iter().map(|t| (*t, 0)).collect();

    let scored: Vec<ScoredRecord> = records
        .iter()
        .map(|r| {
            let severity = score_severity(r);
            *tier_counts.entry(severity.tier).or_insert(0) += 1;
            ScoredRecord {
                id: r.id.clone(),
                label: r.label.clone(),
                category: r.category,
                canonical_year: resolve_year(r),
                severity,
            }
        })
        .collect();

    debug!(records = records.len(), ?tier_counts, "scored severity");

    SeverityReport {
        records: scored,
        tier_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawAmount;

    fn case(label: &str, fraud: &str, settlement: &str, year: i64) -> Record {
        Record {
            id: "case_x".into(),
            label: label.into(),
            category: EntityCategory::Case,
            fraud_amount: Some(RawAmount::from(fraud)),
            settlement_amount: Some(RawAmount::from(settlement)),
            year: Some(year),
            ..Default::default()
        }
    }

    #[test]
    fn test_dod_contractor_example() {
        let r = case("DoD Contractor X", "$1,200,000,000", "$100,000,000", 2024);
        let s = score_severity(&r);
        assert_eq!(s.score, 105);
        assert_eq!(s.tier, SeverityTier::Critical);
        assert_eq!(s.size_multiplier, dec!(1.8));
        assert!(s.pulse);

        let pts: Vec<(&str, u32)> = s.factors.iter().map(|f| (f.name.as_str(), f.points)).collect();
        assert_eq!(
            pts,
            vec![("amount", 40), ("recovery", 30), ("case", 15), ("defense_involvement", 10), ("recency", 10)]
        );
    }

    #[test]
    fn test_amount_bands_strict() {
        assert_eq!(amount_points(dec!(1_000_000_000)), 35);
        assert_eq!(amount_points(dec!(1_000_000_001)), 40);
        assert_eq!(amount_points(dec!(100_000)), 5);
        assert_eq!(amount_points(dec!(100_001)), 10);
        assert_eq!(amount_points(dec!(-5)), 5);
    }

    #[test]
    fn test_amount_monotonic() {
        let samples = [
            dec!(0), dec!(50_000), dec!(100_000), dec!(250_000), dec!(1_000_000),
            dec!(9_999_999), dec!(10_000_001), dec!(75_000_000), dec!(100_000_000),
            dec!(600_000_000), dec!(1_000_000_000), dec!(5_000_000_000),
        ];
        for pair in samples.windows(2) {
            assert!(amount_points(pair[1]) >= amount_points(pair[0]));
        }
    }

    #[test]
    fn test_recovery_bands() {
        assert_eq!(recovery_rate(Decimal::ZERO, dec!(100)), Decimal::ZERO);
        assert_eq!(recovery_points(dec!(0.19)), 30);
        assert_eq!(recovery_points(dec!(0.2)), 25);
        assert_eq!(recovery_points(dec!(0.5)), 20);
        assert_eq!(recovery_points(dec!(0.79)), 10);
        assert_eq!(recovery_points(dec!(0.8)), 5);
        assert_eq!(recovery_points(dec!(1.3)), 5);
    }

    #[test]
    fn test_recency_bands() {
        assert_eq!(recency_points(Some(2023)), 10);
        assert_eq!(recency_points(Some(2021)), 7);
        assert_eq!(recency_points(Some(2015)), 5);
        assert_eq!(recency_points(Some(2014)), 0);
        assert_eq!(recency_points(None), 0);
    }

    #[test]
    fn test_empty_record_is_low() {
        let r = Record::new("org_1", EntityCategory::Organization);
        let s = score_severity(&r);
        // amount floor 5 + recovery rate 0 → 30
        assert_eq!(s.score, 35);
        assert_eq!(s.tier, SeverityTier::Low);
    }

    #[test]
    fn test_unparseable_amount_is_zero() {
        let r = case("Audit finding", "undisclosed", "n/a", 2010);
        let s = score_severity(&r);
        assert_eq!(s.recovery_rate, Decimal::ZERO);
        assert_eq!(s.score, 5 + 30 + 15);
        assert_eq!(s.tier, SeverityTier::Medium);
    }

    #[test]
    fn test_recovery_rate_overflow_saturates() {
        let r = case(
            "Shell invoice",
            "$0.0000000001",
            "$79,228,162,514,264,337,593,543,950,335",
            2010,
        );
        let s = score_severity(&r);
        assert_eq!(s.recovery_rate, Decimal::MAX);
        // amount floor 5 + best recovery band 5 + impact 15
        assert_eq!(s.score, 5 + 5 + 15);
        assert_eq!(s.tier, SeverityTier::Low);
    }

    #[test]
    fn test_label_matching_case_sensitive() {
        let r = case("defense logistics military", "$50", "$0", 2000);
        let s = score_severity(&r);
        assert!(s.factors.iter().all(|f| f.name != "defense_involvement"));
        assert!(s.factors.iter().all(|f| f.name != "military_involvement"));

        let r = case("Defense Military depot", "$50", "$0", 2000);
        assert_eq!(score_severity(&r).score, 5 + 30 + 15 + 10 + 10);
    }

    #[test]
    fn test_node_size() {
        let r = case("DoD Contractor X", "$1,200,000,000", "$100,000,000", 2024);
        assert_eq!(node_size(&r), dec!(4.5));

        let small = Record::new("s", EntityCategory::Statistic);
        assert_eq!(node_size(&small), dec!(0.9));
    }

    #[test]
    fn test_score_all_tallies() {
        let records = vec![
            case("DoD Contractor X", "$1,200,000,000", "$100,000,000", 2024),
            Record::new("org_1", EntityCategory::Organization),
        ];
        let report = score_all(&records);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].canonical_year, Some(2024));
        assert_eq!(report.tier_counts[&SeverityTier::Critical], 1);
        assert_eq!(report.tier_counts[&SeverityTier::Low], 1);
        assert_eq!(report.tier_counts[&SeverityTier::High], 0);
    }
}
