use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::amount::parse_amount;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Node category in the investigation graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Organization,
    FraudType,
    Case,
    Statistic,
    Scheme,
    #[default]
    Unknown,
}

impl EntityCategory {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "organization" | "organisation" => Self::Organization,
            "fraud_type" => Self::FraudType,
            "case" => Self::Case,
            "statistic" => Self::Statistic,
            "scheme" => Self::Scheme,
            _ => Self::Unknown,
        }
    }

    /// Map the graph widget's node shape back to a category.
    ///
    /// `box` is shared by fraud types and schemes upstream; the dashboard
    /// counts every box as a fraud type, so that is what we return.
    pub fn from_shape(shape: &str) -> Self {
        match shape {
            "diamond" => Self::Case,
            "box" => Self::FraudType,
            "ellipse" => Self::Organization,
            "dot" => Self::Statistic,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::FraudType => "fraud_type",
            Self::Case => "case",
            Self::Statistic => "statistic",
            Self::Scheme => "scheme",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => EntityCategory::parse(&s),
            _ => EntityCategory::Unknown,
        })
    }
}

/// A currency value as it arrived: free text such as `"$1,200,000"` or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    /// Parsed value; anything unparseable is zero.
    pub fn value(&self) -> Money {
        match self {
            RawAmount::Text(s) => parse_amount(s),
            RawAmount::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Decimal::from(i)
                } else if let Some(u) = n.as_u64() {
                    Decimal::from(u)
                } else {
                    n.as_f64().and_then(Decimal::from_f64).unwrap_or_default()
                }
            }
        }
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

/// One node of the investigation graph.
///
/// Deserialization is lenient: year fields that are not numbers and period
/// fields that are not strings are treated as absent, and a missing
/// `category` is recovered from `entity_type` or the widget `shape`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub category: EntityCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_amount: Option<RawAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_amount: Option<RawAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conviction_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bankruptcy_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retirement_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bribery_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, category: EntityCategory) -> Self {
        Record {
            id: id.into(),
            category,
            ..Default::default()
        }
    }

    /// Parsed fraud amount, zero when absent or unparseable.
    pub fn fraud_value(&self) -> Money {
        self.fraud_amount
            .as_ref()
            .map(RawAmount::value)
            .unwrap_or_default()
    }

    /// Parsed settlement (recovered) amount, zero when absent or unparseable.
    pub fn settlement_value(&self) -> Money {
        self.settlement_amount
            .as_ref()
            .map(RawAmount::value)
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct RecordWire {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    category: Option<EntityCategory>,
    #[serde(default)]
    entity_type: Option<EntityCategory>,
    #[serde(default)]
    shape: Option<Value>,
    #[serde(default)]
    fraud_amount: Option<Value>,
    #[serde(default)]
    settlement_amount: Option<Value>,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default)]
    fiscal_year: Option<Value>,
    #[serde(default)]
    discovered_year: Option<Value>,
    #[serde(default)]
    discovery_year: Option<Value>,
    #[serde(default)]
    conviction_year: Option<Value>,
    #[serde(default)]
    bankruptcy_year: Option<Value>,
    #[serde(default)]
    shutdown_year: Option<Value>,
    #[serde(default)]
    retirement_year: Option<Value>,
    #[serde(default)]
    period: Option<Value>,
    #[serde(default)]
    fraud_period: Option<Value>,
    #[serde(default)]
    bribery_period: Option<Value>,
    #[serde(default)]
    time_period: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
}

impl From<RecordWire> for Record {
    fn from(w: RecordWire) -> Self {
        let category = [w.category, w.entity_type]
            .into_iter()
            .flatten()
            .find(|c| *c != EntityCategory::Unknown)
            .or_else(|| {
                w.shape
                    .and_then(text_field)
                    .map(|shape| EntityCategory::from_shape(&shape))
            })
            .unwrap_or_default();

        Record {
            id: match w.id {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            },
            label: w.label.and_then(text_field).unwrap_or_default(),
            category,
            fraud_amount: w.fraud_amount.and_then(amount_field),
            settlement_amount: w.settlement_amount.and_then(amount_field),
            year: w.year.and_then(numeric_year),
            fiscal_year: w.fiscal_year.and_then(numeric_year),
            discovered_year: w.discovered_year.and_then(numeric_year),
            discovery_year: w.discovery_year.and_then(numeric_year),
            conviction_year: w.conviction_year.and_then(numeric_year),
            bankruptcy_year: w.bankruptcy_year.and_then(numeric_year),
            shutdown_year: w.shutdown_year.and_then(numeric_year),
            retirement_year: w.retirement_year.and_then(numeric_year),
            period: w.period.and_then(text_field),
            fraud_period: w.fraud_period.and_then(text_field),
            bribery_period: w.bribery_period.and_then(text_field),
            time_period: w.time_period.and_then(text_field),
            status: w.status.and_then(text_field),
        }
    }
}

fn amount_field(v: Value) -> Option<RawAmount> {
    match v {
        Value::Number(n) => Some(RawAmount::Number(n)),
        Value::String(s) => Some(RawAmount::Text(s)),
        _ => None,
    }
}

fn numeric_year(v: Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

fn text_field(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Inclusive range of canonical years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
