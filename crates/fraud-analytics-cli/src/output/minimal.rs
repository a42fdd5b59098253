use serde_json::Value;

use super::scalar_text;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 9] = [
    "canonical_year",
    "tier",
    "anomaly_percent",
    "recovery_rate_pct",
    "total_fraud_amount",
    "years",
    "hotspots",
    "score",
    "case_count",
];

/// Print just the key answer value from the output.
///
/// Arrays print one line per element using the same key lookup, so
/// `resolve-year` gives `id<TAB>year` lines suitable for shell pipelines.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Array(items) => {
            for item in items {
                match (item.get("id").or_else(|| item.get("year")), key_value(item)) {
                    (Some(id), Some(v)) => println!("{}\t{}", scalar_text(id), scalar_text(v)),
                    _ => println!("{}", scalar_text(item)),
                }
            }
        }
        Value::Object(map) => match key_value(result_obj) {
            Some(v) => println!("{}", scalar_text(v)),
            None => {
                if let Some((key, val)) = map.iter().next() {
                    println!("{}: {}", key, scalar_text(val));
                }
            }
        },
        other => println!("{}", scalar_text(other)),
    }
}

fn key_value(value: &Value) -> Option<&Value> {
    let map = value.as_object()?;
    PRIORITY_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}
