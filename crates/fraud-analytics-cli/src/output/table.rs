use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{scalar_text, tabular_rows};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = tabular_rows(value) {
        print_rows(rows);
        if let Value::Object(map) = value {
            print_envelope_notes(map);
        }
        return;
    }

    match value {
        Value::Object(map) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            print_fields(fields);
            print_envelope_notes(map);
        }
        _ => println!("{}", scalar_text(value)),
    }
}

fn print_fields(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &scalar_text(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

/// Warnings, tier tallies and methodology that sit beside the main rows.
fn print_envelope_notes(map: &serde_json::Map<String, Value>) {
    if let Some(Value::Object(tiers)) = map.get("tier_counts") {
        let counts: Vec<String> = tiers
            .iter()
            .map(|(tier, n)| format!("{}={}", tier, scalar_text(n)))
            .collect();
        println!("\nTiers: {}", counts.join(" "));
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = map.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
