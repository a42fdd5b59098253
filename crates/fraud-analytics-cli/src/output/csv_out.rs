use serde_json::Value;
use std::io;

use super::{scalar_text, tabular_rows};

/// Write output as CSV to stdout.
///
/// Row lists become one line per record; anything else is written as
/// two-column `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = tabular_rows(value) {
        write_rows(&mut wtr, rows);
    } else if let Value::Object(map) = value {
        let fields = map
            .get("result")
            .and_then(Value::as_object)
            .unwrap_or(map);
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in fields {
            let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
        }
    } else {
        let _ = wtr.write_record([&scalar_text(value)]);
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([&scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
