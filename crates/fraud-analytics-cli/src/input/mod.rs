pub mod file;
pub mod stdin;

use fraud_analytics_core::types::Record;
use serde_json::Value;

/// Load records from `--input`, falling back to piped stdin.
pub fn load_records(path: Option<&str>) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let value = load_value(path)?;
    records_from_value(value)
}

/// Raw document from `--input` or stdin.
pub fn load_value(path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_value(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(data)
    } else {
        Err("records are required: pass --input <file> or pipe JSON on stdin".into())
    }
}

/// Accepts a bare array, a graph payload `{ "nodes": [...] }`, or `{ "records": [...] }`.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let array = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("nodes").or_else(|| map.remove("records")) {
            Some(inner @ Value::Array(_)) => inner,
            _ => return Err("expected an array of records, or an object with a 'nodes' or 'records' array".into()),
        },
        _ => return Err("expected an array of records".into()),
    };
    Ok(serde_json::from_value(array)?)
}

/// Edge count of a graph payload, when the document carries one.
pub fn edge_count(value: &Value) -> Option<usize> {
    value.get("edges").and_then(Value::as_array).map(Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_payload_shape() {
        let doc = serde_json::json!({
            "nodes": [{"id": "a", "shape": "diamond", "year": 2020}],
            "edges": [{"from": "a", "to": "b"}, {"from": "b", "to": "c"}]
        });
        assert_eq!(edge_count(&doc), Some(2));
        let records = records_from_value(doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, Some(2020));
    }

    #[test]
    fn test_rejects_scalar() {
        assert!(records_from_value(serde_json::json!(42)).is_err());
        assert!(records_from_value(serde_json::json!({"rows": []})).is_err());
    }
}
