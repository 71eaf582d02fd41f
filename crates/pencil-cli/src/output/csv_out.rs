use serde_json::Value;
use std::io;

use super::flatten;

/// Write output as two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let rows = match map.get("result") {
                Some(Value::Object(result)) => flatten(result),
                _ => flatten(map),
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in rows {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                let _ = wtr.write_record([&format_csv_value(item)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(format_csv_value)
            .collect::<Vec<_>>()
            .join(";"),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
