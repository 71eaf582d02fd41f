use serde_json::Value;

/// Key answers in priority order; the first one present is printed.
const PRIORITY_KEYS: [&str; 6] = [
    "irr",
    "remainingBalance",
    "monthlyPayment",
    "npv",
    "valid",
    "title",
];

/// Print just the key answer value from the output.
///
/// Looks inside the `result` envelope and, for a deal analysis, its `metrics`
/// section, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let result_obj = result_obj
        .as_object()
        .and_then(|m| m.get("metrics"))
        .unwrap_or(result_obj);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
