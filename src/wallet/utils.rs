use serde_json::{Map, Value};

// Helper method: render a field the way the stats panel shows it. Missing,
// null, false and empty values fall back to `default`.
pub fn field_as_string(fields: &Map<String, Value>, field_name: &str, default: &str) -> String {
    match fields.get(field_name) {
        Some(Value::String(value)) if !value.is_empty() => value.clone(),
        Some(Value::Number(number)) if number.as_u64() != Some(0) => number.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => value.to_string(),
        _ => default.to_string(),
    }
}
