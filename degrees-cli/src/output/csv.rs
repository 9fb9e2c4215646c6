//! CSV output formatting for data export.
//!
//! Serializes a result through `serde_json::Value` and flattens it:
//! a single object becomes header + one row, an array of objects
//! becomes header + one row per item. Nested values are embedded as
//! JSON strings.

use serde::Serialize;
use serde_json::Value;

/// CSV output formatter
pub struct CsvOutput;

impl CsvOutput {
    /// Format data as a CSV string.
    pub fn format<T: Serialize>(data: &T) -> String {
        match serde_json::to_value(data) {
            Ok(Value::Array(items)) => Self::format_array(&items),
            Ok(Value::Object(map)) => {
                Self::format_array(&[Value::Object(map)])
            }
            Ok(other) => Self::escape(&Self::value_to_string(&other)),
            Err(_) => String::new(),
        }
    }

    fn format_array(items: &[Value]) -> String {
        let headers: Vec<String> = match items.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => return String::new(),
        };

        let mut output = String::new();
        output.push_str(&headers.join(","));

        for item in items {
            output.push('\n');
            let row: Vec<String> = headers
                .iter()
                .map(|key| {
                    item.get(key)
                        .map(|v| Self::escape(&Self::value_to_string(v)))
                        .unwrap_or_default()
                })
                .collect();
            output.push_str(&row.join(","));
        }

        output
    }

    fn value_to_string(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        }
    }

    /// Quote a field when it contains a comma, quote, or line break.
    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}
