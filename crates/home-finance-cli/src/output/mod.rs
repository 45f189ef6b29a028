pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

/// Render a scalar JSON value for a table cell or CSV field.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The computation result inside the output envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

type Summary<'a> = Vec<(String, &'a Value)>;
type Schedules<'a> = Vec<(String, &'a [Value])>;

/// Split a result object into its scalar summary fields and any nested
/// repayment schedules (arrays of periods), keyed by their dotted path.
pub(crate) fn split_schedules(result: &Map<String, Value>) -> (Summary<'_>, Schedules<'_>) {
    let mut summary = Vec::new();
    let mut schedules = Vec::new();
    collect(result, "", &mut summary, &mut schedules);
    (summary, schedules)
}

fn collect<'a>(
    map: &'a Map<String, Value>,
    prefix: &str,
    summary: &mut Summary<'a>,
    schedules: &mut Schedules<'a>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Array(rows) if rows.first().map_or(false, Value::is_object) => {
                schedules.push((path, rows.as_slice()));
            }
            Value::Object(inner) => collect(inner, &path, summary, schedules),
            _ => summary.push((path, val)),
        }
    }
}
