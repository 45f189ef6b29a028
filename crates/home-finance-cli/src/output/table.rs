use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell, result_of, split_schedules};

/// Print the result summary as a Field/Value table, followed by one table
/// per repayment schedule, then warnings and methodology from the envelope.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(result) => {
            let (summary, schedules) = split_schedules(result);

            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in &summary {
                builder.push_record([key.clone(), cell(val)]);
            }
            println!("{}", Table::from(builder));

            for (name, rows) in &schedules {
                println!("\n{name}");
                print_rows(rows);
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", cell(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(cell).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
