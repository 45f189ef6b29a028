use serde_json::Value;
use std::io;

use super::{cell, result_of, split_schedules};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Results carrying repayment schedules are written as one row per period,
/// prefixed with the schedule name; anything else as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => {
            let (summary, schedules) = split_schedules(result);
            if schedules.is_empty() {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &summary {
                    let _ = wtr.write_record([key.as_str(), &cell(val)]);
                }
            } else {
                write_schedules(&mut wtr, &schedules);
            }
        }
        Value::Array(rows) => write_schedules(&mut wtr, &[(String::new(), rows.as_slice())]),
        other => {
            let _ = wtr.write_record([cell(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_schedules(wtr: &mut StdoutCsv<'_>, schedules: &[(String, &[Value])]) {
    let Some(Value::Object(first)) = schedules.iter().find_map(|(_, rows)| rows.first()) else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut header_row = vec!["schedule"];
    header_row.extend(&headers);
    let _ = wtr.write_record(&header_row);

    for (name, rows) in schedules {
        for row in rows.iter().filter_map(Value::as_object) {
            let mut record = vec![name.clone()];
            record.extend(
                headers
                    .iter()
                    .map(|h| row.get(*h).map(cell).unwrap_or_default()),
            );
            let _ = wtr.write_record(&record);
        }
    }
}
