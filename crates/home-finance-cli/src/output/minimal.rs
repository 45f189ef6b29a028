use serde_json::Value;

use super::{cell, result_of};

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 9] = [
    "final_tax",
    "combined_first_payment",
    "applied_rate_percent",
    "derived_rate_percent",
    "first_payment",
    "grand_total",
    "bank_principal",
    "korean_units",
    "total_payment",
];

/// Print just the key answer value from the output, falling back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", cell(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(result));
}
