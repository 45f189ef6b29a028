use clap::Args;
use serde_json::Value;

use home_finance_core::format::{format_korean_units, format_won, parse_amount};

/// Arguments for amount formatting
#[derive(Args)]
pub struct FormatArgs {
    /// Amount to format; commas and a trailing 원 are accepted
    pub amount: String,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = parse_amount(&args.amount);
    Ok(serde_json::json!({
        "amount": amount,
        "won": format_won(amount),
        "korean_units": format_korean_units(amount),
    }))
}
