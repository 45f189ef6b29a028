use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use home_finance_core::gift_tax::calculator::{GiftTaxInput, EARLY_FILING_DISCOUNT_RATE};
use home_finance_core::types::with_metadata;

use crate::input;

/// Arguments for the gift tax calculation
#[derive(Args)]
pub struct GiftTaxArgs {
    /// Appraised value of the gift in won
    #[arg(long)]
    pub gift_amount: Option<Decimal>,

    /// Gift deduction in won (50,000,000 for an adult child from a parent)
    #[arg(long, default_value = "0")]
    pub deduction: Decimal,

    /// Appraisal fee deductible from the gift value
    #[arg(long, default_value = "0")]
    pub appraisal_fee: Decimal,

    /// Skip the 3% discount for filing within the deadline
    #[arg(long)]
    pub no_early_filing_discount: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_gift_tax(args: GiftTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let gift_input: GiftTaxInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => GiftTaxInput {
            gift_amount: args
                .gift_amount
                .ok_or("--gift-amount is required (or provide --input)")?,
            deduction: args.deduction,
            appraisal_fee: args.appraisal_fee,
            apply_early_filing_discount: !args.no_early_filing_discount,
        },
    };
    gift_input.validate()?;

    let result = gift_input.compute();
    let output = with_metadata(
        "Progressive gift tax with cumulative bracket deductions",
        &serde_json::json!({
            "gift_amount": gift_input.gift_amount.to_string(),
            "deduction": gift_input.deduction.to_string(),
            "appraisal_fee": gift_input.appraisal_fee.to_string(),
            "early_filing_discount_rate": if gift_input.apply_early_filing_discount {
                EARLY_FILING_DISCOUNT_RATE.to_string()
            } else {
                "0".to_string()
            },
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
