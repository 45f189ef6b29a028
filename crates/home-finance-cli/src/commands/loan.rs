use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use home_finance_core::loan::amortization::{self, LoanTerms, RepaymentMethod};
use home_finance_core::loan::comparison::{self, LoanComparisonInput};
use home_finance_core::loan::optimal_rate::{
    self, validate_rate_override, STATUTORY_RATE_PERCENT, TAX_FREE_ALLOWANCE,
};
use home_finance_core::types::with_metadata;

use crate::input;

/// Arguments for a single loan schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Loan principal in won
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 4.3)
    #[arg(long, default_value = "4.3")]
    pub rate: Decimal,

    /// Term in months
    #[arg(long, default_value = "360")]
    pub months: u32,

    /// Share of principal deferred to the final payment, in percent
    #[arg(long, default_value = "0")]
    pub balloon: Decimal,

    /// Repayment method: equal_principal_and_interest, equal_principal or bullet
    #[arg(long, default_value = "equal_principal_and_interest")]
    pub method: RepaymentMethod,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the private-loan rate derivation
#[derive(Args)]
pub struct OptimalRateArgs {
    /// Private loan principal in won
    #[arg(long)]
    pub principal: Decimal,

    /// Statutory reasonable interest rate in percent
    #[arg(long, default_value_t = STATUTORY_RATE_PERCENT)]
    pub statutory_rate: Decimal,

    /// Annual imputed interest that is not taxed as a gift
    #[arg(long, default_value_t = TAX_FREE_ALLOWANCE)]
    pub allowance: Decimal,

    /// Manual rate to project instead of the derived one
    #[arg(long)]
    pub rate_override: Option<Decimal>,

    /// Project the schedule at the applied rate over this many months
    #[arg(long)]
    pub months: Option<u32>,

    /// Balloon share for the projected schedule, in percent
    #[arg(long, default_value = "0")]
    pub balloon: Decimal,

    /// Repayment method for the projected schedule
    #[arg(long, default_value = "equal_principal_and_interest")]
    pub method: RepaymentMethod,
}

/// Arguments for the bank vs private loan comparison
#[derive(Args)]
pub struct CompareLoansArgs {
    /// Bank loan principal
    #[arg(long)]
    pub bank_principal: Option<Decimal>,

    /// Bank loan annual rate in percent
    #[arg(long, default_value = "4.3")]
    pub bank_rate: Decimal,

    /// Bank loan term in months
    #[arg(long, default_value = "360")]
    pub bank_months: u32,

    /// Bank loan balloon share in percent
    #[arg(long, default_value = "0")]
    pub bank_balloon: Decimal,

    /// Bank loan repayment method
    #[arg(long, default_value = "equal_principal_and_interest")]
    pub bank_method: RepaymentMethod,

    /// Private loan principal
    #[arg(long)]
    pub private_principal: Option<Decimal>,

    /// Statutory rate applied to the private loan, in percent
    #[arg(long, default_value_t = STATUTORY_RATE_PERCENT)]
    pub statutory_rate: Decimal,

    /// Private loan term in months
    #[arg(long, default_value = "120")]
    pub private_months: u32,

    /// Private loan balloon share in percent
    #[arg(long, default_value = "30")]
    pub private_balloon: Decimal,

    /// Private loan repayment method
    #[arg(long, default_value = "equal_principal_and_interest")]
    pub private_method: RepaymentMethod,

    /// Manual private-loan rate in percent
    #[arg(long)]
    pub rate_override: Option<Decimal>,

    /// Annual tax-free imputed interest allowance
    #[arg(long)]
    pub allowance: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let terms: LoanTerms = match input::read_input(args.input.as_deref())? {
        Some(terms) => terms,
        None => LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate,
            term_months: args.months,
            balloon_ratio_percent: args.balloon,
            method: args.method,
        },
    };
    terms.validate()?;

    let mut warnings = Vec::new();
    if terms.balloon_ratio_percent > Decimal::ZERO {
        warnings.push(format!(
            "{} deferred to the final payment",
            terms.balloon_amount().round_dp(0)
        ));
    }

    let result = amortization::amortize(&terms);
    let output = with_metadata(
        "Loan amortization schedule",
        &terms,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_optimal_rate(args: OptimalRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    if args.principal < Decimal::ZERO {
        return Err("--principal cannot be negative".into());
    }
    validate_rate_override(args.rate_override)?;

    let result = optimal_rate::derive_optimal_rate(
        args.principal,
        args.statutory_rate,
        args.allowance,
    );
    let applied = optimal_rate::applied_rate(&result, args.rate_override);
    let recommended = optimal_rate::recommended_minimum_rate(&result);

    let mut warnings = Vec::new();
    if let Some(min) = recommended {
        warnings.push(format!(
            "Zero interest is allowed; consider at least {min}% as proof of a genuine loan"
        ));
    }

    let projection = match args.months {
        Some(months) => {
            let terms = LoanTerms {
                principal: args.principal,
                annual_rate_percent: applied,
                term_months: months,
                balloon_ratio_percent: args.balloon,
                method: args.method,
            };
            terms.validate()?;
            Some(amortization::amortize(&terms))
        }
        None => None,
    };

    let output = with_metadata(
        "Private loan rate within the tax-free imputed interest allowance",
        &serde_json::json!({
            "principal": args.principal.to_string(),
            "statutory_rate_percent": args.statutory_rate.to_string(),
            "tax_free_allowance": args.allowance.to_string(),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        serde_json::json!({
            "statutory_yearly_interest": result.statutory_yearly_interest,
            "taxable_excess_interest": result.taxable_excess_interest,
            "derived_rate_percent": result.derived_rate_percent.round_dp(4),
            "is_zero_interest_eligible": result.is_zero_interest_eligible,
            "applied_rate_percent": applied.round_dp(4),
            "recommended_minimum_rate_percent": recommended,
            "projection": projection,
        }),
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_compare_loans(args: CompareLoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison_input: LoanComparisonInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanComparisonInput {
            bank: LoanTerms {
                principal: args
                    .bank_principal
                    .ok_or("--bank-principal is required (or provide --input)")?,
                annual_rate_percent: args.bank_rate,
                term_months: args.bank_months,
                balloon_ratio_percent: args.bank_balloon,
                method: args.bank_method,
            },
            private: LoanTerms {
                principal: args.private_principal.unwrap_or(Decimal::ZERO),
                annual_rate_percent: args.statutory_rate,
                term_months: args.private_months,
                balloon_ratio_percent: args.private_balloon,
                method: args.private_method,
            },
            rate_override: args.rate_override,
            tax_free_allowance: args.allowance,
        },
    };
    let result = comparison::compare_loans(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}
