use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use home_finance_core::format;
use home_finance_core::funding::plan::{self, FundingPlanInput, LoanPrincipals};
use home_finance_core::gift_tax::calculator::GiftTaxInput;
use home_finance_core::loan::amortization::{self, LoanTerms};
use home_finance_core::loan::comparison::{self, LoanComparisonInput};
use home_finance_core::loan::optimal_rate::{self, STATUTORY_RATE_PERCENT, TAX_FREE_ALLOWANCE};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    terms.validate().map_err(to_napi_error)?;
    let output = amortization::amortize(&terms);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct OptimalRateRequest {
    principal: Decimal,
    #[serde(default)]
    statutory_rate_percent: Option<Decimal>,
    #[serde(default)]
    tax_free_allowance: Option<Decimal>,
}

#[napi]
pub fn derive_optimal_rate(input_json: String) -> NapiResult<String> {
    let req: OptimalRateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = optimal_rate::derive_optimal_rate(
        req.principal,
        req.statutory_rate_percent.unwrap_or(STATUTORY_RATE_PERCENT),
        req.tax_free_allowance.unwrap_or(TAX_FREE_ALLOWANCE),
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    let input: LoanComparisonInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::compare_loans(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Gift tax and funding plan
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_gift_tax(input_json: String) -> NapiResult<String> {
    let input: GiftTaxInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    input.validate().map_err(to_napi_error)?;
    serde_json::to_string(&input.compute()).map_err(to_napi_error)
}

#[napi]
pub fn build_funding_plan(input_json: String) -> NapiResult<String> {
    let input: FundingPlanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = plan::build_funding_plan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_principals_from_plan(plan_json: String) -> NapiResult<String> {
    let input: FundingPlanInput = serde_json::from_str(&plan_json).map_err(to_napi_error)?;
    serde_json::to_string(&plan::loan_principals_from_plan(&input)).map_err(to_napi_error)
}

#[napi]
pub fn apply_loan_principals(plan_json: String, principals_json: String) -> NapiResult<String> {
    let input: FundingPlanInput = serde_json::from_str(&plan_json).map_err(to_napi_error)?;
    let principals: LoanPrincipals =
        serde_json::from_str(&principals_json).map_err(to_napi_error)?;
    serde_json::to_string(&plan::apply_loan_principals(&input, &principals))
        .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_won(amount: String) -> NapiResult<String> {
    Ok(format::format_won(parse_decimal(&amount)?))
}

#[napi]
pub fn format_korean_units(amount: String) -> NapiResult<String> {
    Ok(format::format_korean_units(parse_decimal(&amount)?))
}

#[napi]
pub fn parse_amount(input: String) -> String {
    format::parse_amount(&input).to_string()
}
