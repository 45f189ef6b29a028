use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::amortization::{amortize, AmortizationResult, LoanTerms};
use crate::loan::optimal_rate::{
    applied_rate, derive_optimal_rate, project_at_rate, recommended_minimum_rate,
    validate_rate_override, OptimalRateResult, TAX_FREE_ALLOWANCE,
};
use crate::types::*;
use crate::HomeFinanceResult;

/// Bank loan and private loan evaluated side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub bank: LoanTerms,
    /// Private loan terms; `annual_rate_percent` is the statutory rate.
    pub private: LoanTerms,
    /// Manually chosen private-loan rate, replacing the derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_override: Option<Percent>,
    /// Defaults to [`TAX_FREE_ALLOWANCE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_free_allowance: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub bank: AmortizationResult,
    pub private_at_statutory_rate: AmortizationResult,
    pub optimal_rate: OptimalRateResult,
    pub applied_private_rate_percent: Percent,
    /// Proof-of-loan hint, present only for zero-interest eligible loans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_minimum_rate_percent: Option<Percent>,
    pub private_at_applied_rate: AmortizationResult,
    pub deferred_balloon: Money,
    /// First bank payment plus first private payment at the applied rate.
    pub combined_first_payment: Money,
    pub combined_total_interest: Money,
}

/// Compare the bank loan with the private loan at both the statutory and the
/// applied rate.
pub fn compare_loans(
    input: &LoanComparisonInput,
) -> HomeFinanceResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.bank.validate()?;
    input.private.validate()?;
    validate_rate_override(input.rate_override)?;

    let allowance = input.tax_free_allowance.unwrap_or(TAX_FREE_ALLOWANCE);

    let bank = amortize(&input.bank);
    let private_at_statutory_rate = amortize(&input.private);

    let optimal_rate = derive_optimal_rate(
        input.private.principal,
        input.private.annual_rate_percent,
        allowance,
    );
    let applied_private_rate_percent = applied_rate(&optimal_rate, input.rate_override);
    let recommended_minimum_rate_percent = recommended_minimum_rate(&optimal_rate);

    if optimal_rate.is_zero_interest_eligible {
        warnings.push(format!(
            "Private loan qualifies for zero interest; a nominal rate of at least {}% is \
             still recommended as proof of a genuine loan",
            recommended_minimum_rate_percent.unwrap_or_default()
        ));
    }
    if let Some(rate) = input.rate_override {
        warnings.push(format!(
            "Manual private-loan rate {rate}% used instead of the derived {}%",
            optimal_rate.derived_rate_percent.round_dp(4)
        ));
        if rate < optimal_rate.derived_rate_percent {
            warnings.push(
                "Manual rate is below the derived rate; the shortfall in interest may be \
                 treated as a taxable gift"
                    .into(),
            );
        }
    }

    let private_at_applied_rate = project_at_rate(&input.private, applied_private_rate_percent);

    let output = LoanComparisonOutput {
        combined_first_payment: bank.first_payment + private_at_applied_rate.first_payment,
        combined_total_interest: bank.total_interest + private_at_applied_rate.total_interest,
        deferred_balloon: input.private.balloon_amount(),
        bank,
        private_at_statutory_rate,
        optimal_rate,
        applied_private_rate_percent,
        recommended_minimum_rate_percent,
        private_at_applied_rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bank vs private loan comparison",
        &serde_json::json!({
            "bank_principal": input.bank.principal.to_string(),
            "bank_rate_percent": input.bank.annual_rate_percent.to_string(),
            "private_principal": input.private.principal.to_string(),
            "statutory_rate_percent": input.private.annual_rate_percent.to_string(),
            "tax_free_allowance": allowance.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
