//! Interest rate for a private (family) loan that keeps the imputed interest
//! benefit inside the annual tax-free allowance.
//!
//! The tax authority imputes interest at a statutory rate on a low- or
//! no-interest private loan. Up to [`TAX_FREE_ALLOWANCE`] per year of that
//! benefit is not treated as a gift; anything above it must actually be paid
//! as interest to avoid gift tax.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::amortization::{amortize, AmortizationResult, LoanTerms};
use crate::error::HomeFinanceError;
use crate::types::{Money, Percent};
use crate::HomeFinanceResult;

/// Annual imputed-interest benefit that is not taxed as a gift.
pub const TAX_FREE_ALLOWANCE: Money = dec!(10_000_000);

/// Statutory "reasonable" interest rate for private loans, in percent.
pub const STATUTORY_RATE_PERCENT: Percent = dec!(4.6);

/// Smallest rate worth writing into a loan agreement as proof that the
/// arrangement is a loan rather than a gift. Advisory only.
pub const PROOF_OF_LOAN_MIN_RATE_PERCENT: Percent = dec!(0.1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRateResult {
    /// Interest a year at the statutory rate.
    pub statutory_yearly_interest: Money,
    /// Part of the statutory interest above the tax-free allowance.
    pub taxable_excess_interest: Money,
    /// Lowest rate that keeps the foregone interest within the allowance.
    /// Zero when the loan qualifies for zero interest.
    pub derived_rate_percent: Percent,
    pub is_zero_interest_eligible: bool,
}

/// Derive the private-loan rate at which the foregone interest stays within
/// `tax_free_allowance`.
pub fn derive_optimal_rate(
    principal: Money,
    statutory_rate_percent: Percent,
    tax_free_allowance: Money,
) -> OptimalRateResult {
    debug!(
        "derive_optimal_rate: principal={principal} statutory={statutory_rate_percent}% \
         allowance={tax_free_allowance}"
    );

    if principal <= Decimal::ZERO {
        return OptimalRateResult {
            statutory_yearly_interest: Decimal::ZERO,
            taxable_excess_interest: Decimal::ZERO,
            derived_rate_percent: Decimal::ZERO,
            is_zero_interest_eligible: true,
        };
    }

    let statutory_yearly_interest = principal * statutory_rate_percent / Decimal::ONE_HUNDRED;
    let taxable_excess_interest =
        (statutory_yearly_interest - tax_free_allowance).max(Decimal::ZERO);

    if taxable_excess_interest > Decimal::ZERO {
        OptimalRateResult {
            statutory_yearly_interest,
            taxable_excess_interest,
            derived_rate_percent: taxable_excess_interest / principal * Decimal::ONE_HUNDRED,
            is_zero_interest_eligible: false,
        }
    } else {
        OptimalRateResult {
            statutory_yearly_interest,
            taxable_excess_interest,
            derived_rate_percent: Decimal::ZERO,
            is_zero_interest_eligible: true,
        }
    }
}

/// Rate to suggest for the loan agreement when zero interest would be allowed.
pub fn recommended_minimum_rate(result: &OptimalRateResult) -> Option<Percent> {
    result
        .is_zero_interest_eligible
        .then_some(PROOF_OF_LOAN_MIN_RATE_PERCENT)
}

/// A manual rate must not be negative.
pub fn validate_rate_override(rate_override: Option<Percent>) -> HomeFinanceResult<()> {
    match rate_override {
        Some(rate) if rate < Decimal::ZERO => Err(HomeFinanceError::invalid(
            "rate_override",
            "Override rate cannot be negative",
        )),
        _ => Ok(()),
    }
}

/// Rate used for the private-loan schedule: a manual override always wins.
pub fn applied_rate(result: &OptimalRateResult, rate_override: Option<Percent>) -> Percent {
    rate_override.unwrap_or(result.derived_rate_percent)
}

/// Project the private-loan schedule at `rate_percent`, keeping every other term.
pub fn project_at_rate(terms: &LoanTerms, rate_percent: Percent) -> AmortizationResult {
    amortize(&LoanTerms {
        annual_rate_percent: rate_percent,
        ..terms.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::amortization::RepaymentMethod;

    #[test]
    fn test_taxable_excess_example() {
        let result = derive_optimal_rate(
            dec!(300_000_000),
            STATUTORY_RATE_PERCENT,
            TAX_FREE_ALLOWANCE,
        );
        assert_eq!(result.statutory_yearly_interest, dec!(13_800_000));
        assert_eq!(result.taxable_excess_interest, dec!(3_800_000));
        assert!((result.derived_rate_percent - dec!(1.2667)).abs() < dec!(0.0001));
        assert!(!result.is_zero_interest_eligible);
        assert_eq!(recommended_minimum_rate(&result), None);
    }

    #[test]
    fn test_zero_interest_eligible() {
        // 200M * 4.6% = 9.2M, under the 10M allowance
        let result = derive_optimal_rate(dec!(200_000_000), dec!(4.6), TAX_FREE_ALLOWANCE);
        assert!(result.is_zero_interest_eligible);
        assert_eq!(result.taxable_excess_interest, Decimal::ZERO);
        assert_eq!(result.derived_rate_percent, Decimal::ZERO);
        assert_eq!(
            recommended_minimum_rate(&result),
            Some(PROOF_OF_LOAN_MIN_RATE_PERCENT)
        );
    }

    #[test]
    fn test_exactly_at_allowance_is_eligible() {
        // 250M at 4% = 10M, exactly the allowance
        let result = derive_optimal_rate(dec!(250_000_000), dec!(4), TAX_FREE_ALLOWANCE);
        assert_eq!(result.statutory_yearly_interest, TAX_FREE_ALLOWANCE);
        assert!(result.is_zero_interest_eligible);
    }

    #[test]
    fn test_non_positive_principal() {
        let result = derive_optimal_rate(Decimal::ZERO, dec!(4.6), TAX_FREE_ALLOWANCE);
        assert!(result.is_zero_interest_eligible);
        assert_eq!(result.derived_rate_percent, Decimal::ZERO);
        assert_eq!(result.statutory_yearly_interest, Decimal::ZERO);
    }

    #[test]
    fn test_override_takes_precedence() {
        let result = derive_optimal_rate(dec!(300_000_000), dec!(4.6), TAX_FREE_ALLOWANCE);
        assert_eq!(applied_rate(&result, Some(dec!(2.5))), dec!(2.5));
        assert_eq!(applied_rate(&result, Some(Decimal::ZERO)), Decimal::ZERO);
        assert_eq!(applied_rate(&result, None), result.derived_rate_percent);
    }

    #[test]
    fn test_negative_override_rejected() {
        assert!(validate_rate_override(None).is_ok());
        assert!(validate_rate_override(Some(Decimal::ZERO)).is_ok());
        match validate_rate_override(Some(dec!(-0.5))) {
            Err(HomeFinanceError::InvalidInput { field, .. }) => {
                assert_eq!(field, "rate_override")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_project_at_derived_rate() {
        let terms = LoanTerms {
            principal: dec!(300_000_000),
            annual_rate_percent: STATUTORY_RATE_PERCENT,
            term_months: 120,
            balloon_ratio_percent: Decimal::ZERO,
            method: RepaymentMethod::Bullet,
        };
        let result =
            derive_optimal_rate(terms.principal, STATUTORY_RATE_PERCENT, TAX_FREE_ALLOWANCE);
        let projected = project_at_rate(&terms, result.derived_rate_percent);
        // Interest-only months pay the taxable excess spread over the year
        let monthly_excess = dec!(3_800_000) / dec!(12);
        assert!((projected.first_payment - monthly_excess).abs() <= Decimal::ONE);
        assert_eq!(projected.schedule.len(), 120);
    }
}
