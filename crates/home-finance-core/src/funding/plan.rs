//! Simplified home-purchase funding plan.
//!
//! Aggregates own funds, gifts from parents, bank loans and private
//! borrowing, and estimates the gift tax on the part of the gifts that is
//! not covered by the basic and marriage deductions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomeFinanceError;
use crate::gift_tax::calculator::{compute_gift_tax, GiftTaxResult};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::HomeFinanceResult;

/// Basic gift deduction for an adult child receiving from a lineal ascendant.
pub const BASIC_DEDUCTION_LIMIT: Money = dec!(50_000_000);

/// Additional deduction for gifts on marriage or childbirth.
pub const MARRIAGE_DEDUCTION_LIMIT: Money = dec!(100_000_000);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnFunds {
    pub bank_deposit: Money,
    /// Gifts already received and reported.
    pub past_gift: Money,
    /// New gift covered by the basic deduction.
    pub basic_deduction: Money,
    /// New gift covered by the marriage deduction.
    pub marriage_deduction: Money,
    /// New gift beyond both deductions.
    pub additional_gift: Money,
    pub stock_bond_sale: Money,
    pub cash_other: Money,
    pub real_estate_sale: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankLoans {
    pub mortgage_loan: Money,
    pub credit_loan: Money,
    pub other_loan: Money,
}

impl BankLoans {
    pub fn total(&self) -> Money {
        self.mortgage_loan + self.credit_loan + self.other_loan
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingPlanInput {
    pub own_funds: OwnFunds,
    pub bank_loans: BankLoans,
    /// Borrowing from parents or other individuals.
    pub private_borrowing: Money,
}

impl FundingPlanInput {
    fn amounts(&self) -> [(&'static str, Money); 12] {
        let o = &self.own_funds;
        let b = &self.bank_loans;
        [
            ("bank_deposit", o.bank_deposit),
            ("past_gift", o.past_gift),
            ("basic_deduction", o.basic_deduction),
            ("marriage_deduction", o.marriage_deduction),
            ("additional_gift", o.additional_gift),
            ("stock_bond_sale", o.stock_bond_sale),
            ("cash_other", o.cash_other),
            ("real_estate_sale", o.real_estate_sale),
            ("mortgage_loan", b.mortgage_loan),
            ("credit_loan", b.credit_loan),
            ("other_loan", b.other_loan),
            ("private_borrowing", self.private_borrowing),
        ]
    }

    pub fn validate(&self) -> HomeFinanceResult<()> {
        for (field, value) in self.amounts() {
            if value < Decimal::ZERO {
                return Err(HomeFinanceError::invalid(field, "Amount cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Principals carried between the funding plan and the loan comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPrincipals {
    pub bank_principal: Money,
    pub private_principal: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingPlanOutput {
    pub total_gift: Money,
    pub deduction_total: Money,
    pub taxable_gift: Money,
    pub gift_tax: GiftTaxResult,
    pub new_gift_total: Money,
    pub parent_total_support: Money,
    pub own_funds_total: Money,
    pub bank_loans_total: Money,
    pub private_borrowing: Money,
    pub grand_total: Money,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Aggregate all funding sources and estimate gift tax on the taxable gifts.
pub fn build_funding_plan(
    input: &FundingPlanInput,
) -> HomeFinanceResult<ComputationOutput<FundingPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let own = &input.own_funds;
    let basic = capped(
        own.basic_deduction,
        BASIC_DEDUCTION_LIMIT,
        "basic_deduction",
        &mut warnings,
    );
    let marriage = capped(
        own.marriage_deduction,
        MARRIAGE_DEDUCTION_LIMIT,
        "marriage_deduction",
        &mut warnings,
    );

    let total_gift = own.past_gift + basic + marriage + own.additional_gift;
    let deduction_total = basic + marriage;
    let taxable_gift = (total_gift - deduction_total).max(Decimal::ZERO);

    // Deductions are already netted out of the taxable gift.
    let gift_tax = compute_gift_tax(taxable_gift, Decimal::ZERO, Decimal::ZERO, false);
    if gift_tax.final_tax > Decimal::ZERO {
        warnings.push(format!(
            "Gifts above the deductions are taxable: estimated gift tax {}",
            gift_tax.final_tax.round_dp(0)
        ));
    }

    let new_gift_total = basic + marriage + own.additional_gift;
    let own_funds_total = own.bank_deposit
        + total_gift
        + own.stock_bond_sale
        + own.cash_other
        + own.real_estate_sale;
    let bank_loans_total = input.bank_loans.total();

    let output = FundingPlanOutput {
        total_gift,
        deduction_total,
        taxable_gift,
        gift_tax,
        new_gift_total,
        parent_total_support: new_gift_total + input.private_borrowing,
        own_funds_total,
        bank_loans_total,
        private_borrowing: input.private_borrowing,
        grand_total: own_funds_total + bank_loans_total + input.private_borrowing,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Home purchase funding plan (simplified)",
        &serde_json::json!({
            "basic_deduction_limit": BASIC_DEDUCTION_LIMIT.to_string(),
            "marriage_deduction_limit": MARRIAGE_DEDUCTION_LIMIT.to_string(),
            "early_filing_discount": false,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Bank and private principals implied by the plan.
pub fn loan_principals_from_plan(plan: &FundingPlanInput) -> LoanPrincipals {
    LoanPrincipals {
        bank_principal: plan.bank_loans.total(),
        private_principal: plan.private_borrowing,
    }
}

/// Write loan principals back into the plan; the whole bank principal
/// becomes the mortgage loan.
pub fn apply_loan_principals(
    plan: &FundingPlanInput,
    principals: &LoanPrincipals,
) -> FundingPlanInput {
    FundingPlanInput {
        own_funds: plan.own_funds.clone(),
        bank_loans: BankLoans {
            mortgage_loan: principals.bank_principal,
            credit_loan: Decimal::ZERO,
            other_loan: Decimal::ZERO,
        },
        private_borrowing: principals.private_principal,
    }
}

fn capped(value: Money, limit: Money, field: &str, warnings: &mut Vec<String>) -> Money {
    if value > limit {
        warnings.push(format!("{field} capped at the statutory limit of {limit}"));
        limit
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> FundingPlanInput {
        FundingPlanInput {
            own_funds: OwnFunds {
                bank_deposit: dec!(80_000_000),
                past_gift: Decimal::ZERO,
                basic_deduction: dec!(50_000_000),
                marriage_deduction: dec!(100_000_000),
                additional_gift: Decimal::ZERO,
                stock_bond_sale: dec!(20_000_000),
                cash_other: Decimal::ZERO,
                real_estate_sale: Decimal::ZERO,
            },
            bank_loans: BankLoans {
                mortgage_loan: dec!(400_000_000),
                credit_loan: dec!(30_000_000),
                other_loan: Decimal::ZERO,
            },
            private_borrowing: dec!(300_000_000),
        }
    }

    #[test]
    fn test_plan_totals() {
        let out = build_funding_plan(&sample_plan()).unwrap();
        let r = &out.result;
        assert_eq!(r.total_gift, dec!(150_000_000));
        assert_eq!(r.deduction_total, dec!(150_000_000));
        assert_eq!(r.taxable_gift, Decimal::ZERO);
        assert_eq!(r.gift_tax.final_tax, Decimal::ZERO);
        assert_eq!(r.new_gift_total, dec!(150_000_000));
        assert_eq!(r.parent_total_support, dec!(450_000_000));
        assert_eq!(r.own_funds_total, dec!(250_000_000));
        assert_eq!(r.bank_loans_total, dec!(430_000_000));
        assert_eq!(r.grand_total, dec!(980_000_000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_additional_gift_is_taxed_progressively() {
        let mut plan = sample_plan();
        plan.own_funds.additional_gift = dec!(200_000_000);
        let out = build_funding_plan(&plan).unwrap();
        let r = &out.result;
        assert_eq!(r.taxable_gift, dec!(200_000_000));
        // 200M * 20% - 10M = 30M, no early filing discount
        assert_eq!(r.gift_tax.final_tax, dec!(30_000_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_deductions_are_capped() {
        let mut plan = sample_plan();
        plan.own_funds.basic_deduction = dec!(70_000_000);
        plan.own_funds.marriage_deduction = dec!(120_000_000);
        let out = build_funding_plan(&plan).unwrap();
        assert_eq!(out.result.deduction_total, dec!(150_000_000));
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut plan = sample_plan();
        plan.bank_loans.credit_loan = dec!(-1);
        match build_funding_plan(&plan) {
            Err(HomeFinanceError::InvalidInput { field, .. }) => assert_eq!(field, "credit_loan"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_principal_transfers() {
        let plan = sample_plan();
        let principals = loan_principals_from_plan(&plan);
        assert_eq!(principals.bank_principal, dec!(430_000_000));
        assert_eq!(principals.private_principal, dec!(300_000_000));

        let updated = apply_loan_principals(
            &plan,
            &LoanPrincipals {
                bank_principal: dec!(500_000_000),
                private_principal: dec!(100_000_000),
            },
        );
        assert_eq!(updated.bank_loans.mortgage_loan, dec!(500_000_000));
        assert_eq!(updated.bank_loans.credit_loan, Decimal::ZERO);
        assert_eq!(updated.bank_loans.other_loan, Decimal::ZERO);
        assert_eq!(updated.private_borrowing, dec!(100_000_000));
        assert_eq!(updated.own_funds, plan.own_funds);
    }

    #[test]
    fn test_partial_json_defaults_to_zero() {
        let plan: FundingPlanInput =
            serde_json::from_str(r#"{"bank_loans": {"mortgage_loan": 1000}}"#).unwrap();
        assert_eq!(plan.bank_loans.total(), dec!(1000));
        assert_eq!(plan.private_borrowing, Decimal::ZERO);
    }
}
