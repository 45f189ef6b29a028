use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeFinanceError;
use crate::gift_tax::brackets::bracket_for;
use crate::types::{Money, Rate};
use crate::HomeFinanceResult;

/// Discount for filing the return within the statutory deadline.
pub const EARLY_FILING_DISCOUNT_RATE: Rate = dec!(0.03);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftTaxInput {
    /// Appraised value of the gift.
    pub gift_amount: Money,
    /// Gift deduction (e.g. 50M for an adult child from a lineal ascendant).
    #[serde(default)]
    pub deduction: Money,
    #[serde(default)]
    pub appraisal_fee: Money,
    #[serde(default = "default_true")]
    pub apply_early_filing_discount: bool,
}

fn default_true() -> bool {
    true
}

impl GiftTaxInput {
    pub fn validate(&self) -> HomeFinanceResult<()> {
        for (field, value) in [
            ("gift_amount", self.gift_amount),
            ("deduction", self.deduction),
            ("appraisal_fee", self.appraisal_fee),
        ] {
            if value < Decimal::ZERO {
                return Err(HomeFinanceError::invalid(field, "Amount cannot be negative"));
            }
        }
        Ok(())
    }

    pub fn compute(&self) -> GiftTaxResult {
        compute_gift_tax(
            self.gift_amount,
            self.deduction,
            self.appraisal_fee,
            self.apply_early_filing_discount,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftTaxResult {
    pub taxable_base: Money,
    /// Marginal rate of the applied bracket (0.10 = 10%); zero when no tax is due.
    pub applied_rate: Rate,
    pub cumulative_deduction: Money,
    pub tax_before_discount: Money,
    pub early_filing_discount: Money,
    pub final_tax: Money,
}

/// Gift tax on `gift_amount` after deductions, with the optional early filing discount.
pub fn compute_gift_tax(
    gift_amount: Money,
    deduction: Money,
    appraisal_fee: Money,
    apply_early_filing_discount: bool,
) -> GiftTaxResult {
    let taxable_base = (gift_amount - deduction - appraisal_fee).max(Decimal::ZERO);
    debug!("compute_gift_tax: gift={gift_amount} taxable_base={taxable_base}");

    let Some(bracket) = bracket_for(taxable_base) else {
        return GiftTaxResult {
            taxable_base,
            applied_rate: Decimal::ZERO,
            cumulative_deduction: Decimal::ZERO,
            tax_before_discount: Decimal::ZERO,
            early_filing_discount: Decimal::ZERO,
            final_tax: Decimal::ZERO,
        };
    };

    let tax_before_discount = bracket.tax_on(taxable_base).max(Decimal::ZERO);
    let early_filing_discount = if apply_early_filing_discount {
        tax_before_discount * EARLY_FILING_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };

    GiftTaxResult {
        taxable_base,
        applied_rate: bracket.marginal_rate,
        cumulative_deduction: bracket.cumulative_deduction,
        tax_before_discount,
        early_filing_discount,
        final_tax: (tax_before_discount - early_filing_discount).max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_bracket_with_discount() {
        let r = compute_gift_tax(dec!(100_000_000), dec!(50_000_000), Decimal::ZERO, true);
        assert_eq!(r.taxable_base, dec!(50_000_000));
        assert_eq!(r.applied_rate, dec!(0.10));
        assert_eq!(r.cumulative_deduction, Decimal::ZERO);
        assert_eq!(r.tax_before_discount, dec!(5_000_000));
        assert_eq!(r.early_filing_discount, dec!(150_000));
        assert_eq!(r.final_tax, dec!(4_850_000));
    }

    #[test]
    fn test_without_discount() {
        let r = compute_gift_tax(dec!(100_000_000), dec!(50_000_000), Decimal::ZERO, false);
        assert_eq!(r.early_filing_discount, Decimal::ZERO);
        assert_eq!(r.final_tax, dec!(5_000_000));
    }

    #[test]
    fn test_second_bracket() {
        // 300M base: 300M * 20% - 10M = 50M
        let r = compute_gift_tax(dec!(350_000_000), dec!(50_000_000), Decimal::ZERO, false);
        assert_eq!(r.applied_rate, dec!(0.20));
        assert_eq!(r.cumulative_deduction, dec!(10_000_000));
        assert_eq!(r.final_tax, dec!(50_000_000));
    }

    #[test]
    fn test_top_bracket() {
        // 5B base: 5B * 50% - 460M = 2.04B
        let r = compute_gift_tax(dec!(5_000_000_000), Decimal::ZERO, Decimal::ZERO, false);
        assert_eq!(r.applied_rate, dec!(0.50));
        assert_eq!(r.tax_before_discount, dec!(2_040_000_000));
    }

    #[test]
    fn test_appraisal_fee_reduces_base() {
        let r = compute_gift_tax(dec!(60_000_000), dec!(50_000_000), dec!(5_000_000), true);
        assert_eq!(r.taxable_base, dec!(5_000_000));
        assert_eq!(r.tax_before_discount, dec!(500_000));
    }

    #[test]
    fn test_deductions_exceeding_gift_owe_nothing() {
        let r = compute_gift_tax(dec!(30_000_000), dec!(50_000_000), Decimal::ZERO, true);
        assert_eq!(r.taxable_base, Decimal::ZERO);
        assert_eq!(r.applied_rate, Decimal::ZERO);
        assert_eq!(r.cumulative_deduction, Decimal::ZERO);
        assert_eq!(r.final_tax, Decimal::ZERO);
    }

    #[test]
    fn test_input_validation_and_defaults() {
        let input: GiftTaxInput =
            serde_json::from_str(r#"{"gift_amount": 100000000, "deduction": 50000000}"#).unwrap();
        assert!(input.apply_early_filing_discount);
        assert_eq!(input.appraisal_fee, Decimal::ZERO);
        assert!(input.validate().is_ok());
        assert_eq!(input.compute().final_tax, dec!(4_850_000));

        let bad = GiftTaxInput {
            deduction: dec!(-1),
            ..input
        };
        assert!(bad.validate().is_err());
    }
}
