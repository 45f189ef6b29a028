//! Progressive gift tax schedule.
//!
//! Tax on a taxable base inside bracket *i* is `base · rate[i] − deduction[i]`,
//! where the cumulative deduction makes the function continuous at every
//! boundary: `deduction[i] = bound[i-1] · (rate[i] − rate[i-1]) + deduction[i-1]`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GiftTaxBracket {
    /// Inclusive upper bound of the taxable base; `None` for the top bracket.
    pub upper_bound: Option<Money>,
    pub marginal_rate: Rate,
    pub cumulative_deduction: Money,
}

impl GiftTaxBracket {
    pub fn contains(&self, taxable_base: Money) -> bool {
        self.upper_bound.map_or(true, |bound| taxable_base <= bound)
    }

    /// Tax on `taxable_base` under this bracket's formula, before any clamping.
    pub fn tax_on(&self, taxable_base: Money) -> Money {
        taxable_base * self.marginal_rate - self.cumulative_deduction
    }
}

/// Gift tax brackets, ascending by upper bound.
pub const GIFT_TAX_BRACKETS: [GiftTaxBracket; 5] = [
    GiftTaxBracket {
        upper_bound: Some(dec!(100_000_000)),
        marginal_rate: dec!(0.10),
        cumulative_deduction: dec!(0),
    },
    GiftTaxBracket {
        upper_bound: Some(dec!(500_000_000)),
        marginal_rate: dec!(0.20),
        cumulative_deduction: dec!(10_000_000),
    },
    GiftTaxBracket {
        upper_bound: Some(dec!(1_000_000_000)),
        marginal_rate: dec!(0.30),
        cumulative_deduction: dec!(60_000_000),
    },
    GiftTaxBracket {
        upper_bound: Some(dec!(3_000_000_000)),
        marginal_rate: dec!(0.40),
        cumulative_deduction: dec!(160_000_000),
    },
    GiftTaxBracket {
        upper_bound: None,
        marginal_rate: dec!(0.50),
        cumulative_deduction: dec!(460_000_000),
    },
];

/// First bracket whose upper bound covers `taxable_base`.
/// `None` for a non-positive base, which owes no tax.
pub fn bracket_for(taxable_base: Money) -> Option<&'static GiftTaxBracket> {
    if taxable_base <= Decimal::ZERO {
        return None;
    }
    GIFT_TAX_BRACKETS.iter().find(|b| b.contains(taxable_base))
}
