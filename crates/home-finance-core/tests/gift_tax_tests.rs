use home_finance_core::funding::plan::{build_funding_plan, FundingPlanInput};
use home_finance_core::gift_tax::brackets::{bracket_for, GIFT_TAX_BRACKETS};
use home_finance_core::gift_tax::calculator::compute_gift_tax;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Gift tax calculator
// ===========================================================================

#[test]
fn test_gift_tax_known_answer() {
    let r = compute_gift_tax(dec!(100_000_000), dec!(50_000_000), Decimal::ZERO, true);
    assert_eq!(r.taxable_base, dec!(50_000_000));
    assert_eq!(r.tax_before_discount, dec!(5_000_000));
    assert_eq!(r.early_filing_discount, dec!(150_000));
    assert_eq!(r.final_tax, dec!(4_850_000));
}

#[test]
fn test_gift_tax_is_monotonic_in_gift_amount() {
    let deduction = dec!(50_000_000);
    let fee = dec!(2_000_000);
    for discount in [false, true] {
        let mut previous = Decimal::ZERO;
        let mut gift = Decimal::ZERO;
        while gift <= dec!(5_000_000_000) {
            let tax = compute_gift_tax(gift, deduction, fee, discount).final_tax;
            assert!(
                tax >= previous,
                "tax fell from {previous} to {tax} at gift {gift}"
            );
            previous = tax;
            gift += dec!(25_000_000);
        }
    }
}

#[test]
fn test_gift_tax_continuous_at_every_boundary() {
    for bracket in GIFT_TAX_BRACKETS.iter().filter(|b| b.upper_bound.is_some()) {
        let bound = bracket.upper_bound.unwrap();
        let at = compute_gift_tax(bound, Decimal::ZERO, Decimal::ZERO, false);
        let above = compute_gift_tax(bound + Decimal::ONE, Decimal::ZERO, Decimal::ZERO, false);
        let next = bracket_for(bound + Decimal::ONE).unwrap();

        assert_eq!(at.applied_rate, bracket.marginal_rate);
        assert_eq!(above.applied_rate, next.marginal_rate);
        // One extra won costs exactly the next marginal rate
        assert_eq!(
            above.tax_before_discount - at.tax_before_discount,
            next.marginal_rate
        );
        // Both bracket formulas agree on the boundary itself
        assert_eq!(bracket.tax_on(bound), next.tax_on(bound));
    }
}

#[test]
fn test_gift_tax_known_bracket_values() {
    let cases = [
        (dec!(100_000_000), dec!(10_000_000)),
        (dec!(500_000_000), dec!(90_000_000)),
        (dec!(1_000_000_000), dec!(240_000_000)),
        (dec!(3_000_000_000), dec!(1_040_000_000)),
    ];
    for (base, expected) in cases {
        let r = compute_gift_tax(base, Decimal::ZERO, Decimal::ZERO, false);
        assert_eq!(r.final_tax, expected, "base {base}");
    }
}

#[test]
fn test_final_tax_never_negative() {
    for gift in [Decimal::ZERO, dec!(1), dec!(49_999_999), dec!(-10)] {
        let r = compute_gift_tax(gift, dec!(50_000_000), dec!(1_000_000), true);
        assert!(r.final_tax >= Decimal::ZERO);
        assert_eq!(r.taxable_base, Decimal::ZERO);
    }
}

// ===========================================================================
// Funding plan
// ===========================================================================

#[test]
fn test_funding_plan_matches_direct_gift_tax() {
    let plan: FundingPlanInput = serde_json::from_str(
        r#"{
            "own_funds": {
                "bank_deposit": 50000000,
                "past_gift": 30000000,
                "basic_deduction": 50000000,
                "marriage_deduction": 100000000,
                "additional_gift": 120000000
            },
            "bank_loans": {"mortgage_loan": 300000000},
            "private_borrowing": 200000000
        }"#,
    )
    .unwrap();

    let out = build_funding_plan(&plan).unwrap();
    let r = &out.result;
    assert_eq!(r.total_gift, dec!(300_000_000));
    assert_eq!(r.taxable_gift, dec!(150_000_000));
    assert_eq!(
        r.gift_tax,
        compute_gift_tax(dec!(300_000_000), dec!(150_000_000), Decimal::ZERO, false)
    );
    assert_eq!(r.gift_tax.final_tax, dec!(20_000_000));
    assert_eq!(r.parent_total_support, dec!(470_000_000));
    assert_eq!(r.own_funds_total, dec!(350_000_000));
    assert_eq!(r.grand_total, dec!(850_000_000));
}
