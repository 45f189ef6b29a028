use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage rate (4.5 = 4.5%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// Compute base^n for a non-negative integer exponent via iterative multiplication.
/// Returns `None` when the power leaves the Decimal range.
pub fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Level instalment that repays `amount` over `nper` periods at `rate` per period.
///
/// Standard annuity formula `A · r(1+r)^n / ((1+r)^n − 1)`; a zero rate (or an
/// annuity factor that collapses to zero) falls back to straight division.
/// Returns zero when `nper` is zero.
pub fn level_payment(rate: Rate, nper: u32, amount: Money) -> Money {
    if nper == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(nper);

    if rate.is_zero() {
        return amount / n;
    }

    // (1+r)^n beyond Decimal range: the annuity factor has converged to r.
    let Some(factor) = iterative_pow(Decimal::ONE + rate, nper) else {
        return amount * rate;
    };
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return amount / n;
    }

    amount * rate * (factor / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_iterative_pow() {
        assert_eq!(iterative_pow(dec!(1.1), 2), Some(dec!(1.21)));
        assert_eq!(iterative_pow(dec!(5), 0), Some(Decimal::ONE));
        assert_eq!(iterative_pow(dec!(10), 40), None);
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(level_payment(Decimal::ZERO, 12, dec!(1200)), dec!(100));
    }

    #[test]
    fn test_level_payment_known_answer() {
        // 100,000,000 over 360 months at 4.5% p.a. => ~506,685
        let pmt = level_payment(monthly_rate(dec!(4.5)), 360, dec!(100_000_000));
        assert!((pmt - dec!(506_685)).abs() < dec!(1), "got {pmt}");
    }

    #[test]
    fn test_level_payment_extreme_rate_does_not_overflow() {
        // 1000% p.a. over 600 months: payment converges to interest-only
        let rate = monthly_rate(dec!(1000));
        let pmt = level_payment(rate, 600, dec!(1_000_000));
        assert!((pmt - dec!(1_000_000) * rate).abs() < dec!(1));
    }

    #[test]
    fn test_level_payment_zero_periods() {
        assert_eq!(level_payment(dec!(0.01), 0, dec!(1000)), Decimal::ZERO);
    }
}
