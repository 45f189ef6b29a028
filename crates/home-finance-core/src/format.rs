//! KRW display formatting and lenient parsing of comma-grouped amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::types::{round_won, Money, Percent};

const EOK: Decimal = dec!(100_000_000);
const MAN: Decimal = dec!(10_000);

/// "1,000,000원". Fractions are rounded to whole won.
pub fn format_won(amount: Money) -> String {
    format!("{}원", group_thousands(round_won(amount)))
}

/// Amount in 억/만 units, e.g. 150,000,000 → "1억 5000만원".
///
/// A remainder below 10,000 is shown only when there are no larger units.
pub fn format_korean_units(amount: Money) -> String {
    let value = round_won(amount);
    if value.is_zero() {
        return "0원".to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let value = value.abs();
    let eok = (value / EOK).floor();
    let man = ((value % EOK) / MAN).floor();
    let rest = value % MAN;

    let mut parts: Vec<String> = Vec::new();
    if eok > Decimal::ZERO {
        parts.push(format!("{}억", eok.normalize()));
    }
    if man > Decimal::ZERO {
        parts.push(format!("{}만", man.normalize()));
    }
    if parts.is_empty() && rest > Decimal::ZERO {
        parts.push(rest.normalize().to_string());
    }

    format!("{sign}{}원", parts.join(" "))
}

/// "4.5%"; trailing zeros are dropped.
pub fn format_percent(value: Percent) -> String {
    format!("{}%", value.normalize())
}

/// Parse user input such as "1,500,000" or "1,500,000원". Anything that is
/// not a number parses as zero.
pub fn parse_amount(input: &str) -> Money {
    let cleaned: String = input
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

fn group_thousands(value: Decimal) -> String {
    let digits = value.abs().normalize().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }
    if value.is_sign_negative() && !value.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}
