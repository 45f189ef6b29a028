//! Loan amortization schedules for bank and private loans.
//!
//! One parameterised engine serves every loan type: level payment
//! (equal principal and interest), equal principal, and bullet repayment,
//! each with an optional balloon share deferred to the final period.

use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HomeFinanceError;
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{round_won, Money, Percent};
use crate::HomeFinanceResult;

/// Longest term a schedule is validated for (50 years).
pub const MAX_TERM_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentMethod {
    /// Level total payment; the principal share grows as interest shrinks.
    #[default]
    EqualPrincipalAndInterest,
    /// Constant principal repayment; total payment declines over time.
    EqualPrincipal,
    /// Interest only, with the principal repaid in the final period.
    Bullet,
}

impl RepaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPrincipalAndInterest => "equal_principal_and_interest",
            RepaymentMethod::EqualPrincipal => "equal_principal",
            RepaymentMethod::Bullet => "bullet",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentMethod {
    type Err = HomeFinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "equal_principal_and_interest" | "equal_payment" | "annuity" => {
                Ok(RepaymentMethod::EqualPrincipalAndInterest)
            }
            "equal_principal" => Ok(RepaymentMethod::EqualPrincipal),
            "bullet" | "balloon" => Ok(RepaymentMethod::Bullet),
            other => Err(HomeFinanceError::invalid(
                "method",
                format!(
                    "unknown repayment method '{other}' \
                     (expected equal_principal_and_interest, equal_principal or bullet)"
                ),
            )),
        }
    }
}

/// Terms of a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual interest rate in percent (4.5 = 4.5%).
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    /// Share of principal deferred to the final payment, in percent.
    #[serde(default)]
    pub balloon_ratio_percent: Percent,
    #[serde(default)]
    pub method: RepaymentMethod,
}

impl LoanTerms {
    /// Range checks a form would enforce before calling [`amortize`].
    /// `amortize` itself accepts anything and clamps instead.
    pub fn validate(&self) -> HomeFinanceResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(HomeFinanceError::invalid(
                "principal",
                "Principal cannot be negative",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(HomeFinanceError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(HomeFinanceError::invalid(
                "term_months",
                format!("Term must be between 1 and {MAX_TERM_MONTHS} months"),
            ));
        }
        if self.balloon_ratio_percent < Decimal::ZERO
            || self.balloon_ratio_percent > Decimal::ONE_HUNDRED
        {
            return Err(HomeFinanceError::invalid(
                "balloon_ratio_percent",
                "Balloon ratio must be between 0 and 100 percent",
            ));
        }
        Ok(())
    }

    /// Amount deferred to the final period.
    pub fn balloon_amount(&self) -> Money {
        let ratio = self
            .balloon_ratio_percent
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        self.principal * ratio / Decimal::ONE_HUNDRED
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One row of the repayment schedule. Currency fields are whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub period_index: u32,
    pub payment: Money,
    pub principal_paid: Money,
    pub interest: Money,
    pub cumulative_principal_paid: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub schedule: Vec<PaymentPeriod>,
    pub first_payment: Money,
    /// Sum of the rounded per-period interest.
    pub total_interest: Money,
    /// Principal plus total interest.
    pub total_payment: Money,
    /// Principal times the annual rate; a display approximation, not schedule based.
    pub nominal_yearly_interest: Money,
}

impl AmortizationResult {
    fn empty() -> Self {
        AmortizationResult {
            schedule: Vec::new(),
            first_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            nominal_yearly_interest: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Build the full month-by-month repayment schedule for `terms`.
///
/// A non-positive principal or a zero term yields an empty schedule with all
/// totals zero. The final period always repays whatever balance is left, so
/// the schedule ends at exactly zero regardless of accumulated drift.
pub fn amortize(terms: &LoanTerms) -> AmortizationResult {
    debug!(
        "amortize: principal={} rate={}% months={} balloon={}% method={}",
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
        terms.balloon_ratio_percent,
        terms.method
    );

    if terms.principal <= Decimal::ZERO || terms.term_months == 0 {
        return AmortizationResult::empty();
    }

    let n = terms.term_months;
    let rate = monthly_rate(terms.annual_rate_percent);
    let balloon = terms.balloon_amount();
    let amortized = terms.principal - balloon;

    // Interest accrues on the full balance, balloon included; the level
    // payment only covers the amortizing part.
    let level = level_payment(rate, n, amortized);
    let straight = amortized / Decimal::from(n);

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;
    let mut cumulative_principal = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=n {
        let interest = balance * rate;

        let (mut principal_paid, mut payment) = match terms.method {
            RepaymentMethod::EqualPrincipalAndInterest => (level - interest, level),
            RepaymentMethod::EqualPrincipal => (straight, straight + interest),
            RepaymentMethod::Bullet => {
                let repaid = if period == n { amortized } else { Decimal::ZERO };
                (repaid, repaid + interest)
            }
        };

        if period == n {
            principal_paid = balance;
            payment = principal_paid + interest;
        }

        cumulative_principal += principal_paid;
        balance -= principal_paid;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        let row = PaymentPeriod {
            period_index: period,
            payment: round_won(payment),
            principal_paid: round_won(principal_paid),
            interest: round_won(interest),
            cumulative_principal_paid: round_won(cumulative_principal),
            remaining_balance: round_won(balance),
        };
        trace!("period {period}: {row:?}");

        total_interest += row.interest;
        schedule.push(row);
    }

    let first_payment = schedule
        .first()
        .map(|p| p.payment)
        .unwrap_or(Decimal::ZERO);

    AmortizationResult {
        schedule,
        first_payment,
        total_interest,
        total_payment: terms.principal + total_interest,
        nominal_yearly_interest: round_won(
            terms.principal * terms.annual_rate_percent / Decimal::ONE_HUNDRED,
        ),
    }
}
