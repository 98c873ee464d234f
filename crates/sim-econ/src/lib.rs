#![deny(warnings)]

//! Economic models: loan terms and derived financial metrics.
//!
//! This crate provides validated utilities for:
//! - Fixed-rate amortized payments
//! - Credit-score based loan pricing and borrowing limits
//! - Pure metrics over a game state (see [`metrics`])

pub mod metrics;

pub use metrics::{
    cash_flow, concentration_penalty, current_interest_rate, debt_payments,
    diversification_bonus, net_worth, passive_income, property_offer_net_income, total_debt,
    total_expenses,
};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sim_core::money;
use sim_core::GameState;
use thiserror::Error;

/// Term of a bank loan in months.
pub const BANK_LOAN_MONTHS: u32 = 60;
/// Term of a property mortgage in months.
pub const MORTGAGE_MONTHS: u32 = 360;
/// Spread of a mortgage over the current base rate.
pub const MORTGAGE_SPREAD: f64 = 0.005;

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Annual rate must be finite and non-negative.
    #[error("invalid interest rate: {0}")]
    InvalidRate(f64),
    /// Loan term must be at least one month.
    #[error("loan term must be > 0 months")]
    InvalidTerm,
    /// Principal must be non-negative.
    #[error("invalid principal")]
    InvalidPrincipal,
    /// Numeric conversion to or from floating point failed.
    #[error("non-finite numeric conversion")]
    NonFinite,
}

/// Monthly payment of a fixed-rate loan, rounded to cents.
///
/// Standard annuity formula P·r·(1+r)^n / ((1+r)^n − 1) with r the monthly
/// rate. A zero rate degenerates to principal / months.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use sim_econ::amortized_payment;
///
/// let p = amortized_payment(Decimal::new(200_000, 0), 0.06, 360).unwrap();
/// assert_eq!(p, Decimal::new(119910, 2));
/// ```
pub fn amortized_payment(
    principal: Decimal,
    annual_rate: f64,
    months: u32,
) -> Result<Decimal, EconError> {
    if months == 0 {
        return Err(EconError::InvalidTerm);
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(EconError::InvalidRate(annual_rate));
    }
    if principal < Decimal::ZERO {
        return Err(EconError::InvalidPrincipal);
    }
    let p = principal.to_f64().ok_or(EconError::NonFinite)?;
    let n = f64::from(months);
    let r = annual_rate / 12.0;
    let payment = if r == 0.0 {
        p / n
    } else {
        let growth = (1.0 + r).powf(n);
        p * r * growth / (growth - 1.0)
    };
    if !payment.is_finite() {
        return Err(EconError::NonFinite);
    }
    let payment = Decimal::from_f64(payment).ok_or(EconError::NonFinite)?;
    Ok(payment.round_dp(2))
}

/// Amortized payment rounded to whole currency units, as booked on a debt.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: f64,
    months: u32,
) -> Result<Decimal, EconError> {
    amortized_payment(principal, annual_rate, months).map(money::whole)
}

/// Bank loan APR tiered by credit score.
pub fn loan_rate(credit_score: u16) -> f64 {
    match credit_score {
        750.. => 0.08,
        700..=749 => 0.09,
        650..=699 => 0.11,
        _ => 0.12,
    }
}

/// Largest bank loan on offer: (salary + passive income) times a multiplier
/// growing from 3× at credit 650 to a cap of 6×.
pub fn max_loan_amount(state: &GameState) -> Decimal {
    let credit_bonus = ((f64::from(state.credit_score) - 650.0) / 100.0).max(0.0) * 3.0;
    let multiplier = (3.0 + credit_bonus).min(6.0);
    let income = state.salary + passive_income(state);
    money::scale(income, multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::money::units;

    #[test]
    fn mortgage_payment_matches_reference() {
        let p = amortized_payment(units(200_000), 0.06, 360).unwrap();
        assert_eq!(p, Decimal::new(119910, 2));
        assert_eq!(monthly_payment(units(200_000), 0.06, 360).unwrap(), units(1199));
    }

    #[test]
    fn zero_rate_is_straight_line() {
        let p = amortized_payment(units(12_000), 0.0, 60).unwrap();
        assert_eq!(p, units(200));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            amortized_payment(units(1000), 0.05, 0),
            Err(EconError::InvalidTerm)
        );
        assert!(amortized_payment(units(1000), f64::NAN, 12).is_err());
        assert!(amortized_payment(units(1000), -0.01, 12).is_err());
        assert_eq!(
            amortized_payment(units(-1), 0.05, 12),
            Err(EconError::InvalidPrincipal)
        );
    }

    #[test]
    fn loan_rate_tiers() {
        assert_eq!(loan_rate(800), 0.08);
        assert_eq!(loan_rate(750), 0.08);
        assert_eq!(loan_rate(749), 0.09);
        assert_eq!(loan_rate(700), 0.09);
        assert_eq!(loan_rate(650), 0.11);
        assert_eq!(loan_rate(649), 0.12);
        assert_eq!(loan_rate(300), 0.12);
    }

    #[test]
    fn max_loan_scales_with_credit() {
        let mut state = GameState::default();
        state.credit_score = 650;
        assert_eq!(max_loan_amount(&state), units(12_000));
        state.credit_score = 700;
        assert_eq!(max_loan_amount(&state), units(18_000));
        state.credit_score = 850;
        assert_eq!(max_loan_amount(&state), units(24_000));
        state.credit_score = 500;
        assert_eq!(max_loan_amount(&state), units(12_000));
    }

    proptest! {
        #[test]
        fn payment_covers_principal(
            principal in 1_000i64..1_000_000,
            rate in 0.0f64..0.25,
            months in 1u32..480,
        ) {
            let p = amortized_payment(units(principal), rate, months).unwrap();
            let total = p * Decimal::from(months);
            // Allow cent rounding on each instalment.
            prop_assert!(total + Decimal::from(months) / Decimal::from(100) >= units(principal));
        }

        #[test]
        fn payment_monotonic_in_rate(principal in 1_000i64..500_000, months in 12u32..360) {
            let low = amortized_payment(units(principal), 0.03, months).unwrap();
            let high = amortized_payment(units(principal), 0.09, months).unwrap();
            prop_assert!(high >= low);
        }
    }
}
