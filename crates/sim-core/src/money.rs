//! Currency helpers.
//!
//! Balances are carried as [`Decimal`] whole units; rates stay `f64` and are
//! folded in through [`scale`], which rounds every monetary result to the
//! nearest unit.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole currency units, halves away from zero.
pub fn whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiply by a floating point factor and round to whole units.
///
/// A non-finite factor leaves the amount unchanged.
pub fn scale(amount: Decimal, factor: f64) -> Decimal {
    match Decimal::from_f64(factor) {
        Some(f) => whole(amount * f),
        None => amount,
    }
}

/// Lossy conversion used when a monetary value feeds a float formula.
pub fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Convert a float result back into money, rounded to whole units.
/// Non-finite input maps to zero.
pub fn from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).map(whole).unwrap_or(Decimal::ZERO)
}

/// Whole-unit money from an integer catalog figure.
pub fn units(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Render as `$1,234`, or `-$1,234` for debits.
pub fn format(amount: Decimal) -> String {
    let rounded = whole(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}
