//! Monthly update of owned assets, dispatched on the holding variant.

use crate::{chance, pick};
use rand::Rng;
use rust_decimal::Decimal;
use sim_core::money;
use sim_core::{
    BusinessHolding, EconomyPhase, GameEvent, GameState, Holding, PhaseParams, PropertyHolding,
    SecurityHolding, Severity,
};
use sim_econ::{concentration_penalty, diversification_bonus};
use tracing::info;

/// Vacancy, rent-up and appreciation for one rental.
pub fn update_property(
    month: u32,
    name: &str,
    property: &mut PropertyHolding,
    phase: &PhaseParams,
    rng: &mut impl Rng,
) -> Option<GameEvent> {
    let mut event = None;
    if property.is_vacant {
        property.vacant_months = property.vacant_months.saturating_sub(1);
        if property.vacant_months == 0 {
            property.is_vacant = false;
            event = Some(GameEvent::new(
                month,
                format!("{name} is now rented!"),
                Severity::Positive,
            ));
        }
    } else if chance(rng, property.vacancy_rate * phase.vacancy_mod / 12.0) {
        property.is_vacant = true;
        property.vacant_months = 1 + pick(rng, 3) as u32;
        event = Some(GameEvent::new(
            month,
            format!("{name} is now vacant!"),
            Severity::Negative,
        ));
    }
    property.value = money::scale(property.value, 1.0 + property.appreciation / 12.0);
    event
}

/// Growth or failure for one business. Failed businesses are left untouched.
pub fn update_business(
    month: u32,
    name: &str,
    business: &mut BusinessHolding,
    phase: EconomyPhase,
    rng: &mut impl Rng,
) -> Option<GameEvent> {
    if business.failed {
        return None;
    }
    business.months_owned += 1;

    let risk_mod = if phase == EconomyPhase::Recession { 1.5 } else { 1.0 };
    if chance(rng, business.failure_risk * risk_mod / 12.0) {
        business.failed = true;
        business.income = Decimal::ZERO;
        business.value = money::scale(business.value, 0.3);
        info!(business = name, month, "business failed");
        return Some(GameEvent::new(
            month,
            format!("{name} has failed!"),
            Severity::Negative,
        ));
    }

    let growth = business.growth / 12.0;
    let business_mod = phase.params().business_mod;
    let nudge = if business_mod > 1.0 {
        1.002
    } else if business_mod < 1.0 {
        0.998
    } else {
        1.0
    };
    business.income = money::scale(business.income, (1.0 + growth) * nudge);
    business.value = money::scale(business.value, 1.0 + growth);

    if !business.can_expand && chance(rng, 0.02) {
        business.can_expand = true;
    }
    None
}

/// Compound one month of return into a stock or crypto position.
///
/// `noise_divisor` sets the spread of the uniform noise term; `floor_at_zero`
/// keeps the value from going negative.
pub fn update_security(
    security: &mut SecurityHolding,
    stock_mod: f64,
    adjustment: f64,
    noise_divisor: f64,
    floor_at_zero: bool,
    rng: &mut impl Rng,
) {
    security.months_held += 1;
    let noise = (rng.gen::<f64>() - 0.5) * security.volatility / noise_divisor;
    let monthly = security.return_rate / 12.0 * stock_mod + noise + adjustment / 12.0;
    let mut value = money::scale(security.value, 1.0 + monthly);
    if floor_at_zero && value < Decimal::ZERO {
        value = Decimal::ZERO;
    }
    security.value = value;
    security.refresh_income();
}

pub const STOCK_NOISE_DIVISOR: f64 = 3.0;
pub const CRYPTO_NOISE_DIVISOR: f64 = 2.5;

/// Update every owned asset once, in holding order. Each security sees the
/// portfolio adjustment as it stands after the assets before it have moved.
pub fn update_assets(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let phase = state.economy_phase;
    let params = *phase.params();
    let month = state.month;
    let mut events = Vec::new();

    for i in 0..state.assets.len() {
        let adjustment = diversification_bonus(state) + concentration_penalty(state);
        let asset = &mut state.assets[i];
        let event = match &mut asset.holding {
            Holding::Property(p) => update_property(month, &asset.name, p, &params, rng),
            Holding::Business(b) => update_business(month, &asset.name, b, phase, rng),
            Holding::Stock(s) => {
                update_security(s, params.stock_mod, adjustment, STOCK_NOISE_DIVISOR, false, rng);
                None
            }
            Holding::Crypto(c) => {
                update_security(c, params.stock_mod, adjustment, CRYPTO_NOISE_DIVISOR, true, rng);
                None
            }
        };
        events.extend(event);
    }
    events
}
