//! Job loss, bankruptcy, credit drift, inflation and mortality.

use crate::milestones::rating;
use crate::{chance, market, pick};
use rand::Rng;
use rust_decimal::Decimal;
use sim_core::money::{self, units};
use sim_core::{EconomyPhase, GameEvent, GameState, Severity, START_AGE};
use sim_econ::{passive_income, total_debt};
use tracing::{info, warn};

/// Months between a recession layoff and automatic re-employment.
pub const REHIRE_DELAY_MONTHS: u32 = 3;
/// Cash below this at the end of a month forces liquidation.
pub const BANKRUPTCY_THRESHOLD: i64 = -10_000;
/// Cash left after debts are restructured.
pub const RECOVERY_CASH: i64 = 500;
/// Age from which the annual mortality roll starts.
pub const MORTALITY_AGE: u32 = 70;

/// Recession layoffs. Schedules re-employment instead of ending the career.
pub fn roll_job_loss(state: &mut GameState, rng: &mut impl Rng) -> Option<GameEvent> {
    if !state.is_employed() || state.economy_phase != EconomyPhase::Recession {
        return None;
    }
    if !chance(rng, state.phase().job_loss_risk) {
        return None;
    }
    state.has_quit_job = true;
    state.salary = Decimal::ZERO;
    state.pending_rehire_in_months = Some(REHIRE_DELAY_MONTHS);
    info!(month = state.month, "lost job");
    Some(GameEvent::new(
        state.month,
        "Lost your job due to recession!",
        Severity::Negative,
    ))
}

/// Count down a scheduled re-employment and fire it at zero.
///
/// Nothing happens if the player found work meanwhile or no longer needs a
/// wage.
pub fn advance_rehire(state: &mut GameState) -> Option<GameEvent> {
    let remaining = state.pending_rehire_in_months?;
    if remaining > 1 {
        state.pending_rehire_in_months = Some(remaining - 1);
        return None;
    }
    state.pending_rehire_in_months = None;
    if state.is_employed() || state.escaped_rat_race {
        return None;
    }
    state.has_quit_job = false;
    state.salary = money::scale(
        state.base_salary,
        0.9 * state.lifestyle.params().salary_mod,
    );
    info!(month = state.month, salary = %state.salary, "rehired");
    Some(GameEvent::new(
        state.month,
        "Found new job at reduced salary",
        Severity::Positive,
    ))
}

pub fn is_bankrupt(state: &GameState) -> bool {
    state.cash < units(BANKRUPTCY_THRESHOLD)
}

/// Sell assets front to back until solvent. If that is not enough, halve
/// every debt, take a 100 point credit hit and restart from a small float.
pub fn handle_bankruptcy(state: &mut GameState) -> Vec<GameEvent> {
    warn!(month = state.month, cash = %state.cash, "bankruptcy");
    let mut events = vec![GameEvent::new(
        state.month,
        "BANKRUPTCY! Forced to sell assets.",
        Severity::Negative,
    )];

    while state.cash < Decimal::ZERO {
        let Some(id) = state.assets.first().map(|a| a.id) else {
            break;
        };
        match market::sell_asset(state, id) {
            Ok(sold) => events.extend(sold),
            Err(_) => break,
        }
    }

    if state.cash < Decimal::ZERO {
        for debt in state.debts.iter_mut() {
            debt.balance = money::whole(debt.balance / Decimal::TWO);
        }
        state.prune_debts();
        state.adjust_credit(-100);
        state.cash = units(RECOVERY_CASH);
        events.push(GameEvent::new(
            state.month,
            "Debts restructured: balances halved, credit score -100",
            Severity::Negative,
        ));
    }
    events
}

/// Monthly credit score movement.
pub fn drift_credit(state: &mut GameState, rng: &mut impl Rng) {
    let mut delta = 0;
    if !state.debts.is_empty() && state.cash >= Decimal::ZERO && chance(rng, 0.3) {
        delta += 1;
    }
    let income = state.salary + passive_income(state);
    if total_debt(state) > income * Decimal::from(48) {
        delta -= 1;
    }
    delta += pick(rng, 3) as i32 - 1;
    state.adjust_credit(delta);
}

/// Recompute living expenses from the lifestyle base at 3% a year since 18.
pub fn apply_inflation(state: &mut GameState) -> GameEvent {
    let base = units(i64::from(state.lifestyle.params().expenses));
    let years = state.years_played() as i32;
    state.living_expenses = money::scale(base, 1.03_f64.powi(years));
    GameEvent::new(
        state.month,
        format!(
            "Annual inflation: expenses now {}/mo",
            money::format(state.living_expenses)
        ),
        Severity::Gold,
    )
}

/// Yearly chance of dying, 1% at 70 rising linearly to 30% at 100.
pub fn mortality(age: u32) -> f64 {
    if age < MORTALITY_AGE {
        return 0.0;
    }
    0.01 + f64::from(age - MORTALITY_AGE) / 30.0 * 0.29
}

/// Roll for death on a birthday. Sets the terminal `death_age` on a hit.
pub fn roll_death(state: &mut GameState, rng: &mut impl Rng) -> Option<GameEvent> {
    if state.is_dead() || state.age < MORTALITY_AGE {
        return None;
    }
    if !chance(rng, mortality(state.age)) {
        return None;
    }
    state.death_age = Some(state.age);
    let years = state.age - START_AGE;
    info!(age = state.age, month = state.month, "player died");
    Some(GameEvent::new(
        state.month,
        format!(
            "You passed away at age {}. Your legacy lives on... {years} years played, {}",
            state.age,
            rating(years)
        ),
        Severity::Negative,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use sim_core::{Asset, Holding, SecurityHolding};

    #[test]
    fn bankruptcy_without_assets_restructures_debt() {
        let mut state = GameState::default();
        state.cash = units(-15_000);
        assert!(is_bankrupt(&state));
        handle_bankruptcy(&mut state);
        assert_eq!(state.cash, units(500));
        assert_eq!(state.credit_score, 580);
        let balances: Vec<Decimal> = state.debts.iter().map(|d| d.balance).collect();
        assert_eq!(balances, vec![units(90_000), units(7500), units(4000)]);
    }

    #[test]
    fn bankruptcy_credit_floor() {
        let mut state = GameState::default();
        state.cash = units(-15_000);
        state.credit_score = 350;
        handle_bankruptcy(&mut state);
        assert_eq!(state.credit_score, 300);
    }

    #[test]
    fn liquidation_stops_once_solvent() {
        let mut state = GameState::default();
        state.cash = units(-12_000);
        for (id, name) in [(1, "Visa (V)"), (2, "Apple (AAPL)")] {
            state.assets.push(Asset {
                id,
                name: name.into(),
                holding: Holding::Stock(SecurityHolding {
                    value: units(20_000),
                    cost_basis: units(20_000),
                    income: Decimal::ZERO,
                    return_rate: 0.1,
                    volatility: 0.2,
                    yield_rate: 0.0,
                    months_held: 24,
                }),
            });
        }
        state.next_asset_id = 3;
        handle_bankruptcy(&mut state);
        assert_eq!(state.cash, units(8000));
        assert_eq!(state.assets.len(), 1);
        assert_eq!(state.assets[0].name, "Apple (AAPL)");
        assert_eq!(state.credit_score, 680);
    }

    #[test]
    fn layoff_then_rehire_after_delay() {
        let mut state = GameState::default();
        state.economy_phase = EconomyPhase::Recession;
        assert!(roll_job_loss(&mut state, &mut StepRng::new(0, 0)).is_some());
        assert!(!state.is_employed());
        assert_eq!(state.salary, Decimal::ZERO);
        assert!(advance_rehire(&mut state).is_none());
        assert!(advance_rehire(&mut state).is_none());
        assert!(advance_rehire(&mut state).is_some());
        assert!(state.is_employed());
        assert_eq!(state.salary, units(3600));
        assert_eq!(state.pending_rehire_in_months, None);
    }

    #[test]
    fn no_rehire_after_escaping_the_rat_race() {
        let mut state = GameState::default();
        state.has_quit_job = true;
        state.escaped_rat_race = true;
        state.pending_rehire_in_months = Some(1);
        assert!(advance_rehire(&mut state).is_none());
        assert!(!state.is_employed());
    }

    #[test]
    fn layoffs_only_in_recession() {
        let mut state = GameState::default();
        assert!(roll_job_loss(&mut state, &mut StepRng::new(0, 0)).is_none());
        assert!(state.is_employed());
    }

    #[test]
    fn inflation_compounds_from_lifestyle_base() {
        let mut state = GameState::default();
        state.age = 28;
        apply_inflation(&mut state);
        // 1500 * 1.03^10 = 2015.87
        assert_eq!(state.living_expenses, units(2016));
    }

    #[test]
    fn mortality_curve() {
        assert_eq!(mortality(69), 0.0);
        assert!((mortality(70) - 0.01).abs() < 1e-12);
        assert!((mortality(100) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn death_is_recorded_once() {
        let mut state = GameState::default();
        state.age = 75;
        assert!(roll_death(&mut state, &mut StepRng::new(0, 0)).is_some());
        assert_eq!(state.death_age, Some(75));
        assert!(roll_death(&mut state, &mut StepRng::new(0, 0)).is_none());
    }

    #[test]
    fn credit_drift_stays_in_bounds() {
        let mut state = GameState::default();
        state.credit_score = 850;
        drift_credit(&mut state, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(state.credit_score, 850);
        state.credit_score = 300;
        state.salary = Decimal::ZERO;
        drift_credit(&mut state, &mut StepRng::new(0, 0));
        assert_eq!(state.credit_score, 300);
    }
}
