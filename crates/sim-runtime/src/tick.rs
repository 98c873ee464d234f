//! The monthly tick and the year skip built on it.

use crate::{assets, career, economy, life_events, milestones, risk};
use rand::Rng;
use rust_decimal::Decimal;
use sim_core::money;
use sim_core::{GameEvent, GameState, Severity};
use sim_econ::passive_income;
use tracing::debug;

/// Reset the economy and announce the start of a game.
pub fn start_game(state: &mut GameState) -> Vec<GameEvent> {
    economy::initialize(state);
    vec![
        GameEvent::new(
            state.month,
            "Started your wealth-building journey!",
            Severity::Gold,
        ),
        GameEvent::new(
            state.month,
            format!("Economy: {} phase", state.economy_phase.label()),
            Severity::Gold,
        ),
    ]
}

/// Charge every scheduled payment, accrue a month of interest, and drop
/// debts that reach zero.
fn amortize_debts(state: &mut GameState) {
    for debt in state.debts.iter_mut() {
        state.cash -= debt.payment;
        let interest = money::scale(debt.balance, debt.rate / 12.0);
        let principal = debt.payment - interest;
        debt.balance = (debt.balance - principal).max(Decimal::ZERO);
    }
    state.prune_debts();
}

/// Advance one month. Does nothing once the player has died.
pub fn advance_month(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    if state.is_dead() {
        return Vec::new();
    }
    let mut events = Vec::new();
    state.month += 1;

    if state.month % 12 == 1 {
        state.age += 1;
        state.raise_received_this_year = false;
        events.push(risk::apply_inflation(state));
        if let Some(death) = risk::roll_death(state, rng) {
            events.push(death);
            return events;
        }
    }

    events.extend(economy::advance_cycle(state, rng));
    events.extend(career::roll_annual_raise(state, rng));
    events.extend(risk::advance_rehire(state));
    events.extend(risk::roll_job_loss(state, rng));

    let salary = if state.is_employed() {
        state.salary
    } else {
        Decimal::ZERO
    };
    let passive = passive_income(state);
    state.cash += salary + passive - state.living_expenses;
    amortize_debts(state);

    events.extend(assets::update_assets(state, rng));
    career::advance_tenure(state);
    events.extend(career::advance_education(state));
    events.extend(life_events::roll_life_events(state, rng));
    risk::drift_credit(state, rng);

    if risk::is_bankrupt(state) {
        events.extend(risk::handle_bankruptcy(state));
    }
    events.extend(milestones::check_win_conditions(state));
    events.extend(milestones::check_achievements(state));

    debug!(
        month = state.month,
        cash = %state.cash,
        passive = %passive,
        credit = state.credit_score,
        events = events.len(),
        "tick"
    );
    events
}

/// Advance twelve months, stopping early on death.
pub fn skip_year(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..12 {
        if state.is_dead() {
            break;
        }
        events.extend(advance_month(state, rng));
    }
    events
}
