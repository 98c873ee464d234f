//! Four-phase business cycle.

use rand::Rng;
use sim_core::{GameEvent, GameState, Severity};
use tracing::info;

/// Probability of leaving the current phase this month.
///
/// Zero before the phase's minimum duration, then rising linearly to a
/// ceiling of 30% at the maximum duration.
pub fn transition_chance(months_in_phase: u32, duration: (u32, u32)) -> f64 {
    let (min, max) = duration;
    if months_in_phase < min || max <= min {
        return 0.0;
    }
    let progress = f64::from(months_in_phase - min) / f64::from(max - min);
    progress.min(1.0) * 0.3
}

/// Advance the cycle by one month, possibly entering the next phase.
pub fn advance_cycle(state: &mut GameState, rng: &mut impl Rng) -> Option<GameEvent> {
    state.economy_months_in_phase += 1;
    let chance = transition_chance(state.economy_months_in_phase, state.phase().duration);
    if rng.gen::<f64>() >= chance {
        return None;
    }
    let from = state.economy_phase;
    state.economy_phase = from.next();
    state.economy_months_in_phase = 0;
    info!(
        from = from.label(),
        to = state.economy_phase.label(),
        month = state.month,
        "phase change"
    );
    Some(GameEvent::new(
        state.month,
        state.economy_phase.entry_message(),
        Severity::Gold,
    ))
}

/// Reset the cycle to the opening expansion phase.
pub fn initialize(state: &mut GameState) {
    state.economy_phase = sim_core::EconomyPhase::Expansion;
    state.economy_months_in_phase = 0;
    state.base_interest_rate = 0.05;
}
