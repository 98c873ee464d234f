#![deny(warnings)]

//! Monthly simulation engine for the wealth-building game.
//!
//! The free functions in each module operate on a borrowed [`GameState`] and
//! an injected random source, which keeps them testable with mock RNGs.
//! [`Simulation`] bundles a state with a seeded [`ChaCha8Rng`] and is the
//! surface drivers use: one method per player command, [`Simulation::execute`]
//! for scripted [`Command`]s, and [`run_months`] for batch runs.

pub mod assets;
pub mod career;
pub mod command;
pub mod economy;
pub mod error;
pub mod life_events;
pub mod market;
pub mod milestones;
pub mod risk;
pub mod tick;

pub use command::Command;
pub use error::CommandError;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use sim_core::{AssetId, GameEvent, GameState, JobField, Lifestyle, Milestones, SimConfig};
use sim_econ::{cash_flow, net_worth, passive_income};
use tracing::debug;

/// Bernoulli trial with probability `p`.
pub(crate) fn chance(rng: &mut impl Rng, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Uniform index into a table of `len` entries.
pub(crate) fn pick(rng: &mut impl Rng, len: usize) -> usize {
    let index = (rng.gen::<f64>() * len as f64) as usize;
    index.min(len.saturating_sub(1))
}

/// Key figures of a game at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub months_run: u32,
    pub month: u32,
    pub age: u32,
    pub cash: Decimal,
    pub net_worth: Decimal,
    pub passive_income: Decimal,
    pub cash_flow: Decimal,
    pub credit_score: u16,
    pub financial_iq: u32,
    pub assets: usize,
    pub debts: usize,
    pub achievements: usize,
    pub milestones: Milestones,
    pub dead: bool,
}

/// A game in progress: the state plus the random source that drives it.
pub struct Simulation<R = ChaCha8Rng> {
    state: GameState,
    rng: R,
}

impl Simulation<ChaCha8Rng> {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_rng(
            GameState::new(&config.starting),
            ChaCha8Rng::seed_from_u64(config.rng_seed),
        )
    }
}

impl<R: Rng> Simulation<R> {
    /// Resume from an existing state with any random source.
    pub fn with_rng(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    fn ensure_alive(&self) -> Result<(), CommandError> {
        if self.state.is_dead() {
            return Err(CommandError::GameOver);
        }
        Ok(())
    }

    pub fn start_game(&mut self) -> Vec<GameEvent> {
        tick::start_game(&mut self.state)
    }

    pub fn advance_month(&mut self) -> Vec<GameEvent> {
        tick::advance_month(&mut self.state, &mut self.rng)
    }

    pub fn skip_year(&mut self) -> Vec<GameEvent> {
        tick::skip_year(&mut self.state, &mut self.rng)
    }

    pub fn buy_property(&mut self, name: &str) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::buy_property(&mut self.state, name)
    }

    pub fn buy_business(&mut self, name: &str) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::buy_business(&mut self.state, name)
    }

    pub fn buy_stock(
        &mut self,
        name: &str,
        amount: Decimal,
    ) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::buy_stock(&mut self.state, name, amount)
    }

    pub fn buy_crypto(
        &mut self,
        name: &str,
        amount: Decimal,
    ) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::buy_crypto(&mut self.state, name, amount)
    }

    pub fn sell_asset(&mut self, id: AssetId) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::sell_asset(&mut self.state, id)
    }

    pub fn pay_debt(
        &mut self,
        name: &str,
        amount: Decimal,
    ) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::pay_debt(&mut self.state, name, amount)
    }

    pub fn refinance_debt(&mut self, name: &str) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::refinance_debt(&mut self.state, name)
    }

    pub fn take_bank_loan(&mut self, amount: Decimal) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::take_bank_loan(&mut self.state, amount)
    }

    pub fn enroll_education(&mut self, name: &str) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        career::enroll_education(&mut self.state, name)
    }

    pub fn quit_education(&mut self) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        career::quit_education(&mut self.state)
    }

    pub fn apply_for_job(
        &mut self,
        field: JobField,
        level: u8,
    ) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        career::apply_for_job(&mut self.state, &mut self.rng, field, level)
    }

    pub fn request_promotion(&mut self) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        career::request_promotion(&mut self.state, &mut self.rng)
    }

    pub fn quit_job(&mut self) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        career::quit_job(&mut self.state)
    }

    pub fn change_lifestyle(
        &mut self,
        lifestyle: Lifestyle,
    ) -> Result<Vec<GameEvent>, CommandError> {
        self.ensure_alive()?;
        market::change_lifestyle(&mut self.state, lifestyle)
    }

    /// Dispatch a scripted command. Ticks never fail; a dead game simply
    /// stops advancing.
    pub fn execute(&mut self, command: &Command) -> Result<Vec<GameEvent>, CommandError> {
        let result = match command {
            Command::StartGame => Ok(self.start_game()),
            Command::AdvanceMonth => Ok(self.advance_month()),
            Command::SkipYear => Ok(self.skip_year()),
            Command::BuyProperty { name } => self.buy_property(name),
            Command::BuyBusiness { name } => self.buy_business(name),
            Command::BuyStock { name, amount } => self.buy_stock(name, *amount),
            Command::BuyCrypto { name, amount } => self.buy_crypto(name, *amount),
            Command::SellAsset { id } => self.sell_asset(*id),
            Command::PayDebt { name, amount } => self.pay_debt(name, *amount),
            Command::RefinanceDebt { name } => self.refinance_debt(name),
            Command::TakeBankLoan { amount } => self.take_bank_loan(*amount),
            Command::EnrollEducation { name } => self.enroll_education(name),
            Command::QuitEducation => self.quit_education(),
            Command::ApplyForJob { field, level } => self.apply_for_job(*field, *level),
            Command::RequestPromotion => self.request_promotion(),
            Command::QuitJob => self.quit_job(),
            Command::ChangeLifestyle { lifestyle } => self.change_lifestyle(*lifestyle),
        };
        if let Err(err) = &result {
            debug!(?command, %err, "command rejected");
        }
        result
    }

    pub fn snapshot(&self) -> KpiSnapshot {
        self.snapshot_after(0)
    }

    fn snapshot_after(&self, months_run: u32) -> KpiSnapshot {
        let s = &self.state;
        KpiSnapshot {
            months_run,
            month: s.month,
            age: s.age,
            cash: s.cash,
            net_worth: net_worth(s),
            passive_income: passive_income(s),
            cash_flow: cash_flow(s),
            credit_score: s.credit_score,
            financial_iq: s.financial_iq,
            assets: s.assets.len(),
            debts: s.debts.len(),
            achievements: s.achievements.len(),
            milestones: s.milestones,
            dead: s.is_dead(),
        }
    }
}

/// Run `months` ticks and return the final KPIs.
pub fn run_months<R: Rng>(mut sim: Simulation<R>, months: u32) -> KpiSnapshot {
    run_months_in_place(&mut sim, months).0
}

/// Run up to `months` ticks in place, stopping early on death. Returns the
/// final KPIs and every event emitted along the way.
pub fn run_months_in_place<R: Rng>(
    sim: &mut Simulation<R>,
    months: u32,
) -> (KpiSnapshot, Vec<GameEvent>) {
    let mut events = Vec::new();
    let mut months_run = 0;
    for _ in 0..months {
        if sim.state.is_dead() {
            break;
        }
        events.extend(sim.advance_month());
        months_run += 1;
    }
    (sim.snapshot_after(months_run), events)
}
