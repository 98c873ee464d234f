//! The mutable game aggregate and its starting configuration.

use crate::asset::{Asset, AssetClass, AssetId};
use crate::catalog::{EconomyPhase, JobField, Lifestyle, PhaseParams};
use crate::money::{scale, units};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lowest attainable credit score.
pub const CREDIT_MIN: u16 = 300;
/// Highest attainable credit score.
pub const CREDIT_MAX: u16 = 850;
/// Age at which every game starts.
pub const START_AGE: u32 = 18;

/// Current position on a job ladder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub field: JobField,
    pub level: u8,
    pub title: String,
    pub base_salary: Decimal,
    pub months_in_position: u32,
}

/// A job the player has left, with the month it ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job: Job,
    pub end_month: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationState {
    pub has_bachelors: bool,
    pub has_masters: bool,
    /// Name of the last degree program completed.
    pub degree_field: Option<String>,
    /// Name of the program currently in progress. At most one at a time.
    pub in_progress: Option<String>,
    pub months_remaining: u32,
    pub completed_degrees: BTreeSet<String>,
}

impl EducationState {
    pub fn has_degree(&self, degree_id: &str) -> bool {
        self.completed_degrees.contains(degree_id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebtKind {
    Mortgage,
    Car,
    Credit,
    Bank,
    PropertyLoan,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    pub balance: Decimal,
    /// Annual interest rate.
    pub rate: f64,
    /// Monthly payment.
    pub payment: Decimal,
    pub kind: DebtKind,
    /// Leverage used to acquire an income-producing asset.
    pub is_good_debt: bool,
    /// Property this loan finances; sold together.
    pub linked_asset_id: Option<AssetId>,
}

/// Win-condition flags. Each is set once and never cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    pub rat_race_escaped: bool,
    pub financial_independence: bool,
    pub millionaire: bool,
    pub generational_wealth: bool,
}

/// Player profile a new game starts from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingProfile {
    pub cash: Decimal,
    pub salary: Decimal,
    pub living_expenses: Decimal,
    pub credit_score: u16,
    pub financial_iq: u32,
    pub lifestyle: Lifestyle,
    pub job_field: JobField,
    /// Start with the mortgage, car loan and credit card of the classic game.
    pub starter_debts: bool,
}

impl Default for StartingProfile {
    fn default() -> Self {
        Self {
            cash: units(2000),
            salary: units(4000),
            living_expenses: units(1500),
            credit_score: 680,
            financial_iq: 10,
            lifestyle: Lifestyle::Normal,
            job_field: JobField::Tech,
            starter_debts: true,
        }
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    pub starting: StartingProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            starting: StartingProfile::default(),
        }
    }
}

/// The whole simulation state. Owned by the caller and passed by reference
/// into every engine operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub month: u32,
    pub cash: Decimal,
    pub base_salary: Decimal,
    pub salary: Decimal,
    pub living_expenses: Decimal,
    pub credit_score: u16,
    pub financial_iq: u32,
    pub age: u32,
    /// Set once on death; no further ticks happen afterwards.
    pub death_age: Option<u32>,
    pub has_quit_job: bool,
    pub raise_received_this_year: bool,
    pub escaped_rat_race: bool,
    pub financially_independent: bool,
    pub is_millionaire: bool,
    pub lifestyle: Lifestyle,
    pub economy_phase: EconomyPhase,
    pub economy_months_in_phase: u32,
    pub base_interest_rate: f64,
    pub current_job: Job,
    pub education: EducationState,
    pub job_history: Vec<JobRecord>,
    pub assets: Vec<Asset>,
    pub debts: Vec<Debt>,
    /// Achievement ids in the order they were earned.
    pub achievements: Vec<String>,
    pub milestones: Milestones,
    pub next_asset_id: AssetId,
    /// Months until automatic re-employment after a job loss.
    pub pending_rehire_in_months: Option<u32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&StartingProfile::default())
    }
}

fn starter_debts() -> Vec<Debt> {
    let debt = |name: &str, balance: i64, rate: f64, payment: i64, kind: DebtKind| Debt {
        name: name.to_string(),
        balance: units(balance),
        rate,
        payment: units(payment),
        kind,
        is_good_debt: false,
        linked_asset_id: None,
    };
    vec![
        debt("Mortgage", 180_000, 0.045, 1200, DebtKind::Mortgage),
        debt("Car Loan", 15_000, 0.065, 400, DebtKind::Car),
        debt("Credit Card", 8000, 0.199, 200, DebtKind::Credit),
    ]
}

impl GameState {
    pub fn new(profile: &StartingProfile) -> Self {
        let salary = scale(profile.salary, profile.lifestyle.params().salary_mod);
        Self {
            month: 1,
            cash: profile.cash,
            base_salary: profile.salary,
            salary,
            living_expenses: profile.living_expenses,
            credit_score: profile.credit_score.clamp(CREDIT_MIN, CREDIT_MAX),
            financial_iq: profile.financial_iq,
            age: START_AGE,
            death_age: None,
            has_quit_job: false,
            raise_received_this_year: false,
            escaped_rat_race: false,
            financially_independent: false,
            is_millionaire: false,
            lifestyle: profile.lifestyle,
            economy_phase: EconomyPhase::Expansion,
            economy_months_in_phase: 0,
            base_interest_rate: 0.05,
            current_job: Job {
                field: profile.job_field,
                level: 0,
                title: "Entry Level".to_string(),
                base_salary: profile.salary,
                months_in_position: 0,
            },
            education: EducationState::default(),
            job_history: Vec::new(),
            assets: Vec::new(),
            debts: if profile.starter_debts {
                starter_debts()
            } else {
                Vec::new()
            },
            achievements: Vec::new(),
            milestones: Milestones::default(),
            next_asset_id: 1,
            pending_rehire_in_months: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death_age.is_some()
    }

    pub fn is_employed(&self) -> bool {
        !self.has_quit_job
    }

    pub fn phase(&self) -> &'static PhaseParams {
        self.economy_phase.params()
    }

    /// Shift the credit score, clamped to the valid range.
    pub fn adjust_credit(&mut self, delta: i32) {
        let next = i32::from(self.credit_score) + delta;
        self.credit_score = next.clamp(i32::from(CREDIT_MIN), i32::from(CREDIT_MAX)) as u16;
    }

    /// Years elapsed since the start age.
    pub fn years_played(&self) -> u32 {
        self.age.saturating_sub(START_AGE)
    }

    pub fn allocate_asset_id(&mut self) -> AssetId {
        let id = self.next_asset_id;
        self.next_asset_id += 1;
        id
    }

    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn count_assets(&self, class: AssetClass) -> usize {
        self.assets.iter().filter(|a| a.class() == class).count()
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    pub fn debt_index(&self, name: &str) -> Option<usize> {
        self.debts.iter().position(|d| d.name == name)
    }

    /// Drop debts that are fully repaid.
    pub fn prune_debts(&mut self) {
        self.debts.retain(|d| d.balance > Decimal::ZERO);
    }
}
