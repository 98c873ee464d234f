#![deny(warnings)]

//! Core domain models and invariants for the wealth-building simulation.
//!
//! This crate holds the static catalog, the serializable game state and the
//! asset sum type, plus [`validate_state`] to check the invariants every tick
//! is expected to preserve.

pub mod asset;
pub mod catalog;
pub mod event;
pub mod money;
pub mod state;

pub use asset::{
    Asset, AssetClass, AssetId, BusinessHolding, Holding, PropertyHolding, SecurityHolding,
};
pub use catalog::{
    DegreeType, EconomyPhase, EducationProgram, EducationReq, JobField, JobPosition, Lifestyle,
    PhaseParams,
};
pub use event::{GameEvent, Severity};
pub use state::{
    Debt, DebtKind, EducationState, GameState, Job, JobRecord, Milestones, SimConfig,
    StartingProfile, CREDIT_MAX, CREDIT_MIN, START_AGE,
};

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation errors for state invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Credit score outside [300, 850].
    #[error("credit score {0} is out of range [300, 850]")]
    CreditOutOfRange(u16),
    /// Player younger than the starting age.
    #[error("age {0} is below the starting age")]
    AgeBelowStart(u32),
    /// Month counter starts at 1.
    #[error("month counter must be >= 1")]
    MonthZero,
    /// A debt carries a negative balance.
    #[error("debt {0} has a negative balance")]
    NegativeDebt(String),
    /// Two assets share an id, or an id was never allocated.
    #[error("asset id {0} is duplicated or unallocated")]
    BadAssetId(u64),
    /// More than one stock or crypto record with the same name.
    #[error("duplicate holding: {0}")]
    DuplicateHolding(String),
    /// A degree program is in progress with no months left, or vice versa.
    #[error("education progress is inconsistent")]
    EducationInconsistent,
    /// The same achievement was recorded twice.
    #[error("achievement recorded twice: {0}")]
    DuplicateAchievement(String),
}

/// Validate the whole game state.
pub fn validate_state(state: &GameState) -> Result<(), ValidationError> {
    if !(CREDIT_MIN..=CREDIT_MAX).contains(&state.credit_score) {
        return Err(ValidationError::CreditOutOfRange(state.credit_score));
    }
    if state.age < START_AGE {
        return Err(ValidationError::AgeBelowStart(state.age));
    }
    if state.month == 0 {
        return Err(ValidationError::MonthZero);
    }
    for d in &state.debts {
        if d.balance < Decimal::ZERO {
            return Err(ValidationError::NegativeDebt(d.name.clone()));
        }
    }

    let mut ids = BTreeSet::new();
    let mut holdings = BTreeSet::new();
    for a in &state.assets {
        if a.id >= state.next_asset_id || !ids.insert(a.id) {
            return Err(ValidationError::BadAssetId(a.id));
        }
        let class = a.class();
        if matches!(class, AssetClass::Stock | AssetClass::Crypto)
            && !holdings.insert((class, a.name.as_str()))
        {
            return Err(ValidationError::DuplicateHolding(a.name.clone()));
        }
    }

    if state.education.in_progress.is_some() != (state.education.months_remaining > 0) {
        return Err(ValidationError::EducationInconsistent);
    }

    let mut seen = BTreeSet::new();
    for id in &state.achievements {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::DuplicateAchievement(id.clone()));
        }
    }
    Ok(())
}
