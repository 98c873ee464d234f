use rust_decimal::Decimal;
use sim_core::AssetId;
use sim_econ::EconError;
use thiserror::Error;

/// Why a player command was rejected. A rejected command never mutates state.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("not enough cash: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
    #[error("requirement not met: {0}")]
    RequirementNotMet(String),
    #[error("amount {requested} is below the minimum of {minimum}")]
    BelowMinimum { minimum: Decimal, requested: Decimal },
    #[error("no asset with id {0}")]
    UnknownAsset(AssetId),
    #[error("no debt named {0:?}")]
    UnknownDebt(String),
    #[error("nothing in the catalog named {0:?}")]
    UnknownCatalogEntry(String),
    #[error("not currently employed")]
    NotEmployed,
    #[error("not enrolled in any program")]
    NotEnrolled,
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Econ(#[from] EconError),
}

impl CommandError {
    pub(crate) fn requirement(reason: impl Into<String>) -> Self {
        CommandError::RequirementNotMet(reason.into())
    }
}

/// Reject the command unless `available` covers `needed`.
pub(crate) fn ensure_funds(needed: Decimal, available: Decimal) -> Result<(), CommandError> {
    if available < needed {
        return Err(CommandError::InsufficientFunds { needed, available });
    }
    Ok(())
}
