//! Owned assets as a tagged sum type.

use crate::catalog::PhaseParams;
use crate::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier handed out from `GameState::next_asset_id`.
pub type AssetId = u64;

/// Asset class, used for diversification and per-class lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Property,
    Business,
    Stock,
    Crypto,
}

/// A rental property, usually financed by a linked mortgage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyHolding {
    pub value: Decimal,
    pub purchase_price: Decimal,
    pub gross_rent: Decimal,
    pub appreciation: f64,
    pub maintenance_rate: f64,
    pub tax_rate: f64,
    pub insurance_rate: f64,
    pub vacancy_rate: f64,
    pub is_vacant: bool,
    pub vacant_months: u32,
    /// Name of the mortgage taken out at purchase, if any.
    pub loan_id: Option<String>,
}

impl PropertyHolding {
    /// Monthly rent net of operating costs; zero while vacant.
    pub fn net_income(&self, phase: &PhaseParams) -> Decimal {
        if self.is_vacant {
            return Decimal::ZERO;
        }
        let rent = money::to_f64(self.gross_rent) * phase.rent_mod;
        let rates = self.maintenance_rate + self.tax_rate + self.insurance_rate;
        let costs = money::to_f64(self.value) * rates / 12.0;
        money::from_f64(rent - costs)
    }
}

/// An operating business. `failed` is terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessHolding {
    pub value: Decimal,
    pub purchase_price: Decimal,
    pub income: Decimal,
    pub base_income: Decimal,
    pub growth: f64,
    pub failure_risk: f64,
    pub failed: bool,
    pub can_expand: bool,
    pub months_owned: u32,
}

/// A stock or crypto position. Stocks pay dividends, crypto pays staking
/// rewards; both land in `income`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecurityHolding {
    pub value: Decimal,
    pub cost_basis: Decimal,
    pub income: Decimal,
    pub return_rate: f64,
    pub volatility: f64,
    pub yield_rate: f64,
    pub months_held: u32,
}

impl SecurityHolding {
    /// Recompute the monthly payout from the current value.
    pub fn refresh_income(&mut self) {
        self.income = if self.yield_rate > 0.0 {
            money::scale(self.value, self.yield_rate / 12.0)
        } else {
            Decimal::ZERO
        };
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Holding {
    Property(PropertyHolding),
    Business(BusinessHolding),
    Stock(SecurityHolding),
    Crypto(SecurityHolding),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub holding: Holding,
}

impl Asset {
    pub fn class(&self) -> AssetClass {
        match self.holding {
            Holding::Property(_) => AssetClass::Property,
            Holding::Business(_) => AssetClass::Business,
            Holding::Stock(_) => AssetClass::Stock,
            Holding::Crypto(_) => AssetClass::Crypto,
        }
    }

    pub fn current_value(&self) -> Decimal {
        match &self.holding {
            Holding::Property(p) => p.value,
            Holding::Business(b) => b.value,
            Holding::Stock(s) | Holding::Crypto(s) => s.value,
        }
    }

    /// Monthly income this asset contributes to passive income.
    ///
    /// Businesses earn 10% more when the owner works on them full time.
    pub fn monthly_income(&self, phase: &PhaseParams, self_employed: bool) -> Decimal {
        match &self.holding {
            Holding::Property(p) => p.net_income(phase),
            Holding::Business(b) if b.failed => Decimal::ZERO,
            Holding::Business(b) if self_employed => b.income * Decimal::new(11, 1),
            Holding::Business(b) => b.income,
            Holding::Stock(s) | Holding::Crypto(s) => s.income,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyHolding> {
        match &self.holding {
            Holding::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_business(&self) -> Option<&BusinessHolding> {
        match &self.holding {
            Holding::Business(b) => Some(b),
            _ => None,
        }
    }
}
