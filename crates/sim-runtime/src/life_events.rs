//! Random life events rolled once per month.
//!
//! Four independent categories: minor (20%), major (5%), property (8%, only
//! with an occupied rental) and business (6%, only with a running business).
//! Several categories can fire in the same month.

use crate::{chance, pick};
use rand::Rng;
use rust_decimal::Decimal;
use sim_core::money::{self, units};
use sim_core::{GameEvent, GameState, Holding, Severity};

pub const MINOR_CHANCE: f64 = 0.2;
pub const MAJOR_CHANCE: f64 = 0.05;
pub const PROPERTY_CHANCE: f64 = 0.08;
pub const BUSINESS_CHANCE: f64 = 0.06;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinorEvent {
    WorkBonus,
    CarRepair,
    TaxRefund,
    CreditBump,
    UnexpectedExpense,
    SideGig,
}

impl MinorEvent {
    pub const ALL: [MinorEvent; 6] = [
        MinorEvent::WorkBonus,
        MinorEvent::CarRepair,
        MinorEvent::TaxRefund,
        MinorEvent::CreditBump,
        MinorEvent::UnexpectedExpense,
        MinorEvent::SideGig,
    ];

    pub fn apply(self, state: &mut GameState) -> GameEvent {
        let (text, severity) = match self {
            MinorEvent::WorkBonus if state.is_employed() => {
                state.cash += units(2000);
                ("Bonus at work! +$2,000 bonus!", Severity::Positive)
            }
            MinorEvent::WorkBonus => (
                "Bonus at work! No job bonus (self-employed)",
                Severity::Positive,
            ),
            MinorEvent::CarRepair => {
                state.cash -= units(800);
                ("Car repair needed. -$800 car repair", Severity::Negative)
            }
            MinorEvent::TaxRefund => {
                state.cash += units(1200);
                ("Tax refund! +$1,200 tax refund!", Severity::Positive)
            }
            MinorEvent::CreditBump => {
                state.adjust_credit(20);
                ("Credit score improved. +20 credit score!", Severity::Gold)
            }
            MinorEvent::UnexpectedExpense => {
                state.cash -= units(500);
                ("Unexpected expense. -$500 misc expense", Severity::Negative)
            }
            MinorEvent::SideGig => {
                state.cash += units(800);
                ("Side gig income! +$800 side income!", Severity::Positive)
            }
        };
        GameEvent::new(state.month, text, severity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorEvent {
    MedicalEmergency,
    Inheritance,
    MarketCorrection,
    MarketRally,
}

impl MajorEvent {
    pub const ALL: [MajorEvent; 4] = [
        MajorEvent::MedicalEmergency,
        MajorEvent::Inheritance,
        MajorEvent::MarketCorrection,
        MajorEvent::MarketRally,
    ];

    pub fn apply(self, state: &mut GameState) -> GameEvent {
        let (text, severity) = match self {
            MajorEvent::MedicalEmergency => {
                state.cash -= units(3000);
                ("Medical emergency! -$3,000 medical bills", Severity::Negative)
            }
            MajorEvent::Inheritance => {
                state.cash += units(5000);
                ("Small inheritance. +$5,000 inheritance!", Severity::Positive)
            }
            MajorEvent::MarketCorrection => {
                shock_stocks(state, 0.85);
                ("Market correction. Stocks down 15%!", Severity::Negative)
            }
            MajorEvent::MarketRally => {
                shock_stocks(state, 1.12);
                ("Market rally! Stocks up 12%!", Severity::Positive)
            }
        };
        GameEvent::new(state.month, text, severity)
    }
}

/// Scale every stock position. Crypto is unaffected.
fn shock_stocks(state: &mut GameState, factor: f64) {
    for asset in state.assets.iter_mut() {
        if let Holding::Stock(s) = &mut asset.holding {
            s.value = money::scale(s.value, factor);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyEvent {
    MajorRepair,
    Vacancy,
    AreaImprovement,
    ProblemTenant,
}

impl PropertyEvent {
    pub const ALL: [PropertyEvent; 4] = [
        PropertyEvent::MajorRepair,
        PropertyEvent::Vacancy,
        PropertyEvent::AreaImprovement,
        PropertyEvent::ProblemTenant,
    ];

    /// Apply to the property at `index` in `state.assets`.
    pub fn apply(self, state: &mut GameState, index: usize) -> Option<GameEvent> {
        let month = state.month;
        let asset = state.assets.get_mut(index)?;
        let name = asset.name.clone();
        let Holding::Property(p) = &mut asset.holding else {
            return None;
        };
        let mut cost = Decimal::ZERO;
        let (text, severity) = match self {
            PropertyEvent::MajorRepair => {
                cost = money::scale(p.value, 0.02);
                (
                    format!("Major repair needed! {} repair on {name}", money::format(-cost)),
                    Severity::Negative,
                )
            }
            PropertyEvent::Vacancy => {
                p.is_vacant = true;
                p.vacant_months = 3;
                (format!("{name} is now vacant for 3 months"), Severity::Negative)
            }
            PropertyEvent::AreaImprovement => {
                p.value = money::scale(p.value, 1.08);
                (format!("Area improvement! {name} value up 8%!"), Severity::Positive)
            }
            PropertyEvent::ProblemTenant => {
                cost = units(1000);
                (
                    format!("Problem tenant. -$1,000 tenant issue on {name}"),
                    Severity::Negative,
                )
            }
        };
        state.cash -= cost;
        Some(GameEvent::new(month, text, severity))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusinessEvent {
    Competition,
    ViralSuccess,
    EquipmentFailure,
    ExpansionOpportunity,
}

impl BusinessEvent {
    pub const ALL: [BusinessEvent; 4] = [
        BusinessEvent::Competition,
        BusinessEvent::ViralSuccess,
        BusinessEvent::EquipmentFailure,
        BusinessEvent::ExpansionOpportunity,
    ];

    /// Apply to the business at `index` in `state.assets`.
    pub fn apply(self, state: &mut GameState, index: usize) -> Option<GameEvent> {
        let month = state.month;
        let asset = state.assets.get_mut(index)?;
        let name = asset.name.clone();
        let Holding::Business(b) = &mut asset.holding else {
            return None;
        };
        let mut cost = Decimal::ZERO;
        let (text, severity) = match self {
            BusinessEvent::Competition => {
                b.income = money::scale(b.income, 0.85);
                (
                    format!("Competition entered market. {name} income reduced by competition"),
                    Severity::Negative,
                )
            }
            BusinessEvent::ViralSuccess => {
                b.income = money::scale(b.income, 1.25);
                (format!("Viral success! {name} income up 25%!"), Severity::Positive)
            }
            BusinessEvent::EquipmentFailure => {
                cost = money::scale(b.value, 0.1);
                (
                    format!(
                        "Equipment failure at {name}. {} equipment repair",
                        money::format(-cost)
                    ),
                    Severity::Negative,
                )
            }
            BusinessEvent::ExpansionOpportunity => {
                b.can_expand = true;
                (format!("Expansion opportunity! {name} can be expanded!"), Severity::Gold)
            }
        };
        state.cash -= cost;
        Some(GameEvent::new(month, text, severity))
    }
}

/// Roll all four categories once.
pub fn roll_life_events(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if chance(rng, MINOR_CHANCE) {
        let event = MinorEvent::ALL[pick(rng, MinorEvent::ALL.len())];
        events.push(event.apply(state));
    }

    if chance(rng, MAJOR_CHANCE) {
        let event = MajorEvent::ALL[pick(rng, MajorEvent::ALL.len())];
        events.push(event.apply(state));
    }

    let rentals: Vec<usize> = state
        .assets
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_property().is_some_and(|p| !p.is_vacant))
        .map(|(i, _)| i)
        .collect();
    if !rentals.is_empty() && chance(rng, PROPERTY_CHANCE) {
        let index = rentals[pick(rng, rentals.len())];
        let event = PropertyEvent::ALL[pick(rng, PropertyEvent::ALL.len())];
        events.extend(event.apply(state, index));
    }

    let running: Vec<usize> = state
        .assets
        .iter()
        .enumerate()
        .filter(|(_, a)| a.as_business().is_some_and(|b| !b.failed))
        .map(|(i, _)| i)
        .collect();
    if !running.is_empty() && chance(rng, BUSINESS_CHANCE) {
        let index = running[pick(rng, running.len())];
        let event = BusinessEvent::ALL[pick(rng, BusinessEvent::ALL.len())];
        events.extend(event.apply(state, index));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use sim_core::{Asset, BusinessHolding, PropertyHolding, SecurityHolding};

    fn with_rental_and_business() -> GameState {
        let mut state = GameState::default();
        state.assets.push(Asset {
            id: 1,
            name: "Duplex".into(),
            holding: Holding::Property(PropertyHolding {
                value: units(150_000),
                purchase_price: units(150_000),
                gross_rent: units(1600),
                appreciation: 0.035,
                maintenance_rate: 0.008,
                tax_rate: 0.01,
                insurance_rate: 0.004,
                vacancy_rate: 0.07,
                is_vacant: false,
                vacant_months: 0,
                loan_id: None,
            }),
        });
        state.assets.push(Asset {
            id: 2,
            name: "Food Truck".into(),
            holding: Holding::Business(BusinessHolding {
                value: units(25_000),
                purchase_price: units(25_000),
                income: units(600),
                base_income: units(600),
                growth: 0.04,
                failure_risk: 0.12,
                failed: false,
                can_expand: false,
                months_owned: 0,
            }),
        });
        state.next_asset_id = 3;
        state
    }

    #[test]
    fn every_category_fires_on_zero_rolls() {
        let mut state = with_rental_and_business();
        let events = roll_life_events(&mut state, &mut StepRng::new(0, 0));
        assert_eq!(events.len(), 4);
        // bonus +2000, medical -3000, repair 2% of 150000, competition on the truck
        assert_eq!(state.cash, units(2000 + 2000 - 3000 - 3000));
        assert_eq!(state.assets[1].as_business().unwrap().income, units(510));
    }

    #[test]
    fn nothing_fires_on_high_rolls() {
        let mut state = with_rental_and_business();
        let before = state.clone();
        assert!(roll_life_events(&mut state, &mut StepRng::new(u64::MAX, 0)).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn property_events_skip_vacant_rentals() {
        let mut state = with_rental_and_business();
        state.assets.truncate(1);
        if let Holding::Property(p) = &mut state.assets[0].holding {
            p.is_vacant = true;
            p.vacant_months = 2;
        }
        let events = roll_life_events(&mut state, &mut StepRng::new(0, 0));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn unemployed_players_get_no_bonus() {
        let mut state = GameState::default();
        state.has_quit_job = true;
        let event = MinorEvent::WorkBonus.apply(&mut state);
        assert_eq!(state.cash, units(2000));
        assert!(event.text.contains("self-employed"));
    }

    #[test]
    fn market_shocks_only_touch_stocks() {
        let mut state = GameState::default();
        let holding = SecurityHolding {
            value: units(10_000),
            cost_basis: units(10_000),
            income: Decimal::ZERO,
            return_rate: 0.1,
            volatility: 0.2,
            yield_rate: 0.0,
            months_held: 0,
        };
        state.assets.push(Asset {
            id: 1,
            name: "Visa (V)".into(),
            holding: Holding::Stock(holding.clone()),
        });
        state.assets.push(Asset {
            id: 2,
            name: "Bitcoin (BTC)".into(),
            holding: Holding::Crypto(holding),
        });
        state.next_asset_id = 3;
        MajorEvent::MarketCorrection.apply(&mut state);
        assert_eq!(state.assets[0].current_value(), units(8500));
        assert_eq!(state.assets[1].current_value(), units(10_000));
        MajorEvent::MarketRally.apply(&mut state);
        assert_eq!(state.assets[0].current_value(), units(9520));
    }

    #[test]
    fn credit_bump_is_clamped() {
        let mut state = GameState::default();
        state.credit_score = 845;
        MinorEvent::CreditBump.apply(&mut state);
        assert_eq!(state.credit_score, 850);
    }
}
