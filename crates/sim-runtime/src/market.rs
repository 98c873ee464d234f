//! Buying and selling assets, managing debt and lifestyle.
//!
//! Every command validates first and mutates only once all checks pass, so a
//! rejected command leaves the state exactly as it was.

use crate::error::{ensure_funds, CommandError};
use rust_decimal::Decimal;
use sim_core::catalog::{self, SecurityTemplate};
use sim_core::money::{self, units};
use sim_core::{
    Asset, AssetClass, AssetId, BusinessHolding, Debt, DebtKind, GameEvent, GameState, Holding,
    Lifestyle, PropertyHolding, SecurityHolding, Severity,
};
use sim_econ::{
    current_interest_rate, loan_rate, max_loan_amount, monthly_payment,
    property_offer_net_income, BANK_LOAN_MONTHS, MORTGAGE_MONTHS, MORTGAGE_SPREAD,
};
use tracing::debug;

/// Smallest bank loan on offer.
pub const MIN_BANK_LOAN: i64 = 1000;
/// Credit score needed for a bank loan.
pub const BANK_LOAN_CREDIT: u16 = 650;
/// Credit score needed to refinance.
pub const REFINANCE_CREDIT: u16 = 700;
/// Loans at or below this rate cannot be refinanced further.
pub const REFINANCE_RATE_FLOOR: f64 = 0.04;

fn ensure_iq(state: &GameState, name: &str, iq_req: u32) -> Result<(), CommandError> {
    if state.financial_iq < iq_req {
        return Err(CommandError::requirement(format!(
            "{name} requires financial IQ {iq_req}"
        )));
    }
    Ok(())
}

/// Debt names double as handles, so a second loan of the same kind gets a
/// numeric suffix.
fn unique_debt_name(state: &GameState, base: String) -> String {
    if state.debt_index(&base).is_none() {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base} #{n}");
        if state.debt_index(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}

/// Buy a rental with 20% down; the rest becomes a linked 30-year mortgage.
pub fn buy_property(state: &mut GameState, name: &str) -> Result<Vec<GameEvent>, CommandError> {
    let template =
        catalog::find_property(name).ok_or_else(|| CommandError::UnknownCatalogEntry(name.into()))?;
    ensure_iq(state, template.name, template.iq_req)?;

    let price = money::scale(units(i64::from(template.price)), state.phase().property_mod);
    let down = money::scale(price, 0.2);
    let loan = price - down;
    ensure_funds(down, state.cash)?;
    let rate = current_interest_rate(state) + MORTGAGE_SPREAD;
    let payment = monthly_payment(loan, rate, MORTGAGE_MONTHS)?;
    let projected = property_offer_net_income(state, template)?;
    debug!(property = template.name, %price, %projected, "property offer");

    state.cash -= down;
    let id = state.allocate_asset_id();
    let debt_name = unique_debt_name(state, format!("{} Mortgage", template.name));
    state.assets.push(Asset {
        id,
        name: template.name.to_string(),
        holding: Holding::Property(PropertyHolding {
            value: price,
            purchase_price: price,
            gross_rent: units(i64::from(template.gross_rent)),
            appreciation: template.appreciation,
            maintenance_rate: template.maintenance_rate,
            tax_rate: template.tax_rate,
            insurance_rate: template.insurance_rate,
            vacancy_rate: template.vacancy_rate,
            is_vacant: false,
            vacant_months: 0,
            loan_id: Some(debt_name.clone()),
        }),
    });
    state.debts.push(Debt {
        name: debt_name,
        balance: loan,
        rate,
        payment,
        kind: DebtKind::PropertyLoan,
        is_good_debt: true,
        linked_asset_id: Some(id),
    });
    Ok(vec![GameEvent::new(
        state.month,
        format!(
            "Bought {} for {} down, projected net {}/mo",
            template.name,
            money::format(down),
            money::format(projected)
        ),
        Severity::Positive,
    )])
}

/// Buy a business outright. Opening income reflects the current phase.
pub fn buy_business(state: &mut GameState, name: &str) -> Result<Vec<GameEvent>, CommandError> {
    let template =
        catalog::find_business(name).ok_or_else(|| CommandError::UnknownCatalogEntry(name.into()))?;
    ensure_iq(state, template.name, template.iq_req)?;
    let price = units(i64::from(template.price));
    ensure_funds(price, state.cash)?;

    let base_income = units(i64::from(template.base_income));
    let income = money::scale(base_income, state.phase().business_mod);
    state.cash -= price;
    let id = state.allocate_asset_id();
    state.assets.push(Asset {
        id,
        name: template.name.to_string(),
        holding: Holding::Business(BusinessHolding {
            value: price,
            purchase_price: price,
            income,
            base_income,
            growth: template.growth,
            failure_risk: template.failure_risk,
            failed: false,
            can_expand: false,
            months_owned: 0,
        }),
    });
    Ok(vec![GameEvent::new(
        state.month,
        format!("Bought {} for {}", template.name, money::format(price)),
        Severity::Positive,
    )])
}

fn buy_security(
    state: &mut GameState,
    class: AssetClass,
    template: &SecurityTemplate,
    amount: Decimal,
) -> Result<(), CommandError> {
    ensure_iq(state, template.name, template.iq_req)?;
    let amount = money::whole(amount);
    let minimum = units(i64::from(template.min_buy));
    if amount < minimum {
        return Err(CommandError::BelowMinimum {
            minimum,
            requested: amount,
        });
    }
    ensure_funds(amount, state.cash)?;
    state.cash -= amount;

    let existing = state
        .assets
        .iter_mut()
        .find(|a| a.class() == class && a.name == template.name);
    if let Some(asset) = existing {
        if let Holding::Stock(s) | Holding::Crypto(s) = &mut asset.holding {
            s.value += amount;
            s.cost_basis += amount;
            s.refresh_income();
        }
        return Ok(());
    }

    let mut holding = SecurityHolding {
        value: amount,
        cost_basis: amount,
        income: Decimal::ZERO,
        return_rate: template.return_rate,
        volatility: template.volatility,
        yield_rate: template.yield_rate,
        months_held: 0,
    };
    holding.refresh_income();
    let id = state.allocate_asset_id();
    state.assets.push(Asset {
        id,
        name: template.name.to_string(),
        holding: match class {
            AssetClass::Crypto => Holding::Crypto(holding),
            _ => Holding::Stock(holding),
        },
    });
    Ok(())
}

/// Invest `amount` in a listed stock, adding to an existing position.
pub fn buy_stock(
    state: &mut GameState,
    name: &str,
    amount: Decimal,
) -> Result<Vec<GameEvent>, CommandError> {
    let template =
        catalog::find_stock(name).ok_or_else(|| CommandError::UnknownCatalogEntry(name.into()))?;
    buy_security(state, AssetClass::Stock, template, amount)?;
    Ok(vec![GameEvent::new(
        state.month,
        format!("Invested {} in {}", money::format(amount), template.name),
        Severity::Positive,
    )])
}

/// Buy `amount` of a cryptocurrency, adding to an existing position.
pub fn buy_crypto(
    state: &mut GameState,
    name: &str,
    amount: Decimal,
) -> Result<Vec<GameEvent>, CommandError> {
    let template =
        catalog::find_crypto(name).ok_or_else(|| CommandError::UnknownCatalogEntry(name.into()))?;
    buy_security(state, AssetClass::Crypto, template, amount)?;
    Ok(vec![GameEvent::new(
        state.month,
        format!("Bought {} for {}", template.name, money::format(amount)),
        Severity::Positive,
    )])
}

/// Capital gains tax on a security sale: 25% short term, 15% after a year.
pub fn capital_gains_tax(security: &SecurityHolding) -> Decimal {
    let gain = security.value - security.cost_basis;
    if gain <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let rate = if security.months_held < 12 { 0.25 } else { 0.15 };
    money::scale(gain, rate)
}

/// Net cash a sale of `asset` would raise right now, after fees, taxes and
/// the payoff of any linked mortgage.
pub fn sale_proceeds(state: &GameState, asset: &Asset) -> Decimal {
    let phase = state.phase();
    match &asset.holding {
        Holding::Property(p) => {
            let market = money::scale(p.value, phase.property_mod);
            let fees = money::scale(market, 0.06);
            let payoff: Decimal = state
                .debts
                .iter()
                .filter(|d| d.linked_asset_id == Some(asset.id))
                .map(|d| d.balance)
                .sum();
            market - fees - payoff
        }
        Holding::Business(b) if b.failed => money::scale(b.value, 0.2),
        Holding::Business(b) => {
            let price = money::scale(b.value, phase.business_mod);
            price - money::scale(price, 0.05)
        }
        Holding::Stock(s) | Holding::Crypto(s) => s.value - capital_gains_tax(s),
    }
}

/// Sell an asset and book the proceeds. A property's mortgage is settled
/// from the sale.
pub fn sell_asset(state: &mut GameState, id: AssetId) -> Result<Vec<GameEvent>, CommandError> {
    let index = state
        .assets
        .iter()
        .position(|a| a.id == id)
        .ok_or(CommandError::UnknownAsset(id))?;
    let proceeds = sale_proceeds(state, &state.assets[index]);
    let asset = state.assets.remove(index);
    state.debts.retain(|d| d.linked_asset_id != Some(id));
    state.cash += proceeds;

    let severity = match &asset.holding {
        Holding::Stock(s) | Holding::Crypto(s) if s.value < s.cost_basis => Severity::Negative,
        Holding::Stock(_) | Holding::Crypto(_) => Severity::Positive,
        _ => Severity::Gold,
    };
    let suffix = if asset.class() == AssetClass::Property { " net" } else { "" };
    debug!(asset = %asset.name, proceeds = %proceeds, "asset sold");
    Ok(vec![GameEvent::new(
        state.month,
        format!("Sold {} for {}{suffix}", asset.name, money::format(proceeds)),
        severity,
    )])
}

/// Pay down a debt. Payments beyond the balance are capped; clearing a debt
/// removes it and lifts the credit score by 15.
pub fn pay_debt(
    state: &mut GameState,
    name: &str,
    amount: Decimal,
) -> Result<Vec<GameEvent>, CommandError> {
    let index = state
        .debt_index(name)
        .ok_or_else(|| CommandError::UnknownDebt(name.into()))?;
    let requested = money::whole(amount);
    if requested <= Decimal::ZERO {
        return Err(CommandError::BelowMinimum {
            minimum: Decimal::ONE,
            requested,
        });
    }
    let payment = requested.min(state.debts[index].balance);
    ensure_funds(payment, state.cash)?;

    state.cash -= payment;
    state.debts[index].balance -= payment;
    if state.debts[index].balance <= Decimal::ZERO {
        state.debts.remove(index);
        state.adjust_credit(15);
        return Ok(vec![GameEvent::new(
            state.month,
            format!("Paid off {name}!"),
            Severity::Positive,
        )]);
    }
    Ok(vec![GameEvent::new(
        state.month,
        format!("Paid {} on {name}", money::format(payment)),
        Severity::Gold,
    )])
}

/// Cut a debt's rate by 1.5 points and its payment by 10%.
pub fn refinance_debt(state: &mut GameState, name: &str) -> Result<Vec<GameEvent>, CommandError> {
    let index = state
        .debt_index(name)
        .ok_or_else(|| CommandError::UnknownDebt(name.into()))?;
    if state.credit_score < REFINANCE_CREDIT {
        return Err(CommandError::requirement(format!(
            "refinancing needs a credit score of {REFINANCE_CREDIT}"
        )));
    }
    let debt = &mut state.debts[index];
    if debt.rate <= REFINANCE_RATE_FLOOR {
        return Err(CommandError::requirement(format!(
            "{name} is already at {:.1}%",
            debt.rate * 100.0
        )));
    }
    debt.rate -= 0.015;
    debt.payment = money::scale(debt.payment, 0.9);
    let text = format!("Refinanced {name} to {:.1}%", debt.rate * 100.0);
    Ok(vec![GameEvent::new(state.month, text, Severity::Gold)])
}

/// Borrow cash over five years at a rate set by credit score.
pub fn take_bank_loan(
    state: &mut GameState,
    amount: Decimal,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.credit_score < BANK_LOAN_CREDIT {
        return Err(CommandError::requirement(format!(
            "bank loans need a credit score of {BANK_LOAN_CREDIT}"
        )));
    }
    let amount = money::whole(amount);
    let minimum = units(MIN_BANK_LOAN);
    if amount < minimum {
        return Err(CommandError::BelowMinimum {
            minimum,
            requested: amount,
        });
    }
    let maximum = max_loan_amount(state);
    if amount > maximum {
        return Err(CommandError::requirement(format!(
            "maximum loan is {}",
            money::format(maximum)
        )));
    }
    let rate = loan_rate(state.credit_score);
    let payment = monthly_payment(amount, rate, BANK_LOAN_MONTHS)?;

    state.cash += amount;
    let name = unique_debt_name(state, "Bank Loan".to_string());
    state.debts.push(Debt {
        name,
        balance: amount,
        rate,
        payment,
        kind: DebtKind::Bank,
        is_good_debt: false,
        linked_asset_id: None,
    });
    state.adjust_credit(-5);
    Ok(vec![GameEvent::new(
        state.month,
        format!(
            "Took {} bank loan at {:.1}%",
            money::format(amount),
            rate * 100.0
        ),
        Severity::Gold,
    )])
}

/// Switch spending tier. Expenses scale 2% per year of age; salary follows
/// the tier's multiplier while employed.
pub fn change_lifestyle(
    state: &mut GameState,
    lifestyle: Lifestyle,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.lifestyle == lifestyle {
        return Ok(Vec::new());
    }
    let params = lifestyle.params();
    state.lifestyle = lifestyle;
    let age_factor = 1.0 + 0.02 * f64::from(state.years_played());
    state.living_expenses = money::scale(units(i64::from(params.expenses)), age_factor);
    if state.is_employed() {
        state.salary = money::scale(state.base_salary, params.salary_mod);
    }
    Ok(vec![GameEvent::new(
        state.month,
        format!("Changed to {} lifestyle", lifestyle.label()),
        Severity::Gold,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{EconomyPhase, StartingProfile};

    fn funded(cash: i64) -> GameState {
        let mut state = GameState::new(&StartingProfile {
            starter_debts: false,
            ..StartingProfile::default()
        });
        state.cash = units(cash);
        state.financial_iq = 100;
        state
    }

    #[test]
    fn property_purchase_books_linked_mortgage() {
        let mut state = funded(50_000);
        let offer = catalog::find_property("Small Rental").unwrap();
        let projected = property_offer_net_income(&state, offer).unwrap();
        let events = buy_property(&mut state, "Small Rental").unwrap();
        assert!(events[0]
            .text
            .ends_with(&format!("projected net {}/mo", money::format(projected))));
        // Expansion: 80000 * 1.1 = 88000, 20% down
        assert_eq!(state.cash, units(50_000 - 17_600));
        let asset = &state.assets[0];
        assert_eq!(asset.current_value(), units(88_000));
        let debt = &state.debts[0];
        assert_eq!(debt.name, "Small Rental Mortgage");
        assert_eq!(debt.balance, units(70_400));
        assert_eq!(debt.linked_asset_id, Some(asset.id));
        assert!(debt.is_good_debt);
        assert!((debt.rate - 0.055).abs() < 1e-12);
        assert_eq!(asset.as_property().unwrap().loan_id.as_deref(), Some("Small Rental Mortgage"));

        buy_property(&mut state, "Small Rental").unwrap();
        assert_eq!(state.debts[1].name, "Small Rental Mortgage #2");
    }

    #[test]
    fn rejected_purchases_leave_state_untouched() {
        let mut state = funded(1000);
        let before = state.clone();
        assert!(matches!(
            buy_property(&mut state, "Duplex"),
            Err(CommandError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            buy_business(&mut state, "Gold Mine"),
            Err(CommandError::UnknownCatalogEntry(_))
        ));
        assert_eq!(
            buy_stock(&mut state, "Tesla (TSLA)", units(500)),
            Err(CommandError::BelowMinimum {
                minimum: units(1000),
                requested: units(500)
            })
        );
        state.financial_iq = 0;
        assert!(matches!(
            buy_stock(&mut state, "NVIDIA (NVDA)", units(1000)),
            Err(CommandError::RequirementNotMet(_))
        ));
        state.financial_iq = before.financial_iq;
        assert_eq!(state, before);
    }

    #[test]
    fn repeated_security_buys_merge() {
        let mut state = funded(10_000);
        buy_stock(&mut state, "Coca-Cola (KO)", units(1000)).unwrap();
        buy_stock(&mut state, "Coca-Cola (KO)", units(2000)).unwrap();
        buy_crypto(&mut state, "Ethereum (ETH)", units(400)).unwrap();
        buy_crypto(&mut state, "Ethereum (ETH)", units(800)).unwrap();
        assert_eq!(state.assets.len(), 2);
        let Holding::Stock(ko) = &state.assets[0].holding else {
            panic!("expected stock");
        };
        assert_eq!(ko.value, units(3000));
        assert_eq!(ko.cost_basis, units(3000));
        // 3000 * 0.031 / 12 = 7.75
        assert_eq!(ko.income, units(8));
        assert_eq!(state.assets[1].class(), AssetClass::Crypto);
        assert_eq!(state.assets[1].current_value(), units(1200));
        assert_eq!(state.cash, units(10_000 - 4200));
    }

    #[test]
    fn business_income_follows_phase() {
        let mut state = funded(20_000);
        state.economy_phase = EconomyPhase::Recession;
        buy_business(&mut state, "Vending Route").unwrap();
        let b = state.assets[0].as_business().unwrap();
        assert_eq!(b.income, units(200));
        assert_eq!(b.value, units(15_000));
        assert_eq!(state.cash, units(5000));
    }

    #[test]
    fn selling_property_settles_mortgage() {
        let mut state = funded(50_000);
        buy_property(&mut state, "Small Rental").unwrap();
        let id = state.assets[0].id;
        sell_asset(&mut state, id).unwrap();
        // market 88000 * 1.1 = 96800, fees 5808, payoff 70400
        assert_eq!(state.cash, units(32_400 + 96_800 - 5808 - 70_400));
        assert!(state.assets.is_empty());
        assert!(state.debts.is_empty());
    }

    #[test]
    fn selling_unknown_asset_is_rejected() {
        let mut state = funded(0);
        let before = state.clone();
        assert_eq!(sell_asset(&mut state, 42), Err(CommandError::UnknownAsset(42)));
        assert_eq!(state, before);
    }

    #[test]
    fn securities_pay_gains_tax_by_holding_period() {
        let mut s = SecurityHolding {
            value: units(3000),
            cost_basis: units(2000),
            income: Decimal::ZERO,
            return_rate: 0.1,
            volatility: 0.2,
            yield_rate: 0.0,
            months_held: 3,
        };
        assert_eq!(capital_gains_tax(&s), units(250));
        s.months_held = 12;
        assert_eq!(capital_gains_tax(&s), units(150));
        s.value = units(1000);
        assert_eq!(capital_gains_tax(&s), Decimal::ZERO);
    }

    #[test]
    fn failed_business_sells_for_salvage() {
        let mut state = funded(20_000);
        buy_business(&mut state, "Vending Route").unwrap();
        if let Holding::Business(b) = &mut state.assets[0].holding {
            b.failed = true;
            b.value = units(4500);
        }
        let id = state.assets[0].id;
        sell_asset(&mut state, id).unwrap();
        assert_eq!(state.cash, units(5000 + 900));
    }

    #[test]
    fn paying_debt_caps_at_balance() {
        let mut state = GameState::default();
        state.cash = units(20_000);
        let events = pay_debt(&mut state, "Credit Card", units(10_000)).unwrap();
        assert_eq!(events[0].text, "Paid off Credit Card!");
        assert_eq!(state.cash, units(12_000));
        assert_eq!(state.credit_score, 695);
        assert!(state.debt_index("Credit Card").is_none());

        pay_debt(&mut state, "Car Loan", units(1000)).unwrap();
        assert_eq!(state.debts[1].balance, units(14_000));
        assert_eq!(
            pay_debt(&mut state, "Student Loan", units(1)),
            Err(CommandError::UnknownDebt("Student Loan".into()))
        );
        assert!(matches!(
            pay_debt(&mut state, "Mortgage", units(100_000)),
            Err(CommandError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn refinance_needs_good_credit_and_high_rate() {
        let mut state = GameState::default();
        assert!(refinance_debt(&mut state, "Credit Card").is_err());
        state.credit_score = 720;
        refinance_debt(&mut state, "Credit Card").unwrap();
        let card = &state.debts[2];
        assert!((card.rate - 0.184).abs() < 1e-9);
        assert_eq!(card.payment, units(180));
        // 4.5% -> 3.0%, then no further
        refinance_debt(&mut state, "Mortgage").unwrap();
        assert!(refinance_debt(&mut state, "Mortgage").is_err());
    }

    #[test]
    fn bank_loan_limits() {
        let mut state = GameState::default();
        state.credit_score = 700;
        assert!(matches!(
            take_bank_loan(&mut state, units(500)),
            Err(CommandError::BelowMinimum { .. })
        ));
        assert!(matches!(
            take_bank_loan(&mut state, units(18_001)),
            Err(CommandError::RequirementNotMet(_))
        ));
        take_bank_loan(&mut state, units(10_000)).unwrap();
        let loan = state.debts.last().unwrap();
        assert_eq!(loan.name, "Bank Loan");
        assert_eq!(loan.kind, DebtKind::Bank);
        assert!((loan.rate - 0.09).abs() < 1e-12);
        // 10000 at 9% over 60 months
        assert_eq!(loan.payment, units(208));
        assert_eq!(state.cash, units(12_000));
        assert_eq!(state.credit_score, 695);

        state.credit_score = 600;
        assert!(matches!(
            take_bank_loan(&mut state, units(5000)),
            Err(CommandError::RequirementNotMet(_))
        ));
    }

    #[test]
    fn lifestyle_change_rescales_expenses_and_salary() {
        let mut state = GameState::default();
        state.age = 28;
        change_lifestyle(&mut state, Lifestyle::Luxury).unwrap();
        // 3500 * 1.2
        assert_eq!(state.living_expenses, units(4200));
        assert_eq!(state.salary, units(4800));
        assert!(change_lifestyle(&mut state, Lifestyle::Luxury).unwrap().is_empty());

        state.has_quit_job = true;
        state.salary = Decimal::ZERO;
        change_lifestyle(&mut state, Lifestyle::Frugal).unwrap();
        assert_eq!(state.salary, Decimal::ZERO);
    }
}
