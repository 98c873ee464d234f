//! Win conditions and achievements, evaluated at the end of every month.

use rust_decimal::Decimal;
use sim_core::money::units;
use sim_core::{AssetClass, EconomyPhase, GameEvent, GameState, Severity};
use sim_econ::{net_worth, passive_income, total_expenses};
use std::collections::BTreeSet;
use tracing::info;

pub const MILLIONAIRE: i64 = 1_000_000;
pub const GENERATIONAL_WEALTH: i64 = 10_000_000;

/// Medal for reaching a goal `years` after turning 18.
pub fn rating(years: u32) -> &'static str {
    match years {
        0..=10 => "GOLD",
        11..=20 => "SILVER",
        21..=30 => "BRONZE",
        _ => "COMPLETE",
    }
}

/// Medal for escaping the rat race. There is no "complete" tier here.
pub fn escape_rating(years: u32) -> &'static str {
    match years {
        0..=10 => "GOLD",
        11..=20 => "SILVER",
        _ => "BRONZE",
    }
}

/// Set any milestone flags reached this month. Each fires exactly once.
pub fn check_win_conditions(state: &mut GameState) -> Vec<GameEvent> {
    let passive = passive_income(state);
    let expenses = total_expenses(state);
    let worth = net_worth(state);
    let years = state.years_played();
    let month = state.month;
    let wealthy_and_free =
        |s: &GameState| s.milestones.millionaire && s.milestones.financial_independence;
    let was_wealthy_and_free = wealthy_and_free(state);
    let mut events = Vec::new();

    if !state.milestones.rat_race_escaped && passive >= expenses {
        state.milestones.rat_race_escaped = true;
        state.escaped_rat_race = true;
        info!(month, years, "escaped the rat race");
        events.push(GameEvent::new(
            month,
            format!("ESCAPED THE RAT RACE in {years} years! {}", escape_rating(years)),
            Severity::Gold,
        ));
    }

    if !state.milestones.financial_independence && passive >= expenses * Decimal::TWO {
        state.milestones.financial_independence = true;
        state.financially_independent = true;
        info!(month, "financial independence");
        events.push(GameEvent::new(month, "Achieved Financial Independence!", Severity::Gold));
    }

    if !state.milestones.millionaire && worth >= units(MILLIONAIRE) {
        state.milestones.millionaire = true;
        state.is_millionaire = true;
        info!(month, "millionaire");
        events.push(GameEvent::new(month, "Became a MILLIONAIRE!", Severity::Gold));
    }

    if !state.milestones.generational_wealth && worth >= units(GENERATIONAL_WEALTH) {
        state.milestones.generational_wealth = true;
        info!(month, "generational wealth");
        events.push(GameEvent::new(
            month,
            format!("Generational Wealth! $10M+ net worth. {}", rating(years)),
            Severity::Gold,
        ));
    }

    if !was_wealthy_and_free && wealthy_and_free(state) {
        events.push(GameEvent::new(
            month,
            format!(
                "Wealthy & Free! Millionaire with passive income covering 2x expenses. {}",
                rating(years)
            ),
            Severity::Gold,
        ));
    }
    events
}

/// Achievement ids and their announcement titles, in evaluation order.
pub const ACHIEVEMENTS: [(&str, &str); 22] = [
    ("first_property", "First Property!"),
    ("first_business", "First Business!"),
    ("first_stock", "First Investment!"),
    ("first_crypto", "First Crypto!"),
    ("debt_free", "Bad Debt Free!"),
    ("all_debt_free", "Completely Debt Free!"),
    ("high_credit", "Excellent Credit!"),
    ("perfect_credit", "Perfect Credit!"),
    ("iq_50", "Financial Expert!"),
    ("iq_100", "Financial Genius!"),
    ("diversified", "Diversified Portfolio!"),
    ("self_employed", "Full-Time Entrepreneur!"),
    ("recession_survivor", "Recession Survivor!"),
    ("real_estate_mogul", "Real Estate Mogul!"),
    ("business_empire", "Business Empire!"),
    ("first_job", "Got Your First Job!"),
    ("bachelors_degree", "Bachelor's Degree!"),
    ("masters_degree", "Master's Degree!"),
    ("first_promotion", "First Promotion!"),
    ("manager_level", "Manager Level!"),
    ("executive_level", "Executive Level!"),
    ("c_level", "C-Level Executive!"),
];

fn running_businesses(state: &GameState) -> usize {
    state
        .assets
        .iter()
        .filter_map(|a| a.as_business())
        .filter(|b| !b.failed)
        .count()
}

/// Whether the condition behind achievement `id` currently holds.
pub fn is_earned(id: &str, state: &GameState) -> bool {
    let employed = state.is_employed();
    let level = state.current_job.level;
    match id {
        "first_property" => state.count_assets(AssetClass::Property) > 0,
        "first_business" => state.count_assets(AssetClass::Business) > 0,
        "first_stock" => state.count_assets(AssetClass::Stock) > 0,
        "first_crypto" => state.count_assets(AssetClass::Crypto) > 0,
        "debt_free" => state.debts.iter().all(|d| d.is_good_debt),
        "all_debt_free" => state.debts.is_empty(),
        "high_credit" => state.credit_score >= 750,
        "perfect_credit" => state.credit_score >= 800,
        "iq_50" => state.financial_iq >= 50,
        "iq_100" => state.financial_iq >= 100,
        "diversified" => {
            let classes: BTreeSet<AssetClass> = state.assets.iter().map(|a| a.class()).collect();
            classes.len() >= 3
        }
        "self_employed" => state.has_quit_job && state.escaped_rat_race,
        "recession_survivor" => {
            state.economy_phase == EconomyPhase::Recovery && !state.assets.is_empty()
        }
        "real_estate_mogul" => state.count_assets(AssetClass::Property) >= 5,
        "business_empire" => running_businesses(state) >= 3,
        "first_job" => employed && state.current_job.months_in_position > 0,
        "bachelors_degree" => state.education.has_bachelors,
        "masters_degree" => state.education.has_masters,
        "first_promotion" => !state.job_history.is_empty() || (employed && level > 0),
        "manager_level" => employed && level >= 4,
        "executive_level" => employed && level >= 6,
        "c_level" => employed && level >= 7,
        _ => false,
    }
}

/// Award every achievement whose condition now holds. Awards are permanent.
pub fn check_achievements(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for (id, title) in ACHIEVEMENTS {
        if state.has_achievement(id) || !is_earned(id, state) {
            continue;
        }
        state.achievements.push(id.to_string());
        events.push(GameEvent::new(
            state.month,
            format!("Achievement: {title}"),
            Severity::Gold,
        ));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Asset, BusinessHolding, Holding, StartingProfile};

    fn debt_free() -> GameState {
        GameState::new(&StartingProfile {
            starter_debts: false,
            ..StartingProfile::default()
        })
    }

    fn business(id: u64, income: i64) -> Asset {
        Asset {
            id,
            name: "Laundromat".into(),
            holding: Holding::Business(BusinessHolding {
                value: units(100_000),
                purchase_price: units(100_000),
                income: units(income),
                base_income: units(income),
                growth: 0.03,
                failure_risk: 0.0,
                failed: false,
                can_expand: false,
                months_owned: 0,
            }),
        }
    }

    #[test]
    fn ratings_by_years() {
        assert_eq!(rating(0), "GOLD");
        assert_eq!(rating(10), "GOLD");
        assert_eq!(rating(11), "SILVER");
        assert_eq!(rating(30), "BRONZE");
        assert_eq!(rating(31), "COMPLETE");
        assert_eq!(escape_rating(20), "SILVER");
        assert_eq!(escape_rating(31), "BRONZE");
    }

    #[test]
    fn rat_race_fires_once() {
        let mut state = debt_free();
        state.assets.push(business(1, 1600));
        state.next_asset_id = 2;
        let first = check_win_conditions(&mut state);
        assert!(state.milestones.rat_race_escaped);
        assert!(state.escaped_rat_race);
        assert_eq!(first.len(), 1);
        assert!(first[0].text.starts_with("ESCAPED THE RAT RACE in 0 years! GOLD"));
        assert!(check_win_conditions(&mut state).is_empty());
    }

    #[test]
    fn late_escape_is_still_bronze() {
        let mut state = debt_free();
        state.age = 18 + 35;
        state.assets.push(business(1, 1600));
        state.next_asset_id = 2;
        let events = check_win_conditions(&mut state);
        assert!(events[0].text.starts_with("ESCAPED THE RAT RACE in 35 years! BRONZE"));
    }

    #[test]
    fn wealthy_and_free_fires_with_the_second_flag() {
        let mut state = debt_free();
        state.assets.push(business(1, 4000));
        state.next_asset_id = 2;
        let events = check_win_conditions(&mut state);
        assert_eq!(events.len(), 2);
        assert!(state.milestones.financial_independence);

        state.cash = units(950_000);
        let events = check_win_conditions(&mut state);
        let texts: Vec<&str> = events.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts[0], "Became a MILLIONAIRE!");
        assert!(texts[1].starts_with("Wealthy & Free!"));
        assert!(check_win_conditions(&mut state).is_empty());
    }

    #[test]
    fn achievements_are_awarded_once() {
        let mut state = debt_free();
        state.current_job.months_in_position = 1;
        let events = check_achievements(&mut state);
        let ids: Vec<&str> = state.achievements.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["debt_free", "all_debt_free", "first_job"]);
        assert_eq!(events.len(), 3);
        assert!(check_achievements(&mut state).is_empty());
    }

    #[test]
    fn failed_businesses_do_not_count_toward_empire() {
        let mut state = debt_free();
        for id in 1..=3 {
            state.assets.push(business(id, 100));
        }
        state.next_asset_id = 4;
        if let Holding::Business(b) = &mut state.assets[0].holding {
            b.failed = true;
        }
        assert!(!is_earned("business_empire", &state));
        assert!(is_earned("first_business", &state));
    }
}
