#![deny(warnings)]

//! Headless CLI: run a scripted wealth-building game and print its KPIs.

use anyhow::{Context, Result};
use serde::Deserialize;
use sim_core::*;
use sim_runtime::{Command, Simulation};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Args {
    scenario: Option<String>,
    years: Option<u32>,
    seed: Option<u64>,
    json: bool,
    version: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next(),
            "--years" => args.years = it.next().and_then(|s| s.parse().ok()),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--json" => args.json = true,
            "--version" => args.version = true,
            _ => {}
        }
    }
    args
}

/// A command scheduled for the start of a given month.
#[derive(Debug, Deserialize)]
struct Order {
    month: u32,
    command: Command,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    seed: Option<u64>,
    years: Option<u32>,
    starting: StartingProfile,
    orders: Vec<Order>,
}

fn load_scenario(path: Option<&str>) -> Result<Scenario> {
    let Some(path) = path else {
        return Ok(Scenario::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {path}"))
}

/// Execute the orders scheduled for the current month. Time advances only
/// through the driver loop, so scheduled ticks are skipped.
fn run_orders(sim: &mut Simulation, orders: &[Order]) {
    let month = sim.state().month;
    for order in orders.iter().filter(|o| o.month == month) {
        if order.command.is_tick() {
            warn!(month, command = ?order.command, "scheduled tick ignored");
            continue;
        }
        match sim.execute(&order.command) {
            Ok(events) => {
                for event in events {
                    info!(month, %event, "order");
                }
            }
            Err(err) => warn!(month, command = ?order.command, %err, "order rejected"),
        }
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    if args.version {
        println!(
            "wealth {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(());
    }
    info!(
        scenario = ?args.scenario,
        years = ?args.years,
        seed = ?args.seed,
        git_sha = env!("GIT_SHA"),
        "starting CLI"
    );

    let scenario = load_scenario(args.scenario.as_deref())?;
    let config = SimConfig {
        rng_seed: args.seed.or(scenario.seed).unwrap_or(42),
        starting: scenario.starting,
    };
    let months = args.years.or(scenario.years).unwrap_or(1) * 12;

    let mut sim = Simulation::new(&config);
    validate_state(sim.state())?;
    for event in sim.start_game() {
        debug!(%event);
    }

    let mut months_run = 0;
    while months_run < months && !sim.state().is_dead() {
        run_orders(&mut sim, &scenario.orders);
        for event in sim.advance_month() {
            debug!(%event);
        }
        months_run += 1;
    }
    validate_state(sim.state())?;

    let mut snap = sim.snapshot();
    snap.months_run = months_run;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(());
    }

    let state = sim.state();
    println!(
        "Game OK | seed: {} | age: {} | job: {} | lifestyle: {} | economy: {}",
        config.rng_seed,
        state.age,
        state.current_job.title,
        state.lifestyle.label(),
        state.economy_phase.label()
    );
    println!(
        "KPI | months: {} | cash: {} | net worth: {} | passive: {}/mo | cash flow: {}/mo | credit: {} | IQ: {} | assets: {} | debts: {} | achievements: {}",
        snap.months_run,
        money::format(snap.cash),
        money::format(snap.net_worth),
        money::format(snap.passive_income),
        money::format(snap.cash_flow),
        snap.credit_score,
        snap.financial_iq,
        snap.assets,
        snap.debts,
        snap.achievements
    );
    if let Some(age) = state.death_age {
        println!("Game over | died at {age}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::money::units;

    #[test]
    fn scheduled_ticks_do_not_move_the_clock() {
        let mut config = SimConfig::default();
        config.starting.cash = units(5000);
        let mut sim = Simulation::new(&config);
        let orders: Vec<Order> = serde_yaml::from_str(
            r#"
- month: 1
  command: { type: skip_year }
- month: 1
  command: { type: buy_stock, name: "Visa (V)", amount: 1000 }
- month: 1
  command: { type: advance_month }
"#,
        )
        .unwrap();
        run_orders(&mut sim, &orders);
        assert_eq!(sim.state().month, 1);
        assert_eq!(sim.state().assets.len(), 1);
    }
}
