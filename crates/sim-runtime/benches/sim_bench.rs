use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

fn bench_ticks(c: &mut Criterion) {
    let config = sim_core::SimConfig {
        rng_seed: 42,
        starting: sim_core::StartingProfile {
            cash: Decimal::new(500_000, 0),
            financial_iq: 100,
            ..Default::default()
        },
    };
    let mut sim = sim_runtime::Simulation::new(&config);
    sim.start_game();
    for name in ["Small Rental", "Duplex", "Townhouse"] {
        sim.buy_property(name).expect("bench setup");
    }
    sim.buy_business("Vending Route").expect("bench setup");
    sim.buy_stock("Apple (AAPL)", Decimal::new(20_000, 0)).expect("bench setup");
    sim.buy_crypto("Bitcoin (BTC)", Decimal::new(5_000, 0)).expect("bench setup");

    c.bench_function("sim_tick", |b| {
        b.iter(|| {
            if sim.state().is_dead() {
                sim.state_mut().death_age = None;
            }
            let _ = sim_runtime::run_months_in_place(&mut sim, 1);
        })
    });
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
