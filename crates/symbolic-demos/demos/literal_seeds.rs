//! Runs a short simulation from literal seeds and prints a running summary
//! of each emitted observation, without touching the filesystem.
//!
//! Run with: `cargo run -p symbolic-demos --bin literal_seeds`

use symbolic_core::config::{Config, KoppaMode, KoppaTrigger, PsiMode};
use symbolic_core::event::Observation;
use symbolic_core::rational::Rational;
use symbolic_core::simulate::simulate_stream;
use tracing::info;

fn main() {
    tracing_subscriber::fmt::init();

    let mut config = Config::default();
    config.psi_mode = PsiMode::MStep;
    config.koppa_mode = KoppaMode::Dump;
    config.koppa_trigger = KoppaTrigger::OnPsi;
    config.ticks = 3;
    config.initial_upsilon = Rational::from_i64(3, 5);
    config.initial_beta = Rational::from_i64(5, 7);
    config.initial_koppa = Rational::from_i64(1, 1);

    info!(ticks = config.ticks, "starting literal-seed run");

    let mut rows = 0u64;
    simulate_stream(&config, &mut |obs: &Observation<'_>| {
        rows += 1;
        println!(
            "tick={} mt={:>2} phase={} upsilon={} beta={} koppa={}",
            obs.tick, obs.microtick, obs.phase, obs.state.upsilon, obs.state.beta, obs.state.koppa,
        );
    });

    info!(rows, "run complete");
}
