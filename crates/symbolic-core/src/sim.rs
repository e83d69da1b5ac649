//! The 11-microtick phase schedule and observer dispatch (spec §4.7, §5).

use crate::config::{Config, Mt10Behavior, PrimeTarget};
use crate::engine;
use crate::event::{Observation, ObservationFlags, Observer, Phase};
use crate::koppa;
use crate::numtheory::has_pattern_component;
use crate::psi;
use crate::ratio;
use crate::state::State;

fn run_e_phase(config: &Config, state: &mut State, microtick: u32) -> ObservationFlags {
    // Step 1: snapshot epsilon before the engine step runs.
    state.epsilon = state.upsilon.clone();

    // Step 2: the engine step itself. A failure leaves state unchanged
    // (spec §4.3/§7); the loop continues regardless.
    let _engine_succeeded = engine::step(config, state, microtick);

    // Step 3: prime-target detection.
    let prime_target = match config.prime_target {
        PrimeTarget::PrimeOnMemory => state.epsilon.clone(),
        PrimeTarget::PrimeOnNewUpsilon => state.upsilon.clone(),
    };
    let pattern_found = has_pattern_component(&prime_target, config);

    let mut rho_event = false;
    if pattern_found {
        state.rho_pending = true;
        state.rho_latched = true;
        rho_event = true;
    } else {
        state.rho_pending = false;
        state.rho_latched = false;
    }

    let mut forced_emission = false;
    if microtick == 10 {
        forced_emission = true;
        if pattern_found || matches!(config.mt10_behavior, Mt10Behavior::ForcedPsi) {
            state.rho_pending = true;
            state.rho_latched = true;
        }
    }

    ObservationFlags {
        rho_event,
        psi_fired: false,
        mu_zero: false,
        forced_emission,
    }
}

fn run_m_phase(config: &Config, state: &mut State, microtick: u32) -> ObservationFlags {
    let mu_zero = state.beta.num().sign() == num_bigint::Sign::NoSign;

    let allow_stack = koppa::stack_allows_psi(config, state);
    let mut request_psi = psi::should_fire_psi(config, state);

    let ratio_triggered = ratio::ratio_in_range(config, &state.upsilon, &state.beta);
    if ratio_triggered {
        request_psi = true;
    }
    state.ratio_triggered_recent = ratio_triggered;

    let ratio_threshold = ratio::ratio_threshold_outside(config, &state.upsilon, &state.beta);
    if ratio_threshold {
        request_psi = true;
        state.ratio_threshold_recent = true;
    }

    let psi_fired = if request_psi && allow_stack {
        psi::fire(config, state)
    } else {
        state.psi_recent = false;
        false
    };

    koppa::accrue(config, state, psi_fired, true, microtick);
    state.rho_latched = false;

    ObservationFlags {
        rho_event: false,
        psi_fired,
        mu_zero,
        forced_emission: false,
    }
}

fn run_r_phase(config: &Config, state: &mut State, microtick: u32) -> ObservationFlags {
    koppa::accrue(config, state, false, false, microtick);
    state.rho_latched = false;

    ObservationFlags {
        rho_event: false,
        psi_fired: false,
        mu_zero: false,
        forced_emission: false,
    }
}

/// Runs the full simulation, dispatching one [`Observation`] per microtick
/// to `observer`. This is the engine behind both `simulate` (CSV) and
/// `simulate_stream` (spec §6).
pub fn run<O: Observer>(config: &Config, observer: &mut O) {
    let mut state = State::seeded(config);

    for tick in 1..=config.ticks {
        state.tick = tick;
        for microtick in 1..=11u32 {
            state.clear_microtick_flags();
            let phase = Phase::for_microtick(microtick);
            let flags = match phase {
                Phase::Emission => run_e_phase(config, &mut state, microtick),
                Phase::Memory => run_m_phase(config, &mut state, microtick),
                Phase::Reset => run_r_phase(config, &mut state, microtick),
            };

            let observation = Observation {
                tick,
                microtick,
                phase,
                state: &state,
                flags,
            };
            observer.observe(&observation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, KoppaMode, KoppaTrigger, PsiMode};
    use crate::rational::Rational;

    struct Recorder {
        rows: Vec<(u64, u32, char, bool, bool)>,
    }

    impl Observer for Recorder {
        fn observe(&mut self, obs: &Observation<'_>) {
            self.rows.push((
                obs.tick,
                obs.microtick,
                obs.phase.code(),
                obs.flags.psi_fired,
                obs.flags.forced_emission,
            ));
        }
    }

    #[test]
    fn eleven_rows_per_tick() {
        let mut cfg = Config::default();
        cfg.ticks = 1;
        cfg.initial_upsilon = Rational::from_i64(3, 5);
        cfg.initial_beta = Rational::from_i64(5, 7);
        cfg.initial_koppa = Rational::from_i64(1, 1);
        cfg.psi_mode = PsiMode::MStep;
        cfg.koppa_mode = KoppaMode::Dump;
        cfg.koppa_trigger = KoppaTrigger::OnPsi;

        let mut rec = Recorder { rows: Vec::new() };
        run(&cfg, &mut rec);
        assert_eq!(rec.rows.len(), 11);
        assert_eq!(rec.rows[0].1, 1);
        assert_eq!(rec.rows[10].1, 11);
        // mt=10 is always forced_emission.
        assert!(rec.rows[9].4);
    }

    #[test]
    fn slide_engine_failure_continues_simulation() {
        let mut cfg = Config::default();
        cfg.ticks = 1;
        cfg.engine_mode = crate::config::EngineMode::Slide;
        cfg.initial_koppa = Rational::zero();

        let mut rec = Recorder { rows: Vec::new() };
        run(&cfg, &mut rec);
        assert_eq!(rec.rows.len(), 11);
    }
}
