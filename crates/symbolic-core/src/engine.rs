//! The E-phase engine step: track-mode selection, cascade/gating overrides,
//! delta-add, cross-propagation, sign-flip, the ε-φ triangle, and modular
//! wrap.

use num_bigint::BigUint;

use crate::config::{Config, EngineMode, TrackMode};
use crate::rational::Rational;
use crate::state::State;

fn depth_override(depth: usize) -> TrackMode {
    match depth {
        0 | 1 => TrackMode::Add,
        2 | 3 => TrackMode::Multi,
        4 => TrackMode::Slide,
        _ => TrackMode::Add,
    }
}

fn magnitude_override(magnitude: &BigUint) -> TrackMode {
    if *magnitude < BigUint::from(10u32) {
        TrackMode::Slide
    } else if *magnitude < BigUint::from(100u32) {
        TrackMode::Multi
    } else {
        TrackMode::Add
    }
}

/// Resolves the pair of per-component track modes, or `None` when the
/// delta-add path should run instead.
fn select_modes(config: &Config, state: &State, microtick: u32) -> Option<(TrackMode, TrackMode)> {
    if !config.dual_track && matches!(config.engine_mode, EngineMode::DeltaAdd) {
        return None;
    }

    let (mut ups_mode, mut beta_mode) = if config.dual_track {
        (config.engine_upsilon, config.engine_beta)
    } else {
        let m = config
            .engine_mode
            .as_track_mode()
            .expect("non-dual, non-delta-add engine_mode maps to a track mode");
        (m, m)
    };

    if config.asymmetric_cascade {
        let pair = match microtick {
            1 => Some((TrackMode::Multi, TrackMode::Add)),
            4 => Some((TrackMode::Add, TrackMode::Slide)),
            7 => Some((TrackMode::Slide, TrackMode::Multi)),
            10 => Some((TrackMode::Add, TrackMode::Add)),
            _ => None,
        };
        if let Some((u, b)) = pair {
            ups_mode = u;
            beta_mode = b;
        }
    }

    if config.stack_depth_modes {
        let m = depth_override(state.koppa_stack.size());
        ups_mode = m;
        beta_mode = m;
    }

    if config.koppa_gated_engine {
        let m = magnitude_override(&state.koppa.abs_numerator());
        ups_mode = m;
        beta_mode = m;
    }

    Some((ups_mode, beta_mode))
}

fn apply_track_mode(
    mode: TrackMode,
    current: &Rational,
    counterpart: &Rational,
    koppa: &Rational,
) -> Option<Rational> {
    match mode {
        TrackMode::Add => Some(current.add(counterpart).add(koppa)),
        TrackMode::Multi => Some(current.mul(&counterpart.add(koppa))),
        TrackMode::Slide => current.add(counterpart).div(koppa).ok(),
    }
}

/// Runs one engine step. Returns `true` on success; on failure (a SLIDE
/// division by a zero-numerator ϙ) the state is left entirely unchanged.
pub fn step(config: &Config, state: &mut State, microtick: u32) -> bool {
    let upsilon_pre = state.upsilon.clone();
    let beta_pre = state.beta.clone();

    // "Most recent differences current - previous", computed from the
    // state as it stood before this step (glossary: δυ, δβ).
    let delta_upsilon_in = upsilon_pre.sub(&state.previous_upsilon);
    let delta_beta_in = beta_pre.sub(&state.previous_beta);

    let modes = select_modes(config, state, microtick);
    let (mut new_upsilon, mut new_beta) = match modes {
        Some((ups_mode, beta_mode)) => {
            let nu = match apply_track_mode(ups_mode, &upsilon_pre, &beta_pre, &state.koppa) {
                Some(v) => v,
                None => return false,
            };
            let nb = match apply_track_mode(beta_mode, &beta_pre, &upsilon_pre, &state.koppa) {
                Some(v) => v,
                None => return false,
            };
            (nu, nb)
        }
        None => (
            upsilon_pre.add(&delta_upsilon_in),
            beta_pre.add(&delta_beta_in),
        ),
    };

    if config.delta_cross_propagation {
        new_upsilon = new_upsilon.add(&delta_beta_in);
        new_beta = new_beta.add(&delta_upsilon_in);
        if config.delta_koppa_offset {
            new_upsilon = new_upsilon.add(&state.koppa);
            new_beta = new_beta.add(&state.koppa);
        }
    }

    match config.sign_flip_mode {
        crate::config::SignFlipMode::Always => {
            new_upsilon = new_upsilon.negate();
            new_beta = new_beta.negate();
        }
        crate::config::SignFlipMode::Alternate => {
            if !state.sign_flip_polarity {
                new_upsilon = new_upsilon.negate();
                new_beta = new_beta.negate();
            }
            state.sign_flip_polarity = !state.sign_flip_polarity;
        }
        crate::config::SignFlipMode::None => {
            state.sign_flip_polarity = false;
        }
    }

    let mut new_koppa = state.koppa.clone();
    if config.modular_wrap {
        let over_threshold =
            new_koppa.abs_numerator() > BigUint::from(config.koppa_wrap_threshold);
        if over_threshold && !new_beta.is_zero() {
            // Wrap is a no-op when β is zero (see DESIGN.md).
            if let Ok(wrapped) = new_koppa.rat_mod(&new_beta) {
                new_koppa = wrapped;
            }
        }
    }

    if config.epsilon_phi_triangle {
        state.triangle.phi_over_epsilon = if state.epsilon.is_zero() {
            Rational::from_i64(0, 1)
        } else {
            state
                .phi
                .div(&state.epsilon)
                .unwrap_or_else(|_| Rational::from_i64(0, 1))
        };
        state.triangle.prev_over_phi = if state.phi.is_zero() {
            Rational::from_i64(0, 1)
        } else {
            state
                .previous_upsilon
                .div(&state.phi)
                .unwrap_or_else(|_| Rational::from_i64(0, 1))
        };
        state.triangle.epsilon_over_prev = if state.previous_upsilon.is_zero() {
            Rational::from_i64(0, 1)
        } else {
            state
                .epsilon
                .div(&state.previous_upsilon)
                .unwrap_or_else(|_| Rational::from_i64(0, 1))
        };
    }

    state.previous_upsilon = upsilon_pre.clone();
    state.previous_beta = beta_pre.clone();
    state.delta_upsilon = new_upsilon.sub(&upsilon_pre);
    state.delta_beta = new_beta.sub(&beta_pre);
    state.upsilon = new_upsilon;
    state.beta = new_beta;
    state.koppa = new_koppa;
    state.dual_engine_last_step = config.dual_track;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn add_engine_matches_scenario_1() {
        let mut cfg = Config::default();
        cfg.engine_mode = EngineMode::Add;
        let mut state = State::seeded(&cfg);
        state.upsilon = Rational::from_i64(3, 5);
        state.beta = Rational::from_i64(5, 7);
        state.koppa = Rational::from_i64(1, 1);

        assert!(step(&cfg, &mut state, 1));
        // 3/5 + 5/7 + 1/1 = (3*7*1 + 5*5*1 + 1*5*7)/(5*7*1) = 81/35
        assert_eq!(state.upsilon.num(), &num_bigint::BigInt::from(81));
        assert_eq!(state.upsilon.den(), &num_bigint::BigUint::from(35u32));
    }

    #[test]
    fn slide_with_zero_koppa_fails_and_leaves_state_unchanged() {
        let mut cfg = Config::default();
        cfg.engine_mode = EngineMode::Slide;
        let mut state = State::seeded(&cfg);
        state.upsilon = Rational::from_i64(1, 2);
        state.beta = Rational::from_i64(1, 3);
        state.koppa = Rational::zero();

        let before = state.upsilon.clone();
        assert!(!step(&cfg, &mut state, 1));
        assert!(state.upsilon.same_representation(&before));
    }

    #[test]
    fn delta_add_path_uses_previous_values() {
        let mut cfg = Config::default();
        cfg.engine_mode = EngineMode::DeltaAdd;
        let mut state = State::seeded(&cfg);
        state.upsilon = Rational::from_i64(5, 1);
        state.previous_upsilon = Rational::from_i64(3, 1);
        state.beta = Rational::from_i64(2, 1);
        state.previous_beta = Rational::from_i64(2, 1);

        assert!(step(&cfg, &mut state, 1));
        // delta_upsilon = 5 - 3 = 2; new_upsilon = 5 + 2 = 7.
        assert_eq!(state.upsilon.num(), &num_bigint::BigInt::from(7));
    }

    #[test]
    fn sign_flip_always_negates_both() {
        let mut cfg = Config::default();
        cfg.sign_flip_mode = crate::config::SignFlipMode::Always;
        let mut state = State::seeded(&cfg);
        state.upsilon = Rational::from_i64(3, 5);
        state.beta = Rational::from_i64(5, 7);
        state.koppa = Rational::zero();

        assert!(step(&cfg, &mut state, 1));
        assert!(state.upsilon.signum() <= 0);
    }
}
