//! The ψ transform: standard two-way inversion, triple three-way inversion,
//! strength amplification, and the Fibonacci-tick gate (spec §4.4).

use crate::config::{Config, PsiMode};
use crate::numtheory::{is_fibonacci_tick, is_prime};
use crate::state::State;

/// The mode-based firing request, before the ratio-window/threshold
/// force-fire conditions (those live in the simulation loop, spec §4.7 M
/// phase steps 4-5) and before the stack-depth gate (spec §4.5).
pub fn should_fire_psi(config: &Config, state: &State) -> bool {
    match config.psi_mode {
        PsiMode::MStep => true,
        PsiMode::RhoOnly => state.rho_pending && is_fibonacci_tick(state.tick),
        // MSTEP_RHO's base "always" is itself restricted by the
        // Fibonacci-tick gate (spec §4.4), so the effective predicate is
        // identical to RHO_ONLY's.
        PsiMode::MStepRho => state.rho_pending && is_fibonacci_tick(state.tick),
        PsiMode::InhibitRho => !state.rho_pending,
    }
}

/// `num(υ), num(β), num(ϙ)` all prime.
fn conditional_triple_predicate(state: &State) -> bool {
    is_prime(state.upsilon.num()) && is_prime(state.beta.num()) && is_prime(state.koppa.num())
}

/// Standard two-way inversion. Fails (no-op) if either numerator is zero.
fn apply_standard(state: &mut State) -> bool {
    if state.upsilon.is_zero() || state.beta.is_zero() {
        return false;
    }
    let old_upsilon = state.upsilon.clone();
    let old_beta = state.beta.clone();
    let new_upsilon = old_beta.div(&old_upsilon).expect("upsilon numerator checked non-zero");
    let new_beta = old_upsilon.div(&old_beta).expect("beta numerator checked non-zero");
    state.phi = old_upsilon;
    state.upsilon = new_upsilon;
    state.beta = new_beta;
    true
}

/// Triple three-way inversion: `(υ,β,ϙ) -> (β/ϙ, ϙ/υ, ϙ/β)`, all computed
/// from the pre-transform values. Requires all three non-zero.
fn apply_triple(state: &mut State) -> bool {
    if state.upsilon.is_zero() || state.beta.is_zero() || state.koppa.is_zero() {
        return false;
    }
    let old_upsilon = state.upsilon.clone();
    let old_beta = state.beta.clone();
    let old_koppa = state.koppa.clone();
    let new_upsilon = old_beta.div(&old_koppa).expect("koppa numerator checked non-zero");
    let new_beta = old_koppa.div(&old_upsilon).expect("upsilon numerator checked non-zero");
    let new_koppa = old_koppa.div(&old_beta).expect("beta numerator checked non-zero");
    state.upsilon = new_upsilon;
    state.beta = new_beta;
    state.koppa = new_koppa;
    true
}

/// Executes the ψ transform, including strength amplification, and updates
/// the post-fire recency flags. Returns whether ψ fired at least once.
pub fn fire(config: &Config, state: &mut State) -> bool {
    let strength = if config.psi_strength_parameter && state.rho_pending {
        let count = [
            is_prime(state.upsilon.num()),
            is_prime(state.beta.num()),
            is_prime(state.koppa.num()),
        ]
        .into_iter()
        .filter(|&b| b)
        .count();
        count.max(1)
    } else {
        1
    };

    let mut any_fired = false;
    let mut triple_fired = false;

    for i in 1..=strength {
        // Open Question #3 (spec §9): triple fires on iteration
        // `strength - 3` when `strength >= 3` (only meaningful once
        // `strength >= 4`, since iterations are 1-indexed).
        let amplification_triple = strength >= 4 && i == strength - 3;
        let use_triple = config.triple_psi
            || (config.conditional_triple_psi && conditional_triple_predicate(state))
            || amplification_triple;

        let ok = if use_triple {
            apply_triple(state)
        } else {
            apply_standard(state)
        };

        if !ok {
            break;
        }
        any_fired = true;
        if use_triple {
            triple_fired = true;
        }
        if any_fired {
            state.rho_pending = false;
        }
    }

    if any_fired {
        state.psi_recent = true;
        state.rho_pending = false;
        state.rho_latched = false;
        if triple_fired {
            state.psi_triple_recent = true;
        }
        if strength > 1 {
            state.psi_strength_applied = true;
        }
    }

    any_fired
}
