//! The simulator's mutable state container (spec §3).

use crate::config::Config;
use crate::rational::Rational;

/// Bounded ring of up to 4 rationals backing the ϙ accumulator's
/// multi-level stack (spec §3, §4.5). Implemented as a small fixed-capacity
/// buffer plus a size field per spec §9's design note, not a `Vec`.
#[derive(Debug, Clone)]
pub struct KoppaStack {
    slots: [Rational; 4],
    size: usize,
}

impl KoppaStack {
    pub fn new() -> Self {
        KoppaStack {
            slots: [
                Rational::zero(),
                Rational::zero(),
                Rational::zero(),
                Rational::zero(),
            ],
            size: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, index: usize) -> Option<&Rational> {
        if index < self.size {
            Some(&self.slots[index])
        } else {
            None
        }
    }

    /// Push a value onto the stack. If full, shifts left (discarding the
    /// oldest) and places the new value at index 3; otherwise writes at
    /// `size` and grows (spec §4.5 step 1).
    pub fn push(&mut self, value: Rational) {
        if self.size == 4 {
            self.slots[0] = self.slots[1].clone();
            self.slots[1] = self.slots[2].clone();
            self.slots[2] = self.slots[3].clone();
            self.slots[3] = value;
        } else {
            self.slots[self.size] = value;
            self.size += 1;
        }
    }
}

impl Default for KoppaStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived ε-φ triangle ratios (spec §3, §4.3). Each is `0/1` when its
/// denominator would be zero.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub phi_over_epsilon: Rational,
    pub prev_over_phi: Rational,
    pub epsilon_over_prev: Rational,
}

impl Triangle {
    fn zero() -> Self {
        Triangle {
            phi_over_epsilon: Rational::zero(),
            prev_over_phi: Rational::zero(),
            epsilon_over_prev: Rational::zero(),
        }
    }
}

/// The full simulator state: primary tracked rationals, snapshots, deltas,
/// the ϙ-stack, and the per-microtick recency flags (spec §3).
#[derive(Debug, Clone)]
pub struct State {
    pub upsilon: Rational,
    pub beta: Rational,
    pub koppa: Rational,

    /// Snapshot of υ at the start of every E phase.
    pub epsilon: Rational,
    /// Snapshot of υ immediately before ψ.
    pub phi: Rational,

    pub previous_upsilon: Rational,
    pub previous_beta: Rational,

    pub delta_upsilon: Rational,
    pub delta_beta: Rational,

    pub triangle: Triangle,

    pub koppa_stack: KoppaStack,
    pub koppa_sample: Rational,
    pub koppa_sample_index: i64,

    pub rho_pending: bool,
    pub rho_latched: bool,
    pub psi_recent: bool,
    pub ratio_triggered_recent: bool,
    pub psi_triple_recent: bool,
    pub dual_engine_last_step: bool,
    pub ratio_threshold_recent: bool,
    pub psi_strength_applied: bool,
    pub sign_flip_polarity: bool,

    /// Current tick number, 1-based once the loop starts. Used for the
    /// Fibonacci-tick gate inside ψ (spec §4.4).
    pub tick: u64,
}

impl State {
    /// Seeds state from a `Config`'s initial υ, β, ϙ (spec §3 Lifecycle).
    pub fn seeded(config: &Config) -> Self {
        let upsilon0 = config.initial_upsilon.clone();
        let beta0 = config.initial_beta.clone();
        State {
            upsilon: upsilon0.clone(),
            beta: beta0.clone(),
            koppa: config.initial_koppa.clone(),
            epsilon: upsilon0.clone(),
            phi: beta0.clone(),
            previous_upsilon: upsilon0,
            previous_beta: beta0,
            delta_upsilon: Rational::zero(),
            delta_beta: Rational::zero(),
            triangle: Triangle::zero(),
            koppa_stack: KoppaStack::new(),
            koppa_sample: config.initial_koppa.clone(),
            koppa_sample_index: -1,
            rho_pending: false,
            rho_latched: false,
            psi_recent: false,
            ratio_triggered_recent: false,
            psi_triple_recent: false,
            dual_engine_last_step: false,
            ratio_threshold_recent: false,
            psi_strength_applied: false,
            sign_flip_polarity: false,
            tick: 0,
        }
    }

    /// Clears the per-microtick recency/sample flags, run at the top of
    /// every microtick before phase work (spec §3 Lifecycle, §4.7).
    pub fn clear_microtick_flags(&mut self) {
        self.ratio_triggered_recent = false;
        self.psi_triple_recent = false;
        self.dual_engine_last_step = false;
        self.ratio_threshold_recent = false;
        self.psi_strength_applied = false;
        self.koppa_sample = self.koppa.clone();
        self.koppa_sample_index = -1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn koppa_stack_grows_then_shifts() {
        let mut s = KoppaStack::new();
        for i in 0..6 {
            s.push(Rational::from_i64(i, 1));
        }
        assert_eq!(s.size(), 4);
        // Oldest two (0, 1) were discarded; stack holds 2,3,4,5.
        assert_eq!(s.get(0).unwrap().num(), &num_bigint::BigInt::from(2));
        assert_eq!(s.get(3).unwrap().num(), &num_bigint::BigInt::from(5));
    }

    #[test]
    fn seeded_state_matches_config() {
        let mut cfg = Config::default();
        cfg.initial_upsilon = Rational::from_i64(3, 5);
        cfg.initial_beta = Rational::from_i64(5, 7);
        let st = State::seeded(&cfg);
        assert!(st.upsilon.same_representation(&Rational::from_i64(3, 5)));
        assert_eq!(st.koppa_sample_index, -1);
        assert_eq!(st.koppa_stack.size(), 0);
    }
}
