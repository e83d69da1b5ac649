//! Number-theoretic predicates over big integers: primality, twin-prime,
//! Fibonacci membership, and perfect powers. See spec §4.2.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::config::Config;
use crate::rational::Rational;

/// First dozen primes, used as fixed Miller-Rabin witnesses so that
/// primality is deterministic run-to-run (spec §4.2 asks for "at least 10
/// witnesses"; SPEC_FULL.md resolves the witness-selection gap with a fixed
/// set rather than a PRNG, so the same `n` always yields the same verdict).
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Probabilistic (here, deterministic fixed-witness) Miller-Rabin primality
/// test on `|n|`. Returns `false` for `|n| < 2`.
pub fn is_prime(n: &BigInt) -> bool {
    let n = n.abs().to_biguint().expect("abs is non-negative");
    is_prime_u(&n)
}

fn is_prime_u(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    if *n == two || *n == BigUint::from(3u32) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // n - 1 = 2^r * d, d odd.
    let n_minus_one = n - BigUint::one();
    let mut d = n_minus_one.clone();
    let mut r: u64 = 0;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    'witness: for &a in WITNESSES.iter() {
        let a = BigUint::from(a);
        if a >= *n {
            continue;
        }
        let mut x = a.modpow(&d, n);
        if x == BigUint::one() || x == n_minus_one {
            continue;
        }
        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Twin-prime test on a rational's raw components: numerator and
/// denominator are both prime and `|num - den| = 2`.
pub fn is_twin_prime(v: &Rational) -> bool {
    if !is_prime(v.num()) {
        return false;
    }
    let den_signed = BigInt::from(v.den().clone());
    if !is_prime(&den_signed) {
        return false;
    }
    (v.num() - &den_signed).abs() == BigInt::from(2)
}

/// Fibonacci-number test on a non-negative integer: `n` is Fibonacci iff
/// `5n^2 + 4` or `5n^2 - 4` is a perfect square.
pub fn is_fibonacci(n: &BigUint) -> bool {
    let five = BigUint::from(5u32);
    let four = BigUint::from(4u32);
    let n2 = n * n;
    let plus = &five * &n2 + &four;
    if is_perfect_square(&plus) {
        return true;
    }
    if five.clone() * &n2 >= four {
        let minus = five * n2 - four;
        return is_perfect_square(&minus);
    }
    false
}

fn is_perfect_square(n: &BigUint) -> bool {
    let root = n.sqrt();
    &root * &root == *n
}

/// `n > 0` is a perfect k-th power for some `k` in `[2, 64]`.
pub fn is_perfect_power(n: &BigUint) -> bool {
    if n.is_zero() || *n == BigUint::one() {
        return false;
    }
    for k in 2u32..=64 {
        let root = n.nth_root(k);
        if root.pow(k) == *n {
            return true;
        }
    }
    false
}

/// `has_pattern_component(value, config)` per spec §4.2: always checks base
/// primality of either component, then optionally twin-prime, Fibonacci, and
/// perfect-power patterns as enabled by `config`.
pub fn has_pattern_component(value: &Rational, config: &Config) -> bool {
    let num_prime = is_prime(value.num());
    let den_prime = is_prime(&BigInt::from(value.den().clone()));
    if num_prime || den_prime {
        return true;
    }

    if config.twin_prime_trigger && num_prime && den_prime && is_twin_prime(value) {
        return true;
    }

    if config.fibonacci_trigger {
        let num_abs = value.abs_numerator();
        if is_fibonacci(&num_abs) || is_fibonacci(value.den()) {
            return true;
        }
    }

    if config.perfect_power_trigger {
        let num_abs = value.abs_numerator();
        if is_perfect_power(&num_abs) || is_perfect_power(value.den()) {
            return true;
        }
    }

    false
}

/// The literal fixed tick set from spec §4.4 gating ρ-driven ψ in
/// `RHO_ONLY`/`MSTEP_RHO` modes. This is *not* "every Fibonacci number" --
/// the spec names a specific subsequence (`5,13,89,233,1597,...`, skipping
/// e.g. `1,2,3,8,21,34`), so this is carried as the literal list rather than
/// computed from the Fibonacci recurrence (see DESIGN.md).
const FIBONACCI_TICKS: [u64; 11] = [
    5, 13, 89, 233, 1597, 4181, 10946, 28657, 75025, 196418, 514229,
];

/// A tick number drawn from the fixed set gating ρ-driven ψ (spec §4.4), up
/// to the platform's `u64` range.
pub fn is_fibonacci_tick(tick: u64) -> bool {
    FIBONACCI_TICKS.contains(&tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn small_primes() {
        assert!(is_prime(&BigInt::from(2)));
        assert!(is_prime(&BigInt::from(7)));
        assert!(!is_prime(&BigInt::from(1)));
        assert!(!is_prime(&BigInt::from(0)));
        assert!(!is_prime(&BigInt::from(9)));
    }

    #[test]
    fn negative_uses_magnitude() {
        assert!(is_prime(&BigInt::from(-7)));
    }

    #[test]
    fn fibonacci_numbers() {
        for f in [0u64, 1, 2, 3, 5, 8, 13, 21, 34] {
            assert!(is_fibonacci(&BigUint::from(f)), "{f} should be fibonacci");
        }
        assert!(!is_fibonacci(&BigUint::from(4u32)));
    }

    #[test]
    fn perfect_powers() {
        assert!(is_perfect_power(&BigUint::from(4u32)));
        assert!(is_perfect_power(&BigUint::from(9u32)));
        assert!(is_perfect_power(&BigUint::from(8u32)));
        assert!(!is_perfect_power(&BigUint::from(6u32)));
    }

    #[test]
    fn pattern_component_base_primality() {
        let cfg = Config::default();
        let v = Rational::from_i64(2, 4);
        assert!(has_pattern_component(&v, &cfg));

        let v2 = Rational::from_i64(4, 9);
        assert!(!has_pattern_component(&v2, &cfg));
    }

    #[test]
    fn pattern_component_perfect_power_enabled() {
        let mut cfg = Config::default();
        cfg.perfect_power_trigger = true;
        let v = Rational::from_i64(4, 9);
        assert!(has_pattern_component(&v, &cfg));
    }

    #[test]
    fn fibonacci_tick_gate() {
        assert!(!is_fibonacci_tick(7));
        assert!(is_fibonacci_tick(13));
        assert!(is_fibonacci_tick(5));
        assert!(is_fibonacci_tick(89));
    }
}
