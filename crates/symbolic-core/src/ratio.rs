//! Ratio windows and the ratio-threshold detector (spec §4.6).

use crate::config::{Config, RatioTriggerMode};
use crate::rational::Rational;

/// A lower/upper rational band.
pub struct Window {
    pub lower: Rational,
    pub upper: Rational,
}

fn golden() -> Window {
    Window {
        lower: Rational::from_i64(3, 2),
        upper: Rational::from_i64(17, 10),
    }
}

fn sqrt2() -> Window {
    Window {
        lower: Rational::from_i64(13, 10),
        upper: Rational::from_i64(3, 2),
    }
}

fn plastic() -> Window {
    Window {
        lower: Rational::from_i64(6, 5),
        upper: Rational::from_i64(7, 5),
    }
}

/// Resolves the configured window, if any. `NONE` has no window.
fn resolve_window(config: &Config) -> Option<Window> {
    match config.ratio_trigger_mode {
        RatioTriggerMode::None => None,
        RatioTriggerMode::Golden => Some(golden()),
        RatioTriggerMode::Sqrt2 => Some(sqrt2()),
        RatioTriggerMode::Plastic => Some(plastic()),
        RatioTriggerMode::Custom => Some(Window {
            lower: config.ratio_custom_lower.clone(),
            upper: config.ratio_custom_upper.clone(),
        }),
    }
}

/// `ratio_in_range`: false if β is zero; else `r = υ/β` (no reduction),
/// `lower < r < upper` by rational comparison.
pub fn ratio_in_range(config: &Config, upsilon: &Rational, beta: &Rational) -> bool {
    if beta.is_zero() {
        return false;
    }
    let window = match resolve_window(config) {
        Some(w) => w,
        None => return false,
    };
    let r = match upsilon.div(beta) {
        Ok(r) => r,
        Err(_) => return false,
    };
    window.lower.lt(&r) && r.lt(&window.upper)
}

/// `ratio_threshold_outside`: only meaningful when
/// `config.ratio_threshold_psi` is enabled. Forms the *only* permitted
/// transient `f64` snapshot in the system to test `|r| < 0.5 || |r| > 2`;
/// the float is never written back into state (spec §4.6, §9).
pub fn ratio_threshold_outside(config: &Config, upsilon: &Rational, beta: &Rational) -> bool {
    if !config.ratio_threshold_psi {
        return false;
    }
    if beta.is_zero() {
        return false;
    }
    let r = match upsilon.div(beta) {
        Ok(r) => r,
        Err(_) => return false,
    };
    let snapshot = rational_to_f64_snapshot(&r);
    snapshot.abs() < 0.5 || snapshot.abs() > 2.0
}

/// Transient float snapshot for the threshold check only. Must never be
/// stored in [`crate::state::State`].
fn rational_to_f64_snapshot(r: &Rational) -> f64 {
    // num_bigint's BigInt/BigUint both support lossy `to_string`-free f64
    // conversion via `num_traits::ToPrimitive`; for arbitrarily large
    // components this saturates to +/-inf, which still satisfies the
    // "outside [0.5, 2]" test correctly.
    use num_traits::ToPrimitive;
    let n = r.num().to_f64().unwrap_or(f64::INFINITY);
    let d = r.den().to_f64().unwrap_or(f64::INFINITY);
    n / d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_window_membership() {
        let mut cfg = Config::default();
        cfg.ratio_trigger_mode = RatioTriggerMode::Golden;
        let upsilon = Rational::from_i64(8, 5);
        let beta = Rational::from_i64(1, 1);
        assert!(ratio_in_range(&cfg, &upsilon, &beta));
    }

    #[test]
    fn plastic_window_excludes_same_ratio() {
        let mut cfg = Config::default();
        cfg.ratio_trigger_mode = RatioTriggerMode::Plastic;
        let upsilon = Rational::from_i64(8, 5);
        let beta = Rational::from_i64(1, 1);
        assert!(!ratio_in_range(&cfg, &upsilon, &beta));
    }

    #[test]
    fn zero_beta_is_never_in_range() {
        let mut cfg = Config::default();
        cfg.ratio_trigger_mode = RatioTriggerMode::Golden;
        let upsilon = Rational::from_i64(8, 5);
        let beta = Rational::zero();
        assert!(!ratio_in_range(&cfg, &upsilon, &beta));
    }
}
