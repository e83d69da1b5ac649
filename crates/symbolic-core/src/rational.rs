//! Raw (numerator, denominator) arithmetic over arbitrary-precision integers.
//!
//! No operation here ever reduces a result to lowest terms. `2/4` and `1/2`
//! are distinct values and must stay distinct through every arithmetic path;
//! that "tension" is itself an observable of the simulator. See spec §4.1.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};

/// A raw fraction `num/den`. `den` is invariantly non-zero and positive;
/// the sign of the value lives entirely in `num`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rational {
    num: BigInt,
    den: BigUint,
}

/// A zero denominator reaching a constructor is a programming fault, not a
/// modeled condition -- per spec §7 it must abort with a diagnostic.
#[derive(Debug, thiserror::Error)]
#[error("rational denominator must be non-zero")]
pub struct ZeroDenominator;

/// Division (or mod) where the divisor's numerator is zero. This is a
/// modeled condition, not a fault: callers treat it as a local no-op per
/// spec §4.3/§4.4/§7.
#[derive(Debug, thiserror::Error)]
#[error("division by a rational with zero numerator")]
pub struct DivisionByZeroNumerator;

impl Rational {
    /// Constructs `num/den`. Panics if `den` is zero -- a zero denominator
    /// is a programming fault anywhere in this system (spec §7).
    pub fn new(num: BigInt, den: BigUint) -> Self {
        assert!(!den.is_zero(), "Rational::new: zero denominator");
        Rational { num, den }
    }

    /// Fallible constructor matching the §4.1 `set(n, d)` contract.
    pub fn try_new(num: BigInt, den: BigUint) -> Result<Self, ZeroDenominator> {
        if den.is_zero() {
            Err(ZeroDenominator)
        } else {
            Ok(Rational { num, den })
        }
    }

    /// `0/1`.
    pub fn zero() -> Self {
        Rational {
            num: BigInt::zero(),
            den: BigUint::one(),
        }
    }

    /// `1/1`.
    pub fn one() -> Self {
        Rational {
            num: BigInt::one(),
            den: BigUint::one(),
        }
    }

    /// Build from plain machine integers, e.g. `Rational::from_i64(3, 5)`.
    pub fn from_i64(num: i64, den: u64) -> Self {
        Rational::new(BigInt::from(num), BigUint::from(den))
    }

    pub fn num(&self) -> &BigInt {
        &self.num
    }

    pub fn den(&self) -> &BigUint {
        &self.den
    }

    /// Zero-test: numerator is zero (spec §3 Invariants, §4.1).
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Sign test: based on the numerator only, since the denominator is
    /// always positive.
    pub fn signum(&self) -> i32 {
        if self.num.is_zero() {
            0
        } else if self.num.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn negate(&self) -> Self {
        Rational {
            num: -self.num.clone(),
            den: self.den.clone(),
        }
    }

    /// `a/b + c/d = (ad + bc) / (bd)`, no reduction.
    pub fn add(&self, other: &Rational) -> Self {
        let bd = den_as_int(&self.den) * den_as_int(&other.den);
        let ad = &self.num * den_as_int(&other.den);
        let bc = &other.num * den_as_int(&self.den);
        Rational::new(ad + bc, int_as_den(bd))
    }

    /// `a/b - c/d = (ad - bc) / (bd)`, no reduction.
    pub fn sub(&self, other: &Rational) -> Self {
        self.add(&other.negate())
    }

    /// `a/b * c/d = (ac) / (bd)`, no reduction.
    pub fn mul(&self, other: &Rational) -> Self {
        let num = &self.num * &other.num;
        let den = &self.den * &other.den;
        Rational::new(num, den)
    }

    /// `a/b / c/d = (ad) / (bc)`. Fails (no-op signaled to the caller) when
    /// `other`'s numerator is zero -- this is a modeled condition per §4.3.
    pub fn div(&self, other: &Rational) -> Result<Self, DivisionByZeroNumerator> {
        if other.num.is_zero() {
            return Err(DivisionByZeroNumerator);
        }
        let mut num = &self.num * den_as_int(&other.den);
        let mut den_signed = den_as_int(&self.den) * &other.num;
        // `den` must stay positive by invariant; fold a negative divisor
        // numerator's sign into the numerator instead.
        if den_signed.is_negative() {
            num = -num;
            den_signed = -den_signed;
        }
        Ok(Rational::new(num, int_as_den(den_signed)))
    }

    /// `a - b` as a standalone helper matching spec §4.1's "delta helper".
    pub fn delta(&self, other: &Rational) -> Self {
        self.sub(other)
    }

    /// Absolute value of the numerator.
    pub fn abs_numerator(&self) -> BigUint {
        self.num.abs().to_biguint().expect("abs is non-negative")
    }

    /// Floor of `self`, defined directly on the raw (num, den) pair -- no
    /// canonicalization of `self` is performed to compute it.
    pub fn floor(&self) -> BigInt {
        self.num.div_floor(&den_as_int(&self.den))
    }

    /// Ceiling of `self`, via the raw pair.
    pub fn ceil(&self) -> BigInt {
        let d = den_as_int(&self.den);
        let (q, r) = self.num.div_rem(&d);
        if r.is_zero() { q } else { q + BigInt::one() }
    }

    /// Rational mod: `a mod b = a - floor(a/b)*b`, per spec §4.1. Fails when
    /// `b`'s numerator is zero (division is undefined).
    pub fn rat_mod(&self, other: &Rational) -> Result<Self, DivisionByZeroNumerator> {
        let q = self.div(other)?;
        let f = q.floor();
        let f_rat = Rational::new(f, BigUint::one());
        Ok(self.sub(&f_rat.mul(other)))
    }

    /// Total order via cross-multiplication: `a/b` vs `c/d` compares `ad`
    /// against `cb`. Both denominators are positive so this preserves
    /// ordering without reducing either operand.
    pub fn compare(&self, other: &Rational) -> Ordering {
        let lhs = &self.num * den_as_int(&other.den);
        let rhs = &other.num * den_as_int(&self.den);
        lhs.cmp(&rhs)
    }

    pub fn lt(&self, other: &Rational) -> bool {
        self.compare(other) == Ordering::Less
    }

    pub fn gt(&self, other: &Rational) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Structural equality: the raw (num, den) pair, *not* value equality.
    /// `2/4` and `1/2` are unequal rationals in this system.
    pub fn same_representation(&self, other: &Rational) -> bool {
        self.num == other.num && self.den == other.den
    }

    /// Value equality (cross-multiplication), distinct from
    /// [`Rational::same_representation`]. Provided for callers that
    /// genuinely need mathematical equality (e.g. "β is zero" checks go
    /// through [`Rational::is_zero`] instead, never this).
    pub fn value_eq(&self, other: &Rational) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid rational literal {0:?}: expected \"num/den\"")]
pub struct ParseRationalError(String);

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (n, d) = s
            .split_once('/')
            .ok_or_else(|| ParseRationalError(s.to_string()))?;
        let num = BigInt::from_str(n.trim()).map_err(|_| ParseRationalError(s.to_string()))?;
        let den = BigUint::from_str(d.trim()).map_err(|_| ParseRationalError(s.to_string()))?;
        Rational::try_new(num, den).map_err(|_| ParseRationalError(s.to_string()))
    }
}

fn den_as_int(d: &BigUint) -> BigInt {
    BigInt::from(d.clone())
}

fn int_as_den(v: BigInt) -> BigUint {
    v.to_biguint().expect("denominator product must be non-negative")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: u64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn add_does_not_reduce() {
        // 2/4 + 5/7 + 0/1 = (2*7 + 5*4)/(4*7) = 34/28, not 17/14.
        let a = r(2, 4);
        let b = r(5, 7);
        let c = r(0, 1);
        let sum = a.add(&b).add(&c);
        assert_eq!(sum.num(), &BigInt::from(34));
        assert_eq!(sum.den(), &BigUint::from(28u32));
    }

    #[test]
    fn distinct_representations_stay_distinct() {
        let a = r(2, 4);
        let b = r(1, 2);
        assert!(!a.same_representation(&b));
        assert!(a.value_eq(&b));
    }

    #[test]
    fn division_by_zero_numerator_fails() {
        let a = r(1, 2);
        let zero = r(0, 1);
        assert!(a.div(&zero).is_err());
    }

    #[test]
    fn compare_cross_multiplies() {
        let a = r(1, 2);
        let b = r(2, 3);
        assert!(a.lt(&b));
    }

    #[test]
    fn floor_and_ceil_on_raw_pair() {
        let a = r(7, 2); // 3.5
        assert_eq!(a.floor(), BigInt::from(3));
        assert_eq!(a.ceil(), BigInt::from(4));
        let neg = r(-7, 2); // -3.5
        assert_eq!(neg.floor(), BigInt::from(-4));
        assert_eq!(neg.ceil(), BigInt::from(-3));
    }

    #[test]
    fn rat_mod_matches_definition() {
        let a = r(7, 2);
        let b = r(1, 1);
        // 7/2 mod 1/1 = 7/2 - floor(7/2)*1 = 7/2 - 3 = 1/2 (raw: (7*1-3*2)/(2*1))
        let m = a.rat_mod(&b).unwrap();
        assert_eq!(m.num(), &BigInt::from(1));
        assert_eq!(m.den(), &BigUint::from(2u32));
    }

    #[test]
    fn zero_denominator_is_fatal() {
        let res = Rational::try_new(BigInt::from(1), BigUint::from(0u32));
        assert!(res.is_err());
    }

    proptest::proptest! {
        #[test]
        fn add_never_divides_out_common_factors(a_n in -50i64..50, a_d in 1u64..20, b_n in -50i64..50, b_d in 1u64..20) {
            let a = Rational::from_i64(a_n, a_d);
            let b = Rational::from_i64(b_n, b_d);
            let sum = a.add(&b);
            // The raw product-of-denominators law must hold exactly.
            proptest::prop_assert_eq!(sum.den(), &(BigUint::from(a_d) * BigUint::from(b_d)));
        }
    }
}
