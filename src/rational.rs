//! Exact rational arithmetic over the extended reals.
//!
//! A [`Rational`] is either an exact `p/q` (reduced, `q > 0`, arbitrary
//! precision via [`num_bigint::BigInt`]) or one of the three sentinels
//! `+inf`, `-inf`, `NaN` that PDBM upper bounds need (`≤ +∞` encodes "no
//! bound yet"). Arithmetic follows the usual extended-real conventions:
//! `0 * ∞ = NaN`, `∞ - ∞ = NaN`. Ordering is total, not partial — `NaN` is
//! simply the largest value, `-∞` the smallest — so `Rational` can sit in
//! a `BTreeMap` key or be compared without special-casing incomparability.
//!
//! Small operands are interned: repeatedly constructing e.g. `0`, `1`, or
//! small guard constants should not re-allocate a `BigInt` each time. The
//! cache is a single process-wide `OnceLock<Mutex<HashMap<...>>>`, the same
//! shape as the teacher's `pcs.rs` SRS singleton.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, OnceLock};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// An exact rational, or an extended-real sentinel.
#[derive(Clone, Debug)]
pub enum Rational {
    /// A finite, fully reduced `p/q` with `q > 0`.
    Finite(BigRational),
    /// `+∞`.
    PosInf,
    /// `-∞`.
    NegInf,
    /// Not-a-number, produced by `0 * ∞` or `∞ - ∞`.
    NaN,
}

/// Operands with both numerator and denominator within this many bits are
/// eligible for interning; larger values are constructed fresh every time
/// so the cache cannot grow unboundedly from streaming large constants.
const INTERN_BIT_THRESHOLD: u32 = 24;

fn small_cache() -> &'static Mutex<HashMap<(i64, i64), BigRational>> {
    static CACHE: OnceLock<Mutex<HashMap<(i64, i64), BigRational>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn fits_small(x: i64) -> bool {
    (x.unsigned_abs()) < (1u64 << INTERN_BIT_THRESHOLD)
}

impl Rational {
    /// `0`.
    pub fn zero() -> Self {
        Rational::from_ratio(0, 1)
    }

    /// `1`.
    pub fn one() -> Self {
        Rational::from_ratio(1, 1)
    }

    /// `+∞`.
    pub fn pos_inf() -> Self {
        Rational::PosInf
    }

    /// `-∞`.
    pub fn neg_inf() -> Self {
        Rational::NegInf
    }

    /// `NaN`.
    pub fn nan() -> Self {
        Rational::NaN
    }

    /// `n` as an exact integer rational.
    pub fn from_int(n: i64) -> Self {
        Rational::from_ratio(n, 1)
    }

    /// `num / den`. `den == 0` yields a sentinel: `NaN` if `num` is also
    /// zero, otherwise `±∞` with the sign of `num`.
    pub fn from_ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return if num == 0 {
                Rational::NaN
            } else if num > 0 {
                Rational::PosInf
            } else {
                Rational::NegInf
            };
        }
        if fits_small(num) && fits_small(den) {
            let key = (num, den);
            let mut cache = small_cache().lock().unwrap();
            if let Some(r) = cache.get(&key) {
                return Rational::Finite(r.clone());
            }
            let r = BigRational::new(BigInt::from(num), BigInt::from(den));
            cache.insert(key, r.clone());
            return Rational::Finite(r);
        }
        Rational::Finite(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    /// `num / den` over arbitrary-precision operands.
    pub fn from_big_ratio(num: BigInt, den: BigInt) -> Self {
        if den.is_zero() {
            return if num.is_zero() {
                Rational::NaN
            } else if num.is_positive() {
                Rational::PosInf
            } else {
                Rational::NegInf
            };
        }
        Rational::Finite(BigRational::new(num, den))
    }

    /// Parse `"+inf"`, `"-inf"`, `"nan"`, a bare integer, or `"p/q"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+inf" | "inf" => return Some(Rational::PosInf),
            "-inf" => return Some(Rational::NegInf),
            "nan" | "NaN" => return Some(Rational::NaN),
            _ => {}
        }
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let n: BigInt = n.trim().parse().ok()?;
            let d: BigInt = d.trim().parse().ok()?;
            Some(Self::from_big_ratio(n, d))
        } else {
            let n: BigInt = s.parse().ok()?;
            Some(Rational::Finite(BigRational::new(n, BigInt::from(1))))
        }
    }

    /// `true` for the `NaN` sentinel.
    pub fn is_nan(&self) -> bool {
        matches!(self, Rational::NaN)
    }

    /// `true` for `+∞`.
    pub fn is_pos_inf(&self) -> bool {
        matches!(self, Rational::PosInf)
    }

    /// `true` for `-∞`.
    pub fn is_neg_inf(&self) -> bool {
        matches!(self, Rational::NegInf)
    }

    /// `true` for any finite value (never `NaN` or `±∞`).
    pub fn is_finite(&self) -> bool {
        matches!(self, Rational::Finite(_))
    }

    /// `true` iff this is the finite value `0`.
    pub fn is_zero(&self) -> bool {
        matches!(self, Rational::Finite(r) if r.is_zero())
    }

    /// `-self`.
    pub fn neg(&self) -> Rational {
        match self {
            Rational::Finite(r) => Rational::Finite(-r.clone()),
            Rational::PosInf => Rational::NegInf,
            Rational::NegInf => Rational::PosInf,
            Rational::NaN => Rational::NaN,
        }
    }

    /// `self + other`, with `∞ - ∞ = NaN`.
    pub fn add(&self, other: &Rational) -> Rational {
        use Rational::*;
        match (self, other) {
            (NaN, _) | (_, NaN) => NaN,
            (PosInf, NegInf) | (NegInf, PosInf) => NaN,
            (PosInf, _) | (_, PosInf) => PosInf,
            (NegInf, _) | (_, NegInf) => NegInf,
            (Finite(a), Finite(b)) => Finite(a + b),
        }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Rational) -> Rational {
        self.add(&other.neg())
    }

    /// `self * other`, with `0 * ∞ = NaN`.
    pub fn mul(&self, other: &Rational) -> Rational {
        use Rational::*;
        if self.is_nan() || other.is_nan() {
            return NaN;
        }
        match (self, other) {
            (Finite(a), Finite(b)) => Finite(a * b),
            _ => {
                let sa = Self::sign_of(self);
                let sb = Self::sign_of(other);
                if sa == 0 || sb == 0 {
                    NaN
                } else if sa == sb {
                    PosInf
                } else {
                    NegInf
                }
            }
        }
    }

    fn sign_of(r: &Rational) -> i32 {
        match r {
            Rational::PosInf => 1,
            Rational::NegInf => -1,
            Rational::Finite(f) => {
                if f.is_zero() {
                    0
                } else if f.is_positive() {
                    1
                } else {
                    -1
                }
            }
            Rational::NaN => 0,
        }
    }
}

/// Total rank used to order across sentinel kinds: `-∞ < finite < +∞ < NaN`.
fn rank(r: &Rational) -> u8 {
    match r {
        Rational::NegInf => 0,
        Rational::Finite(_) => 1,
        Rational::PosInf => 2,
        Rational::NaN => 3,
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Rational::Finite(a), Rational::Finite(b)) => a == b,
            (Rational::PosInf, Rational::PosInf) => true,
            (Rational::NegInf, Rational::NegInf) => true,
            (Rational::NaN, Rational::NaN) => true,
            _ => false,
        }
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Rational::Finite(a), Rational::Finite(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Rational::Finite(r) => {
                0u8.hash(state);
                r.numer().hash(state);
                r.denom().hash(state);
            }
            Rational::PosInf => 1u8.hash(state),
            Rational::NegInf => 2u8.hash(state),
            Rational::NaN => 3u8.hash(state),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rational::Finite(r) => {
                if r.is_integer() {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            Rational::PosInf => write!(f, "+inf"),
            Rational::NegInf => write!(f, "-inf"),
            Rational::NaN => write!(f, "NaN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_returns_structurally_equal_values() {
        let a = Rational::from_ratio(3, 4);
        let b = Rational::from_ratio(3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_denominator_sentinels() {
        assert!(Rational::from_ratio(0, 0).is_nan());
        assert!(Rational::from_ratio(1, 0).is_pos_inf());
        assert!(Rational::from_ratio(-1, 0).is_neg_inf());
    }

    #[test]
    fn extended_arithmetic() {
        assert!(Rational::pos_inf().add(&Rational::neg_inf()).is_nan());
        assert!(Rational::zero().mul(&Rational::pos_inf()).is_nan());
        assert_eq!(
            Rational::pos_inf().add(&Rational::from_int(5)),
            Rational::pos_inf()
        );
    }

    #[test]
    fn total_order() {
        let mut values = vec![
            Rational::nan(),
            Rational::from_int(-3),
            Rational::pos_inf(),
            Rational::neg_inf(),
            Rational::from_int(2),
        ];
        values.sort();
        assert!(values[0].is_neg_inf());
        assert_eq!(values[1], Rational::from_int(-3));
        assert_eq!(values[2], Rational::from_int(2));
        assert!(values[3].is_pos_inf());
        assert!(values[4].is_nan());
    }

    #[test]
    fn reduces_to_lowest_terms() {
        let r = Rational::from_ratio(4, 8);
        assert_eq!(r, Rational::from_ratio(1, 2));
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!(Rational::parse("3/4").unwrap(), Rational::from_ratio(3, 4));
        assert_eq!(Rational::parse("5").unwrap(), Rational::from_int(5));
        assert!(Rational::parse("+inf").unwrap().is_pos_inf());
    }
}
