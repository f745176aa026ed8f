//! Affine linear expressions over symbolic parameters.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use crate::clock::Parameter;
use crate::rational::Rational;

/// `Σ cᵢ·pᵢ + k`: a sparse map from parameter to nonzero rational
/// coefficient, plus a constant term. Coefficients of zero are never
/// stored, so two expressions with the same parameters and constant are
/// always structurally equal regardless of construction order.
#[derive(Clone, Debug)]
pub struct LinearExpression {
    coeffs: BTreeMap<Parameter, Rational>,
    constant: Rational,
}

impl LinearExpression {
    /// The constant expression `k`.
    pub fn of_const(k: Rational) -> Self {
        Self {
            coeffs: BTreeMap::new(),
            constant: k,
        }
    }

    /// The expression `p` (coefficient `1`, constant `0`).
    pub fn of_param(p: Parameter) -> Self {
        Self::of_param_coeff(p, Rational::one())
    }

    /// The expression `c·p` (constant `0`).
    pub fn of_param_coeff(p: Parameter, c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(p, c);
        }
        Self {
            coeffs,
            constant: Rational::zero(),
        }
    }

    /// The constant term `k`.
    pub fn constant(&self) -> &Rational {
        &self.constant
    }

    /// Iterate the nonzero `(parameter, coefficient)` pairs.
    pub fn coeffs(&self) -> impl Iterator<Item = (&Parameter, &Rational)> {
        self.coeffs.iter()
    }

    /// `true` iff this expression has no parameter terms.
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        let mut coeffs = self.coeffs.clone();
        for (p, c) in other.coeffs.iter() {
            let entry = coeffs.entry(*p).or_insert_with(Rational::zero);
            let sum = entry.add(c);
            if sum.is_zero() {
                coeffs.remove(p);
            } else {
                coeffs.insert(*p, sum);
            }
        }
        Self {
            coeffs,
            constant: self.constant.add(&other.constant),
        }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        let coeffs = self.coeffs.iter().map(|(p, c)| (*p, c.neg())).collect();
        Self {
            coeffs,
            constant: self.constant.neg(),
        }
    }

    /// Evaluate at a concrete parameter valuation; parameters this
    /// expression mentions but `valuation` omits contribute `0`.
    pub fn evaluate(&self, valuation: &HashMap<Parameter, Rational>) -> Rational {
        let mut acc = self.constant.clone();
        for (p, c) in self.coeffs.iter() {
            let v = valuation.get(p).cloned().unwrap_or_else(Rational::zero);
            acc = acc.add(&c.mul(&v));
        }
        acc
    }
}

impl PartialEq for LinearExpression {
    fn eq(&self, other: &Self) -> bool {
        self.constant == other.constant && self.coeffs == other.coeffs
    }
}

impl Eq for LinearExpression {}

impl PartialOrd for LinearExpression {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LinearExpression {
    fn cmp(&self, other: &Self) -> Ordering {
        self.constant.cmp(&other.constant).then_with(|| {
            let a: Vec<_> = self.coeffs.iter().collect();
            let b: Vec<_> = other.coeffs.iter().collect();
            a.cmp(&b)
        })
    }
}

impl Hash for LinearExpression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.constant.hash(state);
        for (p, c) in self.coeffs.iter() {
            p.hash(state);
            c.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_cancels_opposite_coefficients() {
        let p = Parameter::new();
        let a = LinearExpression::of_param(p);
        let b = LinearExpression::of_param_coeff(p, Rational::from_int(-1));
        let sum = a.add(&b);
        assert!(sum.is_constant());
        assert_eq!(*sum.constant(), Rational::zero());
    }

    #[test]
    fn evaluate_substitutes_parameters() {
        let p = Parameter::new();
        let expr =
            LinearExpression::of_param_coeff(p, Rational::from_int(3)).add(&LinearExpression::of_const(Rational::from_int(2)));
        let mut val = HashMap::new();
        val.insert(p, Rational::from_int(4));
        assert_eq!(expr.evaluate(&val), Rational::from_int(14));
    }

    #[test]
    fn equality_is_order_independent() {
        let p = Parameter::new();
        let q = Parameter::new();
        let a = LinearExpression::of_param(p).add(&LinearExpression::of_param(q));
        let b = LinearExpression::of_param(q).add(&LinearExpression::of_param(p));
        assert_eq!(a, b);
    }
}
