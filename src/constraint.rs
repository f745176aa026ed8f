//! A single linear inequality over parameters, and conjunctions of them.

use std::collections::{BTreeSet, HashMap};

use crate::linear_expr::LinearExpression;
use crate::rational::Rational;
use crate::relation::RelationType;

/// `left ⋈ right`, normalised on construction to `E ⋈ 0` where
/// `E = left - right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterConstraint {
    expr: LinearExpression,
    rel: RelationType,
}

impl ParameterConstraint {
    /// Build `left ⋈ right`, normalised to `(left - right) ⋈ 0`.
    pub fn of(left: LinearExpression, rel: RelationType, right: LinearExpression) -> Self {
        Self {
            expr: left.sub(&right),
            rel,
        }
    }

    /// Build directly from an already-normalised `expr ⋈ 0`.
    pub fn from_normalized(expr: LinearExpression, rel: RelationType) -> Self {
        Self { expr, rel }
    }

    /// The normalised left-hand side `E` of `E ⋈ 0`.
    pub fn expr(&self) -> &LinearExpression {
        &self.expr
    }

    /// The relation `⋈`.
    pub fn relation(&self) -> RelationType {
        self.rel
    }

    /// `¬(E ⋈ 0)`.
    pub fn negate(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            rel: self.rel.negate(),
        }
    }

    /// `true` when this constraint holds for every parameter valuation: its
    /// expression has no parameter terms and the constant alone satisfies
    /// `k ⋈ 0`.
    pub fn is_trivial_tautology(&self) -> bool {
        self.expr.is_constant() && Self::holds_constant(self.expr.constant(), self.rel)
    }

    /// `true` when this constraint holds for no parameter valuation: its
    /// expression has no parameter terms and the constant fails `k ⋈ 0`.
    pub fn is_trivial_contradiction(&self) -> bool {
        self.expr.is_constant() && !Self::holds_constant(self.expr.constant(), self.rel)
    }

    /// Evaluate at a concrete parameter valuation.
    pub fn holds_at(&self, valuation: &HashMap<crate::clock::Parameter, Rational>) -> bool {
        Self::holds_constant(&self.expr.evaluate(valuation), self.rel)
    }

    fn holds_constant(k: &Rational, rel: RelationType) -> bool {
        let zero = Rational::zero();
        match rel {
            RelationType::Lt => *k < zero,
            RelationType::Le => *k <= zero,
            RelationType::Gt => *k > zero,
            RelationType::Ge => *k >= zero,
        }
    }
}

/// An ordered conjunction of [`ParameterConstraint`]s. The empty set is the
/// tautology `⊤`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConstraintSet {
    constraints: BTreeSet<ParameterConstraint>,
}

impl ConstraintSet {
    /// The empty conjunction, `⊤`.
    pub fn empty() -> Self {
        Self {
            constraints: BTreeSet::new(),
        }
    }

    /// Alias for [`ConstraintSet::empty`].
    pub fn tautology() -> Self {
        Self::empty()
    }

    /// The singleton conjunction `{c}` (or `⊤` if `c` is a trivial
    /// tautology, keeping the set free of redundant entries).
    pub fn of(c: ParameterConstraint) -> Self {
        Self::empty().and(&c)
    }

    /// `self ∧ other`.
    pub fn and(&self, other: &ParameterConstraint) -> Self {
        let mut out = self.clone();
        if !other.is_trivial_tautology() {
            out.constraints.insert(other.clone());
        }
        out
    }

    /// `self ∧ other` for a whole set.
    pub fn and_set(&self, other: &ConstraintSet) -> Self {
        let mut out = self.clone();
        for c in other.constraints.iter() {
            if !c.is_trivial_tautology() {
                out.constraints.insert(c.clone());
            }
        }
        out
    }

    /// `true` for the tautological set `⊤`.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of constraints in the conjunction.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Iterate the conjuncts.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterConstraint> {
        self.constraints.iter()
    }

    /// Opt-in syntactic subsumption: for constraints that share the same
    /// normalised expression and point the same direction, keep only the
    /// stricter one. Never applied implicitly by [`ConstraintSet::and`] —
    /// this only shrinks representation size, it cannot change semantics.
    pub fn simplify(&self) -> Self {
        let mut by_key: HashMap<(LinearExpression, bool), RelationType> = HashMap::new();
        for c in self.constraints.iter() {
            let key = (c.expr().clone(), c.relation().is_upper());
            by_key
                .entry(key)
                .and_modify(|r| *r = r.and(c.relation()))
                .or_insert(c.relation());
        }
        let mut out = Self::empty();
        for ((expr, _), rel) in by_key {
            out.constraints
                .insert(ParameterConstraint::from_normalized(expr, rel));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Parameter;

    #[test]
    fn trivial_tautology_and_contradiction() {
        let zero = LinearExpression::of_const(Rational::zero());
        let one = LinearExpression::of_const(Rational::one());
        let taut = ParameterConstraint::of(zero.clone(), RelationType::Le, zero.clone());
        assert!(taut.is_trivial_tautology());
        let contra = ParameterConstraint::of(zero, RelationType::Gt, one);
        assert!(contra.is_trivial_contradiction());
    }

    #[test]
    fn constraint_set_drops_tautologies() {
        let zero = LinearExpression::of_const(Rational::zero());
        let taut = ParameterConstraint::of(zero.clone(), RelationType::Le, zero);
        let set = ConstraintSet::of(taut);
        assert!(set.is_empty());
    }

    #[test]
    fn simplify_keeps_stricter_same_direction_bound() {
        let p = Parameter::new();
        let expr = LinearExpression::of_param(p);
        let c1 = ParameterConstraint::from_normalized(expr.clone(), RelationType::Le);
        let c2 = ParameterConstraint::from_normalized(expr, RelationType::Lt);
        let set = ConstraintSet::of(c1).and(&c2).simplify();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().relation(), RelationType::Lt);
    }
}
