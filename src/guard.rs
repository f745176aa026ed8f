//! Atomic clock-difference guards: `c_i - c_j ⋈ E`.

use crate::clock::Clock;
use crate::error::PdbmError;
use crate::linear_expr::LinearExpression;
use crate::rational::Rational;
use crate::relation::RelationType;

/// `c_i - c_j ⋈ E`, canonicalised on construction so `id(c_i) <= id(c_j)`
/// (swapping operands negates `E` and flips `⋈` otherwise).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicGuard {
    left: Clock,
    right: Clock,
    expr: LinearExpression,
    rel: RelationType,
}

impl AtomicGuard {
    /// Build `left - right ⋈ expr`.
    ///
    /// # Errors
    /// [`PdbmError::ContradictorySelfGuard`] if `left == right` and the
    /// expression is a constant `k` for which `0 ⋈ k` is false (e.g.
    /// `x - x < 0`). A self-guard with a non-constant expression is left
    /// unchecked here — its satisfiability depends on the parameter region
    /// and is decided later by the Oracle.
    pub fn of(
        left: Clock,
        rel: RelationType,
        expr: LinearExpression,
        right: Clock,
    ) -> Result<Self, PdbmError> {
        let (left, right, rel, expr) = if left.raw_id() > right.raw_id() {
            (right, left, rel.flip(), expr.negate())
        } else {
            (left, right, rel, expr)
        };
        if left == right && expr.is_constant() {
            let k = expr.constant();
            let holds = match rel {
                RelationType::Lt => *k > Rational::zero(),
                RelationType::Le => *k >= Rational::zero(),
                RelationType::Gt => *k < Rational::zero(),
                RelationType::Ge => *k <= Rational::zero(),
            };
            if !holds {
                return Err(PdbmError::ContradictorySelfGuard { rel });
            }
        }
        Ok(Self {
            left,
            right,
            expr,
            rel,
        })
    }

    /// `left - right < expr`.
    pub fn less_than(left: Clock, expr: LinearExpression, right: Clock) -> Result<Self, PdbmError> {
        Self::of(left, RelationType::Lt, expr, right)
    }

    /// `left - right <= expr`.
    pub fn less_equal(left: Clock, expr: LinearExpression, right: Clock) -> Result<Self, PdbmError> {
        Self::of(left, RelationType::Le, expr, right)
    }

    /// `left - right > expr`.
    pub fn greater_than(left: Clock, expr: LinearExpression, right: Clock) -> Result<Self, PdbmError> {
        Self::of(left, RelationType::Gt, expr, right)
    }

    /// `left - right >= expr`.
    pub fn greater_equal(
        left: Clock,
        expr: LinearExpression,
        right: Clock,
    ) -> Result<Self, PdbmError> {
        Self::of(left, RelationType::Ge, expr, right)
    }

    /// `¬(left - right ⋈ expr)`.
    pub fn negate(&self) -> Self {
        Self {
            left: self.left,
            right: self.right,
            expr: self.expr.clone(),
            rel: self.rel.negate(),
        }
    }

    /// Rewrite as an upper-bound cell: `(row, col, E, ≺)` with `≺ ∈ {<, ≤}`
    /// such that `row - col ≺ E`, flipping operands if this guard was
    /// constructed with `>`/`>=`.
    pub fn as_upper_bound(&self) -> (Clock, Clock, LinearExpression, RelationType) {
        if self.rel.is_upper() {
            (self.left, self.right, self.expr.clone(), self.rel)
        } else {
            (self.right, self.left, self.expr.negate(), self.rel.flip())
        }
    }

    pub fn left(&self) -> Clock {
        self.left
    }

    pub fn right(&self) -> Clock {
        self.right
    }

    pub fn expr(&self) -> &LinearExpression {
        &self.expr
    }

    pub fn relation(&self) -> RelationType {
        self.rel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_operands_to_canonical_order() {
        let a = Clock::new();
        let b = Clock::new();
        let (lo, hi) = if a.raw_id() < b.raw_id() { (a, b) } else { (b, a) };
        let g = AtomicGuard::of(
            hi,
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(5)),
            lo,
        )
        .unwrap();
        assert_eq!(g.left(), lo);
        assert_eq!(g.right(), hi);
        assert_eq!(g.relation(), RelationType::Gt);
    }

    #[test]
    fn contradictory_self_guard_is_rejected() {
        let c = Clock::new();
        let err = AtomicGuard::of(
            c,
            RelationType::Lt,
            LinearExpression::of_const(Rational::zero()),
            c,
        );
        assert!(err.is_err());
    }

    #[test]
    fn tautological_self_guard_is_permitted() {
        let c = Clock::new();
        let ok = AtomicGuard::of(
            c,
            RelationType::Le,
            LinearExpression::of_const(Rational::zero()),
            c,
        );
        assert!(ok.is_ok());
    }
}
