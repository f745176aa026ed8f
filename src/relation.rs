//! The four clock-difference comparisons.

/// `c_i - c_j ⋈ E`: the relation used by atomic guards and PDBM cells.
///
/// PDBM matrix cells store only upper bounds (`Lt`/`Le`); `Gt`/`Ge` arise
/// transiently while normalising a guard before it is flipped into upper-
/// bound form (see [`crate::guard::AtomicGuard::as_upper_bound`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationType {
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelationType {
    /// Logical negation: `¬(x < y) = x >= y`, etc.
    pub fn negate(self) -> Self {
        match self {
            RelationType::Lt => RelationType::Ge,
            RelationType::Le => RelationType::Gt,
            RelationType::Gt => RelationType::Le,
            RelationType::Ge => RelationType::Lt,
        }
    }

    /// Swap operand order: `a ⋈ b` becomes `b flip(⋈) a`.
    pub fn flip(self) -> Self {
        match self {
            RelationType::Lt => RelationType::Gt,
            RelationType::Gt => RelationType::Lt,
            RelationType::Le => RelationType::Ge,
            RelationType::Ge => RelationType::Le,
        }
    }

    /// `true` for `Lt`/`Gt`.
    pub fn is_strict(self) -> bool {
        matches!(self, RelationType::Lt | RelationType::Gt)
    }

    /// `true` for `Lt`/`Le` (an upper-bound relation).
    pub fn is_upper(self) -> bool {
        matches!(self, RelationType::Lt | RelationType::Le)
    }

    /// Conjunction of two relations that point the same direction (both
    /// upper-bound or both lower-bound): the stricter of the two.
    ///
    /// # Panics
    /// Panics if `self` and `other` point in opposing directions — PDBM
    /// cells only ever conjoin same-direction bounds, so this signals a
    /// construction bug rather than a reachable runtime condition.
    pub fn and(self, other: Self) -> Self {
        assert_eq!(
            self.is_upper(),
            other.is_upper(),
            "RelationType::and on opposing directions ({self:?}, {other:?})"
        );
        if self.is_strict() || other.is_strict() {
            if self.is_upper() {
                RelationType::Lt
            } else {
                RelationType::Gt
            }
        } else if self.is_upper() {
            RelationType::Le
        } else {
            RelationType::Ge
        }
    }

    /// Unicode comparison symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            RelationType::Lt => "<",
            RelationType::Le => "≤",
            RelationType::Gt => ">",
            RelationType::Ge => "≥",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
