//! Crate-wide error taxonomy.
//!
//! These are all *construction-time* programming errors: invalid
//! assembly of a data-model value. They are never produced by sound input
//! flowing from an [`crate::oracle::Oracle`]; they signal a caller bug and
//! are reported eagerly rather than threaded through the split-producing
//! result streams. An `UNKNOWN` Oracle answer is not an error at all — per
//! the engine's policy it silently prunes the affected work pair, logged
//! at `warn` level, never raised as a [`PdbmError`]. Oracle *transport*
//! failures (the solver process died, a timeout fired) are the caller's
//! own error type, returned through `Result<_, O::Error>` from
//! [`crate::oracle::Oracle`] methods and propagated with `?` — this crate
//! never wraps them, so callers keep their original error context.

use crate::rational::Rational;
use crate::relation::RelationType;

/// A data-model construction error.
#[derive(Debug, thiserror::Error)]
pub enum PdbmError {
    /// A guard `c - c ⋈ k` was constructed with a self-difference that is
    /// never satisfied (e.g. `x - x < 0`).
    #[error("self-guard x - x {rel} 0 is contradictory")]
    ContradictorySelfGuard { rel: RelationType },

    /// A clock passed to an operation does not belong to the PDBM's clock
    /// set.
    #[error("clock is not a member of this PDBM's clock set")]
    UnknownClock,

    /// `reset` was asked to reset the distinguished zero clock.
    #[error("cannot reset the zero clock x0")]
    ResetZeroClock,

    /// `reset` was given a value that is not a non-negative finite
    /// rational.
    #[error("reset value must be a non-negative finite rational (got {value})")]
    BadResetValue { value: Rational },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_embed_offending_values() {
        let e = PdbmError::BadResetValue {
            value: Rational::from_int(-1),
        };
        assert!(e.to_string().contains('-'));
        let e = PdbmError::ContradictorySelfGuard {
            rel: RelationType::Lt,
        };
        assert!(e.to_string().contains('<'));
    }
}
