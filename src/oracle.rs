//! The external Oracle contract.
//!
//! An `Oracle` is an SMT decision procedure over linear real arithmetic,
//! with every parameter fixed non-negative, the zero clock fixed at `0`,
//! and every other clock non-negative. This engine never implements an
//! SMT solver itself — it only consumes one through this trait. A
//! reference, non-production implementation sufficient for this crate's
//! own tests lives in [`crate::trivial_oracle::TrivialOracle`].

use crate::constraint::{ConstraintSet, ParameterConstraint};
use crate::pdbm::Pdbm;

/// Satisfiability verdict for [`Oracle::is_sat`] and
/// [`Oracle::is_sat_zone`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SatResult {
    Sat,
    Unsat,
    /// The solver could not decide (e.g. it timed out).
    Unknown,
}

/// Coverage verdict for [`Oracle::check_coverage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// `C ⊨ c`.
    Yes,
    /// `C ⊨ ¬c`.
    No,
    /// Both `C ∧ c` and `C ∧ ¬c` are satisfiable.
    Split,
    /// Neither could be decided.
    Unknown,
}

/// An SMT decision procedure over linear real arithmetic.
///
/// Implementations are expected to hold one solver context per thread and
/// be referentially transparent for a fixed `(parameters, clocks)`
/// universe, so that independent work pairs can be decided concurrently.
/// Calls may fail with a caller-defined transport error `E`; the engine
/// re-raises such failures with `?` and never inspects them.
pub trait Oracle {
    /// The error type for solver transport failures (process died, RPC
    /// failed, timeout exceeded its own retry budget, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Is `constraints` satisfiable over the parameter space alone?
    fn is_sat(&self, constraints: &ConstraintSet) -> Result<SatResult, Self::Error>;

    /// Does `constraints` entail `candidate`, its negation, or neither?
    fn check_coverage(
        &self,
        candidate: &ParameterConstraint,
        constraints: &ConstraintSet,
    ) -> Result<Coverage, Self::Error>;

    /// Is `constraints` conjoined with every clock-difference bound in
    /// `dbm` jointly satisfiable? Used by [`Pdbm::is_empty`].
    fn is_sat_zone(
        &self,
        constraints: &ConstraintSet,
        dbm: &Pdbm,
    ) -> Result<SatResult, Self::Error>;
}
