//! A Parametric Difference-Bound Matrix (PDBM) engine: an immutable data
//! structure and a set of split-producing operations for computing the
//! symbolic reachable state space of Parametric Timed Automata.
//!
//! The five core operations — [`pdbm::Pdbm::add_guard`],
//! [`pdbm::Pdbm::canonical`], [`pdbm::Pdbm::delay`], [`pdbm::Pdbm::reset`],
//! [`pdbm::Pdbm::is_empty`] — and their [`cpdbm::Cpdbm`]-level
//! compose-then-canonicalise counterparts never resolve a parametric
//! question themselves: whenever a zone's shape depends on *which* region
//! of parameter space a caller is in, they hand the decision to an
//! external [`oracle::Oracle`] and return every resulting case as its own
//! `(ConstraintSet, Pdbm)` work pair. This crate is a library, not a
//! process: it has no CLI, no persistence, and performs no I/O of its own
//! beyond the `tracing` events it emits for the worklist algorithms.
//!
//! All data types here are immutable after construction; every operation
//! returns new values rather than mutating in place, so independent work
//! pairs can be driven through these APIs from multiple threads at once
//! without synchronisation, as long as each thread holds its own `Oracle`
//! handle (or the `Oracle` implementation is itself internally
//! thread-safe).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod clock;
pub mod config;
pub mod constraint;
pub mod cpdbm;
pub mod error;
pub mod guard;
pub mod linear_expr;
pub mod oracle;
pub mod pdbm;
pub mod rational;
pub mod relation;
pub mod trivial_oracle;

pub use clock::{Clock, Parameter};
pub use config::EngineConfig;
pub use constraint::{ConstraintSet, ParameterConstraint};
pub use cpdbm::Cpdbm;
pub use error::PdbmError;
pub use guard::AtomicGuard;
pub use linear_expr::LinearExpression;
pub use oracle::{Coverage, Oracle, SatResult};
pub use pdbm::{Cell, Pdbm};
pub use rational::Rational;
pub use relation::RelationType;
pub use trivial_oracle::TrivialOracle;
