//! Clock and Parameter identity
//!
//! Opaque, totally-ordered identities allocated from a process-wide
//! monotonic counter, one counter per kind. Mirrors the teacher's
//! newtype-index style (`BlockIdx`/`RowIdx`/`RegIdx` in the original
//! streaming module this crate grew out of): a thin `Copy` wrapper around
//! an integer, ordered and hashed structurally, with no behaviour beyond
//! identity.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CLOCK_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);

/// A clock identity. Comparable and hashable by identity only.
///
/// The distinguished [`Clock::ZERO`] is fixed at 0 and always occupies
/// index 0 of any [`crate::pdbm::Pdbm`]; it is never allocated by
/// [`Clock::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clock(u64);

impl Clock {
    /// The distinguished zero clock `x0`.
    pub const ZERO: Clock = Clock(0);

    /// Allocate a fresh, process-wide unique clock.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Clock(NEXT_CLOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// `true` iff this is [`Clock::ZERO`].
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub(crate) fn raw_id(self) -> u64 {
        self.0
    }
}

/// A parameter identity. Comparable and hashable by identity only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter(u64);

impl Parameter {
    /// Allocate a fresh, process-wide unique parameter.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Parameter(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn raw_id(self) -> u64 {
        self.0
    }
}
