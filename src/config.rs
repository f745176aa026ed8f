//! Engine-wide tunables threaded through the worklist algorithms.
//!
//! A small `Default`-able struct, following the teacher's plain
//! `ProveParams`/`VerifyParams` style rather than reaching for a
//! config-file crate: this engine is a library, not a process, so there is
//! no configuration *source* to parse, only a couple of safety knobs to
//! pass explicitly.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Safety cap on the number of full `(k, i, j)` sweeps `canonical`
    /// will run on a single work pair before giving up and abandoning it.
    /// The termination argument for Floyd–Warshall-style canonicalisation
    /// guarantees convergence well under this for any realistic PTA
    /// instance; the cap exists purely as a defensive bound against a
    /// misbehaving Oracle that never settles on `YES`/`NO`.
    pub max_canonical_sweeps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_canonical_sweeps: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_positive() {
        assert!(EngineConfig::default().max_canonical_sweeps > 0);
    }
}
