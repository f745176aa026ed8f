//! `CPDBM`: a thin immutable facade pairing a [`ConstraintSet`] with a
//! [`Pdbm`], giving every operation a "compose, then canonicalise, then
//! drop empties" convenience form.

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::constraint::ConstraintSet;
use crate::error::PdbmError;
use crate::guard::AtomicGuard;
use crate::oracle::Oracle;
use crate::pdbm::Pdbm;
use crate::rational::Rational;

/// A `(ConstraintSet, Pdbm)` pair, the unit of work the split-producing
/// operations pass around.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cpdbm {
    constraints: ConstraintSet,
    pdbm: Pdbm,
}

impl Cpdbm {
    /// Pair a constraint set with a matrix directly, with no filtering.
    pub fn new(constraints: ConstraintSet, pdbm: Pdbm) -> Self {
        Self { constraints, pdbm }
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn pdbm(&self) -> &Pdbm {
        &self.pdbm
    }

    /// `createInitial`: the initial zone over `clocks`, conjoined with
    /// `initial_constraints` and canonicalised.
    pub fn create_initial<O: Oracle>(
        clocks: impl IntoIterator<Item = Clock>,
        initial_constraints: ConstraintSet,
        oracle: &O,
        config: &EngineConfig,
    ) -> Result<Vec<Self>, O::Error> {
        let pdbm = Pdbm::initial(clocks);
        Self::new(initial_constraints, pdbm).canonical(oracle, config)
    }

    /// `addGuard`, filtered of empties.
    pub fn add_guard<O: Oracle>(&self, guard: &AtomicGuard, oracle: &O) -> Result<Vec<Self>, O::Error> {
        let raw = self.pdbm.add_guard(guard, &self.constraints, oracle)?;
        wrap_filter_empty(raw, oracle)
    }

    /// `canonical`, filtered of empties.
    pub fn canonical<O: Oracle>(&self, oracle: &O, config: &EngineConfig) -> Result<Vec<Self>, O::Error> {
        let raw = self.pdbm.canonical(&self.constraints, oracle, config)?;
        wrap_filter_empty(raw, oracle)
    }

    /// `delay`.
    pub fn delay(&self) -> Self {
        Self::new(self.constraints.clone(), self.pdbm.delay())
    }

    /// `reset`.
    pub fn reset(&self, resets: &[(Clock, Rational)]) -> Result<Self, PdbmError> {
        Ok(Self::new(self.constraints.clone(), self.pdbm.reset(resets)?))
    }

    /// `isEmpty`.
    pub fn is_empty<O: Oracle>(&self, oracle: &O) -> Result<bool, O::Error> {
        self.pdbm.is_empty(&self.constraints, oracle)
    }

    /// `addGuard` followed immediately by `canonical`.
    pub fn add_guard_and_canonical<O: Oracle>(
        &self,
        guard: &AtomicGuard,
        oracle: &O,
        config: &EngineConfig,
    ) -> Result<Vec<Self>, O::Error> {
        let mut out = Vec::new();
        for mid in self.add_guard(guard, oracle)? {
            out.extend(mid.canonical(oracle, config)?);
        }
        Ok(out)
    }

    /// `delay` followed immediately by `canonical`.
    pub fn delay_and_canonical<O: Oracle>(&self, oracle: &O, config: &EngineConfig) -> Result<Vec<Self>, O::Error> {
        self.delay().canonical(oracle, config)
    }

    /// `reset` followed immediately by `canonical`.
    pub fn reset_and_canonical<O: Oracle>(
        &self,
        resets: &[(Clock, Rational)],
        oracle: &O,
        config: &EngineConfig,
    ) -> Result<Vec<Self>, O::Error> {
        self.reset(resets)?.canonical(oracle, config)
    }
}

fn wrap_filter_empty<O: Oracle>(
    raw: Vec<(ConstraintSet, Pdbm)>,
    oracle: &O,
) -> Result<Vec<Cpdbm>, O::Error> {
    let mut out = Vec::with_capacity(raw.len());
    for (c, d) in raw {
        if !d.is_empty(&c, oracle)? {
            out.push(Cpdbm::new(c, d));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivial_oracle::TrivialOracle;

    #[test]
    fn create_initial_is_non_empty() {
        let c = Clock::new();
        let oracle = TrivialOracle;
        let config = EngineConfig::default();
        let out = Cpdbm::create_initial([c], ConstraintSet::empty(), &oracle, &config).unwrap();
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_empty(&oracle).unwrap());
    }
}
