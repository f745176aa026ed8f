//! A minimal, self-contained reference [`Oracle`] backed by exact
//! Fourier–Motzkin elimination over [`Rational`] coefficients.
//!
//! This is **not** a general-purpose SMT solver: a real Oracle is an
//! external collaborator this engine only ever consumes, never implements.
//! `TrivialOracle` exists purely so this crate's own tests and demo binary
//! are self-contained without an external SMT dependency. Fourier–Motzkin
//! elimination is a complete decision procedure for conjunctions of linear
//! inequalities over the rationals, so it decides every query this crate
//! can pose — it is just exponential in the variable count in the worst
//! case, which is fine for the small zones exercised here and nowhere near
//! good enough for a realistic PTA instance.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::clock::{Clock, Parameter};
use crate::constraint::{ConstraintSet, ParameterConstraint};
use crate::oracle::{Coverage, Oracle, SatResult};
use crate::pdbm::{Cell, Pdbm};
use crate::rational::Rational;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Var {
    Param(Parameter),
    Clock(Clock),
}

/// `Σ cᵥ·v + k ⋈ 0`, normalised to the form `expr >= 0` (`strict = false`)
/// or `expr > 0` (`strict = true`).
#[derive(Clone, Debug)]
struct Atom {
    coeffs: BTreeMap<Var, Rational>,
    constant: Rational,
    strict: bool,
}

impl Atom {
    fn coeff(&self, v: Var) -> Rational {
        self.coeffs.get(&v).cloned().unwrap_or_else(Rational::zero)
    }

    fn holds_as_constant(&self) -> bool {
        if self.strict {
            self.constant > Rational::zero()
        } else {
            self.constant >= Rational::zero()
        }
    }

    fn nonneg(v: Var) -> Atom {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(v, Rational::one());
        Atom {
            coeffs,
            constant: Rational::zero(),
            strict: false,
        }
    }

    fn negate(&self) -> Atom {
        let coeffs = self.coeffs.iter().map(|(v, c)| (*v, c.neg())).collect();
        Atom {
            coeffs,
            constant: self.constant.neg(),
            strict: !self.strict,
        }
    }

    fn from_parameter_constraint(pc: &ParameterConstraint) -> Atom {
        use crate::relation::RelationType;
        let (strict, flip_sign) = match pc.relation() {
            RelationType::Gt => (true, false),
            RelationType::Ge => (false, false),
            RelationType::Lt => (true, true),
            RelationType::Le => (false, true),
        };
        let mut coeffs = BTreeMap::new();
        for (p, c) in pc.expr().coeffs() {
            let c = if flip_sign { c.neg() } else { c.clone() };
            if !c.is_zero() {
                coeffs.insert(Var::Param(*p), c);
            }
        }
        let constant = if flip_sign {
            pc.expr().constant().neg()
        } else {
            pc.expr().constant().clone()
        };
        Atom {
            coeffs,
            constant,
            strict,
        }
    }
}

fn acc_add(map: &mut BTreeMap<Var, Rational>, v: Var, delta: Rational) {
    let cur = map.get(&v).cloned().unwrap_or_else(Rational::zero);
    let sum = cur.add(&delta);
    if sum.is_zero() {
        map.remove(&v);
    } else {
        map.insert(v, sum);
    }
}

fn cell_is_trivial(cell: &Cell) -> bool {
    cell.expr.is_constant() && cell.expr.constant().is_pos_inf()
}

/// The atom for matrix cell `ci - cj ≺ E`, rewritten as `E - ci + cj ≥/> 0`.
fn atom_for_cell(ci: Clock, cj: Clock, cell: &Cell) -> Atom {
    let mut coeffs: BTreeMap<Var, Rational> = BTreeMap::new();
    for (p, c) in cell.expr.coeffs() {
        if !c.is_zero() {
            coeffs.insert(Var::Param(*p), c.clone());
        }
    }
    if !ci.is_zero() {
        acc_add(&mut coeffs, Var::Clock(ci), Rational::from_int(-1));
    }
    if !cj.is_zero() {
        acc_add(&mut coeffs, Var::Clock(cj), Rational::one());
    }
    Atom {
        coeffs,
        constant: cell.expr.constant().clone(),
        strict: cell.rel.is_strict(),
    }
}

fn scale_and_add(a: &Atom, fa: &Rational, b: &Atom, fb: &Rational) -> Atom {
    let mut coeffs: BTreeMap<Var, Rational> = BTreeMap::new();
    for (v, c) in a.coeffs.iter() {
        acc_add(&mut coeffs, *v, fa.mul(c));
    }
    for (v, c) in b.coeffs.iter() {
        acc_add(&mut coeffs, *v, fb.mul(c));
    }
    let constant = fa.mul(&a.constant).add(&fb.mul(&b.constant));
    Atom {
        coeffs,
        constant,
        strict: a.strict || b.strict,
    }
}

/// Eliminate every variable in `vars` from `atoms` (each `expr >= 0` or
/// `expr > 0`), returning whether the remaining constant system holds.
fn is_satisfiable(mut atoms: Vec<Atom>, vars: &[Var]) -> bool {
    for &v in vars {
        let mut lowers: Vec<(Atom, Rational)> = Vec::new();
        let mut uppers: Vec<(Atom, Rational)> = Vec::new();
        let mut rest: Vec<Atom> = Vec::new();
        for a in atoms {
            let c = a.coeff(v);
            if c.is_zero() {
                rest.push(a);
            } else if c > Rational::zero() {
                lowers.push((a, c));
            } else {
                uppers.push((a, c));
            }
        }
        if lowers.is_empty() || uppers.is_empty() {
            atoms = rest;
            continue;
        }
        for (la, lc) in &lowers {
            for (ua, uc) in &uppers {
                let neg_uc = uc.neg();
                rest.push(scale_and_add(la, &neg_uc, ua, lc));
            }
        }
        atoms = rest;
    }
    atoms.iter().all(|a| {
        debug_assert!(
            a.coeffs.is_empty(),
            "is_satisfiable: variable elimination left an unconstrained variable"
        );
        a.holds_as_constant()
    })
}

/// A stateless reference [`Oracle`] backed by exact Fourier–Motzkin
/// elimination. See the module docs for why this is a test/demo aid, not a
/// production SMT backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrivialOracle;

impl TrivialOracle {
    fn is_sat_impl(&self, constraints: &ConstraintSet) -> bool {
        let mut vars: BTreeSet<Var> = BTreeSet::new();
        let mut atoms: Vec<Atom> = Vec::new();
        for pc in constraints.iter() {
            let atom = Atom::from_parameter_constraint(pc);
            vars.extend(atom.coeffs.keys().copied());
            atoms.push(atom);
        }
        let vars_vec: Vec<Var> = vars.iter().copied().collect();
        atoms.extend(vars_vec.iter().map(|v| Atom::nonneg(*v)));
        is_satisfiable(atoms, &vars_vec)
    }

    fn check_coverage_impl(
        &self,
        candidate: &ParameterConstraint,
        constraints: &ConstraintSet,
    ) -> Coverage {
        let mut vars: BTreeSet<Var> = BTreeSet::new();
        let mut base: Vec<Atom> = Vec::new();
        for pc in constraints.iter() {
            let atom = Atom::from_parameter_constraint(pc);
            vars.extend(atom.coeffs.keys().copied());
            base.push(atom);
        }
        let c_atom = Atom::from_parameter_constraint(candidate);
        vars.extend(c_atom.coeffs.keys().copied());
        let not_c_atom = c_atom.negate();

        let vars_vec: Vec<Var> = vars.iter().copied().collect();
        let nonneg: Vec<Atom> = vars_vec.iter().map(|v| Atom::nonneg(*v)).collect();

        let mut with_not_c = base.clone();
        with_not_c.push(not_c_atom);
        with_not_c.extend(nonneg.clone());
        if !is_satisfiable(with_not_c, &vars_vec) {
            return Coverage::Yes;
        }

        let mut with_c = base;
        with_c.push(c_atom);
        with_c.extend(nonneg);
        if !is_satisfiable(with_c, &vars_vec) {
            return Coverage::No;
        }

        Coverage::Split
    }

    fn is_sat_zone_impl(&self, constraints: &ConstraintSet, dbm: &Pdbm) -> bool {
        let mut vars: BTreeSet<Var> = BTreeSet::new();
        let mut atoms: Vec<Atom> = Vec::new();
        for pc in constraints.iter() {
            let atom = Atom::from_parameter_constraint(pc);
            vars.extend(atom.coeffs.keys().copied());
            atoms.push(atom);
        }
        let clocks = dbm.clocks();
        let n = clocks.len();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let cell = dbm.cell(i, j);
                if cell_is_trivial(cell) {
                    continue;
                }
                let atom = atom_for_cell(clocks[i], clocks[j], cell);
                vars.extend(atom.coeffs.keys().copied());
                atoms.push(atom);
            }
        }
        let vars_vec: Vec<Var> = vars.iter().copied().collect();
        atoms.extend(vars_vec.iter().map(|v| Atom::nonneg(*v)));
        is_satisfiable(atoms, &vars_vec)
    }
}

impl Oracle for TrivialOracle {
    type Error = std::convert::Infallible;

    fn is_sat(&self, constraints: &ConstraintSet) -> Result<SatResult, Self::Error> {
        Ok(if self.is_sat_impl(constraints) {
            SatResult::Sat
        } else {
            SatResult::Unsat
        })
    }

    fn check_coverage(
        &self,
        candidate: &ParameterConstraint,
        constraints: &ConstraintSet,
    ) -> Result<Coverage, Self::Error> {
        Ok(self.check_coverage_impl(candidate, constraints))
    }

    fn is_sat_zone(&self, constraints: &ConstraintSet, dbm: &Pdbm) -> Result<SatResult, Self::Error> {
        Ok(if self.is_sat_zone_impl(constraints, dbm) {
            SatResult::Sat
        } else {
            SatResult::Unsat
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_expr::LinearExpression;
    use crate::relation::RelationType;

    #[test]
    fn constant_contradiction_is_unsat() {
        let oracle = TrivialOracle;
        let pc = ParameterConstraint::of(
            LinearExpression::of_const(Rational::from_int(1)),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(1)),
        );
        let set = ConstraintSet::of(pc);
        assert_eq!(oracle.is_sat(&set).unwrap(), SatResult::Unsat);
    }

    #[test]
    fn single_parameter_bounds_are_satisfiable_when_consistent() {
        let oracle = TrivialOracle;
        let p = Parameter::new();
        let lower = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Gt,
            LinearExpression::of_const(Rational::from_int(2)),
        );
        let upper = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(10)),
        );
        let set = ConstraintSet::of(lower).and(&upper);
        assert_eq!(oracle.is_sat(&set).unwrap(), SatResult::Sat);
    }

    #[test]
    fn incompatible_parameter_bounds_are_unsat() {
        let oracle = TrivialOracle;
        let p = Parameter::new();
        let lower = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Gt,
            LinearExpression::of_const(Rational::from_int(10)),
        );
        let upper = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(2)),
        );
        let set = ConstraintSet::of(lower).and(&upper);
        assert_eq!(oracle.is_sat(&set).unwrap(), SatResult::Unsat);
    }

    #[test]
    fn check_coverage_splits_on_a_genuinely_undetermined_candidate() {
        let oracle = TrivialOracle;
        let p = Parameter::new();
        // 0 < p < 10
        let lower = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Gt,
            LinearExpression::of_const(Rational::zero()),
        );
        let upper = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(10)),
        );
        let set = ConstraintSet::of(lower).and(&upper);
        // candidate: p < 5 (true for some of the region, false for other)
        let candidate = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(5)),
        );
        assert_eq!(
            oracle.check_coverage_impl(&candidate, &set),
            Coverage::Split
        );
    }

    #[test]
    fn check_coverage_yes_when_entailed() {
        let oracle = TrivialOracle;
        let p = Parameter::new();
        let lower = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Gt,
            LinearExpression::of_const(Rational::from_int(1)),
        );
        let upper = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(3)),
        );
        let set = ConstraintSet::of(lower).and(&upper);
        // candidate: p < 10, implied by p < 3
        let candidate = ParameterConstraint::of(
            LinearExpression::of_param(p),
            RelationType::Lt,
            LinearExpression::of_const(Rational::from_int(10)),
        );
        assert_eq!(oracle.check_coverage_impl(&candidate, &set), Coverage::Yes);
    }
}
