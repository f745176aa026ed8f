//! The Parametric Difference-Bound Matrix: an immutable `n×n` matrix of
//! upper-bound clock-difference cells, and the five operations that
//! produce new zones from it.
//!
//! Following the design note's guidance, a PDBM is modelled as a dense
//! row-major cell vector plus a stable clock-to-index map, not a pointer
//! graph: `clocks[0]` is always [`Clock::ZERO`], and `cells[i * n + j]`
//! holds the upper bound on `clocks[i] - clocks[j]`. All mutation is
//! copy-on-write — every operation below returns a new `Pdbm` sharing the
//! immutable clock/index metadata (`Arc`) with its parent and cloning only
//! the `n²` cell vector.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::constraint::{ConstraintSet, ParameterConstraint};
use crate::error::PdbmError;
use crate::guard::AtomicGuard;
use crate::linear_expr::LinearExpression;
use crate::oracle::{Coverage, Oracle, SatResult};
use crate::rational::Rational;
use crate::relation::RelationType;

/// A single matrix cell: the upper bound `c_i - c_j ≺ expr`, `≺ ∈ {<, ≤}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub expr: LinearExpression,
    pub rel: RelationType,
}

impl Cell {
    fn unbounded() -> Self {
        Cell {
            expr: LinearExpression::of_const(Rational::pos_inf()),
            rel: RelationType::Le,
        }
    }

    fn zero_le() -> Self {
        Cell {
            expr: LinearExpression::of_const(Rational::zero()),
            rel: RelationType::Le,
        }
    }

    fn is_trivially_unbounded(&self) -> bool {
        self.expr.is_constant() && self.expr.constant().is_pos_inf()
    }
}

/// The PDBM itself: clocks, their index, and the `n²` cell matrix.
#[derive(Clone, Debug)]
pub struct Pdbm {
    clocks: Arc<Vec<Clock>>,
    index: Arc<HashMap<Clock, usize>>,
    cells: Vec<Cell>,
}

impl Pdbm {
    /// The initial zone over the given clocks: every clock is unbounded
    /// above, zero below, and `Clock::ZERO` is implicitly included.
    pub fn initial(clocks: impl IntoIterator<Item = Clock>) -> Self {
        let mut rest: Vec<Clock> = clocks.into_iter().filter(|c| !c.is_zero()).collect();
        rest.sort();
        rest.dedup();

        let mut all = Vec::with_capacity(rest.len() + 1);
        all.push(Clock::ZERO);
        all.extend(rest);
        let n = all.len();

        let mut index = HashMap::with_capacity(n);
        for (i, c) in all.iter().enumerate() {
            index.insert(*c, i);
        }

        let mut cells = vec![Cell::unbounded(); n * n];
        for i in 0..n {
            cells[i * n + i] = Cell::zero_le();
        }
        for i in 1..n {
            // x0 - ci <= 0, i.e. ci >= 0.
            cells[i] = Cell::zero_le();
        }

        Self {
            clocks: Arc::new(all),
            index: Arc::new(index),
            cells,
        }
    }

    /// Number of clocks, including `Clock::ZERO`.
    pub fn n(&self) -> usize {
        self.clocks.len()
    }

    /// The clocks in matrix-index order (`clocks()[0] == Clock::ZERO`).
    pub fn clocks(&self) -> &[Clock] {
        self.clocks.as_slice()
    }

    /// Matrix index of `c`, if it belongs to this PDBM's clock set.
    pub fn clock_index(&self, c: Clock) -> Option<usize> {
        self.index.get(&c).copied()
    }

    /// The cell at `(i, j)`.
    pub fn cell(&self, i: usize, j: usize) -> &Cell {
        &self.cells[i * self.n() + j]
    }

    fn with_cell(&self, i: usize, j: usize, cell: Cell) -> Self {
        let n = self.n();
        let mut cells = self.cells.clone();
        cells[i * n + j] = cell;
        Self {
            clocks: self.clocks.clone(),
            index: self.index.clone(),
            cells,
        }
    }

    /// Directly overwrite the upper bound on `left - right`, bypassing
    /// Oracle-backed coverage reasoning. Meant for building fixtures (tests,
    /// the demo binary) where a zone's exact matrix is given up front, not
    /// for use inside the reachability engine itself — use
    /// [`Pdbm::add_guard`] there.
    pub fn set_upper_bound(
        &self,
        left: Clock,
        right: Clock,
        expr: LinearExpression,
        rel: RelationType,
    ) -> Result<Self, PdbmError> {
        assert!(rel.is_upper(), "matrix cells store only upper bounds");
        let i = self.clock_index(left).ok_or(PdbmError::UnknownClock)?;
        let j = self.clock_index(right).ok_or(PdbmError::UnknownClock)?;
        Ok(self.with_cell(i, j, Cell { expr, rel }))
    }

    /// Tighten the matrix by one atomic guard, splitting the work pair
    /// `(constraints, self)` into zero or more refined pairs wherever the
    /// Oracle cannot decide coverage outright.
    pub fn add_guard<O: Oracle>(
        &self,
        guard: &AtomicGuard,
        constraints: &ConstraintSet,
        oracle: &O,
    ) -> Result<Vec<(ConstraintSet, Pdbm)>, O::Error> {
        let (left, right, expr_new, rel_new) = guard.as_upper_bound();
        let (i, j) = match (self.clock_index(left), self.clock_index(right)) {
            (Some(i), Some(j)) => (i, j),
            _ => return Ok(vec![(constraints.clone(), self.clone())]),
        };

        let cur = self.cell(i, j).clone();
        let kappa_rel = cur.rel.and(rel_new);
        let kappa = ParameterConstraint::of(cur.expr.clone(), kappa_rel, expr_new.clone());

        tracing::trace!(i, j, rel = %rel_new, "add_guard: querying oracle coverage");
        match oracle.check_coverage(&kappa, constraints)? {
            Coverage::Yes => Ok(vec![(constraints.clone(), self.clone())]),
            Coverage::No => {
                let tightened = self.with_cell(
                    i,
                    j,
                    Cell {
                        expr: expr_new,
                        rel: rel_new,
                    },
                );
                Ok(vec![(constraints.clone(), tightened)])
            }
            Coverage::Split => {
                let tightened = self.with_cell(
                    i,
                    j,
                    Cell {
                        expr: expr_new,
                        rel: rel_new,
                    },
                );
                Ok(vec![
                    (constraints.and(&kappa), self.clone()),
                    (constraints.and(&kappa.negate()), tightened),
                ])
            }
            Coverage::Unknown => {
                tracing::warn!(i, j, "add_guard: oracle returned UNKNOWN, pruning work pair");
                Ok(vec![])
            }
        }
    }

    /// `true` iff the conjunction of `constraints` and every clock-
    /// difference bound in this matrix is unsatisfiable.
    pub fn is_empty<O: Oracle>(
        &self,
        constraints: &ConstraintSet,
        oracle: &O,
    ) -> Result<bool, O::Error> {
        match oracle.is_sat_zone(constraints, self)? {
            SatResult::Unsat => Ok(true),
            SatResult::Sat => Ok(false),
            SatResult::Unknown => {
                tracing::warn!("is_empty: oracle returned UNKNOWN, treating zone as non-empty");
                Ok(false)
            }
        }
    }

    /// Advance time: remove every clock's upper bound against `x0`
    /// (`D[i][0] <- +∞`, non-strict becomes irrelevant since the bound is
    /// gone; strictness is kept `<` so the representation never claims a
    /// tautological `≤ +∞` was anything but "no bound").
    pub fn delay(&self) -> Self {
        let n = self.n();
        let mut cells = self.cells.clone();
        let bound = Cell {
            expr: LinearExpression::of_const(Rational::pos_inf()),
            rel: RelationType::Lt,
        };
        for i in 1..n {
            cells[i * n] = bound.clone();
        }
        Self {
            clocks: self.clocks.clone(),
            index: self.index.clone(),
            cells,
        }
    }

    /// Reset a batch of clocks to constant values, applied in order (so a
    /// later reset's source bounds reflect earlier resets in the same
    /// batch, matching simultaneous assignment semantics when the targets
    /// are disjoint).
    ///
    /// # Errors
    /// [`PdbmError::ResetZeroClock`] if `x0` is targeted;
    /// [`PdbmError::BadResetValue`] if a value is negative, `±∞`, or `NaN`;
    /// [`PdbmError::UnknownClock`] if a target clock is not in this PDBM.
    pub fn reset(&self, resets: &[(Clock, Rational)]) -> Result<Self, PdbmError> {
        let mut cur = self.clone();
        for (cr, v) in resets {
            cur = cur.reset_one(*cr, v)?;
        }
        Ok(cur)
    }

    fn reset_one(&self, cr: Clock, v: &Rational) -> Result<Self, PdbmError> {
        if cr.is_zero() {
            return Err(PdbmError::ResetZeroClock);
        }
        if !v.is_finite() || *v < Rational::zero() {
            return Err(PdbmError::BadResetValue { value: v.clone() });
        }
        let r = self.clock_index(cr).ok_or(PdbmError::UnknownClock)?;
        let n = self.n();
        let mut cells = self.cells.clone();
        let v_expr = LinearExpression::of_const(v.clone());
        for j in 0..n {
            if j == r {
                continue;
            }
            let d0j = self.cell(0, j).clone();
            let rj0 = self.cell(j, 0).clone();
            cells[r * n + j] = Cell {
                expr: v_expr.add(&d0j.expr),
                rel: d0j.rel,
            };
            cells[j * n + r] = Cell {
                expr: rj0.expr.sub(&v_expr),
                rel: rj0.rel,
            };
        }
        cells[r * n + r] = Cell::zero_le();
        Ok(Self {
            clocks: self.clocks.clone(),
            index: self.index.clone(),
            cells,
        })
    }

    /// Bring `(constraints, self)` to canonical (shortest-path-closed)
    /// form, returning the resulting set of refined, non-empty work pairs.
    ///
    /// Implements the symbolic all-pairs shortest-path worklist described
    /// by the design note: repeatedly scan `(k, i, j)` triples (`i, j, k`
    /// pairwise distinct — the diagonal is never written directly by this
    /// loop, since an actual contradiction always shows up as
    /// unsatisfiability of the full conjunction, which the final
    /// [`Pdbm::is_empty`] filter below already catches); tighten a cell
    /// outright when the Oracle says `NO`, split the work pair when it
    /// says `SPLIT` (continuing the scan in-place on one branch, queuing
    /// the other for its own independent pass), and abandon the pair when
    /// it says `UNKNOWN`.
    pub fn canonical<O: Oracle>(
        &self,
        constraints: &ConstraintSet,
        oracle: &O,
        config: &EngineConfig,
    ) -> Result<Vec<(ConstraintSet, Pdbm)>, O::Error> {
        let mut queue: VecDeque<(ConstraintSet, Pdbm)> = VecDeque::new();
        queue.push_back((constraints.clone(), self.clone()));
        let mut seen: HashSet<(ConstraintSet, Pdbm)> = HashSet::new();
        let mut done = Vec::new();

        while let Some((c, d)) = queue.pop_front() {
            if !seen.insert((c.clone(), d.clone())) {
                continue;
            }
            if let Some((c2, d2)) = drive_to_fixed_point(c, d, oracle, config, &mut queue)? {
                if !d2.is_empty(&c2, oracle)? {
                    done.push((c2, d2));
                }
            }
        }
        Ok(done)
    }
}

impl PartialEq for Pdbm {
    fn eq(&self, other: &Self) -> bool {
        self.clocks.as_slice() == other.clocks.as_slice() && self.cells == other.cells
    }
}

impl Eq for Pdbm {}

impl Hash for Pdbm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.clocks.as_slice().hash(state);
        self.cells.hash(state);
    }
}

/// Run the `(k, i, j)` sweep to a fixed point for a single work pair,
/// queuing the "other half" of any split encountered along the way onto
/// `queue` for independent processing. Returns `None` if the pair was
/// abandoned (Oracle `UNKNOWN`, or the sweep cap was hit).
fn drive_to_fixed_point<O: Oracle>(
    mut c: ConstraintSet,
    mut d: Pdbm,
    oracle: &O,
    config: &EngineConfig,
    queue: &mut VecDeque<(ConstraintSet, Pdbm)>,
) -> Result<Option<(ConstraintSet, Pdbm)>, O::Error> {
    let n = d.n();
    for _sweep in 0..config.max_canonical_sweeps {
        let mut changed = false;
        'scan: for k in 0..n {
            for i in 0..n {
                if i == k {
                    continue;
                }
                for j in 0..n {
                    if j == k || i == j {
                        continue;
                    }
                    let e_ik = d.cell(i, k).clone();
                    let e_kj = d.cell(k, j).clone();
                    if e_ik.is_trivially_unbounded() || e_kj.is_trivially_unbounded() {
                        continue;
                    }
                    let e_via = e_ik.expr.add(&e_kj.expr);
                    let rel_via = e_ik.rel.and(e_kj.rel);
                    let cur_ij = d.cell(i, j).clone();
                    let kappa_rel = rel_via.and(cur_ij.rel);
                    let kappa =
                        ParameterConstraint::of(cur_ij.expr.clone(), kappa_rel, e_via.clone());

                    tracing::trace!(k, i, j, "canonical: querying oracle coverage");
                    match oracle.check_coverage(&kappa, &c)? {
                        Coverage::Yes => {}
                        Coverage::Unknown => {
                            tracing::warn!(
                                k,
                                i,
                                j,
                                "canonical: oracle returned UNKNOWN, abandoning work pair"
                            );
                            return Ok(None);
                        }
                        Coverage::No => {
                            d = d.with_cell(
                                i,
                                j,
                                Cell {
                                    expr: e_via,
                                    rel: rel_via,
                                },
                            );
                            changed = true;
                        }
                        Coverage::Split => {
                            let tightened = d.with_cell(
                                i,
                                j,
                                Cell {
                                    expr: e_via,
                                    rel: rel_via,
                                },
                            );
                            queue.push_back((c.and(&kappa.negate()), tightened));
                            c = c.and(&kappa);
                            changed = true;
                            break 'scan;
                        }
                    }
                }
            }
        }
        if !changed {
            return Ok(Some((c, d)));
        }
    }
    tracing::warn!(
        cap = config.max_canonical_sweeps,
        "canonical: exceeded sweep cap, abandoning work pair"
    );
    Ok(None)
}
