//! Toy PTA driver exercising `createInitial` / `addGuardAndCanonical` /
//! `delayAndCanonical` / `resetAndCanonical` against the in-process
//! [`TrivialOracle`], printing the resulting CPDBM set at each step.
//!
//! Models a single location with two clocks `x`, `y` and one parameter
//! `p`: start, require `x < p`, let time pass, reset `x`, and print what
//! survives.

use anyhow::Result;
use pdbm_engine::{
    AtomicGuard, Clock, Cpdbm, EngineConfig, ConstraintSet, LinearExpression, Rational,
    TrivialOracle,
};

fn print_set(label: &str, set: &[Cpdbm]) {
    println!("-- {label}: {} pair(s)", set.len());
    for (idx, cpdbm) in set.iter().enumerate() {
        println!(
            "   [{idx}] constraints={} entries, matrix n={}",
            cpdbm.constraints().len(),
            cpdbm.pdbm().n()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let oracle = TrivialOracle;
    let config = EngineConfig::default();

    let x = Clock::new();
    let y = Clock::new();
    let p = pdbm_engine::Parameter::new();

    let initial = Cpdbm::create_initial([x, y], ConstraintSet::empty(), &oracle, &config)?;
    let _ = y;
    print_set("createInitial", &initial);

    // x < p
    let guard = AtomicGuard::less_than(
        x,
        LinearExpression::of_param(p),
        Clock::ZERO,
    )?;
    let mut after_guard = Vec::new();
    for cpdbm in &initial {
        after_guard.extend(cpdbm.add_guard_and_canonical(&guard, &oracle, &config)?);
    }
    print_set("addGuardAndCanonical(x < p)", &after_guard);

    let mut after_delay = Vec::new();
    for cpdbm in &after_guard {
        after_delay.extend(cpdbm.delay_and_canonical(&oracle, &config)?);
    }
    print_set("delayAndCanonical", &after_delay);

    let mut after_reset = Vec::new();
    for cpdbm in &after_delay {
        after_reset.extend(cpdbm.reset_and_canonical(&[(x, Rational::zero())], &oracle, &config)?);
    }
    print_set("resetAndCanonical(x := 0)", &after_reset);

    for (idx, cpdbm) in after_reset.iter().enumerate() {
        let empty = cpdbm.is_empty(&oracle)?;
        println!("branch {idx}: isEmpty = {empty}");
    }

    Ok(())
}
