/*!
Independent checks of outcomes.

- [check_trace] replays a trace by simulation, from the initial state given by the trace, and checks the bad signal is true at the final step.
- [check_invariant] checks an invariant with fresh SAT queries:
  + No cube of the invariant intersects the initial state.
  + The invariant and the bad signal are unsatisfiable together.
  + For each cube `c` of the invariant, the invariant at time 0 and `c` at time 1 are unsatisfiable together.

Neither check uses any structure of the engine, other than the network.
*/

use crate::{
    adapter::FrameSolver,
    misc::log::targets::{self},
    ntk::{Network, Signal},
    reports::{Invariant, Trace},
    sat::Solver,
    sim::{Ternary, TernarySim},
    types::err::ErrorKind,
};

/// True if `trace` is a path from an initial state of `network` to a state where `bad` is true.
pub fn check_trace(network: &Network, bad: Signal, trace: &Trace) -> Result<bool, ErrorKind> {
    let init = network.initial_state()?;

    if trace.initial.len() != network.latch_count() {
        log::warn!(target: targets::PDR, "Trace has {} latch values", trace.initial.len());
        return Ok(false);
    }
    let outside_init = trace
        .initial
        .iter()
        .enumerate()
        .any(|(index, value)| init.value(index).is_some_and(|init| init != *value));
    if outside_init {
        log::warn!(target: targets::PDR, "Trace does not begin in the initial state");
        return Ok(false);
    }
    if trace.inputs.is_empty()
        || trace
            .inputs
            .iter()
            .any(|pattern| pattern.len() != network.input_count())
    {
        log::warn!(target: targets::PDR, "Trace has malformed inputs");
        return Ok(false);
    }

    let mut sim = TernarySim::new(network);
    for (index, value) in trace.initial.iter().enumerate() {
        sim.set_latch(index, Ternary::from_bool(*value));
    }
    for (step, pattern) in trace.inputs.iter().enumerate() {
        if step > 0 {
            sim.step();
        }
        for (index, value) in pattern.iter().enumerate() {
            sim.set_input(index, Ternary::from_bool(*value));
        }
        sim.simulate();
    }

    Ok(sim.value(bad) == Ternary::One)
}

/// True if `invariant` holds on each initial state of `network`, is closed under the transition relation, and excludes every state where `bad` is true.
pub fn check_invariant(network: &Network, bad: Signal, invariant: &Invariant) -> Result<bool, ErrorKind> {
    let init = network.initial_state()?;
    if let Some(cube) = invariant.cubes.iter().find(|cube| cube.intersects(&init)) {
        log::warn!(target: targets::PDR, "Invariant cube {cube} intersects the initial state");
        return Ok(false);
    }

    let mut solver = FrameSolver::new(network, Solver::default());
    solver.load_latches(0)?;
    for cube in &invariant.cubes {
        let clause: Vec<_> = solver
            .cube_literals(cube, 0)?
            .into_iter()
            .map(|literal| literal.negate())
            .collect();
        solver.assert_clause(&clause);
    }

    let bad = solver.load(bad, 0)?;
    solver.assume(bad);
    if solver.solve() {
        log::warn!(target: targets::PDR, "Invariant admits a bad state");
        return Ok(false);
    }

    for cube in &invariant.cubes {
        for literal in solver.cube_literals(cube, 1)? {
            solver.assume(literal);
        }
        if solver.solve() {
            log::warn!(target: targets::PDR, "Invariant cube {cube} is reachable from the invariant");
            return Ok(false);
        }
    }

    Ok(true)
}
