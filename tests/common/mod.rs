#![allow(dead_code)]

use otter_pdr::{
    ntk::{builder::NetworkBuilder, Network, Signal},
    sat::{
        literal::{Atom, CLiteral},
        SatOracle, SolveReport, Solver,
    },
};

/// A latch which toggles, starting at 0, with the latch as the bad state.
pub fn toggler() -> Network {
    let mut builder = NetworkBuilder::default();
    let l = builder.add_latch();
    builder.set_next(l, !l).unwrap();
    builder.add_bad(l).unwrap();
    builder.build().unwrap()
}

/// A two bit counter from 00, incremented when enabled and saturating at 2, with bad state 11.
pub fn saturating_counter() -> Network {
    let mut builder = NetworkBuilder::default();
    let enable = builder.add_input();
    let b0 = builder.add_latch();
    let b1 = builder.add_latch();

    let increment = builder.add_and(enable, !b1).unwrap();
    let next_b0 = builder.add_xor(b0, increment).unwrap();
    let carry = builder.add_and(b0, increment).unwrap();
    let next_b1 = builder.add_or(b1, carry).unwrap();
    builder.set_next(b0, next_b0).unwrap();
    builder.set_next(b1, next_b1).unwrap();

    let above_max = builder.add_and(b0, b1).unwrap();
    builder.add_bad(above_max).unwrap();
    builder.build().unwrap()
}

/// No latches, with a bad state given by an and gate of two constant true signals.
pub fn constant_bad() -> Network {
    let mut builder = NetworkBuilder::default();
    let gate = builder.add_and(Signal::TRUE, Signal::TRUE).unwrap();
    builder.add_bad(gate).unwrap();
    builder.build().unwrap()
}

/// An n bit counter from 0, incremented each step, with the bad state given by every bit set.
pub fn counter(bits: usize) -> Network {
    let mut builder = NetworkBuilder::default();
    let latches: Vec<Signal> = (0..bits).map(|_| builder.add_latch()).collect();

    let mut carry = Signal::TRUE;
    for latch in &latches {
        let next = builder.add_xor(*latch, carry).unwrap();
        builder.set_next(*latch, next).unwrap();
        carry = builder.add_and(*latch, carry).unwrap();
    }

    let mut all = Signal::TRUE;
    for latch in &latches {
        all = builder.add_and(all, *latch).unwrap();
    }
    builder.add_bad(all).unwrap();
    builder.build().unwrap()
}

/// A shift register of `length` latches from 0, fed by an input, with the bad state given by the last latch set while the input is clear.
///
/// If `blocked`, the input is masked by a latch which is never set, and so the bad state is unreachable.
pub fn shift_register(length: usize, blocked: bool) -> Network {
    let mut builder = NetworkBuilder::default();
    let input = builder.add_input();

    let feed = match blocked {
        true => {
            let mask = builder.add_latch();
            builder.set_next(mask, mask).unwrap();
            builder.add_and(input, mask).unwrap()
        }
        false => input,
    };

    let mut previous = feed;
    let mut last = feed;
    for _ in 0..length {
        let latch = builder.add_latch();
        builder.set_next(latch, previous).unwrap();
        previous = latch;
        last = latch;
    }

    let bad = builder.add_and(last, !input).unwrap();
    builder.add_bad(bad).unwrap();
    builder.build().unwrap()
}

/// A free latch `f` which holds its value, and a latch `g` from 0 which copies `f`, with `g` as the bad state.
pub fn free_copy() -> Network {
    let mut builder = NetworkBuilder::default();
    let f = builder.add_latch();
    builder.set_init(f, f).unwrap();
    builder.set_next(f, f).unwrap();
    let g = builder.add_latch();
    builder.set_next(g, f).unwrap();
    builder.add_bad(g).unwrap();
    builder.build().unwrap()
}

/// A free latch `f` which holds its value, and a latch `g` from 0 which keeps `g ∧ f`, with `g` as the bad state.
pub fn free_guard() -> Network {
    let mut builder = NetworkBuilder::default();
    let f = builder.add_latch();
    builder.set_init(f, f).unwrap();
    builder.set_next(f, f).unwrap();
    let g = builder.add_latch();
    let next = builder.add_and(g, f).unwrap();
    builder.set_next(g, next).unwrap();
    builder.add_bad(g).unwrap();
    builder.build().unwrap()
}

/// A latch initialised to an input.
pub fn input_initialised() -> Network {
    let mut builder = NetworkBuilder::default();
    let input = builder.add_input();
    let l = builder.add_latch();
    builder.set_init(l, input).unwrap();
    builder.set_next(l, l).unwrap();
    builder.add_bad(l).unwrap();
    builder.build().unwrap()
}

/// The built in solver, with failed assumptions hidden.
#[derive(Clone, Default)]
pub struct NoCore(pub Solver);

impl SatOracle for NoCore {
    fn fresh_atom(&mut self) -> Atom {
        SatOracle::fresh_atom(&mut self.0)
    }

    fn add_clause(&mut self, clause: &[CLiteral]) {
        SatOracle::add_clause(&mut self.0, clause)
    }

    fn solve_given(&mut self, assumptions: &[CLiteral]) -> SolveReport {
        SatOracle::solve_given(&mut self.0, assumptions)
    }

    fn value_of(&self, atom: Atom) -> Option<bool> {
        SatOracle::value_of(&self.0, atom)
    }

    fn failed_assumptions(&self) -> Option<&[CLiteral]> {
        None
    }
}
