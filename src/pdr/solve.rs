/*!
The control loop of the engine.

Each iteration of [solve](Pdr::solve) first checks for interruption, and then queries the frontier solver for a bad state:
- If there is a bad state, a cube of bad states is extracted from the model and queued for blocking at the frontier.
  Blocking continues until every obligation is met, or a counterexample is found.
- If not, `¬bad` is asserted in the solver of the frontier, a new frontier is opened, and cubes are propagated.
  A frame left empty by propagation gives an invariant.

If a bounded check found no counterexample of depth less than `d`, the frontier query is skipped for each frame below `d`.
Instead, `¬bad` is asserted and a new frontier is opened directly, so no obligations are made at those frames.
Frames below `d` then hold no cubes of their own until blocking reaches them from a higher frontier.

The invariant is the union of cubes stored above the empty frame, with any cube subsumed by another removed.

A counterexample is built from the chain of records from the obligation at frame 0.
Latches outside the cube of the first record take their initial value, or false if free in the initial state.
*/

use std::time::Instant;

use crate::{
    misc::log::targets::{self},
    pdr::{arena::CubeKey, block::Blocking, counters::Counters, extract::Target, Pdr},
    reports::{Invariant, Outcome, Trace},
    sat::SatOracle,
    structures::{frame::Frame, literal::LatchLiteral},
    types::err::ErrorKind,
};

impl<S: SatOracle> Pdr<'_, S> {
    /// Runs the engine until the property is proved, disproved, or the run is interrupted.
    pub fn solve(&mut self) -> Result<Outcome, ErrorKind> {
        let start = Instant::now();
        log::info!(target: targets::PDR, "Solve with {} latches and {} inputs", self.network.latch_count(), self.network.input_count());

        let outcome = loop {
            if self.interrupted(start) {
                break Outcome::Undecided(self.finish_counters(start));
            }

            let depth = self.depth();
            if self.bmc_held.is_some_and(|held| depth < held) {
                self.open_bounded_frame()?;
                continue;
            }

            let frontier = &mut self.solvers[depth];
            let bad = frontier.literal(self.bad, 0)?;
            frontier.assume(bad);
            self.counters.sat_calls += 1;

            if frontier.solve() {
                let (cube, inputs) = self.extract_model(depth, Target::Bad, 1)?;
                log::debug!(target: targets::PDR, "Bad cube {cube} at {depth}");
                let key = self.arena.insert(cube, inputs, None);
                self.enqueue(depth, key);

                match self.recursive_block(start)? {
                    Blocking::Blocked => {}

                    Blocking::Interrupted => break Outcome::Undecided(self.finish_counters(start)),

                    Blocking::Counterexample(key) => {
                        let trace = self.counterexample(key);
                        self.arena.release(key);
                        if let Some(held) = self.bmc_held {
                            if trace.depth() < held {
                                return Err(self.inconsistency("Counterexample within the bound checked", None));
                            }
                        }
                        break Outcome::Disproved(trace);
                    }
                }
            } else {
                self.solvers[depth].assert_clause(&[bad.negate()]);
                self.push_frame();
                log::info!(target: targets::PDR, "Frame {} opened", depth + 1);
                self.make_callback_progress();

                if let Some(empty) = self.propagate()? {
                    break Outcome::Proved(self.invariant(empty));
                }
            }
        };

        let counters = self.finish_counters(start);
        log::info!(target: targets::PDR, "{} after {:.2?}", outcome.report(), counters.time);
        log::debug!(target: targets::PDR, "\n{counters}");
        Ok(outcome)
    }

    /// Closes the frontier with `¬bad` and opens a new frontier, with no query.
    ///
    /// Sound only below a bound to which a bounded check found no counterexample.
    /// Propagation is not needed, as no cube has been stored.
    fn open_bounded_frame(&mut self) -> Result<(), ErrorKind> {
        let depth = self.depth();
        let frontier = &mut self.solvers[depth];
        let bad = frontier.literal(self.bad, 0)?;
        frontier.assert_clause(&[bad.negate()]);
        self.push_frame();
        self.counters.bounded_frames += 1;
        log::debug!(target: targets::PDR, "Frame {} opened within the bounded check", depth + 1);
        self.make_callback_progress();
        Ok(())
    }

    /// Notes the time and the size of each frame in the counters, and returns a copy.
    fn finish_counters(&mut self, start: Instant) -> Counters {
        self.counters.time = start.elapsed();
        self.counters.frame_sizes = self.frame_sizes();
        self.counters.clone()
    }

    /// The trace given by the chain of records from `key`.
    fn counterexample(&self, key: CubeKey) -> Trace {
        let chain = self.arena.chain(key);

        let initial = (0..self.network.latch_count())
            .map(|index| {
                let first = chain.first().map(|record| &record.cube);
                match first {
                    Some(cube) if cube.contains(LatchLiteral::new(index, true)) => true,
                    Some(cube) if cube.contains(LatchLiteral::new(index, false)) => false,
                    _ => self.init.value(index).unwrap_or(false),
                }
            })
            .collect();

        let inputs = chain
            .iter()
            .flat_map(|record| record.inputs.iter().cloned())
            .collect();

        let trace = Trace { initial, inputs };
        log::info!(target: targets::PDR, "Counterexample of depth {}", trace.depth());
        trace
    }

    /// The invariant given by the cubes above the empty frame at `empty`.
    fn invariant(&self, empty: usize) -> Invariant {
        let mut merged = Frame::default();
        for frame in &self.frames[empty + 1..] {
            for cube in frame.iter() {
                merged.push(cube.clone());
            }
        }
        merged.remove_self_subsumed();
        let invariant = Invariant {
            cubes: merged.take(),
        };
        log::info!(target: targets::PDR, "Invariant of {} cubes from frame {}", invariant.cubes.len(), empty + 1);
        invariant
    }
}
