/*!
Blocking of obligations.

# Overview

An obligation `(f, c)` asks for the cube `c` to be blocked at frame `f`, that is, for each state of `c` to be shown unreachable from the states of frame `f - 1` in one step.
[recursive_block](Pdr::recursive_block) pops obligations from the lowest frame until none remain, and for each:

- At frame 0, the cube intersects the initial state, and the chain of cubes from the obligation is a counterexample.
- If the cube is subsumed by a cube stored at `f` or above, the obligation is already met and is dropped.
- Otherwise, the solver of frame `f - 1` is queried for a state outside `c` with a successor in `c`.
  + If there is such a state, a cube of predecessors is extracted from the model (see [extract](crate::pdr::extract)).
    The predecessor is queued at `f - 1` and the obligation is queued again at `f`.
  + If not, the cube is [generalized](crate::pdr::generalize) and stored.
    The obligation is queued again at `f + 1`, unless `f` is the frontier.

The query is relative to `¬c`: an activation literal `act` guards the clause `(¬act ∨ ¬c)` at time 0, and is assumed together with `c` at time 1.
After the query the activation literal is retired.

# Multi-step queries

With [multi-step](crate::config::MultiStep) blocking enabled at depth `d`, an obligation at frame `f ≥ d` which has been popped more than the threshold number of times during a call to [recursive_block](Pdr::recursive_block) is first queried against frame `f - d`, for a state which reaches `c` in exactly `d` steps.
If there is such a state, a predecessor is extracted by simulation over `d` steps and queued at `f - d`, skipping the intermediate frames.
Otherwise blocking continues as usual.
*/

use std::time::Instant;

use crate::{
    misc::log::targets::{self},
    pdr::{arena::CubeKey, extract::Target, Pdr},
    sat::SatOracle,
    structures::cube::Cube,
    types::err::ErrorKind,
};

/// Ways in which blocking may end.
pub enum Blocking {
    /// Every obligation was met.
    Blocked,

    /// A chain of cubes from the initial state to a bad state, from the key given.
    Counterexample(CubeKey),

    /// The time limit was reached, or termination was requested.
    Interrupted,
}

impl<S: SatOracle> Pdr<'_, S> {
    /// True if the time limit has been reached, or termination has been requested.
    pub(super) fn interrupted(&mut self, start: Instant) -> bool {
        if self
            .config
            .time_limit
            .is_some_and(|limit| start.elapsed() >= limit)
        {
            log::info!(target: targets::PDR, "Time limit reached");
            return true;
        }
        self.check_callback_terminate()
    }

    /// True if some cube stored at `frame` or above subsumes `cube`.
    pub(super) fn is_subsumed(&self, frame: usize, cube: &Cube) -> bool {
        self.frames[frame..]
            .iter()
            .any(|stored| stored.subsumes(cube))
    }

    /// Queries whether `cube` can be reached in one step from frame `frame - 1`.
    ///
    /// If `extend`, the states of `cube` are excluded from the predecessors.
    pub(super) fn check_reachability(&mut self, frame: usize, cube: &Cube, extend: bool) -> Result<bool, ErrorKind> {
        let solver = &mut self.solvers[frame - 1];
        for literal in solver.cube_literals(cube, 1)? {
            solver.assume(literal);
        }

        let activation = match extend {
            true => {
                let act = solver.activation();
                let mut clause = vec![act.negate()];
                clause.extend(solver.cube_literals(cube, 0)?.into_iter().map(|l| l.negate()));
                solver.assert_clause(&clause);
                solver.assume(act);
                Some(act)
            }
            false => None,
        };

        self.counters.sat_calls += 1;
        let reachable = solver.solve();
        if let Some(act) = activation {
            solver.retire(act);
        }
        log::trace!(target: targets::BLOCK, "{cube} at {frame}: reachable {reachable}");
        Ok(reachable)
    }

    /// Queries whether `cube` can be reached in exactly `steps` steps from frame `frame - steps`.
    fn check_multi_step(&mut self, frame: usize, cube: &Cube, steps: usize) -> Result<bool, ErrorKind> {
        let solver = &mut self.solvers[frame - steps];
        for literal in solver.cube_literals(cube, steps)? {
            solver.assume(literal);
        }
        self.counters.sat_calls += 1;
        Ok(solver.solve())
    }

    /// Stores `cube` at `frame`, and asserts its negation in the solvers of frames 1 to `frame`.
    pub(super) fn add_blocked_cube(&mut self, frame: usize, cube: Cube) -> Result<(), ErrorKind> {
        if !self.frames[frame].push(cube.clone()) {
            return Ok(());
        }
        log::debug!(target: targets::BLOCK, "Blocked {cube} at {frame}");

        for solver in self.solvers[1..=frame].iter_mut() {
            let clause: Vec<_> = solver
                .cube_literals(&cube, 0)?
                .into_iter()
                .map(|literal| literal.negate())
                .collect();
            solver.assert_clause(&clause);
        }
        for literal in cube.literals() {
            self.priority[literal.index()] += 1;
        }
        Ok(())
    }

    /// Blocks obligations until none remain, a counterexample is found, or the run is interrupted.
    ///
    /// On a counterexample the queue is cleared, and the caller holds a reference to the returned key.
    pub(super) fn recursive_block(&mut self, start: Instant) -> Result<Blocking, ErrorKind> {
        let depth = self.depth();
        let multi_step = match self.config.multi_step.enabled() {
            true => Some((
                self.config.multi_step.depth.value,
                self.config.multi_step.threshold.value,
            )),
            false => None,
        };
        let mut pops = vec![0_usize; depth + 1];

        while let Some((frame, key)) = self.queue.pop() {
            if frame == 0 {
                log::info!(target: targets::BLOCK, "Obligation at the initial frame");
                self.clear_obligations();
                return Ok(Blocking::Counterexample(key));
            }

            if self.interrupted(start) {
                self.arena.release(key);
                self.clear_obligations();
                return Ok(Blocking::Interrupted);
            }

            self.counters.obligations += 1;
            pops[frame] += 1;

            let Some(cube) = self.arena.get(key).map(|record| record.cube.clone()) else {
                return Err(self.inconsistency("Obligation without a record", None));
            };

            if self.is_subsumed(frame, &cube) {
                self.arena.release(key);
                continue;
            }

            if cube.intersects(&self.init) {
                return Err(self.inconsistency("Obligation intersects the initial state", Some(cube)));
            }

            if let Some((steps, threshold)) = multi_step {
                if frame >= steps
                    && pops[frame] > threshold
                    && self.check_multi_step(frame, &cube, steps)?
                {
                    let (predecessor, inputs) =
                        self.extract_model(frame - steps, Target::Successor(&cube), steps)?;
                    log::debug!(target: targets::BLOCK, "{steps} step predecessor {predecessor} at {}", frame - steps);
                    let predecessor = self.arena.insert(predecessor, inputs, Some(key));
                    self.enqueue(frame - steps, predecessor);
                    self.enqueue(frame, key);
                    self.arena.release(key);
                    self.counters.multi_step_skips += 1;
                    continue;
                }
            }

            if self.check_reachability(frame, &cube, true)? {
                let (predecessor, inputs) = self.extract_model(frame - 1, Target::Successor(&cube), 1)?;
                log::trace!(target: targets::BLOCK, "Predecessor {predecessor} at {}", frame - 1);
                let predecessor = self.arena.insert(predecessor, inputs, Some(key));
                self.enqueue(frame - 1, predecessor);
                self.enqueue(frame, key);
            } else {
                let (blocked_frame, blocked) = self.generalize(frame, &cube)?;
                if blocked.intersects(&self.init) {
                    return Err(self.inconsistency("Generalization intersects the initial state", Some(blocked)));
                }
                self.add_blocked_cube(blocked_frame, blocked)?;
                self.counters.blocked_cubes += 1;
                if frame < depth {
                    self.enqueue(frame + 1, key);
                }
            }
            self.arena.release(key);
        }

        Ok(Blocking::Blocked)
    }
}
