/*!
Generalization of blocked cubes.

A cube `c` blocked at frame `f` is shrunk in three steps before it is stored:

1. [remove_from_proof](Pdr::remove_from_proof) keeps only the literals of `c` whose time 1 literal is among the failed assumptions of the blocking query.
   If no kept literal disagrees with the initial state, the first dropped literal which does is kept as well.
2. [generalize_proof](Pdr::generalize_proof) tries to drop each remaining literal, in ascending order of latch priority, keeping the drop if the smaller cube still excludes the initial state and is still blocked at `f`.
3. [forward_proof](Pdr::forward_proof) moves the cube to the highest frame at which it is blocked, shrinking it again by the failed assumptions at each move.

Step 1 is skipped when the oracle does not report failed assumptions, or when disabled by [core_shrink](crate::config::Config::core_shrink).

Every candidate is a subset of the cube blocked, and so excludes at least the states of the cube.
As the negation of the candidate is stronger than the negation of the cube, a query which was unsatisfiable relative to the cube remains unsatisfiable relative to the candidate.
*/

use crate::{
    misc::log::targets::{self},
    pdr::Pdr,
    sat::SatOracle,
    structures::{cube::Cube, literal::LatchLiteral},
    types::err::ErrorKind,
};

impl<S: SatOracle> Pdr<'_, S> {
    /// The generalization of `cube`, blocked at `frame`, together with the frame it is blocked at.
    ///
    /// Must follow an unsatisfiable query of `cube` at `frame`.
    pub(super) fn generalize(&mut self, frame: usize, cube: &Cube) -> Result<(usize, Cube), ErrorKind> {
        let shrunk = self.remove_from_proof(frame, cube);
        let dropped = self.generalize_proof(frame, shrunk)?;
        let (frame, pushed) = self.forward_proof(frame, dropped)?;
        log::debug!(target: targets::GENERALIZE, "{cube} to {pushed} at {frame}");
        Ok((frame, pushed))
    }

    /// `cube` restricted to the literals in the failed assumptions of the last query made to the solver of frame `frame - 1`.
    pub(super) fn remove_from_proof(&self, frame: usize, cube: &Cube) -> Cube {
        if !self.config.core_shrink.value {
            return cube.clone();
        }
        let solver = &self.solvers[frame - 1];
        let core = match solver.conflict() {
            Some(core) if !core.is_empty() => core,
            _ => return cube.clone(),
        };

        let in_core = |literal: LatchLiteral| {
            solver
                .literal(self.network.latch_signal(literal.index()), 1)
                .is_ok_and(|next| core.contains(&next.negate_if(!literal.value())))
        };

        let kept = cube.filtered(in_core);
        if !kept.intersects(&self.init) {
            return kept;
        }

        let excluding = cube
            .literals()
            .iter()
            .copied()
            .find(|literal| !in_core(*literal) && self.init.excludes(*literal));
        match excluding {
            Some(literal) => kept.with(literal),
            None => cube.clone(),
        }
    }

    /// Drops literals from `cube`, blocked at `frame`, while the cube remains blocked and excludes the initial state.
    pub(super) fn generalize_proof(&mut self, frame: usize, cube: Cube) -> Result<Cube, ErrorKind> {
        let mut order = cube.literals().to_vec();
        order.sort_by_key(|literal| self.priority[literal.index()]);

        let mut cube = cube;
        for literal in order {
            let candidate = cube.without(literal);
            if candidate.intersects(&self.init) {
                continue;
            }
            if !self.check_reachability(frame, &candidate, true)? {
                log::trace!(target: targets::GENERALIZE, "Dropped {literal}");
                cube = candidate;
            }
        }
        Ok(cube)
    }

    /// Moves `cube`, blocked at `frame`, up to the highest frame at which it is blocked.
    pub(super) fn forward_proof(&mut self, frame: usize, cube: Cube) -> Result<(usize, Cube), ErrorKind> {
        let depth = self.depth();
        let mut frame = frame;
        let mut cube = cube;
        while frame < depth {
            if self.check_reachability(frame + 1, &cube, true)? {
                break;
            }
            frame += 1;
            cube = self.remove_from_proof(frame, &cube);
        }
        Ok((frame, cube))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        ntk::{builder::NetworkBuilder, Network, Signal},
        sat::{
            literal::{Atom, CLiteral},
            SatOracle, SolveReport, Solver,
        },
    };

    fn cube(literals: &[(usize, bool)]) -> Cube {
        Cube::new(literals.iter().map(|(index, value)| LatchLiteral::new(*index, *value)))
    }

    /// Latches `a` from 0 which holds, `b` from 0 which is set, and `c` from 1 which is set, with `a` as the bad state.
    fn set_latches() -> Network {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_latch();
        builder.set_next(a, a).unwrap();
        let b = builder.add_latch();
        builder.set_next(b, Signal::TRUE).unwrap();
        let c = builder.add_latch();
        builder.set_init(c, Signal::TRUE).unwrap();
        builder.set_next(c, Signal::TRUE).unwrap();
        builder.add_bad(a).unwrap();
        builder.build().unwrap()
    }

    /// Latches `x` and `y` from 0 which hold, with `x ∧ y` as the bad state.
    fn held_pair() -> Network {
        let mut builder = NetworkBuilder::default();
        let x = builder.add_latch();
        builder.set_next(x, x).unwrap();
        let y = builder.add_latch();
        builder.set_next(y, y).unwrap();
        let both = builder.add_and(x, y).unwrap();
        builder.add_bad(both).unwrap();
        builder.build().unwrap()
    }

    /// A latch `m` from 0 which holds, and latches `p` and `q` from 0, where `p` is set and `q` follows `p`, with `m ∧ q` as the bad state.
    fn delay() -> Network {
        let mut builder = NetworkBuilder::default();
        let m = builder.add_latch();
        builder.set_next(m, m).unwrap();
        let p = builder.add_latch();
        builder.set_next(p, Signal::TRUE).unwrap();
        let q = builder.add_latch();
        builder.set_next(q, p).unwrap();
        let bad = builder.add_and(m, q).unwrap();
        builder.add_bad(bad).unwrap();
        builder.build().unwrap()
    }

    /// The built in solver, reporting an empty set of failed assumptions.
    #[derive(Clone, Default)]
    struct EmptyCore(Solver);

    impl SatOracle for EmptyCore {
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
            Some(&[])
        }
    }

    #[test]
    fn core_shrink() {
        let network = set_latches();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        pdr.push_frame();
        pdr.push_frame();

        // Only c = 0 fails, and c = 0 excludes the initial state.
        let ac = cube(&[(0, true), (2, false)]);
        assert!(!pdr.check_reachability(2, &ac, true).unwrap());
        assert_eq!(pdr.remove_from_proof(2, &ac), cube(&[(2, false)]));

        // Only b = 0 fails, though b = 0 alone intersects the initial state, so a = 1 is kept.
        let ab = cube(&[(0, true), (1, false)]);
        assert!(!pdr.check_reachability(2, &ab, true).unwrap());
        assert_eq!(pdr.remove_from_proof(2, &ab), ab);
    }

    #[test]
    fn core_shrink_without_core() {
        let network = set_latches();
        let ac = cube(&[(0, true), (2, false)]);

        let mut pdr = Pdr::with_oracle(&network, Config::default(), EmptyCore::default()).unwrap();
        pdr.push_frame();
        assert!(!pdr.check_reachability(1, &ac, true).unwrap());
        assert_eq!(pdr.remove_from_proof(1, &ac), ac);

        let mut config = Config::default();
        config.core_shrink.value = false;
        let mut pdr = Pdr::from_config(&network, config).unwrap();
        pdr.push_frame();
        assert!(!pdr.check_reachability(1, &ac, true).unwrap());
        assert_eq!(pdr.remove_from_proof(1, &ac), ac);
    }

    #[test]
    fn drop_order_by_priority() {
        // Either literal of x ∧ y may be dropped, though not both, so the first tried is dropped.
        let network = held_pair();
        let xy = cube(&[(0, true), (1, true)]);

        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        pdr.push_frame();
        pdr.add_blocked_cube(1, cube(&[(1, true)])).unwrap();
        assert_eq!(pdr.priorities(), &[0, 1]);
        assert!(!pdr.check_reachability(1, &xy, true).unwrap());
        assert_eq!(pdr.generalize_proof(1, xy.clone()).unwrap(), cube(&[(1, true)]));

        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        pdr.push_frame();
        pdr.add_blocked_cube(1, cube(&[(0, true)])).unwrap();
        assert_eq!(pdr.priorities(), &[1, 0]);
        assert_eq!(pdr.generalize_proof(1, xy).unwrap(), cube(&[(0, true)]));
    }

    #[test]
    fn forward_to_highest_frame() {
        let network = delay();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        for _ in 0..3 {
            pdr.push_frame();
        }

        // m = 1 is blocked at every frame.
        let m = cube(&[(0, true)]);
        assert!(!pdr.check_reachability(1, &m, true).unwrap());
        assert_eq!(pdr.forward_proof(1, m.clone()).unwrap(), (3, m));

        // q = 1 is blocked at 1 only, as p is set after one step.
        let q = cube(&[(2, true)]);
        assert!(!pdr.check_reachability(1, &q, true).unwrap());
        assert_eq!(pdr.forward_proof(1, q.clone()).unwrap(), (1, q));
    }

    #[test]
    fn generalization_stays_blocked() {
        let network = delay();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        for _ in 0..3 {
            pdr.push_frame();
        }

        let mut generalized = 0;
        for bits in 0..8_usize {
            let state = Cube::new((0..3).map(|index| LatchLiteral::new(index, bits & (1 << index) != 0)));
            if state.intersects(pdr.initial_state()) {
                continue;
            }
            for frame in 1..=pdr.depth() {
                if pdr.check_reachability(frame, &state, true).unwrap() {
                    continue;
                }
                let (blocked_frame, blocked) = pdr.generalize(frame, &state).unwrap();
                assert!(blocked_frame >= frame);
                assert!(blocked.subsumes(&state));
                assert!(!blocked.intersects(pdr.initial_state()));
                assert!(pdr.is_blocked(blocked_frame, &blocked).unwrap(), "{state} to {blocked} at {blocked_frame}");
                generalized += 1;
            }
        }
        assert!(generalized > 0);
    }
}
