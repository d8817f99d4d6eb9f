/*!
Extraction of cubes from models, widened by ternary simulation.

After a satisfiable query, the model gives a value to each latch at time 0.
The full state is a cube of predecessors, though a poor one, and [extract_model](Pdr::extract_model) widens it by setting latches to X:

1. The model values of latches (at time 0) and inputs (at each step) seed a [ternary simulation](crate::sim), and the target of the query is checked to hold.
2. Each latch outside the cone of influence of the target is set to X.
3. Each remaining latch is tried at X, latches with priority zero first and then the others, in index order within each group.
   X is kept if the target still holds.

The target is either the bad signal being true, or each latch of a successor cube taking its value in the cube after the steps simulated.
As ternary simulation is conservative, every state of the widened cube reaches the target under the recorded inputs.

Inputs left at X by the model are recorded as false.
*/

use crate::{
    misc::log::targets::{self},
    ntk::Signal,
    pdr::Pdr,
    sat::SatOracle,
    sim::{Ternary, TernarySim},
    structures::{cube::Cube, literal::LatchLiteral},
    types::err::ErrorKind,
};

/// What a model reaches.
pub enum Target<'c> {
    /// The bad signal, at the last step.
    Bad,

    /// The states of the cube, after the last step.
    Successor(&'c Cube),
}

impl<S: SatOracle> Pdr<'_, S> {
    /// A cube of states from the model of the solver at `solver`, each of which reaches `target` in `steps` steps, together with the inputs for each step.
    pub(super) fn extract_model(
        &self,
        solver: usize,
        target: Target,
        steps: usize,
    ) -> Result<(Cube, Vec<Vec<bool>>), ErrorKind> {
        let network = self.network;
        let frame_solver = &self.solvers[solver];

        let mut latches: Vec<Ternary> = (0..network.latch_count())
            .map(|index| frame_solver.value(network.latch_signal(index), 0))
            .collect();
        let inputs: Vec<Vec<Ternary>> = (0..steps)
            .map(|step| {
                network
                    .inputs()
                    .iter()
                    .map(|node| frame_solver.value(Signal::new(*node, false), step))
                    .collect()
            })
            .collect();

        let mut sim = TernarySim::new(network);
        if !self.target_holds(&mut sim, &latches, &inputs, &target) {
            return Err(self.inconsistency("Model does not reach the target", None));
        }

        if self.config.ternary_widening.value {
            let cone = self.latch_cone(&target, steps);
            for (latch, in_cone) in latches.iter_mut().zip(cone) {
                if !in_cone {
                    *latch = Ternary::X;
                }
            }

            let mut order: Vec<usize> = (0..latches.len())
                .filter(|index| !latches[*index].is_x())
                .collect();
            order.sort_by_key(|index| self.priority[*index] > 0);

            for index in order {
                let value = latches[index];
                latches[index] = Ternary::X;
                if !self.target_holds(&mut sim, &latches, &inputs, &target) {
                    latches[index] = value;
                }
            }
        }

        let cube = Cube::new(
            latches
                .iter()
                .enumerate()
                .filter_map(|(index, value)| value.as_bool().map(|v| LatchLiteral::new(index, v))),
        );
        let inputs = inputs
            .iter()
            .map(|pattern| {
                pattern
                    .iter()
                    .map(|value| value.as_bool().unwrap_or(false))
                    .collect()
            })
            .collect();

        log::trace!(target: targets::EXTRACT, "Extracted {cube} from solver {solver}");
        Ok((cube, inputs))
    }

    /// True if `target` holds after simulating `inputs` from `latches`.
    fn target_holds(
        &self,
        sim: &mut TernarySim,
        latches: &[Ternary],
        inputs: &[Vec<Ternary>],
        target: &Target,
    ) -> bool {
        sim.reset();
        for (index, value) in latches.iter().enumerate() {
            sim.set_latch(index, *value);
        }
        for (step, pattern) in inputs.iter().enumerate() {
            if step > 0 {
                sim.step();
            }
            for (index, value) in pattern.iter().enumerate() {
                sim.set_input(index, *value);
            }
            sim.simulate();
        }

        match target {
            Target::Bad => sim.value(self.bad) == Ternary::One,
            Target::Successor(cube) => cube.literals().iter().all(|literal| {
                sim.next_state(literal.index()) == Ternary::from_bool(literal.value())
            }),
        }
    }

    /// A mask over latches marking those which may influence `target` within `steps` steps.
    fn latch_cone(&self, target: &Target, steps: usize) -> Vec<bool> {
        let network = self.network;
        let mut roots: Vec<Signal> = match target {
            Target::Bad => vec![self.bad],
            Target::Successor(cube) => cube
                .literals()
                .iter()
                .map(|literal| network.latches()[literal.index()].next)
                .collect(),
        };

        let mut cone = network.cone(roots.iter().copied());
        for _ in 1..steps {
            roots.extend(
                network
                    .latches()
                    .iter()
                    .filter(|latch| cone[latch.node as usize])
                    .map(|latch| latch.next),
            );
            cone = network.cone(roots.iter().copied());
        }

        network
            .latches()
            .iter()
            .map(|latch| cone[latch.node as usize])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        ntk::{builder::NetworkBuilder, Network},
    };

    /// Latches `a`, `b`, and `c` which hold, with `a ∨ b` as the bad state.
    fn either() -> Network {
        let mut builder = NetworkBuilder::default();
        let latches: Vec<Signal> = (0..3).map(|_| builder.add_latch()).collect();
        for latch in &latches {
            builder.set_next(*latch, *latch).unwrap();
        }
        let bad = builder.add_or(latches[0], latches[1]).unwrap();
        builder.add_bad(bad).unwrap();
        builder.build().unwrap()
    }

    fn cube(literals: &[(usize, bool)]) -> Cube {
        Cube::new(literals.iter().map(|(index, value)| LatchLiteral::new(*index, *value)))
    }

    /// An engine with a second frame, where the model of its solver sets every latch.
    fn every_latch_set(network: &Network, config: Config) -> Pdr<'_> {
        let mut pdr = Pdr::from_config(network, config).unwrap();
        pdr.push_frame();
        let solver = &mut pdr.solvers[1];
        for index in 0..network.latch_count() {
            let latch = solver.literal(network.latch_signal(index), 0).unwrap();
            solver.assume(latch);
        }
        assert!(solver.solve());
        pdr
    }

    #[test]
    fn bad_outside_cone() {
        let network = either();
        let pdr = every_latch_set(&network, Config::default());
        let (cube, inputs) = pdr.extract_model(1, Target::Bad, 1).unwrap();

        // c is outside the cone, and only one of a and b is needed.
        assert!(!cube.literals().iter().any(|literal| literal.index() == 2));
        assert_eq!(cube.len(), 1);
        assert_eq!(inputs, vec![Vec::<bool>::new()]);
    }

    #[test]
    fn widening_order() {
        let network = either();

        let mut pdr = every_latch_set(&network, Config::default());
        pdr.priority[0] = 3;
        let (widened, _) = pdr.extract_model(1, Target::Bad, 1).unwrap();
        assert_eq!(widened, cube(&[(0, true)]));

        let mut pdr = every_latch_set(&network, Config::default());
        pdr.priority[1] = 3;
        let (widened, _) = pdr.extract_model(1, Target::Bad, 1).unwrap();
        assert_eq!(widened, cube(&[(1, true)]));

        // With equal priorities, a is tried first.
        let pdr = every_latch_set(&network, Config::default());
        let (widened, _) = pdr.extract_model(1, Target::Bad, 1).unwrap();
        assert_eq!(widened, cube(&[(1, true)]));
    }

    #[test]
    fn without_widening() {
        let network = either();
        let mut config = Config::default();
        config.ternary_widening.value = false;

        let pdr = every_latch_set(&network, config);
        let (full, _) = pdr.extract_model(1, Target::Bad, 1).unwrap();
        assert_eq!(full, cube(&[(0, true), (1, true), (2, true)]));

        let successor = cube(&[(2, true)]);
        let (full, _) = pdr.extract_model(1, Target::Successor(&successor), 1).unwrap();
        assert_eq!(full.len(), 3);
    }

    #[test]
    fn successor_cone() {
        let network = either();
        let pdr = every_latch_set(&network, Config::default());

        let successor = cube(&[(2, true)]);
        let (widened, _) = pdr.extract_model(1, Target::Successor(&successor), 1).unwrap();
        assert_eq!(widened, successor);

        let successor = cube(&[(0, true), (1, true)]);
        let (widened, _) = pdr.extract_model(1, Target::Successor(&successor), 1).unwrap();
        assert_eq!(widened, successor);
    }

    #[test]
    fn model_missing_target() {
        let network = either();
        let pdr = every_latch_set(&network, Config::default());
        let successor = cube(&[(2, false)]);
        assert!(matches!(
            pdr.extract_model(1, Target::Successor(&successor), 1),
            Err(ErrorKind::SolverInconsistency(_))
        ));
    }
}
