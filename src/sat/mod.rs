/*!
A SAT oracle, and a small conflict-driven clause-learning solver which implements it.

The engine asks four things of a SAT solver, collected in the [SatOracle] trait:
- Fresh atoms and clauses, added incrementally.
- Solves under a list of assumption literals.
- The model of a satisfiable solve.
- The failed assumptions of an unsatisfiable solve, a subset of the assumptions which is unsatisfiable with the clauses.

The engine clones a template solver each time a frame is opened, and so an oracle must be [Clone].

Failed assumptions are optional.
An oracle which returns `None` from [failed_assumptions](SatOracle::failed_assumptions) is still sound, though cubes are then generalized by literal dropping alone.

The [Solver] is split over a few files, in the way of a CDCL procedure:
- [solver] for atoms, assignments, decisions and backjumps.
- [bcp] for propagation.
- [analysis] for conflicts and failed assumptions.
- [solve] for the main loop.

```rust
# use otter_pdr::sat::{literal::CLiteral, solver::Solver, SatOracle, SolveReport};
let mut solver = Solver::default();
let p = CLiteral::new(solver.fresh_atom(), true);
let q = CLiteral::new(solver.fresh_atom(), true);

solver.add_clause(&[!p, q]);

assert_eq!(solver.solve_given(&[p, !q]), SolveReport::Unsatisfiable);
assert_eq!(solver.solve_given(&[p]), SolveReport::Satisfiable);
assert_eq!(solver.value_of(q.atom()), Some(true));
```
*/

pub mod analysis;
pub mod bcp;
pub mod clause_db;
pub mod literal;
pub mod solve;
pub mod solver;

pub use solver::Solver;

use literal::{Atom, CLiteral};

/// The result of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveReport {
    Satisfiable,
    Unsatisfiable,
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
        }
    }
}

/// The interface between the engine and a SAT solver.
pub trait SatOracle: Clone {
    /// A fresh atom.
    fn fresh_atom(&mut self) -> Atom;

    /// Adds a clause, permanently.
    fn add_clause(&mut self, clause: &[CLiteral]);

    /// Determines satisfiability given `assumptions`.
    fn solve_given(&mut self, assumptions: &[CLiteral]) -> SolveReport;

    /// The value of `atom` on the model of the last solve, if satisfiable and valued.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// The failed assumptions of the last solve, if unsatisfiable and supported by the oracle.
    fn failed_assumptions(&self) -> Option<&[CLiteral]>;
}
