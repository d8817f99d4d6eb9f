/*!
The interface between a network and a SAT oracle.

A [FrameSolver] owns one oracle, and maps each pair of a node and a time step to a literal of the oracle.
Signals are instantiated lazily by [load](FrameSolver::load), which expands the combinational cone of the signal with an explicit stack.
The encoding of a node at time `t` is:
- The constant node: a single atom, asserted false once for all time steps.
- An input: a fresh atom.
- A latch at time 0: a fresh atom.
- A latch at time `t > 0`: the literal of its next-state signal at time `t - 1`.
- An and node: a fresh atom `g` with the (Tseitin) clauses `(¬g ∨ a)`, `(¬g ∨ b)` and `(g ∨ ¬a ∨ ¬b)`.

So, time 0 is the present state, and time 1 the next state, with the transition relation encoded by the shared literals of latches at time 1.

Assumptions are collected with [assume](FrameSolver::assume) and used by the next [solve](FrameSolver::solve) only.

A frame solver is [Clone], and a clone is entirely independent of the original.

```rust
# use otter_pdr::adapter::FrameSolver;
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::sat::Solver;
# use otter_pdr::sim::Ternary;
let mut builder = NetworkBuilder::default();
let l = builder.add_latch();
builder.set_next(l, !l).unwrap();
let network = builder.build().unwrap();

let mut solver = FrameSolver::new(&network, Solver::default());
let now = solver.load(l, 0).unwrap();
let next = solver.load(l, 1).unwrap();

solver.assume(now);
solver.assume(next);
assert!(!solver.solve());

solver.assume(now);
assert!(solver.solve());
assert_eq!(solver.value(l, 1), Ternary::Zero);
```
*/

use crate::{
    misc::log::targets::{self},
    ntk::{Network, Node, NodeId, Signal},
    sat::{literal::CLiteral, SatOracle, SolveReport},
    sim::Ternary,
    structures::cube::Cube,
    types::err::AdapterError,
};

/// An oracle, together with the literals of nodes at each time step.
#[derive(Clone)]
pub struct FrameSolver<'n, S: SatOracle> {
    network: &'n Network,
    oracle: S,

    /// The literal of each node, by time step and then node.
    cache: Vec<Vec<Option<CLiteral>>>,

    /// A literal which is false on every model.
    false_literal: CLiteral,

    assumptions: Vec<CLiteral>,

    /// Activation literals to be asserted false before the next solve.
    retired: Vec<CLiteral>,

    /// A count of calls to solve.
    pub solves: usize,
}

impl<'n, S: SatOracle> FrameSolver<'n, S> {
    pub fn new(network: &'n Network, mut oracle: S) -> Self {
        let false_literal = CLiteral::new(oracle.fresh_atom(), true);
        oracle.add_clause(&[false_literal.negate()]);
        FrameSolver {
            network,
            oracle,
            cache: Vec::default(),
            false_literal,
            assumptions: Vec::default(),
            retired: Vec::default(),
            solves: 0,
        }
    }

    pub fn network(&self) -> &'n Network {
        self.network
    }

    /// The oracle, e.g. for inspection of its counters.
    pub fn oracle(&self) -> &S {
        &self.oracle
    }

    fn cached(&self, node: NodeId, time: usize) -> Option<CLiteral> {
        self.cache.get(time).and_then(|nodes| nodes[node as usize])
    }

    fn cache_literal(&mut self, node: NodeId, time: usize, literal: CLiteral) {
        while self.cache.len() <= time {
            self.cache.push(vec![None; self.network.node_count()]);
        }
        self.cache[time][node as usize] = Some(literal);
    }

    fn signal_literal(&self, signal: Signal, time: usize) -> Option<CLiteral> {
        self.cached(signal.node(), time)
            .map(|literal| literal.negate_if(signal.is_inverted()))
    }

    /// Instantiates `signal` at `time`, together with its fan-in cone, and returns its literal.
    pub fn load(&mut self, signal: Signal, time: usize) -> Result<CLiteral, AdapterError> {
        if signal.node() as usize >= self.network.node_count() {
            return Err(AdapterError::UnknownNode(signal.node()));
        }

        let network = self.network;
        let mut stack: Vec<(NodeId, usize)> = vec![(signal.node(), time)];

        while let Some(&(node, step)) = stack.last() {
            if self.cached(node, step).is_some() {
                stack.pop();
                continue;
            }

            match network.nodes()[node as usize] {
                Node::Const => {
                    let literal = self.false_literal;
                    self.cache_literal(node, step, literal);
                    stack.pop();
                }

                Node::Input(_) => {
                    let literal = CLiteral::new(self.oracle.fresh_atom(), true);
                    self.cache_literal(node, step, literal);
                    stack.pop();
                }

                Node::Latch(_) if step == 0 => {
                    let literal = CLiteral::new(self.oracle.fresh_atom(), true);
                    self.cache_literal(node, step, literal);
                    stack.pop();
                }

                Node::Latch(index) => {
                    let next = network.latches()[index].next;
                    match self.signal_literal(next, step - 1) {
                        Some(literal) => {
                            self.cache_literal(node, step, literal);
                            stack.pop();
                        }
                        None => stack.push((next.node(), step - 1)),
                    }
                }

                Node::And(a, b) => {
                    match (self.signal_literal(a, step), self.signal_literal(b, step)) {
                        (Some(a), Some(b)) => {
                            let g = CLiteral::new(self.oracle.fresh_atom(), true);
                            self.oracle.add_clause(&[g.negate(), a]);
                            self.oracle.add_clause(&[g.negate(), b]);
                            self.oracle.add_clause(&[g, a.negate(), b.negate()]);
                            self.cache_literal(node, step, g);
                            stack.pop();
                        }
                        (a_literal, b_literal) => {
                            if a_literal.is_none() {
                                stack.push((a.node(), step));
                            }
                            if b_literal.is_none() {
                                stack.push((b.node(), step));
                            }
                        }
                    }
                }
            }
        }

        self.literal(signal, time)
    }

    /// The literal of a loaded `signal` at `time`.
    pub fn literal(&self, signal: Signal, time: usize) -> Result<CLiteral, AdapterError> {
        self.signal_literal(signal, time)
            .ok_or(AdapterError::UnloadedSignal {
                node: signal.node(),
                time,
            })
    }

    /// Loads every latch at `time`.
    pub fn load_latches(&mut self, time: usize) -> Result<(), AdapterError> {
        for index in 0..self.network.latch_count() {
            self.load(self.network.latch_signal(index), time)?;
        }
        Ok(())
    }

    /// The literals of `cube` over latches at `time`, loading latches as needed.
    pub fn cube_literals(&mut self, cube: &Cube, time: usize) -> Result<Vec<CLiteral>, AdapterError> {
        cube.literals()
            .iter()
            .map(|literal| {
                let latch = self.load(self.network.latch_signal(literal.index()), time)?;
                Ok(latch.negate_if(!literal.value()))
            })
            .collect()
    }

    /// Adds `literal` as an assumption of the next solve.
    pub fn assume(&mut self, literal: CLiteral) {
        self.assumptions.push(literal);
    }

    /// Adds `clause`, permanently.
    pub fn assert_clause(&mut self, clause: &[CLiteral]) {
        self.oracle.add_clause(clause);
    }

    /// A fresh literal, free of any clause.
    ///
    /// Used to guard a temporary clause `(¬act ∨ c)`, which is in force when `act` is assumed and is removed by [retire](FrameSolver::retire).
    pub fn activation(&mut self) -> CLiteral {
        CLiteral::new(self.oracle.fresh_atom(), true)
    }

    /// Asserts `¬act` before the next solve, so any clause guarded by `act` is satisfied.
    ///
    /// The assertion is delayed so the model of the last solve remains available.
    pub fn retire(&mut self, act: CLiteral) {
        self.retired.push(act);
    }

    /// Solves under the current assumptions, and clears the assumptions.
    ///
    /// Returns true if satisfiable.
    pub fn solve(&mut self) -> bool {
        self.solves += 1;
        for act in std::mem::take(&mut self.retired) {
            self.oracle.add_clause(&[act.negate()]);
        }
        let assumptions = std::mem::take(&mut self.assumptions);
        let report = self.oracle.solve_given(&assumptions);
        log::trace!(target: targets::ADAPTER, "{report} with {} assumptions", assumptions.len());
        report == SolveReport::Satisfiable
    }

    /// The value of `signal` at `time` on the model of the last solve.
    ///
    /// X if the signal was not loaded, or has no value.
    pub fn value(&self, signal: Signal, time: usize) -> Ternary {
        match self.signal_literal(signal, time) {
            None => Ternary::X,
            Some(literal) => match self.oracle.value_of(literal.atom()) {
                None => Ternary::X,
                Some(value) => Ternary::from_bool(value == literal.polarity()),
            },
        }
    }

    /// The failed assumptions of the last solve, if unsatisfiable and supported by the oracle.
    pub fn conflict(&self) -> Option<&[CLiteral]> {
        self.oracle.failed_assumptions()
    }
}
