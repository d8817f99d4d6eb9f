/*!
Bounded model checking.

A [Bmc] holds a single incremental solver with the initial state asserted at time 0.
Each call to [check](Bmc::check) extends the unrolling up to a bound, one time step at a time:
- The bad signal at step `k` is assumed, and if satisfiable a [Trace] of depth `k` is read from the model.
- Otherwise, `¬bad` at step `k` is asserted, as no shorter counterexample exists for later steps to find.

As the adapter expands latches through time by their next-state signals, step `k` is simply the bad signal loaded at time `k`.

```rust
# use otter_pdr::bmc::{Bmc, BmcResult};
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::sat::Solver;
let mut builder = NetworkBuilder::default();
let l = builder.add_latch();
builder.set_next(l, !l).unwrap();
builder.add_bad(l).unwrap();
let network = builder.build().unwrap();

let mut bmc = Bmc::new(&network, 0, Solver::default()).unwrap();
assert_eq!(bmc.check(1).unwrap(), BmcResult::Held(1));
match bmc.check(4).unwrap() {
    BmcResult::Fired(trace) => assert_eq!(trace.depth(), 1),
    BmcResult::Held(_) => panic!("the latch is set after one step"),
}
```
*/

use crate::{
    adapter::FrameSolver,
    misc::log::targets::{self},
    ntk::{Network, Signal},
    reports::Trace,
    sat::SatOracle,
    types::err::ErrorKind,
};

/// The result of a bounded check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BmcResult {
    /// A counterexample, of the least depth.
    Fired(Trace),

    /// No counterexample of depth less than the bound.
    Held(usize),
}

/// An incremental bounded model checker.
pub struct Bmc<'n, S: SatOracle> {
    network: &'n Network,
    solver: FrameSolver<'n, S>,
    bad: Signal,

    /// Steps below this are known to be safe, and have `¬bad` asserted.
    checked: usize,
}

impl<'n, S: SatOracle> Bmc<'n, S> {
    /// A checker for the property at `property` of `network`.
    pub fn new(network: &'n Network, property: usize, oracle: S) -> Result<Self, ErrorKind> {
        let init = network.initial_state()?;
        let bad = network.property(property)?;

        let mut solver = FrameSolver::new(network, oracle);
        solver.load_latches(0)?;
        for (index, value) in init.iter().enumerate() {
            if let Some(value) = value {
                let latch = solver.literal(network.latch_signal(index), 0)?;
                solver.assert_clause(&[latch.negate_if(!value)]);
            }
        }

        Ok(Bmc {
            network,
            solver,
            bad,
            checked: 0,
        })
    }

    /// Checks for a counterexample of depth less than `bound`.
    pub fn check(&mut self, bound: usize) -> Result<BmcResult, ErrorKind> {
        while self.checked < bound {
            let step = self.checked;
            let bad = self.solver.load(self.bad, step)?;
            self.solver.assume(bad);

            if self.solver.solve() {
                log::info!(target: targets::BMC, "Fired at step {step}");
                return Ok(BmcResult::Fired(self.trace(step)));
            }

            log::debug!(target: targets::BMC, "Held at step {step}");
            self.solver.assert_clause(&[bad.negate()]);
            self.checked += 1;
        }
        Ok(BmcResult::Held(self.checked))
    }

    /// The trace of depth `depth` on the model of the last solve.
    fn trace(&self, depth: usize) -> Trace {
        let network = self.network;
        let initial = (0..network.latch_count())
            .map(|index| {
                self.solver
                    .value(network.latch_signal(index), 0)
                    .as_bool()
                    .unwrap_or(false)
            })
            .collect();

        let inputs = (0..=depth)
            .map(|step| {
                network
                    .inputs()
                    .iter()
                    .map(|node| {
                        self.solver
                            .value(Signal::new(*node, false), step)
                            .as_bool()
                            .unwrap_or(false)
                    })
                    .collect()
            })
            .collect();

        Trace { initial, inputs }
    }
}
