/*!
Property directed reachability, also known as IC3.

# Overview

The engine keeps a sequence of frames `F_0, F_1, …, F_k`, where frame `k` is the *frontier*.
Each frame stores the cubes blocked at exactly that frame, and the states of frame *i* are those outside every cube stored at *i* or above.
So, each frame describes a superset of the states reachable in at most *i* steps, and higher frames describe larger sets of states.

Each frame has its own [FrameSolver], holding:
- The transition relation, cloned from a template.
- The clause `¬c` for each cube `c` stored at the frame or above.
- The clause `¬bad`, once the frame is no longer the frontier.
- For frame 0 only, the initial state.

# The loop

Roughly, a [solve](Pdr::solve) is:

```none
loop {
    if bad is reachable in the frontier {
        extract a cube of states which reach bad, and block it
        -- a counterexample if the cube cannot be blocked
    } else {
        open a new frontier, and propagate cubes forward
        -- a proof if some frame becomes empty
    }
}
```

Blocking is detailed in [block], generalization of blocked cubes in [generalize], extraction of cubes from models in [extract], and propagation in [propagate].

# Bookkeeping

The cubes on a path to a bad state are kept in a [CubeArena], and obligations to block a cube at some frame in an [ObligationQueue].
Each latch has a priority, the count of times a cube blocked at some frame had a literal on the latch.
Priorities order the literals tried for removal during generalization, and the latches tried for widening during extraction.

```rust
# use otter_pdr::config::Config;
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::pdr::Pdr;
# use otter_pdr::reports::Outcome;
// A latch which toggles, starting at 0, with the latch as the bad state.
let mut builder = NetworkBuilder::default();
let l = builder.add_latch();
builder.set_next(l, !l).unwrap();
builder.add_bad(l).unwrap();
let network = builder.build().unwrap();

let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
match pdr.solve().unwrap() {
    Outcome::Disproved(trace) => assert_eq!(trace.inputs.len(), 2),
    _ => panic!("the bad state is reachable"),
}
```
*/

pub mod arena;
pub mod block;
pub mod callbacks;
pub mod counters;
pub mod extract;
pub mod generalize;
pub mod propagate;
pub mod scheduler;
pub mod solve;

use arena::{CubeArena, CubeKey};
use callbacks::{CallbackProgress, CallbackTerminate};
use counters::Counters;
use scheduler::ObligationQueue;

use crate::{
    adapter::FrameSolver,
    config::Config,
    ntk::{Network, Signal},
    sat::{SatOracle, Solver},
    structures::{cube::Cube, frame::Frame, init::InitialState},
    types::err::{Diagnostics, ErrorKind},
};

/// The engine.
pub struct Pdr<'n, S: SatOracle = Solver> {
    pub config: Config,
    pub counters: Counters,

    network: &'n Network,
    init: InitialState,
    bad: Signal,

    frames: Vec<Frame>,
    solvers: Vec<FrameSolver<'n, S>>,

    /// A solver with latches and the bad signal loaded at time 0, and no further clause.
    template: FrameSolver<'n, S>,

    arena: CubeArena,
    queue: ObligationQueue,

    /// The priority of each latch.
    priority: Vec<usize>,

    /// The bound to which a bounded model check found no counterexample, if made.
    bmc_held: Option<usize>,

    callback_progress: Option<Box<CallbackProgress>>,
    callback_terminate: Option<Box<CallbackTerminate>>,
}

impl<'n> Pdr<'n, Solver> {
    /// An engine for the property of `network` given by `config`, using the built in SAT solver.
    pub fn from_config(network: &'n Network, config: Config) -> Result<Self, ErrorKind> {
        let oracle = Solver::from_config(config.solver_config());
        Pdr::with_oracle(network, config, oracle)
    }
}

impl<'n, S: SatOracle> Pdr<'n, S> {
    /// An engine for the property of `network` given by `config`, with each frame solver cloned from `oracle`.
    ///
    /// Fails if the initial state of the network is not supported, or the property is missing.
    pub fn with_oracle(network: &'n Network, config: Config, oracle: S) -> Result<Self, ErrorKind> {
        let init = network.initial_state()?;
        let bad = network.property(config.property.value)?;

        let mut template = FrameSolver::new(network, oracle);
        template.load_latches(0)?;
        template.load(bad, 0)?;

        let mut initial = template.clone();
        for (index, value) in init.iter().enumerate() {
            if let Some(value) = value {
                let latch = initial.literal(network.latch_signal(index), 0)?;
                initial.assert_clause(&[latch.negate_if(!value)]);
            }
        }

        Ok(Pdr {
            config,
            counters: Counters {
                frames: 1,
                ..Counters::default()
            },
            network,
            init,
            bad,
            frames: vec![Frame::default()],
            solvers: vec![initial],
            template,
            arena: CubeArena::default(),
            queue: ObligationQueue::default(),
            priority: vec![0; network.latch_count()],
            bmc_held: None,
            callback_progress: None,
            callback_terminate: None,
        })
    }

    pub fn network(&self) -> &'n Network {
        self.network
    }

    /// The index of the frontier frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn initial_state(&self) -> &InitialState {
        &self.init
    }

    /// The signal which is true on bad states.
    pub fn bad(&self) -> Signal {
        self.bad
    }

    /// The priority of each latch.
    pub fn priorities(&self) -> &[usize] {
        &self.priority
    }

    /// Notes that no counterexample shorter than `bound` exists.
    ///
    /// Frames below `bound` are then opened without a query for a bad state, with `¬bad` asserted in their solvers.
    /// And, a shorter counterexample found by the engine is reported as an inconsistency.
    pub fn note_bmc_held(&mut self, bound: usize) {
        self.bmc_held = Some(bound);
    }

    /// True if `cube` cannot be reached in one step from the states of the frame below `frame`.
    ///
    /// Intended for checks after a run.
    pub fn is_blocked(&mut self, frame: usize, cube: &Cube) -> Result<bool, ErrorKind> {
        match frame {
            0 => Ok(false),
            _ => Ok(!self.check_reachability(frame, cube, true)?),
        }
    }

    fn frame_sizes(&self) -> Vec<usize> {
        self.frames.iter().map(|frame| frame.len()).collect()
    }

    /// An inconsistency, with a snapshot of the frames and the queue.
    pub(crate) fn inconsistency(&self, message: &str, cube: Option<Cube>) -> ErrorKind {
        log::error!(target: crate::misc::log::targets::PDR, "{message}");
        ErrorKind::SolverInconsistency(Box::new(Diagnostics {
            message: message.to_string(),
            depth: self.depth(),
            frame_sizes: self.frame_sizes(),
            frames: self.frames.iter().map(|frame| frame.cubes().to_vec()).collect(),
            obligations: self.queue.len(),
            cube,
        }))
    }

    /// Opens a fresh frontier frame.
    fn push_frame(&mut self) {
        self.frames.push(Frame::default());
        self.solvers.push(self.template.clone());
        self.counters.frames += 1;
    }

    /// Adds an obligation to block the cube at `key` at `frame`.
    fn enqueue(&mut self, frame: usize, key: CubeKey) {
        self.arena.retain(key);
        self.queue.add(frame, key);
    }

    /// Removes every obligation.
    fn clear_obligations(&mut self) {
        for (_, key) in self.queue.drain() {
            self.arena.release(key);
        }
    }
}
