/*!
And-inverter graph networks with latches.

A network is a vector of [nodes](Node), each identified by its position in the vector:
- Node 0 is the constant false node.
- Inputs and latches are leaves.
- And nodes have two fan-in [signals](Signal), each a node paired with an inversion bit.

Nodes are only ever created after their fan-ins, and so the order of node identifiers is a topological order of the combinational part of the network.
Simulation and CNF encoding both rely on this.

Each [latch](Latch) has a next-state signal and an initial-value signal.
The initial value is expected to be constant, or the latch itself (in which case the latch is *free* in the initial state).
Anything else is reported as [UnsupportedInitialState](err::ErrorKind::UnsupportedInitialState) by [initial_state](Network::initial_state).

Networks are built with a [NetworkBuilder](builder::NetworkBuilder), or read from the AIGER ASCII format by [aiger].

```rust
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::ntk::Signal;
let mut builder = NetworkBuilder::default();
let a = builder.add_input();
let l = builder.add_latch();
let g = builder.add_and(a, !l).unwrap();
builder.set_next(l, g).unwrap();
builder.add_bad(l).unwrap();

let network = builder.build().unwrap();
assert_eq!(network.latch_count(), 1);
assert_eq!(network.latches()[0].next, g);
assert_eq!(network.latches()[0].init, Signal::FALSE);
```
*/

pub mod aiger;
pub mod builder;

use crate::{
    misc::log::targets::{self},
    structures::init::InitialState,
    types::err::{self, ErrorKind},
};

/// The identifier of a node, its position in the network.
pub type NodeId = u32;

/// A node of the network paired with an inversion bit, packed as `(node << 1) | inverted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(u32);

impl Signal {
    /// The constant false signal.
    pub const FALSE: Signal = Signal(0);

    /// The constant true signal.
    pub const TRUE: Signal = Signal(1);

    pub fn new(node: NodeId, inverted: bool) -> Self {
        Signal((node << 1) | inverted as u32)
    }

    pub fn node(&self) -> NodeId {
        self.0 >> 1
    }

    pub fn is_inverted(&self) -> bool {
        self.0 & 1 == 1
    }

    /// True if the signal is one of the two constants.
    pub fn is_constant(&self) -> bool {
        self.node() == 0
    }
}

impl std::ops::Not for Signal {
    type Output = Signal;

    fn not(self) -> Self::Output {
        Signal(self.0 ^ 1)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.is_inverted() {
            true => write!(f, "!n{}", self.node()),
            false => write!(f, "n{}", self.node()),
        }
    }
}

/// The kinds of node in a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    /// The constant false node.
    Const,

    /// A primary input, with its index among the inputs.
    Input(usize),

    /// A latch, with its index among the latches.
    Latch(usize),

    /// A two-input and gate.
    And(Signal, Signal),
}

/// A latch of the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latch {
    /// The node of the latch.
    pub node: NodeId,

    /// The value of the latch in the next step.
    pub next: Signal,

    /// The value of the latch in the initial state.
    pub init: Signal,
}

/// Interpretations of the initial value of a latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitValue {
    Zero,
    One,
    /// The latch may take either value.
    Free,
}

/// An and-inverter graph with latches.
#[derive(Clone, Debug)]
pub struct Network {
    nodes: Vec<Node>,
    inputs: Vec<NodeId>,
    latches: Vec<Latch>,
    outputs: Vec<Signal>,
    bads: Vec<Signal>,
}

impl Default for Network {
    fn default() -> Self {
        Network {
            nodes: vec![Node::Const],
            inputs: Vec::default(),
            latches: Vec::default(),
            outputs: Vec::default(),
            bads: Vec::default(),
        }
    }
}

impl Network {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The nodes of the inputs, by input index.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn latches(&self) -> &[Latch] {
        &self.latches
    }

    pub fn latch_count(&self) -> usize {
        self.latches.len()
    }

    /// The signal of the latch at `index`.
    pub fn latch_signal(&self, index: usize) -> Signal {
        Signal::new(self.latches[index].node, false)
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn bads(&self) -> &[Signal] {
        &self.bads
    }

    /// The signal which is true exactly on bad states for the property at `index`.
    ///
    /// Bad state properties take precedence, and outputs are used as properties only if there are no bad state properties.
    pub fn property(&self, index: usize) -> Result<Signal, err::PropertyError> {
        let properties = match self.bads.is_empty() {
            true => &self.outputs,
            false => &self.bads,
        };
        properties
            .get(index)
            .copied()
            .ok_or(err::PropertyError::Missing(index))
    }

    /// The interpretation of the initial value of the latch at `index`.
    pub fn init_value(&self, index: usize) -> Result<InitValue, ErrorKind> {
        let latch = &self.latches[index];
        match latch.init {
            Signal::FALSE => Ok(InitValue::Zero),
            Signal::TRUE => Ok(InitValue::One),
            init if init == Signal::new(latch.node, false) => Ok(InitValue::Free),
            _ => Err(ErrorKind::UnsupportedInitialState { latch: index }),
        }
    }

    /// The index of each latch with an unsupported initial value.
    pub fn unsupported_latches(&self) -> Vec<usize> {
        (0..self.latches.len())
            .filter(|index| self.init_value(*index).is_err())
            .collect()
    }

    /// The initial state of the network.
    ///
    /// Each latch with an unsupported initial value is noted with a warning, and the error is given for the first of these.
    pub fn initial_state(&self) -> Result<InitialState, ErrorKind> {
        let mut values = Vec::with_capacity(self.latches.len());
        let mut unsupported = None;
        for index in 0..self.latches.len() {
            match self.init_value(index) {
                Ok(InitValue::Zero) => values.push(Some(false)),
                Ok(InitValue::One) => values.push(Some(true)),
                Ok(InitValue::Free) => values.push(None),
                Err(e) => {
                    log::warn!(target: targets::PDR, "Latch {index} has a non-constant initial value {}", self.latches[index].init);
                    unsupported.get_or_insert(e);
                }
            }
        }
        match unsupported {
            Some(e) => Err(e),
            None => Ok(InitialState::from(values)),
        }
    }

    /// A mask over nodes marking the combinational cone of influence of `roots`.
    ///
    /// The cone stops at (and includes) inputs and latches.
    pub fn cone(&self, roots: impl IntoIterator<Item = Signal>) -> Vec<bool> {
        let mut mask = vec![false; self.nodes.len()];
        let mut todo: Vec<NodeId> = roots.into_iter().map(|s| s.node()).collect();
        while let Some(id) = todo.pop() {
            let marked = &mut mask[id as usize];
            if *marked {
                continue;
            }
            *marked = true;
            if let Node::And(a, b) = self.nodes[id as usize] {
                todo.push(a.node());
                todo.push(b.node());
            }
        }
        mask
    }
}
