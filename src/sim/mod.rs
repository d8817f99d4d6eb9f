/*!
Three-valued (0/1/X) simulation of a network.

Values are given to inputs and latches, and [simulate](TernarySim::simulate) computes the value of each and node in a single pass over the nodes, in identifier (and so topological) order.
An X value stands for 'either', and the and of X with 0 is 0, so a value of 0 or 1 on a signal holds for every completion of the X values.

The simulator is used in two ways:
- With some X values, to widen a model from the SAT solver into a cube (see [extract](crate::pdr::extract)).
- With only 0/1 values, to replay a counterexample trace (see [certify](crate::reports::certify)).

```rust
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::sim::{Ternary, TernarySim};
let mut builder = NetworkBuilder::default();
let a = builder.add_input();
let b = builder.add_input();
let g = builder.add_and(a, b).unwrap();
builder.add_output(g).unwrap();
let network = builder.build().unwrap();

let mut sim = TernarySim::new(&network);
sim.set_input(0, Ternary::Zero);
sim.simulate();
assert_eq!(sim.value(g), Ternary::Zero);

sim.set_input(0, Ternary::One);
sim.simulate();
assert_eq!(sim.value(g), Ternary::X);
```
*/

use crate::ntk::{Network, Node, Signal};

/// A three-valued boolean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ternary {
    Zero,
    One,
    #[default]
    X,
}

impl Ternary {
    pub fn from_bool(value: bool) -> Self {
        match value {
            true => Ternary::One,
            false => Ternary::Zero,
        }
    }

    /// The boolean value, if not X.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Ternary::Zero => Some(false),
            Ternary::One => Some(true),
            Ternary::X => None,
        }
    }

    pub fn is_x(&self) -> bool {
        matches!(self, Ternary::X)
    }

    pub fn and(self, other: Ternary) -> Ternary {
        match (self, other) {
            (Ternary::Zero, _) | (_, Ternary::Zero) => Ternary::Zero,
            (Ternary::One, Ternary::One) => Ternary::One,
            _ => Ternary::X,
        }
    }

    /// The value, inverted if `inverted`.
    pub fn invert_if(self, inverted: bool) -> Ternary {
        match (self, inverted) {
            (Ternary::Zero, true) => Ternary::One,
            (Ternary::One, true) => Ternary::Zero,
            (value, _) => value,
        }
    }
}

impl std::ops::Not for Ternary {
    type Output = Ternary;

    fn not(self) -> Self::Output {
        self.invert_if(true)
    }
}

impl std::fmt::Display for Ternary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ternary::Zero => write!(f, "0"),
            Ternary::One => write!(f, "1"),
            Ternary::X => write!(f, "x"),
        }
    }
}

/// A simulator over a network, holding one value per node.
pub struct TernarySim<'n> {
    network: &'n Network,
    values: Vec<Ternary>,
}

impl<'n> TernarySim<'n> {
    /// A simulator with every input and latch set to X.
    pub fn new(network: &'n Network) -> Self {
        let mut values = vec![Ternary::X; network.node_count()];
        values[0] = Ternary::Zero;
        TernarySim { network, values }
    }

    pub fn network(&self) -> &'n Network {
        self.network
    }

    /// Sets every input and latch to X.
    pub fn reset(&mut self) {
        self.values.fill(Ternary::X);
        self.values[0] = Ternary::Zero;
    }

    pub fn set_input(&mut self, index: usize, value: Ternary) {
        self.values[self.network.inputs()[index] as usize] = value;
    }

    pub fn set_latch(&mut self, index: usize, value: Ternary) {
        self.values[self.network.latches()[index].node as usize] = value;
    }

    pub fn latch(&self, index: usize) -> Ternary {
        self.values[self.network.latches()[index].node as usize]
    }

    pub fn input(&self, index: usize) -> Ternary {
        self.values[self.network.inputs()[index] as usize]
    }

    /// Computes the value of every and node from the values of inputs and latches.
    pub fn simulate(&mut self) {
        let network = self.network;
        for (id, node) in network.nodes().iter().enumerate() {
            if let Node::And(a, b) = node {
                self.values[id] = self.value(*a).and(self.value(*b));
            }
        }
    }

    /// The value of `signal`, as of the last call to [simulate](TernarySim::simulate).
    pub fn value(&self, signal: Signal) -> Ternary {
        self.values[signal.node() as usize].invert_if(signal.is_inverted())
    }

    /// The value of the next-state signal of the latch at `index`.
    pub fn next_state(&self, index: usize) -> Ternary {
        self.value(self.network.latches()[index].next)
    }

    /// Moves the next-state value of each latch into the latch, leaving inputs unchanged.
    ///
    /// A call to [simulate](TernarySim::simulate) is required to update and nodes afterwards.
    pub fn step(&mut self) {
        let next: Vec<Ternary> = (0..self.network.latch_count())
            .map(|index| self.next_state(index))
            .collect();
        for (index, value) in next.into_iter().enumerate() {
            self.set_latch(index, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntk::builder::NetworkBuilder;

    #[test]
    fn ternary_and() {
        use Ternary::*;
        assert_eq!(Zero.and(X), Zero);
        assert_eq!(X.and(Zero), Zero);
        assert_eq!(One.and(X), X);
        assert_eq!(One.and(One), One);
        assert_eq!(!X, X);
        assert_eq!(!Zero, One);
    }

    #[test]
    fn toggling_latch() {
        let mut builder = NetworkBuilder::default();
        let l = builder.add_latch();
        builder.set_next(l, !l).unwrap();
        let network = builder.build().unwrap();

        let mut sim = TernarySim::new(&network);
        sim.set_latch(0, Ternary::Zero);
        sim.simulate();
        assert_eq!(sim.next_state(0), Ternary::One);
        sim.step();
        sim.simulate();
        assert_eq!(sim.latch(0), Ternary::One);
        assert_eq!(sim.next_state(0), Ternary::Zero);
    }

    #[test]
    fn constants() {
        let network = NetworkBuilder::default().build().unwrap();
        let sim = TernarySim::new(&network);
        assert_eq!(sim.value(Signal::FALSE), Ternary::Zero);
        assert_eq!(sim.value(Signal::TRUE), Ternary::One);
    }
}
