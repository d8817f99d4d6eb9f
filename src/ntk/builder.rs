/*!
Incremental construction of a [Network].

Latches are created with an initial value of false and without a next-state signal.
The next-state signal must be given with [set_next](NetworkBuilder::set_next) before the network is [built](NetworkBuilder::build).

Besides [add_and](NetworkBuilder::add_and), a few derived gates are provided for convenience.
Each is expressed through and gates and inversion.
*/

use crate::{
    ntk::{Latch, Network, Node, NodeId, Signal},
    types::err::BuildError,
};

/// A network under construction.
#[derive(Default)]
pub struct NetworkBuilder {
    network: Network,
    next_given: Vec<bool>,
}

impl NetworkBuilder {
    fn fresh_node(&mut self, node: Node) -> Signal {
        let id = self.network.nodes.len() as NodeId;
        self.network.nodes.push(node);
        Signal::new(id, false)
    }

    fn check(&self, signal: Signal) -> Result<(), BuildError> {
        match (signal.node() as usize) < self.network.nodes.len() {
            true => Ok(()),
            false => Err(BuildError::DanglingSignal(signal.node())),
        }
    }

    fn latch_index(&self, latch: Signal) -> Result<usize, BuildError> {
        match self.network.nodes.get(latch.node() as usize) {
            Some(Node::Latch(index)) if !latch.is_inverted() => Ok(*index),
            _ => Err(BuildError::NotALatch(latch.node())),
        }
    }

    /// A fresh primary input.
    pub fn add_input(&mut self) -> Signal {
        let index = self.network.inputs.len();
        let signal = self.fresh_node(Node::Input(index));
        self.network.inputs.push(signal.node());
        signal
    }

    /// A fresh latch, initialised to false.
    pub fn add_latch(&mut self) -> Signal {
        let index = self.network.latches.len();
        let signal = self.fresh_node(Node::Latch(index));
        self.network.latches.push(Latch {
            node: signal.node(),
            next: Signal::FALSE,
            init: Signal::FALSE,
        });
        self.next_given.push(false);
        signal
    }

    /// Sets the next-state signal of `latch`.
    pub fn set_next(&mut self, latch: Signal, next: Signal) -> Result<(), BuildError> {
        self.check(next)?;
        let index = self.latch_index(latch)?;
        self.network.latches[index].next = next;
        self.next_given[index] = true;
        Ok(())
    }

    /// Sets the initial-value signal of `latch`.
    ///
    /// Anything other than a constant or the latch itself is accepted here, though rejected at the start of verification.
    pub fn set_init(&mut self, latch: Signal, init: Signal) -> Result<(), BuildError> {
        self.check(init)?;
        let index = self.latch_index(latch)?;
        self.network.latches[index].init = init;
        Ok(())
    }

    /// The conjunction of `a` and `b`.
    pub fn add_and(&mut self, a: Signal, b: Signal) -> Result<Signal, BuildError> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.fresh_node(Node::And(a, b)))
    }

    /// The disjunction of `a` and `b`.
    pub fn add_or(&mut self, a: Signal, b: Signal) -> Result<Signal, BuildError> {
        Ok(!self.add_and(!a, !b)?)
    }

    /// The exclusive disjunction of `a` and `b`.
    pub fn add_xor(&mut self, a: Signal, b: Signal) -> Result<Signal, BuildError> {
        let both = self.add_and(a, b)?;
        let neither = self.add_and(!a, !b)?;
        self.add_and(!both, !neither)
    }

    /// Adds `signal` as an output.
    pub fn add_output(&mut self, signal: Signal) -> Result<(), BuildError> {
        self.check(signal)?;
        self.network.outputs.push(signal);
        Ok(())
    }

    /// Adds `signal` as a bad state property.
    pub fn add_bad(&mut self, signal: Signal) -> Result<(), BuildError> {
        self.check(signal)?;
        self.network.bads.push(signal);
        Ok(())
    }

    /// The network, provided each latch has a next-state signal.
    pub fn build(self) -> Result<Network, BuildError> {
        if let Some(index) = self.next_given.iter().position(|given| !given) {
            return Err(BuildError::MissingNext(index));
        }
        Ok(self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ntk::InitValue, types::err::ErrorKind};

    #[test]
    fn missing_next() {
        let mut builder = NetworkBuilder::default();
        let _ = builder.add_latch();
        assert_eq!(builder.build().err(), Some(BuildError::MissingNext(0)));
    }

    #[test]
    fn dangling() {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_input();
        assert_eq!(
            builder.add_and(a, Signal::new(9, false)),
            Err(BuildError::DanglingSignal(9))
        );
    }

    #[test]
    fn not_a_latch() {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_input();
        assert_eq!(builder.set_next(a, a), Err(BuildError::NotALatch(a.node())));
    }

    #[test]
    fn init_values() {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_input();
        let zero = builder.add_latch();
        let one = builder.add_latch();
        let free = builder.add_latch();
        let odd = builder.add_latch();
        for latch in [zero, one, free, odd] {
            builder.set_next(latch, a).unwrap();
        }
        builder.set_init(one, Signal::TRUE).unwrap();
        builder.set_init(free, free).unwrap();
        builder.set_init(odd, a).unwrap();
        let network = builder.build().unwrap();

        assert_eq!(network.init_value(0), Ok(InitValue::Zero));
        assert_eq!(network.init_value(1), Ok(InitValue::One));
        assert_eq!(network.init_value(2), Ok(InitValue::Free));
        assert!(network.init_value(3).is_err());
        assert!(network.initial_state().is_err());
    }

    #[test]
    fn every_unsupported_init() {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_input();
        let latches: Vec<Signal> = (0..4).map(|_| builder.add_latch()).collect();
        for latch in &latches {
            builder.set_next(*latch, *latch).unwrap();
        }
        builder.set_init(latches[1], a).unwrap();
        builder.set_init(latches[2], latches[2]).unwrap();
        builder.set_init(latches[3], !a).unwrap();
        let network = builder.build().unwrap();

        assert_eq!(network.unsupported_latches(), vec![1, 3]);
        assert_eq!(
            network.initial_state(),
            Err(ErrorKind::UnsupportedInitialState { latch: 1 })
        );
    }

    #[test]
    fn cone_stops_at_latches() {
        let mut builder = NetworkBuilder::default();
        let a = builder.add_input();
        let b = builder.add_input();
        let l = builder.add_latch();
        let g = builder.add_and(a, l).unwrap();
        let h = builder.add_and(b, !l).unwrap();
        builder.set_next(l, h).unwrap();
        let network = builder.build().unwrap();

        let cone = network.cone([g]);
        assert!(cone[a.node() as usize]);
        assert!(cone[l.node() as usize]);
        assert!(cone[g.node() as usize]);
        assert!(!cone[b.node() as usize]);
        assert!(!cone[h.node() as usize]);
    }
}
