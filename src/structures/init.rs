//! The initial state of a network, as a (partial) assignment to latches.
//!
//! A latch initialised to a constant has a value, and a latch initialised to itself (an 'uninitialised' latch in AIGER terms) is free.

use crate::structures::literal::LatchLiteral;

/// An initial value for each latch, with `None` for a free latch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialState {
    values: Vec<Option<bool>>,
}

impl From<Vec<Option<bool>>> for InitialState {
    fn from(values: Vec<Option<bool>>) -> Self {
        InitialState { values }
    }
}

impl InitialState {
    /// The initial value of the latch at `index`, if constant.
    pub fn value(&self, index: usize) -> Option<bool> {
        self.values.get(index).copied().flatten()
    }

    /// True if some initial state satisfies `literal`.
    pub fn admits(&self, literal: LatchLiteral) -> bool {
        self.value(literal.index())
            .map_or(true, |value| value == literal.value())
    }

    /// True if every initial state falsifies `literal`.
    pub fn excludes(&self, literal: LatchLiteral) -> bool {
        !self.admits(literal)
    }

    /// The count of latches.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// An iterator over the initial values, by latch index.
    pub fn iter(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        self.values.iter().copied()
    }
}
