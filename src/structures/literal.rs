//! Literals over the latches (state variables) of a network.
//!
//! A literal pairs the index of a latch with a value, and is packed into a single integer as `(index << 1) | value`.
//! So, the derived ordering on literals is by index and then by value, with `false` strictly less than `true`.
//!
//! ```rust
//! # use otter_pdr::structures::literal::LatchLiteral;
//! let literal = LatchLiteral::new(79, true);
//!
//! assert_eq!(literal.index(), 79);
//! assert!(literal.value());
//! assert_eq!(literal.negate(), LatchLiteral::new(79, false));
//! assert!(LatchLiteral::new(79, false) < literal);
//! assert!(literal < LatchLiteral::new(80, false));
//! ```

/// A latch index paired with a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatchLiteral(u32);

impl LatchLiteral {
    /// A fresh literal.
    pub fn new(index: usize, value: bool) -> Self {
        LatchLiteral(((index as u32) << 1) | value as u32)
    }

    /// The index of the latch.
    pub fn index(&self) -> usize {
        (self.0 >> 1) as usize
    }

    /// The value the literal requires of the latch.
    pub fn value(&self) -> bool {
        self.0 & 1 == 1
    }

    /// The literal on the same latch with the opposite value.
    pub fn negate(&self) -> Self {
        LatchLiteral(self.0 ^ 1)
    }

    /// The bit of a cube signature set by the literal.
    pub fn signature_bit(&self) -> u64 {
        1_u64 << (self.index() % 64)
    }
}

impl std::fmt::Display for LatchLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            true => write!(f, "l{}", self.index()),
            false => write!(f, "-l{}", self.index()),
        }
    }
}
