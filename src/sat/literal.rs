//! Atoms and literals of the SAT solver.
//!
//! An atom is an index, and a literal is an atom paired with a (boolean) polarity.
//! Literals are ordered by atom and then polarity, with `false` strictly less than `true`.
//!
//! ```rust
//! # use otter_pdr::sat::literal::CLiteral;
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.negate().polarity());
//! assert_eq!(!literal, literal.negate());
//! ```

/// Atoms are indices.
pub type Atom = u32;

/// An atom paired with a polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CLiteral {
    atom: Atom,
    polarity: bool,
}

impl CLiteral {
    pub fn new(atom: Atom, polarity: bool) -> Self {
        CLiteral { atom, polarity }
    }

    pub fn atom(&self) -> Atom {
        self.atom
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn negate(&self) -> Self {
        CLiteral {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    /// A dense index over all literals, used to index watch lists.
    pub fn index(&self) -> usize {
        ((self.atom as usize) << 1) | self.polarity as usize
    }

    /// The literal negated if `negate` is true.
    pub fn negate_if(&self, negate: bool) -> Self {
        match negate {
            true => self.negate(),
            false => *self,
        }
    }
}

impl std::ops::Not for CLiteral {
    type Output = CLiteral;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.polarity {
            true => write!(f, "{}", self.atom),
            false => write!(f, "-{}", self.atom),
        }
    }
}
