/*!
Cubes: conjunctions of latch literals.

A cube is a strictly ascending, duplicate-free sequence of [literals](LatchLiteral) and denotes the set of states satisfying each of its literals.
So, a cube with fewer literals denotes more states.

Each cube carries a 64-bit *signature*, the OR of `1 << (index % 64)` over its literals.
If cube `a` subsumes cube `b` (the literals of `a` are a subset of the literals of `b`) then the signature of `a` is a subset of the signature of `b`.
The converse does not hold, and so the signature is only ever used to reject a subsumption check early, never to accept one.

# Ordering

Cubes are ordered for storage in a [frame](crate::structures::frame):
- Literal by literal, by index and then value.
- If one cube is a proper prefix of the other, the longer cube comes first.

In particular, cubes with a smaller leading index come first, and scans over a frame may stop early on the leading literal.

# Example

```rust
# use otter_pdr::structures::{cube::Cube, literal::LatchLiteral};
let a = Cube::new([LatchLiteral::new(3, true)]);
let b = Cube::new([LatchLiteral::new(3, true), LatchLiteral::new(1, false)]);

assert!(a.subsumes(&b));
assert!(!b.subsumes(&a));
assert_eq!(b.literals()[0], LatchLiteral::new(1, false));
```
*/

use std::cmp::Ordering;

use crate::structures::{init::InitialState, literal::LatchLiteral};

/// A conjunction of latch literals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cube {
    literals: Vec<LatchLiteral>,
    signature: u64,
}

impl Cube {
    /// A cube from some collection of literals, sorted and with duplicates removed.
    ///
    /// The literals are assumed to be consistent, i.e. no latch appears with both values.
    pub fn new(literals: impl IntoIterator<Item = LatchLiteral>) -> Self {
        let mut literals: Vec<LatchLiteral> = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        debug_assert!(literals.windows(2).all(|w| w[0].index() < w[1].index()));
        Self::from_sorted(literals)
    }

    /// A cube from literals already in ascending order.
    fn from_sorted(literals: Vec<LatchLiteral>) -> Self {
        let signature = literals
            .iter()
            .fold(0, |signature, literal| signature | literal.signature_bit());
        Cube {
            literals,
            signature,
        }
    }

    /// The literals of the cube, in ascending order.
    pub fn literals(&self) -> &[LatchLiteral] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// The literal with the least index, if any.
    pub fn leading(&self) -> Option<LatchLiteral> {
        self.literals.first().copied()
    }

    /// True if the cube contains `literal`.
    pub fn contains(&self, literal: LatchLiteral) -> bool {
        self.literals.binary_search(&literal).is_ok()
    }

    /// True if the literals of this cube are a subset of the literals of `other`.
    ///
    /// In other words, every state in `other` is a state of this cube.
    pub fn subsumes(&self, other: &Cube) -> bool {
        if self.literals.len() > other.literals.len() {
            return false;
        }
        if self.signature & !other.signature != 0 {
            return false;
        }
        let (Some(first), Some(last)) = (self.literals.first(), self.literals.last()) else {
            return true;
        };
        // Both non-empty, as other is at least as long.
        if first.index() < other.literals[0].index()
            || last.index() > other.literals[other.literals.len() - 1].index()
        {
            return false;
        }

        // Scan from the back, as the leading literals are typically shared across a frame.
        let mut theirs = other.literals.iter().rev();
        'ours: for literal in self.literals.iter().rev() {
            for their in theirs.by_ref() {
                match their.index().cmp(&literal.index()) {
                    Ordering::Greater => continue,
                    Ordering::Equal if their == literal => continue 'ours,
                    _ => return false,
                }
            }
            return false;
        }
        true
    }

    /// True if some initial state satisfies the cube.
    pub fn intersects(&self, init: &InitialState) -> bool {
        self.literals
            .iter()
            .all(|literal| init.admits(*literal))
    }

    /// A copy of the cube with `literal` removed.
    pub fn without(&self, literal: LatchLiteral) -> Cube {
        Self::from_sorted(
            self.literals
                .iter()
                .copied()
                .filter(|l| *l != literal)
                .collect(),
        )
    }

    /// A copy of the cube restricted to literals satisfying `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(LatchLiteral) -> bool) -> Cube {
        Self::from_sorted(
            self.literals
                .iter()
                .copied()
                .filter(|l| keep(*l))
                .collect(),
        )
    }

    /// A copy of the cube with `literal` inserted at its sorted position.
    pub fn with(&self, literal: LatchLiteral) -> Cube {
        let mut literals = self.literals.clone();
        if let Err(position) = literals.binary_search(&literal) {
            literals.insert(position, literal);
        }
        Self::from_sorted(literals)
    }
}

impl Ord for Cube {
    fn cmp(&self, other: &Self) -> Ordering {
        for (ours, theirs) in self.literals.iter().zip(other.literals.iter()) {
            match ours.cmp(theirs) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        // A shared prefix, so the longer cube comes first.
        other.literals.len().cmp(&self.literals.len())
    }
}

impl PartialOrd for Cube {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (position, literal) in self.literals.iter().enumerate() {
            if position > 0 {
                write!(f, " ")?;
            }
            write!(f, "{literal}")?;
        }
        write!(f, "]")
    }
}
