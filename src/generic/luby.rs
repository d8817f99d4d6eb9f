/*!
An iterator over the luby sequence, used to schedule restarts of the [SAT solver](crate::sat).

See <https://oeis.org/A182105> for details on the sequence.

The iterator uses the 'reluctant doubling' formulation:
a pair (u, v) starts at (1, 1) and each step either resets v to 1 (when u & -u == v) or doubles v.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// The state of the iterator.
#[derive(Clone)]
pub struct Luby {
    u: LubyRepresentation,
    v: LubyRepresentation,
}

impl Default for Luby {
    fn default() -> Self {
        Luby { u: 1, v: 1 }
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.v;
        if self.u & self.u.wrapping_neg() == self.v {
            self.u = self.u.checked_add(1)?;
            self.v = 1;
        } else {
            self.v = self.v.checked_mul(2)?;
        }
        Some(current)
    }
}

impl Luby {
    /// The element the next call to [next](Iterator::next) will return.
    pub fn current(&self) -> LubyRepresentation {
        self.v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1,
    ];

    #[test]
    fn luby() {
        let mut sequence = Luby::default();
        for known_value in LUBY_SLICE {
            assert_eq!(sequence.current(), *known_value);
            assert_eq!(sequence.next(), Some(*known_value));
        }
    }
}
