/*!
Frames: ordered, deduplicated collections of cubes.

Frame *i* records the cubes blocked at exactly *i*, and the clauses (negated cubes) of frames *i*, *i+1*, … together approximate the states reachable in at most *i* steps.

Cubes are kept sorted by the [ordering on cubes](crate::structures::cube#ordering).
With this ordering, if cube `a` subsumes cube `b` then `b` comes before `a`, and the leading literal of `b` is at most the leading literal of `a`.
Each of the scans below relies on this to stop early.
*/

use crate::structures::cube::Cube;

/// A sorted collection of cubes, without duplicates.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    cubes: Vec<Cube>,
}

impl Frame {
    /// Inserts `cube`, returning false if the cube was already present.
    pub fn push(&mut self, cube: Cube) -> bool {
        match self.cubes.binary_search(&cube) {
            Ok(_) => false,
            Err(position) => {
                self.cubes.insert(position, cube);
                true
            }
        }
    }

    /// True if some cube in the frame subsumes `cube`.
    pub fn subsumes(&self, cube: &Cube) -> bool {
        let Some(leading) = cube.leading() else {
            return false;
        };
        for member in self.cubes.iter().rev() {
            match member.leading() {
                Some(member_leading) if member_leading < leading => return false,
                _ => {}
            }
            if member.subsumes(cube) {
                return true;
            }
        }
        false
    }

    /// Removes each cube in the frame subsumed by `cube`, returning a count of the cubes removed.
    ///
    /// A cube identical to `cube` is also removed.
    pub fn remove_subsumed(&mut self, cube: &Cube) -> usize {
        let Some(leading) = cube.leading() else {
            return 0;
        };
        let end = self
            .cubes
            .partition_point(|member| member.leading().is_some_and(|l| l <= leading));
        self.remove_subsumed_before(cube, end)
    }

    /// Removes each cube at a position before `end` subsumed by `cube`, returning a count of the cubes removed.
    pub fn remove_subsumed_before(&mut self, cube: &Cube, end: usize) -> usize {
        let end = std::cmp::min(end, self.cubes.len());
        let mut write = 0;
        for read in 0..end {
            if !cube.subsumes(&self.cubes[read]) {
                self.cubes.swap(write, read);
                write += 1;
            }
        }
        let removed = end - write;
        self.cubes.drain(write..end);
        removed
    }

    /// Removes each cube subsumed by some other cube in the frame.
    pub fn remove_self_subsumed(&mut self) -> usize {
        let mut removed = 0;
        let mut index = self.cubes.len();
        while index > 0 {
            index -= 1;
            let candidate = self.cubes[index].clone();
            let count = self.remove_subsumed_before(&candidate, index);
            index -= count;
            removed += count;
        }
        removed
    }

    /// The cube at `index`.
    pub fn get(&self, index: usize) -> Option<&Cube> {
        self.cubes.get(index)
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter()
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Removes and returns all cubes of the frame.
    pub fn take(&mut self) -> Vec<Cube> {
        std::mem::take(&mut self.cubes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::LatchLiteral;

    fn cube(literals: &[(usize, bool)]) -> Cube {
        Cube::new(literals.iter().map(|(i, v)| LatchLiteral::new(*i, *v)))
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut frame = Frame::default();
        assert!(frame.push(cube(&[(1, true), (2, false)])));
        assert!(!frame.push(cube(&[(2, false), (1, true)])));
        assert!(frame.push(cube(&[(0, true)])));
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.cubes()[0], cube(&[(0, true)]));
    }

    #[test]
    fn subsumes() {
        let mut frame = Frame::default();
        frame.push(cube(&[(2, true)]));
        frame.push(cube(&[(0, false), (5, true)]));

        assert!(frame.subsumes(&cube(&[(2, true), (3, false)])));
        assert!(frame.subsumes(&cube(&[(0, false), (1, true), (5, true)])));
        assert!(!frame.subsumes(&cube(&[(3, true), (5, true)])));
        assert!(!frame.subsumes(&cube(&[(0, true), (5, true)])));
    }

    #[test]
    fn remove_subsumed() {
        let mut frame = Frame::default();
        frame.push(cube(&[(0, true), (2, true)]));
        frame.push(cube(&[(1, true), (2, true)]));
        frame.push(cube(&[(2, true), (3, false)]));
        frame.push(cube(&[(3, false)]));

        assert_eq!(frame.remove_subsumed(&cube(&[(2, true)])), 3);
        assert_eq!(frame.cubes(), &[cube(&[(3, false)])]);
    }

    #[test]
    fn remove_subsumed_before() {
        let mut frame = Frame::default();
        frame.push(cube(&[(0, true), (2, true)]));
        frame.push(cube(&[(1, true), (2, true)]));
        frame.push(cube(&[(2, true)]));

        let subsumer = frame.cubes()[2].clone();
        assert_eq!(frame.remove_subsumed_before(&subsumer, 1), 1);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.remove_subsumed_before(&subsumer, 2), 2);
        assert!(frame.is_empty());
    }

    #[test]
    fn self_subsumption_keeps_the_strongest() {
        let mut frame = Frame::default();
        frame.push(cube(&[(0, true), (1, true), (4, false)]));
        frame.push(cube(&[(1, true), (4, false)]));
        frame.push(cube(&[(1, true)]));
        frame.push(cube(&[(3, true), (4, true)]));

        assert_eq!(frame.remove_self_subsumed(), 2);
        assert_eq!(frame.cubes(), &[cube(&[(1, true)]), cube(&[(3, true), (4, true)])]);
    }

    #[test]
    fn self_subsumption_single_member() {
        let mut frame = Frame::default();
        frame.push(cube(&[(1, true)]));
        assert_eq!(frame.remove_self_subsumed(), 0);
        assert_eq!(frame.len(), 1);
    }
}
