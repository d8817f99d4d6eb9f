/*!
Propagation of blocked cubes to higher frames.

After a new frontier is opened, each cube stored at a frame `i` below the frontier is checked for being blocked at `i + 1`.
If so, the cube is shrunk by the failed assumptions of the check and moved to `i + 1`.

Moving cubes may leave a frame empty.
As frame `i` then describes the same states as frame `i + 1`, the states of frame `i + 1` are closed under the transition relation, exclude every bad state, and include the initial state.
That is, the cubes at frames above `i` form an inductive invariant.

Cubes at each frame are also pruned, by removal of those subsumed by another cube at the same frame.
*/

use crate::{
    misc::log::targets::{self},
    pdr::Pdr,
    sat::SatOracle,
    types::err::ErrorKind,
};

impl<S: SatOracle> Pdr<'_, S> {
    /// Pushes cubes forward from each frame below the frontier.
    ///
    /// Returns the index of a frame left empty, if any.
    pub(super) fn propagate(&mut self) -> Result<Option<usize>, ErrorKind> {
        let depth = self.depth();

        for frame in 1..depth {
            let mut index = 0;
            while let Some(cube) = self.frames[frame].get(index).cloned() {
                if self.check_reachability(frame + 1, &cube, false)? {
                    let removed = self.frames[frame].remove_subsumed_before(&cube, index);
                    index = index - removed + 1;
                    continue;
                }

                let pushed = self.remove_from_proof(frame + 1, &cube);
                log::trace!(target: targets::PROPAGATE, "{cube} to {pushed} at {}", frame + 1);

                // The cube at `index` is subsumed by its own shrinking, and so is removed here.
                let removed = self.frames[frame].remove_subsumed_before(&pushed, index + 1);
                index = index + 1 - removed;

                self.frames[frame + 1].remove_subsumed(&pushed);
                self.add_blocked_cube(frame + 1, pushed)?;
                self.counters.propagated_cubes += 1;
            }

            self.frames[frame].remove_self_subsumed();
            if self.frames[frame].is_empty() {
                log::info!(target: targets::PROPAGATE, "Frame {frame} is empty");
                return Ok(Some(frame));
            }
        }

        self.frames[depth].remove_self_subsumed();
        Ok(None)
    }
}
