use std::time::Duration;

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// A count of every query made to a frame solver.
    pub sat_calls: usize,

    /// A count of every obligation popped from the queue.
    pub obligations: usize,

    /// A count of cubes added to frames on blocking.
    pub blocked_cubes: usize,

    /// A count of cubes moved to a higher frame on propagation.
    pub propagated_cubes: usize,

    /// A count of predecessors found by a multi-step query.
    pub multi_step_skips: usize,

    /// The count of frames opened.
    pub frames: usize,

    /// The count of frames opened without a query for a bad state, as a bounded check found none.
    pub bounded_frames: usize,

    /// The time taken by the run.
    pub time: Duration,

    /// The count of cubes in each frame, as of the end of the run.
    pub frame_sizes: Vec<usize>,
}

impl std::fmt::Display for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "c FRAMES            {}", self.frames)?;
        writeln!(f, "c SAT CALLS         {}", self.sat_calls)?;
        writeln!(f, "c OBLIGATIONS       {}", self.obligations)?;
        writeln!(f, "c BLOCKED CUBES     {}", self.blocked_cubes)?;
        writeln!(f, "c PROPAGATED CUBES  {}", self.propagated_cubes)?;
        writeln!(f, "c MULTI-STEP SKIPS  {}", self.multi_step_skips)?;
        writeln!(f, "c BOUNDED FRAMES    {}", self.bounded_frames)?;
        writeln!(f, "c CUBES PER FRAME   {:?}", self.frame_sizes)?;
        write!(f, "c TIME              {:.2?}", self.time)
    }
}
