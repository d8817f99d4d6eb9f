/*!
Reports on a verification run.

A run ends with an [Outcome]:
- [Proved](Outcome::Proved), with an [Invariant] which holds on every initial state, is closed under the transition relation, and excludes every bad state.
- [Disproved](Outcome::Disproved), with a [Trace] from an initial state to a bad state.
- [Undecided](Outcome::Undecided), with the [Counters] of the run, if the run was interrupted.

Outcomes may be checked independently of the engine, see [certify].
*/

pub mod certify;

use crate::{pdr::counters::Counters, structures::cube::Cube};

/// High-level reports regarding a run.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The property holds on every reachable state.
    Proved,

    /// Some reachable state is bad.
    Disproved,

    /// The run ended before either was shown.
    Undecided,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proved => write!(f, "PROVED"),
            Self::Disproved => write!(f, "DISPROVED"),
            Self::Undecided => write!(f, "UNDECIDED"),
        }
    }
}

/// The result of a run, with evidence.
#[derive(Clone, Debug)]
pub enum Outcome {
    Proved(Invariant),
    Disproved(Trace),
    Undecided(Counters),
}

impl Outcome {
    pub fn report(&self) -> Report {
        match self {
            Self::Proved(_) => Report::Proved,
            Self::Disproved(_) => Report::Disproved,
            Self::Undecided(_) => Report::Undecided,
        }
    }
}

/// A path from an initial state to a bad state.
///
/// There is one input pattern for each state on the path, and so the bad state is reached after `inputs.len() - 1` steps.
/// The last pattern gives the inputs under which the final state is bad.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    /// The value of each latch in the initial state.
    pub initial: Vec<bool>,

    /// The value of each input, for each state.
    pub inputs: Vec<Vec<bool>>,
}

impl Trace {
    /// The count of steps taken to reach the bad state.
    pub fn depth(&self) -> usize {
        self.inputs.len().saturating_sub(1)
    }

    /// The trace as an AIGER witness for the bad state property at `property`.
    pub fn to_aiger_witness(&self, property: usize) -> String {
        let bits = |values: &[bool]| -> String {
            values
                .iter()
                .map(|value| match value {
                    true => '1',
                    false => '0',
                })
                .collect()
        };

        let mut witness = format!("1\nb{property}\n{}\n", bits(&self.initial));
        for pattern in &self.inputs {
            witness.push_str(&bits(pattern));
            witness.push('\n');
        }
        witness.push('.');
        witness
    }
}

/// An inductive invariant, as the conjunction of the negation of each cube.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invariant {
    pub cubes: Vec<Cube>,
}

impl Invariant {
    /// True if `state`, a value for each latch, is within the invariant.
    pub fn admits(&self, state: &[bool]) -> bool {
        self.cubes.iter().all(|cube| {
            !cube
                .literals()
                .iter()
                .all(|literal| state.get(literal.index()) == Some(&literal.value()))
        })
    }
}

/// Each clause of the invariant on a line, as DIMACS over latches numbered from 1.
impl std::fmt::Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cube in &self.cubes {
            for literal in cube.literals() {
                let latch = literal.index() + 1;
                match literal.value() {
                    true => write!(f, "-{latch} ")?,
                    false => write!(f, "{latch} ")?,
                }
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}
