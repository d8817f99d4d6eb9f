//! Error types used in the library.
//!
//! - Some of these are external and expected, e.g. an `UnsupportedInitialState` when a latch of the network is initialised to something other than a constant or itself.
//!   In this case verification stops before any solver is built and the error is returned to the caller.
//! - Some are internal and should never be seen, e.g. `SolverInconsistency` signals a bug in the bookkeeping of frames and cubes.
//!   These carry a snapshot of the engine to help with diagnosis.
//!
//! A timeout is not an error, and neither is a SAT oracle without support for failed assumptions.
//!
//! Names of the error enums overlap with the structures they relate to.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::cube::Cube;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Adapter(AdapterError),
    Build(BuildError),
    Parse(ParseError),
    Property(PropertyError),

    /// The initial value of a latch is neither a constant nor the latch itself.
    ///
    /// Where several latches are unsupported, the first is named.
    UnsupportedInitialState {
        latch: usize,
    },

    /// Some invariant of the engine was violated.
    SolverInconsistency(Box<Diagnostics>),
}

/// A snapshot of the engine at the point an inconsistency was observed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostics {
    /// What went wrong.
    pub message: String,

    /// The depth (index of the frontier frame) at the time.
    pub depth: usize,

    /// The count of cubes in each frame.
    pub frame_sizes: Vec<usize>,

    /// The cubes stored at each frame.
    pub frames: Vec<Vec<Cube>>,

    /// The count of obligations queued.
    pub obligations: usize,

    /// The cube which exposed the inconsistency, if any.
    pub cube: Option<Cube>,
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (depth {}, frames {:?}, obligations {}",
            self.message, self.depth, self.frame_sizes, self.obligations
        )?;
        if let Some(cube) = &self.cube {
            write!(f, ", cube {cube}")?;
        }
        write!(f, ")")?;

        for (index, frame) in self.frames.iter().enumerate() {
            if frame.is_empty() {
                continue;
            }
            write!(f, "\nc F{index}:")?;
            for cube in frame {
                write!(f, " {cube}")?;
            }
        }
        Ok(())
    }
}

/// Errors from the SAT interface adapter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdapterError {
    /// A literal was requested for a signal before the signal was loaded into the solver.
    UnloadedSignal { node: u32, time: usize },

    /// A node identifier beyond the network.
    UnknownNode(u32),
}

impl From<AdapterError> for ErrorKind {
    fn from(e: AdapterError) -> Self {
        ErrorKind::Adapter(e)
    }
}

/// Noted errors when building a network.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A signal refers to a node which does not (yet) exist.
    DanglingSignal(u32),

    /// An attempt to set the next state or initial value of something other than a latch.
    NotALatch(u32),

    /// The next state of a latch was never given.
    MissingNext(usize),
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors during the parsing of an AIGER file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The header line is missing or malformed.
    Header(String),

    /// A line could not be read as expected, with the line number.
    Line(usize),

    /// A literal is out of the range declared by the header.
    LiteralRange { line: usize, literal: usize },

    /// A variable is defined twice.
    Redefinition(usize),

    /// Some variable is used but never defined.
    Undefined(usize),

    /// The AND gates do not form a DAG.
    CombinationalCycle,

    /// Part of the format which is not supported, e.g. justice properties.
    Unsupported(&'static str),

    /// Failure to read from the source.
    Io(String),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors related to the choice of property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropertyError {
    /// No bad state or output with the given index.
    Missing(usize),
}

impl From<PropertyError> for ErrorKind {
    fn from(e: PropertyError) -> Self {
        ErrorKind::Property(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adapter(e) => write!(f, "adapter error: {e:?}"),
            Self::Build(e) => write!(f, "build error: {e:?}"),
            Self::Parse(e) => write!(f, "parse error: {e:?}"),
            Self::Property(e) => write!(f, "property error: {e:?}"),
            Self::UnsupportedInitialState { latch } => {
                write!(f, "latch {latch} has a non-constant initial value")
            }
            Self::SolverInconsistency(diagnostics) => write!(f, "inconsistency: {diagnostics}"),
        }
    }
}

impl std::error::Error for ErrorKind {}
