//! A library for safety verification of and-inverter graph transition systems by property directed reachability.
//!
//! otter_pdr takes a network of and gates, inputs and latches, together with a bad state signal, and either:
//! - Proves the bad signal is false on every reachable state, with an inductive invariant.
//! - Disproves this, with a trace of input values from an initial state to a bad state.
//! - Reports the question as undecided, if the run was interrupted.
//!
//! # Orientation
//!
//! The library is built around the [engine](crate::pdr), a sequence of frames each paired with its own incremental SAT solver.
//!
//! The engine reads a [network](crate::ntk), built either programatically or from the AIGER ASCII format.
//! Each frame solver is a [FrameSolver](crate::adapter::FrameSolver), which maps signals of the network at each time step to literals of a [SAT oracle](crate::sat::SatOracle).
//! Cubes of states found by the solvers are widened by [ternary simulation](crate::sim).
//!
//! Useful starting points, then, may be:
//! - The [verification driver](crate::verify), which runs an optional [bounded model check](crate::bmc) before the engine.
//! - The [control loop](crate::pdr::solve) of the engine, to inspect the dynamics of a run.
//! - The [structures] to familiarise yourself with cubes and frames.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Examples
//!
//! + Read a network in the AIGER ASCII format and check its first property.
//!
//! ```rust
//! # use otter_pdr::config::Config;
//! # use otter_pdr::ntk::aiger::read_aag_str;
//! # use otter_pdr::reports::Outcome;
//! # use otter_pdr::verify::verify;
//! // A two bit counter, from 00, with bad state 11 reached after three steps.
//! let aag = "aag 6 0 2 0 4 1
//! 2 3
//! 4 11
//! 12
//! 6 4 3
//! 8 5 2
//! 10 7 9
//! 12 4 2
//! ";
//! let network = read_aag_str(aag).unwrap();
//!
//! match verify(&network, Config::default()).unwrap() {
//!     Outcome::Disproved(trace) => assert_eq!(trace.depth(), 3),
//!     _ => panic!("the counter reaches 11"),
//! }
//! ```
//!
//! + Build a network and prove its property.
//!
//! ```rust
//! # use otter_pdr::config::Config;
//! # use otter_pdr::ntk::builder::NetworkBuilder;
//! # use otter_pdr::reports::Report;
//! # use otter_pdr::verify::verify;
//! // Two latches which swap values each step, from 00, with bad state 10.
//! let mut builder = NetworkBuilder::default();
//! let a = builder.add_latch();
//! let b = builder.add_latch();
//! builder.set_next(a, b).unwrap();
//! builder.set_next(b, a).unwrap();
//! let bad = builder.add_and(a, !b).unwrap();
//! builder.add_bad(bad).unwrap();
//! let network = builder.build().unwrap();
//!
//! assert_eq!(verify(&network, Config::default()).unwrap().report(), Report::Proved);
//! ```
//!
//! # Logs
//!
//! To help diagnose issues calls to [log!](log) are made, with a variety of targets to help narrow output to relevant parts of the library.
//! The targets are listed in [misc::log].

pub mod adapter;
pub mod bmc;
pub mod config;
pub mod ntk;
pub mod pdr;
pub mod reports;
pub mod sat;
pub mod sim;
pub mod structures;
pub mod types;
pub mod verify;

pub mod generic;
pub mod misc;
