//! Structures over the latches of a network: literals, cubes, frames and initial states.

pub mod cube;
pub mod frame;
pub mod init;
pub mod literal;
