//! Generic structures, not tied to verification.

pub mod index_heap;
pub mod luby;
