/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, each with one of the [targets] below.
These are intended to provide useful information when following a run of the engine, and when fixing issues.

Note, no log implementation is provided by the library.
The `otter_pdr` binary installs one when built with the `log` feature.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [control loop](crate::pdr::solve).
    pub const PDR: &str = "pdr";

    /// Logs related to [blocking](crate::pdr::block) obligations.
    pub const BLOCK: &str = "block";

    /// Logs related to [generalization](crate::pdr::generalize) of blocked cubes.
    pub const GENERALIZE: &str = "generalize";

    /// Logs related to [propagation](crate::pdr::propagate) of cubes between frames.
    pub const PROPAGATE: &str = "propagate";

    /// Logs related to [extraction](crate::pdr::extract) of cubes from a model.
    pub const EXTRACT: &str = "extract";

    /// Logs related to the [SAT interface adapter](crate::adapter).
    pub const ADAPTER: &str = "adapter";

    /// Logs related to the [SAT solver](crate::sat).
    pub const SAT: &str = "sat";

    /// Logs related to [bounded model checking](crate::bmc).
    pub const BMC: &str = "bmc";

    /// Logs related to [parsing](crate::ntk::aiger).
    pub const PARSE: &str = "parse";

    /// Logs made by the `otter_pdr` binary.
    pub const CLI: &str = "cli";
}
