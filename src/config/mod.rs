/*!
Configuration of a verification run.

All configuration is held in a [Config], and each value (other than the time limit) is a [ConfigOption] which carries its own bounds.
The SAT solvers used by the engine take a [SolverConfig] derived from the config by [solver_config](Config::solver_config).

The defaults give deterministic results: the random seed is fixed and decisions follow saved phases.

```rust
# use otter_pdr::config::Config;
let mut config = Config::default();
assert!(config.multi_step.depth.set(2));
assert!(!config.random_decision_bias.set(2.0));
assert_eq!(config.multi_step.threshold.value, 10);
```
*/

mod config_option;
pub use config_option::ConfigOption;

use crate::{generic::luby::LubyRepresentation, sat::solver::SolverConfig};

/// Configuration of the multi-step variant of blocking.
#[derive(Clone, Debug)]
pub struct MultiStep {
    /// The count of steps taken by a multi-step query.
    /// A depth of one (or zero) disables the variant.
    pub depth: ConfigOption<usize>,

    /// The count of obligations popped at a frame, during one blocking phase, before multi-step queries are made from the frame.
    pub threshold: ConfigOption<usize>,
}

impl MultiStep {
    pub fn enabled(&self) -> bool {
        self.depth.value > 1
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The time limit for a run, if any.
    pub time_limit: Option<std::time::Duration>,

    /// The bound on a bounded model check made before the engine starts.
    /// Zero skips the check.
    pub bmc_depth: ConfigOption<usize>,

    pub multi_step: MultiStep,

    /// The index of the property to check, among bad state properties (or outputs, if there are none).
    pub property: ConfigOption<usize>,

    /// The seed given to each SAT solver.
    pub random_seed: ConfigOption<u64>,

    /// The probability of a random polarity when a SAT solver makes a decision.
    pub random_decision_bias: ConfigOption<f64>,

    /// The `u` value to multiply the luby sequence by when scheduling restarts of a SAT solver.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// Widen cubes extracted from models by ternary simulation.
    pub ternary_widening: ConfigOption<bool>,

    /// Shrink blocked cubes to the failed assumptions of the blocking query.
    pub core_shrink: ConfigOption<bool>,

    /// Check an invariant or trace before it is returned.
    pub check_result: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: None,

            bmc_depth: ConfigOption {
                name: "bmc_depth",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            multi_step: MultiStep {
                depth: ConfigOption {
                    name: "multi_step_depth",
                    min: 1,
                    max: 64,
                    value: 1,
                },
                threshold: ConfigOption {
                    name: "multi_step_threshold",
                    min: 0,
                    max: usize::MAX,
                    value: 10,
                },
            },

            property: ConfigOption {
                name: "property",
                min: 0,
                max: usize::MAX,
                value: 0,
            },

            random_seed: ConfigOption {
                name: "random_seed",
                min: u64::MIN,
                max: u64::MAX,
                value: 0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: 1,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            ternary_widening: ConfigOption {
                name: "ternary_widening",
                min: false,
                max: true,
                value: true,
            },

            core_shrink: ConfigOption {
                name: "core_shrink",
                min: false,
                max: true,
                value: true,
            },

            check_result: ConfigOption {
                name: "check_result",
                min: false,
                max: true,
                value: false,
            },
        }
    }
}

impl Config {
    /// The configuration of a SAT solver, as used by the engine.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            random_decision_bias: self.random_decision_bias.value,
            luby_u: self.luby_u.value,
            seed: self.random_seed.value,
            ..SolverConfig::default()
        }
    }
}
