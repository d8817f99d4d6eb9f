/*!
The verification driver.

[verify] checks a property of a network, in order:
1. The initial state of the network is read, failing on any unsupported initial value.
2. If [bmc_depth](Config::bmc_depth) is non-zero, a [bounded model check](crate::bmc) is made to that depth.
   A counterexample ends the run, and otherwise the depth is noted by the engine.
3. The [engine](crate::pdr) runs until the property is proved, disproved, or the run is interrupted.
4. If [check_result](Config::check_result) is set, the outcome is [certified](crate::reports::certify).

```rust
# use otter_pdr::config::Config;
# use otter_pdr::ntk::builder::NetworkBuilder;
# use otter_pdr::reports::Report;
# use otter_pdr::verify::verify;
// A latch which is stuck at 0.
let mut builder = NetworkBuilder::default();
let l = builder.add_latch();
builder.set_next(l, l).unwrap();
builder.add_bad(l).unwrap();
let network = builder.build().unwrap();

let mut config = Config::default();
config.check_result.value = true;
assert_eq!(verify(&network, config).unwrap().report(), Report::Proved);
```
*/

use crate::{
    bmc::{Bmc, BmcResult},
    config::Config,
    misc::log::targets::{self},
    ntk::Network,
    pdr::Pdr,
    reports::{certify, Outcome},
    sat::Solver,
    types::err::{Diagnostics, ErrorKind},
};

/// Verifies the property of `network` given by `config`.
pub fn verify(network: &Network, config: Config) -> Result<Outcome, ErrorKind> {
    verify_with(network, config, |_| {})
}

/// Verifies the property of `network` given by `config`, with `setup` applied to the engine before it runs.
///
/// E.g. to set callbacks.
pub fn verify_with(
    network: &Network,
    config: Config,
    setup: impl FnOnce(&mut Pdr<'_, Solver>),
) -> Result<Outcome, ErrorKind> {
    network.initial_state()?;
    let bad = network.property(config.property.value)?;
    let check_result = config.check_result.value;

    let mut held = None;
    if config.bmc_depth.value > 0 {
        let oracle = Solver::from_config(config.solver_config());
        let mut bmc = Bmc::new(network, config.property.value, oracle)?;
        match bmc.check(config.bmc_depth.value)? {
            BmcResult::Fired(trace) => {
                if check_result && !certify::check_trace(network, bad, &trace)? {
                    return Err(failed_replay());
                }
                return Ok(Outcome::Disproved(trace));
            }
            BmcResult::Held(bound) => held = Some(bound),
        }
    }

    let mut pdr = Pdr::from_config(network, config)?;
    setup(&mut pdr);
    if let Some(bound) = held {
        pdr.note_bmc_held(bound);
    }

    let outcome = pdr.solve()?;

    if check_result {
        let certified = match &outcome {
            Outcome::Proved(invariant) => certify::check_invariant(network, bad, invariant)?,
            Outcome::Disproved(trace) => certify::check_trace(network, bad, trace)?,
            Outcome::Undecided(_) => true,
        };
        if !certified {
            return Err(pdr.inconsistency("Outcome failed certification", None));
        }
        log::info!(target: targets::PDR, "Outcome certified");
    }

    Ok(outcome)
}

fn failed_replay() -> ErrorKind {
    let message = "Bounded trace does not replay";
    log::error!(target: targets::BMC, "{message}");
    ErrorKind::SolverInconsistency(Box::new(Diagnostics {
        message: message.to_string(),
        depth: 0,
        frame_sizes: Vec::default(),
        frames: Vec::default(),
        obligations: 0,
        cube: None,
    }))
}
