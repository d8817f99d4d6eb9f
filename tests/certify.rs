mod common;

use otter_pdr::{
    config::Config,
    ntk::Network,
    pdr::Pdr,
    reports::{
        certify::{check_invariant, check_trace},
        Outcome,
    },
    structures::frame::Frame,
};

/// True if no cube stored at `frame` or above contains `state`.
fn frame_admits(frames: &[Frame], frame: usize, state: &[bool]) -> bool {
    frames[frame..].iter().all(|stored| {
        stored.iter().all(|cube| {
            !cube
                .literals()
                .iter()
                .all(|literal| state[literal.index()] == literal.value())
        })
    })
}

/// Every state over `latches` latches, as vectors of values.
fn all_states(latches: usize) -> Vec<Vec<bool>> {
    (0..1_usize << latches)
        .map(|bits| (0..latches).map(|index| bits & (1 << index) != 0).collect())
        .collect()
}

/// Checks the frames left by a run of the engine.
fn check_frames(network: &Network, pdr: &mut Pdr) {
    let init = pdr.initial_state().clone();
    let frames: Vec<Frame> = pdr.frames().to_vec();

    assert!(frames[0].is_empty());

    for (index, frame) in frames.iter().enumerate().skip(1) {
        for cube in frame.iter() {
            assert!(!cube.intersects(&init), "{cube} at {index} intersects the initial state");
            assert!(pdr.is_blocked(index, cube).unwrap(), "{cube} at {index} is no longer blocked");
        }
    }

    // Each frame describes a subset of the states of the frame above.
    for state in all_states(network.latch_count()) {
        for index in 2..frames.len() {
            if frame_admits(&frames, index - 1, &state) {
                assert!(frame_admits(&frames, index, &state));
            }
        }
    }
}

mod certification {
    use super::*;

    #[test]
    fn proved_results() {
        for network in [
            common::saturating_counter(),
            common::shift_register(4, true),
            common::free_guard(),
        ] {
            let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
            let Outcome::Proved(invariant) = pdr.solve().unwrap() else {
                panic!("the property holds");
            };
            assert!(check_invariant(&network, pdr.bad(), &invariant).unwrap());
            check_frames(&network, &mut pdr);
        }
    }

    #[test]
    fn disproved_results() {
        for network in [
            common::toggler(),
            common::counter(3),
            common::shift_register(4, false),
            common::free_copy(),
        ] {
            let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
            let Outcome::Disproved(trace) = pdr.solve().unwrap() else {
                panic!("the property fails");
            };
            assert!(check_trace(&network, pdr.bad(), &trace).unwrap());
            check_frames(&network, &mut pdr);
        }
    }

    #[test]
    fn reachable_states_admitted() {
        // The state of the counter after t steps is t, and so is in frame t.
        let network = common::counter(3);
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
        assert!(matches!(pdr.solve().unwrap(), Outcome::Disproved(_)));

        let frames = pdr.frames();
        for step in 0..frames.len() {
            let state: Vec<bool> = (0..3).map(|bit| step & (1 << bit) != 0).collect();
            for frame in step.max(1)..frames.len() {
                assert!(frame_admits(frames, frame, &state), "step {step} outside frame {frame}");
            }
        }
    }

    #[test]
    fn multi_step_frames() {
        let network = common::counter(3);
        let mut config = Config::default();
        config.multi_step.depth.value = 2;
        config.multi_step.threshold.value = 0;

        let mut pdr = Pdr::from_config(&network, config).unwrap();
        let Outcome::Disproved(trace) = pdr.solve().unwrap() else {
            panic!("the counter reaches 111");
        };
        assert!(check_trace(&network, pdr.bad(), &trace).unwrap());
        check_frames(&network, &mut pdr);
    }
}
