mod common;

use std::{cell::RefCell, rc::Rc, time::Duration};

use otter_pdr::{
    bmc::{Bmc, BmcResult},
    config::Config,
    ntk::Network,
    pdr::Pdr,
    reports::{
        certify::{check_invariant, check_trace},
        Outcome, Report,
    },
    sat::Solver,
    types::err::{ErrorKind, PropertyError},
    verify::verify,
};

fn checked_config() -> Config {
    let mut config = Config::default();
    config.check_result.value = true;
    config
}

fn circuits() -> Vec<(&'static str, Network, Report)> {
    vec![
        ("toggler", common::toggler(), Report::Disproved),
        ("saturating counter", common::saturating_counter(), Report::Proved),
        ("constant bad", common::constant_bad(), Report::Disproved),
        ("counter", common::counter(3), Report::Disproved),
        ("shift register", common::shift_register(4, false), Report::Disproved),
        ("blocked shift register", common::shift_register(4, true), Report::Proved),
        ("free copy", common::free_copy(), Report::Disproved),
        ("free guard", common::free_guard(), Report::Proved),
    ]
}

mod free_latches {
    use super::*;

    #[test]
    fn copy_disproved() {
        let network = common::free_copy();
        let Outcome::Disproved(trace) = verify(&network, checked_config()).unwrap() else {
            panic!("the free latch may be set");
        };
        assert_eq!(trace.depth(), 1);
        assert_eq!(trace.initial, vec![true, false]);
    }

    #[test]
    fn guard_proved() {
        let network = common::free_guard();
        let Outcome::Proved(invariant) = verify(&network, Config::default()).unwrap() else {
            panic!("the guarded latch is never set");
        };
        assert!(check_invariant(&network, network.property(0).unwrap(), &invariant).unwrap());
        assert!(!invariant.admits(&[true, true]));
        assert!(!invariant.admits(&[false, true]));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unsupported_init() {
        let network = common::input_initialised();
        assert_eq!(
            verify(&network, Config::default()).err(),
            Some(ErrorKind::UnsupportedInitialState { latch: 0 })
        );
        assert!(matches!(
            Pdr::from_config(&network, Config::default()),
            Err(ErrorKind::UnsupportedInitialState { latch: 0 })
        ));
    }

    #[test]
    fn missing_property() {
        let network = common::toggler();
        let mut config = Config::default();
        config.property.value = 3;
        assert_eq!(
            verify(&network, config).err(),
            Some(ErrorKind::Property(PropertyError::Missing(3)))
        );
    }
}

mod variants {
    use super::*;

    #[test]
    fn multi_step_agrees() {
        for (name, network, expected) in circuits() {
            for depth in [2, 3] {
                let mut config = checked_config();
                config.multi_step.depth.value = depth;
                config.multi_step.threshold.value = 0;
                let report = verify(&network, config).unwrap().report();
                assert_eq!(report, expected, "{name} with multi-step depth {depth}");
            }
        }
    }

    #[test]
    fn without_cores() {
        for (name, network, expected) in circuits() {
            let mut pdr = Pdr::with_oracle(&network, Config::default(), common::NoCore::default()).unwrap();
            let outcome = pdr.solve().unwrap();
            assert_eq!(outcome.report(), expected, "{name} without cores");

            match outcome {
                Outcome::Proved(invariant) => {
                    assert!(check_invariant(&network, pdr.bad(), &invariant).unwrap())
                }
                Outcome::Disproved(trace) => assert!(check_trace(&network, pdr.bad(), &trace).unwrap()),
                Outcome::Undecided(_) => panic!("{name} is undecided"),
            }
        }
    }

    #[test]
    fn without_widening() {
        for (name, network, expected) in circuits() {
            let mut config = checked_config();
            config.ternary_widening.value = false;
            config.core_shrink.value = false;
            let report = verify(&network, config).unwrap().report();
            assert_eq!(report, expected, "{name} without widening");
        }
    }

    #[test]
    fn seeded_decisions() {
        for (name, network, expected) in circuits() {
            let mut config = checked_config();
            config.random_seed.value = 7;
            config.random_decision_bias.value = 0.5;
            let report = verify(&network, config).unwrap().report();
            assert_eq!(report, expected, "{name} with random decisions");
        }
    }
}

mod interruption {
    use super::*;

    #[test]
    fn zero_time_limit() {
        let network = common::counter(4);
        let config = Config {
            time_limit: Some(Duration::ZERO),
            ..Config::default()
        };
        let Outcome::Undecided(counters) = verify(&network, config).unwrap() else {
            panic!("no time was given");
        };
        assert_eq!(counters.sat_calls, 0);
        assert_eq!(counters.frame_sizes, vec![0]);
    }

    #[test]
    fn terminate_callback() {
        let network = common::counter(4);
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let polls = Rc::new(RefCell::new(0));
        let polled = polls.clone();
        pdr.set_callback_terminate(Box::new(move || {
            *polled.borrow_mut() += 1;
            *polled.borrow() > 5
        }));

        assert_eq!(pdr.solve().unwrap().report(), Report::Undecided);
        assert_eq!(*polls.borrow(), 6);
    }

    #[test]
    fn progress_callback() {
        let network = common::saturating_counter();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let sizes: Rc<RefCell<Vec<Vec<usize>>>> = Rc::default();
        let recorded = sizes.clone();
        pdr.set_callback_progress(Box::new(move |frames: &[usize]| {
            recorded.borrow_mut().push(frames.to_vec())
        }));

        assert_eq!(pdr.solve().unwrap().report(), Report::Proved);
        let sizes = sizes.borrow();
        assert_eq!(sizes.len(), pdr.counters.frames - 1);
        for (index, frames) in sizes.iter().enumerate() {
            assert_eq!(frames.len(), index + 2);
            assert_eq!(frames.last(), Some(&0));
        }
    }
}

mod bmc {
    use super::*;

    #[test]
    fn holds_then_fires() {
        let network = common::counter(3);
        let mut bmc = Bmc::new(&network, 0, Solver::default()).unwrap();
        assert_eq!(bmc.check(7).unwrap(), BmcResult::Held(7));

        let BmcResult::Fired(trace) = bmc.check(20).unwrap() else {
            panic!("the counter reaches 111 after 7 steps");
        };
        assert_eq!(trace.depth(), 7);
        assert!(check_trace(&network, network.property(0).unwrap(), &trace).unwrap());
    }

    #[test]
    fn held_bound_noted() {
        let network = common::counter(3);
        let mut config = checked_config();
        config.bmc_depth.value = 4;
        let Outcome::Disproved(trace) = verify(&network, config).unwrap() else {
            panic!("the counter reaches 111");
        };
        assert!(trace.depth() >= 4);
    }

    #[test]
    fn held_bound_skips_queries() {
        let network = common::counter(3);

        let mut plain = Pdr::from_config(&network, Config::default()).unwrap();
        assert!(matches!(plain.solve().unwrap(), Outcome::Disproved(_)));

        let mut bounded = Pdr::from_config(&network, Config::default()).unwrap();
        bounded.note_bmc_held(7);
        let Outcome::Disproved(trace) = bounded.solve().unwrap() else {
            panic!("the counter reaches 111");
        };
        assert_eq!(trace.depth(), 7);
        assert!(check_trace(&network, bounded.bad(), &trace).unwrap());

        // One query at the frontier, and one for each predecessor from 110 down to 000.
        assert_eq!(bounded.counters.bounded_frames, 7);
        assert_eq!(bounded.counters.sat_calls, 8);
        assert_eq!(bounded.counters.obligations, 7);
        assert!(bounded.counters.sat_calls < plain.counters.sat_calls);
        assert!(bounded.counters.obligations <= plain.counters.obligations);
    }

    #[test]
    fn held_bound_proves() {
        for (name, network, expected) in circuits() {
            if expected != Report::Proved {
                continue;
            }
            for bound in [1, 3, 8] {
                let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();
                pdr.note_bmc_held(bound);
                let Outcome::Proved(invariant) = pdr.solve().unwrap() else {
                    panic!("{name} holds");
                };
                assert!(check_invariant(&network, pdr.bad(), &invariant).unwrap(), "{name} within {bound}");
                assert_eq!(pdr.counters.bounded_frames, bound, "{name} within {bound}");
            }
        }
    }

    #[test]
    fn fired_before_engine() {
        let network = common::shift_register(3, false);
        let mut config = checked_config();
        config.bmc_depth.value = 10;
        let Outcome::Disproved(trace) = verify(&network, config).unwrap() else {
            panic!("the register may be filled");
        };
        assert_eq!(trace.depth(), 3);
    }

    #[test]
    fn safe_within_bound() {
        let network = common::saturating_counter();
        let mut config = checked_config();
        config.bmc_depth.value = 6;
        assert_eq!(verify(&network, config).unwrap().report(), Report::Proved);
    }
}
