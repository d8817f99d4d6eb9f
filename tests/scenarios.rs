mod common;

use otter_pdr::{
    config::Config,
    pdr::Pdr,
    reports::{
        certify::{check_invariant, check_trace},
        Outcome, Report,
    },
    structures::{cube::Cube, literal::LatchLiteral},
    verify::verify,
};

mod scenarios {
    use super::*;

    #[test]
    fn toggler_two_patterns() {
        let network = common::toggler();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let Outcome::Disproved(trace) = pdr.solve().unwrap() else {
            panic!("the latch is set after one step");
        };
        assert_eq!(trace.initial, vec![false]);
        assert_eq!(trace.inputs.len(), 2);
        assert_eq!(trace.depth(), 1);
        assert!(check_trace(&network, pdr.bad(), &trace).unwrap());
    }

    #[test]
    fn saturating_counter_proved() {
        let network = common::saturating_counter();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let Outcome::Proved(invariant) = pdr.solve().unwrap() else {
            panic!("the counter never exceeds 2");
        };
        assert!(check_invariant(&network, pdr.bad(), &invariant).unwrap());

        // Some cube of the invariant excludes 11.
        let eleven = Cube::new([LatchLiteral::new(0, true), LatchLiteral::new(1, true)]);
        assert!(invariant.cubes.iter().any(|cube| cube.subsumes(&eleven)));
        assert!(!invariant.admits(&[true, true]));
        assert!(invariant.admits(&[false, false]));
        assert!(invariant.admits(&[true, false]));
        assert!(invariant.admits(&[false, true]));
    }

    #[test]
    fn constant_bad_at_depth_zero() {
        let network = common::constant_bad();
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let Outcome::Disproved(trace) = pdr.solve().unwrap() else {
            panic!("the bad state is initial");
        };
        assert_eq!(trace.depth(), 0);
        assert!(trace.initial.is_empty());
        assert_eq!(trace.inputs, vec![Vec::<bool>::new()]);
        assert_eq!(pdr.depth(), 0);
    }

    #[test]
    fn counter_depth() {
        let network = common::counter(3);
        let outcome = verify(&network, Config::default()).unwrap();
        let Outcome::Disproved(trace) = outcome else {
            panic!("the counter reaches 111");
        };
        // 111 is reached after 7 steps, and every 8 steps after.
        assert_eq!(trace.depth() % 8, 7);
        assert_eq!(trace.initial, vec![false; 3]);
        assert!(check_trace(&network, network.property(0).unwrap(), &trace).unwrap());
    }

    #[test]
    fn shift_register_inputs() {
        let network = common::shift_register(3, false);
        let mut pdr = Pdr::from_config(&network, Config::default()).unwrap();

        let Outcome::Disproved(trace) = pdr.solve().unwrap() else {
            panic!("the register may be filled");
        };
        assert_eq!(trace.depth(), 3);
        assert_eq!(trace.inputs[0], vec![true]);
        assert_eq!(trace.inputs[3], vec![false]);
        assert!(check_trace(&network, pdr.bad(), &trace).unwrap());
    }

    #[test]
    fn blocked_shift_register() {
        let network = common::shift_register(3, true);
        let mut config = Config::default();
        config.check_result.value = true;
        assert_eq!(verify(&network, config).unwrap().report(), Report::Proved);
    }
}
