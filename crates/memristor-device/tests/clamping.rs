// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Resistance bounds under arbitrary pulse sequences.

Every model must keep each internal cell inside `[r_min, r_max]` no matter how
large, how small, or how many updates it receives.
*/

use memristor_device::{
    DeviceParameters, DifferentialMemristor, Memristor, PowerLawMemristor, PulseMode, StateKind,
    R_MAX, R_MIN,
};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = PulseMode> {
    prop_oneof![Just(PulseMode::Same), Just(PulseMode::Inverse)]
}

fn update_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e3..1e3f64,
        -1e-6..1e-6f64,
        Just(0.0),
        Just(1e300),
        Just(-1e300),
    ]
}

proptest! {
    #[test]
    fn power_law_stays_in_bounds(
        start in R_MIN..R_MAX,
        pulses in prop::collection::vec((update_strategy(), mode_strategy()), 1..200),
    ) {
        let mut mem = PowerLawMemristor::new(start, DeviceParameters::default());
        for (update, mode) in pulses {
            let weight = mem.pulse(update, mode);
            let r = mem.get_state(StateKind::Resistance, false);
            prop_assert!((R_MIN..=R_MAX).contains(&r), "resistance {} out of bounds", r);
            prop_assert!(weight.is_finite());
            prop_assert_eq!(weight, mem.weight());
        }
    }

    #[test]
    fn differential_pair_stays_in_bounds(
        pos in R_MIN..R_MAX,
        neg in R_MIN..R_MAX,
        pulses in prop::collection::vec((update_strategy(), mode_strategy()), 1..200),
    ) {
        let mut mem = DifferentialMemristor::new(pos, neg, DeviceParameters::default());
        for (update, mode) in pulses {
            mem.pulse(update, mode);
            for r in mem.cell_resistances() {
                prop_assert!((R_MIN..=R_MAX).contains(&r), "resistance {} out of bounds", r);
            }
        }
    }
}

#[test]
fn repeated_potentiation_converges_to_r_min() {
    let mut mem = PowerLawMemristor::new(1.05e8, DeviceParameters::default());
    let mut last = mem.get_state(StateKind::Resistance, false);
    for _ in 0..1000 {
        mem.pulse(-1e6, PulseMode::Inverse);
        let r = mem.get_state(StateKind::Resistance, false);
        assert!(r <= last);
        last = r;
    }
    assert!(last >= R_MIN);
}
