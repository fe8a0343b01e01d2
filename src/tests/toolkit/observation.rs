use std::str::FromStr;

use crate::prelude::{Catalog, Observable, SatelliteObservation};

/*
 * Verifies given system does (only) contain the following observables, in order
 */
pub fn check_observables(catalog: &Catalog, system: char, observables: &[&str]) {
    let expected = observables
        .iter()
        .map(|desc| Observable::from_str(desc).unwrap())
        .collect::<Vec<_>>();

    match catalog.observables(system) {
        Some(observables) => {
            assert_eq!(
                observables,
                expected.as_slice(),
                "bad observables for system '{}'",
                system
            );
        },
        None => {
            panic!("no observable declared for system '{}'", system);
        },
    }
}

/*
 * Verifies (value, lli, ssi) of each observation of this satellite
 */
pub fn check_observations(sat: &SatelliteObservation, expected: &[(f64, u8, u8)]) {
    assert_eq!(
        sat.observations.len(),
        expected.len(),
        "{}: bad number of observations",
        sat.sv
    );
    for (index, (obs, (value, lli, ssi))) in
        sat.observations.iter().zip(expected.iter()).enumerate()
    {
        assert!(
            (obs.value - value).abs() < 1.0E-6,
            "{} obs #{}: value {} expecting {}",
            sat.sv,
            index,
            obs.value,
            value
        );
        assert_eq!(obs.lli, *lli, "{} obs #{}: bad lli", sat.sv, index);
        assert_eq!(obs.ssi, *ssi, "{} obs #{}: bad ssi", sat.sv, index);
    }
}
