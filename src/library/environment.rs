//! Environment tables keyed on a species' home planet type
//!
//! Both tables list every planet type. Distances are measured around the
//! habitability wheel; asteroids and gas giants sit off the wheel and are
//! uninhabitable in both.

use std::collections::BTreeMap;

use crate::core::types::{PlanetEnvironment, PlanetType};

fn table(
    home: PlanetType,
    by_distance: impl Fn(usize) -> PlanetEnvironment,
) -> BTreeMap<PlanetType, PlanetEnvironment> {
    PlanetType::ALL
        .iter()
        .map(|planet_type| {
            let env = home
                .wheel_distance(planet_type)
                .map_or(PlanetEnvironment::Uninhabitable, &by_distance);
            (*planet_type, env)
        })
        .collect()
}

/// Good at home, Poor next door, Hostile everywhere else
pub fn narrow_environments(home: PlanetType) -> BTreeMap<PlanetType, PlanetEnvironment> {
    table(home, |distance| match distance {
        0 => PlanetEnvironment::Good,
        1 => PlanetEnvironment::Poor,
        _ => PlanetEnvironment::Hostile,
    })
}

/// Good at home, Adequate next door, Poor two steps out, Hostile beyond
pub fn standard_environments(home: PlanetType) -> BTreeMap<PlanetType, PlanetEnvironment> {
    table(home, |distance| match distance {
        0 => PlanetEnvironment::Good,
        1 => PlanetEnvironment::Adequate,
        2 => PlanetEnvironment::Poor,
        _ => PlanetEnvironment::Hostile,
    })
}
