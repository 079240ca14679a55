//! Shared content fragments species records are assembled from
//!
//! Each fragment is a function returning an ordered `Vec<EffectsGroup>`.
//! Species splice them onto their record in declaration order through
//! [`SpeciesBuilder::effects`](crate::species::SpeciesBuilder::effects).
//! The same fragments are also available by name through [`fragment`],
//! built once per process.

pub mod economy;
pub mod environment;
pub mod focus;
pub mod military;
pub mod population;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::effects::group::EffectsGroup;

pub use economy::{industry, influence, research, stockpile};
pub use environment::{narrow_environments, standard_environments};
pub use military::{
    defense_troops, fuel, planetary_defense, planetary_shields, precognitive_detection,
    ship_shields, supply, weapons,
};
pub use population::{common_opinion_effects, happiness, large_planet, narrow_ep, population};

/// Runs before scaled adjustments (base outputs, environment population)
pub const EARLY_PRIORITY: i32 = 50;
/// Multipliers run after every additive group
pub const LATE_PRIORITY: i32 = 150;

/// How good a species is at something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    NoSkill,
    VeryBad,
    Bad,
    Average,
    Good,
    Great,
    Ultimate,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 7] = [
        SkillLevel::NoSkill,
        SkillLevel::VeryBad,
        SkillLevel::Bad,
        SkillLevel::Average,
        SkillLevel::Good,
        SkillLevel::Great,
        SkillLevel::Ultimate,
    ];

    /// Output multiplier relative to an average species
    pub fn multiplier(&self) -> f64 {
        match self {
            SkillLevel::NoSkill => 0.0,
            SkillLevel::VeryBad => 0.25,
            SkillLevel::Bad => 0.5,
            SkillLevel::Average => 1.0,
            SkillLevel::Good => 1.5,
            SkillLevel::Great => 2.0,
            SkillLevel::Ultimate => 3.0,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            SkillLevel::NoSkill => "NO",
            SkillLevel::VeryBad => "VERY_BAD",
            SkillLevel::Bad => "BAD",
            SkillLevel::Average => "AVERAGE",
            SkillLevel::Good => "GOOD",
            SkillLevel::Great => "GREAT",
            SkillLevel::Ultimate => "ULTIMATE",
        }
    }

    /// Species tag for this level of a concern, e.g. `GOOD_STOCKPILE`
    pub fn tag(&self, concern: &str) -> String {
        format!("{}_{}", self.prefix(), concern)
    }

    /// Offset from average: Good is +0.5, Bad is -0.5
    pub fn delta(&self) -> f64 {
        self.multiplier() - 1.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

type LevelFragment = fn(SkillLevel) -> Vec<EffectsGroup>;

/// Concerns with one fragment per skill level
const LEVELLED: [(&str, LevelFragment); 13] = [
    ("INDUSTRY", industry),
    ("RESEARCH", research),
    ("INFLUENCE", influence),
    ("STOCKPILE", stockpile),
    ("POPULATION", population),
    ("HAPPINESS", happiness),
    ("SUPPLY", supply),
    ("DEFENSE_TROOPS", defense_troops),
    ("WEAPONS", weapons),
    ("FUEL", fuel),
    ("PLANETARY_SHIELDS", planetary_shields),
    ("PLANETARY_DEFENSE", planetary_defense),
    ("SHIP_SHIELDS", ship_shields),
];

fn fragment_table() -> &'static AHashMap<String, Vec<EffectsGroup>> {
    static TABLE: OnceLock<AHashMap<String, Vec<EffectsGroup>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = AHashMap::new();
        for (concern, build) in LEVELLED {
            for level in SkillLevel::ALL {
                table.insert(level.tag(concern), build(level));
            }
        }
        table.insert("STANDARD_SHIP_SHIELDS".to_string(), ship_shields(SkillLevel::Average));
        table.insert("LARGE_PLANET".to_string(), large_planet());
        table.insert("NARROW_EP".to_string(), narrow_ep());
        table
    })
}

/// Pre-built fragment by name, e.g. `GOOD_WEAPONS` or `NARROW_EP`
pub fn fragment(name: &str) -> Option<&'static [EffectsGroup]> {
    fragment_table().get(name).map(Vec::as_slice)
}

/// Every fragment name in the table, sorted
pub fn fragment_names() -> Vec<&'static str> {
    let mut names: Vec<&str> = fragment_table().keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_tags() {
        assert_eq!(SkillLevel::Good.tag("STOCKPILE"), "GOOD_STOCKPILE");
        assert_eq!(SkillLevel::VeryBad.tag("RESEARCH"), "VERY_BAD_RESEARCH");
        assert!(SkillLevel::Bad < SkillLevel::Average);
    }

    #[test]
    fn test_fragment_lookup_matches_functions() {
        assert_eq!(fragment("GOOD_WEAPONS").unwrap(), weapons(SkillLevel::Good).as_slice());
        assert_eq!(fragment("NARROW_EP").unwrap(), narrow_ep().as_slice());
        assert_eq!(
            fragment("STANDARD_SHIP_SHIELDS").unwrap(),
            ship_shields(SkillLevel::Average).as_slice()
        );
        assert!(fragment("EXCELLENT_WEAPONS").is_none());
    }

    #[test]
    fn test_fragment_names_cover_species_skill_tags() {
        let names = fragment_names();
        for tag in [
            "GOOD_STOCKPILE",
            "GOOD_WEAPONS",
            "BAD_RESEARCH",
            "BAD_HAPPINESS",
            "AVERAGE_SUPPLY",
            "GREAT_FUEL",
        ] {
            assert!(names.contains(&tag), "{}", tag);
        }
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_is_shared() {
        let a = fragment("AVERAGE_INDUSTRY").unwrap().as_ptr();
        let b = fragment("AVERAGE_INDUSTRY").unwrap().as_ptr();
        assert_eq!(a, b);
    }
}
