//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for universe objects (planets, ships, buildings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for empires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmpireId(pub u32);

impl EmpireId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Game turn counter
pub type Turn = u32;

/// Planet types. The first nine form the habitability wheel in this order;
/// asteroids and gas giants sit outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetType {
    Swamp,
    Toxic,
    Inferno,
    Radiated,
    Barren,
    Tundra,
    Desert,
    Terran,
    Ocean,
    Asteroids,
    GasGiant,
}

impl PlanetType {
    pub const ALL: [PlanetType; 11] = [
        PlanetType::Swamp,
        PlanetType::Toxic,
        PlanetType::Inferno,
        PlanetType::Radiated,
        PlanetType::Barren,
        PlanetType::Tundra,
        PlanetType::Desert,
        PlanetType::Terran,
        PlanetType::Ocean,
        PlanetType::Asteroids,
        PlanetType::GasGiant,
    ];

    pub const WHEEL: [PlanetType; 9] = [
        PlanetType::Swamp,
        PlanetType::Toxic,
        PlanetType::Inferno,
        PlanetType::Radiated,
        PlanetType::Barren,
        PlanetType::Tundra,
        PlanetType::Desert,
        PlanetType::Terran,
        PlanetType::Ocean,
    ];

    /// Position on the habitability wheel, if any
    pub fn wheel_index(&self) -> Option<usize> {
        Self::WHEEL.iter().position(|t| t == self)
    }

    /// Steps around the wheel between two types (0..=4), None off the wheel
    pub fn wheel_distance(&self, other: &PlanetType) -> Option<usize> {
        let a = self.wheel_index()?;
        let b = other.wheel_index()?;
        let diff = a.abs_diff(b);
        Some(diff.min(Self::WHEEL.len() - diff))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetType::Swamp => "SWAMP",
            PlanetType::Toxic => "TOXIC",
            PlanetType::Inferno => "INFERNO",
            PlanetType::Radiated => "RADIATED",
            PlanetType::Barren => "BARREN",
            PlanetType::Tundra => "TUNDRA",
            PlanetType::Desert => "DESERT",
            PlanetType::Terran => "TERRAN",
            PlanetType::Ocean => "OCEAN",
            PlanetType::Asteroids => "ASTEROIDS",
            PlanetType::GasGiant => "GAS_GIANT",
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown planet type '{}'", s))
    }
}

/// Planet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Asteroids,
    GasGiant,
}

impl PlanetSize {
    pub const ALL: [PlanetSize; 7] = [
        PlanetSize::Tiny,
        PlanetSize::Small,
        PlanetSize::Medium,
        PlanetSize::Large,
        PlanetSize::Huge,
        PlanetSize::Asteroids,
        PlanetSize::GasGiant,
    ];

    /// Multiplier applied to per-size population modifiers
    pub fn habitable_size(&self) -> f64 {
        match self {
            PlanetSize::Tiny => 1.0,
            PlanetSize::Small => 2.0,
            PlanetSize::Medium => 3.0,
            PlanetSize::Large => 5.0,
            PlanetSize::Huge => 8.0,
            PlanetSize::Asteroids => 3.0,
            PlanetSize::GasGiant => 6.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetSize::Tiny => "TINY",
            PlanetSize::Small => "SMALL",
            PlanetSize::Medium => "MEDIUM",
            PlanetSize::Large => "LARGE",
            PlanetSize::Huge => "HUGE",
            PlanetSize::Asteroids => "ASTEROIDS",
            PlanetSize::GasGiant => "GAS_GIANT",
        }
    }
}

impl fmt::Display for PlanetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanetSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetSize::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown planet size '{}'", s))
    }
}

/// How suitable a planet type is for a species, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanetEnvironment {
    Uninhabitable,
    Hostile,
    Poor,
    Adequate,
    Good,
}

impl PlanetEnvironment {
    pub const ALL: [PlanetEnvironment; 5] = [
        PlanetEnvironment::Uninhabitable,
        PlanetEnvironment::Hostile,
        PlanetEnvironment::Poor,
        PlanetEnvironment::Adequate,
        PlanetEnvironment::Good,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanetEnvironment::Uninhabitable => "UNINHABITABLE",
            PlanetEnvironment::Hostile => "HOSTILE",
            PlanetEnvironment::Poor => "POOR",
            PlanetEnvironment::Adequate => "ADEQUATE",
            PlanetEnvironment::Good => "GOOD",
        }
    }
}

impl fmt::Display for PlanetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanetEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetEnvironment::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown planet environment '{}'", s))
    }
}
