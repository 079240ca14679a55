//! Effects: the state changes an effects group applies to its targets

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::checksum::{combine, CheckSum};

/// Object meters species content can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeterType {
    TargetIndustry,
    TargetResearch,
    TargetInfluence,
    MaxStockpile,
    TargetPopulation,
    TargetHappiness,
    MaxSupply,
    MaxTroops,
    MaxDefense,
    MaxShield,
    Detection,
    MaxFuel,
    WeaponDamage,
    ShipShields,
}

impl MeterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeterType::TargetIndustry => "TARGET_INDUSTRY",
            MeterType::TargetResearch => "TARGET_RESEARCH",
            MeterType::TargetInfluence => "TARGET_INFLUENCE",
            MeterType::MaxStockpile => "MAX_STOCKPILE",
            MeterType::TargetPopulation => "TARGET_POPULATION",
            MeterType::TargetHappiness => "TARGET_HAPPINESS",
            MeterType::MaxSupply => "MAX_SUPPLY",
            MeterType::MaxTroops => "MAX_TROOPS",
            MeterType::MaxDefense => "MAX_DEFENSE",
            MeterType::MaxShield => "MAX_SHIELD",
            MeterType::Detection => "DETECTION",
            MeterType::MaxFuel => "MAX_FUEL",
            MeterType::WeaponDamage => "WEAPON_DAMAGE",
            MeterType::ShipShields => "SHIP_SHIELDS",
        }
    }
}

impl fmt::Display for MeterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a meter effect combines with the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterOp {
    Add,
    Multiply,
    Set,
}

impl MeterOp {
    pub fn apply(&self, current: f64, value: f64) -> f64 {
        match self {
            MeterOp::Add => current + value,
            MeterOp::Multiply => current * value,
            MeterOp::Set => value,
        }
    }
}

/// What a meter effect's value is multiplied by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    #[default]
    Flat,
    /// The target's population
    Population,
    /// The target planet's habitable size
    HabitableSize,
}

/// A single state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// Change a meter on the target
    SetMeter {
        meter: MeterType,
        op: MeterOp,
        value: f64,
        #[serde(default)]
        scale: Scaling,
    },
    /// The target's owner adopts a policy without paying for it
    GiveEmpirePolicy { name: String },
    /// Adjust target happiness by what the species likes and dislikes
    /// around the target, and record the species' opinion of the owner
    ApplyOpinions { species: String },
}

impl Effect {
    pub fn add(meter: MeterType, value: f64) -> Self {
        Effect::SetMeter {
            meter,
            op: MeterOp::Add,
            value,
            scale: Scaling::Flat,
        }
    }

    pub fn add_per_pop(meter: MeterType, value: f64) -> Self {
        Effect::SetMeter {
            meter,
            op: MeterOp::Add,
            value,
            scale: Scaling::Population,
        }
    }

    pub fn add_per_size(meter: MeterType, value: f64) -> Self {
        Effect::SetMeter {
            meter,
            op: MeterOp::Add,
            value,
            scale: Scaling::HabitableSize,
        }
    }

    pub fn multiply(meter: MeterType, value: f64) -> Self {
        Effect::SetMeter {
            meter,
            op: MeterOp::Multiply,
            value,
            scale: Scaling::Flat,
        }
    }

    pub fn set(meter: MeterType, value: f64) -> Self {
        Effect::SetMeter {
            meter,
            op: MeterOp::Set,
            value,
            scale: Scaling::Flat,
        }
    }

    pub fn give_policy(name: &str) -> Self {
        Effect::GiveEmpirePolicy {
            name: name.to_string(),
        }
    }

    /// Policy granted by this effect, if any
    pub fn granted_policy(&self) -> Option<&str> {
        match self {
            Effect::GiveEmpirePolicy { name } => Some(name),
            _ => None,
        }
    }
}

impl CheckSum for Effect {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        match self {
            Effect::SetMeter {
                meter,
                op,
                value,
                scale,
            } => {
                combine(&mut sum, meter.as_str());
                combine(&mut sum, &(*op as u32));
                combine(&mut sum, value);
                combine(&mut sum, &(*scale as u32));
            }
            Effect::GiveEmpirePolicy { name } => {
                combine(&mut sum, "GiveEmpirePolicy");
                combine(&mut sum, name);
            }
            Effect::ApplyOpinions { species } => {
                combine(&mut sum, "ApplyOpinions");
                combine(&mut sum, species);
            }
        }
        sum
    }
}
