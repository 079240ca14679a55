//! Supply, troops, ship and planetary defense fragments

use super::{SkillLevel, EARLY_PRIORITY, LATE_PRIORITY};
use crate::effects::condition::Condition;
use crate::effects::effect::{Effect, MeterType};
use crate::effects::group::EffectsGroup;

/// Troops per habitable size before species modifiers
pub const BASE_TROOPS_PER_SIZE: f64 = 2.0;
pub const WEAPON_SKILL_STEP: f64 = 2.0;
pub const FUEL_SKILL_STEP: f64 = 1.5;
pub const DETECTION_PER_LEVEL: f64 = 25.0;

fn owned_planet() -> Condition {
    Condition::Planet & !Condition::Unowned
}

fn owned_ship() -> Condition {
    Condition::Ship & !Condition::Unowned
}

/// Supply range added to planets the species populates
pub fn supply_range(level: SkillLevel) -> f64 {
    match level {
        SkillLevel::NoSkill | SkillLevel::VeryBad | SkillLevel::Bad => 0.0,
        SkillLevel::Average => 1.0,
        SkillLevel::Good => 2.0,
        SkillLevel::Great => 3.0,
        SkillLevel::Ultimate => 4.0,
    }
}

pub fn supply(level: SkillLevel) -> Vec<EffectsGroup> {
    let range = supply_range(level);
    if range == 0.0 {
        return Vec::new();
    }
    vec![EffectsGroup::new(Condition::Source)
        .activation(owned_planet())
        .stacking_group(&format!("{}_STACK", level.tag("SUPPLY")))
        .accounting_label(&level.tag("SUPPLY"))
        .effect(Effect::add(MeterType::MaxSupply, range))]
}

/// Base garrison, then the species multiplier once every addition is in
pub fn defense_troops(level: SkillLevel) -> Vec<EffectsGroup> {
    let mut groups = vec![EffectsGroup::new(Condition::Source)
        .activation(owned_planet())
        .stacking_group("PROTECTION_TROOPS_BASIC_STACK")
        .accounting_label("BASE_TROOPS_LABEL")
        .priority(EARLY_PRIORITY)
        .effect(Effect::add_per_size(MeterType::MaxTroops, BASE_TROOPS_PER_SIZE))];

    if level != SkillLevel::Average {
        groups.push(
            EffectsGroup::new(Condition::Source)
                .activation(owned_planet())
                .stacking_group(&format!("{}_STACK", level.tag("DEFENSE_TROOPS")))
                .accounting_label(&level.tag("DEFENSE_TROOPS"))
                .priority(LATE_PRIORITY)
                .effect(Effect::multiply(MeterType::MaxTroops, level.multiplier())),
        );
    }
    groups
}

fn ship_adjustment(concern: &str, meter: MeterType, step: f64, level: SkillLevel) -> Vec<EffectsGroup> {
    if level == SkillLevel::Average {
        return Vec::new();
    }
    vec![EffectsGroup::new(Condition::Source)
        .activation(owned_ship())
        .stacking_group(&format!("{}_STACK", level.tag(concern)))
        .accounting_label(&level.tag(concern))
        .effect(Effect::add(meter, step * level.delta()))]
}

pub fn weapons(level: SkillLevel) -> Vec<EffectsGroup> {
    ship_adjustment("WEAPONS", MeterType::WeaponDamage, WEAPON_SKILL_STEP, level)
}

pub fn fuel(level: SkillLevel) -> Vec<EffectsGroup> {
    ship_adjustment("FUEL", MeterType::MaxFuel, FUEL_SKILL_STEP, level)
}

pub fn ship_shields(level: SkillLevel) -> Vec<EffectsGroup> {
    ship_adjustment("SHIP_SHIELDS", MeterType::ShipShields, 1.0, level)
}

fn planet_multiplier(concern: &str, meter: MeterType, level: SkillLevel) -> Vec<EffectsGroup> {
    if level == SkillLevel::Average {
        return Vec::new();
    }
    vec![EffectsGroup::new(Condition::Source)
        .activation(owned_planet())
        .stacking_group(&format!("{}_STACK", level.tag(concern)))
        .accounting_label(&level.tag(concern))
        .priority(LATE_PRIORITY)
        .effect(Effect::multiply(meter, level.multiplier()))]
}

pub fn planetary_shields(level: SkillLevel) -> Vec<EffectsGroup> {
    planet_multiplier("PLANETARY_SHIELDS", MeterType::MaxShield, level)
}

pub fn planetary_defense(level: SkillLevel) -> Vec<EffectsGroup> {
    planet_multiplier("PLANETARY_DEFENSE", MeterType::MaxDefense, level)
}

/// Telepathic foresight extends detection around populated planets
pub fn precognitive_detection(level: u32) -> Vec<EffectsGroup> {
    vec![EffectsGroup::new(Condition::Source)
        .activation(owned_planet())
        .stacking_group("PRECOGNITIVE_DETECTION_STACK")
        .accounting_label("PRECOGNITIVE_DETECTION_LABEL")
        .effect(Effect::add(
            MeterType::Detection,
            DETECTION_PER_LEVEL * f64::from(level),
        ))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_ranges() {
        assert_eq!(supply(SkillLevel::Average)[0].effects, vec![Effect::add(MeterType::MaxSupply, 1.0)]);
        assert!(supply(SkillLevel::Bad).is_empty());
    }

    #[test]
    fn test_bad_troops_multiply_late() {
        let groups = defense_troops(SkillLevel::Bad);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].priority < groups[1].priority);
        assert_eq!(groups[1].effects, vec![Effect::multiply(MeterType::MaxTroops, 0.5)]);
    }

    #[test]
    fn test_ship_fragments_target_owned_ships() {
        let great_fuel = fuel(SkillLevel::Great);
        assert_eq!(great_fuel[0].effects, vec![Effect::add(MeterType::MaxFuel, 1.5)]);
        assert_eq!(
            great_fuel[0].activation.as_ref().unwrap().to_string(),
            "Ship & ~Unowned"
        );
        assert_eq!(weapons(SkillLevel::Good)[0].effects, vec![Effect::add(MeterType::WeaponDamage, 1.0)]);
    }

    #[test]
    fn test_average_defenses_are_empty() {
        assert!(planetary_shields(SkillLevel::Average).is_empty());
        assert!(planetary_defense(SkillLevel::Average).is_empty());
        assert!(ship_shields(SkillLevel::Average).is_empty());
        assert_eq!(planetary_shields(SkillLevel::Great).len(), 1);
    }

    #[test]
    fn test_precognitive_detection_scales_with_level() {
        assert_eq!(
            precognitive_detection(2)[0].effects,
            vec![Effect::add(MeterType::Detection, 50.0)]
        );
    }
}
