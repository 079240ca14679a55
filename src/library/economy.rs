//! Resource output fragments: industry, research, influence and stockpile

use super::focus::{FOCUS_INDUSTRY, FOCUS_INFLUENCE, FOCUS_RESEARCH, FOCUS_STOCKPILE};
use super::{SkillLevel, EARLY_PRIORITY};
use crate::effects::condition::Condition;
use crate::effects::effect::{Effect, MeterType};
use crate::effects::group::{EffectsGroup, DEFAULT_PRIORITY};

pub const INDUSTRY_PER_POP: f64 = 0.2;
pub const RESEARCH_PER_POP: f64 = 0.2;
/// Flat influence from an influence-focused planet
pub const INFLUENCE_FOCUS_OUTPUT: f64 = 3.0;
pub const STOCKPILE_PER_POP: f64 = 0.02;
/// Extra stockpile capacity per step above average
pub const STOCKPILE_SKILL_STEP: f64 = 2.0;

fn focused_owned_planet(focus: &str) -> Condition {
    Condition::Planet & !Condition::Unowned & Condition::focus(focus)
}

/// Per-population output on a focused planet plus the species adjustment
fn focused_output(
    concern: &str,
    meter: MeterType,
    focus: &str,
    per_pop: f64,
    level: SkillLevel,
) -> Vec<EffectsGroup> {
    let mut groups = vec![EffectsGroup::new(Condition::Source)
        .activation(focused_owned_planet(focus))
        .stacking_group(&format!("{}_FOCUS_BASIC_STACK", concern))
        .accounting_label(&format!("{}_FOCUS_LABEL", concern))
        .priority(EARLY_PRIORITY)
        .effect(Effect::add_per_pop(meter, per_pop))];

    if level != SkillLevel::Average {
        groups.push(
            EffectsGroup::new(Condition::Source)
                .activation(focused_owned_planet(focus))
                .stacking_group(&format!("{}_STACK", level.tag(concern)))
                .accounting_label(&level.tag(concern))
                .priority(DEFAULT_PRIORITY)
                .effect(Effect::add_per_pop(meter, per_pop * level.delta())),
        );
    }
    groups
}

pub fn industry(level: SkillLevel) -> Vec<EffectsGroup> {
    focused_output(
        "INDUSTRY",
        MeterType::TargetIndustry,
        FOCUS_INDUSTRY,
        INDUSTRY_PER_POP,
        level,
    )
}

pub fn research(level: SkillLevel) -> Vec<EffectsGroup> {
    focused_output(
        "RESEARCH",
        MeterType::TargetResearch,
        FOCUS_RESEARCH,
        RESEARCH_PER_POP,
        level,
    )
}

/// Influence does not scale with population
pub fn influence(level: SkillLevel) -> Vec<EffectsGroup> {
    let mut groups = vec![EffectsGroup::new(Condition::Source)
        .activation(focused_owned_planet(FOCUS_INFLUENCE))
        .stacking_group("INFLUENCE_FOCUS_BASIC_STACK")
        .accounting_label("INFLUENCE_FOCUS_LABEL")
        .priority(EARLY_PRIORITY)
        .effect(Effect::add(MeterType::TargetInfluence, INFLUENCE_FOCUS_OUTPUT))];

    if level != SkillLevel::Average {
        groups.push(
            EffectsGroup::new(Condition::Source)
                .activation(focused_owned_planet(FOCUS_INFLUENCE))
                .stacking_group(&format!("{}_STACK", level.tag("INFLUENCE")))
                .accounting_label(&level.tag("INFLUENCE"))
                .effect(Effect::add(MeterType::TargetInfluence, level.delta())),
        );
    }
    groups
}

/// Stockpile-focused planets feed the imperial stockpile; skilled species
/// raise capacity on every planet they own
pub fn stockpile(level: SkillLevel) -> Vec<EffectsGroup> {
    let mut groups = vec![EffectsGroup::new(Condition::Source)
        .activation(focused_owned_planet(FOCUS_STOCKPILE))
        .stacking_group("STOCKPILE_FOCUS_BASIC_STACK")
        .accounting_label("STOCKPILE_FOCUS_LABEL")
        .priority(EARLY_PRIORITY)
        .effect(Effect::add_per_pop(
            MeterType::MaxStockpile,
            STOCKPILE_PER_POP * level.multiplier(),
        ))];

    if level != SkillLevel::Average {
        groups.push(
            EffectsGroup::new(Condition::Source)
                .activation(Condition::Planet & !Condition::Unowned)
                .stacking_group(&format!("{}_STACK", level.tag("STOCKPILE")))
                .accounting_label(&level.tag("STOCKPILE"))
                .effect(Effect::add(
                    MeterType::MaxStockpile,
                    STOCKPILE_SKILL_STEP * level.delta(),
                )),
        );
    }
    groups
}
