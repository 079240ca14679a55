//! Built-in policy catalog

use super::Policy;
use crate::effects::condition::Condition;
use crate::effects::effect::{Effect, MeterType};
use crate::effects::group::EffectsGroup;

pub const ECONOMIC_CATEGORY: &str = "ECONOMIC_CATEGORY";
pub const SOCIAL_CATEGORY: &str = "SOCIAL_CATEGORY";
pub const MILITARY_CATEGORY: &str = "MILITARY_CATEGORY";

/// Flat influence at the adopting empire's capital
fn capital_influence(policy: &str, amount: f64) -> EffectsGroup {
    EffectsGroup::new(Condition::Source)
        .stacking_group(&format!("{}_INFLUENCE_STACK", policy))
        .accounting_label(policy)
        .effect(Effect::add(MeterType::TargetInfluence, amount))
}

/// Every policy the base content ships with
pub fn builtin_policies() -> Vec<Policy> {
    vec![
        // Economic
        Policy::new("PLC_ALGORITHMIC_RESEARCH", ECONOMIC_CATEGORY, 9.0),
        Policy::new("PLC_CENTRALIZATION", ECONOMIC_CATEGORY, 12.0)
            .with_prerequisite("PLC_PLANETARY_INFRA")
            .with_exclusion("PLC_CONFEDERATION")
            .with_effects_group(capital_influence("PLC_CENTRALIZATION", 2.0)),
        Policy::new("PLC_PLANETARY_INFRA", ECONOMIC_CATEGORY, 4.0),
        Policy::new("PLC_SYSTEM_INFRA", ECONOMIC_CATEGORY, 6.0)
            .with_prerequisite("PLC_PLANETARY_INFRA"),
        Policy::new("PLC_INTERSTELLAR_INFRA", ECONOMIC_CATEGORY, 10.0)
            .with_prerequisite("PLC_SYSTEM_INFRA"),
        Policy::new("PLC_TECHNOCRACY", ECONOMIC_CATEGORY, 10.0).with_exclusion("PLC_INDUSTRIALISM"),
        Policy::new("PLC_INDUSTRIALISM", ECONOMIC_CATEGORY, 10.0)
            .with_exclusion("PLC_TECHNOCRACY")
            .with_exclusion("PLC_ENVIRONMENTALISM"),
        Policy::new("PLC_ENVIRONMENTALISM", ECONOMIC_CATEGORY, 8.0)
            .with_exclusion("PLC_INDUSTRIALISM"),
        Policy::new("PLC_STOCKPILE_LIQUIDATION", ECONOMIC_CATEGORY, 6.0),
        Policy::new("PLC_COLONIZATION", ECONOMIC_CATEGORY, 8.0),
        Policy::new("PLC_EXPLORATION", ECONOMIC_CATEGORY, 3.0),
        Policy::new("PLC_ENGINEERING", ECONOMIC_CATEGORY, 7.0),
        // Social
        Policy::new("PLC_PROPAGANDA", SOCIAL_CATEGORY, 5.0)
            .with_effects_group(capital_influence("PLC_PROPAGANDA", 1.0)),
        Policy::new("PLC_LIBERTY", SOCIAL_CATEGORY, 8.0).with_exclusion("PLC_CONFORMANCE"),
        Policy::new("PLC_CONFORMANCE", SOCIAL_CATEGORY, 8.0).with_exclusion("PLC_LIBERTY"),
        Policy::new("PLC_DIVERSITY", SOCIAL_CATEGORY, 9.0).with_exclusion("PLC_RACIAL_PURITY"),
        Policy::new("PLC_RACIAL_PURITY", SOCIAL_CATEGORY, 7.0).with_exclusion("PLC_DIVERSITY"),
        Policy::new("PLC_MODERATION", SOCIAL_CATEGORY, 6.0),
        Policy::new("PLC_BUREAUCRACY", SOCIAL_CATEGORY, 6.0),
        Policy::new("PLC_CONFEDERATION", SOCIAL_CATEGORY, 11.0)
            .with_exclusion("PLC_CENTRALIZATION")
            .with_effects_group(
                EffectsGroup::new(Condition::Planet & Condition::OwnedBySourceOwner)
                    .stacking_group("PLC_CONFEDERATION_STABILITY_STACK")
                    .accounting_label("PLC_CONFEDERATION")
                    .effect(Effect::add(MeterType::TargetHappiness, 1.0)),
            )
            .with_effects_group(capital_influence("PLC_CONFEDERATION", -1.0)),
        Policy::new("PLC_DREAM_RECURSION", SOCIAL_CATEGORY, 9.0),
        // Military
        Policy::new("PLC_CHECKPOINTS", MILITARY_CATEGORY, 5.0),
        Policy::new("PLC_ALLIED_REPAIR", MILITARY_CATEGORY, 6.0),
        Policy::new("PLC_MARTIAL_LAW", MILITARY_CATEGORY, 7.0),
    ]
}
