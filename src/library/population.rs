//! Population, happiness and opinion fragments

use super::{SkillLevel, EARLY_PRIORITY};
use crate::core::types::{PlanetEnvironment, PlanetSize};
use crate::effects::condition::Condition;
use crate::effects::effect::{Effect, MeterType};
use crate::effects::group::EffectsGroup;

/// Target population per habitable size, by environment
pub fn environment_population(env: PlanetEnvironment) -> f64 {
    match env {
        PlanetEnvironment::Good => 3.0,
        PlanetEnvironment::Adequate => 0.0,
        PlanetEnvironment::Poor => -1.0,
        PlanetEnvironment::Hostile => -4.0,
        PlanetEnvironment::Uninhabitable => 0.0,
    }
}

/// Happiness change per step away from average
pub const HAPPINESS_SKILL_STEP: f64 = 5.0;

/// Environment-driven target population plus the species adjustment on
/// habitable planets
pub fn population(level: SkillLevel) -> Vec<EffectsGroup> {
    let mut groups: Vec<EffectsGroup> = [
        PlanetEnvironment::Good,
        PlanetEnvironment::Poor,
        PlanetEnvironment::Hostile,
    ]
    .into_iter()
    .map(|env| {
        EffectsGroup::new(Condition::Source)
            .activation(Condition::Planet & Condition::PlanetEnvironment(env))
            .stacking_group(&format!("POPULATION_{}_ENVIRONMENT_STACK", env))
            .accounting_label(&format!("{}_ENVIRONMENT_LABEL", env))
            .priority(EARLY_PRIORITY)
            .effect(Effect::add_per_size(
                MeterType::TargetPopulation,
                environment_population(env),
            ))
    })
    .collect();

    if level != SkillLevel::Average {
        groups.push(
            EffectsGroup::new(Condition::Source)
                .activation(
                    Condition::Planet
                        & (Condition::PlanetEnvironment(PlanetEnvironment::Good)
                            | Condition::PlanetEnvironment(PlanetEnvironment::Adequate)
                            | Condition::PlanetEnvironment(PlanetEnvironment::Poor)),
                )
                .stacking_group(&format!("{}_STACK", level.tag("POPULATION")))
                .accounting_label(&level.tag("POPULATION"))
                .effect(Effect::add_per_size(MeterType::TargetPopulation, level.delta())),
        );
    }
    groups
}

pub fn happiness(level: SkillLevel) -> Vec<EffectsGroup> {
    if level == SkillLevel::Average {
        return Vec::new();
    }
    vec![EffectsGroup::new(Condition::Source)
        .activation(Condition::Planet & !Condition::Unowned)
        .stacking_group(&format!("{}_STACK", level.tag("HAPPINESS")))
        .accounting_label(&level.tag("HAPPINESS"))
        .effect(Effect::add(
            MeterType::TargetHappiness,
            HAPPINESS_SKILL_STEP * level.delta(),
        ))]
}

/// Likes and dislikes move happiness on planets the species populates
pub fn common_opinion_effects(species: &str) -> EffectsGroup {
    EffectsGroup::new(Condition::Source)
        .activation(Condition::Planet & !Condition::Unowned)
        .stacking_group(&format!("{}_OPINION_STACK", species))
        .accounting_label("OPINION_LABEL")
        .effect(Effect::ApplyOpinions {
            species: species.to_string(),
        })
}

/// Large worlds suit the species; small ones cramp it
pub fn large_planet() -> Vec<EffectsGroup> {
    vec![
        EffectsGroup::new(Condition::Source)
            .activation(
                Condition::Planet
                    & (Condition::PlanetSize(PlanetSize::Large)
                        | Condition::PlanetSize(PlanetSize::Huge)),
            )
            .stacking_group("LARGE_PLANET_BONUS_STACK")
            .accounting_label("LARGE_PLANET_LABEL")
            .effect(Effect::add_per_size(MeterType::TargetPopulation, 0.5)),
        EffectsGroup::new(Condition::Source)
            .activation(
                Condition::Planet
                    & (Condition::PlanetSize(PlanetSize::Tiny)
                        | Condition::PlanetSize(PlanetSize::Small)),
            )
            .stacking_group("LARGE_PLANET_MALUS_STACK")
            .accounting_label("SMALL_PLANET_LABEL")
            .effect(Effect::add_per_size(MeterType::TargetPopulation, -0.5)),
    ]
}

/// Narrow tolerance: poor planets support even fewer colonists
pub fn narrow_ep() -> Vec<EffectsGroup> {
    vec![EffectsGroup::new(Condition::Source)
        .activation(Condition::Planet & Condition::PlanetEnvironment(PlanetEnvironment::Poor))
        .stacking_group("NARROW_EP_STACK")
        .accounting_label("NARROW_EP_LABEL")
        .effect(Effect::add_per_size(MeterType::TargetPopulation, -1.0))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_population_is_environment_only() {
        let groups = population(SkillLevel::Average);
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups[0].activation.as_ref().unwrap().to_string(),
            "Planet & PlanetEnvironment(GOOD)"
        );
    }

    #[test]
    fn test_bad_happiness() {
        let groups = happiness(SkillLevel::Bad);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].effects, vec![Effect::add(MeterType::TargetHappiness, -2.5)]);
        assert!(happiness(SkillLevel::Average).is_empty());
    }

    #[test]
    fn test_opinion_group_names_species() {
        let group = common_opinion_effects("SP_FULVER");
        assert_eq!(group.stacking_group.as_deref(), Some("SP_FULVER_OPINION_STACK"));
        assert_eq!(
            group.effects,
            vec![Effect::ApplyOpinions {
                species: "SP_FULVER".into()
            }]
        );
    }
}
