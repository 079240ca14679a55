//! SP_FULVER: lithic telepaths who hoard resources and prefer a loose
//! confederation of worlds

use crate::core::types::PlanetType;
use crate::effects::condition::Condition;
use crate::effects::effect::Effect;
use crate::effects::group::EffectsGroup;
use crate::library::focus::{self, FOCUS_STOCKPILE};
use crate::library::{self, SkillLevel};
use crate::species::builder::SpeciesBuilder;
use crate::species::record::Species;

pub const NAME: &str = "SP_FULVER";

const TAGS: [&str; 10] = [
    "LITHIC",
    "GOOD_STOCKPILE",
    "GOOD_WEAPONS",
    "BAD_RESEARCH",
    "BAD_HAPPINESS",
    "AVERAGE_SUPPLY",
    "GREAT_FUEL",
    "TELEPATHIC",
    "PEDIA_LITHIC_SPECIES_CLASS",
    "PEDIA_TELEPATHIC_TITLE",
];

const LIKES: [&str; 19] = [
    "BLD_HYPER_DAM",
    "BLD_STARGATE",
    "CRYSTALS_SPECIAL",
    "ECCENTRIC_ORBIT_SPECIAL",
    "FOCUS_STOCKPILE",
    "GAIA_SPECIAL",
    "MIMETIC_ALLOY_SPECIAL",
    "PLC_ALGORITHMIC_RESEARCH",
    "PLC_COLONIZATION",
    "PLC_CONFEDERATION",
    "PLC_DREAM_RECURSION",
    "PLC_ENGINEERING",
    "PLC_EXPLORATION",
    "PLC_LIBERTY",
    "PLC_MODERATION",
    "PLC_RACIAL_PURITY",
    "PLC_STOCKPILE_LIQUIDATION",
    "RESONANT_MOON_SPECIAL",
    "SUCCULENT_BARNACLES_SPECIAL",
];

const DISLIKES: [&str; 14] = [
    "ANCIENT_RUINS_DEPLETED_SPECIAL",
    "BLD_GAS_GIANT_GEN",
    "BLD_INDUSTRY_CENTER",
    "BLD_SHIPYARD_ENRG_COMP",
    "BLD_SHIPYARD_ENRG_SOLAR",
    "BLD_SOL_ORB_GEN",
    "FORTRESS_SPECIAL",
    "KRAKEN_NEST_SPECIAL",
    "PLC_BUREAUCRACY",
    "PLC_CHECKPOINTS",
    "PLC_ENVIRONMENTALISM",
    "PLC_INTERSTELLAR_INFRA",
    "PLC_SYSTEM_INFRA",
    "SUPERCONDUCTOR_SPECIAL",
];

/// Policy a Fulver capital hands to its owner
pub const CAPITAL_POLICY: &str = "PLC_CONFEDERATION";

/// An owned Fulver capital planet grants its empire Confederation
pub fn capital_confederation() -> EffectsGroup {
    EffectsGroup::new(Condition::Source)
        .activation(Condition::Planet & !Condition::Unowned & Condition::Capital)
        .effect(Effect::give_policy(CAPITAL_POLICY))
}

pub fn sp_fulver() -> Species {
    SpeciesBuilder::new(NAME)
        .playable(true)
        .can_produce_ships(true)
        .can_colonize(true)
        .tags(TAGS)
        .focus(focus::industry_focus())
        .focus(focus::research_focus())
        .focus(focus::influence_focus())
        .focus(focus::growth_focus())
        .foci(focus::advanced_foci())
        .default_focus(FOCUS_STOCKPILE)
        .likes(LIKES)
        .dislikes(DISLIKES)
        .effects(library::industry(SkillLevel::Average))
        .effects(library::research(SkillLevel::Bad))
        .effects(library::influence(SkillLevel::Average))
        .effects(library::stockpile(SkillLevel::Good))
        .effects(library::population(SkillLevel::Average))
        .effects(library::happiness(SkillLevel::Bad))
        .effects_group(library::common_opinion_effects(NAME))
        .effects(library::supply(SkillLevel::Average))
        .effects(library::defense_troops(SkillLevel::Bad))
        .effects(library::weapons(SkillLevel::Good))
        .effects(library::fuel(SkillLevel::Great))
        .effects(library::precognitive_detection(2))
        // not shown in the species description
        .effects(library::planetary_shields(SkillLevel::Average))
        .effects(library::planetary_defense(SkillLevel::Average))
        .effects(library::large_planet())
        .effects(library::narrow_ep())
        .effects(library::ship_shields(SkillLevel::Average))
        .effects_group(capital_confederation())
        .environments(library::narrow_environments(PlanetType::Tundra))
        .graphic("icons/species/insectoid-01.png")
        .build()
}
