//! Planet focus definitions shared by species

use crate::effects::condition::Condition;
use crate::species::record::FocusType;

pub const FOCUS_INDUSTRY: &str = "FOCUS_INDUSTRY";
pub const FOCUS_RESEARCH: &str = "FOCUS_RESEARCH";
pub const FOCUS_INFLUENCE: &str = "FOCUS_INFLUENCE";
pub const FOCUS_GROWTH: &str = "FOCUS_GROWTH";
pub const FOCUS_PROTECTION: &str = "FOCUS_PROTECTION";
pub const FOCUS_STOCKPILE: &str = "FOCUS_STOCKPILE";
pub const FOCUS_PSYCHOGENIC_DOMINANCE: &str = "FOCUS_PSYCHOGENIC_DOMINANCE";
pub const FOCUS_PLANET_CLOAK: &str = "FOCUS_PLANET_CLOAK";
pub const FOCUS_BIOTERROR: &str = "FOCUS_BIOTERROR";

/// Every focus name the library defines
pub const ALL_FOCI: [&str; 9] = [
    FOCUS_INDUSTRY,
    FOCUS_RESEARCH,
    FOCUS_INFLUENCE,
    FOCUS_GROWTH,
    FOCUS_PROTECTION,
    FOCUS_STOCKPILE,
    FOCUS_PSYCHOGENIC_DOMINANCE,
    FOCUS_PLANET_CLOAK,
    FOCUS_BIOTERROR,
];

pub fn industry_focus() -> FocusType {
    FocusType::new(FOCUS_INDUSTRY, Condition::Planet, "icons/focus/industry.png")
}

pub fn research_focus() -> FocusType {
    FocusType::new(FOCUS_RESEARCH, Condition::Planet, "icons/focus/research.png")
}

pub fn influence_focus() -> FocusType {
    FocusType::new(FOCUS_INFLUENCE, Condition::Planet, "icons/focus/influence.png")
}

/// Only worth selecting on planets holding a growth special
pub fn growth_focus() -> FocusType {
    FocusType::new(
        FOCUS_GROWTH,
        Condition::Planet
            & (Condition::has_special("GAIA_SPECIAL")
                | Condition::has_special("SUCCULENT_BARNACLES_SPECIAL")
                | Condition::has_special("CRYSTALS_SPECIAL")),
        "icons/focus/growth.png",
    )
}

/// Foci unlocked by techs, in display order
pub fn advanced_foci() -> Vec<FocusType> {
    vec![
        FocusType::new(FOCUS_PROTECTION, Condition::Planet, "icons/focus/protection.png"),
        FocusType::new(
            FOCUS_STOCKPILE,
            Condition::Planet & Condition::owner_has_tech("PRO_GENERIC_SUPPLIES"),
            "icons/focus/stockpile.png",
        ),
        FocusType::new(
            FOCUS_PSYCHOGENIC_DOMINANCE,
            Condition::Planet & Condition::owner_has_tech("LRN_PSY_DOM"),
            "icons/focus/psychogenic_dominance.png",
        ),
        FocusType::new(
            FOCUS_PLANET_CLOAK,
            Condition::Planet & Condition::owner_has_tech("SHP_PLANET_CLOAK"),
            "icons/focus/planet_cloak.png",
        ),
        FocusType::new(
            FOCUS_BIOTERROR,
            Condition::Planet & Condition::owner_has_tech("GRO_BIOTERROR"),
            "icons/focus/bioterror.png",
        ),
    ]
}

/// The standard focus list: basic economy foci, growth, then advanced foci
pub fn standard_foci() -> Vec<FocusType> {
    let mut foci = vec![
        industry_focus(),
        research_focus(),
        influence_focus(),
        growth_focus(),
    ];
    foci.extend(advanced_foci());
    foci
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let names: Vec<_> = standard_foci().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ALL_FOCI.to_vec());
    }

    #[test]
    fn test_stockpile_focus_requires_tech() {
        let foci = advanced_foci();
        let stockpile = foci.iter().find(|f| f.name == FOCUS_STOCKPILE).unwrap();
        assert_eq!(
            stockpile.location.to_string(),
            "Planet & OwnerHasTech(\"PRO_GENERIC_SUPPLIES\")"
        );
        assert_eq!(stockpile.description, "FOCUS_STOCKPILE_DESC");
    }
}
