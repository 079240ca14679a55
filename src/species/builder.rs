//! Builder that assembles a species from library fragments
//!
//! Fragment functions return ordered `Vec<EffectsGroup>`s; `effects` splices
//! them onto the record in call order.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{PlanetEnvironment, PlanetType};
use crate::effects::group::EffectsGroup;
use crate::species::record::{FocusType, Species};

#[derive(Debug, Clone)]
pub struct SpeciesBuilder {
    species: Species,
}

impl SpeciesBuilder {
    /// Start a record; description keys default to `<NAME>_DESC` and
    /// `<NAME>_GAMEPLAY_DESC`
    pub fn new(name: &str) -> Self {
        Self {
            species: Species {
                name: name.to_string(),
                description: format!("{}_DESC", name),
                gameplay_description: format!("{}_GAMEPLAY_DESC", name),
                playable: false,
                can_produce_ships: false,
                can_colonize: false,
                tags: BTreeSet::new(),
                foci: Vec::new(),
                default_focus: None,
                likes: BTreeSet::new(),
                dislikes: BTreeSet::new(),
                effects_groups: Vec::new(),
                environments: BTreeMap::new(),
                graphic: String::new(),
            },
        }
    }

    pub fn description(mut self, key: &str) -> Self {
        self.species.description = key.to_string();
        self
    }

    pub fn gameplay_description(mut self, key: &str) -> Self {
        self.species.gameplay_description = key.to_string();
        self
    }

    pub fn playable(mut self, playable: bool) -> Self {
        self.species.playable = playable;
        self
    }

    pub fn can_produce_ships(mut self, can: bool) -> Self {
        self.species.can_produce_ships = can;
        self
    }

    pub fn can_colonize(mut self, can: bool) -> Self {
        self.species.can_colonize = can;
        self
    }

    pub fn tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.species
            .tags
            .extend(tags.into_iter().map(str::to_string));
        self
    }

    pub fn focus(mut self, focus: FocusType) -> Self {
        self.species.foci.push(focus);
        self
    }

    pub fn foci(mut self, foci: impl IntoIterator<Item = FocusType>) -> Self {
        self.species.foci.extend(foci);
        self
    }

    pub fn default_focus(mut self, focus: &str) -> Self {
        self.species.default_focus = Some(focus.to_string());
        self
    }

    pub fn likes<'a>(mut self, items: impl IntoIterator<Item = &'a str>) -> Self {
        self.species
            .likes
            .extend(items.into_iter().map(str::to_string));
        self
    }

    pub fn dislikes<'a>(mut self, items: impl IntoIterator<Item = &'a str>) -> Self {
        self.species
            .dislikes
            .extend(items.into_iter().map(str::to_string));
        self
    }

    /// Append a fragment's effects groups
    pub fn effects(mut self, groups: Vec<EffectsGroup>) -> Self {
        self.species.effects_groups.extend(groups);
        self
    }

    /// Append a single effects group
    pub fn effects_group(mut self, group: EffectsGroup) -> Self {
        self.species.effects_groups.push(group);
        self
    }

    pub fn environments(mut self, table: BTreeMap<PlanetType, PlanetEnvironment>) -> Self {
        self.species.environments = table;
        self
    }

    pub fn graphic(mut self, path: &str) -> Self {
        self.species.graphic = path.to_string();
        self
    }

    pub fn build(self) -> Species {
        self.species
    }
}
