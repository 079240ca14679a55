//! The species record and the focus types it offers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::checksum::{combine, CheckSum};
use crate::core::types::{PlanetEnvironment, PlanetType};
use crate::effects::condition::Condition;
use crate::effects::group::EffectsGroup;

/// A selectable planet focus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusType {
    pub name: String,
    pub description: String,
    /// Where the focus may be selected
    pub location: Condition,
    pub graphic: String,
}

impl FocusType {
    pub fn new(name: &str, location: Condition, graphic: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{}_DESC", name),
            location,
            graphic: graphic.to_string(),
        }
    }
}

impl CheckSum for FocusType {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        combine(&mut sum, &self.name);
        combine(&mut sum, &self.description);
        combine(&mut sum, &self.location);
        combine(&mut sum, &self.graphic);
        sum
    }
}

/// A playable or native species template.
///
/// Immutable once loaded. Likes, dislikes and tags are sets; foci and
/// effects groups keep their declared order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub description: String,
    pub gameplay_description: String,
    pub playable: bool,
    pub can_produce_ships: bool,
    pub can_colonize: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub foci: Vec<FocusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_focus: Option<String>,
    #[serde(default)]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub dislikes: BTreeSet<String>,
    #[serde(default)]
    pub effects_groups: Vec<EffectsGroup>,
    #[serde(default)]
    pub environments: BTreeMap<PlanetType, PlanetEnvironment>,
    #[serde(default)]
    pub graphic: String,
}

impl Species {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn focus(&self, name: &str) -> Option<&FocusType> {
        self.foci.iter().find(|f| f.name == name)
    }

    pub fn focus_names(&self) -> impl Iterator<Item = &str> {
        self.foci.iter().map(|f| f.name.as_str())
    }

    pub fn likes(&self, item: &str) -> bool {
        self.likes.contains(item)
    }

    pub fn dislikes(&self, item: &str) -> bool {
        self.dislikes.contains(item)
    }

    /// Environment for a planet type; types not listed are uninhabitable
    pub fn environment(&self, planet_type: PlanetType) -> PlanetEnvironment {
        self.environments
            .get(&planet_type)
            .copied()
            .unwrap_or(PlanetEnvironment::Uninhabitable)
    }

    /// Planet types at the best environment this species has
    pub fn best_planet_types(&self) -> Vec<PlanetType> {
        let best = match self.environments.values().max() {
            Some(best) => *best,
            None => return Vec::new(),
        };
        self.environments
            .iter()
            .filter(|(_, env)| **env == best)
            .map(|(t, _)| *t)
            .collect()
    }

    /// Policies any of this species' effects groups can grant
    pub fn granted_policies(&self) -> BTreeSet<&str> {
        self.effects_groups
            .iter()
            .flat_map(|group| group.granted_policies())
            .collect()
    }

    /// Multi-line summary for terminal output
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Species {}\n", self.name));
        out.push_str(&format!("  description = {}\n", self.description));
        out.push_str(&format!("  gameplay_description = {}\n", self.gameplay_description));
        out.push_str(&format!(
            "  playable = {}  can_produce_ships = {}  can_colonize = {}\n",
            self.playable, self.can_produce_ships, self.can_colonize
        ));
        out.push_str(&format!(
            "  tags = [{}]\n",
            self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
        out.push_str(&format!(
            "  foci = [{}]\n",
            self.focus_names().collect::<Vec<_>>().join(", ")
        ));
        if let Some(default_focus) = &self.default_focus {
            out.push_str(&format!("  default_focus = {}\n", default_focus));
        }
        out.push_str(&format!("  likes = {} items\n", self.likes.len()));
        out.push_str(&format!("  dislikes = {} items\n", self.dislikes.len()));
        out.push_str(&format!("  effects_groups = {}\n", self.effects_groups.len()));
        for group in &self.effects_groups {
            let label = group
                .accounting_label
                .as_deref()
                .or(group.stacking_group.as_deref())
                .unwrap_or("-");
            out.push_str(&format!("    [{}] {} ({})\n", group.priority, label, group.scope));
        }
        out.push_str("  environments:\n");
        for (planet_type, env) in &self.environments {
            out.push_str(&format!("    {} = {}\n", planet_type, env));
        }
        out.push_str(&format!("  graphic = {}\n", self.graphic));
        out
    }
}

impl CheckSum for Species {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        combine(&mut sum, &self.name);
        combine(&mut sum, &self.description);
        combine(&mut sum, &self.gameplay_description);
        combine(&mut sum, &self.playable);
        combine(&mut sum, &self.can_produce_ships);
        combine(&mut sum, &self.can_colonize);
        combine(&mut sum, &self.tags);
        combine(&mut sum, &self.foci);
        combine(&mut sum, &self.default_focus);
        combine(&mut sum, &self.likes);
        combine(&mut sum, &self.dislikes);
        combine(&mut sum, &self.effects_groups);
        for (planet_type, env) in &self.environments {
            combine(&mut sum, planet_type.as_str());
            combine(&mut sum, env.as_str());
        }
        combine(&mut sum, &self.graphic);
        sum
    }
}
