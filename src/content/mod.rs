//! Index of the identifiers species content may refer to
//!
//! Likes and dislikes name buildings, policies, specials and foci; tags
//! name species classes, pedia entries or skill fragments. The index is
//! seeded from the built-in tables and can be extended with a TOML file
//! listing additional identifiers per namespace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::core::error::Result;
use crate::library::{self, focus::ALL_FOCI};
use crate::policy::PolicyManager;

/// File name inside a content directory that extends the index
pub const CONTENT_INDEX_FILE: &str = "content_index.toml";

/// Buildings the base content ships with
pub const BUILTIN_BUILDINGS: [&str; 12] = [
    "BLD_CULTURE_ARCHIVES",
    "BLD_GAS_GIANT_GEN",
    "BLD_HYPER_DAM",
    "BLD_IMPERIAL_PALACE",
    "BLD_INDUSTRY_CENTER",
    "BLD_MILITARY_COMMAND",
    "BLD_REGIONAL_ADMIN",
    "BLD_SHIPYARD_BASE",
    "BLD_SHIPYARD_ENRG_COMP",
    "BLD_SHIPYARD_ENRG_SOLAR",
    "BLD_SOL_ORB_GEN",
    "BLD_STARGATE",
];

/// Planet specials the base content ships with
pub const BUILTIN_SPECIALS: [&str; 14] = [
    "ANCIENT_RUINS_DEPLETED_SPECIAL",
    "ANCIENT_RUINS_SPECIAL",
    "CRYSTALS_SPECIAL",
    "ECCENTRIC_ORBIT_SPECIAL",
    "FORTRESS_SPECIAL",
    "GAIA_SPECIAL",
    "KRAKEN_NEST_SPECIAL",
    "MIMETIC_ALLOY_SPECIAL",
    "MONOPOLE_SPECIAL",
    "POSITRONIUM_SPECIAL",
    "RESONANT_MOON_SPECIAL",
    "SUCCULENT_BARNACLES_SPECIAL",
    "SUPERCONDUCTOR_SPECIAL",
    "TIDAL_LOCK_SPECIAL",
];

/// Species class tags; each also has a `PEDIA_<CLASS>_SPECIES_CLASS` tag
pub const SPECIES_CLASSES: [&str; 6] = [
    "GASEOUS",
    "LITHIC",
    "ORGANIC",
    "PHOTOTROPHIC",
    "ROBOTIC",
    "SELF_SUSTAINING",
];

/// Trait tags with a pedia title entry
pub const TRAIT_TAGS: [&str; 3] = ["TELEPATHIC", "GREAT_DETECTION", "NO_ATTACKTROOPS"];

/// Namespace an identifier resolved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Building,
    Policy,
    Special,
    Focus,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierKind::Building => "building",
            IdentifierKind::Policy => "policy",
            IdentifierKind::Special => "special",
            IdentifierKind::Focus => "focus",
        };
        f.write_str(name)
    }
}

/// Extra identifiers read from a content index file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentExtension {
    pub buildings: Vec<String>,
    pub policies: Vec<String>,
    pub specials: Vec<String>,
    pub foci: Vec<String>,
    pub tags: Vec<String>,
}

impl ContentExtension {
    fn len(&self) -> usize {
        self.buildings.len()
            + self.policies.len()
            + self.specials.len()
            + self.foci.len()
            + self.tags.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentIndex {
    buildings: BTreeSet<String>,
    policies: BTreeSet<String>,
    specials: BTreeSet<String>,
    foci: BTreeSet<String>,
    tags: BTreeSet<String>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables, with policy names taken from `policies`
    pub fn with_policies(policies: &PolicyManager) -> Self {
        let mut index = Self::new();
        index
            .buildings
            .extend(BUILTIN_BUILDINGS.iter().map(|s| s.to_string()));
        index
            .specials
            .extend(BUILTIN_SPECIALS.iter().map(|s| s.to_string()));
        index.foci.extend(ALL_FOCI.iter().map(|s| s.to_string()));
        index
            .policies
            .extend(policies.names().into_iter().map(str::to_string));

        for class in SPECIES_CLASSES {
            index.tags.insert(class.to_string());
            index.tags.insert(format!("PEDIA_{}_SPECIES_CLASS", class));
        }
        for tag in TRAIT_TAGS {
            index.tags.insert(tag.to_string());
            index.tags.insert(format!("PEDIA_{}_TITLE", tag));
        }
        // Skill tags share their names with library fragments
        index
            .tags
            .extend(library::fragment_names().into_iter().map(str::to_string));
        index
    }

    /// Built-in tables with the built-in policy catalog
    pub fn builtin() -> Self {
        Self::with_policies(&PolicyManager::builtin())
    }

    /// Add identifiers from TOML text; returns how many were listed
    pub fn extend_from_toml(&mut self, content: &str) -> Result<usize> {
        let extension: ContentExtension = toml::from_str(content)?;
        let count = extension.len();
        self.buildings.extend(extension.buildings);
        self.policies.extend(extension.policies);
        self.specials.extend(extension.specials);
        self.foci.extend(extension.foci);
        self.tags.extend(extension.tags);
        Ok(count)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let count = self.extend_from_toml(&content)?;
        debug!("Extended content index with {} identifiers from {}", count, path.display());
        Ok(count)
    }

    /// Namespace a like/dislike identifier belongs to
    pub fn classify(&self, identifier: &str) -> Option<IdentifierKind> {
        if self.buildings.contains(identifier) {
            Some(IdentifierKind::Building)
        } else if self.policies.contains(identifier) {
            Some(IdentifierKind::Policy)
        } else if self.specials.contains(identifier) {
            Some(IdentifierKind::Special)
        } else if self.foci.contains(identifier) {
            Some(IdentifierKind::Focus)
        } else {
            None
        }
    }

    pub fn resolves(&self, identifier: &str) -> bool {
        self.classify(identifier).is_some()
    }

    pub fn is_known_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn identifier_count(&self) -> usize {
        self.buildings.len() + self.policies.len() + self.specials.len() + self.foci.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_classifies_namespaces() {
        let index = ContentIndex::builtin();
        assert_eq!(index.classify("BLD_STARGATE"), Some(IdentifierKind::Building));
        assert_eq!(index.classify("PLC_LIBERTY"), Some(IdentifierKind::Policy));
        assert_eq!(index.classify("GAIA_SPECIAL"), Some(IdentifierKind::Special));
        assert_eq!(index.classify("FOCUS_STOCKPILE"), Some(IdentifierKind::Focus));
        assert_eq!(index.classify("BLD_UNKNOWN"), None);
    }

    #[test]
    fn test_builtin_tags() {
        let index = ContentIndex::builtin();
        assert!(index.is_known_tag("LITHIC"));
        assert!(index.is_known_tag("PEDIA_LITHIC_SPECIES_CLASS"));
        assert!(index.is_known_tag("PEDIA_TELEPATHIC_TITLE"));
        assert!(index.is_known_tag("GREAT_FUEL"));
        assert!(!index.is_known_tag("SPARKLY"));
    }

    #[test]
    fn test_extend_from_toml() {
        let mut index = ContentIndex::builtin();
        let toml = r#"
buildings = ["BLD_SPACE_ELEVATOR"]
tags = ["SPARKLY"]
"#;
        assert_eq!(index.extend_from_toml(toml).unwrap(), 2);
        assert!(index.resolves("BLD_SPACE_ELEVATOR"));
        assert!(index.is_known_tag("SPARKLY"));
    }

    #[test]
    fn test_extend_rejects_bad_toml() {
        let mut index = ContentIndex::new();
        assert!(index.extend_from_toml("buildings = 3").is_err());
    }
}
