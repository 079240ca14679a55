//! Empire policies: definitions, the policy catalog, and adoption
//!
//! Species content refers to policies by name (`PLC_*`) in likes, dislikes
//! and `GiveEmpirePolicy` effects. The catalog here is what those names
//! resolve against. Adopted policies contribute their own effects groups,
//! evaluated with the adopting empire's capital as the source.

pub mod adoption;
pub mod catalog;

pub use adoption::{AdoptionError, AdoptionOutcome};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::checksum::{combine, CheckSum};
use crate::core::error::{CodexError, Result};
use crate::core::types::Turn;
use crate::effects::group::EffectsGroup;
use crate::effects::universe::Empire;

/// Cost returned when the cheap-policies rule is on
pub const CHEAP_POLICY_COST: f64 = 1.0;

/// An adoptable empire-wide rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub category: String,
    pub adoption_cost: f64,
    #[serde(default)]
    pub prerequisites: BTreeSet<String>,
    #[serde(default)]
    pub exclusions: BTreeSet<String>,
    #[serde(default)]
    pub graphic: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects_groups: Vec<EffectsGroup>,
}

impl Policy {
    pub fn new(name: &str, category: &str, adoption_cost: f64) -> Self {
        Self {
            name: name.to_string(),
            description: format!("{}_DESC", name),
            short_description: format!("{}_SHORT_DESC", name),
            category: category.to_string(),
            adoption_cost,
            prerequisites: BTreeSet::new(),
            exclusions: BTreeSet::new(),
            graphic: String::new(),
            effects_groups: Vec::new(),
        }
    }

    pub fn with_prerequisite(mut self, policy: &str) -> Self {
        self.prerequisites.insert(policy.to_string());
        self
    }

    pub fn with_exclusion(mut self, policy: &str) -> Self {
        self.exclusions.insert(policy.to_string());
        self
    }

    pub fn with_graphic(mut self, graphic: &str) -> Self {
        self.graphic = graphic.to_string();
        self
    }

    pub fn with_effects_group(mut self, group: EffectsGroup) -> Self {
        self.effects_groups.push(group);
        self
    }

    /// Multi-line summary for terminal output
    pub fn dump(&self) -> String {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        let mut out = String::new();
        out.push_str(&format!("Policy {}\n", self.name));
        out.push_str(&format!("  description = {}\n", self.description));
        out.push_str(&format!("  short_description = {}\n", self.short_description));
        out.push_str(&format!("  category = {}\n", self.category));
        out.push_str(&format!("  adoption_cost = {}\n", self.adoption_cost));
        out.push_str(&format!("  prerequisites = [{}]\n", join(&self.prerequisites)));
        out.push_str(&format!("  exclusions = [{}]\n", join(&self.exclusions)));
        out.push_str(&format!("  effects_groups = {}\n", self.effects_groups.len()));
        for group in &self.effects_groups {
            let label = group.accounting_label.as_deref().unwrap_or("-");
            out.push_str(&format!("    [{}] {} ({})\n", group.priority, label, group.scope));
        }
        out.push_str(&format!("  graphic = {}\n", self.graphic));
        out
    }

    /// Influence needed to adopt, honouring the cheap-policies rule
    pub fn adoption_cost(&self, cheap_policies: bool) -> f64 {
        if cheap_policies {
            CHEAP_POLICY_COST
        } else {
            self.adoption_cost
        }
    }
}

impl CheckSum for Policy {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        combine(&mut sum, &self.name);
        combine(&mut sum, &self.description);
        combine(&mut sum, &self.short_description);
        combine(&mut sum, &self.category);
        combine(&mut sum, &self.adoption_cost);
        combine(&mut sum, &self.prerequisites);
        combine(&mut sum, &self.exclusions);
        combine(&mut sum, &self.graphic);
        combine(&mut sum, &self.effects_groups);
        sum
    }
}

#[derive(Debug, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    policies: Vec<Policy>,
}

/// All known policies, keyed by name
#[derive(Debug, Clone, Default)]
pub struct PolicyManager {
    policies: BTreeMap<String, Policy>,
}

impl PolicyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager preloaded with the built-in catalog
    pub fn builtin() -> Self {
        let mut manager = Self::new();
        for policy in catalog::builtin_policies() {
            manager.policies.insert(policy.name.clone(), policy);
        }
        manager
    }

    /// Add a policy; names must be unique
    pub fn insert(&mut self, policy: Policy) -> Result<()> {
        if self.policies.contains_key(&policy.name) {
            return Err(CodexError::DuplicatePolicy(policy.name));
        }
        tracing::debug!("Registered policy {}", policy.name);
        self.policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    /// Add every `[[policies]]` entry from TOML text, returning how many
    pub fn load_toml(&mut self, content: &str) -> Result<usize> {
        let file: PolicyFile = toml::from_str(content)?;
        let count = file.policies.len();
        for policy in file.policies {
            self.insert(policy)?;
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values()
    }

    /// All policy names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.policies.keys().map(String::as_str).collect()
    }

    /// Names of policies in one category, sorted
    pub fn names_in_category(&self, category: &str) -> Vec<&str> {
        self.policies
            .values()
            .filter(|p| p.category == category)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn categories(&self) -> BTreeSet<&str> {
        self.policies.values().map(|p| p.category.as_str()).collect()
    }

    /// Have `empire` adopt a catalog policy.
    ///
    /// Chosen adoptions pay [`Policy::adoption_cost`]; forced ones are free.
    /// Exclusions are checked against both the new policy and every policy
    /// the empire already holds.
    pub fn adopt(
        &self,
        empire: &mut Empire,
        name: &str,
        turn: Turn,
        cheap_policies: bool,
        force: bool,
    ) -> std::result::Result<AdoptionOutcome, AdoptionError> {
        let policy = self
            .get(name)
            .ok_or_else(|| AdoptionError::UnknownPolicy(name.to_string()))?;
        let cost = if force {
            0.0
        } else {
            policy.adoption_cost(cheap_policies)
        };
        empire.adopt_policy(policy, turn, cost, force, |adopted| {
            self.get(adopted)
                .map_or(false, |p| p.exclusions.contains(name))
        })
    }
}

impl CheckSum for PolicyManager {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        for policy in self.policies.values() {
            combine(&mut sum, policy);
        }
        combine(&mut sum, &self.policies.len());
        tracing::debug!("PolicyManager checksum: {}", sum);
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EmpireId;
    use crate::effects::condition::Condition;
    use crate::effects::effect::{Effect, MeterType};

    #[test]
    fn test_builtin_has_confederation() {
        let manager = PolicyManager::builtin();
        let policy = manager.get("PLC_CONFEDERATION").unwrap();
        assert_eq!(policy.category, catalog::SOCIAL_CATEGORY);
        assert!(policy.exclusions.contains("PLC_CENTRALIZATION"));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut manager = PolicyManager::builtin();
        let result = manager.insert(Policy::new("PLC_LIBERTY", catalog::SOCIAL_CATEGORY, 5.0));
        assert!(matches!(result, Err(CodexError::DuplicatePolicy(name)) if name == "PLC_LIBERTY"));
    }

    #[test]
    fn test_names_in_category_sorted() {
        let manager = PolicyManager::builtin();
        let economic = manager.names_in_category(catalog::ECONOMIC_CATEGORY);
        assert!(!economic.is_empty());
        let mut sorted = economic.clone();
        sorted.sort_unstable();
        assert_eq!(economic, sorted);
        assert!(manager.categories().contains(catalog::MILITARY_CATEGORY));
    }

    #[test]
    fn test_cheap_policies_rule() {
        let policy = Policy::new("PLC_TEST", catalog::ECONOMIC_CATEGORY, 12.0);
        assert_eq!(policy.adoption_cost(false), 12.0);
        assert_eq!(policy.adoption_cost(true), CHEAP_POLICY_COST);
    }

    #[test]
    fn test_adopt_pays_cheap_cost() {
        let manager = PolicyManager::builtin();
        let mut empire = Empire::new(EmpireId(1), "Concord");
        empire.influence = 4.0;
        let outcome = manager
            .adopt(&mut empire, "PLC_CONFEDERATION", 3, true, false)
            .unwrap();
        assert_eq!(outcome, AdoptionOutcome::Adopted);
        assert_eq!(empire.influence, 4.0 - CHEAP_POLICY_COST);
        assert!(!empire.adopted_policies["PLC_CONFEDERATION"].granted);
    }

    #[test]
    fn test_dump_lists_effects() {
        let manager = PolicyManager::builtin();
        let text = manager.get("PLC_CONFEDERATION").unwrap().dump();
        assert!(text.starts_with("Policy PLC_CONFEDERATION\n"));
        assert!(text.contains("exclusions = [PLC_CENTRALIZATION]"));
        assert!(text.contains("effects_groups = 2"));
        assert!(text.contains("Planet & OwnedBySourceOwner"));
    }

    #[test]
    fn test_checksum_covers_effects() {
        let plain = Policy::new("PLC_TEST", catalog::SOCIAL_CATEGORY, 5.0);
        let with_effects = plain.clone().with_effects_group(
            EffectsGroup::new(Condition::Source)
                .effect(Effect::add(MeterType::TargetInfluence, 1.0)),
        );
        assert_ne!(plain.checksum(), with_effects.checksum());
    }

    #[test]
    fn test_adopt_unknown_policy() {
        let manager = PolicyManager::builtin();
        let mut empire = Empire::new(EmpireId(1), "Concord");
        let err = manager
            .adopt(&mut empire, "PLC_NOWHERE", 1, false, true)
            .unwrap_err();
        assert_eq!(err, AdoptionError::UnknownPolicy("PLC_NOWHERE".to_string()));
    }

    #[test]
    fn test_load_toml() {
        let mut manager = PolicyManager::new();
        let count = manager
            .load_toml(
                r#"
[[policies]]
name = "PLC_CUSTOM"
description = "PLC_CUSTOM_DESC"
short_description = "PLC_CUSTOM_SHORT_DESC"
category = "ECONOMIC_CATEGORY"
adoption_cost = 7.5
exclusions = ["PLC_OTHER"]

[[policies.effects_groups]]
scope = "IsSource"
accounting_label = "PLC_CUSTOM"
effects = [{ type = "SetMeter", meter = "TARGET_INFLUENCE", op = "add", value = 0.5 }]
"#,
            )
            .unwrap();
        assert_eq!(count, 1);
        let policy = manager.get("PLC_CUSTOM").unwrap();
        assert!(policy.prerequisites.is_empty());
        assert!(policy.exclusions.contains("PLC_OTHER"));
        assert_eq!(policy.effects_groups.len(), 1);
        assert_eq!(policy.effects_groups[0].scope, Condition::Source);
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let a = PolicyManager::builtin();
        let mut b = PolicyManager::builtin();
        b.insert(Policy::new("PLC_EXTRA", catalog::ECONOMIC_CATEGORY, 3.0))
            .unwrap();
        assert_eq!(a.checksum(), PolicyManager::builtin().checksum());
        assert_ne!(a.checksum(), b.checksum());
    }
}
