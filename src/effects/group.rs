//! Effects groups: (scope, activation, effects) triples plus the
//! bookkeeping the engine uses to order and de-duplicate them

use serde::{Deserialize, Serialize};

use crate::core::checksum::{combine, CheckSum};
use crate::effects::condition::Condition;
use crate::effects::effect::Effect;

/// Priority used when a group does not set one
pub const DEFAULT_PRIORITY: i32 = 100;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsGroup {
    /// Which objects the effects apply to
    pub scope: Condition,
    /// Checked against the source; the group is skipped when false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<Condition>,
    /// Groups sharing a stacking group apply at most once per target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking_group: Option<String>,
    /// Label shown when accounting for meter changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounting_label: Option<String>,
    /// Lower values run first
    #[serde(default = "default_priority")]
    pub priority: i32,
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EffectsGroup {
    pub fn new(scope: Condition) -> Self {
        Self {
            scope,
            activation: None,
            stacking_group: None,
            accounting_label: None,
            priority: DEFAULT_PRIORITY,
            effects: Vec::new(),
            description: None,
        }
    }

    pub fn activation(mut self, activation: Condition) -> Self {
        self.activation = Some(activation);
        self
    }

    pub fn stacking_group(mut self, group: &str) -> Self {
        self.stacking_group = Some(group.to_string());
        self
    }

    pub fn accounting_label(mut self, label: &str) -> Self {
        self.accounting_label = Some(label.to_string());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Policies this group can grant
    pub fn granted_policies(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(Effect::granted_policy)
    }
}

impl CheckSum for EffectsGroup {
    fn checksum(&self) -> u32 {
        let mut sum = 0;
        combine(&mut sum, &self.scope);
        combine(&mut sum, &self.activation);
        combine(&mut sum, &self.stacking_group);
        combine(&mut sum, &self.accounting_label);
        combine(&mut sum, &self.priority);
        combine(&mut sum, &self.effects);
        combine(&mut sum, &self.description);
        sum
    }
}
