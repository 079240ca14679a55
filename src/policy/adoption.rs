//! Policy adoption by empires

use thiserror::Error;

use super::Policy;
use crate::core::types::{EmpireId, Turn};
use crate::effects::universe::{AdoptionInfo, Empire};

/// Why an adoption was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdoptionError {
    #[error("{policy} is excluded by adopted policy {by}")]
    Excluded { policy: String, by: String },

    #[error("{policy} requires {prerequisite}")]
    MissingPrerequisite { policy: String, prerequisite: String },

    #[error("{policy} costs {cost} influence, empire has {available}")]
    InsufficientInfluence {
        policy: String,
        cost: f64,
        available: f64,
    },

    #[error("unknown policy {0}")]
    UnknownPolicy(String),

    #[error("empire {0:?} is not in the universe")]
    UnknownEmpire(EmpireId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionOutcome {
    Adopted,
    AlreadyAdopted,
}

impl Empire {
    /// Adopt `policy` this turn.
    ///
    /// A forced adoption (a grant from content) skips cost and
    /// prerequisites. Exclusions always apply, in both directions when the
    /// adopted policy's definition is supplied through `adopted_exclusions`.
    /// Re-adopting keeps the first adoption turn.
    pub fn adopt_policy(
        &mut self,
        policy: &Policy,
        turn: Turn,
        cost: f64,
        force: bool,
        adopted_exclusions: impl Fn(&str) -> bool,
    ) -> Result<AdoptionOutcome, AdoptionError> {
        if self.policy_adopted(&policy.name) {
            return Ok(AdoptionOutcome::AlreadyAdopted);
        }

        if let Some(by) = self.adopted_policies.keys().find(|adopted| {
            policy.exclusions.contains(adopted.as_str()) || adopted_exclusions(adopted.as_str())
        }) {
            return Err(AdoptionError::Excluded {
                policy: policy.name.clone(),
                by: by.clone(),
            });
        }

        if !force {
            if let Some(missing) = policy
                .prerequisites
                .iter()
                .find(|p| !self.policy_adopted(p))
            {
                return Err(AdoptionError::MissingPrerequisite {
                    policy: policy.name.clone(),
                    prerequisite: missing.clone(),
                });
            }

            if cost > self.influence {
                return Err(AdoptionError::InsufficientInfluence {
                    policy: policy.name.clone(),
                    cost,
                    available: self.influence,
                });
            }
            self.influence -= cost;
        }

        self.adopted_policies.insert(
            policy.name.clone(),
            AdoptionInfo {
                adopted_turn: turn,
                granted: force,
            },
        );
        Ok(AdoptionOutcome::Adopted)
    }

    /// Record a granted policy with no definition to check against
    pub fn grant_policy_unchecked(&mut self, name: &str, turn: Turn) -> AdoptionOutcome {
        if self.policy_adopted(name) {
            return AdoptionOutcome::AlreadyAdopted;
        }
        self.adopted_policies.insert(
            name.to_string(),
            AdoptionInfo {
                adopted_turn: turn,
                granted: true,
            },
        );
        AdoptionOutcome::Adopted
    }

    pub fn deadopt_policy(&mut self, name: &str) -> bool {
        self.adopted_policies.remove(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::catalog::SOCIAL_CATEGORY;

    fn no_reverse(_: &str) -> bool {
        false
    }

    #[test]
    fn test_paid_adoption_deducts_influence() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        empire.influence = 10.0;
        let policy = Policy::new("PLC_LIBERTY", SOCIAL_CATEGORY, 8.0);

        let outcome = empire.adopt_policy(&policy, 3, 8.0, false, no_reverse).unwrap();
        assert_eq!(outcome, AdoptionOutcome::Adopted);
        assert!((empire.influence - 2.0).abs() < 1e-9);
        assert_eq!(empire.policy_adopted_turn("PLC_LIBERTY"), Some(3));
        assert!(!empire.adopted_policies["PLC_LIBERTY"].granted);
    }

    #[test]
    fn test_insufficient_influence() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        let policy = Policy::new("PLC_LIBERTY", SOCIAL_CATEGORY, 8.0);
        let err = empire.adopt_policy(&policy, 1, 8.0, false, no_reverse).unwrap_err();
        assert!(matches!(err, AdoptionError::InsufficientInfluence { .. }));
        assert!(!empire.policy_adopted("PLC_LIBERTY"));
    }

    #[test]
    fn test_forced_adoption_skips_cost_and_prerequisites() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        let policy = Policy::new("PLC_CONFEDERATION", SOCIAL_CATEGORY, 11.0)
            .with_prerequisite("PLC_PROPAGANDA");
        let outcome = empire.adopt_policy(&policy, 5, 11.0, true, no_reverse).unwrap();
        assert_eq!(outcome, AdoptionOutcome::Adopted);
        assert_eq!(empire.influence, 0.0);
        assert!(empire.adopted_policies["PLC_CONFEDERATION"].granted);
    }

    #[test]
    fn test_missing_prerequisite() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        empire.influence = 50.0;
        let policy = Policy::new("PLC_SYSTEM_INFRA", SOCIAL_CATEGORY, 6.0)
            .with_prerequisite("PLC_PLANETARY_INFRA");
        let err = empire.adopt_policy(&policy, 1, 6.0, false, no_reverse).unwrap_err();
        assert_eq!(
            err,
            AdoptionError::MissingPrerequisite {
                policy: "PLC_SYSTEM_INFRA".into(),
                prerequisite: "PLC_PLANETARY_INFRA".into(),
            }
        );
    }

    #[test]
    fn test_exclusion_blocks_even_forced() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        empire.grant_policy_unchecked("PLC_CENTRALIZATION", 1);
        let policy = Policy::new("PLC_CONFEDERATION", SOCIAL_CATEGORY, 11.0)
            .with_exclusion("PLC_CENTRALIZATION");
        let err = empire.adopt_policy(&policy, 2, 0.0, true, no_reverse).unwrap_err();
        assert!(matches!(err, AdoptionError::Excluded { by, .. } if by == "PLC_CENTRALIZATION"));
    }

    #[test]
    fn test_reverse_exclusion() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        empire.grant_policy_unchecked("PLC_CENTRALIZATION", 1);
        let policy = Policy::new("PLC_CONFEDERATION", SOCIAL_CATEGORY, 11.0);
        let err = empire
            .adopt_policy(&policy, 2, 0.0, true, |adopted| adopted == "PLC_CENTRALIZATION")
            .unwrap_err();
        assert!(matches!(err, AdoptionError::Excluded { .. }));
    }

    #[test]
    fn test_readoption_keeps_first_turn() {
        let mut empire = Empire::new(EmpireId(1), "Concord");
        assert_eq!(empire.grant_policy_unchecked("PLC_LIBERTY", 2), AdoptionOutcome::Adopted);
        assert_eq!(
            empire.grant_policy_unchecked("PLC_LIBERTY", 9),
            AdoptionOutcome::AlreadyAdopted
        );
        assert_eq!(empire.policy_adopted_turn("PLC_LIBERTY"), Some(2));
        assert!(empire.deadopt_policy("PLC_LIBERTY"));
        assert!(!empire.policy_adopted("PLC_LIBERTY"));
    }
}
