//! Effects engine: evaluates a species' effects groups over a universe
//!
//! One pass per species. Every object the species populates or crews is a
//! source. Groups run in priority order (stable, so equal priorities keep
//! their declared order); within a group, sources run in id order. For each
//! source the activation condition is checked against the source, the scope
//! selects targets, and each effect is applied to each target. A stacking
//! group applies at most once per target per pass; [`EffectsEngine::apply_all`]
//! treats the whole turn as one pass.
//!
//! Adopted policies run the same way, with the adopting empire's capital as
//! the only source.

use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::core::config::CodexConfig;
use crate::core::types::{EmpireId, ObjectId};
use crate::effects::condition::ScriptingContext;
use crate::effects::effect::{Effect, MeterType, Scaling};
use crate::effects::group::EffectsGroup;
use crate::effects::universe::{ObjectKind, SpeciesTraits, Universe};
use crate::policy::adoption::{AdoptionError, AdoptionOutcome};
use crate::policy::PolicyManager;
use crate::species::record::{FocusType, Species};
use crate::species::registry::SpeciesRegistry;

/// One meter change, for accounting display
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingEntry {
    pub target: ObjectId,
    pub source: ObjectId,
    pub label: String,
    pub meter: MeterType,
    pub before: f64,
    pub after: f64,
}

impl AccountingEntry {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

/// A policy grant the owner could not take
#[derive(Debug, Clone, PartialEq)]
pub struct RefusedGrant {
    pub empire: EmpireId,
    pub policy: String,
    pub reason: String,
}

/// What a pass changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectsReport {
    pub meter_changes: Vec<AccountingEntry>,
    /// Policies newly adopted through grants, in grant order
    pub granted_policies: Vec<(EmpireId, String)>,
    pub refused_grants: Vec<RefusedGrant>,
    /// (group, source) pairs whose activation held
    pub groups_applied: usize,
    /// (group, source) pairs whose activation failed
    pub groups_skipped: usize,
}

impl EffectsReport {
    pub fn granted(&self, empire: EmpireId, policy: &str) -> bool {
        self.granted_policies
            .iter()
            .any(|(e, p)| *e == empire && p == policy)
    }

    /// Net change to one meter on one target
    pub fn meter_delta(&self, target: ObjectId, meter: MeterType) -> f64 {
        self.meter_changes
            .iter()
            .filter(|entry| entry.target == target && entry.meter == meter)
            .map(AccountingEntry::delta)
            .sum()
    }

    pub fn merge(&mut self, other: EffectsReport) {
        self.meter_changes.extend(other.meter_changes);
        self.granted_policies.extend(other.granted_policies);
        self.refused_grants.extend(other.refused_grants);
        self.groups_applied += other.groups_applied;
        self.groups_skipped += other.groups_skipped;
    }
}

fn opinion_score(traits: &SpeciesTraits, item: &str) -> i32 {
    if traits.likes.contains(item) {
        1
    } else if traits.dislikes.contains(item) {
        -1
    } else {
        0
    }
}

/// Stacking groups already applied, keyed by target
type Stacked = BTreeSet<(ObjectId, String)>;

pub struct EffectsEngine<'p> {
    opinion_scale: f64,
    base_happiness: f64,
    cheap_policies: bool,
    policies: Option<&'p PolicyManager>,
}

impl<'p> EffectsEngine<'p> {
    pub fn new(config: &CodexConfig) -> Self {
        Self {
            opinion_scale: config.opinion_effect_scale,
            base_happiness: config.base_happiness,
            cheap_policies: config.cheap_policies,
            policies: None,
        }
    }

    /// Check grants against policy definitions (exclusions both ways)
    pub fn with_policies(mut self, policies: &'p PolicyManager) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Clear meters and seed baseline happiness on populated planets
    pub fn begin_turn(&self, universe: &mut Universe) {
        universe.reset_meters();
        let populated: Vec<ObjectId> = universe
            .objects()
            .filter(|o| o.kind == ObjectKind::Planet && o.species.is_some())
            .map(|o| o.id)
            .collect();
        for id in populated {
            if let Some(object) = universe.object_mut(id) {
                object
                    .meters
                    .insert(MeterType::TargetHappiness, self.base_happiness);
            }
        }
    }

    /// A fresh turn: reset, then adopted policies (when a catalog is
    /// attached), then every registered species in order. Stacking groups
    /// apply at most once per target across the whole turn.
    pub fn apply_all(&self, universe: &mut Universe, registry: &SpeciesRegistry) -> EffectsReport {
        self.begin_turn(universe);
        let mut stacked = Stacked::new();
        let mut report = EffectsReport::default();
        if let Some(policies) = self.policies {
            report.merge(self.run_policies(universe, policies, &mut stacked));
        }
        for species in registry.iter() {
            report.merge(self.run_species(universe, species, &mut stacked));
        }
        report
    }

    /// Run one species' effects groups with every object it populates as a
    /// source. Stacking groups are tracked for this call only.
    pub fn apply_species(&self, universe: &mut Universe, species: &Species) -> EffectsReport {
        self.run_species(universe, species, &mut Stacked::new())
    }

    /// Run the effects groups of every adopted policy, sourced at the
    /// adopting empire's capital. Empires without a capital get nothing.
    pub fn apply_policies(&self, universe: &mut Universe, policies: &PolicyManager) -> EffectsReport {
        self.run_policies(universe, policies, &mut Stacked::new())
    }

    fn run_species(
        &self,
        universe: &mut Universe,
        species: &Species,
        stacked: &mut Stacked,
    ) -> EffectsReport {
        universe.register_species(species);

        let mut report = EffectsReport::default();
        let sources = universe.populated_by(&species.name);
        if sources.is_empty() {
            debug!("{} populates nothing; no effects to apply", species.name);
            return report;
        }

        self.run_groups(
            universe,
            &species.effects_groups,
            &sources,
            &species.name,
            stacked,
            &mut report,
        );

        info!(
            "{}: {} groups applied, {} skipped, {} meter changes, {} policies granted",
            species.name,
            report.groups_applied,
            report.groups_skipped,
            report.meter_changes.len(),
            report.granted_policies.len()
        );
        report
    }

    fn run_policies(
        &self,
        universe: &mut Universe,
        policies: &PolicyManager,
        stacked: &mut Stacked,
    ) -> EffectsReport {
        let adopters: Vec<(EmpireId, ObjectId, Vec<String>)> = universe
            .empires()
            .filter_map(|empire| {
                let capital = empire.capital?;
                let adopted = empire.adopted_policies.keys().cloned().collect();
                Some((empire.id, capital, adopted))
            })
            .collect();

        let mut report = EffectsReport::default();
        for (empire, capital, adopted) in adopters {
            if universe.object(capital).is_none() {
                debug!("{:?} capital {:?} is not in the universe", empire, capital);
                continue;
            }
            for name in adopted {
                match policies.get(&name) {
                    Some(policy) => self.run_groups(
                        universe,
                        &policy.effects_groups,
                        &[capital],
                        &policy.name,
                        stacked,
                        &mut report,
                    ),
                    None => debug!("{:?} holds {} with no definition", empire, name),
                }
            }
        }
        debug!(
            "Policies: {} groups applied, {} meter changes",
            report.groups_applied,
            report.meter_changes.len()
        );
        report
    }

    /// Groups in priority order (stable), each from every source in turn
    fn run_groups(
        &self,
        universe: &mut Universe,
        groups: &[EffectsGroup],
        sources: &[ObjectId],
        default_label: &str,
        stacked: &mut Stacked,
        report: &mut EffectsReport,
    ) {
        let mut ordered: Vec<&EffectsGroup> = groups.iter().collect();
        ordered.sort_by_key(|group| group.priority);

        for group in ordered {
            let label = group
                .accounting_label
                .as_deref()
                .or(group.stacking_group.as_deref())
                .unwrap_or(default_label);

            for &source in sources {
                let targets: Vec<ObjectId> = {
                    let ctx = ScriptingContext::new(universe, Some(source));
                    if let Some(activation) = &group.activation {
                        if !activation.matches_source(&ctx) {
                            report.groups_skipped += 1;
                            continue;
                        }
                    }
                    group.scope.select(&ctx).into_iter().map(|o| o.id).collect()
                };
                report.groups_applied += 1;
                debug!("{} from {:?}: {} targets", label, source, targets.len());

                for target in targets {
                    if let Some(stack) = &group.stacking_group {
                        if !stacked.insert((target, stack.clone())) {
                            debug!("{} already applied to {:?}", stack, target);
                            continue;
                        }
                    }
                    for effect in &group.effects {
                        self.execute(universe, effect, source, target, label, report);
                    }
                }
            }
        }
    }

    fn execute(
        &self,
        universe: &mut Universe,
        effect: &Effect,
        source: ObjectId,
        target: ObjectId,
        label: &str,
        report: &mut EffectsReport,
    ) {
        match effect {
            Effect::SetMeter {
                meter,
                op,
                value,
                scale,
            } => {
                if let Some(object) = universe.object_mut(target) {
                    let factor = match scale {
                        Scaling::Flat => 1.0,
                        Scaling::Population => object.population,
                        Scaling::HabitableSize => {
                            object.planet_size.map_or(0.0, |size| size.habitable_size())
                        }
                    };
                    let before = object.meter(*meter);
                    let after = op.apply(before, value * factor);
                    object.meters.insert(*meter, after);
                    report.meter_changes.push(AccountingEntry {
                        target,
                        source,
                        label: label.to_string(),
                        meter: *meter,
                        before,
                        after,
                    });
                }
            }
            Effect::GiveEmpirePolicy { name } => self.grant_policy(universe, target, name, report),
            Effect::ApplyOpinions { species } => {
                self.apply_opinions(universe, target, source, species, label, report)
            }
        }
    }

    /// The target's owner adopts `name` for free; exclusions still apply
    fn grant_policy(
        &self,
        universe: &mut Universe,
        target: ObjectId,
        name: &str,
        report: &mut EffectsReport,
    ) {
        let turn = universe.turn;
        let owner = match universe.object(target).and_then(|o| o.owner) {
            Some(owner) => owner,
            None => return,
        };
        let empire = match universe.empire_mut(owner) {
            Some(empire) => empire,
            None => {
                warn!("{:?} owns {:?} but is not in the universe", owner, target);
                return;
            }
        };

        let outcome = match self.policies {
            Some(manager) => manager.adopt(empire, name, turn, self.cheap_policies, true),
            None => Ok(empire.grant_policy_unchecked(name, turn)),
        };

        match outcome {
            Ok(AdoptionOutcome::Adopted) => {
                info!("{:?} granted {} on turn {}", owner, name, turn);
                report.granted_policies.push((owner, name.to_string()));
            }
            Ok(AdoptionOutcome::AlreadyAdopted) => {}
            Err(err) => {
                warn!("Grant of {} to {:?} refused: {}", name, owner, err);
                report.refused_grants.push(RefusedGrant {
                    empire: owner,
                    policy: name.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    /// An empire chooses a catalog policy this turn, paying its cost
    pub fn adopt_policy(
        &self,
        universe: &mut Universe,
        empire: EmpireId,
        name: &str,
    ) -> std::result::Result<AdoptionOutcome, AdoptionError> {
        let turn = universe.turn;
        let manager = self
            .policies
            .ok_or_else(|| AdoptionError::UnknownPolicy(name.to_string()))?;
        let target = universe
            .empire_mut(empire)
            .ok_or(AdoptionError::UnknownEmpire(empire))?;
        let outcome = manager.adopt(target, name, turn, self.cheap_policies, false)?;
        if outcome == AdoptionOutcome::Adopted {
            info!("{:?} adopted {} on turn {}", empire, name, turn);
        }
        Ok(outcome)
    }

    /// Happiness from liked and disliked policies, focus, specials and
    /// buildings; the policy part also becomes the species' opinion of the
    /// owner
    fn apply_opinions(
        &self,
        universe: &mut Universe,
        target: ObjectId,
        source: ObjectId,
        species: &str,
        label: &str,
        report: &mut EffectsReport,
    ) {
        let (owner, policy_score, local_score) = {
            let traits = match universe.species_traits(species) {
                Some(traits) => traits,
                None => return,
            };
            let object = match universe.object(target) {
                Some(object) => object,
                None => return,
            };
            let empire = match universe.owner_of(object) {
                Some(empire) => empire,
                None => return,
            };
            let policy_score: i32 = empire
                .adopted_policies
                .keys()
                .map(|policy| opinion_score(traits, policy))
                .sum();
            let local_score: i32 = object
                .focus
                .iter()
                .chain(object.specials.iter())
                .chain(object.buildings.iter())
                .map(|item| opinion_score(traits, item))
                .sum();
            (empire.id, policy_score, local_score)
        };

        if let Some(empire) = universe.empire_mut(owner) {
            empire
                .opinions
                .insert(species.to_string(), f64::from(policy_score) * self.opinion_scale);
        }

        let delta = f64::from(policy_score + local_score) * self.opinion_scale;
        if let Some(object) = universe.object_mut(target) {
            let before = object.meter(MeterType::TargetHappiness);
            let after = before + delta;
            object.meters.insert(MeterType::TargetHappiness, after);
            report.meter_changes.push(AccountingEntry {
                target,
                source,
                label: label.to_string(),
                meter: MeterType::TargetHappiness,
                before,
                after,
            });
        }
    }

    /// Foci of `species` selectable on `planet`, in declared order
    pub fn available_foci<'s>(
        &self,
        species: &'s Species,
        universe: &Universe,
        planet: ObjectId,
    ) -> Vec<&'s FocusType> {
        let object = match universe.object(planet) {
            Some(object) => object,
            None => return Vec::new(),
        };
        let ctx = ScriptingContext::new(universe, Some(planet));
        species
            .foci
            .iter()
            .filter(|focus| focus.location.matches(&ctx, object))
            .collect()
    }
}
