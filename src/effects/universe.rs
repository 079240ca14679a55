//! Minimal universe model the effects engine evaluates against
//!
//! Only what species content needs to observe: object kind, ownership,
//! population, focus, planet physicals, specials, buildings and meters on
//! the object side; capital, techs, adopted policies and opinions on the
//! empire side.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{EmpireId, ObjectId, PlanetEnvironment, PlanetSize, PlanetType, Turn};
use crate::effects::effect::MeterType;
use crate::species::Species;

/// What kind of object this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Planet,
    Ship,
    Building,
}

/// A planet, ship or building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub owner: Option<EmpireId>,
    /// Species populating (planet) or crewing (ship) this object
    pub species: Option<String>,
    pub population: f64,
    pub focus: Option<String>,
    pub planet_type: Option<PlanetType>,
    pub planet_size: Option<PlanetSize>,
    pub specials: BTreeSet<String>,
    /// Names of buildings standing on this planet
    pub buildings: BTreeSet<String>,
    pub meters: BTreeMap<MeterType, f64>,
}

impl UniverseObject {
    fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self {
            id,
            kind,
            owner: None,
            species: None,
            population: 0.0,
            focus: None,
            planet_type: None,
            planet_size: None,
            specials: BTreeSet::new(),
            buildings: BTreeSet::new(),
            meters: BTreeMap::new(),
        }
    }

    pub fn planet(id: ObjectId, planet_type: PlanetType, planet_size: PlanetSize) -> Self {
        let mut obj = Self::new(id, ObjectKind::Planet);
        obj.planet_type = Some(planet_type);
        obj.planet_size = Some(planet_size);
        obj
    }

    pub fn ship(id: ObjectId) -> Self {
        Self::new(id, ObjectKind::Ship)
    }

    pub fn building(id: ObjectId) -> Self {
        Self::new(id, ObjectKind::Building)
    }

    pub fn with_owner(mut self, owner: EmpireId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_species(mut self, species: &str, population: f64) -> Self {
        self.species = Some(species.to_string());
        self.population = population;
        self
    }

    pub fn with_focus(mut self, focus: &str) -> Self {
        self.focus = Some(focus.to_string());
        self
    }

    pub fn with_special(mut self, special: &str) -> Self {
        self.specials.insert(special.to_string());
        self
    }

    pub fn with_building(mut self, building: &str) -> Self {
        self.buildings.insert(building.to_string());
        self
    }

    /// Current meter value (0.0 when never set)
    pub fn meter(&self, meter: MeterType) -> f64 {
        self.meters.get(&meter).copied().unwrap_or(0.0)
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }
}

/// When an empire adopted a policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdoptionInfo {
    pub adopted_turn: Turn,
    /// True when granted by an effect rather than chosen
    pub granted: bool,
}

/// An empire as seen by content conditions and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empire {
    pub id: EmpireId,
    pub name: String,
    pub capital: Option<ObjectId>,
    pub techs: BTreeSet<String>,
    pub adopted_policies: BTreeMap<String, AdoptionInfo>,
    pub influence: f64,
    /// Opinion of this empire held by each species
    pub opinions: BTreeMap<String, f64>,
}

impl Empire {
    pub fn new(id: EmpireId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            capital: None,
            techs: BTreeSet::new(),
            adopted_policies: BTreeMap::new(),
            influence: 0.0,
            opinions: BTreeMap::new(),
        }
    }

    pub fn has_tech(&self, tech: &str) -> bool {
        self.techs.contains(tech)
    }

    pub fn policy_adopted(&self, policy: &str) -> bool {
        self.adopted_policies.contains_key(policy)
    }

    pub fn policy_adopted_turn(&self, policy: &str) -> Option<Turn> {
        self.adopted_policies.get(policy).map(|info| info.adopted_turn)
    }

    pub fn opinion_of(&self, species: &str) -> f64 {
        self.opinions.get(species).copied().unwrap_or(0.0)
    }
}

/// Per-species data the engine needs while evaluating conditions and opinions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesTraits {
    pub environments: BTreeMap<PlanetType, PlanetEnvironment>,
    pub likes: BTreeSet<String>,
    pub dislikes: BTreeSet<String>,
}

impl From<&Species> for SpeciesTraits {
    fn from(species: &Species) -> Self {
        Self {
            environments: species.environments.clone(),
            likes: species.likes.clone(),
            dislikes: species.dislikes.clone(),
        }
    }
}

/// Objects, empires and the species traits in play
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub turn: Turn,
    objects: BTreeMap<ObjectId, UniverseObject>,
    empires: BTreeMap<EmpireId, Empire>,
    species: AHashMap<String, SpeciesTraits>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_object(&mut self, object: UniverseObject) {
        self.objects.insert(object.id, object);
    }

    pub fn insert_empire(&mut self, empire: Empire) {
        self.empires.insert(empire.id, empire);
    }

    /// Make a species' environments and opinions visible to the engine
    pub fn register_species(&mut self, species: &Species) {
        self.species.insert(species.name.clone(), SpeciesTraits::from(species));
    }

    pub fn object(&self, id: ObjectId) -> Option<&UniverseObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut UniverseObject> {
        self.objects.get_mut(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &UniverseObject> {
        self.objects.values()
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.get(&id)
    }

    pub fn empire_mut(&mut self, id: EmpireId) -> Option<&mut Empire> {
        self.empires.get_mut(&id)
    }

    pub fn empires(&self) -> impl Iterator<Item = &Empire> {
        self.empires.values()
    }

    pub fn species_traits(&self, name: &str) -> Option<&SpeciesTraits> {
        self.species.get(name)
    }

    /// Owner empire of an object, if owned and known
    pub fn owner_of(&self, object: &UniverseObject) -> Option<&Empire> {
        object.owner.and_then(|id| self.empires.get(&id))
    }

    /// True when the object is its owner's capital
    pub fn is_capital(&self, object: &UniverseObject) -> bool {
        self.owner_of(object)
            .and_then(|empire| empire.capital)
            .map_or(false, |capital| capital == object.id)
    }

    /// Environment of a planet for the species living on it
    pub fn environment_for(&self, object: &UniverseObject) -> Option<PlanetEnvironment> {
        let planet_type = object.planet_type?;
        let species = object.species.as_deref()?;
        let traits = self.species.get(species)?;
        Some(
            traits
                .environments
                .get(&planet_type)
                .copied()
                .unwrap_or(PlanetEnvironment::Uninhabitable),
        )
    }

    /// Clear every meter before a fresh effects pass
    pub fn reset_meters(&mut self) {
        for object in self.objects.values_mut() {
            object.meters.clear();
        }
    }

    /// Objects populated or crewed by the named species, in id order
    pub fn populated_by(&self, species: &str) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| o.species.as_deref() == Some(species))
            .map(|o| o.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital_setup() -> Universe {
        let mut universe = Universe::new();
        let mut empire = Empire::new(EmpireId(1), "Fulver Concord");
        empire.capital = Some(ObjectId(10));
        universe.insert_empire(empire);
        universe.insert_object(
            UniverseObject::planet(ObjectId(10), PlanetType::Tundra, PlanetSize::Large)
                .with_owner(EmpireId(1)),
        );
        universe.insert_object(
            UniverseObject::planet(ObjectId(11), PlanetType::Desert, PlanetSize::Small)
                .with_owner(EmpireId(1)),
        );
        universe
    }

    #[test]
    fn test_capital_lookup() {
        let universe = capital_setup();
        assert!(universe.is_capital(universe.object(ObjectId(10)).unwrap()));
        assert!(!universe.is_capital(universe.object(ObjectId(11)).unwrap()));
    }

    #[test]
    fn test_unowned_object_is_never_capital() {
        let mut universe = capital_setup();
        universe.object_mut(ObjectId(10)).unwrap().owner = None;
        assert!(!universe.is_capital(universe.object(ObjectId(10)).unwrap()));
    }

    #[test]
    fn test_reset_meters() {
        let mut universe = capital_setup();
        universe
            .object_mut(ObjectId(10))
            .unwrap()
            .meters
            .insert(MeterType::TargetIndustry, 4.0);
        universe.reset_meters();
        assert_eq!(universe.object(ObjectId(10)).unwrap().meter(MeterType::TargetIndustry), 0.0);
    }

    #[test]
    fn test_environment_requires_registered_species() {
        let mut universe = capital_setup();
        universe.object_mut(ObjectId(10)).unwrap().species = Some("SP_UNKNOWN".into());
        assert_eq!(universe.environment_for(universe.object(ObjectId(10)).unwrap()), None);
    }
}
