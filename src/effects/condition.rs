//! Conditions: predicates over universe objects used as effects-group
//! scopes, activations and focus locations.
//!
//! Conditions have a textual form mirroring content scripts,
//! e.g. `Planet & ~Unowned & Capital`. [`Condition`]'s `Display` writes that
//! form and `FromStr` (see `parse.rs`) reads it back; serde uses the same
//! text so content files stay readable. The `&`, `|` and `!` operators
//! build the same trees in code.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::core::checksum::CheckSum;
use crate::core::types::{ObjectId, PlanetEnvironment, PlanetSize};
use crate::effects::universe::{ObjectKind, Universe, UniverseObject};

/// Predicate tree
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches every object
    All,
    /// Matches nothing
    None,
    /// The object the effect originates from
    Source,
    Planet,
    Ship,
    Building,
    /// No owning empire
    Unowned,
    /// The owning empire's capital
    Capital,
    /// Owned by the empire that owns the source
    OwnedBySourceOwner,
    /// Populated or crewed by the named species
    Species(String),
    /// Planet currently set to the named focus
    Focus(String),
    OwnerHasTech(String),
    OwnerHasPolicy(String),
    HasSpecial(String),
    PlanetSize(PlanetSize),
    /// Planet environment for the species living on it
    PlanetEnvironment(PlanetEnvironment),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

/// What a condition is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct ScriptingContext<'a> {
    pub universe: &'a Universe,
    pub source: Option<ObjectId>,
}

impl<'a> ScriptingContext<'a> {
    pub fn new(universe: &'a Universe, source: Option<ObjectId>) -> Self {
        Self { universe, source }
    }
}

impl Condition {
    pub fn species(name: &str) -> Self {
        Condition::Species(name.to_string())
    }

    pub fn focus(name: &str) -> Self {
        Condition::Focus(name.to_string())
    }

    pub fn owner_has_tech(name: &str) -> Self {
        Condition::OwnerHasTech(name.to_string())
    }

    pub fn owner_has_policy(name: &str) -> Self {
        Condition::OwnerHasPolicy(name.to_string())
    }

    pub fn has_special(name: &str) -> Self {
        Condition::HasSpecial(name.to_string())
    }

    /// Does `candidate` satisfy this condition?
    pub fn matches(&self, ctx: &ScriptingContext<'_>, candidate: &UniverseObject) -> bool {
        let universe = ctx.universe;
        match self {
            Condition::All => true,
            Condition::None => false,
            Condition::Source => ctx.source == Some(candidate.id),
            Condition::Planet => candidate.kind == ObjectKind::Planet,
            Condition::Ship => candidate.kind == ObjectKind::Ship,
            Condition::Building => candidate.kind == ObjectKind::Building,
            Condition::Unowned => !candidate.is_owned(),
            Condition::Capital => universe.is_capital(candidate),
            Condition::OwnedBySourceOwner => {
                let source_owner = ctx
                    .source
                    .and_then(|id| universe.object(id))
                    .and_then(|source| source.owner);
                source_owner.is_some() && candidate.owner == source_owner
            }
            Condition::Species(name) => candidate.species.as_deref() == Some(name.as_str()),
            Condition::Focus(name) => candidate.focus.as_deref() == Some(name.as_str()),
            Condition::OwnerHasTech(tech) => universe
                .owner_of(candidate)
                .map_or(false, |empire| empire.has_tech(tech)),
            Condition::OwnerHasPolicy(policy) => universe
                .owner_of(candidate)
                .map_or(false, |empire| empire.policy_adopted(policy)),
            Condition::HasSpecial(special) => candidate.specials.contains(special),
            Condition::PlanetSize(size) => candidate.planet_size == Some(*size),
            Condition::PlanetEnvironment(env) => universe.environment_for(candidate) == Some(*env),
            Condition::And(parts) => parts.iter().all(|c| c.matches(ctx, candidate)),
            Condition::Or(parts) => parts.iter().any(|c| c.matches(ctx, candidate)),
            Condition::Not(inner) => !inner.matches(ctx, candidate),
        }
    }

    /// Evaluate against the context's source object; false without a source
    pub fn matches_source(&self, ctx: &ScriptingContext<'_>) -> bool {
        ctx.source
            .and_then(|id| ctx.universe.object(id))
            .map_or(false, |source| self.matches(ctx, source))
    }

    /// Every object in the universe satisfying this condition, in id order
    pub fn select<'u>(&self, ctx: &ScriptingContext<'u>) -> Vec<&'u UniverseObject> {
        // A bare source scope resolves directly
        if *self == Condition::Source {
            return ctx
                .source
                .and_then(|id| ctx.universe.object(id))
                .into_iter()
                .collect();
        }
        ctx.universe
            .objects()
            .filter(|o| self.matches(ctx, o))
            .collect()
    }

    /// Written infix, so it needs parentheses as an operand
    fn is_compound(&self) -> bool {
        matches!(self, Condition::And(parts) | Condition::Or(parts) if parts.len() > 1)
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::All => f.write_str("All"),
            Condition::None => f.write_str("None"),
            Condition::Source => f.write_str("IsSource"),
            Condition::Planet => f.write_str("Planet"),
            Condition::Ship => f.write_str("Ship"),
            Condition::Building => f.write_str("Building"),
            Condition::Unowned => f.write_str("Unowned"),
            Condition::Capital => f.write_str("Capital"),
            Condition::OwnedBySourceOwner => f.write_str("OwnedBySourceOwner"),
            Condition::Species(name) => write_call(f, "Species", name),
            Condition::Focus(name) => write_call(f, "Focus", name),
            Condition::OwnerHasTech(name) => write_call(f, "OwnerHasTech", name),
            Condition::OwnerHasPolicy(name) => write_call(f, "OwnerHasPolicy", name),
            Condition::HasSpecial(name) => write_call(f, "HasSpecial", name),
            Condition::PlanetSize(size) => write!(f, "PlanetSize({})", size),
            Condition::PlanetEnvironment(env) => write!(f, "PlanetEnvironment({})", env),
            Condition::And(parts) | Condition::Or(parts) if parts.len() < 2 => {
                // Infix cannot express these shapes
                let name = if matches!(self, Condition::And(_)) { "And" } else { "Or" };
                write!(f, "{}(", name)?;
                if let Some(part) = parts.first() {
                    write!(f, "{}", part)?;
                }
                f.write_str(")")
            }
            Condition::And(parts) | Condition::Or(parts) => {
                let sep = if matches!(self, Condition::And(_)) { " & " } else { " | " };
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    part.fmt_operand(f)?;
                }
                Ok(())
            }
            Condition::Not(inner) => {
                f.write_str("~")?;
                inner.fmt_operand(f)
            }
        }
    }
}

/// `Name("text")` with `"` and `\` escaped
fn write_call(f: &mut fmt::Formatter<'_>, name: &str, text: &str) -> fmt::Result {
    write!(f, "{}(\"", name)?;
    for c in text.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\")")
}

impl BitAnd for Condition {
    type Output = Condition;

    fn bitand(self, rhs: Condition) -> Condition {
        match self {
            Condition::And(mut parts) => {
                parts.push(rhs);
                Condition::And(parts)
            }
            lhs => Condition::And(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Condition {
    type Output = Condition;

    fn bitor(self, rhs: Condition) -> Condition {
        match self {
            Condition::Or(mut parts) => {
                parts.push(rhs);
                Condition::Or(parts)
            }
            lhs => Condition::Or(vec![lhs, rhs]),
        }
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl CheckSum for Condition {
    fn checksum(&self) -> u32 {
        self.to_string().checksum()
    }
}
