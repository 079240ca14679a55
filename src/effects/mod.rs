//! Conditions, effects and effects groups, the universe model they run
//! against, and the engine that applies them

pub mod condition;
pub mod effect;
pub mod engine;
pub mod group;
pub mod parse;
pub mod universe;

pub use condition::{Condition, ScriptingContext};
pub use effect::{Effect, MeterOp, MeterType, Scaling};
pub use engine::{AccountingEntry, EffectsEngine, EffectsReport, RefusedGrant};
pub use group::EffectsGroup;
pub use universe::{Empire, ObjectKind, Universe, UniverseObject};
