//! Species records, how they are assembled, loaded and checked

pub mod builder;
pub mod catalog;
pub mod record;
pub mod registry;
pub mod validate;

pub use builder::SpeciesBuilder;
pub use record::{FocusType, Species};
pub use registry::SpeciesRegistry;
pub use validate::{validate_species, ValidationIssue};
