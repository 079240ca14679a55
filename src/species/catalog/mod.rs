//! Species shipped with the base content

pub mod fulver;

use crate::species::record::Species;

pub use fulver::sp_fulver;

/// Every built-in species, in registration order
pub fn builtin_species() -> Vec<Species> {
    vec![sp_fulver()]
}
