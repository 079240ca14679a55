//! Stellar Codex - species content for a 4X space strategy game
//!
//! Species records are assembled from a shared fragment library
//! ([`library`]), loaded and checked by a registry ([`species`]), and
//! exercised by a small effects engine ([`effects`]) that evaluates their
//! effects groups over a universe model. Policies granted by content
//! resolve against the policy catalog ([`policy`]).

pub mod content;
pub mod core;
pub mod effects;
pub mod library;
pub mod policy;
pub mod species;
