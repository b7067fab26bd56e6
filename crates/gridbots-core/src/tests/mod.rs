//! Cross-module test suites.
//!
//! - `determinism.rs`: same seed and roster give the same battle
//! - `integration.rs`: whole battles through the public API
//! - `invariants.rs`: property tests over random seeds
//! - `helpers.rs`: scene and battle fixtures shared with the unit tests

mod helpers;
mod invariants;

pub use helpers::*;
