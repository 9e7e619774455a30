//! Crate-level tests for the battle engine.
//!
//! - `determinism.rs`: same seed and inputs produce the same battle
//! - `integration.rs`: full battles through the arena and session
//! - `helpers.rs`: test classes and unit factories

pub mod helpers;
mod integration;
