//! Testing infrastructure for cartpulse tests.
//!
//! This crate provides utilities for writing readable metric tests:
//! - `fixtures`: `InteractionLog`, a fluent builder for interaction frames
//! - `assertions`: Table-level checks for the session metrics output

pub mod assertions;
pub mod fixtures;

pub use fixtures::InteractionLog;
