//! Shared test fixtures for planloom crates.
//!
//! This crate provides data types and pure functions for testing.
//! It only depends on `planloom-core`, so every other crate can use it
//! as a dev-dependency without a cycle.
//!
//! - [`nqueens`] - N-Queens problem data types and conflict calculation
//! - [`scenario`] - small entity/value problems with pinned and
//!   reinitialize-requested entities for construction heuristic tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! planloom-test = { workspace = true }
//! ```

pub mod nqueens;
pub mod scenario;

pub use nqueens::{NQueensSolution, Queen};
pub use scenario::{TestdataEntity, TestdataSolution};
