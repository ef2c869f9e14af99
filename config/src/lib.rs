//! # Config Crate
//!
//! Centralized configuration constants for the mesh editing toolkit.
//! Every tolerance, ratio and iteration count used by the global mesh
//! algorithms is defined here so the algorithms stay free of literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, REMESH_ROUNDS, RemeshConfig};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-13;
//! assert!(value.abs() < EPSILON);
//!
//! // Remeshing parameters default to the shared constants
//! let remesh = RemeshConfig::default();
//! assert_eq!(remesh.rounds, REMESH_ROUNDS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Overrides**: Parameter structs reject nonsensical values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
