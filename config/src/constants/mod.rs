//! Centralized configuration values shared by the mesh editing algorithms.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons in geometric predicates.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!(EPSILON < 1.0e-6);
/// ```
pub const EPSILON: f64 = 1.0e-10;

/// Determinant magnitude below which a quadric's 3x3 system is treated as
/// singular and the edge midpoint is used instead of the optimal point.
///
/// # Examples
/// ```
/// use config::constants::QUADRIC_SINGULAR_EPSILON;
/// assert!(QUADRIC_SINGULAR_EPSILON > 0.0);
/// ```
pub const QUADRIC_SINGULAR_EPSILON: f64 = 1.0e-12;

// =============================================================================
// ISOTROPIC REMESHING
// =============================================================================

/// Number of split/collapse/flip/smooth rounds per remeshing call.
///
/// # Examples
/// ```
/// use config::constants::REMESH_ROUNDS;
/// assert!(REMESH_ROUNDS >= 1);
/// ```
pub const REMESH_ROUNDS: usize = 6;

/// Edges longer than `REMESH_SPLIT_RATIO * mean_length` are split.
///
/// # Examples
/// ```
/// use config::constants::REMESH_SPLIT_RATIO;
/// assert!(REMESH_SPLIT_RATIO > 1.0);
/// ```
pub const REMESH_SPLIT_RATIO: f64 = 4.0 / 3.0;

/// Edges shorter than `REMESH_COLLAPSE_RATIO * mean_length` are collapsed.
///
/// # Examples
/// ```
/// use config::constants::REMESH_COLLAPSE_RATIO;
/// assert!(REMESH_COLLAPSE_RATIO < 1.0);
/// ```
pub const REMESH_COLLAPSE_RATIO: f64 = 4.0 / 5.0;

/// Tangential smoothing passes applied at the end of every remeshing round.
///
/// # Examples
/// ```
/// use config::constants::REMESH_SMOOTHING_PASSES;
/// assert!(REMESH_SMOOTHING_PASSES >= 1);
/// ```
pub const REMESH_SMOOTHING_PASSES: usize = 10;

/// Fraction of the tangential displacement applied per smoothing pass.
///
/// # Examples
/// ```
/// use config::constants::REMESH_SMOOTHING_DAMPING;
/// assert!(REMESH_SMOOTHING_DAMPING > 0.0 && REMESH_SMOOTHING_DAMPING <= 1.0);
/// ```
pub const REMESH_SMOOTHING_DAMPING: f64 = 0.2;

/// Ideal interior vertex valence for triangle meshes.
///
/// # Examples
/// ```
/// use config::constants::TARGET_VALENCE;
/// assert_eq!(TARGET_VALENCE, 6);
/// ```
pub const TARGET_VALENCE: i64 = 6;

// =============================================================================
// LOOP SUBDIVISION STENCILS
// =============================================================================

/// Loop vertex weight `beta` for valence-3 vertices.
///
/// # Examples
/// ```
/// use config::constants::LOOP_BETA_VALENCE_3;
/// assert_eq!(LOOP_BETA_VALENCE_3, 3.0 / 16.0);
/// ```
pub const LOOP_BETA_VALENCE_3: f64 = 3.0 / 16.0;

/// Weight of each edge endpoint in the Loop edge stencil.
///
/// # Examples
/// ```
/// use config::constants::{LOOP_EDGE_ENDPOINT_WEIGHT, LOOP_EDGE_APEX_WEIGHT};
/// assert_eq!(2.0 * LOOP_EDGE_ENDPOINT_WEIGHT + 2.0 * LOOP_EDGE_APEX_WEIGHT, 1.0);
/// ```
pub const LOOP_EDGE_ENDPOINT_WEIGHT: f64 = 3.0 / 8.0;

/// Weight of each opposite triangle apex in the Loop edge stencil.
pub const LOOP_EDGE_APEX_WEIGHT: f64 = 1.0 / 8.0;

/// Weight of the old position for a boundary vertex under Loop subdivision.
/// The two boundary neighbors share the remainder equally.
///
/// # Examples
/// ```
/// use config::constants::LOOP_BOUNDARY_VERTEX_WEIGHT;
/// assert_eq!(LOOP_BOUNDARY_VERTEX_WEIGHT, 0.75);
/// ```
pub const LOOP_BOUNDARY_VERTEX_WEIGHT: f64 = 3.0 / 4.0;

// =============================================================================
// QUADRIC SIMPLIFICATION
// =============================================================================

/// Fraction of the starting edge count that simplification reduces to.
///
/// # Examples
/// ```
/// use config::constants::SIMPLIFY_TARGET_RATIO;
/// assert!(SIMPLIFY_TARGET_RATIO > 0.0 && SIMPLIFY_TARGET_RATIO < 1.0);
/// ```
pub const SIMPLIFY_TARGET_RATIO: f64 = 0.25;

/// Simplification never goes below the edge count of a tetrahedron.
///
/// # Examples
/// ```
/// use config::constants::SIMPLIFY_MIN_EDGES;
/// assert_eq!(SIMPLIFY_MIN_EDGES, 6);
/// ```
pub const SIMPLIFY_MIN_EDGES: usize = 6;

// =============================================================================
// PARAMETER STRUCTS
// =============================================================================

/// Parameters for isotropic remeshing.
///
/// # Examples
/// ```
/// use config::constants::RemeshConfig;
/// let cfg = RemeshConfig::default().with_rounds(2);
/// assert_eq!(cfg.rounds, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemeshConfig {
    /// Number of split/collapse/flip/smooth rounds.
    pub rounds: usize,
    /// Split threshold as a multiple of the mean edge length.
    pub split_ratio: f64,
    /// Collapse threshold as a multiple of the mean edge length.
    pub collapse_ratio: f64,
    /// Tangential smoothing passes per round.
    pub smoothing_passes: usize,
    /// Damping applied to each smoothing displacement.
    pub smoothing_damping: f64,
}

impl RemeshConfig {
    /// Builds a configuration, rejecting thresholds that would make splits
    /// and collapses undo each other.
    ///
    /// # Examples
    /// ```
    /// use config::constants::RemeshConfig;
    /// assert!(RemeshConfig::new(3, 0.9, 0.8, 5, 0.2).is_err());
    /// assert!(RemeshConfig::new(3, 1.5, 0.5, 5, 0.2).is_ok());
    /// ```
    pub fn new(
        rounds: usize,
        split_ratio: f64,
        collapse_ratio: f64,
        smoothing_passes: usize,
        smoothing_damping: f64,
    ) -> Result<Self, ConfigError> {
        if !(collapse_ratio > 0.0 && collapse_ratio < 1.0 && split_ratio > 1.0) {
            return Err(ConfigError::InvalidThresholds {
                split: split_ratio,
                collapse: collapse_ratio,
            });
        }
        if !(smoothing_damping > 0.0 && smoothing_damping <= 1.0) {
            return Err(ConfigError::InvalidDamping(smoothing_damping));
        }
        Ok(Self {
            rounds,
            split_ratio,
            collapse_ratio,
            smoothing_passes,
            smoothing_damping,
        })
    }

    /// Returns a copy with a different round count.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Returns a copy with a different smoothing pass count.
    pub fn with_smoothing_passes(mut self, passes: usize) -> Self {
        self.smoothing_passes = passes;
        self
    }
}

impl Default for RemeshConfig {
    fn default() -> Self {
        Self {
            rounds: REMESH_ROUNDS,
            split_ratio: REMESH_SPLIT_RATIO,
            collapse_ratio: REMESH_COLLAPSE_RATIO,
            smoothing_passes: REMESH_SMOOTHING_PASSES,
            smoothing_damping: REMESH_SMOOTHING_DAMPING,
        }
    }
}

/// Parameters for quadric error simplification.
///
/// # Examples
/// ```
/// use config::constants::SimplifyConfig;
/// let cfg = SimplifyConfig::default();
/// assert_eq!(cfg.target_edges(400), 100);
/// assert_eq!(cfg.target_edges(8), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyConfig {
    /// Fraction of the starting edge count to keep.
    pub target_ratio: f64,
    /// Lower bound on the edge budget.
    pub min_edges: usize,
}

impl SimplifyConfig {
    /// Builds a configuration with a validated ratio.
    ///
    /// # Examples
    /// ```
    /// use config::constants::SimplifyConfig;
    /// assert!(SimplifyConfig::new(1.5, 6).is_err());
    /// ```
    pub fn new(target_ratio: f64, min_edges: usize) -> Result<Self, ConfigError> {
        if !(target_ratio > 0.0 && target_ratio < 1.0) {
            return Err(ConfigError::InvalidRatio(target_ratio));
        }
        Ok(Self {
            target_ratio,
            min_edges,
        })
    }

    /// Edge budget for a mesh that currently has `edge_count` edges.
    pub fn target_edges(&self, edge_count: usize) -> usize {
        let scaled = (edge_count as f64 * self.target_ratio).floor() as usize;
        scaled.max(self.min_edges)
    }
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            target_ratio: SIMPLIFY_TARGET_RATIO,
            min_edges: SIMPLIFY_MIN_EDGES,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Split ratio must exceed one and collapse ratio must lie in (0, 1).
    InvalidThresholds {
        /// Requested split ratio.
        split: f64,
        /// Requested collapse ratio.
        collapse: f64,
    },
    /// Smoothing damping must lie in (0, 1].
    InvalidDamping(f64),
    /// Simplification ratio must lie in (0, 1).
    InvalidRatio(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThresholds { split, collapse } => {
                write!(
                    f,
                    "split ratio must be > 1 and collapse ratio in (0, 1): split={split}, collapse={collapse}"
                )
            }
            ConfigError::InvalidDamping(value) => {
                write!(f, "smoothing damping must be in (0, 1]: {value}")
            }
            ConfigError::InvalidRatio(value) => {
                write!(f, "target ratio must be in (0, 1): {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
