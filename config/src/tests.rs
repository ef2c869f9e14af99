//! # Tests for Config Constants
//!
//! Sanity checks on the relationships between tuning constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_singular_epsilon_is_small() {
    assert!(QUADRIC_SINGULAR_EPSILON < 1e-6);
}

// =============================================================================
// REMESHING TESTS
// =============================================================================

#[test]
fn test_split_and_collapse_thresholds_do_not_overlap() {
    assert!(
        REMESH_COLLAPSE_RATIO < 1.0 && REMESH_SPLIT_RATIO > 1.0,
        "collapse threshold must stay below split threshold"
    );
    // A freshly split edge must not immediately qualify for collapse.
    assert!(REMESH_SPLIT_RATIO / 2.0 < REMESH_COLLAPSE_RATIO);
}

#[test]
fn test_damping_in_range() {
    assert!(REMESH_SMOOTHING_DAMPING > 0.0 && REMESH_SMOOTHING_DAMPING <= 1.0);
}

// =============================================================================
// STENCIL TESTS
// =============================================================================

#[test]
fn test_loop_edge_stencil_is_affine() {
    let sum = 2.0 * LOOP_EDGE_ENDPOINT_WEIGHT + 2.0 * LOOP_EDGE_APEX_WEIGHT;
    assert!((sum - 1.0).abs() < EPSILON);
}

#[test]
fn test_loop_valence_three_beta() {
    assert!((3.0 * LOOP_BETA_VALENCE_3 - 9.0 / 16.0).abs() < EPSILON);
}

#[test]
fn test_simplify_ratio_in_range() {
    assert!(SIMPLIFY_TARGET_RATIO > 0.0 && SIMPLIFY_TARGET_RATIO < 1.0);
    assert!(SIMPLIFY_MIN_EDGES >= 6);
}
