//! Tests for the parameter structs.

use super::*;

#[test]
fn default_remesh_config_matches_constants() {
    let cfg = RemeshConfig::default();
    assert_eq!(cfg.rounds, REMESH_ROUNDS);
    assert_eq!(cfg.split_ratio, REMESH_SPLIT_RATIO);
    assert_eq!(cfg.collapse_ratio, REMESH_COLLAPSE_RATIO);
}

#[test]
fn remesh_config_rejects_overlapping_thresholds() {
    assert_eq!(
        RemeshConfig::new(1, 0.9, 0.8, 1, 0.5).unwrap_err(),
        ConfigError::InvalidThresholds {
            split: 0.9,
            collapse: 0.8
        }
    );
    assert_eq!(
        RemeshConfig::new(1, 1.5, 0.5, 1, 0.0).unwrap_err(),
        ConfigError::InvalidDamping(0.0)
    );
}

#[test]
fn simplify_target_respects_floor() {
    let cfg = SimplifyConfig::new(0.5, 10).unwrap();
    assert_eq!(cfg.target_edges(100), 50);
    assert_eq!(cfg.target_edges(12), 10);
}

#[test]
fn config_error_display() {
    let err = ConfigError::InvalidRatio(2.0);
    assert!(err.to_string().contains("target ratio"));
}
