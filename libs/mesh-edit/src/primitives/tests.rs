//! # Primitive Tests

use super::*;
use crate::error::MeshError;
use approx::assert_relative_eq;

/// Test that every closed solid has Euler characteristic 2.
#[test]
fn test_solids_are_spheres() {
    let solids = [
        (cube(1.0).unwrap(), 8, 12, 6),
        (triangulated_cube(1.0).unwrap(), 8, 18, 12),
        (tetrahedron(1.0).unwrap(), 4, 6, 4),
        (octahedron(1.0).unwrap(), 6, 12, 8),
        (icosahedron(1.0).unwrap(), 12, 30, 20),
    ];
    for (mesh, v, e, f) in solids {
        assert_eq!((mesh.n_vertices(), mesh.n_edges(), mesh.n_faces()), (v, e, f));
        assert!(!mesh.has_boundary());
        assert!(mesh.check().is_ok());
    }
}

/// Test that inscribed solids put every vertex on the sphere.
#[test]
fn test_solid_radius() {
    for mesh in [
        tetrahedron(2.0).unwrap(),
        octahedron(2.0).unwrap(),
        icosahedron(2.0).unwrap(),
    ] {
        for v in mesh.vertex_ids() {
            assert_relative_eq!(mesh.position(v).length(), 2.0, epsilon = 1e-12);
        }
    }
}

/// Test that solids are wound outward.
#[test]
fn test_solids_face_outward() {
    for mesh in [
        cube(1.0).unwrap(),
        tetrahedron(1.0).unwrap(),
        octahedron(1.0).unwrap(),
        icosahedron(1.0).unwrap(),
    ] {
        for f in mesh.polygon_ids() {
            assert!(mesh.face_normal(f).dot(mesh.face_center(f)) > 0.0);
        }
    }
}

/// Test grid counts and the single boundary loop.
#[test]
fn test_grid_counts() {
    let mesh = grid(4, 3, 0.5).unwrap();
    assert_eq!(mesh.n_vertices(), 20);
    assert_eq!(mesh.n_edges(), 31);
    assert_eq!(mesh.n_faces(), 12);
    assert_eq!(mesh.n_boundaries(), 1);

    let tri = triangle_grid(4, 3, 0.5).unwrap();
    assert_eq!(tri.n_faces(), 24);
    assert!(tri.is_triangle_mesh());
}

/// Test that non-positive sizes and empty grids are rejected.
#[test]
fn test_invalid_parameters() {
    assert!(matches!(cube(0.0), Err(MeshError::InvalidParameter(_))));
    assert!(matches!(icosahedron(-1.0), Err(MeshError::InvalidParameter(_))));
    assert!(matches!(quad(f64::NAN), Err(MeshError::InvalidParameter(_))));
    assert!(matches!(grid(0, 2, 1.0), Err(MeshError::InvalidParameter(_))));
}
