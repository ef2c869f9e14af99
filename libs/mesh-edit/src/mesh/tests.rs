//! # Half-edge Mesh Tests

use super::*;
use crate::error::MeshError;
use crate::primitives;
use approx::assert_relative_eq;
use glam::DVec3;

fn euler(mesh: &HalfedgeMesh) -> i64 {
    mesh.n_vertices() as i64 - mesh.n_edges() as i64
        + mesh.n_faces() as i64
        + mesh.n_boundaries() as i64
}

// =============================================================================
// CONSTRUCTION AND COUNTS
// =============================================================================

/// Test that a quad cube has the expected element counts.
#[test]
fn test_cube_counts() {
    let mesh = primitives::cube(1.0).unwrap();
    assert_eq!(mesh.n_vertices(), 8);
    assert_eq!(mesh.n_edges(), 12);
    assert_eq!(mesh.n_halfedges(), 24);
    assert_eq!(mesh.n_faces(), 6);
    assert_eq!(mesh.n_boundaries(), 0);
    assert_eq!(euler(&mesh), 2);
}

/// Test that an open patch gets one boundary loop around its rim.
#[test]
fn test_quad_has_boundary_loop() {
    let mesh = primitives::quad(1.0).unwrap();
    assert_eq!(mesh.n_faces(), 1);
    assert_eq!(mesh.n_boundaries(), 1);
    assert!(mesh.has_boundary());
    let hole = mesh.face_ids().find(|&f| mesh.is_boundary_face(f)).unwrap();
    assert_eq!(mesh.face_degree(hole), 4);
    assert!(mesh.vertex_ids().all(|v| mesh.vertex_on_boundary(v)));
}

/// Test that new elements start unlinked and erasure is deferred.
#[test]
fn test_allocation_and_deferred_erase() {
    let mut mesh = HalfedgeMesh::new();
    let v = mesh.new_vertex();
    let h = mesh.new_halfedge();
    assert!(!mesh.vertex(v).halfedge.is_valid());
    assert!(!mesh.halfedge(h).twin.is_valid());
    assert!(mesh.erase(v));
    assert!(!mesh.erase(v));
    assert_eq!(mesh.n_vertices(), 0);
    assert_eq!(mesh.pending_erasures(), 1);
    assert_eq!(mesh.position(v), DVec3::ZERO);
    assert_eq!(mesh.compact(), 1);
    assert_eq!(mesh.pending_erasures(), 0);
}

/// Test that clearing the mesh invalidates every old handle.
#[test]
fn test_clear_starts_new_generation() {
    let mut mesh = primitives::tetrahedron(1.0).unwrap();
    let old = mesh.vertex_ids().next().unwrap();
    mesh.clear();
    assert_eq!(mesh.n_vertices(), 0);
    let fresh = mesh.new_vertex();
    assert!(!mesh.is_live(old));
    assert!(mesh.is_live(fresh));
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// Test that the outgoing fan visits every neighbor once.
#[test]
fn test_outgoing_fan() {
    let mesh = primitives::icosahedron(1.0).unwrap();
    for v in mesh.vertex_ids() {
        let fan: Vec<HalfedgeId> = mesh.outgoing(v).collect();
        assert_eq!(fan.len(), 5);
        assert!(fan.iter().all(|&h| mesh.origin(h) == v));
        let mut around = mesh.neighbors(v);
        around.sort();
        around.dedup();
        assert_eq!(around.len(), 5);
    }
}

/// Test that prev inverts next around every face.
#[test]
fn test_prev_inverts_next() {
    let mesh = primitives::cube(1.0).unwrap();
    for h in mesh.halfedge_ids() {
        assert_eq!(mesh.next(mesh.prev(h)), h);
        assert_eq!(mesh.target(h), mesh.origin(mesh.next(h)));
    }
}

/// Test that the face loop follows next and stays on the face.
#[test]
fn test_face_loop() {
    let mesh = primitives::cube(2.0).unwrap();
    for f in mesh.polygon_ids() {
        let sides: Vec<HalfedgeId> = mesh.face_loop(f).collect();
        assert_eq!(sides.len(), 4);
        assert!(sides.iter().all(|&h| mesh.face_of(h) == f));
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Test that cube face normals point outward with unit length.
#[test]
fn test_face_normals_point_outward() {
    let mesh = primitives::cube(2.0).unwrap();
    for f in mesh.polygon_ids() {
        let n = mesh.face_normal(f);
        let c = mesh.face_center(f);
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.dot(c), 1.0, epsilon = 1e-12);
    }
}

/// Test that the area normal length is twice the polygon area.
#[test]
fn test_face_area_normal_magnitude() {
    let mesh = primitives::quad(3.0).unwrap();
    let f = mesh.polygon_ids().next().unwrap();
    assert_relative_eq!(mesh.face_area_normal(f).length(), 18.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.face_normal(f).z, 1.0, epsilon = 1e-12);
}

/// Test that cube corner normals point along the diagonal.
#[test]
fn test_vertex_normal_at_cube_corner() {
    let mesh = primitives::cube(2.0).unwrap();
    for v in mesh.vertex_ids() {
        let expected = mesh.position(v).normalize();
        let n = mesh.vertex_normal(v);
        assert_relative_eq!(n.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(n.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(n.z, expected.z, epsilon = 1e-12);
    }
    assert!(mesh.check_finite_normals().is_none());
}

/// Test edge length, midpoint and mean edge length on a unit cube.
#[test]
fn test_edge_measurements() {
    let mesh = primitives::cube(1.0).unwrap();
    for e in mesh.edge_ids() {
        assert_relative_eq!(mesh.edge_length(e), 1.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.edge_center(e).length(), 0.5f64.sqrt(), epsilon = 1e-12);
    }
    assert_relative_eq!(mesh.mean_edge_length(), 1.0, epsilon = 1e-12);
}

/// Test that a collapsed vertex position produces a non-finite normal report.
#[test]
fn test_check_finite_normals_reports_degenerate_vertex() {
    let mut mesh = primitives::tetrahedron(1.0).unwrap();
    let ids: Vec<VertexId> = mesh.vertex_ids().collect();
    for &v in &ids {
        mesh.set_position(v, DVec3::ZERO);
    }
    assert_eq!(mesh.check_finite_normals(), Some(ids[0]));
}

// =============================================================================
// BUFFERS
// =============================================================================

/// Test that polygon export reproduces the input lists.
#[test]
fn test_polygon_export_matches_input() {
    let positions = vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
    let polygons = vec![vec![0, 1, 2], vec![0, 2, 3]];
    let mesh = HalfedgeMesh::from_polygons(&positions, &polygons).unwrap();
    let (out_positions, out_polygons) = mesh.to_polygons();
    assert_eq!(out_positions, positions);
    assert_eq!(out_polygons, polygons);
}

/// Test that render buffers fan-triangulate every polygon.
#[test]
fn test_triangle_buffers() {
    let mesh = primitives::cube(2.0).unwrap();
    let buffers = mesh.to_triangle_buffers();
    assert_eq!(buffers.vertices.len(), 8);
    assert_eq!(buffers.triangle_count(), 12);
    for vertex in &buffers.vertices {
        assert_relative_eq!(vertex.normal.length(), 1.0, epsilon = 1e-12);
        assert!(vertex.normal.dot(vertex.position) > 0.0);
    }
    assert!(buffers
        .indices
        .iter()
        .flatten()
        .all(|&i| (i as usize) < buffers.vertices.len()));
}

/// Test that malformed buffers are rejected with a reason.
#[test]
fn test_invalid_buffers_rejected() {
    let positions = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
    let cases: Vec<Vec<Vec<usize>>> = vec![
        vec![vec![0, 1]],
        vec![vec![0, 1, 7]],
        vec![vec![0, 1, 1]],
        vec![vec![0, 1, 2], vec![0, 1, 3]],
        vec![vec![0, 1, 2]],
    ];
    for polygons in cases {
        let result = HalfedgeMesh::from_polygons(&positions, &polygons);
        assert!(
            matches!(result, Err(MeshError::InvalidBuffers(_))),
            "{polygons:?} accepted"
        );
    }
}

/// Test that two fans sharing only a vertex are rejected as non-manifold.
#[test]
fn test_bowtie_rejected() {
    let positions = vec![
        DVec3::ZERO,
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(-1.0, 0.0, 0.0),
        DVec3::new(-1.0, -1.0, 0.0),
    ];
    let polygons = vec![vec![0, 1, 2], vec![0, 3, 4]];
    assert!(matches!(
        HalfedgeMesh::from_polygons(&positions, &polygons),
        Err(MeshError::InvalidBuffers(_))
    ));
}

/// Test that a failed rebuild leaves the mesh untouched.
#[test]
fn test_rebuild_is_atomic() {
    let mut mesh = primitives::cube(1.0).unwrap();
    let v = mesh.vertex_ids().next().unwrap();
    assert!(mesh.rebuild(&[DVec3::ZERO], &[vec![0, 0, 0]]).is_err());
    assert!(mesh.is_live(v));
    assert_eq!(mesh.n_faces(), 6);

    let (positions, polygons) = primitives::tetrahedron(1.0).unwrap().to_polygons();
    mesh.rebuild(&positions, &polygons).unwrap();
    assert!(!mesh.is_live(v));
    assert_eq!(mesh.n_faces(), 4);
}
