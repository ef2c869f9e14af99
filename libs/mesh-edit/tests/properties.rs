//! Structural properties every editing path must keep.

use mesh_edit::{primitives, EdgeId, HalfedgeMesh, SimplifyConfig, VertexId};
use std::collections::BTreeSet;

fn sphere() -> HalfedgeMesh {
    let mut mesh = primitives::icosahedron(1.0).unwrap();
    mesh.loop_subdivide().unwrap();
    mesh
}

fn edge_set(mesh: &HalfedgeMesh) -> BTreeSet<(usize, usize)> {
    let order: Vec<VertexId> = mesh.vertex_ids().collect();
    let index = |v: VertexId| order.iter().position(|&w| w == v).unwrap();
    mesh.edge_ids()
        .map(|e| {
            let (a, b) = mesh.edge_vertices(e);
            let (a, b) = (index(a), index(b));
            (a.min(b), a.max(b))
        })
        .collect()
}

fn degrees(mesh: &HalfedgeMesh) -> Vec<usize> {
    let mut d: Vec<usize> = mesh.vertex_ids().map(|v| mesh.degree(v)).collect();
    d.sort_unstable();
    d
}

/// Test that every successful local edit leaves a valid closed mesh.
#[test]
fn test_successful_local_edits_leave_a_valid_mesh() {
    let mut mesh = sphere();
    let edges: Vec<EdgeId> = mesh.edge_ids().collect();
    for (i, e) in edges.into_iter().enumerate() {
        if !mesh.is_live(e) {
            continue;
        }
        let applied = match i % 4 {
            0 => mesh.flip_edge(e).is_some(),
            1 => mesh.split_edge(e).is_some(),
            2 => mesh.collapse_edge(e).is_some(),
            _ => mesh.bisect_edge(e).is_some() && mesh.triangulate().is_ok(),
        };
        if applied {
            assert_eq!(mesh.check(), Ok(()), "edit {i} broke the mesh");
            mesh.validate().unwrap();
        }
    }
    assert!(mesh.is_triangle_mesh());
    assert!(!mesh.has_boundary());
}

/// Test that erase_vertex rejects every boundary vertex of a patch.
#[test]
fn test_erase_vertex_rejects_every_boundary_vertex() {
    let mut mesh = primitives::triangle_grid(3, 3, 1.0).unwrap();
    let boundary: Vec<VertexId> = mesh
        .vertex_ids()
        .filter(|&v| mesh.vertex_on_boundary(v))
        .collect();
    assert_eq!(boundary.len(), 12);
    for v in boundary {
        assert_eq!(mesh.erase_vertex(v), None);
    }
    assert_eq!((mesh.n_vertices(), mesh.n_faces()), (16, 18));
    assert_eq!(mesh.pending_erasures(), 0);
}

/// Test that edge collapses keep every vertex at degree 3 or more.
#[test]
fn test_collapse_never_drops_a_degree_below_three() {
    let base = sphere();
    for e in base.edge_ids() {
        let mut mesh = base.clone();
        if mesh.collapse_edge(e).is_none() {
            assert_eq!(mesh.pending_erasures(), 0);
            continue;
        }
        mesh.validate().unwrap();
        assert!(mesh.vertex_ids().all(|v| mesh.degree(v) >= 3));
    }
}

/// Test that flipping an edge twice restores the connectivity.
#[test]
fn test_flipping_twice_restores_connectivity() {
    let base = primitives::icosahedron(1.0).unwrap();
    let original_edges = edge_set(&base);
    let original_degrees = degrees(&base);
    for e in base.edge_ids() {
        let mut mesh = base.clone();
        let e = mesh.flip_edge(e).unwrap();
        assert_ne!(edge_set(&mesh), original_edges);
        mesh.flip_edge(e).unwrap();
        assert_eq!(edge_set(&mesh), original_edges);
        assert_eq!(degrees(&mesh), original_degrees);
    }
}

/// Test that triangulating a triangle mesh changes nothing.
#[test]
fn test_triangulate_leaves_triangle_meshes_alone() {
    for mut mesh in [
        primitives::tetrahedron(1.0).unwrap(),
        primitives::triangulated_cube(1.0).unwrap(),
        primitives::triangle_grid(2, 3, 0.5).unwrap(),
        sphere(),
    ] {
        let before = (mesh.n_vertices(), mesh.n_edges(), mesh.n_faces());
        mesh.triangulate().unwrap();
        assert_eq!((mesh.n_vertices(), mesh.n_edges(), mesh.n_faces()), before);
    }
}

/// Test the element counts produced by Loop subdivision.
#[test]
fn test_loop_subdivision_counts() {
    for mut mesh in [
        primitives::tetrahedron(1.0).unwrap(),
        primitives::octahedron(1.0).unwrap(),
        primitives::triangulated_cube(1.0).unwrap(),
        primitives::icosahedron(1.0).unwrap(),
    ] {
        let (v, e, f) = (mesh.n_vertices(), mesh.n_edges(), mesh.n_faces());
        mesh.loop_subdivide().unwrap();
        assert_eq!(mesh.n_vertices(), v + e);
        assert_eq!(mesh.n_faces(), 4 * f);
        assert_eq!(mesh.check(), Ok(()));
    }
}

/// Test that repeated simplification never adds edges.
#[test]
fn test_repeated_simplify_never_adds_edges() {
    let mut mesh = sphere();
    mesh.loop_subdivide().unwrap();
    let config = SimplifyConfig::new(0.8, 6).unwrap();
    let mut edges = mesh.n_edges();
    for _ in 0..4 {
        match mesh.simplify(&config) {
            Ok(()) => {}
            Err(err) => panic!("simplify failed on a valid sphere: {err}"),
        }
        assert!(mesh.n_edges() <= edges);
        edges = mesh.n_edges();
        assert_eq!(mesh.check(), Ok(()));
    }
}
