//! Closed polyhedra.

use super::check_size;
use crate::error::MeshResult;
use crate::HalfedgeMesh;
use glam::DVec3;

/// Axis-aligned cube of edge length `size`, centered at the origin, with six
/// quad faces.
///
/// # Example
///
/// ```rust
/// use mesh_edit::primitives::cube;
///
/// let mesh = cube(1.0).unwrap();
/// assert_eq!(mesh.n_vertices(), 8);
/// assert_eq!(mesh.n_faces(), 6);
/// ```
pub fn cube(size: f64) -> MeshResult<HalfedgeMesh> {
    check_size("cube", size)?;
    HalfedgeMesh::from_polygons(&cube_corners(size), &CUBE_QUADS.map(|q| q.to_vec()))
}

/// Cube with every quad split along its first diagonal (12 triangles).
pub fn triangulated_cube(size: f64) -> MeshResult<HalfedgeMesh> {
    check_size("cube", size)?;
    let triangles: Vec<Vec<usize>> = CUBE_QUADS
        .iter()
        .flat_map(|&[a, b, c, d]| [vec![a, b, c], vec![a, c, d]])
        .collect();
    HalfedgeMesh::from_polygons(&cube_corners(size), &triangles)
}

// Corners 0-3 ring the bottom counter-clockwise from (-,-); 4-7 sit above them
const CUBE_QUADS: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // -Z
    [4, 5, 6, 7], // +Z
    [0, 1, 5, 4], // -Y
    [3, 7, 6, 2], // +Y
    [0, 4, 7, 3], // -X
    [1, 2, 6, 5], // +X
];

fn cube_corners(size: f64) -> Vec<DVec3> {
    let h = size * 0.5;
    vec![
        DVec3::new(-h, -h, -h),
        DVec3::new(h, -h, -h),
        DVec3::new(h, h, -h),
        DVec3::new(-h, h, -h),
        DVec3::new(-h, -h, h),
        DVec3::new(h, -h, h),
        DVec3::new(h, h, h),
        DVec3::new(-h, h, h),
    ]
}

/// Regular tetrahedron inscribed in a sphere of radius `radius`.
pub fn tetrahedron(radius: f64) -> MeshResult<HalfedgeMesh> {
    check_size("tetrahedron", radius)?;
    let s = radius / 3f64.sqrt();
    let positions = [
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(1.0, -1.0, -1.0),
        DVec3::new(-1.0, 1.0, -1.0),
        DVec3::new(-1.0, -1.0, 1.0),
    ]
    .map(|p| p * s);
    let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
    HalfedgeMesh::from_polygons(&positions, &faces)
}

/// Regular octahedron with vertices on the axes at distance `radius`.
pub fn octahedron(radius: f64) -> MeshResult<HalfedgeMesh> {
    check_size("octahedron", radius)?;
    let positions = [
        DVec3::X,
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Y,
        DVec3::Z,
        DVec3::NEG_Z,
    ]
    .map(|p| p * radius);
    let faces = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    HalfedgeMesh::from_polygons(&positions, &faces)
}

/// Regular icosahedron inscribed in a sphere of radius `radius`.
///
/// Every vertex has degree 5, which makes it the usual fixture for
/// operators that need interior vertices with spare edges.
pub fn icosahedron(radius: f64) -> MeshResult<HalfedgeMesh> {
    check_size("icosahedron", radius)?;
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let positions: Vec<DVec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| DVec3::new(x, y, z).normalize() * radius)
    .collect();
    let faces: Vec<Vec<usize>> = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ]
    .iter()
    .map(|f| f.to_vec())
    .collect();
    HalfedgeMesh::from_polygons(&positions, &faces)
}
