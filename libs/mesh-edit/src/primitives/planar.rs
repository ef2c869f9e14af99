//! Open patches in the XY plane. Each has one boundary loop.

use super::check_size;
use crate::error::{MeshError, MeshResult};
use crate::HalfedgeMesh;
use glam::DVec3;

/// Single square face of edge length `size`, centered at the origin.
pub fn quad(size: f64) -> MeshResult<HalfedgeMesh> {
    check_size("quad", size)?;
    let h = size * 0.5;
    let positions = [
        DVec3::new(-h, -h, 0.0),
        DVec3::new(h, -h, 0.0),
        DVec3::new(h, h, 0.0),
        DVec3::new(-h, h, 0.0),
    ];
    HalfedgeMesh::from_polygons(&positions, &[vec![0, 1, 2, 3]])
}

/// `nx` by `ny` quads of edge length `spacing`, with a corner at the origin.
///
/// # Example
///
/// ```rust
/// use mesh_edit::primitives::grid;
///
/// let mesh = grid(3, 2, 1.0).unwrap();
/// assert_eq!(mesh.n_vertices(), 12);
/// assert_eq!(mesh.n_faces(), 6);
/// assert_eq!(mesh.n_boundaries(), 1);
/// ```
pub fn grid(nx: usize, ny: usize, spacing: f64) -> MeshResult<HalfedgeMesh> {
    let (positions, cells) = lattice(nx, ny, spacing)?;
    let faces: Vec<Vec<usize>> = cells.iter().map(|c| c.to_vec()).collect();
    HalfedgeMesh::from_polygons(&positions, &faces)
}

/// [`grid`] with every cell split into two triangles along alternating
/// diagonals.
pub fn triangle_grid(nx: usize, ny: usize, spacing: f64) -> MeshResult<HalfedgeMesh> {
    let (positions, cells) = lattice(nx, ny, spacing)?;
    let faces: Vec<Vec<usize>> = cells
        .iter()
        .enumerate()
        .flat_map(|(i, &[a, b, c, d])| {
            if i % 2 == 0 {
                [vec![a, b, c], vec![a, c, d]]
            } else {
                [vec![a, b, d], vec![b, c, d]]
            }
        })
        .collect();
    HalfedgeMesh::from_polygons(&positions, &faces)
}

/// Lattice points and counter-clockwise cells.
fn lattice(nx: usize, ny: usize, spacing: f64) -> MeshResult<(Vec<DVec3>, Vec<[usize; 4]>)> {
    check_size("grid", spacing)?;
    if nx == 0 || ny == 0 {
        return Err(MeshError::parameter(format!(
            "grid needs at least one cell per side, got {nx}x{ny}"
        )));
    }
    let index = |i: usize, j: usize| j * (nx + 1) + i;
    let positions = (0..=ny)
        .flat_map(|j| (0..=nx).map(move |i| DVec3::new(i as f64, j as f64, 0.0)))
        .map(|p| p * spacing)
        .collect();
    let cells = (0..ny)
        .flat_map(|j| (0..nx).map(move |i| (i, j)))
        .map(|(i, j)| [index(i, j), index(i + 1, j), index(i + 1, j + 1), index(i, j + 1)])
        .collect();
    Ok((positions, cells))
}
