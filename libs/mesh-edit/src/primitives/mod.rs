//! # Primitives
//!
//! Closed solids and open planar patches, built through
//! [`HalfedgeMesh::from_polygons`](crate::HalfedgeMesh::from_polygons).
//! All faces are counter-clockwise seen from outside (or from +Z for
//! planar patches).

mod planar;
mod solids;

#[cfg(test)]
mod tests;

pub use planar::{grid, quad, triangle_grid};
pub use solids::{cube, icosahedron, octahedron, tetrahedron, triangulated_cube};

use crate::error::{MeshError, MeshResult};

fn check_size(shape: &str, size: f64) -> MeshResult<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(MeshError::parameter(format!(
            "{shape} size must be positive and finite, got {size}"
        )))
    }
}
