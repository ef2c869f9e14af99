//! # Buffer Interchange
//!
//! Conversion between the half-edge mesh and flat vertex/index lists.
//!
//! ## Entry points
//!
//! - [`HalfedgeMesh::from_polygons`]: build a mesh from positions and polygons
//! - [`HalfedgeMesh::rebuild`]: replace all connectivity and geometry at once
//! - [`HalfedgeMesh::to_polygons`]: export positions and polygon index lists
//! - [`HalfedgeMesh::to_triangle_buffers`]: fan-triangulated render buffers
//!
//! Polygons are counter-clockwise seen from outside. Unpaired directed edges
//! become the sides of boundary loops.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// TRIANGLE BUFFERS
// =============================================================================

/// One render vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferVertex {
    /// Vertex position.
    pub position: DVec3,
    /// Unit vertex normal, zero where undefined.
    pub normal: DVec3,
}

/// Triangulated vertex/index buffers for renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleBuffers {
    /// One record per mesh vertex, in slot order.
    pub vertices: Vec<BufferVertex>,
    /// Counter-clockwise triangles indexing `vertices`.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleBuffers {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl HalfedgeMesh {
    /// Builds a mesh from a vertex list and polygon index lists.
    ///
    /// # Arguments
    ///
    /// * `positions` - Vertex positions
    /// * `polygons` - Counter-clockwise vertex indices per face
    ///
    /// # Returns
    ///
    /// The mesh, or [`MeshError::InvalidBuffers`] if the lists do not
    /// describe an oriented manifold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use mesh_edit::HalfedgeMesh;
    ///
    /// let positions = [DVec3::ZERO, DVec3::X, DVec3::Y];
    /// let mesh = HalfedgeMesh::from_polygons(&positions, &[vec![0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.n_faces(), 1);
    /// assert_eq!(mesh.n_boundaries(), 1);
    /// ```
    pub fn from_polygons(positions: &[DVec3], polygons: &[Vec<usize>]) -> MeshResult<Self> {
        let mut mesh = Self::new();
        mesh.rebuild(positions, polygons)?;
        Ok(mesh)
    }

    /// Replaces the whole mesh from flat buffers.
    ///
    /// Atomic: on error the mesh is left as it was. On success every handle
    /// issued before the call is invalidated.
    pub fn rebuild(&mut self, positions: &[DVec3], polygons: &[Vec<usize>]) -> MeshResult<()> {
        check_buffers(positions.len(), polygons)?;

        let mut fresh = self.successor();
        let vertex_ids: Vec<VertexId> = positions
            .iter()
            .map(|&p| {
                let v = fresh.new_vertex();
                fresh.set_position(v, p);
                v
            })
            .collect();

        // Interior half-edges, keyed by directed vertex pair
        let mut directed: HashMap<(usize, usize), HalfedgeId> = HashMap::new();
        for polygon in polygons {
            let f = fresh.new_face();
            let loop_ids: Vec<HalfedgeId> = polygon.iter().map(|_| fresh.new_halfedge()).collect();
            for (i, &h) in loop_ids.iter().enumerate() {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                let he = fresh.halfedge_mut(h);
                he.next = loop_ids[(i + 1) % loop_ids.len()];
                he.vertex = vertex_ids[a];
                he.face = f;
                fresh.vertex_mut(vertex_ids[a]).halfedge = h;
                directed.insert((a, b), h);
            }
            fresh.face_mut(f).halfedge = loop_ids[0];
        }

        // Pair twins; unpaired sides get a boundary twin
        let mut boundary_out: HashMap<usize, HalfedgeId> = HashMap::new();
        let mut boundary_sides: Vec<(HalfedgeId, usize)> = Vec::new();
        for polygon in polygons {
            for i in 0..polygon.len() {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                let h = directed[&(a, b)];
                if fresh.halfedge(h).edge.is_valid() {
                    continue;
                }
                let e = fresh.new_edge();
                fresh.edge_mut(e).halfedge = h;
                let t = match directed.get(&(b, a)) {
                    Some(&t) => t,
                    None => {
                        let t = fresh.new_halfedge();
                        fresh.halfedge_mut(t).vertex = vertex_ids[b];
                        if boundary_out.insert(b, t).is_some() {
                            return Err(MeshError::buffers(format!(
                                "vertex {b} has more than one boundary gap"
                            )));
                        }
                        boundary_sides.push((t, a));
                        t
                    }
                };
                fresh.halfedge_mut(h).twin = t;
                fresh.halfedge_mut(h).edge = e;
                fresh.halfedge_mut(t).twin = h;
                fresh.halfedge_mut(t).edge = e;
            }
        }

        // Chain boundary half-edges into loops
        for &(t, end) in &boundary_sides {
            let Some(&next) = boundary_out.get(&end) else {
                return Err(MeshError::buffers(format!(
                    "boundary through vertex {end} does not close"
                )));
            };
            fresh.halfedge_mut(t).next = next;
        }
        for &(t, _) in &boundary_sides {
            if fresh.halfedge(t).face.is_valid() {
                continue;
            }
            let f: FaceId = fresh.new_boundary_face();
            fresh.face_mut(f).halfedge = t;
            let mut h = t;
            loop {
                fresh.halfedge_mut(h).face = f;
                h = fresh.next(h);
                if h == t {
                    break;
                }
            }
        }

        fresh
            .check()
            .map_err(|err| MeshError::buffers(format!("not a manifold mesh: {err}")))?;
        log::debug!(
            "rebuilt mesh: {} vertices, {} edges, {} faces, {} boundary loops",
            fresh.n_vertices(),
            fresh.n_edges(),
            fresh.n_faces(),
            fresh.n_boundaries()
        );
        *self = fresh;
        Ok(())
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Exports positions and polygon index lists, both in slot order.
    ///
    /// Boundary loops are not exported.
    pub fn to_polygons(&self) -> (Vec<DVec3>, Vec<Vec<usize>>) {
        let index = self.vertex_index();
        let positions = self.vertices.iter().map(|(_, v)| v.position).collect();
        let polygons = self
            .polygon_ids()
            .map(|f| self.face_loop(f).map(|h| index[&self.origin(h)]).collect())
            .collect();
        (positions, polygons)
    }

    /// Builds fan-triangulated render buffers with smooth vertex normals.
    pub fn to_triangle_buffers(&self) -> TriangleBuffers {
        let index = self.vertex_index();
        let ids: Vec<VertexId> = self.vertex_ids().collect();
        let vertices = ids
            .par_iter()
            .map(|&v| {
                let normal = self.vertex_normal(v);
                BufferVertex {
                    position: self.position(v),
                    normal: if normal.is_finite() { normal } else { DVec3::ZERO },
                }
            })
            .collect();

        let mut indices = Vec::new();
        for f in self.polygon_ids() {
            let corners: Vec<u32> = self
                .face_loop(f)
                .map(|h| index[&self.origin(h)] as u32)
                .collect();
            for i in 1..corners.len() - 1 {
                indices.push([corners[0], corners[i], corners[i + 1]]);
            }
        }
        TriangleBuffers { vertices, indices }
    }

    fn vertex_index(&self) -> HashMap<VertexId, usize> {
        self.vertex_ids().enumerate().map(|(i, v)| (v, i)).collect()
    }
}

/// Rejects index lists that cannot form an oriented manifold.
fn check_buffers(vertex_count: usize, polygons: &[Vec<usize>]) -> MeshResult<()> {
    let mut used = vec![false; vertex_count];
    let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
    for (p, polygon) in polygons.iter().enumerate() {
        if polygon.len() < 3 {
            return Err(MeshError::buffers(format!(
                "polygon {p} has {} vertices, expected at least 3",
                polygon.len()
            )));
        }
        for (i, &a) in polygon.iter().enumerate() {
            if a >= vertex_count {
                return Err(MeshError::buffers(format!(
                    "polygon {p} references vertex {a}, but only {vertex_count} exist"
                )));
            }
            if polygon[..i].contains(&a) {
                return Err(MeshError::buffers(format!(
                    "polygon {p} visits vertex {a} twice"
                )));
            }
            used[a] = true;
            let b = polygon[(i + 1) % polygon.len()];
            if let Some(q) = directed.insert((a, b), p) {
                return Err(MeshError::buffers(format!(
                    "edge {a}->{b} is used by polygons {q} and {p} in the same direction"
                )));
            }
        }
    }
    if let Some(v) = used.iter().position(|&u| !u) {
        return Err(MeshError::buffers(format!("vertex {v} is not used by any polygon")));
    }
    Ok(())
}
