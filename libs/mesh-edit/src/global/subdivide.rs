//! # Subdivision
//!
//! Linear and Catmull-Clark subdivision compute new positions for every
//! vertex, edge and face, then rebuild an all-quad mesh from index lists.
//! Loop subdivision works in place with splits and flips.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use config::constants::{
    LOOP_BETA_VALENCE_3, LOOP_BOUNDARY_VERTEX_WEIGHT, LOOP_EDGE_APEX_WEIGHT,
    LOOP_EDGE_ENDPOINT_WEIGHT,
};
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Quad-producing subdivision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionScheme {
    /// Midpoints and centroids; the surface does not move.
    Linear,
    /// Smooth Catmull-Clark rules; closed meshes only.
    CatmullClark,
}

/// New positions for every vertex, edge and polygon face.
///
/// Scoped to one subdivision call rather than stored on the elements.
#[derive(Debug, Clone, Default)]
pub struct SubdivisionPositions {
    /// New position of each original vertex.
    pub vertices: HashMap<VertexId, DVec3>,
    /// Position of the point inserted on each edge.
    pub edges: HashMap<EdgeId, DVec3>,
    /// Position of the point inserted in each polygon.
    pub faces: HashMap<FaceId, DVec3>,
}

impl HalfedgeMesh {
    // =========================================================================
    // POSITIONS
    // =========================================================================

    /// Linear rule: vertices stay, edges get midpoints, faces get centroids.
    pub fn linear_subdivide_positions(&self) -> SubdivisionPositions {
        SubdivisionPositions {
            vertices: self.vertex_ids().map(|v| (v, self.position(v))).collect(),
            edges: self.edge_ids().map(|e| (e, self.edge_center(e))).collect(),
            faces: self.polygon_ids().map(|f| (f, self.face_center(f))).collect(),
        }
    }

    /// Catmull-Clark rule.
    ///
    /// - face: centroid
    /// - edge: average of both endpoints and both adjacent face points
    /// - vertex: `(Q + 2R + (n - 3)S) / n`
    ///
    /// Fails with [`crate::MeshError::HasBoundary`] on an open mesh.
    pub fn catmullclark_subdivide_positions(&self) -> MeshResult<SubdivisionPositions> {
        self.require_closed("catmullclark_subdivide_positions")?;
        let faces: HashMap<FaceId, DVec3> =
            self.polygon_ids().map(|f| (f, self.face_center(f))).collect();

        let edges = self
            .edge_ids()
            .map(|e| {
                let h = self.edge(e).halfedge;
                let (a, b) = (self.origin(h), self.target(h));
                let sides = faces[&self.face_of(h)] + faces[&self.face_of(self.twin(h))];
                (e, (self.position(a) + self.position(b) + sides) * 0.25)
            })
            .collect();

        let vertices = self
            .vertex_ids()
            .map(|v| {
                let n = self.degree(v) as f64;
                let (mut q, mut r) = (DVec3::ZERO, DVec3::ZERO);
                for h in self.outgoing(v) {
                    q += faces[&self.face_of(h)];
                    r += self.edge_center(self.edge_of(h));
                }
                let (q, r, s) = (q / n, r / n, self.position(v));
                (v, (q + 2.0 * r + (n - 3.0) * s) / n)
            })
            .collect();

        Ok(SubdivisionPositions {
            vertices,
            edges,
            faces,
        })
    }

    // =========================================================================
    // QUAD REBUILD
    // =========================================================================

    /// Subdivides every polygon into quads, one per corner.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_edit::{primitives, SubdivisionScheme};
    ///
    /// let mut mesh = primitives::quad(1.0).unwrap();
    /// mesh.subdivide(SubdivisionScheme::Linear).unwrap();
    /// assert_eq!(mesh.n_vertices(), 9);
    /// assert_eq!(mesh.n_faces(), 4);
    /// ```
    pub fn subdivide(&mut self, scheme: SubdivisionScheme) -> MeshResult<()> {
        log::info!(
            "subdivide ({scheme:?}): {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );
        let positions = match scheme {
            SubdivisionScheme::Linear => self.linear_subdivide_positions(),
            SubdivisionScheme::CatmullClark => self.catmullclark_subdivide_positions()?,
        };
        self.rebuild_from_positions(&positions)?;
        log::info!(
            "subdivide ({scheme:?}): done, {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );
        Ok(())
    }

    /// Numbers vertices, then edges, then faces, and lists one quad
    /// `[vertex, edge, face, previous edge]` per polygon corner.
    fn rebuild_from_positions(&mut self, positions: &SubdivisionPositions) -> MeshResult<()> {
        let mut points = Vec::with_capacity(self.n_vertices() + self.n_edges() + self.n_faces());
        let mut vertex_index = HashMap::new();
        for v in self.vertex_ids() {
            vertex_index.insert(v, points.len());
            points.push(positions.vertices[&v]);
        }
        let mut edge_index = HashMap::new();
        for e in self.edge_ids() {
            edge_index.insert(e, points.len());
            points.push(positions.edges[&e]);
        }
        let mut quads = Vec::new();
        for f in self.polygon_ids() {
            let center = points.len();
            points.push(positions.faces[&f]);
            for h in self.face_loop(f) {
                let before = self.prev(h);
                quads.push(vec![
                    vertex_index[&self.origin(h)],
                    edge_index[&self.edge_of(h)],
                    center,
                    edge_index[&self.edge_of(before)],
                ]);
            }
        }
        self.rebuild(&points, &quads)
    }

    // =========================================================================
    // LOOP
    // =========================================================================

    /// One round of Loop subdivision on a triangle mesh.
    ///
    /// Every triangle becomes four; a closed mesh with `V` vertices, `E`
    /// edges and `F` faces ends with `V + E` vertices and `4F` faces.
    /// Boundary edges use the midpoint and boundary vertices the
    /// `3/4, 1/8, 1/8` rule.
    pub fn loop_subdivide(&mut self) -> MeshResult<()> {
        self.require_triangles("loop_subdivide")?;
        log::info!(
            "loop_subdivide: {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );

        // Phase 1: positions for old vertices and for the points on old edges
        let vertex_positions: Vec<(VertexId, DVec3)> = self
            .vertex_ids()
            .map(|v| (v, self.loop_vertex_position(v)))
            .collect();
        let old_edges: Vec<EdgeId> = self.edge_ids().collect();
        let edge_positions: Vec<DVec3> = old_edges
            .iter()
            .map(|&e| self.loop_edge_position(e))
            .collect();

        // Phase 2: split every old edge
        let mut fresh_vertices: HashSet<VertexId> = HashSet::new();
        let mut fresh_edges: Vec<EdgeId> = Vec::new();
        let mut midpoints = Vec::with_capacity(old_edges.len());
        for (&e, &p) in old_edges.iter().zip(&edge_positions) {
            let Some(split) = self.split_edge_detailed(e) else {
                return Err(MeshError::degenerate(
                    "loop_subdivide",
                    format!("edge {e} could not be split"),
                ));
            };
            fresh_vertices.insert(split.vertex);
            fresh_edges.extend(split.crossing);
            midpoints.push((split.vertex, p));
        }

        // Phase 3: flip new edges joining an old and a new vertex
        for e in fresh_edges {
            let (a, b) = self.edge_vertices(e);
            if fresh_vertices.contains(&a) != fresh_vertices.contains(&b)
                && self.flip_edge(e).is_none()
            {
                return Err(MeshError::degenerate(
                    "loop_subdivide",
                    format!("edge {e} could not be flipped"),
                ));
            }
        }
        self.validate_phase("loop_subdivide", "split and flip")?;

        // Phase 4: commit
        for (v, p) in vertex_positions.into_iter().chain(midpoints) {
            self.set_position(v, p);
        }
        log::info!(
            "loop_subdivide: done, {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );
        Ok(())
    }

    fn loop_vertex_position(&self, v: VertexId) -> DVec3 {
        let p = self.position(v);
        if self.vertex_on_boundary(v) {
            let side: DVec3 = self
                .outgoing(v)
                .filter(|&h| self.edge_on_boundary(self.edge_of(h)))
                .map(|h| self.position(self.target(h)))
                .sum();
            return LOOP_BOUNDARY_VERTEX_WEIGHT * p + (1.0 - LOOP_BOUNDARY_VERTEX_WEIGHT) * 0.5 * side;
        }
        let n = self.degree(v);
        let beta = if n == 3 {
            LOOP_BETA_VALENCE_3
        } else {
            3.0 / (8.0 * n as f64)
        };
        let ring: DVec3 = self.neighbors(v).iter().map(|&u| self.position(u)).sum();
        (1.0 - n as f64 * beta) * p + beta * ring
    }

    fn loop_edge_position(&self, e: EdgeId) -> DVec3 {
        if self.edge_on_boundary(e) {
            return self.edge_center(e);
        }
        let h: HalfedgeId = self.edge(e).halfedge;
        let t = self.twin(h);
        let ends = self.position(self.origin(h)) + self.position(self.origin(t));
        let apexes = self.position(self.origin(self.prev(h))) + self.position(self.origin(self.prev(t)));
        LOOP_EDGE_ENDPOINT_WEIGHT * ends + LOOP_EDGE_APEX_WEIGHT * apexes
    }
}
