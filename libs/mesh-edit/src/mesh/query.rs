//! # Mesh Queries
//!
//! Read-only topology and geometry queries.

use super::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use glam::DVec3;

impl HalfedgeMesh {
    // =========================================================================
    // TOPOLOGY
    // =========================================================================

    /// Number of edges incident to `v`, boundary sides included.
    pub fn degree(&self, v: VertexId) -> usize {
        self.outgoing(v).count()
    }

    /// Number of sides of face `f`.
    pub fn face_degree(&self, f: FaceId) -> usize {
        self.face_loop(f).count()
    }

    /// True if `v` touches a boundary loop.
    pub fn vertex_on_boundary(&self, v: VertexId) -> bool {
        self.outgoing(v)
            .any(|h| self.is_boundary_face(self.face_of(h)))
    }

    /// True if either side of `e` is a boundary loop.
    pub fn edge_on_boundary(&self, e: EdgeId) -> bool {
        let h = self.edge(e).halfedge;
        self.is_boundary_face(self.face_of(h)) || self.is_boundary_face(self.face_of(self.twin(h)))
    }

    /// Half-edge of `e` whose face is not a boundary loop, if any.
    pub fn interior_side(&self, e: EdgeId) -> HalfedgeId {
        let h = self.edge(e).halfedge;
        if self.is_boundary_face(self.face_of(h)) {
            self.twin(h)
        } else {
            h
        }
    }

    /// Both endpoints of an edge.
    pub fn edge_vertices(&self, e: EdgeId) -> (VertexId, VertexId) {
        let h = self.edge(e).halfedge;
        (self.origin(h), self.target(h))
    }

    /// Edge joining `a` and `b`, if any.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.outgoing(a)
            .find(|&h| self.target(h) == b)
            .map(|h| self.edge_of(h))
    }

    /// True if every polygon face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.polygon_ids().all(|f| self.face_degree(f) == 3)
    }

    /// True if the mesh has at least one boundary loop.
    pub fn has_boundary(&self) -> bool {
        self.faces.iter().any(|(_, f)| f.boundary)
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// Unnormalized face normal by Newell's method; its length is twice the
    /// polygon area.
    pub fn face_area_normal(&self, f: FaceId) -> DVec3 {
        let points: Vec<DVec3> = self
            .face_loop(f)
            .map(|h| self.position(self.origin(h)))
            .collect();
        newell_normal(&points)
    }

    /// Unit face normal. Zero for a degenerate polygon.
    pub fn face_normal(&self, f: FaceId) -> DVec3 {
        self.face_area_normal(f).normalize_or_zero()
    }

    /// Area-weighted vertex normal over incident polygons.
    ///
    /// Not finite when every incident face is degenerate.
    pub fn vertex_normal(&self, v: VertexId) -> DVec3 {
        let sum: DVec3 = self
            .outgoing(v)
            .map(|h| self.face_of(h))
            .filter(|&f| !self.is_boundary_face(f))
            .map(|f| self.face_area_normal(f))
            .sum();
        sum.normalize()
    }

    /// Vertex centroid of a face.
    pub fn face_center(&self, f: FaceId) -> DVec3 {
        let mut sum = DVec3::ZERO;
        let mut count = 0usize;
        for h in self.face_loop(f) {
            sum += self.position(self.origin(h));
            count += 1;
        }
        sum / count.max(1) as f64
    }

    /// Midpoint of an edge.
    pub fn edge_center(&self, e: EdgeId) -> DVec3 {
        let (a, b) = self.edge_vertices(e);
        (self.position(a) + self.position(b)) * 0.5
    }

    /// Length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let (a, b) = self.edge_vertices(e);
        self.position(a).distance(self.position(b))
    }

    /// Centroid of the neighbors of `v`.
    pub fn neighborhood_center(&self, v: VertexId) -> DVec3 {
        let mut sum = DVec3::ZERO;
        let mut count = 0usize;
        for h in self.outgoing(v) {
            sum += self.position(self.target(h));
            count += 1;
        }
        sum / count.max(1) as f64
    }

    /// Average length over all live edges. Zero for an empty mesh.
    pub fn mean_edge_length(&self) -> f64 {
        let n = self.n_edges();
        if n == 0 {
            return 0.0;
        }
        self.edge_ids().map(|e| self.edge_length(e)).sum::<f64>() / n as f64
    }

    /// First vertex whose normal is not finite, if any.
    pub fn check_finite_normals(&self) -> Option<VertexId> {
        self.vertex_ids()
            .find(|&v| !self.vertex_normal(v).is_finite())
    }
}

/// Newell's polygon normal. Robust for non-planar and non-convex loops.
pub(crate) fn newell_normal(points: &[DVec3]) -> DVec3 {
    let mut n = DVec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}
