//! # Bevel
//!
//! Replace a vertex, edge or face with a new face, then place the new
//! vertices with a separate positions call.
//!
//! The connectivity calls put every new vertex at the position of the
//! element it came from. The `*_positions` calls take those start positions
//! (in the loop order of the returned face, as given by
//! [`HalfedgeMesh::face_positions`]) and recompute only geometry, so they
//! can be re-run on every parameter change.

use crate::mesh::{newell_normal, EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use glam::DVec3;

impl HalfedgeMesh {
    // =========================================================================
    // CONNECTIVITY
    // =========================================================================

    /// Replaces `v` with a face that has one corner on each incident edge.
    ///
    /// # Returns
    ///
    /// The new face, or `None` if `v` has fewer than three edges.
    pub fn bevel_vertex(&mut self, v: VertexId) -> Option<FaceId> {
        if self.is_stale("bevel_vertex", v) {
            return None;
        }
        let spokes: Vec<HalfedgeId> = self.outgoing(v).collect();
        if spokes.len() < 3 {
            log::debug!("bevel_vertex {v}: degree {} is too low", spokes.len());
            return None;
        }
        let face = self.bevel_fan(&spokes);
        self.erase(v);
        Some(face)
    }

    /// Replaces `e` with a face that has one corner on each edge incident to
    /// either endpoint.
    ///
    /// # Returns
    ///
    /// The new face, or `None` if the new face would have fewer than three
    /// sides.
    pub fn bevel_edge(&mut self, e: EdgeId) -> Option<FaceId> {
        if self.is_stale("bevel_edge", e) {
            return None;
        }
        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (a, b) = (self.origin(h), self.origin(t));
        let around_a: Vec<HalfedgeId> = self.outgoing_from(self.next(t), h);
        let around_b: Vec<HalfedgeId> = self.outgoing_from(self.next(h), t);
        if around_a.len() + around_b.len() < 3 {
            log::debug!("bevel_edge {e}: endpoints have too few other edges");
            return None;
        }

        let spokes: Vec<HalfedgeId> = around_a.into_iter().chain(around_b).collect();
        let face = self.bevel_fan(&spokes);
        self.erase(h);
        self.erase(t);
        self.erase(e);
        self.erase(a);
        self.erase(b);
        Some(face)
    }

    /// Shrinks `f` into a new inner face joined to the old outline by a ring
    /// of quads.
    ///
    /// # Returns
    ///
    /// The inner face, or `None` for a boundary loop.
    pub fn bevel_face(&mut self, f: FaceId) -> Option<FaceId> {
        if self.is_stale("bevel_face", f) {
            return None;
        }
        if self.is_boundary_face(f) {
            log::debug!("bevel_face {f}: boundary loop");
            return None;
        }
        let outline: Vec<HalfedgeId> = self.face_loop(f).collect();
        let n = outline.len();

        let inner_face = self.new_face();
        let inner: Vec<VertexId> = outline
            .iter()
            .map(|&h| {
                let w = self.new_vertex();
                let p = self.position(self.origin(h));
                self.set_position(w, p);
                w
            })
            .collect();
        let spokes: Vec<EdgeId> = (0..n).map(|_| self.new_edge()).collect();
        let rims: Vec<EdgeId> = (0..n).map(|_| self.new_edge()).collect();
        // Quad i: outline[i], up (u_{i+1} -> w_{i+1}), across (w_{i+1} -> w_i), down (w_i -> u_i)
        let up: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();
        let across: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();
        let down: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();
        let ring: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();

        for i in 0..n {
            let j = (i + 1) % n;
            let quad = self.new_face();
            let u_next = self.origin(outline[j]);
            self.halfedge_mut(outline[i]).next = up[i];
            self.halfedge_mut(outline[i]).face = quad;
            self.set_neighbors(up[i], across[i], down[j], u_next, spokes[j], quad);
            self.set_neighbors(across[i], down[i], ring[i], inner[j], rims[i], quad);
            self.set_neighbors(down[i], outline[i], up[(i + n - 1) % n], inner[i], spokes[i], quad);
            self.set_neighbors(ring[i], ring[j], across[i], inner[i], rims[i], inner_face);
            self.face_mut(quad).halfedge = outline[i];
            self.edge_mut(spokes[i]).halfedge = down[i];
            self.edge_mut(rims[i]).halfedge = ring[i];
            self.vertex_mut(inner[i]).halfedge = ring[i];
        }
        self.face_mut(inner_face).halfedge = ring[0];
        self.erase(f);
        Some(inner_face)
    }

    /// Outgoing half-edges of `origin(start)` from `start` up to, but not
    /// including, `stop`.
    fn outgoing_from(&self, start: HalfedgeId, stop: HalfedgeId) -> Vec<HalfedgeId> {
        let mut fan = Vec::new();
        let mut h = start;
        while h != stop {
            fan.push(h);
            h = self.next(self.twin(h));
        }
        fan
    }

    /// Detaches the origin of every spoke onto its own new vertex and closes
    /// the gap with a new face.
    ///
    /// Consecutive spokes must be consecutive around the removed region:
    /// `twin(spokes[j])` and `spokes[j + 1]` share a face.
    fn bevel_fan(&mut self, spokes: &[HalfedgeId]) -> FaceId {
        let n = spokes.len();
        let face = self.new_face();
        let corners: Vec<VertexId> = spokes
            .iter()
            .map(|&x| {
                let w = self.new_vertex();
                let p = self.position(self.origin(x));
                self.set_position(w, p);
                w
            })
            .collect();
        let edges: Vec<EdgeId> = (0..n).map(|_| self.new_edge()).collect();
        // outer[j]: w_j -> w_{j+1} on the old face, inner[j]: w_{j+1} -> w_j
        let outer: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();
        let inner: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();

        for j in 0..n {
            let k = (j + 1) % n;
            let incoming = self.twin(spokes[j]);
            let side = self.face_of(incoming);
            self.halfedge_mut(incoming).next = outer[j];
            self.set_neighbors(outer[j], spokes[k], inner[j], corners[j], edges[j], side);
            self.set_neighbors(inner[j], inner[(j + n - 1) % n], outer[j], corners[k], edges[j], face);
            self.face_mut(side).halfedge = outer[j];
            self.edge_mut(edges[j]).halfedge = outer[j];
        }
        for j in 0..n {
            self.halfedge_mut(spokes[j]).vertex = corners[j];
            self.vertex_mut(corners[j]).halfedge = spokes[j];
        }
        self.face_mut(face).halfedge = inner[0];
        face
    }

    // =========================================================================
    // POSITIONS
    // =========================================================================

    /// Current positions of the corners of `f`, in loop order.
    ///
    /// Capture this right after a bevel to get the start positions. Empty
    /// for a face that is no longer live.
    pub fn face_positions(&self, f: FaceId) -> Vec<DVec3> {
        if !self.is_live(f) {
            return Vec::new();
        }
        self.face_loop(f)
            .map(|h| self.position(self.origin(h)))
            .collect()
    }

    /// Slides the corners of a vertex-bevel face along their edges.
    ///
    /// Each corner moves from its start position toward the vertex at the
    /// far end of its edge by `tangent_offset` (0 keeps the start, 1 reaches
    /// the far vertex).
    pub fn bevel_vertex_positions(&mut self, face: FaceId, start: &[DVec3], tangent_offset: f64) {
        self.slide_corners(face, start, tangent_offset);
    }

    /// Slides the corners of an edge-bevel face along their edges.
    pub fn bevel_edge_positions(&mut self, face: FaceId, start: &[DVec3], tangent_offset: f64) {
        self.slide_corners(face, start, tangent_offset);
    }

    /// Places the corners of a face-bevel face.
    ///
    /// Each corner moves toward the centroid of the start positions by
    /// `tangent_offset`, then along the normal of the start polygon by
    /// `normal_offset`. The normal is negated when
    /// [`HalfedgeMesh::flip_orientation`] is set.
    pub fn bevel_face_positions(
        &mut self,
        face: FaceId,
        start: &[DVec3],
        tangent_offset: f64,
        normal_offset: f64,
    ) {
        if start.is_empty() || self.is_stale("bevel_face_positions", face) {
            return;
        }
        let center = start.iter().copied().sum::<DVec3>() / start.len() as f64;
        let mut normal = newell_normal(start).normalize_or_zero();
        if self.flip_orientation {
            normal = -normal;
        }
        let corners: Vec<VertexId> = self.face_vertices(face);
        for (&w, &s) in corners.iter().zip(start) {
            let p = s + tangent_offset * (center - s) + normal_offset * normal;
            self.set_position(w, p);
        }
    }

    fn slide_corners(&mut self, face: FaceId, start: &[DVec3], tangent_offset: f64) {
        if self.is_stale("bevel_positions", face) {
            return;
        }
        let corners: Vec<VertexId> = self.face_vertices(face);
        for (&w, &s) in corners.iter().zip(start) {
            let far = self
                .outgoing(w)
                .find(|&h| self.face_of(h) != face && self.face_of(self.twin(h)) != face)
                .map(|h| self.position(self.target(h)));
            if let Some(far) = far {
                self.set_position(w, s + tangent_offset * (far - s));
            }
        }
    }
}
