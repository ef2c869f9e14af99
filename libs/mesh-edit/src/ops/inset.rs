//! Inset and extrude.

use crate::mesh::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use glam::DVec3;

impl HalfedgeMesh {
    /// Adds a vertex at the centroid of `f` and connects it to every corner,
    /// turning the n-gon into a fan of n triangles.
    ///
    /// # Returns
    ///
    /// The new vertex, or `None` for a boundary loop.
    pub fn inset_vertex(&mut self, f: FaceId) -> Option<VertexId> {
        if self.is_stale("inset_vertex", f) {
            return None;
        }
        if self.is_boundary_face(f) {
            log::debug!("inset_vertex {f}: boundary loop");
            return None;
        }
        let center = self.face_center(f);
        let sides: Vec<HalfedgeId> = self.face_loop(f).collect();
        let n = sides.len();

        let c = self.new_vertex();
        self.set_position(c, center);
        let spokes: Vec<EdgeId> = (0..n).map(|_| self.new_edge()).collect();
        // Triangle i: sides[i] (u_i -> u_{i+1}), up[i] (u_{i+1} -> c), down[i] (c -> u_i)
        let up: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();
        let down: Vec<HalfedgeId> = (0..n).map(|_| self.new_halfedge()).collect();

        for i in 0..n {
            let j = (i + 1) % n;
            let triangle = self.new_face();
            let u_next = self.origin(sides[j]);
            self.halfedge_mut(sides[i]).next = up[i];
            self.halfedge_mut(sides[i]).face = triangle;
            self.set_neighbors(up[i], down[i], down[j], u_next, spokes[j], triangle);
            self.set_neighbors(down[i], sides[i], up[(i + n - 1) % n], c, spokes[i], triangle);
            self.face_mut(triangle).halfedge = sides[i];
            self.edge_mut(spokes[i]).halfedge = down[i];
        }
        self.vertex_mut(c).halfedge = down[0];
        self.erase(f);
        Some(c)
    }

    /// Bevels `f` and moves the inner face inward by `amount` (0 keeps the
    /// outline, 1 shrinks it to the centroid).
    ///
    /// # Returns
    ///
    /// The inner face.
    pub fn inset_face(&mut self, f: FaceId, amount: f64) -> Option<FaceId> {
        let inner = self.bevel_face(f)?;
        let start = self.face_positions(inner);
        self.bevel_face_positions(inner, &start, amount, 0.0);
        Some(inner)
    }

    /// Bevels `v`, then raises a tip vertex from the centre of the new face.
    ///
    /// # Returns
    ///
    /// The tip vertex, or `None` if `v` cannot be beveled.
    pub fn extrude_vertex(&mut self, v: VertexId) -> Option<VertexId> {
        let face = self.bevel_vertex(v)?;
        self.inset_vertex(face)
    }

    /// Places an extrusion made by [`HalfedgeMesh::extrude_vertex`].
    ///
    /// `start` is the position of the extruded vertex. Each ring vertex
    /// slides from `start` toward the far end of its original edge by
    /// `tangent_offset`; the tip then rises from `start` by `normal_offset`
    /// along the normal of the new fan.
    pub fn extrude_vertex_position(
        &mut self,
        tip: VertexId,
        start: DVec3,
        tangent_offset: f64,
        normal_offset: f64,
    ) {
        if self.is_stale("extrude_vertex_position", tip) {
            return;
        }
        let fan: Vec<FaceId> = self.outgoing(tip).map(|h| self.face_of(h)).collect();
        let ring = self.neighbors(tip);
        for w in ring {
            let far = self
                .outgoing(w)
                .find(|&h| {
                    !fan.contains(&self.face_of(h)) && !fan.contains(&self.face_of(self.twin(h)))
                })
                .map(|h| self.position(self.target(h)));
            if let Some(far) = far {
                self.set_position(w, start + tangent_offset * (far - start));
            }
        }

        self.set_position(tip, start);
        let mut normal = self.vertex_normal(tip);
        if !normal.is_finite() {
            return;
        }
        if self.flip_orientation {
            normal = -normal;
        }
        self.set_position(tip, start + normal_offset * normal);
    }
}
