//! Edge flip.

use crate::mesh::{EdgeId, HalfedgeMesh};

impl HalfedgeMesh {
    /// Rotates an interior edge one step counter-clockwise inside its two
    /// faces.
    ///
    /// ```text
    ///        c                 c
    ///      / | \             /   \
    ///     a  |  b    ──►    a ──── b
    ///      \ | /             \   /
    ///        d                 d
    /// ```
    ///
    /// Vertex count and face count are unchanged. For two triangles this is
    /// the classic diagonal swap; for polygons each face keeps its degree.
    ///
    /// # Returns
    ///
    /// The same edge, or `None` if the edge lies on a boundary, if an
    /// endpoint would be left with a single edge, or if the rotated edge
    /// would duplicate an existing one.
    pub fn flip_edge(&mut self, e: EdgeId) -> Option<EdgeId> {
        if self.is_stale("flip_edge", e) {
            return None;
        }
        if self.edge_on_boundary(e) {
            log::debug!("flip_edge {e}: boundary edge");
            return None;
        }
        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (a, b) = (self.origin(h), self.origin(t));
        if self.face_of(h) == self.face_of(t) {
            log::debug!("flip_edge {e}: both sides on the same face");
            return None;
        }
        if self.degree(a) <= 2 || self.degree(b) <= 2 {
            log::debug!("flip_edge {e}: endpoint degree too low");
            return None;
        }

        let hn = self.next(h);
        let tn = self.next(t);
        let c = self.target(hn);
        let d = self.target(tn);
        if c == d || c == a || d == b || self.find_edge(c, d).is_some() {
            log::debug!("flip_edge {e}: rotated edge {d}-{c} would be degenerate");
            return None;
        }

        let f = self.face_of(h);
        let g = self.face_of(t);
        let hp = self.prev(h);
        let tp = self.prev(t);
        let hnn = self.next(hn);
        let tnn = self.next(tn);

        // f: hp -> tn -> h -> hnn
        self.halfedge_mut(hp).next = tn;
        self.halfedge_mut(tn).next = h;
        self.halfedge_mut(tn).face = f;
        self.halfedge_mut(h).next = hnn;
        self.halfedge_mut(h).vertex = d;

        // g: tp -> hn -> t -> tnn
        self.halfedge_mut(tp).next = hn;
        self.halfedge_mut(hn).next = t;
        self.halfedge_mut(hn).face = g;
        self.halfedge_mut(t).next = tnn;
        self.halfedge_mut(t).vertex = c;

        self.vertex_mut(a).halfedge = tn;
        self.vertex_mut(b).halfedge = hn;
        self.face_mut(f).halfedge = h;
        self.face_mut(g).halfedge = t;

        Some(e)
    }
}
