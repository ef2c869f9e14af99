//! Vertex and edge erasure.

use crate::mesh::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};

impl HalfedgeMesh {
    /// Removes an interior vertex and merges its incident faces into one.
    ///
    /// # Returns
    ///
    /// The merged face, or `None` if `v` lies on a boundary or a neighbor
    /// would be left with fewer than three edges.
    pub fn erase_vertex(&mut self, v: VertexId) -> Option<FaceId> {
        if self.is_stale("erase_vertex", v) {
            return None;
        }
        if self.vertex_on_boundary(v) {
            log::debug!("erase_vertex {v}: boundary vertex");
            return None;
        }
        if let Some(u) = self.neighbors(v).into_iter().find(|&u| self.degree(u) < 4) {
            log::debug!("erase_vertex {v}: neighbor {u} would drop below degree 3");
            return None;
        }

        let outgoing: Vec<HalfedgeId> = self.outgoing(v).collect();
        let n = outgoing.len();
        // Before any rewiring: what follows each spoke, and what precedes its twin
        let after: Vec<HalfedgeId> = outgoing.iter().map(|&h| self.next(h)).collect();
        let before: Vec<HalfedgeId> = outgoing
            .iter()
            .map(|&h| self.prev(self.twin(h)))
            .collect();

        let merged = self.face_of(outgoing[0]);
        for i in 0..n {
            // twin(h_i) sits on the face of h_{i+1}; its predecessor now
            // continues into the face of h_i
            self.halfedge_mut(before[i]).next = after[i];
            let u = self.origin(after[i]);
            self.vertex_mut(u).halfedge = after[i];
        }
        for (i, &h) in outgoing.iter().enumerate() {
            let t = self.twin(h);
            let e = self.edge_of(h);
            let f = self.face_of(h);
            if i > 0 {
                self.erase(f);
            }
            self.erase(h);
            self.erase(t);
            self.erase(e);
        }
        self.erase(v);

        let start = after[0];
        self.face_mut(merged).halfedge = start;
        let mut h = start;
        loop {
            self.halfedge_mut(h).face = merged;
            h = self.next(h);
            if h == start {
                break;
            }
        }
        Some(merged)
    }

    /// Removes an interior edge and merges its two faces.
    ///
    /// # Returns
    ///
    /// The merged face, or `None` if the edge lies on a boundary, both sides
    /// are the same face, or an endpoint would be left dangling.
    pub fn erase_edge(&mut self, e: EdgeId) -> Option<FaceId> {
        if self.is_stale("erase_edge", e) {
            return None;
        }
        if self.edge_on_boundary(e) {
            log::debug!("erase_edge {e}: boundary edge");
            return None;
        }
        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (f, g) = (self.face_of(h), self.face_of(t));
        if f == g {
            log::debug!("erase_edge {e}: both sides on the same face");
            return None;
        }
        let (a, b) = (self.origin(h), self.origin(t));
        if self.degree(a) <= 2 || self.degree(b) <= 2 {
            log::debug!("erase_edge {e}: endpoint would be left with one edge");
            return None;
        }

        let (hn, tn) = (self.next(h), self.next(t));
        let (hp, tp) = (self.prev(h), self.prev(t));
        self.halfedge_mut(hp).next = tn;
        self.halfedge_mut(tp).next = hn;
        self.vertex_mut(a).halfedge = tn;
        self.vertex_mut(b).halfedge = hn;
        self.face_mut(f).halfedge = hn;

        let mut x = tn;
        while x != hn {
            self.halfedge_mut(x).face = f;
            x = self.next(x);
        }

        self.erase(h);
        self.erase(t);
        self.erase(e);
        self.erase(g);
        Some(f)
    }
}
