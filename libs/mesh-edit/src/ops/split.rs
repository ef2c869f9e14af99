//! Edge bisection and triangle-preserving edge split.

use crate::mesh::{EdgeId, HalfedgeId, HalfedgeMesh, VertexId};

/// Elements produced by [`HalfedgeMesh::split_edge_detailed`].
#[derive(Debug, Clone)]
pub(crate) struct EdgeSplit {
    /// The midpoint vertex.
    pub vertex: VertexId,
    /// The two halves of the original edge; the first is the original edge.
    pub halves: [EdgeId; 2],
    /// Edges from the midpoint to the opposite corners of split triangles.
    pub crossing: Vec<EdgeId>,
}

impl HalfedgeMesh {
    /// Inserts a vertex at the midpoint of `e`, splitting only the edge.
    ///
    /// Both adjacent faces gain one side. Rejects only a handle that is no
    /// longer live.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_edit::primitives;
    ///
    /// let mut mesh = primitives::cube(2.0).unwrap();
    /// let e = mesh.edge_ids().next().unwrap();
    /// let v = mesh.bisect_edge(e).unwrap();
    /// assert_eq!(mesh.degree(v), 2);
    /// assert_eq!(mesh.n_faces(), 6);
    /// assert!(mesh.check().is_ok());
    /// ```
    pub fn bisect_edge(&mut self, e: EdgeId) -> Option<VertexId> {
        if self.is_stale("bisect_edge", e) {
            return None;
        }
        let (v, _) = self.bisect(e);
        Some(v)
    }

    /// Splits `e` at its midpoint and connects the new vertex to the
    /// opposite corner of each adjacent triangle.
    ///
    /// Boundary sides are only bisected.
    ///
    /// # Returns
    ///
    /// The new vertex, or `None` if an adjacent polygon is not a triangle.
    pub fn split_edge(&mut self, e: EdgeId) -> Option<VertexId> {
        self.split_edge_detailed(e).map(|split| split.vertex)
    }

    pub(crate) fn split_edge_detailed(&mut self, e: EdgeId) -> Option<EdgeSplit> {
        if self.is_stale("split_edge", e) {
            return None;
        }
        let h = self.edge(e).halfedge;
        for side in [h, self.twin(h)] {
            let f = self.face_of(side);
            if !self.is_boundary_face(f) && self.face_degree(f) != 3 {
                log::debug!("split_edge {e}: adjacent face {f} is not a triangle");
                return None;
            }
        }

        let (v, second) = self.bisect(e);
        let mut crossing = Vec::with_capacity(2);
        let outgoing: Vec<HalfedgeId> = self.outgoing(v).collect();
        for out in outgoing {
            if self.is_boundary_face(self.face_of(out)) {
                continue;
            }
            // Loop is v -> x -> apex -> w -> v
            let apex_side = self.next(self.next(out));
            crossing.push(self.connect(out, apex_side).edge);
        }

        Some(EdgeSplit {
            vertex: v,
            halves: [e, second],
            crossing,
        })
    }

    /// Shared midpoint insertion. Returns the vertex and the new edge.
    ///
    /// `h` keeps `a -> v` on edge `e`; the new edge carries `v -> b`.
    fn bisect(&mut self, e: EdgeId) -> (VertexId, EdgeId) {
        let midpoint = self.edge_center(e);
        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (f, g) = (self.face_of(h), self.face_of(t));
        let (hn, tn) = (self.next(h), self.next(t));

        let v = self.new_vertex();
        self.set_position(v, midpoint);
        let e2 = self.new_edge();
        let h2 = self.new_halfedge();
        let t2 = self.new_halfedge();

        // f: h (a -> v), h2 (v -> b)
        // g: t (b -> v), t2 (v -> a)
        self.set_neighbors(h2, hn, t, v, e2, f);
        self.set_neighbors(t2, tn, h, v, e, g);
        self.halfedge_mut(h).next = h2;
        self.halfedge_mut(h).twin = t2;
        self.halfedge_mut(t).next = t2;
        self.halfedge_mut(t).twin = h2;
        self.halfedge_mut(t).edge = e2;

        self.edge_mut(e).halfedge = h;
        self.edge_mut(e2).halfedge = h2;
        self.vertex_mut(v).halfedge = h2;

        (v, e2)
    }
}
