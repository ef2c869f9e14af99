//! # Local Operators
//!
//! Topology-editing primitives. Every operator either succeeds, leaving a
//! well-formed mesh and returning the element of interest, or rejects with
//! `None` and leaves the mesh untouched.
//!
//! ## Catalog
//!
//! | operator | effect |
//! |---|---|
//! | `flip_edge` | rotate an interior edge inside its two faces |
//! | `split_edge` | new midpoint vertex, adjacent triangles stay triangles |
//! | `bisect_edge` | new midpoint vertex, adjacent faces gain a side |
//! | `collapse_edge` / `collapse_face` | merge vertices into one |
//! | `erase_vertex` / `erase_edge` | merge the surrounding faces |
//! | `inset_vertex` | turn an n-gon into a triangle fan |
//! | `bevel_*` | replace an element with a new face |
//! | `extrude_vertex` | bevel a vertex, then raise a tip from the new face |
//!
//! Rejections are logged at debug level with the reason. Handles that are
//! erased, compacted or from a cleared mesh are rejected the same way.

mod bevel;
mod collapse;
mod erase;
mod flip;
mod inset;
mod split;


pub(crate) use split::EdgeSplit;

use crate::mesh::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, MeshKey};
use std::fmt::Display;

/// Result of splitting a face with a new edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Connection {
    /// The new edge.
    pub edge: EdgeId,
    /// Face created on the side of `hb`.
    pub face: FaceId,
    /// New half-edge from `origin(ha)` to `origin(hb)`, on the new face.
    pub forward: HalfedgeId,
}

impl HalfedgeMesh {
    /// True, with a debug log, if `key` is erased, compacted or from an
    /// older generation. Operators reject such handles before touching links.
    pub(crate) fn is_stale<K: MeshKey + Display>(&self, op: &str, key: K) -> bool {
        let stale = !self.is_live(key);
        if stale {
            log::debug!("{op} {key}: handle is not live");
        }
        stale
    }

    /// Splits the face of `ha` with a new edge from `origin(ha)` to
    /// `origin(hb)`.
    ///
    /// `ha` and `hb` must lie on the same face and must not be consecutive.
    /// The loop through `ha` keeps the old face; the loop through `hb` gets a
    /// new face of the same kind.
    pub(crate) fn connect(&mut self, ha: HalfedgeId, hb: HalfedgeId) -> Connection {
        let f = self.face_of(ha);
        let pa = self.prev(ha);
        let pb = self.prev(hb);
        let a = self.origin(ha);
        let b = self.origin(hb);

        let e = self.new_edge();
        let g = if self.is_boundary_face(f) {
            self.new_boundary_face()
        } else {
            self.new_face()
        };
        let n0 = self.new_halfedge();
        let n1 = self.new_halfedge();

        self.set_neighbors(n0, hb, n1, a, e, g);
        self.set_neighbors(n1, ha, n0, b, e, f);
        self.halfedge_mut(pa).next = n0;
        self.halfedge_mut(pb).next = n1;
        self.edge_mut(e).halfedge = n0;
        self.face_mut(f).halfedge = n1;
        self.face_mut(g).halfedge = n0;

        let mut h = hb;
        while h != n0 {
            self.halfedge_mut(h).face = g;
            h = self.next(h);
        }
        self.halfedge_mut(n0).face = g;

        Connection {
            edge: e,
            face: g,
            forward: n0,
        }
    }
}
