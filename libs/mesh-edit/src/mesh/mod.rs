//! # Half-edge Mesh
//!
//! Arena-owned half-edge mesh with stable handles.
//!
//! ## Structure
//!
//! - **Vertex**: position plus one outgoing half-edge
//! - **Edge**: one of its two half-edges
//! - **Half-edge**: next, twin, origin vertex, edge, face
//! - **Face**: one half-edge of its loop, plus a boundary flag for holes
//!
//! Elements are created unlinked by the `new_*` calls and must be wired by
//! the caller. [`HalfedgeMesh::erase`] only marks an element; storage is
//! reclaimed by [`HalfedgeMesh::compact`] or [`HalfedgeMesh::validate`].

pub mod elements;
mod query;

#[cfg(test)]
mod tests;

pub use crate::store::{EdgeId, ElementRef, FaceId, HalfedgeId, VertexId};
pub use elements::{Edge, Face, Halfedge, Vertex};
pub(crate) use query::newell_normal;

use crate::store::ElementStore;
use glam::DVec3;

/// Main half-edge mesh data structure.
///
/// # Example
///
/// ```rust
/// use mesh_edit::primitives;
///
/// let mesh = primitives::cube(1.0).unwrap();
/// assert_eq!(mesh.n_vertices(), 8);
/// assert_eq!(mesh.n_edges(), 12);
/// assert_eq!(mesh.n_faces(), 6);
/// assert!(mesh.check().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HalfedgeMesh {
    pub(crate) vertices: ElementStore<VertexId, Vertex>,
    pub(crate) edges: ElementStore<EdgeId, Edge>,
    pub(crate) halfedges: ElementStore<HalfedgeId, Halfedge>,
    pub(crate) faces: ElementStore<FaceId, Face>,
    /// Set when the mesh's winding is inverted; flips face-bevel normal offsets.
    pub flip_orientation: bool,
}

/// Handle kinds that can be erased through the mesh.
pub trait MeshKey: Copy {
    /// Marks the element for removal. Returns true if it was live.
    fn erase_from(self, mesh: &mut HalfedgeMesh) -> bool;
    /// True if the element is live in `mesh`.
    fn is_live_in(self, mesh: &HalfedgeMesh) -> bool;
}

impl MeshKey for VertexId {
    fn erase_from(self, mesh: &mut HalfedgeMesh) -> bool {
        mesh.vertices.erase(self)
    }
    fn is_live_in(self, mesh: &HalfedgeMesh) -> bool {
        mesh.vertices.is_live(self)
    }
}

impl MeshKey for EdgeId {
    fn erase_from(self, mesh: &mut HalfedgeMesh) -> bool {
        mesh.edges.erase(self)
    }
    fn is_live_in(self, mesh: &HalfedgeMesh) -> bool {
        mesh.edges.is_live(self)
    }
}

impl MeshKey for HalfedgeId {
    fn erase_from(self, mesh: &mut HalfedgeMesh) -> bool {
        mesh.halfedges.erase(self)
    }
    fn is_live_in(self, mesh: &HalfedgeMesh) -> bool {
        mesh.halfedges.is_live(self)
    }
}

impl MeshKey for FaceId {
    fn erase_from(self, mesh: &mut HalfedgeMesh) -> bool {
        mesh.faces.erase(self)
    }
    fn is_live_in(self, mesh: &HalfedgeMesh) -> bool {
        mesh.faces.is_live(self)
    }
}

impl HalfedgeMesh {
    /// Creates a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // ALLOCATION
    // =========================================================================

    /// Allocates an unlinked vertex at the origin.
    pub fn new_vertex(&mut self) -> VertexId {
        self.vertices.insert(Vertex::new(DVec3::ZERO))
    }

    /// Allocates an unlinked edge.
    pub fn new_edge(&mut self) -> EdgeId {
        self.edges.insert(Edge::new())
    }

    /// Allocates an unlinked half-edge.
    pub fn new_halfedge(&mut self) -> HalfedgeId {
        self.halfedges.insert(Halfedge::new())
    }

    /// Allocates an unlinked polygon face.
    pub fn new_face(&mut self) -> FaceId {
        self.faces.insert(Face::new(false))
    }

    /// Allocates an unlinked boundary face.
    pub fn new_boundary_face(&mut self) -> FaceId {
        self.faces.insert(Face::new(true))
    }

    /// Marks an element erased. Idempotent.
    pub fn erase<K: MeshKey>(&mut self, key: K) -> bool {
        key.erase_from(self)
    }

    /// True if the element exists and has not been erased.
    pub fn is_live<K: MeshKey>(&self, key: K) -> bool {
        key.is_live_in(self)
    }

    /// Drops every erased element without validating. Returns the number of
    /// elements freed.
    pub fn compact(&mut self) -> usize {
        self.vertices.compact()
            + self.edges.compact()
            + self.halfedges.compact()
            + self.faces.compact()
    }

    /// Number of elements erased but not yet compacted.
    pub fn pending_erasures(&self) -> usize {
        self.vertices.pending_erasures()
            + self.edges.pending_erasures()
            + self.halfedges.pending_erasures()
            + self.faces.pending_erasures()
    }

    /// Removes every element, invalidating all handles issued so far.
    pub fn clear(&mut self) {
        *self = self.successor();
    }

    /// Empty mesh with the same orientation flag whose handles never alias
    /// this mesh's handles.
    pub(crate) fn successor(&self) -> Self {
        Self {
            vertices: self.vertices.successor(),
            edges: self.edges.successor(),
            halfedges: self.halfedges.successor(),
            faces: self.faces.successor(),
            flip_orientation: self.flip_orientation,
        }
    }

    // =========================================================================
    // COUNTS
    // =========================================================================

    /// Live vertices.
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Live edges.
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Live half-edges.
    pub fn n_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Live polygon faces (boundary loops excluded).
    pub fn n_faces(&self) -> usize {
        self.faces.iter().filter(|(_, f)| !f.boundary).count()
    }

    /// Live boundary loops.
    pub fn n_boundaries(&self) -> usize {
        self.faces.iter().filter(|(_, f)| f.boundary).count()
    }

    // =========================================================================
    // ELEMENT ACCESS
    // =========================================================================

    /// Vertex record.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    /// Edge record.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    /// Half-edge record.
    #[inline]
    pub fn halfedge(&self, id: HalfedgeId) -> &Halfedge {
        &self.halfedges[id]
    }

    /// Face record.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id]
    }

    /// Mutable vertex record.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }

    /// Mutable edge record.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id]
    }

    /// Mutable half-edge record.
    #[inline]
    pub fn halfedge_mut(&mut self, id: HalfedgeId) -> &mut Halfedge {
        &mut self.halfedges[id]
    }

    /// Mutable face record.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id]
    }

    /// Live vertex handles in slot order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys()
    }

    /// Live edge handles in slot order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys()
    }

    /// Live half-edge handles in slot order.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfedgeId> + '_ {
        self.halfedges.keys()
    }

    /// Live face handles in slot order, boundary loops included.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// Live polygon faces in slot order.
    pub fn polygon_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .filter(|(_, f)| !f.boundary)
            .map(|(id, _)| id)
    }

    // =========================================================================
    // LINK SHORTHANDS
    // =========================================================================

    /// `next` of a half-edge.
    #[inline]
    pub fn next(&self, h: HalfedgeId) -> HalfedgeId {
        self.halfedges[h].next
    }

    /// `twin` of a half-edge.
    #[inline]
    pub fn twin(&self, h: HalfedgeId) -> HalfedgeId {
        self.halfedges[h].twin
    }

    /// Vertex a half-edge leaves from.
    #[inline]
    pub fn origin(&self, h: HalfedgeId) -> VertexId {
        self.halfedges[h].vertex
    }

    /// Vertex a half-edge points to.
    #[inline]
    pub fn target(&self, h: HalfedgeId) -> VertexId {
        self.origin(self.twin(h))
    }

    /// Edge of a half-edge.
    #[inline]
    pub fn edge_of(&self, h: HalfedgeId) -> EdgeId {
        self.halfedges[h].edge
    }

    /// Face of a half-edge.
    #[inline]
    pub fn face_of(&self, h: HalfedgeId) -> FaceId {
        self.halfedges[h].face
    }

    /// Half-edge whose `next` is `h`, found by walking the face loop.
    pub fn prev(&self, h: HalfedgeId) -> HalfedgeId {
        let mut current = h;
        loop {
            let next = self.next(current);
            if next == h {
                return current;
            }
            current = next;
        }
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> DVec3 {
        self.vertices[v].position
    }

    /// Moves a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, position: DVec3) {
        self.vertices[v].position = position;
    }

    /// True if `f` is a boundary loop.
    #[inline]
    pub fn is_boundary_face(&self, f: FaceId) -> bool {
        self.faces[f].boundary
    }

    /// Rewires every link of a half-edge at once.
    pub fn set_neighbors(
        &mut self,
        h: HalfedgeId,
        next: HalfedgeId,
        twin: HalfedgeId,
        vertex: VertexId,
        edge: EdgeId,
        face: FaceId,
    ) {
        let he = &mut self.halfedges[h];
        he.next = next;
        he.twin = twin;
        he.vertex = vertex;
        he.edge = edge;
        he.face = face;
    }

    // =========================================================================
    // TRAVERSAL
    // =========================================================================

    /// Outgoing half-edges of `v`, following `twin → next`.
    pub fn outgoing(&self, v: VertexId) -> Outgoing<'_> {
        let start = self.vertices[v].halfedge;
        Outgoing {
            mesh: self,
            start,
            current: Some(start),
            remaining: self.halfedges.capacity_hint(),
        }
    }

    /// Half-edges of the loop of face `f`, starting at its representative.
    pub fn face_loop(&self, f: FaceId) -> FaceLoop<'_> {
        self.loop_from(self.faces[f].halfedge)
    }

    /// Half-edges of the loop containing `h`, starting at `h`.
    pub fn loop_from(&self, h: HalfedgeId) -> FaceLoop<'_> {
        FaceLoop {
            mesh: self,
            start: h,
            current: Some(h),
            remaining: self.halfedges.capacity_hint(),
        }
    }

    /// Vertices of face `f` in loop order.
    pub fn face_vertices(&self, f: FaceId) -> Vec<VertexId> {
        self.face_loop(f).map(|h| self.origin(h)).collect()
    }

    /// Vertices adjacent to `v`, in fan order.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.outgoing(v).map(|h| self.target(h)).collect()
    }
}

// =============================================================================
// ITERATORS
// =============================================================================

/// Iterator over half-edges leaving a vertex.
///
/// Bounded by the number of half-edges ever allocated, so it terminates even
/// on a corrupted fan.
pub struct Outgoing<'a> {
    mesh: &'a HalfedgeMesh,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    remaining: usize,
}

impl Iterator for Outgoing<'_> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        let following = self.mesh.next(self.mesh.twin(current));
        self.current = (following != self.start).then_some(following);
        Some(current)
    }
}

/// Iterator over half-edges around a face.
pub struct FaceLoop<'a> {
    mesh: &'a HalfedgeMesh,
    start: HalfedgeId,
    current: Option<HalfedgeId>,
    remaining: usize,
}

impl Iterator for FaceLoop<'_> {
    type Item = HalfedgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        let following = self.mesh.next(current);
        self.current = (following != self.start).then_some(following);
        Some(current)
    }
}
