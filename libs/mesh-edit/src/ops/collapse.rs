//! Edge and face collapse.

use crate::mesh::{EdgeId, FaceId, HalfedgeId, HalfedgeMesh, VertexId};
use glam::DVec3;
use std::collections::HashSet;

impl HalfedgeMesh {
    /// Merges the endpoints of `e` into one vertex at the edge midpoint.
    ///
    /// Adjacent triangles collapse to nothing; larger adjacent polygons and
    /// boundary loops lose one side.
    ///
    /// # Returns
    ///
    /// The merged vertex, or `None` if the collapse would pinch the surface
    /// or leave any vertex with too few edges.
    pub fn collapse_edge(&mut self, e: EdgeId) -> Option<VertexId> {
        if self.is_stale("collapse_edge", e) {
            return None;
        }
        let midpoint = self.edge_center(e);
        self.collapse_edge_to(e, midpoint)
    }

    /// [`HalfedgeMesh::collapse_edge`] with an explicit position for the
    /// merged vertex.
    pub fn collapse_edge_to(&mut self, e: EdgeId, position: DVec3) -> Option<VertexId> {
        if self.is_stale("collapse_edge", e) {
            return None;
        }
        self.collapse_edge_sparing(e, position, &[])
    }

    /// Edge collapse that skips the apex degree rule for `spared` vertices,
    /// which the caller is about to merge as well.
    fn collapse_edge_sparing(
        &mut self,
        e: EdgeId,
        position: DVec3,
        spared: &[VertexId],
    ) -> Option<VertexId> {
        if !self.can_collapse(e, spared) {
            return None;
        }

        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (a, b) = (self.origin(h), self.origin(t));
        let fan: Vec<HalfedgeId> = self.outgoing(a).chain(self.outgoing(b)).collect();

        let m = self.new_vertex();
        self.set_position(m, position);

        for side in [h, t] {
            let f = self.face_of(side);
            let n = self.next(side);
            let p = self.prev(side);
            if !self.is_boundary_face(f) && self.face_degree(f) == 3 {
                // Flap: the two remaining sides fuse into edge(n)
                let (tn, tp) = (self.twin(n), self.twin(p));
                let kept = self.edge_of(n);
                let apex = self.origin(p);
                self.halfedge_mut(tn).twin = tp;
                self.halfedge_mut(tp).twin = tn;
                self.halfedge_mut(tp).edge = kept;
                self.edge_mut(kept).halfedge = tn;
                self.vertex_mut(apex).halfedge = tn;
                let dropped = self.edge_of(p);
                self.erase(dropped);
                self.erase(n);
                self.erase(p);
                self.erase(f);
            } else {
                self.halfedge_mut(p).next = n;
                if self.face(f).halfedge == side {
                    self.face_mut(f).halfedge = n;
                }
            }
        }

        self.erase(h);
        self.erase(t);
        self.erase(e);
        self.erase(a);
        self.erase(b);

        let survivors: Vec<HalfedgeId> = fan
            .into_iter()
            .filter(|&out| self.is_live(out))
            .collect();
        for &out in &survivors {
            self.halfedge_mut(out).vertex = m;
        }
        if let Some(&first) = survivors.first() {
            self.vertex_mut(m).halfedge = first;
        }
        Some(m)
    }

    /// Link-condition and degree checks for an edge collapse.
    fn can_collapse(&self, e: EdgeId, spared: &[VertexId]) -> bool {
        let h = self.edge(e).halfedge;
        let t = self.twin(h);
        let (a, b) = (self.origin(h), self.origin(t));

        let mut flaps = 0usize;
        for side in [h, t] {
            let f = self.face_of(side);
            let degree = self.face_degree(f);
            if self.is_boundary_face(f) {
                if degree <= 3 {
                    log::debug!("collapse_edge {e}: boundary loop {f} would close up");
                    return false;
                }
                continue;
            }
            if degree == 3 {
                flaps += 1;
                let apex = self.origin(self.prev(side));
                if self.degree(apex) < 4 && !spared.contains(&apex) {
                    log::debug!("collapse_edge {e}: apex {apex} would drop below degree 3");
                    return false;
                }
            }
        }

        let on_boundary_a = self.vertex_on_boundary(a);
        let on_boundary_b = self.vertex_on_boundary(b);
        if on_boundary_a && on_boundary_b && !self.edge_on_boundary(e) {
            log::debug!("collapse_edge {e}: interior edge joins two boundary vertices");
            return false;
        }

        let around_a: HashSet<VertexId> = self.neighbors(a).into_iter().collect();
        let shared = self
            .neighbors(b)
            .into_iter()
            .filter(|v| around_a.contains(v))
            .count();
        if shared != flaps {
            log::debug!(
                "collapse_edge {e}: endpoints share {shared} neighbors, expected {flaps}"
            );
            return false;
        }

        let merged = self.degree(a) + self.degree(b) - 2 - flaps;
        let floor = if on_boundary_a || on_boundary_b { 2 } else { 3 };
        if merged < floor {
            log::debug!("collapse_edge {e}: merged vertex would have degree {merged}");
            return false;
        }
        true
    }

    /// Collapses a whole face to a single vertex at its centroid.
    ///
    /// Performed as successive edge collapses. Corners of `f` may pass
    /// through degree 2 along the way since they end up merged too; the
    /// degree rule is checked once on the result. If any step is rejected,
    /// or the result breaks the degree rule, the mesh is restored to its
    /// state before the call.
    pub fn collapse_face(&mut self, f: FaceId) -> Option<VertexId> {
        if self.is_stale("collapse_face", f) {
            return None;
        }
        if self.is_boundary_face(f) {
            log::debug!("collapse_face {f}: boundary loop");
            return None;
        }
        let center = self.face_center(f);
        let corners = self.face_vertices(f);
        let snapshot = self.clone();

        let mut merged: Option<VertexId> = None;
        loop {
            let step = match merged {
                None => Some(self.edge_of(self.face(f).halfedge)),
                // Keep growing the same merged vertex along the face
                Some(m) if self.is_live(f) => self
                    .face_loop(f)
                    .find(|&h| self.origin(h) == m)
                    .map(|h| self.edge_of(h)),
                // The face vanished as a flap; one side remains
                Some(m) => match corners.iter().copied().find(|&c| self.is_live(c)) {
                    Some(c) => self.find_edge(m, c),
                    None => break,
                },
            };
            match step.and_then(|e| self.collapse_edge_sparing(e, center, &corners)) {
                Some(m) => merged = Some(m),
                None => {
                    log::debug!("collapse_face {f}: step rejected, restoring");
                    *self = snapshot;
                    return None;
                }
            }
        }

        if let Some(m) = merged {
            if !self.merged_vertex_is_sound(m) {
                log::debug!("collapse_face {f}: merged vertex {m} breaks the degree rule");
                *self = snapshot;
                return None;
            }
        }
        merged
    }

    /// True if `v` and each of its neighbors keep enough distinct edges:
    /// three for interior vertices, two on the boundary.
    fn merged_vertex_is_sound(&self, v: VertexId) -> bool {
        let floor = |u: VertexId| if self.vertex_on_boundary(u) { 2 } else { 3 };
        let around = self.neighbors(v);
        let distinct: HashSet<VertexId> = around.iter().copied().collect();
        distinct.len() == around.len()
            && !distinct.contains(&v)
            && around.len() >= floor(v)
            && around.iter().all(|&u| self.degree(u) >= floor(u))
    }
}
