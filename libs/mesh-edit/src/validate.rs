//! # Validator
//!
//! Whole-mesh structural check, used after interactive edits and between the
//! phases of every global operator.
//!
//! ## Checks (in order)
//!
//! 1. Every link of every live element resolves to a live element
//! 2. `twin(twin(h)) = h`, twins share their edge and swap endpoints
//! 3. `next` stays on the same face and chains head to tail
//! 4. Each edge owns exactly two half-edges
//! 5. Each face loop closes, has degree ≥ 3 and covers its half-edges
//! 6. Each vertex fan closes and covers its outgoing half-edges
//!
//! Elements are visited in slot order so the first reported violation
//! is deterministic.

use crate::error::ValidationError;
use crate::mesh::{EdgeId, HalfedgeId, HalfedgeMesh};
use crate::store::ElementRef;
use std::collections::{HashMap, HashSet};

type Check = Result<(), ValidationError>;

impl HalfedgeMesh {
    /// Checks every structural invariant without modifying the mesh.
    ///
    /// # Returns
    ///
    /// The first violation found, as an element plus a message.
    pub fn check(&self) -> Check {
        self.check_links()?;
        self.check_halfedges()?;
        self.check_edges()?;
        self.check_faces()?;
        self.check_vertices()?;
        Ok(())
    }

    /// Runs [`HalfedgeMesh::check`], then drops every erased element.
    ///
    /// Nothing is compacted when the check fails, so the erased elements
    /// named in the error remain inspectable.
    pub fn validate(&mut self) -> Check {
        if let Err(err) = self.check() {
            log::debug!("validation failed: {err}");
            return Err(err);
        }
        let freed = self.compact();
        log::trace!("validation ok, compacted {freed} elements");
        Ok(())
    }

    // =========================================================================
    // LINK LIVENESS
    // =========================================================================

    fn check_links(&self) -> Check {
        for (v, vertex) in self.vertices.iter() {
            if !vertex.halfedge.is_valid() {
                return Err(ValidationError::new(v, "isolated vertex (no outgoing half-edge)"));
            }
            self.halfedge_link(v.into(), "half-edge", vertex.halfedge)?;
        }
        for (e, edge) in self.edges.iter() {
            self.halfedge_link(e.into(), "half-edge", edge.halfedge)?;
        }
        for (f, face) in self.faces.iter() {
            self.halfedge_link(f.into(), "half-edge", face.halfedge)?;
        }
        for (h, he) in self.halfedges.iter() {
            self.halfedge_link(h.into(), "next", he.next)?;
            self.halfedge_link(h.into(), "twin", he.twin)?;
            link(
                h.into(),
                "vertex",
                he.vertex,
                self.vertices.is_live(he.vertex),
                self.vertices.is_erased(he.vertex),
            )?;
            link(
                h.into(),
                "edge",
                he.edge,
                self.edges.is_live(he.edge),
                self.edges.is_erased(he.edge),
            )?;
            link(
                h.into(),
                "face",
                he.face,
                self.faces.is_live(he.face),
                self.faces.is_erased(he.face),
            )?;
        }
        Ok(())
    }

    fn halfedge_link(
        &self,
        from: ElementRef,
        field: &str,
        to: HalfedgeId,
    ) -> Check {
        link(
            from,
            field,
            to,
            self.halfedges.is_live(to),
            self.halfedges.is_erased(to),
        )
    }

    // =========================================================================
    // STRUCTURE
    // =========================================================================

    fn check_halfedges(&self) -> Check {
        for h in self.halfedge_ids() {
            let t = self.twin(h);
            if t == h {
                return Err(ValidationError::new(h, "half-edge is its own twin"));
            }
            if self.twin(t) != h {
                return Err(ValidationError::new(
                    h,
                    format!("twin {t} does not point back (twin(twin) = {})", self.twin(t)),
                ));
            }
            if self.edge_of(t) != self.edge_of(h) {
                return Err(ValidationError::new(h, "twin belongs to a different edge"));
            }
            if self.origin(t) == self.origin(h) {
                return Err(ValidationError::new(h, "twin leaves from the same vertex"));
            }
            let n = self.next(h);
            if self.face_of(n) != self.face_of(h) {
                return Err(ValidationError::new(
                    h,
                    format!("next {n} lies on a different face"),
                ));
            }
            if self.origin(n) != self.origin(t) {
                return Err(ValidationError::new(
                    h,
                    format!("next {n} does not start where this half-edge ends"),
                ));
            }
        }
        Ok(())
    }

    fn check_edges(&self) -> Check {
        let mut owners: HashMap<EdgeId, usize> = HashMap::new();
        for h in self.halfedge_ids() {
            *owners.entry(self.edge_of(h)).or_default() += 1;
        }
        for (e, edge) in self.edges.iter() {
            if self.edge_of(edge.halfedge) != e {
                return Err(ValidationError::new(
                    e,
                    "representative half-edge belongs to another edge",
                ));
            }
            let count = owners.get(&e).copied().unwrap_or(0);
            if count != 2 {
                return Err(ValidationError::new(
                    e,
                    format!("edge has {count} half-edges, expected 2"),
                ));
            }
        }
        Ok(())
    }

    fn check_faces(&self) -> Check {
        let limit = self.halfedges.capacity_hint();
        let mut covered: HashSet<HalfedgeId> = HashSet::new();
        for (f, face) in self.faces.iter() {
            if self.face_of(face.halfedge) != f {
                return Err(ValidationError::new(
                    f,
                    "representative half-edge lies on another face",
                ));
            }
            let mut degree = 0usize;
            let mut h = face.halfedge;
            loop {
                covered.insert(h);
                degree += 1;
                h = self.next(h);
                if h == face.halfedge {
                    break;
                }
                if degree > limit {
                    return Err(ValidationError::new(f, "face loop does not close"));
                }
            }
            if degree < 3 {
                return Err(ValidationError::new(
                    f,
                    format!("face has degree {degree}, expected at least 3"),
                ));
            }
        }
        if let Some(h) = self.halfedge_ids().find(|h| !covered.contains(h)) {
            return Err(ValidationError::new(
                h,
                "half-edge is not on the loop of its face",
            ));
        }
        Ok(())
    }

    fn check_vertices(&self) -> Check {
        let limit = self.halfedges.capacity_hint();
        let mut covered: HashSet<HalfedgeId> = HashSet::new();
        for (v, vertex) in self.vertices.iter() {
            let start = vertex.halfedge;
            if self.origin(start) != v {
                return Err(ValidationError::new(
                    v,
                    "representative half-edge does not leave this vertex",
                ));
            }
            let mut steps = 0usize;
            let mut h = start;
            loop {
                if self.origin(h) != v {
                    return Err(ValidationError::new(
                        v,
                        format!("fan reaches {h}, which leaves another vertex"),
                    ));
                }
                covered.insert(h);
                steps += 1;
                h = self.next(self.twin(h));
                if h == start {
                    break;
                }
                if steps > limit {
                    return Err(ValidationError::new(v, "vertex fan does not close"));
                }
            }
        }
        if let Some(h) = self.halfedge_ids().find(|h| !covered.contains(h)) {
            return Err(ValidationError::new(
                h,
                "half-edge is not in the fan of its origin (non-manifold vertex)",
            ));
        }
        Ok(())
    }
}

/// Classifies a link target as live, erased or dangling.
fn link<K: std::fmt::Display>(
    from: ElementRef,
    field: &str,
    to: K,
    live: bool,
    erased: bool,
) -> Check {
    if live {
        Ok(())
    } else if erased {
        Err(ValidationError::new(
            from,
            format!("{field} references erased element {to}"),
        ))
    } else {
        Err(ValidationError::new(
            from,
            format!("{field} references dangling element {to}"),
        ))
    }
}
