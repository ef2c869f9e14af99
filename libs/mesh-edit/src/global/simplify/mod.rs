//! # Quadric Error Simplification
//!
//! Greedy edge-collapse decimation driven by quadric error metrics.
//!
//! ## Algorithm
//!
//! 1. Face quadric from each face plane; vertex quadric = sum over incident faces
//! 2. Edge cost = endpoint quadric sum evaluated at its minimizer
//! 3. Pop the cheapest edge, drop every queued edge touching its endpoints,
//!    collapse to the minimizer, queue the edges around the merged vertex
//! 4. Stop at the edge budget or when the queue runs dry
//!
//! Collapses that would flip a surviving face are skipped.

mod quadric;
mod queue;

pub use queue::EdgeRecord;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{newell_normal, EdgeId, FaceId, HalfedgeMesh, VertexId};
use config::constants::SimplifyConfig;
use glam::{DMat4, DVec3};
use quadric::{optimal_point, plane_quadric, quadric_error};
use queue::EdgeQueue;
use rayon::prelude::*;
use std::collections::HashMap;

const OPERATION: &str = "simplify";

/// Outcome of one [`Simplifier::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplifyStep {
    /// The edge was collapsed into `vertex`.
    Collapsed {
        /// Collapsed edge.
        edge: EdgeId,
        /// Merged vertex.
        vertex: VertexId,
    },
    /// The cheapest edge could not be collapsed and was dropped.
    Rejected(EdgeId),
    /// Nothing left to try.
    Exhausted,
}

/// Incremental quadric simplification state for one mesh.
///
/// # Example
///
/// ```rust
/// use mesh_edit::{primitives, global::{Simplifier, SimplifyStep}};
///
/// let mut mesh = primitives::icosahedron(1.0).unwrap();
/// let mut simplifier = Simplifier::new(&mesh);
/// let step = simplifier.step(&mut mesh);
/// assert!(matches!(step, SimplifyStep::Collapsed { .. } | SimplifyStep::Rejected(_)));
/// assert!(simplifier.is_consistent_with(&mesh));
/// ```
#[derive(Debug, Clone)]
pub struct Simplifier {
    quadrics: HashMap<VertexId, DMat4>,
    queue: EdgeQueue,
    collapses: usize,
}

impl Simplifier {
    /// Builds vertex quadrics and queues every edge of `mesh`.
    pub fn new(mesh: &HalfedgeMesh) -> Self {
        let faces: Vec<FaceId> = mesh.polygon_ids().collect();
        let face_quadrics: Vec<DMat4> = faces
            .par_iter()
            .map(|&f| {
                let corner = mesh.position(mesh.origin(mesh.face(f).halfedge));
                plane_quadric(mesh.face_normal(f), corner)
            })
            .collect();

        let mut quadrics: HashMap<VertexId, DMat4> =
            mesh.vertex_ids().map(|v| (v, DMat4::ZERO)).collect();
        for (&f, q) in faces.iter().zip(&face_quadrics) {
            for v in mesh.face_vertices(f) {
                if let Some(sum) = quadrics.get_mut(&v) {
                    *sum += *q;
                }
            }
        }

        let mut simplifier = Self {
            quadrics,
            queue: EdgeQueue::default(),
            collapses: 0,
        };
        for e in mesh.edge_ids() {
            let record = simplifier.record(mesh, e);
            simplifier.queue.insert(record);
        }
        simplifier
    }

    /// Collapse candidate for `e` from the current vertex quadrics.
    fn record(&self, mesh: &HalfedgeMesh, e: EdgeId) -> EdgeRecord {
        let (a, b) = mesh.edge_vertices(e);
        let q = self.quadric(a) + self.quadric(b);
        let optimal = optimal_point(&q, mesh.edge_center(e));
        EdgeRecord {
            cost: quadric_error(&q, optimal),
            edge: e,
            optimal,
        }
    }

    fn quadric(&self, v: VertexId) -> DMat4 {
        self.quadrics.get(&v).copied().unwrap_or(DMat4::ZERO)
    }

    /// Attempts the cheapest queued collapse.
    ///
    /// A rejected candidate leaves the queue for good. It is queued again
    /// only if a later collapse merges one of its endpoints, which re-queues
    /// every edge around the merged vertex. An edge that becomes legal some
    /// other way is not retried.
    pub fn step(&mut self, mesh: &mut HalfedgeMesh) -> SimplifyStep {
        let Some(best) = self.queue.pop() else {
            return SimplifyStep::Exhausted;
        };
        let (a, b) = mesh.edge_vertices(best.edge);
        let touching: Vec<EdgeId> = mesh
            .outgoing(a)
            .chain(mesh.outgoing(b))
            .map(|h| mesh.edge_of(h))
            .collect();
        let removed: Vec<EdgeRecord> = touching
            .into_iter()
            .filter_map(|e| self.queue.remove(e))
            .collect();

        let collapsed = if mesh.collapse_folds_over(a, b, best.optimal) {
            log::debug!("{OPERATION}: {} would fold a face over", best.edge);
            None
        } else {
            mesh.collapse_edge_to(best.edge, best.optimal)
        };
        let Some(m) = collapsed else {
            for record in removed {
                self.queue.insert(record);
            }
            return SimplifyStep::Rejected(best.edge);
        };

        let merged = self.quadric(a) + self.quadric(b);
        self.quadrics.remove(&a);
        self.quadrics.remove(&b);
        self.quadrics.insert(m, merged);
        let around: Vec<EdgeId> = mesh.outgoing(m).map(|h| mesh.edge_of(h)).collect();
        for e in around {
            let record = self.record(mesh, e);
            self.queue.insert(record);
        }
        self.collapses += 1;
        SimplifyStep::Collapsed {
            edge: best.edge,
            vertex: m,
        }
    }

    /// Number of successful collapses so far.
    pub fn collapses(&self) -> usize {
        self.collapses
    }

    /// Number of queued candidates.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Cheapest queued candidate.
    pub fn peek(&self) -> Option<&EdgeRecord> {
        self.queue.peek()
    }

    /// True if every queued edge is live and joins two live vertices.
    pub fn is_consistent_with(&self, mesh: &HalfedgeMesh) -> bool {
        self.queue.edges().all(|e| {
            mesh.is_live(e) && {
                let (a, b) = mesh.edge_vertices(e);
                mesh.is_live(a) && mesh.is_live(b)
            }
        })
    }
}

impl HalfedgeMesh {
    /// Quadric error simplification of a triangle mesh down to
    /// `config.target_edges(n_edges)` edges.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the budget is met or no legal collapse remains, or
    /// [`MeshError::CannotSimplify`] if the budget was not met and not a
    /// single collapse succeeded.
    ///
    /// Each edge is tried once per change around it: a rejected candidate
    /// is dropped and comes back only when a neighboring collapse re-queues
    /// the edges of its merged vertex. The result can therefore stop above
    /// the budget even though an edge would have become collapsible later.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_edit::{primitives, SimplifyConfig};
    ///
    /// let mut mesh = primitives::icosahedron(1.0).unwrap();
    /// mesh.loop_subdivide().unwrap();
    /// let before = mesh.n_edges();
    /// mesh.simplify(&SimplifyConfig::default()).unwrap();
    /// assert!(mesh.n_edges() < before);
    /// ```
    pub fn simplify(&mut self, config: &SimplifyConfig) -> MeshResult<()> {
        self.require_triangles(OPERATION)?;
        let target = config.target_edges(self.n_edges());
        log::info!(
            "{OPERATION}: {} vertices, {} edges, target {target} edges",
            self.n_vertices(),
            self.n_edges()
        );
        if self.n_edges() <= target {
            return Ok(());
        }

        let mut simplifier = Simplifier::new(self);
        while self.n_edges() > target {
            if simplifier.step(self) == SimplifyStep::Exhausted {
                break;
            }
        }
        self.validate_phase(OPERATION, "collapses")?;

        if simplifier.collapses() == 0 {
            log::warn!("{OPERATION}: no legal collapse");
            return Err(MeshError::CannotSimplify(format!(
                "no legal collapse among {} edges",
                self.n_edges()
            )));
        }
        log::info!(
            "{OPERATION}: done, {} collapses, {} edges",
            simplifier.collapses(),
            self.n_edges()
        );
        Ok(())
    }

    /// True if moving `a` and `b` to `x` would flip or flatten a face that
    /// survives the collapse.
    fn collapse_folds_over(&self, a: VertexId, b: VertexId, x: DVec3) -> bool {
        self.outgoing(a)
            .chain(self.outgoing(b))
            .map(|h| self.face_of(h))
            .filter(|&f| !self.is_boundary_face(f))
            .any(|f| {
                let corners = self.face_vertices(f);
                if corners.contains(&a) && corners.contains(&b) {
                    return false;
                }
                let moved: Vec<DVec3> = corners
                    .iter()
                    .map(|&c| if c == a || c == b { x } else { self.position(c) })
                    .collect();
                newell_normal(&moved).dot(self.face_area_normal(f)) <= 0.0
            })
    }
}
