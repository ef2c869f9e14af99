//! # Mesh Elements
//!
//! The four element kinds of the half-edge structure. Elements only hold
//! handles to each other; the [`HalfedgeMesh`](super::HalfedgeMesh) arenas
//! own all of them.
//!
//! ```text
//!            twin
//!     v1 ◄────────── v0
//!      │  ─────────►  ▲
//!      │   halfedge   │
//!  next▼    (face)    │
//!      └──────────────┘
//! ```

use super::{EdgeId, FaceId, HalfedgeId, VertexId};
use glam::DVec3;

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// 3D position.
    pub position: DVec3,
    /// One outgoing half-edge.
    pub halfedge: HalfedgeId,
}

impl Vertex {
    /// Creates an unlinked vertex at `position`.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            halfedge: HalfedgeId::INVALID,
        }
    }
}

/// An undirected edge, represented by one of its two half-edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Either of the two half-edges of this edge.
    pub halfedge: HalfedgeId,
}

impl Edge {
    /// Creates an unlinked edge.
    pub fn new() -> Self {
        Self {
            halfedge: HalfedgeId::INVALID,
        }
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed half-edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Halfedge {
    /// Next half-edge around the same face.
    pub next: HalfedgeId,
    /// Opposite half-edge of the same edge.
    pub twin: HalfedgeId,
    /// Vertex this half-edge leaves from.
    pub vertex: VertexId,
    /// Edge this half-edge belongs to.
    pub edge: EdgeId,
    /// Face on the left of this half-edge.
    pub face: FaceId,
}

impl Halfedge {
    /// Creates a half-edge with every link unwired.
    pub fn new() -> Self {
        Self {
            next: HalfedgeId::INVALID,
            twin: HalfedgeId::INVALID,
            vertex: VertexId::INVALID,
            edge: EdgeId::INVALID,
            face: FaceId::INVALID,
        }
    }
}

impl Default for Halfedge {
    fn default() -> Self {
        Self::new()
    }
}

/// A face: either a real polygon or a boundary loop around a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// One half-edge of the face loop.
    pub halfedge: HalfedgeId,
    /// True if this face stands for a hole rather than a polygon.
    pub boundary: bool,
}

impl Face {
    /// Creates an unlinked face.
    pub fn new(boundary: bool) -> Self {
        Self {
            halfedge: HalfedgeId::INVALID,
            boundary,
        }
    }
}
