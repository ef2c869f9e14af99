//! # Element Handles
//!
//! Typed, copyable references into an [`ElementStore`](super::ElementStore).
//!
//! A handle is a `(generation, index)` pair. The index is the element's slot.
//! A slot reused after compaction, or any slot after a store is cleared, gets
//! a newer generation, turning every older handle to it into a detectably
//! stale one. Handles order by generation, then slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common interface of the typed element handles.
pub trait ElementKey: Copy + Eq + Ord + std::hash::Hash + fmt::Debug {
    /// Builds a handle from its raw parts.
    fn from_parts(generation: u32, index: u32) -> Self;

    /// Store generation the handle was issued in.
    fn generation(self) -> u32;

    /// Slot index inside the store.
    fn index(self) -> u32;
}

macro_rules! element_key {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            generation: u32,
            index: u32,
        }

        impl $name {
            /// Sentinel for a link that has not been wired yet.
            pub const INVALID: Self = Self {
                generation: u32::MAX,
                index: u32::MAX,
            };

            /// Returns false for the unwired sentinel.
            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl ElementKey for $name {
            #[inline]
            fn from_parts(generation: u32, index: u32) -> Self {
                Self { generation, index }
            }

            #[inline]
            fn generation(self) -> u32 {
                self.generation
            }

            #[inline]
            fn index(self) -> u32 {
                self.index
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "{}"), self.index)
                } else {
                    write!(f, concat!($prefix, "<invalid>"))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

element_key!(
    /// Handle to a mesh vertex.
    VertexId,
    "v"
);
element_key!(
    /// Handle to an undirected mesh edge.
    EdgeId,
    "e"
);
element_key!(
    /// Handle to a directed half-edge.
    HalfedgeId,
    "h"
);
element_key!(
    /// Handle to a face (real polygon or boundary loop).
    FaceId,
    "f"
);

/// Reference to any kind of mesh element, used to report where a problem was
/// found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    /// A vertex.
    Vertex(VertexId),
    /// An edge.
    Edge(EdgeId),
    /// A half-edge.
    Halfedge(HalfedgeId),
    /// A face.
    Face(FaceId),
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Vertex(id) => write!(f, "vertex {id}"),
            ElementRef::Edge(id) => write!(f, "edge {id}"),
            ElementRef::Halfedge(id) => write!(f, "half-edge {id}"),
            ElementRef::Face(id) => write!(f, "face {id}"),
        }
    }
}

impl From<VertexId> for ElementRef {
    fn from(id: VertexId) -> Self {
        ElementRef::Vertex(id)
    }
}

impl From<EdgeId> for ElementRef {
    fn from(id: EdgeId) -> Self {
        ElementRef::Edge(id)
    }
}

impl From<HalfedgeId> for ElementRef {
    fn from(id: HalfedgeId) -> Self {
        ElementRef::Halfedge(id)
    }
}

impl From<FaceId> for ElementRef {
    fn from(id: FaceId) -> Self {
        ElementRef::Face(id)
    }
}
