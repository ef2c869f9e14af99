//! # Mesh Edit
//!
//! Half-edge polygon mesh editor: an arena-owned connectivity graph with
//! local topological surgery and global remeshing algorithms.
//!
//! ## Layers
//!
//! ```text
//! global (triangulate, subdivide, remesh, simplify)
//!    │
//! ops (flip, split, collapse, erase, inset, bevel)
//!    │
//! mesh + validate ──► store (arena, handles, deferred erasure)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mesh_edit::primitives;
//!
//! let mut mesh = primitives::icosahedron(1.0).unwrap();
//! let e = mesh.edge_ids().next().unwrap();
//! mesh.flip_edge(e).unwrap();
//! mesh.validate().unwrap();
//! mesh.loop_subdivide().unwrap();
//! assert_eq!(mesh.n_faces(), 80);
//! ```

pub mod buffers;
pub mod error;
pub mod global;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod store;
pub mod validate;

pub use buffers::{BufferVertex, TriangleBuffers};
pub use config::constants::{ConfigError, RemeshConfig, SimplifyConfig};
pub use error::{MeshError, MeshResult, ValidationError};
pub use global::{SubdivisionPositions, SubdivisionScheme};
pub use mesh::HalfedgeMesh;
pub use store::{EdgeId, ElementRef, FaceId, HalfedgeId, VertexId};
