//! # Global Operators
//!
//! Whole-mesh algorithms built on the local operators and the arena.
//!
//! | operator | requires | strategy |
//! |---|---|---|
//! | `triangulate` | - | fan split of every n-gon |
//! | `subdivide` (linear, Catmull-Clark) | closed mesh for Catmull-Clark | positions, then rebuild |
//! | `loop_subdivide` | triangles | split, flip, commit |
//! | `isotropic_remesh` | closed triangle mesh | split, collapse, flip, smooth |
//! | `simplify` | triangles | quadric error edge collapses |
//!
//! Every operator validates the mesh between phases and aborts with a
//! [`MeshError`](crate::MeshError) on the first failure.

mod remesh;
mod simplify;
mod subdivide;
mod triangulate;


pub use simplify::{EdgeRecord, Simplifier, SimplifyStep};
pub use subdivide::{SubdivisionPositions, SubdivisionScheme};

use crate::error::{MeshError, MeshResult};
use crate::mesh::HalfedgeMesh;

impl HalfedgeMesh {
    /// Fails unless every polygon is a triangle.
    pub(crate) fn require_triangles(&self, operation: &'static str) -> MeshResult<()> {
        match self.polygon_ids().find(|&f| self.face_degree(f) != 3) {
            Some(f) => Err(MeshError::NotTriangleMesh {
                operation,
                face: f.to_string(),
                degree: self.face_degree(f),
            }),
            None => Ok(()),
        }
    }

    /// Fails if the mesh has a boundary loop.
    pub(crate) fn require_closed(&self, operation: &'static str) -> MeshResult<()> {
        if self.has_boundary() {
            Err(MeshError::HasBoundary { operation })
        } else {
            Ok(())
        }
    }

    /// Validates and compacts between phases, logging the abort.
    pub(crate) fn validate_phase(&mut self, operation: &'static str, phase: &str) -> MeshResult<()> {
        self.validate().map_err(|err| {
            log::warn!("{operation}: aborting after {phase}: {err}");
            MeshError::from(err)
        })
    }

    /// Fails if any vertex normal is not finite.
    pub(crate) fn require_finite_normals(&self, operation: &'static str, phase: &str) -> MeshResult<()> {
        match self.check_finite_normals() {
            Some(v) => {
                log::warn!("{operation}: non-finite normal at {v} after {phase}");
                Err(MeshError::degenerate(
                    operation,
                    format!("vertex {v} has a non-finite normal after {phase}"),
                ))
            }
            None => Ok(()),
        }
    }
}
