//! # Isotropic Remeshing
//!
//! Drives every edge toward the mean edge length `L` of the input and every
//! vertex toward degree 6.
//!
//! ## Round
//!
//! 1. Split edges longer than `split_ratio · L`
//! 2. Collapse edges shorter than `collapse_ratio · L`
//! 3. Flip edges that lower the total valence deviation
//! 4. Tangential smoothing
//!
//! The mesh is validated and its normals checked after every phase.

use crate::error::{MeshError, MeshResult};
use crate::mesh::{EdgeId, HalfedgeMesh, VertexId};
use config::constants::{RemeshConfig, TARGET_VALENCE};
use glam::DVec3;
use rayon::prelude::*;

const OPERATION: &str = "isotropic_remesh";

impl HalfedgeMesh {
    /// Isotropic remeshing of a closed triangle mesh.
    ///
    /// # Arguments
    ///
    /// * `config` - Round count, thresholds and smoothing parameters
    ///
    /// # Returns
    ///
    /// `Ok(())`, or an error if the mesh is not a closed triangle mesh or
    /// became degenerate. The mesh is left as it was after the failing
    /// phase.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesh_edit::{primitives, RemeshConfig};
    ///
    /// let mut mesh = primitives::triangulated_cube(1.0).unwrap();
    /// mesh.isotropic_remesh(&RemeshConfig::default().with_rounds(2)).unwrap();
    /// assert!(mesh.is_triangle_mesh());
    /// assert!(!mesh.has_boundary());
    /// ```
    pub fn isotropic_remesh(&mut self, config: &RemeshConfig) -> MeshResult<()> {
        self.require_triangles(OPERATION)?;
        self.require_closed(OPERATION)?;
        let mean = self.mean_edge_length();
        if !(mean.is_finite() && mean > 0.0) {
            return Err(MeshError::degenerate(OPERATION, format!("mean edge length {mean}")));
        }
        let split_at = config.split_ratio * mean;
        let collapse_at = config.collapse_ratio * mean;
        log::info!(
            "{OPERATION}: {} vertices, {} faces, L = {mean:.4}, {} rounds",
            self.n_vertices(),
            self.n_faces(),
            config.rounds
        );

        for round in 0..config.rounds {
            let splits = self.remesh_splits(split_at);
            self.end_phase("split")?;
            let collapses = self.remesh_collapses(collapse_at, split_at);
            self.end_phase("collapse")?;
            let flips = self.remesh_flips();
            self.end_phase("flip")?;
            for _ in 0..config.smoothing_passes {
                self.smooth_tangentially(config.smoothing_damping);
            }
            self.end_phase("smooth")?;
            log::debug!(
                "{OPERATION}: round {round}: {splits} splits, {collapses} collapses, {flips} flips"
            );
        }

        log::info!(
            "{OPERATION}: done, {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );
        Ok(())
    }

    fn end_phase(&mut self, phase: &str) -> MeshResult<()> {
        self.validate_phase(OPERATION, phase)?;
        self.require_finite_normals(OPERATION, phase)
    }

    fn remesh_splits(&mut self, split_at: f64) -> usize {
        let long: Vec<EdgeId> = self
            .edge_ids()
            .filter(|&e| self.edge_length(e) > split_at)
            .collect();
        long.into_iter()
            .filter(|&e| self.split_edge(e).is_some())
            .count()
    }

    fn remesh_collapses(&mut self, collapse_at: f64, split_at: f64) -> usize {
        let short: Vec<EdgeId> = self
            .edge_ids()
            .filter(|&e| self.edge_length(e) < collapse_at)
            .collect();
        let mut count = 0;
        for e in short {
            // Earlier collapses may have erased or stretched this edge
            if !self.is_live(e) || self.edge_length(e) >= collapse_at {
                continue;
            }
            let midpoint = self.edge_center(e);
            let (a, b) = self.edge_vertices(e);
            let stretches = self
                .neighbors(a)
                .into_iter()
                .chain(self.neighbors(b))
                .filter(|&u| u != a && u != b)
                .any(|u| self.position(u).distance(midpoint) > split_at);
            if stretches {
                continue;
            }
            if self.collapse_edge(e).is_some() {
                count += 1;
            }
        }
        count
    }

    fn remesh_flips(&mut self) -> usize {
        let edges: Vec<EdgeId> = self.edge_ids().collect();
        let mut count = 0;
        for e in edges {
            let h = self.edge(e).halfedge;
            let t = self.twin(h);
            let (a, b) = (self.origin(h), self.origin(t));
            let c = self.origin(self.prev(h));
            let d = self.origin(self.prev(t));
            let deviation = |v: VertexId, delta: i64| {
                (self.degree(v) as i64 + delta - TARGET_VALENCE).abs()
            };
            let before = deviation(a, 0) + deviation(b, 0) + deviation(c, 0) + deviation(d, 0);
            let after = deviation(a, -1) + deviation(b, -1) + deviation(c, 1) + deviation(d, 1);
            if after < before && self.flip_edge(e).is_some() {
                count += 1;
            }
        }
        count
    }

    /// One pass of damped tangential Laplacian smoothing.
    ///
    /// Displacements are computed for every vertex first, then applied.
    fn smooth_tangentially(&mut self, damping: f64) {
        let ids: Vec<VertexId> = self.vertex_ids().collect();
        let moved: Vec<DVec3> = ids
            .par_iter()
            .map(|&v| {
                let p = self.position(v);
                let n = self.vertex_normal(v);
                let d = self.neighborhood_center(v) - p;
                p + damping * (d - n * n.dot(d))
            })
            .collect();
        for (v, p) in ids.into_iter().zip(moved) {
            self.set_position(v, p);
        }
    }
}
