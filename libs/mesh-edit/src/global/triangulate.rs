//! Fan triangulation.

use crate::error::MeshResult;
use crate::mesh::{FaceId, HalfedgeMesh};

impl HalfedgeMesh {
    /// Splits every polygon with more than three sides into a fan of
    /// triangles around its representative corner. No vertices are added.
    ///
    /// Idempotent on a triangle mesh.
    pub fn triangulate(&mut self) -> MeshResult<()> {
        log::info!(
            "triangulate: {} vertices, {} faces",
            self.n_vertices(),
            self.n_faces()
        );
        let polygons: Vec<FaceId> = self
            .polygon_ids()
            .filter(|&f| self.face_degree(f) > 3)
            .collect();
        for f in polygons {
            let mut anchor = self.face(f).halfedge;
            // Each cut peels one triangle off and leaves the rest on the new face
            while self.face_degree(self.face_of(anchor)) > 3 {
                let target = self.next(self.next(anchor));
                anchor = self.connect(anchor, target).forward;
            }
        }
        self.validate_phase("triangulate", "fan split")?;
        log::info!("triangulate: done, {} faces", self.n_faces());
        Ok(())
    }
}
