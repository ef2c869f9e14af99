//! # Error Types
//!
//! Error types for mesh editing.
//!
//! ## Error Policy
//!
//! - Local operators never error: a rejected edit returns `None` and leaves
//!   the mesh untouched
//! - Global operators abort with a [`MeshError`] and never try to heal the mesh
//! - The validator reports the first violation as a [`ValidationError`]

use crate::store::ElementRef;
use thiserror::Error;

// =============================================================================
// VALIDATION ERROR
// =============================================================================

/// First structural invariant violation found by the validator.
///
/// ## Example
///
/// ```rust
/// use mesh_edit::{ValidationError, store::{ElementRef, VertexId}};
///
/// let err = ValidationError::new(VertexId::INVALID, "isolated vertex");
/// assert!(matches!(err.element, ElementRef::Vertex(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{element}: {message}")]
pub struct ValidationError {
    /// Element at which the violation was detected.
    pub element: ElementRef,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for any element kind.
    pub fn new(element: impl Into<ElementRef>, message: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// MESH ERROR
// =============================================================================

/// Errors reported by mesh construction and global operators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The mesh failed validation between phases.
    #[error("invalid mesh: {0}")]
    Validation(#[from] ValidationError),

    /// Vertex/index buffers do not describe a manifold polygon mesh.
    #[error("invalid buffers: {0}")]
    InvalidBuffers(String),

    /// The operator requires every face to be a triangle.
    #[error("{operation} requires a triangle mesh; face {face} has degree {degree}")]
    NotTriangleMesh {
        /// Operator that was invoked.
        operation: &'static str,
        /// Offending face, formatted.
        face: String,
        /// Its degree.
        degree: usize,
    },

    /// The operator requires a closed mesh.
    #[error("{operation} requires a mesh without boundary")]
    HasBoundary {
        /// Operator that was invoked.
        operation: &'static str,
    },

    /// Geometry became degenerate (non-finite normals, zero-length edges).
    #[error("{operation}: degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Operator that was invoked.
        operation: &'static str,
        /// Description of the degeneracy.
        message: String,
    },

    /// A shape or operator parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Simplification could not perform a single collapse.
    #[error("cannot simplify: {0}")]
    CannotSimplify(String),
}

impl MeshError {
    /// Creates an invalid buffers error.
    pub fn buffers(message: impl Into<String>) -> Self {
        Self::InvalidBuffers(message.into())
    }

    /// Creates an invalid parameter error.
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(operation: &'static str, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            operation,
            message: message.into(),
        }
    }
}

/// Result alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
