//! Error types for normal recomputation.

use thiserror::Error;

/// Result type for normal recomputation.
pub type NormalsResult<T> = Result<T, NormalsError>;

/// Errors that can occur during normal recomputation.
///
/// Degenerate geometry is never an error: zero-area faces and empty sums
/// resolve to zero normals.
#[derive(Debug, Error)]
pub enum NormalsError {
    /// Flat index list does not describe whole triangles.
    #[error("index count {len} is not a multiple of 3")]
    IndexCountNotTriangles {
        /// Length of the index list.
        len: usize,
    },

    /// A triangle references a vertex entry that does not exist.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// The invalid index.
        index: u32,
        /// Total number of vertex entries in the mesh.
        vertex_count: usize,
    },

    /// Smoothing angle is NaN.
    #[error("invalid smoothing angle: {0}")]
    InvalidAngle(f64),

    /// Grid position matching needs a finite, positive cell size.
    #[error("invalid grid cell size: {0} (must be finite and > 0)")]
    InvalidCellSize(f64),

    /// Zero-length threshold is negative or not finite.
    #[error("invalid epsilon: {0} (must be finite and >= 0)")]
    InvalidEpsilon(f64),

    /// Positions and normals describe different vertex counts.
    #[error("length mismatch: {positions} positions, {normals} normals")]
    LengthMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of normals.
        normals: usize,
    },

    /// I/O error while persisting overlay settings.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON.
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
