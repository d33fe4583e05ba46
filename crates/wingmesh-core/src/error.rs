//! Error types for geometry generation

use thiserror::Error;

/// Geometry-related errors
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Unknown discretization kind: {0}")]
    UnknownDiscretization(String),

    #[error("A distribution needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("Unknown mirror plane: {0}")]
    UnknownMirrorPlane(String),

    #[error("Symmetry plane {0} is not supported, only XZ")]
    UnsupportedSymmetryPlane(String),

    #[error("Rotation axis is degenerate: {0:?}")]
    DegenerateAxis([f64; 3]),

    #[error("Grid shape mismatch: expected {expected} points, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid surface parameter: {0}")]
    InvalidSurface(String),

    #[error("Expected {expected} per-surface entries for {what}, got {actual}")]
    ListLengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("A symmetric macro-surface needs an even number of surfaces, got {0}")]
    OddSymmetricSurfaceCount(usize),

    #[error("Node at {0:?} has no number assigned")]
    UnnumberedNode([f64; 3]),

    #[error("Beam orientation vector is parallel to the beam axis")]
    ParallelOrientation,

    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ron::error::SpannedError),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
