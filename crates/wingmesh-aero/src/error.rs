//! Error types for flow fields and kernel configuration

use thiserror::Error;
use wingmesh_core::GeometryError;

#[derive(Debug, Error)]
pub enum AeroError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid kernel configuration: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error("Invalid kernel parameter: {0}")]
    InvalidParameter(String),
}

pub type AeroResult<T> = Result<T, AeroError>;
