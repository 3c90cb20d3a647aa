//! Error types
//!
//! The simulation itself never fails; only configuration does.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("emitter capacity must be at least 1")]
    ZeroCapacity,

    #[error("emission rate must be positive, got {0}")]
    InvalidEmissionRate(f32),

    #[error("particle lifetime must be positive, got {0}")]
    InvalidLifetime(f32),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}
