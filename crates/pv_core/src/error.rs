use thiserror::Error;

use crate::snapshot::MoverId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Mover {id} is not on the possessing side")]
    UnknownCarrier { id: MoverId },

    #[error("Possessing side has no movers")]
    NoCarrier,
}

impl CoreError {
    /// Errors caused by the caller's request rather than by configuration.
    pub fn is_request_error(&self) -> bool {
        match self {
            CoreError::Json(_) => true,
            CoreError::SchemaVersion { .. } => true,
            CoreError::UnknownCarrier { .. } => true,
            CoreError::NoCarrier => true,
            CoreError::InvalidConfig(_) => false,
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
