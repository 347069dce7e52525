use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrandError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Attribute error: {0}")]
    Attribute(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StrandError>;
