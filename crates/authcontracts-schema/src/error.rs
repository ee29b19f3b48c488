use authcontracts_shape::ShapeError;

use crate::validator::Target;

/// Errors that can occur during contract registration and validation.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The contract failed its structural checks.
    #[error("invalid contract: {0}")]
    InvalidContract(#[from] ShapeError),

    /// A schema rendered from the contract could not be compiled.
    #[error("failed to compile {target} schema for {endpoint}: {message}")]
    CompileFailed {
        endpoint: String,
        target: Target,
        message: String,
    },

    /// The payload failed schema validation.
    #[error("validation failed on {endpoint} {target}: {message}")]
    ValidationFailed {
        endpoint: String,
        target: Target,
        message: String,
    },

    /// The payload is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No contract registered for the given endpoint.
    #[error("no contract registered for endpoint {0}")]
    NoContract(String),

    /// The contract does not document the given response status.
    #[error("endpoint {endpoint} does not declare response status {status}")]
    UndeclaredStatus { endpoint: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
