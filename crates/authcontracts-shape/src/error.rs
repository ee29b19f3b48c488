/// Errors raised while assembling an endpoint contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// The contract has no endpoint name.
    #[error("endpoint name must not be empty")]
    EmptyName,

    /// The contract does not declare a 200 response.
    #[error("endpoint {endpoint} has no success (200) response")]
    MissingSuccess { endpoint: String },

    /// A response is keyed by something that is not an HTTP status code.
    #[error("endpoint {endpoint} declares invalid status code {status}")]
    InvalidStatus { endpoint: String, status: u16 },

    /// An error example carries a status code other than the one it documents.
    #[error("endpoint {endpoint} response {status} carries example with statusCode {example}")]
    ExampleStatusMismatch {
        endpoint: String,
        status: u16,
        example: u16,
    },
}

pub type Result<T> = std::result::Result<T, ShapeError>;
