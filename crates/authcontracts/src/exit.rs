use std::fmt;
use std::io;

use authcontracts_schema::SchemaError;

// sysexits-style exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match &err {
        SchemaError::ValidationFailed { .. } | SchemaError::InvalidJson(_) => DATA_INVALID,
        SchemaError::NoContract(_) | SchemaError::UndeclaredStatus { .. } => USAGE,
        SchemaError::InvalidContract(_) | SchemaError::CompileFailed { .. } => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn unknown_endpoint(endpoint: &str) -> CliError {
    CliError::new(USAGE, format!("unknown endpoint: {endpoint}"))
}
