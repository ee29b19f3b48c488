use std::fmt;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{Result, SchemaError};

/// Which part of an endpoint contract a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Body,
    Response(u16),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Body => write!(f, "body"),
            Target::Response(status) => write!(f, "response {status}"),
        }
    }
}

pub(crate) fn compile(endpoint: &str, target: Target, schema: &Value) -> Result<Validator> {
    jsonschema::validator_for(schema).map_err(|err| SchemaError::CompileFailed {
        endpoint: endpoint.to_string(),
        target,
        message: err.to_string(),
    })
}

pub(crate) fn validate_value(
    endpoint: &str,
    target: Target,
    value: &Value,
    validator: &Validator,
) -> Result<()> {
    tracing::trace!(endpoint, %target, "validating payload");

    let mut errors = validator.iter_errors(value);
    if let Some(first) = errors.next() {
        let mut message = first.to_string();
        for err in errors.take(3) {
            message.push_str("; ");
            message.push_str(&err.to_string());
        }
        return Err(SchemaError::ValidationFailed {
            endpoint: endpoint.to_string(),
            target,
            message,
        });
    }

    Ok(())
}
