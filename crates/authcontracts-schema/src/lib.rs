//! JSON Schema validation of auth endpoint bodies and responses.
//!
//! [`ContractRegistry`] compiles every shape of an
//! [`EndpointContract`](authcontracts_shape::EndpointContract) into a JSON
//! Schema 2020-12 validator once, then checks request bodies and response
//! payloads against them. It is the validation layer the shape crate only
//! describes.

pub mod config;
pub mod error;
pub mod registry;
mod strict;
pub mod validator;

pub use config::RegistryConfig;
pub use error::{Result, SchemaError};
pub use registry::ContractRegistry;
pub use validator::Target;
