//! Declarative request/response shapes for the auth endpoints.
//!
//! A [`ShapeDescriptor`] lists an object's fields and their primitive kinds.
//! An [`EndpointContract`] pairs a request body shape with the response shapes
//! an endpoint may return, keyed by HTTP status. Nothing here enforces the
//! shapes; see `authcontracts-schema` for validation.
//!
//! The built-in [`register_contract`] and [`login_contract`] share one
//! success shape and one error shape by reference.

pub mod auth;
pub mod contract;
pub mod error;
pub mod openapi;
pub mod shape;

pub use auth::{
    app_error_shape, auth_contracts, auth_result_shape, login_contract,
    register_contract, LOGIN, REGISTER,
};
pub use contract::{ContractBuilder, EndpointContract, ErrorExample, ResponseShape, SUCCESS};
pub use error::{Result, ShapeError};
pub use openapi::openapi_document;
pub use shape::{structurally_equal, Field, FieldKind, ShapeDescriptor};
