//! Request/response contracts for the auth `register` and `login` endpoints.
//!
//! # Crate Structure
//!
//! - [`shape`]: declarative shapes, endpoint contracts, OpenAPI rendering
//! - [`schema`]: compiled JSON Schema validation of bodies and responses
//!
//! The `authcontracts` binary (behind the `cli` feature) lists, renders and
//! validates payloads against the built-in contracts.

/// Re-export shape types.
pub mod shape {
    pub use authcontracts_shape::*;
}

/// Re-export schema validation types.
pub mod schema {
    pub use authcontracts_schema::*;
}
