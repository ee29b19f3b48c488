//! OpenAPI rendering of endpoint contracts for documentation generators.
//!
//! HTTP paths and methods live outside these contracts, so operations are
//! emitted under the `x-contracts` extension, keyed by endpoint name.

use serde_json::{json, Map, Value};

use crate::contract::{EndpointContract, ResponseShape, SUCCESS};

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Build an OpenAPI document describing `contracts`.
pub fn openapi_document(title: &str, version: &str, contracts: &[&EndpointContract]) -> Value {
    let operations: Map<String, Value> = contracts
        .iter()
        .map(|contract| (contract.name().to_string(), operation(contract)))
        .collect();

    json!({
        "openapi": OPENAPI_VERSION,
        "info": { "title": title, "version": version },
        "paths": {},
        "x-contracts": operations,
    })
}

fn operation(contract: &EndpointContract) -> Value {
    let responses: Map<String, Value> = contract
        .responses()
        .iter()
        .map(|(status, response)| (status.to_string(), response_object(*status, response)))
        .collect();

    json!({
        "operationId": contract.name(),
        "requestBody": {
            "content": {
                "application/json": { "schema": contract.body().to_json_schema() }
            }
        },
        "responses": responses,
    })
}

fn response_object(status: u16, response: &ResponseShape) -> Value {
    let description = match (status, response.example()) {
        (SUCCESS, _) => "Success".to_string(),
        (_, Some(example)) => example.message.clone(),
        (status, None) => format!("Status {status}"),
    };

    let mut media = Map::new();
    media.insert("schema".to_string(), response.shape().to_json_schema());
    if let Some(example) = response.example() {
        media.insert("example".to_string(), example.to_value());
    }

    json!({
        "description": description,
        "content": { "application/json": media },
    })
}
