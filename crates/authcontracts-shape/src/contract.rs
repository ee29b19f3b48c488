use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, ShapeError};
use crate::shape::ShapeDescriptor;

/// Status code of the success response every contract must declare.
pub const SUCCESS: u16 = 200;

/// Documented example payload for an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExample {
    pub name: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorExample {
    pub fn new(name: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            status_code,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Shape of one response status, optionally with an example payload.
///
/// The shape is held behind an `Arc` so that several responses (and several
/// endpoints) can point at one shared descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseShape {
    shape: Arc<ShapeDescriptor>,
    example: Option<ErrorExample>,
}

impl ResponseShape {
    pub fn new(shape: Arc<ShapeDescriptor>) -> Self {
        Self {
            shape,
            example: None,
        }
    }

    pub fn with_example(mut self, example: ErrorExample) -> Self {
        self.example = Some(example);
        self
    }

    pub fn shape(&self) -> &Arc<ShapeDescriptor> {
        &self.shape
    }

    pub fn example(&self) -> Option<&ErrorExample> {
        self.example.as_ref()
    }

    /// The shape's schema with `example` merged in alongside its keywords.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = self.shape.to_json_schema();
        if let (Some(example), Value::Object(map)) = (&self.example, &mut schema) {
            map.insert("example".to_string(), example.to_value());
        }
        schema
    }
}

/// Request body and per-status response shapes of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointContract {
    name: String,
    body: ShapeDescriptor,
    responses: BTreeMap<u16, ResponseShape>,
}

impl EndpointContract {
    pub fn builder(name: impl Into<String>) -> ContractBuilder {
        ContractBuilder {
            name: name.into(),
            body: ShapeDescriptor::object(),
            responses: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &ShapeDescriptor {
        &self.body
    }

    pub fn responses(&self) -> &BTreeMap<u16, ResponseShape> {
        &self.responses
    }

    pub fn response(&self, status: u16) -> Option<&ResponseShape> {
        self.responses.get(&status)
    }

    /// The 200 response. Present on every checked contract.
    pub fn success(&self) -> Option<&ResponseShape> {
        self.response(SUCCESS)
    }

    /// Declared statuses other than 200, ascending.
    pub fn error_statuses(&self) -> Vec<u16> {
        self.responses
            .keys()
            .copied()
            .filter(|status| *status != SUCCESS)
            .collect()
    }

    pub fn statuses(&self) -> Vec<u16> {
        self.responses.keys().copied().collect()
    }

    /// Verify the structural rules every contract must satisfy.
    pub fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ShapeError::EmptyName);
        }

        for (status, response) in &self.responses {
            if !(100..=599).contains(status) {
                return Err(ShapeError::InvalidStatus {
                    endpoint: self.name.clone(),
                    status: *status,
                });
            }
            if let Some(example) = &response.example {
                if example.status_code != *status {
                    return Err(ShapeError::ExampleStatusMismatch {
                        endpoint: self.name.clone(),
                        status: *status,
                        example: example.status_code,
                    });
                }
            }
        }

        if !self.responses.contains_key(&SUCCESS) {
            return Err(ShapeError::MissingSuccess {
                endpoint: self.name.clone(),
            });
        }

        Ok(())
    }

    /// `{ "body": <schema>, "response": { "<status>": <schema>, ... } }`
    pub fn to_json_schema(&self) -> Value {
        let response: Map<String, Value> = self
            .responses
            .iter()
            .map(|(status, shape)| (status.to_string(), shape.to_json_schema()))
            .collect();

        serde_json::json!({
            "body": self.body.to_json_schema(),
            "response": response,
        })
    }
}

/// Incremental construction of an [`EndpointContract`].
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    name: String,
    body: ShapeDescriptor,
    responses: BTreeMap<u16, ResponseShape>,
}

impl ContractBuilder {
    pub fn body(mut self, body: ShapeDescriptor) -> Self {
        self.body = body;
        self
    }

    pub fn response(mut self, status: u16, response: ResponseShape) -> Self {
        self.responses.insert(status, response);
        self
    }

    /// Shorthand for an error response carrying `example`, keyed by its status code.
    pub fn error(self, shape: Arc<ShapeDescriptor>, example: ErrorExample) -> Self {
        let status = example.status_code;
        self.response(status, ResponseShape::new(shape).with_example(example))
    }

    pub fn build(self) -> Result<EndpointContract> {
        let contract = self.assemble();
        contract.check()?;
        tracing::debug!(
            endpoint = contract.name(),
            statuses = ?contract.statuses(),
            "built endpoint contract"
        );
        Ok(contract)
    }

    /// Skips [`EndpointContract::check`]; reserved for the built-in contracts,
    /// whose validity is asserted by tests.
    pub(crate) fn assemble(self) -> EndpointContract {
        EndpointContract {
            name: self.name,
            body: self.body,
            responses: self.responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_shape() -> Arc<ShapeDescriptor> {
        Arc::new(
            ShapeDescriptor::object()
                .text("name")
                .text("message")
                .number("statusCode"),
        )
    }

    fn ok_shape() -> Arc<ShapeDescriptor> {
        Arc::new(ShapeDescriptor::object().text("id"))
    }

    #[test]
    fn example_serializes_with_camel_case_status() {
        let example = ErrorExample::new("NotFound", "missing", 404);
        assert_eq!(
            example.to_value(),
            serde_json::json!({ "name": "NotFound", "message": "missing", "statusCode": 404 })
        );
        assert!(example.to_value().get("status_code").is_none());
    }

    #[test]
    fn build_requires_success_response() {
        let result = EndpointContract::builder("thing")
            .error(error_shape(), ErrorExample::new("NotFound", "missing", 404))
            .build();
        assert_eq!(
            result,
            Err(ShapeError::MissingSuccess {
                endpoint: "thing".to_string()
            })
        );
    }

    #[test]
    fn build_rejects_empty_name() {
        let result = EndpointContract::builder("  ")
            .response(SUCCESS, ResponseShape::new(ok_shape()))
            .build();
        assert_eq!(result, Err(ShapeError::EmptyName));
    }

    #[test]
    fn build_rejects_mismatched_example_status() {
        let result = EndpointContract::builder("thing")
            .response(SUCCESS, ResponseShape::new(ok_shape()))
            .response(
                409,
                ResponseShape::new(error_shape())
                    .with_example(ErrorExample::new("Conflict", "taken", 400)),
            )
            .build();
        assert!(matches!(
            result,
            Err(ShapeError::ExampleStatusMismatch {
                status: 409,
                example: 400,
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_non_http_status() {
        let result = EndpointContract::builder("thing")
            .response(SUCCESS, ResponseShape::new(ok_shape()))
            .response(42, ResponseShape::new(error_shape()))
            .build();
        assert!(matches!(
            result,
            Err(ShapeError::InvalidStatus { status: 42, .. })
        ));
    }

    #[test]
    fn error_statuses_exclude_success() {
        let contract = EndpointContract::builder("thing")
            .response(SUCCESS, ResponseShape::new(ok_shape()))
            .error(error_shape(), ErrorExample::new("NotFound", "missing", 404))
            .error(error_shape(), ErrorExample::new("Conflict", "taken", 409))
            .build()
            .unwrap();

        assert_eq!(contract.statuses(), vec![200, 404, 409]);
        assert_eq!(contract.error_statuses(), vec![404, 409]);
        assert!(contract.success().is_some());
        assert!(contract.response(500).is_none());
    }

    #[test]
    fn response_schema_merges_example() {
        let response = ResponseShape::new(error_shape())
            .with_example(ErrorExample::new("Conflict", "taken", 409));
        let schema = response.to_json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["statusCode"]["type"], "number");
        assert_eq!(schema["example"]["name"], "Conflict");
        assert_eq!(schema["example"]["statusCode"], 409);

        let plain = ResponseShape::new(ok_shape()).to_json_schema();
        assert!(plain.get("example").is_none());
    }

    #[test]
    fn contract_schema_is_keyed_by_status_string() {
        let contract = EndpointContract::builder("thing")
            .body(ShapeDescriptor::object().text("q"))
            .response(SUCCESS, ResponseShape::new(ok_shape()))
            .error(error_shape(), ErrorExample::new("NotFound", "missing", 404))
            .build()
            .unwrap();

        let schema = contract.to_json_schema();
        assert_eq!(schema["body"]["properties"]["q"]["type"], "string");
        assert!(schema["response"]["200"].is_object());
        assert_eq!(schema["response"]["404"]["example"]["statusCode"], 404);
    }
}
