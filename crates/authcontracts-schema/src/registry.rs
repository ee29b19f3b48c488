use std::collections::{BTreeMap, HashMap};

use authcontracts_shape::{auth_contracts, EndpointContract};
use jsonschema::Validator;
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::strict::close_objects;
use crate::validator::{compile, validate_value, Target};

struct CompiledContract {
    contract: EndpointContract,
    body: Validator,
    responses: BTreeMap<u16, Validator>,
}

/// Endpoint-keyed registry of compiled body and response validators.
///
/// Built once and then only read; safe to share between request handlers.
pub struct ContractRegistry {
    contracts: HashMap<String, CompiledContract>,
    config: RegistryConfig,
}

impl ContractRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            contracts: HashMap::new(),
            config,
        }
    }

    /// Registry holding the built-in register and login contracts.
    pub fn auth() -> Result<Self> {
        Self::auth_with_config(RegistryConfig::default())
    }

    /// Registry holding the built-in contracts, with explicit config.
    pub fn auth_with_config(config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        for contract in auth_contracts() {
            registry.register(contract)?;
        }
        Ok(registry)
    }

    /// Build a registry from a list of contracts with default config.
    pub fn from_contracts(contracts: &[&EndpointContract]) -> Result<Self> {
        Self::from_contracts_with_config(contracts, RegistryConfig::default())
    }

    /// Build a registry from a list of contracts with explicit config.
    pub fn from_contracts_with_config(
        contracts: &[&EndpointContract],
        config: RegistryConfig,
    ) -> Result<Self> {
        let mut registry = Self::with_config(config);
        for contract in contracts {
            registry.register(contract)?;
        }
        Ok(registry)
    }

    /// Compile and register a contract, replacing any contract with the same name.
    pub fn register(&mut self, contract: &EndpointContract) -> Result<()> {
        contract.check()?;
        let endpoint = contract.name();

        let body_schema = contract.body().to_json_schema();
        let body = self.compile_schema(endpoint, Target::Body, body_schema)?;
        let mut responses = BTreeMap::new();
        for (status, response) in contract.responses() {
            let validator = self.compile_schema(
                endpoint,
                Target::Response(*status),
                response.to_json_schema(),
            )?;
            responses.insert(*status, validator);
        }

        let replaced = self
            .contracts
            .insert(
                endpoint.to_string(),
                CompiledContract {
                    contract: contract.clone(),
                    body,
                    responses,
                },
            )
            .is_some();
        tracing::debug!(
            endpoint,
            statuses = ?contract.statuses(),
            strict = self.config.strict_mode,
            replaced,
            "registered endpoint contract"
        );
        Ok(())
    }

    fn compile_schema(
        &self,
        endpoint: &str,
        target: Target,
        mut schema: Value,
    ) -> Result<Validator> {
        if self.config.strict_mode {
            close_objects(&mut schema);
        }
        compile(endpoint, target, &schema)
    }

    /// Validate a raw request body against the endpoint's body shape.
    pub fn validate_body(&self, endpoint: &str, payload: &[u8]) -> Result<()> {
        let value: Value = serde_json::from_slice(payload)?;
        self.validate_body_value(endpoint, &value)
    }

    /// Validate an already-parsed request body.
    /// Validate an already-parsed request body.
    pub fn validate_body_value(&self, endpoint: &str, value: &Value) -> Result<()> {
        match self.contracts.get(endpoint) {
            Some(compiled) => validate_value(endpoint, Target::Body, value, &compiled.body),
            None => self.missing(endpoint),
        }
    }

    /// Validate a raw response payload against the shape declared for `status`.
    pub fn validate_response(&self, endpoint: &str, status: u16, payload: &[u8]) -> Result<()> {
        let value: Value = serde_json::from_slice(payload)?;
        self.validate_response_value(endpoint, status, &value)
    }

    /// Validate an already-parsed response payload for `status`.
    pub fn validate_response_value(
        &self,
        endpoint: &str,
        status: u16,
        value: &Value,
    ) -> Result<()> {
        let compiled = match self.contracts.get(endpoint) {
            Some(compiled) => compiled,
            None => return self.missing(endpoint),
        };

        match compiled.responses.get(&status) {
            Some(validator) => validate_value(endpoint, Target::Response(status), value, validator),
            None if self.config.allow_undeclared_status => Ok(()),
            None => Err(SchemaError::UndeclaredStatus {
                endpoint: endpoint.to_string(),
                status,
            }),
        }
    }

    fn missing(&self, endpoint: &str) -> Result<()> {
        if self.config.fail_on_missing_contract {
            return Err(SchemaError::NoContract(endpoint.to_string()));
        }
        tracing::trace!(endpoint, "no contract registered; accepting payload");
        Ok(())
    }

    /// Check if an endpoint has a registered contract.
    pub fn has_contract(&self, endpoint: &str) -> bool {
        self.contracts.contains_key(endpoint)
    }

    /// Get the registered contract for an endpoint.
    pub fn contract(&self, endpoint: &str) -> Option<&EndpointContract> {
        self.contracts.get(endpoint).map(|compiled| &compiled.contract)
    }

    /// Get endpoints that have registered contracts, sorted.
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = self.contracts.keys().map(String::as_str).collect();
        endpoints.sort_unstable();
        endpoints
    }

    /// Response statuses declared for an endpoint, ascending.
    pub fn statuses(&self, endpoint: &str) -> Option<Vec<u16>> {
        self.contracts
            .get(endpoint)
            .map(|compiled| compiled.responses.keys().copied().collect())
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}
