/// Controls contract validation behavior.
///
/// By default undeclared properties and unknown endpoints pass. Responses
/// with a status the contract does not declare are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
    /// When true, endpoints without a contract return `SchemaError::NoContract`.
    pub fail_on_missing_contract: bool,
    /// When true, response statuses the contract does not declare pass unchecked.
    pub allow_undeclared_status: bool,
}
