use std::path::PathBuf;

use authcontracts_schema::{ContractRegistry, RegistryConfig};
use clap::{ArgGroup, Args, Subcommand};

use crate::exit::{schema_error, CliResult};
use crate::output::OutputFormat;

pub mod examples;
pub mod list;
pub mod openapi;
pub mod show;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List endpoints with their body fields and response statuses.
    List(ListArgs),
    /// Print an endpoint's body and response schemas.
    Show(ShowArgs),
    /// Validate a request body or response payload against a contract.
    Validate(ValidateArgs),
    /// Print the documented error examples of an endpoint.
    Examples(ExamplesArgs),
    /// Print an OpenAPI document covering every contract.
    Openapi(OpenapiArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, strict: bool) -> CliResult<i32> {
    let config = RegistryConfig {
        strict_mode: strict,
        fail_on_missing_contract: true,
        allow_undeclared_status: false,
    };
    let registry = ContractRegistry::auth_with_config(config)
        .map_err(|err| schema_error("loading contracts failed", err))?;
    tracing::debug!(endpoints = ?registry.endpoints(), strict, "contracts loaded");

    match command {
        Command::List(args) => list::run(args, &registry, format),
        Command::Show(args) => show::run(args, &registry, format),
        Command::Validate(args) => validate::run(args, &registry, format),
        Command::Examples(args) => examples::run(args, &registry, format),
        Command::Openapi(args) => openapi::run(args, &registry, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Endpoint name (e.g. register, login).
    pub endpoint: String,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["json", "file"])))]
pub struct ValidateArgs {
    /// Endpoint name (e.g. register, login).
    pub endpoint: String,
    /// Validate as the response for this status instead of as a request body.
    #[arg(long, short = 's')]
    pub status: Option<u16>,
    /// JSON payload.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExamplesArgs {
    /// Endpoint name (e.g. register, login).
    pub endpoint: String,
}

#[derive(Args, Debug)]
pub struct OpenapiArgs {
    /// Document title.
    #[arg(long, default_value = "authcontracts")]
    pub title: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
