use authcontracts_schema::ContractRegistry;
use authcontracts_shape::openapi_document;

use crate::cmd::OpenapiArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, print_json_pretty, OutputFormat};

pub fn run(
    args: OpenapiArgs,
    registry: &ContractRegistry,
    format: OutputFormat,
) -> CliResult<i32> {
    let contracts: Vec<_> = registry
        .endpoints()
        .into_iter()
        .filter_map(|endpoint| registry.contract(endpoint))
        .collect();
    let document = openapi_document(&args.title, env!("CARGO_PKG_VERSION"), &contracts);

    match format {
        OutputFormat::Json | OutputFormat::Raw => print_json(&document),
        OutputFormat::Table | OutputFormat::Pretty => print_json_pretty(&document),
    }

    Ok(SUCCESS)
}
