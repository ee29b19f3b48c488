use authcontracts_schema::ContractRegistry;
use authcontracts_shape::{EndpointContract, ErrorExample};
use serde::Serialize;

use crate::cmd::ExamplesArgs;
use crate::exit::{unknown_endpoint, CliResult, SUCCESS};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct StatusExample<'a> {
    status: u16,
    example: &'a ErrorExample,
}

pub fn run(
    args: ExamplesArgs,
    registry: &ContractRegistry,
    format: OutputFormat,
) -> CliResult<i32> {
    let contract = registry
        .contract(&args.endpoint)
        .ok_or_else(|| unknown_endpoint(&args.endpoint))?;
    let examples = collect(contract);

    match format {
        OutputFormat::Json => print_json(&examples),
        OutputFormat::Table => print_table(
            &["STATUS", "NAME", "MESSAGE"],
            examples
                .iter()
                .map(|e| {
                    vec![
                        e.status.to_string(),
                        e.example.name.clone(),
                        e.example.message.clone(),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for e in &examples {
                println!("{} {}: {}", e.status, e.example.name, e.example.message);
            }
        }
        OutputFormat::Raw => {
            for e in &examples {
                print_json(e.example);
            }
        }
    }

    Ok(SUCCESS)
}

fn collect(contract: &EndpointContract) -> Vec<StatusExample<'_>> {
    contract
        .responses()
        .iter()
        .filter_map(|(status, response)| {
            response.example().map(|example| StatusExample {
                status: *status,
                example,
            })
        })
        .collect()
}
