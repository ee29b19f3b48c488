use authcontracts_schema::ContractRegistry;
use serde::Serialize;

use crate::cmd::ListArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{join_statuses, print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct EndpointSummary<'a> {
    endpoint: &'a str,
    body_fields: Vec<&'a str>,
    statuses: Vec<u16>,
}

pub fn run(
    _args: ListArgs,
    registry: &ContractRegistry,
    format: OutputFormat,
) -> CliResult<i32> {
    let summaries = summarize(registry);

    match format {
        OutputFormat::Json => print_json(&summaries),
        OutputFormat::Table => print_table(
            &["ENDPOINT", "BODY FIELDS", "STATUSES"],
            summaries
                .iter()
                .map(|s| {
                    vec![
                        s.endpoint.to_string(),
                        s.body_fields.join(", "),
                        join_statuses(&s.statuses),
                    ]
                })
                .collect(),
        ),
        OutputFormat::Pretty => {
            for s in &summaries {
                println!(
                    "{} body=[{}] statuses=[{}]",
                    s.endpoint,
                    s.body_fields.join(", "),
                    join_statuses(&s.statuses)
                );
            }
        }
        OutputFormat::Raw => {
            for s in &summaries {
                println!("{}", s.endpoint);
            }
        }
    }

    Ok(SUCCESS)
}

fn summarize(registry: &ContractRegistry) -> Vec<EndpointSummary<'_>> {
    registry
        .endpoints()
        .into_iter()
        .filter_map(|endpoint| registry.contract(endpoint))
        .map(|contract| EndpointSummary {
            endpoint: contract.name(),
            body_fields: contract.body().field_names(),
            statuses: contract.statuses(),
        })
        .collect()
}
