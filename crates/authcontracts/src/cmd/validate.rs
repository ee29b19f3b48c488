use std::fs;

use authcontracts_schema::{ContractRegistry, SchemaError, Target};
use serde::Serialize;

use crate::cmd::ValidateArgs;
use crate::exit::{
    io_error, schema_error, unknown_endpoint, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE,
};
use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Serialize)]
struct ValidationReport {
    endpoint: String,
    target: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub fn run(
    args: ValidateArgs,
    registry: &ContractRegistry,
    format: OutputFormat,
) -> CliResult<i32> {
    if !registry.has_contract(&args.endpoint) {
        return Err(unknown_endpoint(&args.endpoint));
    }

    let payload = resolve_payload(&args)?;
    let target = match args.status {
        Some(status) => Target::Response(status),
        None => Target::Body,
    };

    let result = match target {
        Target::Body => registry.validate_body(&args.endpoint, &payload),
        Target::Response(status) => registry.validate_response(&args.endpoint, status, &payload),
    };

    let report = match result {
        Ok(()) => {
            tracing::debug!(endpoint = %args.endpoint, %target, "payload valid");
            ValidationReport {
                endpoint: args.endpoint,
                target: target.to_string(),
                valid: true,
                message: None,
            }
        }
        Err(SchemaError::ValidationFailed { message, .. }) => {
            tracing::debug!(endpoint = %args.endpoint, %target, "payload rejected");
            ValidationReport {
                endpoint: args.endpoint,
                target: target.to_string(),
                valid: false,
                message: Some(message),
            }
        }
        Err(err) => return Err(schema_error("validation failed", err)),
    };

    print_report(&report, format);

    if report.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn resolve_payload(args: &ValidateArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "one of --json or --file is required"))
}

fn print_report(report: &ValidationReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => print_table(
            &["ENDPOINT", "TARGET", "RESULT", "DETAIL"],
            vec![vec![
                report.endpoint.clone(),
                report.target.clone(),
                verdict(report).to_string(),
                report.message.clone().unwrap_or_default(),
            ]],
        ),
        OutputFormat::Pretty => match &report.message {
            Some(message) => println!(
                "{} {}: {} ({message})",
                report.endpoint,
                report.target,
                verdict(report)
            ),
            None => println!("{} {}: {}", report.endpoint, report.target, verdict(report)),
        },
        OutputFormat::Raw => println!("{}", verdict(report)),
    }
}

fn verdict(report: &ValidationReport) -> &'static str {
    if report.valid {
        "valid"
    } else {
        "invalid"
    }
}
