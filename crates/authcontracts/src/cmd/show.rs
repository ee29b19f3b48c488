use authcontracts_schema::ContractRegistry;
use authcontracts_shape::{EndpointContract, FieldKind, ShapeDescriptor};

use crate::cmd::ShowArgs;
use crate::exit::{unknown_endpoint, CliResult, SUCCESS};
use crate::output::{print_json, print_json_pretty, print_table, OutputFormat};

pub fn run(
    args: ShowArgs,
    registry: &ContractRegistry,
    format: OutputFormat,
) -> CliResult<i32> {
    let contract = registry
        .contract(&args.endpoint)
        .ok_or_else(|| unknown_endpoint(&args.endpoint))?;

    match format {
        OutputFormat::Json => print_json(&contract.to_json_schema()),
        OutputFormat::Pretty | OutputFormat::Raw => print_json_pretty(&contract.to_json_schema()),
        OutputFormat::Table => print_table(&["TARGET", "FIELD", "KIND"], field_rows(contract)),
    }

    Ok(SUCCESS)
}

fn field_rows(contract: &EndpointContract) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    push_rows(&mut rows, "body", contract.body());
    for (status, response) in contract.responses() {
        push_rows(&mut rows, &format!("response {status}"), response.shape());
    }
    rows
}

fn push_rows(rows: &mut Vec<Vec<String>>, target: &str, shape: &ShapeDescriptor) {
    push_fields(rows, target, "", shape);
}

// Nested objects are flattened into dotted paths, in declaration order.
fn push_fields(
    rows: &mut Vec<Vec<String>>,
    target: &str,
    prefix: &str,
    shape: &ShapeDescriptor,
) {
    for field in shape.fields() {
        let path = format!("{prefix}{}", field.name());
        match field.kind() {
            FieldKind::Object(nested) => push_fields(rows, target, &format!("{path}."), nested),
            kind => rows.push(vec![target.to_string(), path, kind.type_name().to_string()]),
        }
    }
}
