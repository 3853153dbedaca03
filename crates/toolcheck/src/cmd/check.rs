use std::fs;
use std::io::Read;

use serde_json::Value;
use toolcheck_schema::{ToolCallSchema, ToolCallValidator, ValidatorConfig};

use crate::cmd::CheckArgs;
use crate::exit::{io_error, schema_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_reports, OutputFormat, ReportOutput};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = read_payload(&args)?;
    let payload = parse_payload(&raw)?;

    let config = ValidatorConfig {
        strict_mode: args.strict,
    };
    let report = ToolCallValidator::with_config(config).check(&payload);

    if report.is_valid() && args.verify_schema {
        let schema = ToolCallSchema::compile(config)
            .map_err(|err| schema_error("schema compile failed", err))?;
        schema
            .check(&Value::Object(report.clean.clone()))
            .map_err(|err| schema_error("normalized record rejected", err))?;
    }

    print_reports(&[ReportOutput::new(None, &payload, &report)], format);

    if report.is_valid() {
        Ok(SUCCESS)
    } else {
        tracing::info!(error_count = report.errors.len(), "payload rejected");
        Ok(DATA_INVALID)
    }
}

fn read_payload(args: &CheckArgs) -> CliResult<String> {
    if let Some(json) = &args.json {
        return Ok(json.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(buf)
}

fn parse_payload(raw: &str) -> CliResult<Value> {
    if raw.trim().is_empty() {
        return Err(CliError::new(USAGE, "payload must not be empty"));
    }
    serde_json::from_str(raw)
        .map_err(|err| CliError::new(USAGE, format!("payload is not valid JSON: {err}")))
}
