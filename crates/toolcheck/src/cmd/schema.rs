use toolcheck_schema::{tool_call_schema, ToolCallSchema, ValidatorConfig};

use crate::cmd::SchemaArgs;
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

pub fn run(args: SchemaArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ValidatorConfig {
        strict_mode: args.strict,
    };
    // Refuse to publish a document the validator itself cannot compile.
    ToolCallSchema::compile(config).map_err(|err| schema_error("schema compile failed", err))?;

    let schema = tool_call_schema(&config);
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(&schema),
        OutputFormat::Table | OutputFormat::Pretty => serde_json::to_string_pretty(&schema),
    };
    println!("{}", rendered.unwrap_or_else(|_| "{}".to_string()));

    Ok(SUCCESS)
}
