use serde_json::{json, Value};
use toolcheck_schema::{ToolCallValidator, ValidatorConfig};

use crate::cmd::DemoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_reports, OutputFormat, ReportOutput};

pub(crate) fn example_payloads() -> Vec<Value> {
    vec![
        json!({"action": "search", "q": "hello", "k": 3}),
        json!({"action": "answer", "k": 10}),
        json!({"action": "search", "q": "hello", "k": "3"}),
        json!({"action": "search", "q": "", "k": "6"}),
        json!({"action": "search"}),
        json!({"action": "", "q": "", "k": "6"}),
        json!({"action": "search", "q": "egg", "k": "6"}),
        json!({"action": "search", "q": "egg", "k": "abc"}),
        json!({"action": "search", "q": "egg", "k": ""}),
    ]
}

pub fn run(args: DemoArgs, format: OutputFormat) -> CliResult<i32> {
    let validator = ToolCallValidator::with_config(ValidatorConfig {
        strict_mode: args.strict,
    });
    let payloads = example_payloads();
    let reports: Vec<_> = payloads
        .iter()
        .map(|payload| validator.check(payload))
        .collect();

    let outputs: Vec<ReportOutput<'_>> = payloads
        .iter()
        .zip(&reports)
        .enumerate()
        .map(|(index, (payload, report))| ReportOutput::new(Some(index + 1), payload, report))
        .collect();

    tracing::debug!(
        examples = outputs.len(),
        valid = outputs.iter().filter(|out| out.valid).count(),
        "demo complete"
    );
    print_reports(&outputs, format);

    Ok(SUCCESS)
}
