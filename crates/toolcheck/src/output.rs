use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;
use toolcheck_schema::ValidationReport;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub const REPORT_SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/toolcheck/cli/v1/validation-report.schema.json";

/// One validated payload, as printed by `check` and `demo`.
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    pub schema_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<usize>,
    pub input: &'a Value,
    pub valid: bool,
    pub clean: &'a serde_json::Map<String, Value>,
    pub errors: &'a [String],
}

impl<'a> ReportOutput<'a> {
    pub fn new(example: Option<usize>, input: &'a Value, report: &'a ValidationReport) -> Self {
        Self {
            schema_id: REPORT_SCHEMA_ID,
            example,
            input,
            valid: report.is_valid(),
            clean: &report.clean,
            errors: &report.errors,
        }
    }
}

pub fn print_reports(reports: &[ReportOutput<'_>], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for report in reports {
                println!(
                    "{}",
                    serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "INPUT", "CLEAN", "ERRORS"]);
            for (index, report) in reports.iter().enumerate() {
                table.add_row(vec![
                    report.example.unwrap_or(index + 1).to_string(),
                    compact(report.input),
                    compact_map(report.clean),
                    report.errors.join("\n"),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (index, report) in reports.iter().enumerate() {
                println!("Example {}:", report.example.unwrap_or(index + 1));
                println!("  input : {}", compact(report.input));
                println!("  clean : {}", compact_map(report.clean));
                println!("  errors: {}", render_errors(report.errors));
                println!();
            }
        }
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

fn compact_map(map: &serde_json::Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "<unprintable>".to_string())
}

fn render_errors(errors: &[String]) -> String {
    let quoted: Vec<String> = errors.iter().map(|err| format!("{err:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_report_shape() {
        let input = json!({"action": "answer"});
        let report = toolcheck_schema::check(&input);
        let out = ReportOutput::new(Some(2), &input, &report);

        let rendered = serde_json::to_value(&out).unwrap();
        assert_eq!(rendered["schema_id"], REPORT_SCHEMA_ID);
        assert_eq!(rendered["example"], 2);
        assert_eq!(rendered["valid"], true);
        assert_eq!(rendered["clean"], json!({"action": "answer", "q": null, "k": 3}));
        assert_eq!(rendered["errors"], json!([]));
    }

    #[test]
    fn example_index_omitted_when_absent() {
        let input = json!({"action": "search"});
        let report = toolcheck_schema::check(&input);
        let rendered = serde_json::to_value(ReportOutput::new(None, &input, &report)).unwrap();
        assert!(rendered.get("example").is_none());
        assert_eq!(rendered["valid"], false);
    }

    #[test]
    fn errors_render_as_quoted_list() {
        assert_eq!(render_errors(&[]), "[]");
        assert_eq!(
            render_errors(&["k: bad".to_string(), "q: worse".to_string()]),
            "[\"k: bad\", \"q: worse\"]"
        );
    }
}
