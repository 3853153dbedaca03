mod cmd;
mod exit;
mod output;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::cmd::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "toolcheck", version, about = "Tool-call payload validator")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Validator events come from `toolcheck_schema`; name the target once
    /// they are verbose enough to be mixed with CLI events.
    fn shows_target(self) -> bool {
        matches!(self, LogLevel::Debug | LogLevel::Trace)
    }
}

// Logs go to stderr; stdout carries reports that other tools parse.
fn init_logging(format: LogFormat, level: LogLevel) {
    if matches!(level, LogLevel::Off) {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(level.shows_target());

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_subcommand() {
        let cli = Cli::try_parse_from([
            "toolcheck",
            "check",
            "--json",
            r#"{"action":"answer"}"#,
            "--strict",
        ])
        .expect("check args should parse");

        match cli.command {
            Command::Check(args) => {
                assert!(args.strict);
                assert!(!args.verify_schema);
                assert_eq!(args.json.as_deref(), Some(r#"{"action":"answer"}"#));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "toolcheck",
            "check",
            "--json",
            "{}",
            "--file",
            "payload.json",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["toolcheck", "demo", "--format", "pretty"])
            .expect("demo args should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Pretty)));
        assert!(matches!(cli.command, Command::Demo(_)));
    }

    #[test]
    fn log_level_off_parses_and_disables_output() {
        let cli = Cli::try_parse_from(["toolcheck", "--log-level", "off", "version"])
            .expect("off should be a valid level");
        assert!(matches!(cli.log_level, LogLevel::Off));
        assert_eq!(cli.log_level.as_filter(), LevelFilter::OFF);
        assert!(matches!(cli.log_format, LogFormat::Text));
    }

    #[test]
    fn target_shown_only_at_verbose_levels() {
        assert!(!LogLevel::Warn.shows_target());
        assert!(!LogLevel::Info.shows_target());
        assert!(LogLevel::Debug.shows_target());
        assert_eq!(LogLevel::Trace.as_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn parses_schema_subcommand() {
        let cli = Cli::try_parse_from(["toolcheck", "schema", "--strict"])
            .expect("schema args should parse");
        assert!(matches!(cli.command, Command::Schema(args) if args.strict));
    }
}
