use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod demo;
pub mod schema;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one tool-call payload.
    Check(CheckArgs),
    /// Run the built-in example payloads through the validator.
    Demo(DemoArgs),
    /// Print the JSON Schema of the normalized tool-call record.
    Schema(SchemaArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Demo(args) => demo::run(args, format),
        Command::Schema(args) => schema::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON payload. Reads stdin when neither --json nor --file is given.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the payload from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Reject keys that are not part of the tool-call record.
    #[arg(long, env = "TOOLCHECK_STRICT")]
    pub strict: bool,
    /// Also check the normalized record against the published JSON Schema.
    #[arg(long)]
    pub verify_schema: bool,
}

#[derive(Args, Debug, Default)]
pub struct DemoArgs {
    /// Reject keys that are not part of the tool-call record.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Emit the schema with `additionalProperties: false`.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
