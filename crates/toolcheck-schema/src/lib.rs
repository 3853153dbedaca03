//! Validation and normalization of agent tool-call payloads.
//!
//! A tool call names an `action` (`search` or `answer`) plus its arguments
//! `q` and `k`. [`ToolCallValidator`] turns an untyped JSON value into a
//! [`ToolCall`] or a list of every violation found, formatted as
//! `"<field>: <message>"` strings safe to show to users or feed back to a model.
//!
//! The normalized record is also published as a JSON Schema document
//! ([`tool_call_schema`]) so producers can check their output up front.

pub mod config;
pub mod error;
pub mod schema;
pub mod tool_call;
pub mod validator;

pub use config::ValidatorConfig;
pub use error::{ErrorKind, FieldError, Result, SchemaError, ValidationErrors};
pub use schema::{tool_call_schema, ToolCallSchema, TOOL_CALL_SCHEMA_ID};
pub use tool_call::{Action, ToolCall, K_DEFAULT, K_MAX, K_MIN};
pub use validator::{check, validate, ToolCallValidator, ValidationReport};
