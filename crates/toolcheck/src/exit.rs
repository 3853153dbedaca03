use std::fmt;
use std::io;

use toolcheck_schema::SchemaError;

// Process exit codes. Rejected payloads exit with DATA_INVALID, unreadable
// input with USAGE, so scripts can tell the two apart.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    match err {
        SchemaError::Nonconforming { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SchemaError::CompileFailed(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_exit_codes() {
        let denied = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, PERMISSION_DENIED);
        assert!(denied.message.starts_with("read: "));

        let missing = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, FAILURE);

        let other = io_error("read", io::Error::from(io::ErrorKind::InvalidData));
        assert_eq!(other.code, INTERNAL);
    }

    #[test]
    fn schema_errors_map_to_exit_codes() {
        let compile = schema_error("schema", SchemaError::CompileFailed("bad".to_string()));
        assert_eq!(compile.code, INTERNAL);

        let nonconforming = schema_error(
            "schema",
            SchemaError::Nonconforming {
                message: "k".to_string(),
            },
        );
        assert_eq!(nonconforming.code, DATA_INVALID);
    }
}
