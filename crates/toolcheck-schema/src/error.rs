use std::fmt;

/// Category of a single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload itself is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    Missing,
    /// The value is not one of the allowed enumeration literals.
    InvalidEnum,
    /// The value has a JSON type that cannot be coerced.
    InvalidType,
    /// A string could not be parsed as the target type.
    Coercion,
    /// A number has a fractional part where an integer is expected.
    FractionalNumber,
    /// The value is below the lower bound.
    TooSmall,
    /// The value is above the upper bound.
    TooLarge,
    /// A constraint spanning several fields does not hold.
    CrossField,
    /// The key is not part of the record and strict mode is on.
    ExtraForbidden,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotAnObject => "not_an_object",
            ErrorKind::Missing => "missing",
            ErrorKind::InvalidEnum => "invalid_enum",
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::Coercion => "coercion",
            ErrorKind::FractionalNumber => "fractional_number",
            ErrorKind::TooSmall => "too_small",
            ErrorKind::TooLarge => "too_large",
            ErrorKind::CrossField => "cross_field",
            ErrorKind::ExtraForbidden => "extra_forbidden",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violation, located by its dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_located(.loc, .message))]
pub struct FieldError {
    pub loc: Vec<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            loc: vec![field.to_string()],
            kind,
            message: message.into(),
        }
    }

    /// An error that applies to the payload as a whole.
    pub fn root(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            loc: Vec::new(),
            kind,
            message: message.into(),
        }
    }

    /// Dotted location, empty for root-level errors.
    pub fn path(&self) -> String {
        self.loc.join(".")
    }

    /// True when the error is located at `field`.
    pub fn is_for(&self, field: &str) -> bool {
        self.loc.first().is_some_and(|head| head == field)
    }
}

fn render_located(loc: &[String], message: &str) -> String {
    if loc.is_empty() {
        message.to_string()
    } else {
        format!("{}: {message}", loc.join("."))
    }
}

/// Every violation found in one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} validation error(s): {}", .0.len(), join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    /// Rendered `"<path>: <message>"` strings, in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any error is located at `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|err| err.is_for(field))
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the published JSON Schema path.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The record does not conform to the compiled schema.
    #[error("record does not conform to schema: {message}")]
    Nonconforming { message: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_renders_path_and_message() {
        let err = FieldError::new("k", ErrorKind::TooLarge, "Input should be less than or equal to 5");
        assert_eq!(err.to_string(), "k: Input should be less than or equal to 5");
        assert!(err.is_for("k"));
        assert!(!err.is_for("q"));
    }

    #[test]
    fn root_error_renders_bare_message() {
        let err = FieldError::root(ErrorKind::NotAnObject, "Input should be a valid dictionary or object");
        assert_eq!(err.path(), "");
        assert_eq!(err.to_string(), "Input should be a valid dictionary or object");
    }

    #[test]
    fn nested_location_is_dotted() {
        let err = FieldError {
            loc: vec!["args".to_string(), "k".to_string()],
            kind: ErrorKind::TooSmall,
            message: "Input should be greater than or equal to 1".to_string(),
        };
        assert_eq!(err.to_string(), "args.k: Input should be greater than or equal to 1");
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }

    #[test]
    fn validation_errors_display_joins_messages() {
        let errors = ValidationErrors::new(vec![
            FieldError::new("action", ErrorKind::Missing, "Field required"),
            FieldError::new("q", ErrorKind::InvalidType, "Input should be a valid string"),
        ]);

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("action"));
        assert!(errors.has_field("q"));
        assert!(!errors.has_field("k"));
        assert_eq!(
            errors.to_string(),
            "2 validation error(s): action: Field required; q: Input should be a valid string"
        );
    }

    #[test]
    fn kind_codes_are_snake_case() {
        assert_eq!(ErrorKind::FractionalNumber.as_str(), "fractional_number");
        assert_eq!(ErrorKind::ExtraForbidden.to_string(), "extra_forbidden");
    }
}
