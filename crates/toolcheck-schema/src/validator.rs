use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ValidatorConfig;
use crate::error::{ErrorKind, FieldError, ValidationErrors};
use crate::tool_call::{
    Action, ToolCall, FIELDS, FIELD_ACTION, FIELD_K, FIELD_Q, K_DEFAULT, K_MAX, K_MIN,
};

const MSG_NOT_AN_OBJECT: &str = "Input should be a valid dictionary or object";
const MSG_FIELD_REQUIRED: &str = "Field required";
const MSG_INVALID_ACTION: &str = "Input should be 'search' or 'answer'";
const MSG_INVALID_STRING: &str = "Input should be a valid string";
const MSG_INVALID_INT: &str = "Input should be a valid integer";
const MSG_INT_FRACTION: &str = "Input should be a valid integer, got a number with a fractional part";
const MSG_INT_PARSING: &str = "Input should be a valid integer, unable to parse string as an integer";
const MSG_BLANK_QUERY: &str = "String should have at least 1 character";
const MSG_EXTRA_FORBIDDEN: &str = "Extra inputs are not permitted";

/// Validates untyped tool-call payloads into [`ToolCall`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolCallValidator {
    config: ValidatorConfig,
}

impl ToolCallValidator {
    /// Create a validator with default config (unknown keys ignored).
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a payload, collecting every violation instead of stopping at the first.
    pub fn validate(&self, payload: &Value) -> Result<ToolCall, ValidationErrors> {
        let Some(fields) = payload.as_object() else {
            tracing::debug!(error_count = 1, "tool call rejected: payload is not an object");
            return Err(ValidationErrors::new(vec![FieldError::root(
                ErrorKind::NotAnObject,
                MSG_NOT_AN_OBJECT,
            )]));
        };

        let mut errors = Vec::new();
        let action = keep_ok(check_action(fields.get(FIELD_ACTION)), &mut errors);
        let q = keep_ok(check_query(fields.get(FIELD_Q)), &mut errors);
        let k = keep_ok(check_k(fields.get(FIELD_K)), &mut errors);

        if self.config.strict_mode {
            errors.extend(extra_key_errors(fields));
        }

        // The search rule only needs action and q to have coerced cleanly.
        if let (Some(Action::Search), Some(q)) = (action, q.as_ref()) {
            if let Err(err) = check_search_query(q.as_deref()) {
                errors.push(err);
            }
        }

        match (action, q, k) {
            (Some(action), Some(q), Some(k)) if errors.is_empty() => {
                tracing::debug!(%action, k, "tool call validated");
                Ok(ToolCall { action, q, k })
            }
            _ => {
                tracing::debug!(error_count = errors.len(), "tool call rejected");
                Err(ValidationErrors::new(errors))
            }
        }
    }

    /// Validate and flatten into the `(clean, errors)` report shape.
    pub fn check(&self, payload: &Value) -> ValidationReport {
        match self.validate(payload) {
            Ok(call) => ValidationReport {
                clean: call.to_record(),
                errors: Vec::new(),
            },
            Err(errors) => ValidationReport {
                clean: Map::new(),
                errors: errors.messages(),
            },
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Normalized record plus error strings. Exactly one side is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub clean: Map<String, Value>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate with the default config.
pub fn validate(payload: &Value) -> Result<ToolCall, ValidationErrors> {
    ToolCallValidator::new().validate(payload)
}

/// Validate with the default config and return the report shape.
pub fn check(payload: &Value) -> ValidationReport {
    ToolCallValidator::new().check(payload)
}

fn keep_ok<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

fn check_action(value: Option<&Value>) -> Result<Action, FieldError> {
    match value {
        None => Err(FieldError::new(
            FIELD_ACTION,
            ErrorKind::Missing,
            MSG_FIELD_REQUIRED,
        )),
        Some(Value::String(tag)) => Action::from_literal(tag).ok_or_else(invalid_action),
        Some(_) => Err(invalid_action()),
    }
}

fn invalid_action() -> FieldError {
    FieldError::new(FIELD_ACTION, ErrorKind::InvalidEnum, MSG_INVALID_ACTION)
}

fn check_query(value: Option<&Value>) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(q)) => Ok(Some(q.clone())),
        Some(_) => Err(FieldError::new(
            FIELD_Q,
            ErrorKind::InvalidType,
            MSG_INVALID_STRING,
        )),
    }
}

fn check_search_query(q: Option<&str>) -> Result<(), FieldError> {
    match q {
        Some(q) if !q.trim().is_empty() => Ok(()),
        _ => Err(FieldError::new(
            FIELD_Q,
            ErrorKind::CrossField,
            MSG_BLANK_QUERY,
        )),
    }
}

fn check_k(value: Option<&Value>) -> Result<i64, FieldError> {
    let Some(value) = value else {
        return Ok(K_DEFAULT);
    };
    let k = coerce_integer(value)
        .map_err(|(kind, message)| FieldError::new(FIELD_K, kind, message))?;
    check_bounds(k)
}

/// Lax integer coercion: integers, integral floats, bools and numeric strings.
fn coerce_integer(value: &Value) -> Result<i128, (ErrorKind, &'static str)> {
    match value {
        Value::Bool(flag) => Ok(i128::from(*flag)),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(i128::from(int))
            } else if let Some(int) = number.as_u64() {
                Ok(i128::from(int))
            } else {
                let float = number.as_f64().unwrap_or(f64::NAN);
                integral_float(float)
            }
        }
        Value::String(text) => parse_integer_str(text),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err((ErrorKind::InvalidType, MSG_INVALID_INT))
        }
    }
}

/// Accepts `[+-]digits[_digits]*[.0+]` after trimming. Overflow saturates by
/// sign so the bounds check reports it as out of range.
fn parse_integer_str(text: &str) -> Result<i128, (ErrorKind, &'static str)> {
    let parse_error = (ErrorKind::Coercion, MSG_INT_PARSING);
    let text = text.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = match unsigned.split_once('.') {
        Some((whole, zeros)) if !zeros.is_empty() && zeros.bytes().all(|b| b == b'0') => whole,
        Some(_) => return Err(parse_error),
        None => unsigned,
    };
    let well_formed = digits
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(parse_error);
    }

    let magnitude: String = digits.chars().filter(|c| *c != '_').collect();
    match (magnitude.parse::<i128>(), negative) {
        (Ok(value), true) => Ok(-value),
        (Ok(value), false) => Ok(value),
        (Err(_), true) => Ok(i128::MIN),
        (Err(_), false) => Ok(i128::MAX),
    }
}

fn integral_float(float: f64) -> Result<i128, (ErrorKind, &'static str)> {
    if !float.is_finite() || float.fract() != 0.0 {
        return Err((ErrorKind::FractionalNumber, MSG_INT_FRACTION));
    }
    // Saturate far outside the bounds; only the sign matters past that point.
    let clamped = float.clamp(i64::MIN as f64, i64::MAX as f64);
    Ok(clamped as i128)
}

fn check_bounds(k: i128) -> Result<i64, FieldError> {
    if k < i128::from(K_MIN) {
        return Err(FieldError::new(
            FIELD_K,
            ErrorKind::TooSmall,
            format!("Input should be greater than or equal to {K_MIN}"),
        ));
    }
    if k > i128::from(K_MAX) {
        return Err(FieldError::new(
            FIELD_K,
            ErrorKind::TooLarge,
            format!("Input should be less than or equal to {K_MAX}"),
        ));
    }
    i64::try_from(k).map_err(|_| FieldError::new(FIELD_K, ErrorKind::TooLarge, MSG_INVALID_INT))
}

fn extra_key_errors(fields: &Map<String, Value>) -> impl Iterator<Item = FieldError> + '_ {
    fields
        .keys()
        .filter(|key| !FIELDS.contains(&key.as_str()))
        .map(|key| FieldError::new(key, ErrorKind::ExtraForbidden, MSG_EXTRA_FORBIDDEN))
}
