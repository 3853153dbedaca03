use jsonschema::Validator;
use serde_json::{json, Map, Value};

use crate::config::ValidatorConfig;
use crate::error::{Result, SchemaError};
use crate::tool_call::{Action, K_DEFAULT, K_MAX, K_MIN};

pub const TOOL_CALL_SCHEMA_ID: &str = "https://schemas.3leaps.dev/toolcheck/v1/tool-call.schema.json";

/// JSON Schema 2020-12 document describing the normalized tool-call record.
pub fn tool_call_schema(config: &ValidatorConfig) -> Value {
    let actions: Vec<&str> = Action::ALL.iter().map(|action| action.as_str()).collect();
    let mut schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": TOOL_CALL_SCHEMA_ID,
        "title": "ToolCall",
        "type": "object",
        "properties": {
            "action": { "enum": actions },
            "q": { "type": ["string", "null"] },
            "k": {
                "type": "integer",
                "minimum": K_MIN,
                "maximum": K_MAX,
                "default": K_DEFAULT
            }
        },
        "required": ["action"],
        "if": {
            "properties": { "action": { "const": Action::Search.as_str() } },
            "required": ["action"]
        },
        "then": {
            "properties": { "q": { "type": "string", "pattern": "\\S" } },
            "required": ["q"]
        }
    });

    if config.strict_mode {
        apply_strict_mode(&mut schema);
    }
    schema
}

/// Compiled form of [`tool_call_schema`], for checking records produced elsewhere.
pub struct ToolCallSchema {
    validator: Validator,
    config: ValidatorConfig,
}

impl ToolCallSchema {
    pub fn compile(config: ValidatorConfig) -> Result<Self> {
        let schema = tool_call_schema(&config);
        let validator = jsonschema::validator_for(&schema)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;

        tracing::debug!(strict_mode = config.strict_mode, "compiled tool call schema");
        Ok(Self { validator, config })
    }

    /// Check a record against the schema, reporting up to four violations.
    pub fn check(&self, record: &Value) -> Result<()> {
        let mut errors = self.validator.iter_errors(record);
        if let Some(first) = errors.next() {
            let mut message = first.to_string();
            for err in errors.take(3) {
                message.push_str("; ");
                message.push_str(&err.to_string());
            }
            return Err(SchemaError::Nonconforming { message });
        }

        Ok(())
    }

    pub fn is_valid(&self, record: &Value) -> bool {
        self.validator.is_valid(record)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

impl std::fmt::Debug for ToolCallSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolCallSchema")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// Conditional branches (`if`/`then`) are left open: closing them would make
// the `if` fail on any record carrying `q` or `k`.
fn apply_strict_mode(value: &mut Value) {
    if let Value::Object(map) = value {
        if is_object_schema(map) && !map.contains_key("additionalProperties") {
            map.insert("additionalProperties".to_string(), Value::Bool(false));
        }

        if let Some(Value::Object(properties)) = map.get_mut("properties") {
            for property in properties.values_mut() {
                apply_strict_mode(property);
            }
        }
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Value::String(kind) if kind == "object")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissive() -> ToolCallSchema {
        ToolCallSchema::compile(ValidatorConfig::default()).unwrap()
    }

    #[test]
    fn schema_compiles_in_both_modes() {
        assert!(!permissive().config().strict_mode);
        let strict = ToolCallSchema::compile(ValidatorConfig::strict()).unwrap();
        assert!(strict.config().strict_mode);
    }

    #[test]
    fn normalized_records_conform() {
        let schema = permissive();
        assert!(schema
            .check(&json!({"action": "search", "q": "hello", "k": 3}))
            .is_ok());
        assert!(schema.check(&json!({"action": "answer", "q": null, "k": 3})).is_ok());
        assert!(schema.check(&json!({"action": "answer", "q": "  ", "k": 5})).is_ok());
    }

    #[test]
    fn out_of_range_k_is_nonconforming() {
        let schema = permissive();
        assert!(matches!(
            schema.check(&json!({"action": "answer", "q": null, "k": 6})),
            Err(SchemaError::Nonconforming { .. })
        ));
        assert!(!schema.is_valid(&json!({"action": "answer", "k": "3"})));
    }

    #[test]
    fn search_requires_non_blank_query() {
        let schema = permissive();
        assert!(!schema.is_valid(&json!({"action": "search", "k": 3})));
        assert!(!schema.is_valid(&json!({"action": "search", "q": null, "k": 3})));
        assert!(!schema.is_valid(&json!({"action": "search", "q": "   ", "k": 3})));
        assert!(schema.is_valid(&json!({"action": "search", "q": " x ", "k": 3})));
    }

    #[test]
    fn unknown_action_is_nonconforming() {
        assert!(!permissive().is_valid(&json!({"action": "", "q": null, "k": 3})));
    }

    #[test]
    fn strict_mode_closes_root_object_only() {
        let schema = tool_call_schema(&ValidatorConfig::strict());
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
        assert!(schema["then"].get("additionalProperties").is_none());

        let compiled = ToolCallSchema::compile(ValidatorConfig::strict()).unwrap();
        let record = json!({"action": "search", "q": "hello", "k": 3});
        assert!(compiled.is_valid(&record));
        assert!(!compiled.is_valid(&json!({"action": "answer", "q": null, "k": 3, "extra": 1})));
        assert!(permissive().is_valid(&json!({"action": "answer", "q": null, "k": 3, "extra": 1})));
    }

    #[test]
    fn permissive_schema_leaves_additional_properties_unset() {
        let schema = tool_call_schema(&ValidatorConfig::default());
        assert!(schema.get("additionalProperties").is_none());
        assert_eq!(schema["$id"], TOOL_CALL_SCHEMA_ID);
    }
}
