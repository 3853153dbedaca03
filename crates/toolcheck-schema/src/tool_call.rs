use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lower bound for `k`, inclusive.
pub const K_MIN: i64 = 1;
/// Upper bound for `k`, inclusive.
pub const K_MAX: i64 = 5;
/// Value of `k` when the payload omits it.
pub const K_DEFAULT: i64 = 3;

pub const FIELD_ACTION: &str = "action";
pub const FIELD_Q: &str = "q";
pub const FIELD_K: &str = "k";

/// Fields the record declares, in validation order.
pub const FIELDS: [&str; 3] = [FIELD_ACTION, FIELD_Q, FIELD_K];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Search,
    Answer,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Search, Action::Answer];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::Answer => "answer",
        }
    }

    /// Exact, case-sensitive match against the literal tags.
    pub fn from_literal(value: &str) -> Option<Self> {
        Action::ALL.into_iter().find(|action| action.as_str() == value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool call with normalized fields.
///
/// [`crate::ToolCallValidator`] builds these from untyped payloads. Deserializing
/// or constructing one directly skips the `q` and `k` rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub action: Action,
    pub q: Option<String>,
    pub k: i64,
}

impl ToolCall {
    /// Normalized record with every field present and defaults applied.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            FIELD_ACTION.to_string(),
            Value::String(self.action.as_str().to_string()),
        );
        record.insert(
            FIELD_Q.to_string(),
            self.q.clone().map_or(Value::Null, Value::String),
        );
        record.insert(FIELD_K.to_string(), Value::from(self.k));
        record
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_record())
    }
}
