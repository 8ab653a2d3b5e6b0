use chrono::{DateTime, SecondsFormat, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Boolean,
    Timestamp,
}

/// A scalar field value. Serializes untagged so rows render as the plain
/// JSON objects the real service returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Text(CompactString),
    Null,
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Timestamp(_) => "Timestamp",
            Value::Text(_) => "Text",
            Value::Null => "Null",
        }
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Integer(_) => Some(ColumnType::Integer),
            Value::Timestamp(_) => Some(ColumnType::Timestamp),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Null => None,
        }
    }

    /// The string form used for equality filtering. `Null` coerces to the
    /// literal `"null"`, preserving the legacy client's coercion contract:
    /// `eq(field, Null)` matches both stored nulls and the text `"null"`.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Millis, true),
            Value::Text(s) => s.to_string(),
            Value::Null => "null".to_string(),
        }
    }

    /// The string form used for ordering. Unlike [`Value::coerce_string`],
    /// `Null` coerces to the empty string so absent assignments sort first
    /// in ascending order.
    pub fn sort_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.coerce_string(),
        }
    }
}

/// A row record: an ordered mapping from field name to scalar value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Row {
    pub values: BTreeMap<CompactString, Value>,
}

impl Row {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(field, value)| (CompactString::from(field), value))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}

pub trait IntoFieldValue {
    fn into_field_value(self) -> Value;
}

impl IntoFieldValue for Value {
    fn into_field_value(self) -> Value {
        self
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl IntoFieldValue for i64 {
    fn into_field_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoFieldValue for i32 {
    fn into_field_value(self) -> Value {
        Value::Integer(self as i64)
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn into_field_value(self) -> Value {
        Value::Timestamp(self)
    }
}

impl IntoFieldValue for &str {
    fn into_field_value(self) -> Value {
        Value::Text(self.into())
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> Value {
        Value::Text(self.into())
    }
}

impl IntoFieldValue for CompactString {
    fn into_field_value(self) -> Value {
        Value::Text(self)
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field_value(self) -> Value {
        match self {
            Some(value) => value.into_field_value(),
            None => Value::Null,
        }
    }
}

/// A partial field-to-value mapping used by insert and update operations.
/// Entries keep their accumulation order; on merge, a later entry for the
/// same field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(CompactString, Value)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<CompactString>, value: impl IntoFieldValue) -> Self {
        self.fields.push((field.into(), value.into_field_value()));
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, &Value)> {
        self.fields.iter().map(|(field, value)| (field, value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One or many insert payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadBatch(pub Vec<Payload>);

impl From<Payload> for PayloadBatch {
    fn from(payload: Payload) -> Self {
        Self(vec![payload])
    }
}

impl From<Vec<Payload>> for PayloadBatch {
    fn from(payloads: Vec<Payload>) -> Self {
        Self(payloads)
    }
}
