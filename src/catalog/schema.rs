use crate::catalog::types::{ColumnType, Payload, Value};
use crate::error::MockError;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: CompactString,
    pub col_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<CompactString>, col_type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            col_type,
            nullable,
        }
    }

    /// The value an insert fills in when the payload leaves this column
    /// unspecified: `Null` for nullable columns, otherwise the type's empty
    /// default (empty text, zero, false, the current timestamp).
    pub fn default_value(&self, now: DateTime<Utc>) -> Value {
        if self.nullable {
            return Value::Null;
        }
        match self.col_type {
            ColumnType::Text => Value::Text(CompactString::default()),
            ColumnType::Integer => Value::Integer(0),
            ColumnType::Boolean => Value::Boolean(false),
            ColumnType::Timestamp => Value::Timestamp(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: CompactString,
    pub id_column: CompactString,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(
        table_name: impl Into<CompactString>,
        id_column: impl Into<CompactString>,
        columns: Vec<ColumnDef>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            id_column: id_column.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn require_column(&self, field: &str) -> Result<&ColumnDef, MockError> {
        self.column(field).ok_or_else(|| MockError::UnknownField {
            table: self.table_name.to_string(),
            field: field.to_string(),
        })
    }

    /// Validates an insert/update payload: every field must name a schema
    /// column other than the identifier, and every value must match the
    /// column type (or be `Null` for a nullable column). The legacy mock
    /// coerced silently; this layer rejects instead.
    pub fn validate_payload(&self, payload: &Payload) -> Result<(), MockError> {
        for (field, value) in payload.iter() {
            if *field == self.id_column {
                return Err(self.malformed(format!(
                    "field '{field}' is assigned by the store and cannot be set"
                )));
            }
            let column = self
                .column(field)
                .ok_or_else(|| self.malformed(format!("unknown field '{field}'")))?;
            match value.column_type() {
                None if column.nullable => {}
                None => {
                    return Err(self.malformed(format!(
                        "field '{field}' is not nullable"
                    )));
                }
                Some(actual) if actual == column.col_type => {}
                Some(_) => {
                    return Err(self.malformed(format!(
                        "field '{field}' expects {:?}, got {}",
                        column.col_type,
                        value.kind()
                    )));
                }
            }
        }
        Ok(())
    }

    fn malformed(&self, reason: String) -> MockError {
        MockError::MalformedPayload {
            table: self.table_name.to_string(),
            reason,
        }
    }
}
