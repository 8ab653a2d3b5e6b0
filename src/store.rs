use crate::catalog::schema::TableSchema;
use crate::catalog::types::{Payload, Row, Value};
use crate::error::MockError;
use crate::query::predicate::FilterPredicate;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;

/// The in-memory table all chains of one handle read from and mutate.
///
/// Shared behind an `Arc` so overlapping chain resolutions operate on one
/// mutable store; each operation takes the lock for a single scan and there
/// is no transaction boundary spanning multiple calls.
#[derive(Debug)]
pub struct RecordStore {
    schema: TableSchema,
    rows: Mutex<Vec<Row>>,
}

impl RecordStore {
    pub fn new(schema: TableSchema) -> Self {
        Self::with_rows(schema, Vec::new())
    }

    /// Seeds the store with fixture rows. Seed rows are trusted to match the
    /// schema; only payloads arriving through the public mutation surface
    /// are validated.
    pub fn with_rows(schema: TableSchema, rows: Vec<Row>) -> Self {
        Self {
            schema,
            rows: Mutex::new(rows),
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Snapshot of all rows in store order.
    pub fn all_rows(&self) -> Vec<Row> {
        self.rows.lock().clone()
    }

    /// Validates the payload, assigns the next identifier, fills unspecified
    /// fields with schema defaults, appends the row and returns it.
    pub fn insert_row(&self, payload: &Payload) -> Result<Row, MockError> {
        self.schema.validate_payload(payload)?;
        let now = Utc::now();
        let mut rows = self.rows.lock();
        let id = next_id(&rows, &self.schema);
        let mut row = Row::default();
        for column in &self.schema.columns {
            let value = if column.name == self.schema.id_column {
                Value::Integer(id)
            } else {
                payload
                    .get(&column.name)
                    .cloned()
                    .unwrap_or_else(|| column.default_value(now))
            };
            row.values.insert(column.name.clone(), value);
        }
        rows.push(row.clone());
        debug!(table = %self.schema.table_name, id, "inserted row");
        Ok(row)
    }

    /// Single scan: rows satisfying every predicate get the payload
    /// shallow-merged in place and are returned in store order. Unmatched
    /// rows are untouched and not returned.
    pub fn update_rows_where(
        &self,
        predicates: &[FilterPredicate],
        payload: &Payload,
    ) -> Result<Vec<Row>, MockError> {
        self.schema.validate_payload(payload)?;
        for predicate in predicates {
            self.schema.require_column(predicate.field())?;
        }
        let mut rows = self.rows.lock();
        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if predicates.iter().all(|predicate| predicate.matches(row)) {
                for (field, value) in payload.iter() {
                    row.values.insert(field.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        debug!(
            table = %self.schema.table_name,
            matched = updated.len(),
            "applied update"
        );
        Ok(updated)
    }
}

fn next_id(rows: &[Row], schema: &TableSchema) -> i64 {
    rows.iter()
        .filter_map(|row| match row.get(&schema.id_column) {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        })
        .max()
        .map_or(1, |max| max + 1)
}
