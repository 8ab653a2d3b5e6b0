use crate::catalog::types::{IntoFieldValue, Payload, PayloadBatch, Row, Value};
use crate::envelope::Envelope;
use crate::error::MockError;
use crate::latency::after;
use crate::query::predicate::{sort_rows, FilterPredicate, Order, SortDirective};
use crate::store::RecordStore;
use compact_str::CompactString;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Which terminal family the chain has committed to. `select` commits to
/// read, `update` commits to mutate; mixing the two afterwards is a fault.
#[derive(Debug, Clone)]
enum ChainMode {
    Uncommitted,
    Read,
    Mutate(Payload),
}

/// A deferred query against one table: filters, an optional sort directive
/// and an optional update payload accumulate across calls, and nothing runs
/// until one of the explicit terminals (`execute`, `maybe_single`, `insert`)
/// is awaited.
///
/// Builder methods return the chain, so violations (mode conflicts, an
/// unsupported `not` operator, an unknown table) are parked and surface as
/// the rejection of the terminal instead.
#[derive(Debug, Clone)]
pub struct QueryChain {
    table: CompactString,
    store: Option<Arc<RecordStore>>,
    latency: Duration,
    predicates: Vec<FilterPredicate>,
    sort: Option<SortDirective>,
    projection: Option<CompactString>,
    mode: ChainMode,
    defect: Option<MockError>,
}

impl QueryChain {
    pub(crate) fn new(table: &str, store: Arc<RecordStore>, latency: Duration) -> Self {
        Self {
            table: table.into(),
            store: Some(store),
            latency,
            predicates: Vec::new(),
            sort: None,
            projection: None,
            mode: ChainMode::Uncommitted,
            defect: None,
        }
    }

    pub(crate) fn unknown_table(table: &str, latency: Duration) -> Self {
        Self {
            table: table.into(),
            store: None,
            latency,
            predicates: Vec::new(),
            sort: None,
            projection: None,
            mode: ChainMode::Uncommitted,
            defect: Some(MockError::UnknownTable {
                table: table.to_string(),
            }),
        }
    }

    fn park(mut self, err: MockError) -> Self {
        // Only the first violation is reported.
        if self.defect.is_none() {
            self.defect = Some(err);
        }
        self
    }

    /// Commits the chain to read mode and records the requested projection.
    /// The projection is accepted but not enforced: the mock always returns
    /// full rows.
    pub fn select(mut self, projection: &str) -> Self {
        if matches!(self.mode, ChainMode::Mutate(_)) {
            return self.park(MockError::ChainModeConflict(
                "select() called after update() on the same chain".into(),
            ));
        }
        self.mode = ChainMode::Read;
        self.projection = Some(projection.into());
        self
    }

    /// Appends an equality predicate. Comparison is by string coercion, so
    /// `eq("id", "2")` matches the integer 2.
    pub fn eq(mut self, field: &str, value: impl IntoFieldValue) -> Self {
        self.predicates
            .push(FilterPredicate::Eq(field.into(), value.into_field_value()));
        self
    }

    /// The legacy not-null spelling: only `not(field, "is", Value::Null)` is
    /// supported; any other operator or operand is a fault.
    pub fn not(mut self, field: &str, operator: &str, value: impl IntoFieldValue) -> Self {
        if operator != "is" || !matches!(value.into_field_value(), Value::Null) {
            return self.park(MockError::Validation(format!(
                "not() supports only the ('is', null) form, got operator '{operator}'"
            )));
        }
        self.predicates.push(FilterPredicate::NotNull(field.into()));
        self
    }

    /// Sets the sort directive, overwriting any prior one. Sorting is a read
    /// concern; ordering a mutate chain is a fault.
    pub fn order(mut self, field: &str, order: Order) -> Self {
        if matches!(self.mode, ChainMode::Mutate(_)) {
            return self.park(MockError::ChainModeConflict(
                "order() called on a mutate chain".into(),
            ));
        }
        self.sort = Some(SortDirective::new(field, order));
        self
    }

    /// Commits the chain to mutate mode and stores the payload; a repeated
    /// call overwrites the payload the way `order` overwrites the sort.
    pub fn update(mut self, payload: Payload) -> Self {
        if matches!(self.mode, ChainMode::Read) {
            return self.park(MockError::ChainModeConflict(
                "update() called after select() on the same chain".into(),
            ));
        }
        self.mode = ChainMode::Mutate(payload);
        self
    }

    /// Resolves the chain: a read chain returns every matching row in store
    /// order (sorted if a directive is set), a mutate chain applies its
    /// payload to every matching row and returns the updated rows. The
    /// store is consulted when resolution starts; the envelope is released
    /// after the simulated round trip.
    pub async fn execute(mut self) -> Result<Envelope<Vec<Row>>, MockError> {
        if let Some(defect) = self.defect.take() {
            return Err(defect);
        }
        let store = self.require_store()?;
        let rows = match &self.mode {
            ChainMode::Mutate(payload) => {
                debug!(table = %self.table, predicates = self.predicates.len(), "resolving mutate chain");
                store.update_rows_where(&self.predicates, payload)?
            }
            _ => {
                debug!(table = %self.table, predicates = self.predicates.len(), "resolving read chain");
                self.read_rows(&store)?
            }
        };
        Ok(after(Envelope::ok(rows), self.latency).await)
    }

    /// Read-only narrowing terminal: the first matching row, or `None` when
    /// nothing matches. Rejects on a mutate chain.
    pub async fn maybe_single(mut self) -> Result<Envelope<Option<Row>>, MockError> {
        if let Some(defect) = self.defect.take() {
            return Err(defect);
        }
        if matches!(self.mode, ChainMode::Mutate(_)) {
            return Err(MockError::ChainModeConflict(
                "maybe_single() called on a mutate chain".into(),
            ));
        }
        let store = self.require_store()?;
        let mut rows = self.read_rows(&store)?;
        let first = if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        };
        Ok(after(Envelope::ok(first), self.latency).await)
    }

    /// Inserts one or many payloads, bypassing predicate accumulation
    /// entirely: a chain that has already committed to a mode or gathered
    /// filters or a sort directive rejects.
    pub async fn insert(
        mut self,
        payloads: impl Into<PayloadBatch>,
    ) -> Result<Envelope<Vec<Row>>, MockError> {
        if let Some(defect) = self.defect.take() {
            return Err(defect);
        }
        if !matches!(self.mode, ChainMode::Uncommitted)
            || !self.predicates.is_empty()
            || self.sort.is_some()
        {
            return Err(MockError::ChainModeConflict(
                "insert() called on a chain with accumulated query state".into(),
            ));
        }
        let batch = payloads.into();
        if batch.0.is_empty() {
            return Err(MockError::Validation(
                "insert requires at least one payload".into(),
            ));
        }
        let store = self.require_store()?;
        let mut rows = Vec::with_capacity(batch.0.len());
        for payload in &batch.0 {
            rows.push(store.insert_row(payload)?);
        }
        Ok(after(Envelope::ok(rows), self.latency).await)
    }

    /// The recorded projection, if any. Resolution always returns full
    /// rows regardless.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    fn require_store(&self) -> Result<Arc<RecordStore>, MockError> {
        self.store
            .clone()
            .ok_or_else(|| MockError::UnknownTable {
                table: self.table.to_string(),
            })
    }

    fn read_rows(&self, store: &RecordStore) -> Result<Vec<Row>, MockError> {
        let schema = store.schema();
        for predicate in &self.predicates {
            schema.require_column(predicate.field())?;
        }
        if let Some(sort) = &self.sort {
            schema.require_column(&sort.field)?;
        }
        let mut rows: Vec<Row> = store
            .all_rows()
            .into_iter()
            .filter(|row| self.predicates.iter().all(|predicate| predicate.matches(row)))
            .collect();
        if let Some(sort) = &self.sort {
            sort_rows(&mut rows, sort);
        }
        Ok(rows)
    }
}
