use crate::catalog::types::{Payload, Row, Value};
use crate::error::MockError;
use crate::fixture::INVITATIONS_TABLE;
use crate::query::predicate::Order;
use crate::MockClient;
use chrono::{DateTime, Utc};

pub trait TryFromRow: Sized {
    fn try_from_row(row: &Row) -> Result<Self, RowDecodeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDecodeError {
    #[error("missing field '{field}'")]
    MissingField { field: String },
    #[error("field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Mock(#[from] MockError),
    #[error(transparent)]
    Decode(#[from] RowDecodeError),
}

pub fn decode_rows<T: TryFromRow>(rows: &[Row]) -> Result<Vec<T>, RowDecodeError> {
    rows.iter().map(T::try_from_row).collect()
}

pub fn text_field<'a>(row: &'a Row, field: &str) -> Result<&'a str, RowDecodeError> {
    match row.get(field) {
        Some(Value::Text(v)) => Ok(v.as_str()),
        Some(other) => Err(mismatch(field, "Text", other)),
        None => Err(missing(field)),
    }
}

pub fn nullable_text_field<'a>(
    row: &'a Row,
    field: &str,
) -> Result<Option<&'a str>, RowDecodeError> {
    match row.get(field) {
        Some(Value::Text(v)) => Ok(Some(v.as_str())),
        Some(Value::Null) => Ok(None),
        Some(other) => Err(mismatch(field, "Text", other)),
        None => Err(missing(field)),
    }
}

pub fn i64_field(row: &Row, field: &str) -> Result<i64, RowDecodeError> {
    match row.get(field) {
        Some(Value::Integer(v)) => Ok(*v),
        Some(other) => Err(mismatch(field, "Integer", other)),
        None => Err(missing(field)),
    }
}

pub fn bool_field(row: &Row, field: &str) -> Result<bool, RowDecodeError> {
    match row.get(field) {
        Some(Value::Boolean(v)) => Ok(*v),
        Some(other) => Err(mismatch(field, "Boolean", other)),
        None => Err(missing(field)),
    }
}

pub fn timestamp_field(row: &Row, field: &str) -> Result<DateTime<Utc>, RowDecodeError> {
    match row.get(field) {
        Some(Value::Timestamp(v)) => Ok(*v),
        Some(other) => Err(mismatch(field, "Timestamp", other)),
        None => Err(missing(field)),
    }
}

fn missing(field: &str) -> RowDecodeError {
    RowDecodeError::MissingField {
        field: field.to_string(),
    }
}

fn mismatch(field: &str, expected: &'static str, actual: &Value) -> RowDecodeError {
    RowDecodeError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: i64,
    pub names: String,
    pub participants: i64,
    pub view: bool,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
    pub table: Option<String>,
    pub ishere: bool,
    pub isvirtual: bool,
}

impl TryFromRow for Invitation {
    fn try_from_row(row: &Row) -> Result<Self, RowDecodeError> {
        Ok(Self {
            id: i64_field(row, "id")?,
            names: text_field(row, "names")?.to_string(),
            participants: i64_field(row, "participants")?,
            view: bool_field(row, "view")?,
            accepted: bool_field(row, "accepted")?,
            created_at: timestamp_field(row, "created_at")?,
            table: nullable_text_field(row, "table")?.map(str::to_string),
            ishere: bool_field(row, "ishere")?,
            isvirtual: bool_field(row, "isvirtual")?,
        })
    }
}

/// Typed convenience operations over the invitations table, mirroring the
/// access patterns of the application the mock was built for: listing
/// (optionally accepted-only), lookup by id, guest registration, edits,
/// check-in toggling and marking an invitation as viewed.
pub struct InvitationRepository<'a> {
    client: &'a MockClient,
}

impl<'a> InvitationRepository<'a> {
    pub fn new(client: &'a MockClient) -> Self {
        Self { client }
    }

    /// Newest first; the accepted-only variant mirrors the guest list view.
    pub async fn list(&self, accepted_only: bool) -> Result<Vec<Invitation>, RepositoryError> {
        let mut chain = self
            .client
            .from(INVITATIONS_TABLE)
            .select("*")
            .order("created_at", Order::Desc);
        if accepted_only {
            chain = chain.eq("accepted", true);
        }
        let envelope = chain.execute().await?;
        Ok(decode_rows(&envelope.data)?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Invitation>, RepositoryError> {
        let envelope = self
            .client
            .from(INVITATIONS_TABLE)
            .select("*")
            .eq("id", id)
            .maybe_single()
            .await?;
        match envelope.data {
            Some(row) => Ok(Some(Invitation::try_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Registers a guest the way the RSVP form does: not yet viewed, not yet
    /// accepted.
    pub async fn add(
        &self,
        names: &str,
        participants: i64,
        table: Option<&str>,
    ) -> Result<Invitation, RepositoryError> {
        let payload = Payload::new()
            .set("names", names)
            .set("participants", participants)
            .set("table", table)
            .set("view", false)
            .set("accepted", false);
        let envelope = self.client.from(INVITATIONS_TABLE).insert(payload).await?;
        let row = envelope
            .data
            .first()
            .expect("insert returns the stored row");
        Ok(Invitation::try_from_row(row)?)
    }

    pub async fn update_details(
        &self,
        id: i64,
        names: &str,
        participants: i64,
        table: Option<&str>,
    ) -> Result<Option<Invitation>, RepositoryError> {
        let payload = Payload::new()
            .set("names", names)
            .set("participants", participants)
            .set("table", table);
        self.apply_update(id, payload).await
    }

    pub async fn set_here(
        &self,
        id: i64,
        here: bool,
    ) -> Result<Option<Invitation>, RepositoryError> {
        self.apply_update(id, Payload::new().set("ishere", here)).await
    }

    /// Flips the check-in flag; `None` when no such invitation exists.
    pub async fn toggle_here(&self, id: i64) -> Result<Option<Invitation>, RepositoryError> {
        match self.find_by_id(id).await? {
            Some(current) => self.set_here(id, !current.ishere).await,
            None => Ok(None),
        }
    }

    pub async fn mark_viewed(&self, id: i64) -> Result<Option<Invitation>, RepositoryError> {
        self.apply_update(id, Payload::new().set("view", true)).await
    }

    async fn apply_update(
        &self,
        id: i64,
        payload: Payload,
    ) -> Result<Option<Invitation>, RepositoryError> {
        let envelope = self
            .client
            .from(INVITATIONS_TABLE)
            .update(payload)
            .eq("id", id)
            .execute()
            .await?;
        match envelope.data.first() {
            Some(row) => Ok(Some(Invitation::try_from_row(row)?)),
            None => Ok(None),
        }
    }
}
