use crate::catalog::schema::{ColumnDef, TableSchema};
use crate::catalog::types::{ColumnType, Row, Value};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};

pub const INVITATIONS_TABLE: &str = "invitations";

pub fn invitations_schema() -> TableSchema {
    TableSchema::new(
        INVITATIONS_TABLE,
        "id",
        vec![
            ColumnDef::new("id", ColumnType::Integer, false),
            ColumnDef::new("names", ColumnType::Text, false),
            ColumnDef::new("participants", ColumnType::Integer, false),
            ColumnDef::new("view", ColumnType::Boolean, false),
            ColumnDef::new("accepted", ColumnType::Boolean, false),
            ColumnDef::new("created_at", ColumnType::Timestamp, false),
            ColumnDef::new("table", ColumnType::Text, true),
            ColumnDef::new("ishere", ColumnType::Boolean, false),
            ColumnDef::new("isvirtual", ColumnType::Boolean, false),
        ],
    )
}

/// Twelve guests, identifiers 1 through 12, seven of them accepted.
pub fn seed_rows(now: DateTime<Utc>) -> Vec<Row> {
    vec![
        guest(1, "Alice Hartman", 2, true, true, now, Some("1"), true, false),
        guest(2, "Ben Okafor", 0, true, false, now, None, false, false),
        guest(3, "Clara Nystrom", 1, false, true, now, Some("2"), false, false),
        guest(4, "Dmitri Volkov", 0, true, true, now, Some("2"), false, false),
        guest(5, "Elena Marsh", 3, false, false, now, Some("3"), false, true),
        guest(6, "Farid Haddad", 2, true, true, now, Some("10"), true, false),
        guest(7, "Grace Liu", 0, true, true, now, Some("2"), false, false),
        guest(8, "Hugo Braun", 1, false, false, now, None, false, false),
        guest(9, "Imani Walker", 1, true, true, now, Some("5"), false, false),
        guest(10, "Jonas Petersen", 0, false, true, now, Some("3"), false, false),
        guest(11, "Katya Ivanova", 2, true, false, now, Some("3"), false, false),
        guest(12, "Liam O'Connor", 0, true, false, now, Some("1"), false, false),
    ]
}

pub fn invitations_store() -> RecordStore {
    RecordStore::with_rows(invitations_schema(), seed_rows(Utc::now()))
}

#[allow(clippy::too_many_arguments)]
fn guest(
    id: i64,
    names: &str,
    participants: i64,
    view: bool,
    accepted: bool,
    created_at: DateTime<Utc>,
    table: Option<&str>,
    ishere: bool,
    isvirtual: bool,
) -> Row {
    Row::from_pairs([
        ("id", Value::Integer(id)),
        ("names", Value::Text(names.into())),
        ("participants", Value::Integer(participants)),
        ("view", Value::Boolean(view)),
        ("accepted", Value::Boolean(accepted)),
        ("created_at", Value::Timestamp(created_at)),
        (
            "table",
            table.map_or(Value::Null, |t| Value::Text(t.into())),
        ),
        ("ishere", Value::Boolean(ishere)),
        ("isvirtual", Value::Boolean(isvirtual)),
    ])
}
