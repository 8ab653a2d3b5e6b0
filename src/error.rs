use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockErrorCode {
    MalformedPayload,
    UnknownTable,
    UnknownField,
    ChainModeConflict,
    Validation,
}

impl MockErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            MockErrorCode::MalformedPayload => "malformed_payload",
            MockErrorCode::UnknownTable => "unknown_table",
            MockErrorCode::UnknownField => "unknown_field",
            MockErrorCode::ChainModeConflict => "chain_mode_conflict",
            MockErrorCode::Validation => "validation",
        }
    }
}

/// Faults raised by the mock layer. These always surface as the `Err` side of
/// an operation, never inside a result envelope: a populated `error` field is
/// a capability reserved for the real backend, and callers must handle both
/// channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    #[error("malformed payload for table '{table}': {reason}")]
    MalformedPayload { table: String, reason: String },
    #[error("table '{table}' is not hosted by this client")]
    UnknownTable { table: String },
    #[error("unknown field '{field}' in table '{table}'")]
    UnknownField { table: String, field: String },
    #[error("chain mode conflict: {0}")]
    ChainModeConflict(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl MockError {
    pub fn code(&self) -> MockErrorCode {
        match self {
            MockError::MalformedPayload { .. } => MockErrorCode::MalformedPayload,
            MockError::UnknownTable { .. } => MockErrorCode::UnknownTable,
            MockError::UnknownField { .. } => MockErrorCode::UnknownField,
            MockError::ChainModeConflict(_) => MockErrorCode::ChainModeConflict,
            MockError::Validation(_) => MockErrorCode::Validation,
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code().as_str()
    }
}
