use compact_str::CompactString;
use serde::Serialize;

/// The universal `{ data, error }` response shape of the backend contract.
///
/// The mock layer never populates `error`: its own faults reject the async
/// operation instead. The field exists so the envelope serializes to the
/// exact wire shape the real backend produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub error: Option<ErrorBody>,
}

/// Error payload shape of the real backend. Never constructed by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: CompactString,
    pub message: CompactString,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { data, error: None }
    }
}
