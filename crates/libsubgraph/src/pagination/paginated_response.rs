use serde_json::Value as JsonValue;

/// The merged result of every round of a paginated fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedResponse {
    pub(crate) cancelled: bool,
    pub(crate) data: JsonValue,
    pub(crate) rounds: usize,
}
impl PaginatedResponse {
    /// Whether the fetch was stopped early by a
    /// [`CancellationToken`](crate::pagination::CancellationToken). Lists in
    /// `data` then hold only the pages received before cancellation.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// The merged `data` object, keyed by top-level response key.
    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    pub fn into_data(self) -> JsonValue {
        self.data
    }

    /// How many transport calls were made.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
