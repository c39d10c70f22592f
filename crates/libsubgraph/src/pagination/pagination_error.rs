use crate::pagination::PaginatedResponse;
use crate::pagination::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
    /// A transport call failed. `partial` keeps the fields that had been
    /// completely fetched before the failing round; pages already received
    /// for fields still in progress are dropped.
    #[error("Transport failed during pagination round {round}: {source}")]
    Transport {
        partial: Box<PaginatedResponse>,
        round: usize,
        #[source]
        source: TransportError,
    },
}
impl PaginationError {
    pub fn partial(&self) -> &PaginatedResponse {
        match self {
            Self::Transport { partial, .. } => partial,
        }
    }
}
