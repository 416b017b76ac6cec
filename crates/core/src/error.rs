use alloy_primitives::B256;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup returned the zero address where a contract was expected.
    #[error("Unresolved address: {what} resolved to the zero address")]
    Unresolved { what: &'static str },

    /// The factory receipt carried no creation event to read the new
    /// registry address from.
    #[error("Creation event not found: no {event} event in transaction {tx_hash}")]
    CreationEventMissing { event: &'static str, tx_hash: B256 },

    #[error("Invalid name: {0}")]
    InvalidName(String),
}
