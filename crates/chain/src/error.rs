use alloy::primitives::TxHash;

/// Errors raised while talking to the chain.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A plain JSON-RPC request failed (network, node error, bad response).
    #[error("RPC transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    /// A contract call or transaction submission failed, including reverts
    /// reported during gas estimation.
    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    /// A submitted transaction could not be followed to its receipt.
    #[error("Pending transaction failed: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    /// The transaction was mined but reverted.
    #[error("Transaction {tx_hash} for {call} reverted")]
    Reverted { call: &'static str, tx_hash: TxHash },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },
}
