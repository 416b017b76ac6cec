use openapm_chain::ChainError;
use openapm_core::error::CoreError;

/// Failure of a deployment run.
///
/// Transactions committed before the failing step stay in effect; no
/// step is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A remote lookup or transaction failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// A lookup resolved to nothing usable, or the factory receipt lacked
    /// the creation event.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No owner was configured and the execution context has no accounts.
    #[error("No owner configured and the execution context exposes no accounts")]
    NoAccounts,

    /// The registrar refused to assign the subdomain to the factory.
    #[error("Could not assign '{name}' to the factory: {source}")]
    NameAssignment { name: String, source: ChainError },
}
