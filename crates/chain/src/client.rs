//! The execution context seam between the deployer and the chain.

use alloy::primitives::{Address, TxHash, B256};
use async_trait::async_trait;
use openapm_core::receipt::TxReceipt;

use crate::error::ChainError;

/// Remote operations the deployer performs against the Aragon contracts.
///
/// Views return raw values: a zero address is passed through unchanged
/// and rejected by the caller. Writes are signed by (or sent from) `from`
/// and resolve once the transaction is mined successfully.
#[async_trait]
pub trait ApmChain: Send + Sync {
    /// Accounts this context can send transactions from, in order.
    async fn accounts(&self) -> Result<Vec<Address>, ChainError>;

    /// `APMRegistry.registrar()`.
    async fn registry_registrar(&self, registry: Address) -> Result<Address, ChainError>;

    /// `APMRegistry.kernel()`.
    async fn registry_kernel(&self, registry: Address) -> Result<Address, ChainError>;

    /// `APMRegistry.CREATE_REPO_ROLE()`.
    async fn create_repo_role(&self, registry: Address) -> Result<B256, ChainError>;

    /// `Kernel.acl()`.
    async fn kernel_acl(&self, kernel: Address) -> Result<Address, ChainError>;

    /// `ENSSubdomainRegistrar.CREATE_NAME_ROLE()`.
    async fn create_name_role(&self, registrar: Address) -> Result<B256, ChainError>;

    /// Current ENS owner of `label` under the registrar's root node.
    async fn registrar_name_owner(
        &self,
        registrar: Address,
        label_hash: B256,
    ) -> Result<Address, ChainError>;

    /// `ACL.ANY_ENTITY()`.
    async fn any_entity(&self, acl: Address) -> Result<Address, ChainError>;

    /// `ACL.getPermissionManager(app, role)`; zero when unmanaged.
    async fn permission_manager(
        &self,
        acl: Address,
        app: Address,
        role: B256,
    ) -> Result<Address, ChainError>;

    /// `ACL.hasPermission(who, app, role)`.
    async fn has_permission(
        &self,
        acl: Address,
        who: Address,
        app: Address,
        role: B256,
    ) -> Result<bool, ChainError>;

    /// `ACL.createPermission(entity, app, role, manager)`.
    async fn create_permission(
        &self,
        acl: Address,
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
        manager: Address,
    ) -> Result<TxHash, ChainError>;

    /// `ACL.grantPermission(entity, app, role)`.
    async fn grant_permission(
        &self,
        acl: Address,
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
    ) -> Result<TxHash, ChainError>;

    /// `ENSSubdomainRegistrar.createName(label, owner)`.
    async fn create_name(
        &self,
        registrar: Address,
        from: Address,
        label_hash: B256,
        owner: Address,
    ) -> Result<TxHash, ChainError>;

    /// `APMRegistryFactory.newAPM(tld, label, root)`, returning the mined
    /// receipt with its decoded events.
    async fn new_apm(
        &self,
        factory: Address,
        from: Address,
        tld_hash: B256,
        label_hash: B256,
        root: Address,
    ) -> Result<TxReceipt, ChainError>;
}
