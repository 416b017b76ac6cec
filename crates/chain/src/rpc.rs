//! JSON-RPC implementation of [`ApmChain`] on top of an `alloy` provider.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, B256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use openapm_core::hashing::subnode;
use openapm_core::receipt::TxReceipt;

use crate::bindings::{APMRegistry, APMRegistryFactory, ENSSubdomainRegistrar, Kernel, ACL, ENS};
use crate::client::ApmChain;
use crate::error::ChainError;
use crate::events::decode_receipt_events;

/// Chain client for one JSON-RPC endpoint.
///
/// With a private key, transactions are signed locally and the signer is
/// the only account. Without one, transactions go out through
/// `eth_sendTransaction` and the node's unlocked accounts are used.
pub struct RpcChain {
    provider: DynProvider,
    signer: Option<Address>,
}

impl RpcChain {
    /// Connect to `rpc_url`, optionally signing with `private_key`
    /// (hex, with or without `0x`).
    pub fn connect(rpc_url: &str, private_key: Option<&str>) -> Result<Self, ChainError> {
        let url: Url = rpc_url.parse().map_err(|e| ChainError::InvalidRpcUrl {
            url: rpc_url.to_string(),
            reason: format!("{e}"),
        })?;

        let (provider, signer) = match private_key {
            Some(key) => {
                let signer: PrivateKeySigner = key
                    .parse()
                    .map_err(|e| ChainError::InvalidPrivateKey(format!("{e}")))?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_http(url)
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        tracing::info!(
            rpc_url = %rpc_url,
            local_signer = ?signer,
            "Connected chain client",
        );

        Ok(Self { provider, signer })
    }

    /// Wait for a submitted transaction and reject reverted receipts.
    async fn confirm(
        call: &'static str,
        pending: PendingTransactionBuilder<alloy::network::Ethereum>,
    ) -> Result<TransactionReceipt, ChainError> {
        let tx_hash = *pending.tx_hash();
        tracing::debug!(call, %tx_hash, "Waiting for transaction receipt");

        let receipt = pending.get_receipt().await?;
        ensure_succeeded(call, &receipt)?;

        tracing::debug!(call, %tx_hash, block = ?receipt.block_number, "Transaction mined");
        Ok(receipt)
    }
}

/// Reject a mined receipt whose execution reverted.
fn ensure_succeeded(call: &'static str, receipt: &TransactionReceipt) -> Result<(), ChainError> {
    if !receipt.status() {
        return Err(ChainError::Reverted {
            call,
            tx_hash: receipt.transaction_hash,
        });
    }
    Ok(())
}

/// Transaction hash and decoded events of a mined receipt.
fn to_tx_receipt(receipt: &TransactionReceipt) -> TxReceipt {
    let events = decode_receipt_events(receipt.inner.logs().iter().map(|log| &log.inner));
    TxReceipt::new(receipt.transaction_hash, events)
}

#[async_trait]
impl ApmChain for RpcChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        match self.signer {
            Some(address) => Ok(vec![address]),
            None => Ok(self.provider.get_accounts().await?),
        }
    }

    async fn registry_registrar(&self, registry: Address) -> Result<Address, ChainError> {
        let apm = APMRegistry::new(registry, self.provider.clone());
        Ok(apm.registrar().call().await?)
    }

    async fn registry_kernel(&self, registry: Address) -> Result<Address, ChainError> {
        let apm = APMRegistry::new(registry, self.provider.clone());
        Ok(apm.kernel().call().await?)
    }

    async fn create_repo_role(&self, registry: Address) -> Result<B256, ChainError> {
        let apm = APMRegistry::new(registry, self.provider.clone());
        Ok(apm.CREATE_REPO_ROLE().call().await?)
    }

    async fn kernel_acl(&self, kernel: Address) -> Result<Address, ChainError> {
        let kernel = Kernel::new(kernel, self.provider.clone());
        Ok(kernel.acl().call().await?)
    }

    async fn create_name_role(&self, registrar: Address) -> Result<B256, ChainError> {
        let registrar = ENSSubdomainRegistrar::new(registrar, self.provider.clone());
        Ok(registrar.CREATE_NAME_ROLE().call().await?)
    }

    async fn registrar_name_owner(
        &self,
        registrar: Address,
        label_hash: B256,
    ) -> Result<Address, ChainError> {
        let registrar = ENSSubdomainRegistrar::new(registrar, self.provider.clone());
        let ens = registrar.ens().call().await?;
        let root_node = registrar.rootNode().call().await?;

        let ens = ENS::new(ens, self.provider.clone());
        Ok(ens.owner(subnode(root_node, label_hash)).call().await?)
    }

    async fn any_entity(&self, acl: Address) -> Result<Address, ChainError> {
        let acl = ACL::new(acl, self.provider.clone());
        Ok(acl.ANY_ENTITY().call().await?)
    }

    async fn permission_manager(
        &self,
        acl: Address,
        app: Address,
        role: B256,
    ) -> Result<Address, ChainError> {
        let acl = ACL::new(acl, self.provider.clone());
        Ok(acl.getPermissionManager(app, role).call().await?)
    }

    async fn has_permission(
        &self,
        acl: Address,
        who: Address,
        app: Address,
        role: B256,
    ) -> Result<bool, ChainError> {
        let acl = ACL::new(acl, self.provider.clone());
        Ok(acl.hasPermission(who, app, role).call().await?)
    }

    async fn create_permission(
        &self,
        acl: Address,
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
        manager: Address,
    ) -> Result<TxHash, ChainError> {
        let acl = ACL::new(acl, self.provider.clone());
        let pending = acl
            .createPermission(entity, app, role, manager)
            .from(from)
            .send()
            .await?;
        let receipt = Self::confirm("ACL.createPermission", pending).await?;
        Ok(receipt.transaction_hash)
    }

    async fn grant_permission(
        &self,
        acl: Address,
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
    ) -> Result<TxHash, ChainError> {
        let acl = ACL::new(acl, self.provider.clone());
        let pending = acl
            .grantPermission(entity, app, role)
            .from(from)
            .send()
            .await?;
        let receipt = Self::confirm("ACL.grantPermission", pending).await?;
        Ok(receipt.transaction_hash)
    }

    async fn create_name(
        &self,
        registrar: Address,
        from: Address,
        label_hash: B256,
        owner: Address,
    ) -> Result<TxHash, ChainError> {
        let registrar = ENSSubdomainRegistrar::new(registrar, self.provider.clone());
        let pending = registrar
            .createName(label_hash, owner)
            .from(from)
            .send()
            .await?;
        let receipt = Self::confirm("ENSSubdomainRegistrar.createName", pending).await?;
        Ok(receipt.transaction_hash)
    }

    async fn new_apm(
        &self,
        factory: Address,
        from: Address,
        tld_hash: B256,
        label_hash: B256,
        root: Address,
    ) -> Result<TxReceipt, ChainError> {
        let factory = APMRegistryFactory::new(factory, self.provider.clone());
        let pending = factory
            .newAPM(tld_hash, label_hash, root)
            .from(from)
            .send()
            .await?;
        let receipt = Self::confirm("APMRegistryFactory.newAPM", pending).await?;
        Ok(to_tx_receipt(&receipt))
    }
}
