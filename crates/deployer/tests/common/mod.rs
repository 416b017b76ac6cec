#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, B256};
use async_trait::async_trait;
use openapm_chain::{ApmChain, ChainError};
use openapm_core::receipt::{ReceiptEvent, TxReceipt};
use tracing_subscriber::EnvFilter;

pub const REGISTRY: Address = Address::repeat_byte(0x01);
pub const REGISTRAR: Address = Address::repeat_byte(0x02);
pub const KERNEL: Address = Address::repeat_byte(0x03);
pub const ACL: Address = Address::repeat_byte(0x04);
pub const FACTORY: Address = Address::repeat_byte(0x0f);
pub const ANY_ENTITY: Address = Address::repeat_byte(0xff);
pub const FIRST_ACCOUNT: Address = Address::repeat_byte(0x0a);
pub const SECOND_ACCOUNT: Address = Address::repeat_byte(0x0b);
pub const NEW_APM: Address = Address::repeat_byte(0xab);

pub const CREATE_NAME_ROLE: B256 = B256::repeat_byte(0xc1);
pub const CREATE_REPO_ROLE: B256 = B256::repeat_byte(0xc2);
pub const DEPLOY_TX: B256 = B256::repeat_byte(0xd7);

/// A remote write observed by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreatePermission {
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
        manager: Address,
    },
    GrantPermission {
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
    },
    CreateName {
        from: Address,
        label_hash: B256,
        owner: Address,
    },
    NewApm {
        from: Address,
        tld_hash: B256,
        label_hash: B256,
        root: Address,
    },
}

/// In-memory Aragon deployment that records every write.
pub struct MockChain {
    pub accounts: Vec<Address>,
    pub registrar: Address,
    pub kernel: Address,
    pub acl: Address,
    /// Existing manager of `CREATE_NAME_ROLE` on the registrar.
    pub name_role_manager: Address,
    pub owner_can_create_names: bool,
    pub repo_creation_open: bool,
    /// Current ENS owner of the label under the registrar root.
    pub name_owner: Address,
    pub reject_create_name: bool,
    /// Events placed in the `newAPM` receipt.
    pub deploy_events: Vec<ReceiptEvent>,
    /// Writes recorded so far; read through [`MockChain::calls`].
    pub calls: Mutex<Vec<Call>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            accounts: vec![FIRST_ACCOUNT, SECOND_ACCOUNT],
            registrar: REGISTRAR,
            kernel: KERNEL,
            acl: ACL,
            name_role_manager: Address::ZERO,
            owner_can_create_names: false,
            repo_creation_open: false,
            name_owner: Address::ZERO,
            reject_create_name: false,
            deploy_events: vec![
                ReceiptEvent::Unrecognized {
                    topic0: Some(B256::repeat_byte(0x99)),
                },
                ReceiptEvent::DeployApm {
                    node: B256::repeat_byte(0x0d),
                    apm: NEW_APM,
                },
            ],
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockChain {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> TxHash {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        B256::with_last_byte(calls.len() as u8)
    }
}

#[async_trait]
impl ApmChain for MockChain {
    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        Ok(self.accounts.clone())
    }

    async fn registry_registrar(&self, registry: Address) -> Result<Address, ChainError> {
        assert_eq!(registry, REGISTRY);
        Ok(self.registrar)
    }

    async fn registry_kernel(&self, registry: Address) -> Result<Address, ChainError> {
        assert_eq!(registry, REGISTRY);
        Ok(self.kernel)
    }

    async fn create_repo_role(&self, registry: Address) -> Result<B256, ChainError> {
        assert_eq!(registry, REGISTRY);
        Ok(CREATE_REPO_ROLE)
    }

    async fn kernel_acl(&self, kernel: Address) -> Result<Address, ChainError> {
        assert_eq!(kernel, KERNEL);
        Ok(self.acl)
    }

    async fn create_name_role(&self, registrar: Address) -> Result<B256, ChainError> {
        assert_eq!(registrar, REGISTRAR);
        Ok(CREATE_NAME_ROLE)
    }

    async fn registrar_name_owner(
        &self,
        registrar: Address,
        _label_hash: B256,
    ) -> Result<Address, ChainError> {
        assert_eq!(registrar, REGISTRAR);
        Ok(self.name_owner)
    }

    async fn any_entity(&self, acl: Address) -> Result<Address, ChainError> {
        assert_eq!(acl, ACL);
        Ok(ANY_ENTITY)
    }

    async fn permission_manager(
        &self,
        acl: Address,
        app: Address,
        role: B256,
    ) -> Result<Address, ChainError> {
        assert_eq!((acl, app, role), (ACL, REGISTRAR, CREATE_NAME_ROLE));
        Ok(self.name_role_manager)
    }

    async fn has_permission(
        &self,
        acl: Address,
        who: Address,
        app: Address,
        role: B256,
    ) -> Result<bool, ChainError> {
        assert_eq!(acl, ACL);
        if (who, app, role) == (ANY_ENTITY, REGISTRY, CREATE_REPO_ROLE) {
            return Ok(self.repo_creation_open);
        }
        if (app, role) == (REGISTRAR, CREATE_NAME_ROLE) {
            return Ok(self.owner_can_create_names);
        }
        Ok(false)
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
        assert_eq!(acl, ACL);
        Ok(self.record(Call::CreatePermission {
            from,
            entity,
            app,
            role,
            manager,
        }))
    }

    async fn grant_permission(
        &self,
        acl: Address,
        from: Address,
        entity: Address,
        app: Address,
        role: B256,
    ) -> Result<TxHash, ChainError> {
        assert_eq!(acl, ACL);
        Ok(self.record(Call::GrantPermission {
            from,
            entity,
            app,
            role,
        }))
    }

    async fn create_name(
        &self,
        registrar: Address,
        from: Address,
        label_hash: B256,
        owner: Address,
    ) -> Result<TxHash, ChainError> {
        assert_eq!(registrar, REGISTRAR);
        let tx_hash = self.record(Call::CreateName {
            from,
            label_hash,
            owner,
        });
        if self.reject_create_name {
            return Err(ChainError::Reverted {
                call: "ENSSubdomainRegistrar.createName",
                tx_hash,
            });
        }
        Ok(tx_hash)
    }

    async fn new_apm(
        &self,
        factory: Address,
        from: Address,
        tld_hash: B256,
        label_hash: B256,
        root: Address,
    ) -> Result<TxReceipt, ChainError> {
        assert_eq!(factory, FACTORY);
        self.record(Call::NewApm {
            from,
            tld_hash,
            label_hash,
            root,
        });
        Ok(TxReceipt::new(DEPLOY_TX, self.deploy_events.clone()))
    }
}

/// Log output captured from the deployer while a guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route the deployer's tracing output into a buffer for the current
/// thread. `#[tokio::test]` runs on a single thread, so async code under
/// test is covered.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("openapm_deployer=trace"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}

/// Config pointing at the mock contracts.
pub fn mock_config(verbose: bool) -> openapm_deployer::DeployConfig {
    openapm_deployer::DeployConfig {
        registry: REGISTRY,
        factory: FACTORY,
        verbose,
        ..Default::default()
    }
}
