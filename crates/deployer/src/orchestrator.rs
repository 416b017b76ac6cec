//! Deployment of the open APM registry.
//!
//! [`deploy_open_apm`] runs a fixed sequence of remote calls against an
//! existing APM deployment:
//!
//! 1. resolve the owner (configured, or the first available account);
//! 2. hash the parent domain (namehash) and the label (raw keccak);
//! 3. look up the registrar behind the existing registry;
//! 4. read `CREATE_NAME_ROLE` and locate the ACL through the kernel;
//! 5. give the owner `CREATE_NAME_ROLE` on the registrar;
//! 6. assign the label to the factory;
//! 7. call `newAPM` on the factory;
//! 8. read the new registry from the `DeployAPM` event;
//! 9. open `CREATE_REPO_ROLE` on the existing registry to any entity;
//! 10. return the addresses involved.
//!
//! Each step waits for the previous one. Nothing is retried and nothing is
//! rolled back. Steps 5, 6 and 9 check the current chain state first and
//! are skipped when their effect is already in place, so a run interrupted
//! before step 7 can be repeated.

use alloy::primitives::{Address, B256};
use openapm_chain::ApmChain;
use openapm_core::constants::{
    name_ownership_hint, APM_FACTORY_ADDRESS, APM_REGISTRY_ADDRESS, OPEN_LABEL, PARENT_DOMAIN,
};
use openapm_core::hashing::{check_label, labelhash, namehash};
use openapm_core::permission::Permission;
use openapm_core::resolve::ensure_resolved;
use serde::Serialize;

use crate::error::DeployError;

/// Emit an operator-facing progress line when verbose output is enabled.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        }
    };
}

/// Inputs of one deployment run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Registry owner and transaction sender. `None` selects the first
    /// account of the execution context.
    pub owner: Option<Address>,
    /// Log every step and computed value.
    pub verbose: bool,
    /// Existing APM registry owning the parent domain.
    pub registry: Address,
    /// Factory that deploys the new registry.
    pub factory: Address,
    pub parent_domain: String,
    pub label: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            owner: None,
            verbose: true,
            registry: APM_REGISTRY_ADDRESS,
            factory: APM_FACTORY_ADDRESS,
            parent_domain: PARENT_DOMAIN.to_string(),
            label: OPEN_LABEL.to_string(),
        }
    }
}

impl DeployConfig {
    /// Full name of the registry being deployed, e.g. `open.aragonpm.eth`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.label, self.parent_domain)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenApmDeployment {
    /// Newly deployed registry.
    pub apm: Address,
    pub factory: Address,
    /// Existing registry the new one was deployed next to.
    pub registry: Address,
    pub registrar: Address,
    pub acl: Address,
    pub owner: Address,
    pub name: String,
    pub tld_hash: B256,
    pub label_hash: B256,
    /// Hash of the `newAPM` transaction.
    pub deploy_tx: B256,
}

/// Deploy the open APM registry and open repo creation to everyone.
pub async fn deploy_open_apm(
    chain: &dyn ApmChain,
    config: &DeployConfig,
) -> Result<OpenApmDeployment, DeployError> {
    let verbose = config.verbose;
    let name = config.full_name();

    let owner = resolve_owner(chain, config).await?;
    step!(verbose, %owner, "Owner: {owner}");

    let tld_hash = namehash(&config.parent_domain)?;
    let label_hash = labelhash(check_label(&config.label)?);

    let registry = ensure_resolved(config.registry, "APM registry")?;
    let factory = ensure_resolved(config.factory, "APM registry factory")?;

    let registrar = ensure_resolved(
        chain.registry_registrar(registry).await?,
        "ENS subdomain registrar",
    )?;
    let create_name_role = chain.create_name_role(registrar).await?;

    step!(verbose, "Managing permissions...");
    let kernel = ensure_resolved(chain.registry_kernel(registry).await?, "kernel")?;
    let acl = ensure_resolved(chain.kernel_acl(kernel).await?, "ACL")?;

    step!(
        verbose,
        %registrar,
        role = %create_name_role,
        "Create permission for owner on CREATE_NAME_ROLE",
    );
    ensure_owner_can_create_names(chain, acl, owner, registrar, create_name_role, verbose).await?;
    step!(verbose, "=========");

    step!(verbose, "TLD: {} ({tld_hash})", config.parent_domain);
    step!(verbose, "Label: {} ({label_hash})", config.label);
    step!(verbose, "=========");

    step!(verbose, "Assigning ENS name ({name}) to factory...");
    assign_name_to_factory(chain, config, registrar, owner, label_hash, factory).await?;

    step!(verbose, "Deploying Open APM...");
    let receipt = chain
        .new_apm(factory, owner, tld_hash, label_hash, owner)
        .await?;
    let apm = receipt.deployed_apm()?;

    step!(verbose, "=========");
    step!(verbose, "# Open APM:");
    step!(verbose, "Address: {apm}");
    step!(verbose, "Transaction hash: {}", receipt.tx_hash);
    step!(verbose, "=========");

    step!(
        verbose,
        "Grant permission to any account to create repos in {name}"
    );
    open_repo_creation(chain, acl, owner, registry, verbose).await?;
    step!(verbose, "=========");

    Ok(OpenApmDeployment {
        apm,
        factory,
        registry,
        registrar,
        acl,
        owner,
        name,
        tld_hash,
        label_hash,
        deploy_tx: receipt.tx_hash,
    })
}

/// Configured owner, or the first account of the execution context.
async fn resolve_owner(chain: &dyn ApmChain, config: &DeployConfig) -> Result<Address, DeployError> {
    if let Some(owner) = config.owner {
        return Ok(ensure_resolved(owner, "configured owner")?);
    }

    let owner = chain
        .accounts()
        .await?
        .first()
        .copied()
        .ok_or(DeployError::NoAccounts)?;

    if config.verbose {
        tracing::warn!(
            %owner,
            "OWNER env variable not found, setting APM owner to the provider's first account"
        );
    }
    Ok(owner)
}

/// Step 5: owner holds `CREATE_NAME_ROLE` on the registrar, managed by the
/// owner when the entry is new.
async fn ensure_owner_can_create_names(
    chain: &dyn ApmChain,
    acl: Address,
    owner: Address,
    registrar: Address,
    role: B256,
    verbose: bool,
) -> Result<(), DeployError> {
    let manager = chain.permission_manager(acl, registrar, role).await?;

    if manager.is_zero() {
        let permission = Permission::create(owner, registrar, role, owner);
        let tx = chain
            .create_permission(acl, owner, owner, registrar, role, owner)
            .await?;
        step!(verbose, %tx, "Created permission: {permission}");
        return Ok(());
    }

    if chain.has_permission(acl, owner, registrar, role).await? {
        step!(verbose, %manager, "Owner already holds CREATE_NAME_ROLE, skipping");
        return Ok(());
    }

    let permission = Permission::grant(owner, registrar, role);
    let tx = chain
        .grant_permission(acl, owner, owner, registrar, role)
        .await?;
    step!(verbose, %tx, %manager, "Granted permission on managed entry: {permission}");
    Ok(())
}

/// Step 6: the label belongs to the factory.
///
/// A refused assignment is reported with an ownership hint regardless of
/// verbosity, then returned as [`DeployError::NameAssignment`].
async fn assign_name_to_factory(
    chain: &dyn ApmChain,
    config: &DeployConfig,
    registrar: Address,
    owner: Address,
    label_hash: B256,
    factory: Address,
) -> Result<(), DeployError> {
    let current = chain.registrar_name_owner(registrar, label_hash).await?;
    if current == factory {
        step!(config.verbose, %factory, "Name already assigned to factory, skipping");
        return Ok(());
    }

    match chain
        .create_name(registrar, owner, label_hash, factory)
        .await
    {
        Ok(tx) => {
            step!(config.verbose, %tx, "Name assigned");
            Ok(())
        }
        Err(source) => {
            tracing::error!(
                error = %source,
                "{}",
                name_ownership_hint(&config.label, &config.parent_domain)
            );
            Err(DeployError::NameAssignment {
                name: config.full_name(),
                source,
            })
        }
    }
}

/// Step 9: any entity may create repos on the existing registry.
async fn open_repo_creation(
    chain: &dyn ApmChain,
    acl: Address,
    owner: Address,
    registry: Address,
    verbose: bool,
) -> Result<(), DeployError> {
    let any_entity = ensure_resolved(chain.any_entity(acl).await?, "ACL ANY_ENTITY")?;
    let create_repo_role = chain.create_repo_role(registry).await?;

    if chain
        .has_permission(acl, any_entity, registry, create_repo_role)
        .await?
    {
        step!(verbose, "Repo creation already open to any entity, skipping");
        return Ok(());
    }

    let permission = Permission::grant(any_entity, registry, create_repo_role);
    let tx = chain
        .grant_permission(acl, owner, any_entity, registry, create_repo_role)
        .await?;
    step!(verbose, %tx, "Granted permission: {permission}");
    Ok(())
}
