//! Well-known addresses and names of the `aragonpm.eth` deployment.
//!
//! The addresses must match the contracts already live on the target
//! network; they are compared bit-exact by the registry contracts.

use alloy_primitives::{address, Address};

/// Existing APM registry that owns `aragonpm.eth`.
pub const APM_REGISTRY_ADDRESS: Address = address!("0x735c188ae020ef71a63e39602d57f9d1e4d3b82f");

/// Existing `APMRegistryFactory` used to stand up new registries.
pub const APM_FACTORY_ADDRESS: Address = address!("0x6c29CaCcBf8bEeFc51337C8C967A32567c9A105A");

/// Parent domain the new registry lives under.
pub const PARENT_DOMAIN: &str = "aragonpm.eth";

/// Label of the open registry (`open.aragonpm.eth`).
pub const OPEN_LABEL: &str = "open";

/// Event emitted by the factory when a registry is deployed.
pub const DEPLOY_APM_EVENT: &str = "DeployAPM";

/// Operator hint for a failed subdomain assignment.
pub fn name_ownership_hint(label: &str, parent_domain: &str) -> String {
    format!(
        "Error: could not set the owner of '{label}.{parent_domain}' on the given ENS instance. \
         Make sure you have ownership rights over the subdomain."
    )
}
