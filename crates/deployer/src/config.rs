//! Environment configuration for the `openapm-deploy` binary.

use std::fmt;
use std::path::PathBuf;

use alloy::primitives::Address;

use crate::orchestrator::DeployConfig;

/// Errors from reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Everything the binary needs to run one deployment.
#[derive(Clone)]
pub struct DeployerEnv {
    /// JSON-RPC endpoint of the target network.
    pub rpc_url: String,
    /// Hex private key used to sign locally. Without it the node's own
    /// accounts sign.
    pub private_key: Option<String>,
    /// Where to write the deployment record, if anywhere.
    pub output_path: Option<PathBuf>,
    pub deploy: DeployConfig,
}

impl fmt::Debug for DeployerEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployerEnv")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("output_path", &self.output_path)
            .field("deploy", &self.deploy)
            .finish()
    }
}

impl DeployerEnv {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `RPC_URL`              | required                   |
    /// | `PRIVATE_KEY`          | node-managed accounts      |
    /// | `OWNER`                | first account              |
    /// | `APM_VERBOSE`          | `true`                     |
    /// | `APM_REGISTRY_ADDRESS` | existing `aragonpm.eth` registry |
    /// | `APM_FACTORY_ADDRESS`  | existing registry factory  |
    /// | `APM_PARENT_DOMAIN`    | `aragonpm.eth`             |
    /// | `APM_LABEL`            | `open`                     |
    /// | `APM_OUTPUT_PATH`      | no record written          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rpc_url = var("RPC_URL").ok_or(ConfigError::Missing("RPC_URL"))?;
        let private_key = var("PRIVATE_KEY");
        let output_path = var("APM_OUTPUT_PATH").map(PathBuf::from);

        let defaults = DeployConfig::default();

        let owner = var("OWNER")
            .map(|v| parse_address("OWNER", v))
            .transpose()?;
        let verbose = var("APM_VERBOSE")
            .map(|v| parse_bool("APM_VERBOSE", v))
            .transpose()?
            .unwrap_or(defaults.verbose);
        let registry = var("APM_REGISTRY_ADDRESS")
            .map(|v| parse_address("APM_REGISTRY_ADDRESS", v))
            .transpose()?
            .unwrap_or(defaults.registry);
        let factory = var("APM_FACTORY_ADDRESS")
            .map(|v| parse_address("APM_FACTORY_ADDRESS", v))
            .transpose()?
            .unwrap_or(defaults.factory);
        let parent_domain = var("APM_PARENT_DOMAIN").unwrap_or(defaults.parent_domain);
        let label = var("APM_LABEL").unwrap_or(defaults.label);

        Ok(Self {
            rpc_url,
            private_key,
            output_path,
            deploy: DeployConfig {
                owner,
                verbose,
                registry,
                factory,
                parent_domain,
                label,
            },
        })
    }
}

fn parse_address(var: &'static str, value: String) -> Result<Address, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        var,
        expected: "a 20-byte hex address",
        value,
    })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value,
        }),
    }
}
