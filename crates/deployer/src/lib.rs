//! `openapm-deployer` library crate.
//!
//! Stands up the open APM registry (`open.aragonpm.eth`) on top of an
//! existing Aragon APM deployment. The binary entrypoint lives in
//! `main.rs`; the modules are exported for integration testing.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod record;

pub use error::DeployError;
pub use orchestrator::{deploy_open_apm, DeployConfig, OpenApmDeployment};
