//! `openapm-deploy` -- deploys the open APM registry.
//!
//! Assigns `open.aragonpm.eth` to the APM registry factory, deploys a new
//! registry under it, and opens repo creation on the existing registry to
//! any account. See [`openapm_deployer::config::DeployerEnv`] for the
//! environment variables.

use openapm_chain::RpcChain;
use openapm_deployer::config::DeployerEnv;
use openapm_deployer::deploy_open_apm;
use openapm_deployer::record::{write_record, DeploymentRecord};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Read before the subscriber exists so silent runs stay silent.
    let env = DeployerEnv::from_env();
    let default_filter = match &env {
        Ok(env) if !env.deploy.verbose => "warn",
        _ => "openapm_deployer=info,openapm_chain=info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = env.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let chain = RpcChain::connect(&env.rpc_url, env.private_key.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to create chain client");
        std::process::exit(1);
    });

    let deployment = match deploy_open_apm(&chain, &env.deploy).await {
        Ok(deployment) => deployment,
        Err(e) => {
            tracing::error!(error = %e, "Open APM deployment failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        apm = %deployment.apm,
        tx = %deployment.deploy_tx,
        name = %deployment.name,
        "Open APM deployed",
    );

    if let Some(path) = &env.output_path {
        let record = DeploymentRecord::new(&env.rpc_url, &deployment);
        if let Err(e) = write_record(path, &record) {
            tracing::error!(error = %e, "Failed to write deployment record");
            std::process::exit(1);
        }
    }
}
