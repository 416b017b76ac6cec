//! Deployment record written after a successful run.

use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::orchestrator::OpenApmDeployment;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Failed to write deployment record: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize deployment record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A deployment together with where and when it happened.
#[derive(Debug, Serialize)]
pub struct DeploymentRecord<'a> {
    pub deployed_at: DateTime<Utc>,
    pub rpc_url: &'a str,
    #[serde(flatten)]
    pub deployment: &'a OpenApmDeployment,
}

impl<'a> DeploymentRecord<'a> {
    pub fn new(rpc_url: &'a str, deployment: &'a OpenApmDeployment) -> Self {
        Self {
            deployed_at: Utc::now(),
            rpc_url,
            deployment,
        }
    }
}

/// Write `record` as pretty JSON to `path`, creating parent directories.
pub fn write_record(path: &Path, record: &DeploymentRecord<'_>) -> Result<(), RecordError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, record)?;

    tracing::info!(path = %path.display(), "Deployment record written");
    Ok(())
}
