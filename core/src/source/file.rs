//! Snapshot adapter: reads a saved `/hosts` payload from disk. Useful for
//! demos and for inspecting a dataset without a live backend.
//!
//! Two layouts are accepted: the raw two-list array, or an object
//! `{"hosts": [...], "external": ...}` bundling the external address with
//! the batch.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::source::{ExternalAddress, ExternalAddressSource, HostBatch, HostBatchSource, http};

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> anyhow::Result<Value> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl HostBatchSource for SnapshotSource {
    async fn fetch_hosts(&self) -> anyhow::Result<HostBatch> {
        let payload = self.load().await?;
        let hosts = match &payload {
            Value::Object(map) => map
                .get("hosts")
                .ok_or_else(|| anyhow::anyhow!("snapshot object has no \"hosts\" key"))?,
            other => other,
        };
        Ok(HostBatch::from_json(hosts)?)
    }
}

#[async_trait]
impl ExternalAddressSource for SnapshotSource {
    async fn fetch_external(&self) -> anyhow::Result<ExternalAddress> {
        let payload = self.load().await?;
        let external = payload
            .get("external")
            .ok_or_else(|| anyhow::anyhow!("snapshot carries no external address"))?;
        http::parse_external(external)
    }
}
