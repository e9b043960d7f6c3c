//! HTTP adapter for the discovery API: `GET /hosts` for the batch and
//! `GET /external` for the recorded public address.

use async_trait::async_trait;
use atlas_common::network::address::is_valid_ipv4;
use serde_json::Value;
use tracing::debug;

use crate::source::{ExternalAddress, ExternalAddressSource, HostBatch, HostBatchSource};

pub struct ApiSource {
    base: String,
    client: reqwest::Client,
}

impl ApiSource {
    /// `base` is the API root, e.g. `http://192.168.2.81:8889`.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, path: &str) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base, path);
        debug!(url, "fetching");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl HostBatchSource for ApiSource {
    async fn fetch_hosts(&self) -> anyhow::Result<HostBatch> {
        let payload = self.get_json("/hosts").await?;
        Ok(HostBatch::from_json(&payload)?)
    }
}

#[async_trait]
impl ExternalAddressSource for ApiSource {
    async fn fetch_external(&self) -> anyhow::Result<ExternalAddress> {
        let payload = self.get_json("/external").await?;
        parse_external(&payload)
    }
}

/// Accepts the two shapes the backend has served: a row tuple
/// `[id, public_ip, ...]` or an object with a `public_ip` field.
pub(crate) fn parse_external(value: &Value) -> anyhow::Result<ExternalAddress> {
    let (id, address) = match value {
        Value::Array(fields) => {
            let id = fields
                .first()
                .map(super::field_as_text)
                .unwrap_or_default();
            let address = fields.get(1).map(super::field_as_text).unwrap_or_default();
            (id, address)
        }
        Value::Object(map) => {
            let id = map.get("id").map(super::field_as_text).unwrap_or_default();
            let address = map
                .get("public_ip")
                .map(super::field_as_text)
                .unwrap_or_default();
            (id, address)
        }
        _ => anyhow::bail!("external payload is neither a row nor an object"),
    };

    if !is_valid_ipv4(&address) {
        anyhow::bail!("external payload has no usable address: {address:?}");
    }
    Ok(ExternalAddress { id, address })
}
