//! # Data-Source Ports
//!
//! The discovery backend is an external collaborator: one fetch returns two
//! positional record lists, and an optional second fetch returns the
//! recorded public address. These traits are the only seam between the
//! engine and whatever produces the data.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod file;
pub mod http;

pub use file::SnapshotSource;
pub use http::ApiSource;

/// One raw discovery row: an ordered field tuple, all values as text.
pub type RawRecord = Vec<String>;

/// Where a dataset comes from: a live API root or a snapshot file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Api(String),
    Snapshot(std::path::PathBuf),
}

impl std::str::FromStr for SourceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty source".to_string());
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(SourceSpec::Api(s.to_string()))
        } else {
            Ok(SourceSpec::Snapshot(s.into()))
        }
    }
}

impl SourceSpec {
    pub fn batch_source(&self) -> Box<dyn HostBatchSource> {
        match self {
            SourceSpec::Api(base) => Box::new(ApiSource::new(base.clone())),
            SourceSpec::Snapshot(path) => Box::new(SnapshotSource::new(path.clone())),
        }
    }

    pub fn external_source(&self) -> Box<dyn ExternalAddressSource> {
        match self {
            SourceSpec::Api(base) => Box::new(ApiSource::new(base.clone())),
            SourceSpec::Snapshot(path) => Box::new(SnapshotSource::new(path.clone())),
        }
    }
}

/// The two record lists of one discovery cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBatch {
    pub ordinary: Vec<RawRecord>,
    pub containerized: Vec<RawRecord>,
}

/// Structural batch failures. The only error class that aborts a refresh
/// cycle; everything row-level is tolerated downstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("host payload is not an array of record lists")]
    NotAnArray,
    #[error("host payload is missing the {0} record list")]
    MissingList(&'static str),
}

impl HostBatch {
    /// Decodes the wire shape `[[...ordinary], [...containerized]]`.
    ///
    /// Both lists must be structurally present; empty lists are valid.
    /// Non-array rows are skipped, and within a row every scalar is carried
    /// as text (`null` becomes the empty string for the normalizer to
    /// default).
    pub fn from_json(value: &Value) -> Result<Self, BatchError> {
        let lists = value.as_array().ok_or(BatchError::NotAnArray)?;
        let ordinary = lists
            .first()
            .and_then(Value::as_array)
            .ok_or(BatchError::MissingList("ordinary"))?;
        let containerized = lists
            .get(1)
            .and_then(Value::as_array)
            .ok_or(BatchError::MissingList("containerized"))?;

        Ok(Self {
            ordinary: decode_rows(ordinary),
            containerized: decode_rows(containerized),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ordinary.is_empty() && self.containerized.is_empty()
    }
}

fn decode_rows(rows: &[Value]) -> Vec<RawRecord> {
    rows.iter()
        .filter_map(Value::as_array)
        .map(|fields| fields.iter().map(field_as_text).collect())
        .collect()
}

pub(crate) fn field_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// The recorded public address, feeding the external anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalAddress {
    pub id: String,
    pub address: String,
}

/// Fetches one full discovery batch per refresh cycle.
#[async_trait]
pub trait HostBatchSource: Send + Sync {
    async fn fetch_hosts(&self) -> anyhow::Result<HostBatch>;
}

/// Looks up the external/public address. Failure is non-fatal and simply
/// suppresses the external anchor.
#[async_trait]
pub trait ExternalAddressSource: Send + Sync {
    async fn fetch_external(&self) -> anyhow::Result<ExternalAddress>;
}
