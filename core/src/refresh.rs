//! # Refresh Coordinator
//!
//! Poll-driven full rebuilds. Every cycle fetches the latest batch, builds a
//! fresh graph and swaps it in whole; stable node ids are what lets the
//! presentation layer diff consecutive builds, there is no partial merge.
//!
//! Completion order is not issuance order: a slow fetch can resolve after a
//! newer one. Tickets make last-write-wins explicit: a result is applied
//! only if no newer ticket has been applied yet.

use tracing::{debug, info, warn};

use crate::graph::{Graph, assemble};
use crate::normalize;
use crate::source::{ExternalAddress, ExternalAddressSource, HostBatchSource};

/// Issuance-ordered handle for one refresh cycle.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

pub struct Refresher {
    batch_source: Box<dyn HostBatchSource>,
    external_source: Option<Box<dyn ExternalAddressSource>>,
    issued: u64,
    applied: u64,
    current: Option<Graph>,
}

impl Refresher {
    pub fn new(
        batch_source: Box<dyn HostBatchSource>,
        external_source: Option<Box<dyn ExternalAddressSource>>,
    ) -> Self {
        Self {
            batch_source,
            external_source,
            issued: 0,
            applied: 0,
            current: None,
        }
    }

    /// The last successfully built graph, if any. A failed refresh leaves
    /// this untouched: stale-but-valid beats blank.
    pub fn graph(&self) -> Option<&Graph> {
        self.current.as_ref()
    }

    /// Issues the next refresh ticket.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Fetches the latest batch and builds a complete graph.
    ///
    /// Batch fetch and decode failures propagate; an external-address
    /// failure is non-fatal and only suppresses the anchor.
    pub async fn build(&self) -> anyhow::Result<Graph> {
        let batch = self.batch_source.fetch_hosts().await?;
        let external = self.fetch_external().await;
        let hosts = normalize::normalize_batch(&batch);
        debug!(
            raw = batch.ordinary.len() + batch.containerized.len(),
            normalized = hosts.len(),
            "building topology"
        );
        Ok(assemble(&hosts, external.as_ref()))
    }

    async fn fetch_external(&self) -> Option<ExternalAddress> {
        let source = self.external_source.as_ref()?;
        match source.fetch_external().await {
            Ok(ext) => Some(ext),
            Err(err) => {
                warn!("external address lookup failed, anchor omitted: {err:#}");
                None
            }
        }
    }

    /// Applies a finished build. Returns `false` when the result arrived
    /// after a newer ticket already won and was discarded.
    pub fn complete(&mut self, ticket: Ticket, graph: Graph) -> bool {
        if ticket.0 <= self.applied {
            info!(
                ticket = ticket.0,
                applied = self.applied,
                "discarding superseded refresh result"
            );
            return false;
        }
        self.applied = ticket.0;
        self.current = Some(graph);
        true
    }

    /// One full cycle: issue, fetch, build, apply.
    ///
    /// On error the previous graph stays in place and the error propagates
    /// for the caller to report.
    pub async fn refresh(&mut self) -> anyhow::Result<bool> {
        let ticket = self.begin();
        let graph = self.build().await?;
        Ok(self.complete(ticket, graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::source::HostBatch;

    struct StaticSource {
        payload: serde_json::Value,
    }

    #[async_trait]
    impl HostBatchSource for StaticSource {
        async fn fetch_hosts(&self) -> anyhow::Result<HostBatch> {
            Ok(HostBatch::from_json(&self.payload)?)
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl HostBatchSource for BrokenSource {
        async fn fetch_hosts(&self) -> anyhow::Result<HostBatch> {
            anyhow::bail!("backend unreachable")
        }
    }

    fn one_host_source(ip: &str) -> Box<dyn HostBatchSource> {
        Box::new(StaticSource {
            payload: json!([[["1", ip, "web1", "Linux"]], []]),
        })
    }

    #[tokio::test]
    async fn refresh_builds_and_applies() {
        let mut refresher = Refresher::new(one_host_source("10.0.0.5"), None);
        assert!(refresher.graph().is_none());

        assert!(refresher.refresh().await.unwrap());
        let graph = refresher.graph().unwrap();
        assert!(graph.node("n-1-10.0.0.5").is_some());
    }

    #[tokio::test]
    async fn superseded_result_is_discarded() {
        let mut refresher = Refresher::new(one_host_source("10.0.0.5"), None);

        let older = refresher.begin();
        let newer = refresher.begin();
        let older_graph = refresher.build().await.unwrap();
        let newer_graph = refresher.build().await.unwrap();

        // The newer cycle resolves first; the older result must lose even
        // though it completes last.
        assert!(refresher.complete(newer, newer_graph));
        assert!(!refresher.complete(older, older_graph));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_graph() {
        let mut refresher = Refresher::new(one_host_source("10.0.0.5"), None);
        refresher.refresh().await.unwrap();
        let before = refresher.graph().unwrap().clone();

        refresher.batch_source = Box::new(BrokenSource);
        assert!(refresher.refresh().await.is_err());
        assert_eq!(refresher.graph(), Some(&before));
    }

    #[tokio::test]
    async fn malformed_batch_is_the_fatal_case() {
        let mut refresher = Refresher::new(
            Box::new(StaticSource {
                payload: json!([[]]),
            }),
            None,
        );
        assert!(refresher.refresh().await.is_err());
        assert!(refresher.graph().is_none());
    }
}
