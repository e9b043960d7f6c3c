use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use atlas_core::refresh::Refresher;
use atlas_core::source::{ExternalAddress, ExternalAddressSource, HostBatch, HostBatchSource};
use serde_json::json;

/// Replays a scripted sequence of fetch outcomes, one per refresh round.
struct ScriptedSource {
    rounds: Mutex<VecDeque<anyhow::Result<serde_json::Value>>>,
}

impl ScriptedSource {
    fn new(rounds: Vec<anyhow::Result<serde_json::Value>>) -> Box<Self> {
        Box::new(Self {
            rounds: Mutex::new(rounds.into_iter().collect()),
        })
    }
}

#[async_trait]
impl HostBatchSource for ScriptedSource {
    async fn fetch_hosts(&self) -> anyhow::Result<HostBatch> {
        let next = self
            .rounds
            .lock()
            .expect("scripted rounds lock")
            .pop_front()
            .expect("more rounds scripted than consumed");
        let payload = next?;
        Ok(HostBatch::from_json(&payload)?)
    }
}

struct FixedExternal;

#[async_trait]
impl ExternalAddressSource for FixedExternal {
    async fn fetch_external(&self) -> anyhow::Result<ExternalAddress> {
        Ok(ExternalAddress {
            id: "1".to_string(),
            address: "198.51.100.4".to_string(),
        })
    }
}

fn round_with_hosts(addresses: &[&str]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = addresses
        .iter()
        .enumerate()
        .map(|(i, addr)| {
            json!([
                (i + 1).to_string(),
                addr,
                format!("host{}", i + 1),
                "Linux",
                "aa:bb",
                "22",
                "10.0.0.1",
                "Unknown",
                "2026-08-25",
                "online"
            ])
        })
        .collect();
    json!([rows, []])
}

#[tokio::test]
async fn consecutive_refreshes_track_dataset_changes() {
    let source = ScriptedSource::new(vec![
        Ok(round_with_hosts(&["10.0.0.5"])),
        Ok(round_with_hosts(&["10.0.0.5", "10.0.0.6"])),
    ]);
    let mut refresher = Refresher::new(source, Some(Box::new(FixedExternal)));

    assert!(refresher.refresh().await.expect("first refresh"));
    let first = refresher.graph().expect("graph after first round").node_ids();
    assert!(first.contains("n-1-10.0.0.5"));
    assert!(!first.contains("n-2-10.0.0.6"));

    assert!(refresher.refresh().await.expect("second refresh"));
    let second = refresher
        .graph()
        .expect("graph after second round")
        .node_ids();
    assert!(second.contains("n-2-10.0.0.6"));

    let added: Vec<&String> = second.difference(&first).collect();
    assert!(added.iter().any(|id| id.as_str() == "n-2-10.0.0.6"));
}

#[tokio::test]
async fn failed_round_keeps_previous_graph() {
    let source = ScriptedSource::new(vec![
        Ok(round_with_hosts(&["10.0.0.5"])),
        Err(anyhow::anyhow!("connection refused")),
        Ok(round_with_hosts(&["10.0.0.5", "10.0.0.6"])),
    ]);
    let mut refresher = Refresher::new(source, None);

    assert!(refresher.refresh().await.expect("first refresh"));
    let before = refresher.graph().expect("baseline graph").node_ids();

    assert!(refresher.refresh().await.is_err());
    let after = refresher.graph().expect("graph survives failure").node_ids();
    assert_eq!(before, after);

    assert!(refresher.refresh().await.expect("recovery refresh"));
    assert!(
        refresher
            .graph()
            .expect("recovered graph")
            .node_ids()
            .contains("n-2-10.0.0.6")
    );
}

#[tokio::test]
async fn late_result_loses_to_newer_ticket() {
    let source = ScriptedSource::new(vec![
        Ok(round_with_hosts(&["10.0.0.5"])),
        Ok(round_with_hosts(&["10.0.0.6"])),
    ]);
    let mut refresher = Refresher::new(source, None);

    let slow = refresher.begin();
    let fast = refresher.begin();

    let slow_graph = refresher.build().await.expect("slow build");
    let fast_graph = refresher.build().await.expect("fast build");

    assert!(refresher.complete(fast, fast_graph));
    assert!(!refresher.complete(slow, slow_graph));

    let ids = refresher.graph().expect("applied graph").node_ids();
    assert!(ids.contains("n-1-10.0.0.6"));
    assert!(!ids.contains("n-1-10.0.0.5"));
}

#[tokio::test]
async fn external_anchor_included_when_source_present() {
    let source = ScriptedSource::new(vec![Ok(round_with_hosts(&["10.0.0.5"]))]);
    let mut refresher = Refresher::new(source, Some(Box::new(FixedExternal)));

    refresher.refresh().await.expect("refresh");
    let anchor = refresher
        .graph()
        .expect("graph present")
        .external()
        .expect("anchor present");
    assert_eq!(anchor.address, "198.51.100.4");
    assert_eq!(anchor.connected_hub.as_deref(), Some("subnet-10.0.0"));
}
