use atlas_core::filter::{self, FilterMode, FilterState};
use atlas_core::graph::{self, Graph};
use atlas_core::normalize;
use atlas_core::source::{ExternalAddress, HostBatch};
use serde_json::json;

/// A small but realistic dataset: two subnets, one gateway route, a docker
/// bridge network whose uplink is a known host, and one offline machine.
fn sample_batch() -> HostBatch {
    let payload = json!([
        [
            ["1", "10.0.0.1", "gateway", "OpenWrt", "aa:bb:cc:00:00:01", "53,80", "Unknown", "Unknown", "2026-08-25", "online"],
            ["2", "10.0.0.5", "web1", "Linux 6.8", "aa:bb:cc:00:00:02", "22,443", "10.0.0.1", "Unknown", "2026-08-25", "online"],
            ["3", "10.0.1.9", "nas", "TrueNAS", "aa:bb:cc:00:00:03", "445", "10.0.0.1", "Unknown", "2026-08-24", "offline"]
        ],
        [
            ["4", "f00dcafe", "172.17.0.2", "pg", "Unknown", "Unknown", "no_ports", "10.0.0.5", "bridge", "2026-08-25", "online"]
        ]
    ]);
    HostBatch::from_json(&payload).expect("well formed payload")
}

fn build_graph() -> Graph {
    let hosts = normalize::normalize_batch(&sample_batch());
    let external = ExternalAddress {
        id: "ext".to_string(),
        address: "203.0.113.7".to_string(),
    };
    graph::assemble(&hosts, Some(&external))
}

#[test]
fn full_pipeline_produces_expected_topology() {
    let graph = build_graph();

    let counts = graph.counts();
    assert_eq!(counts.ordinary, 3);
    assert_eq!(counts.containerized, 1);

    // Every subnet gets a hub, the docker bridge /24 included.
    let hub_keys: Vec<String> = graph.hubs().map(|h| h.key.as_str().to_string()).collect();
    assert_eq!(hub_keys, vec!["10.0.0", "10.0.1", "172.17.0"]);

    // Containerized hosts live in their network group, not in a hub.
    let bridge = graph
        .networks()
        .find(|n| n.label == "bridge")
        .expect("bridge network present");
    assert_eq!(bridge.members.len(), 1);
    for hub in graph.hubs() {
        assert!(hub.members.iter().all(|id| id.starts_with("n-")));
    }

    // nas reaches the gateway through the other subnet: exactly one route.
    let routes: Vec<_> = graph.routes().collect();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].from, "subnet-10.0.1");
    assert_eq!(routes[0].to, "subnet-10.0.0");
}

#[test]
fn container_uplink_resolves_to_known_host() {
    let graph = build_graph();

    let bridge = graph
        .networks()
        .find(|n| n.label == "bridge")
        .expect("bridge network present");
    let uplink = bridge.uplink.as_deref().expect("uplink resolved");
    assert_eq!(uplink, "n-2-10.0.0.5");
}

#[test]
fn external_anchor_connects_through_gateway_subnet() {
    let graph = build_graph();

    let anchor = graph.external().expect("external anchor present");
    assert_eq!(anchor.address, "203.0.113.7");
    assert_eq!(anchor.connected_hub.as_deref(), Some("subnet-10.0.0"));
}

#[test]
fn rebuild_from_same_batch_is_identical() {
    let first = build_graph();
    let second = build_graph();
    assert_eq!(first.node_ids(), second.node_ids());
    assert_eq!(first.edge_ids(), second.edge_ids());
}

#[test]
fn text_filter_hides_non_matching_hosts_but_keeps_structure() {
    let graph = build_graph();
    let state = FilterState {
        text: "truenas".to_string(),
        ..Default::default()
    };

    let view = filter::apply(&graph, &state, FilterMode::Exclude);

    assert!(view.visible_nodes.contains("n-3-10.0.1.9"));
    assert!(!view.visible_nodes.contains("n-2-10.0.0.5"));
    // Hubs stay visible even when empty.
    assert!(view.visible_nodes.contains("subnet-10.0.0"));
    assert!(view.visible_nodes.contains("subnet-10.0.1"));
    // An edge survives only when both endpoints do.
    assert!(view.visible_edges.contains("subnet-10.0.1->n-3-10.0.1.9"));
    assert!(!view.visible_edges.contains("subnet-10.0.0->n-2-10.0.0.5"));
}

#[test]
fn highlight_mode_keeps_everything_visible() {
    let graph = build_graph();
    let state = FilterState {
        text: "truenas".to_string(),
        ..Default::default()
    };

    let view = filter::apply(&graph, &state, FilterMode::Highlight);

    assert_eq!(view.visible_nodes, graph.node_ids());
    assert_eq!(view.visible_edges, graph.edge_ids());
    assert!(view.highlighted.contains("n-3-10.0.1.9"));
    assert_eq!(view.highlighted.len(), 1);
}

#[test]
fn container_only_filter_crosses_with_text() {
    let graph = build_graph();
    let state = FilterState {
        container_only: true,
        text: "172.17".to_string(),
        ..Default::default()
    };

    let view = filter::apply(&graph, &state, FilterMode::Exclude);

    let visible_hosts: Vec<&str> = graph
        .hosts()
        .filter(|h| view.visible_nodes.contains(&h.id))
        .map(|h| h.id.as_str())
        .collect();
    assert_eq!(visible_hosts, vec!["c-4-172.17.0.2"]);
}

#[test]
fn subnet_filter_applies_to_containerized_hosts_too() {
    let graph = build_graph();
    let state = FilterState {
        subnet: Some("172.17.0".to_string()),
        ..Default::default()
    };

    let view = filter::apply(&graph, &state, FilterMode::Exclude);

    assert!(view.visible_nodes.contains("c-4-172.17.0.2"));
    assert!(!view.visible_nodes.contains("n-1-10.0.0.1"));
}

#[test]
fn offline_state_survives_the_pipeline() {
    let graph = build_graph();
    let nas = graph
        .hosts()
        .find(|h| h.display_name == "nas")
        .expect("nas present");
    assert!(!nas.online);
    let web = graph
        .hosts()
        .find(|h| h.display_name == "web1")
        .expect("web1 present");
    assert!(web.online);
}

#[test]
fn distinct_value_lists_are_sorted_and_deduplicated() {
    let graph = build_graph();

    let os_values = graph.os_values();
    assert_eq!(os_values, vec!["Linux 6.8", "OpenWrt", "TrueNAS"]);

    let subnets = graph.subnet_values();
    assert_eq!(subnets, vec!["10.0.0", "10.0.1", "172.17.0"]);
}
