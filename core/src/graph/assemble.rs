//! Single-pass graph assembly from a normalized host batch.
//!
//! Hubs and network groups are created lazily on first encounter and live
//! for one build only; the next load recomputes everything from scratch.

use std::collections::{BTreeMap, BTreeSet};

use atlas_common::network::address::{SubnetKey, is_valid_ipv4};
use atlas_common::network::host::{Host, HostKind};
use tracing::trace;

use crate::graph::{Edge, EdgeKind, ExternalAnchor, Graph, Hub, NetworkGroup, Node, hub_node_id};
use crate::grouping;
use crate::source::ExternalAddress;

/// Builds one consistent graph from a full batch of hosts plus, optionally,
/// the recorded external address.
///
/// Malformed rows were already dropped by the normalizer; nothing in here
/// fails. Empty input yields an empty graph.
pub fn assemble(hosts: &[Host], external: Option<&ExternalAddress>) -> Graph {
    let mut builder = Builder::default();

    for host in hosts {
        builder.add_host(host);
    }
    if let Some(ext) = external {
        builder.attach_external(hosts, ext);
    }

    builder.finish()
}

#[derive(Default)]
struct Builder {
    host_nodes: BTreeMap<String, Host>,
    hubs: BTreeMap<SubnetKey, Hub>,
    networks: BTreeMap<String, NetworkGroup>,
    external: Option<ExternalAnchor>,
    edges: Vec<Edge>,
    /// First host node registered per address, for next-hop lookups.
    by_address: BTreeMap<String, String>,
    /// Unordered hub pairs already routed, keyed as (min, max).
    routed_pairs: BTreeSet<(String, String)>,
}

impl Builder {
    fn add_host(&mut self, host: &Host) {
        let hub_key = grouping::hub_key(host);
        let hub_id = self.ensure_hub(hub_key.clone());

        self.host_nodes.insert(host.id.clone(), host.clone());
        self.by_address
            .entry(host.address.clone())
            .or_insert_with(|| host.id.clone());

        match host.kind {
            HostKind::Ordinary => {
                let hub = self.hubs.get_mut(&hub_key).expect("hub just ensured");
                hub.members.insert(host.id.clone());
                self.edges
                    .push(Edge::new(&hub_id, &host.id, EdgeKind::HubMember));
                self.infer_route(host, &hub_key);
            }
            HostKind::Containerized => {
                self.attach_to_network(host);
            }
        }
    }

    /// Idempotent hub creation; re-resolving a key returns the same hub.
    fn ensure_hub(&mut self, key: SubnetKey) -> String {
        let id = hub_node_id(&key);
        self.hubs.entry(key.clone()).or_insert_with(|| {
            trace!(subnet = %key, "creating hub");
            Hub {
                key,
                members: BTreeSet::new(),
            }
        });
        id
    }

    fn attach_to_network(&mut self, host: &Host) {
        let label = grouping::network_key(host).expect("containerized host has a network key");
        let network = self.networks.entry(label.clone()).or_insert_with(|| {
            trace!(network = label, "creating network group");
            NetworkGroup {
                label: label.clone(),
                members: BTreeSet::new(),
                uplink: None,
            }
        });
        network.members.insert(host.id.clone());
        let net_id = network.node_id();
        self.edges
            .push(Edge::new(&net_id, &host.id, EdgeKind::NetworkMember));

        // Best-effort single uplink: the first member whose next-hop names a
        // host we have already seen anchors the group. A hop host that shows
        // up later in the pass is silently skipped.
        if self.networks[&label].uplink.is_none() && is_valid_ipv4(&host.next_hop) {
            if let Some(anchor_id) = self.by_address.get(&host.next_hop).cloned() {
                if anchor_id != host.id {
                    self.edges
                        .push(Edge::new(&anchor_id, &net_id, EdgeKind::NetworkUplink));
                    self.networks.get_mut(&label).expect("network exists").uplink =
                        Some(anchor_id);
                }
            }
        }
    }

    /// Creates an inter-subnet route when an ordinary host's next-hop lives
    /// in a different /24. Deduplicated on the unordered hub pair, so two
    /// hosts pointing across at each other yield one edge; the first-seen
    /// direction is kept. Self-loops are never created.
    fn infer_route(&mut self, host: &Host, own_key: &SubnetKey) {
        if !is_valid_ipv4(&host.next_hop) {
            return;
        }
        let hop_key = SubnetKey::of(&host.next_hop);
        if hop_key == *own_key {
            return;
        }

        let from = hub_node_id(own_key);
        let to = self.ensure_hub(hop_key);
        let pair = if from <= to {
            (from.clone(), to.clone())
        } else {
            (to.clone(), from.clone())
        };
        if self.routed_pairs.insert(pair) {
            self.edges.push(Edge::new(&from, &to, EdgeKind::Route));
        }
    }

    /// Creates the external anchor and connects it to the hub owning the
    /// first resolvable default gateway. No match leaves the anchor present
    /// but unconnected.
    fn attach_external(&mut self, hosts: &[Host], ext: &ExternalAddress) {
        let mut anchor = ExternalAnchor {
            record_id: ext.id.clone(),
            address: ext.address.clone(),
            connected_hub: None,
        };

        for host in hosts {
            if !is_valid_ipv4(&host.next_hop) {
                continue;
            }
            let hop_key = SubnetKey::of(&host.next_hop);
            if self.hubs.contains_key(&hop_key) {
                let hub_id = hub_node_id(&hop_key);
                self.edges.push(Edge::new(
                    &hub_id,
                    super::EXTERNAL_NODE_ID,
                    EdgeKind::External,
                ));
                anchor.connected_hub = Some(hub_id);
                break;
            }
        }

        self.external = Some(anchor);
    }

    fn finish(self) -> Graph {
        let mut graph = Graph::default();

        for (_, host) in self.host_nodes {
            graph.nodes.insert(host.id.clone(), Node::Host(host));
        }
        for (_, hub) in self.hubs {
            graph.nodes.insert(hub.node_id(), Node::Hub(hub));
        }
        for (_, network) in self.networks {
            graph
                .nodes
                .insert(network.node_id(), Node::Network(network));
        }
        if let Some(ext) = self.external {
            graph
                .nodes
                .insert(super::EXTERNAL_NODE_ID.to_string(), Node::External(ext));
        }
        for edge in self.edges {
            graph.edges.insert(edge.id.clone(), edge);
        }

        graph
    }
}
