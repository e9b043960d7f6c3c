//! # Topology Graph
//!
//! The assembled node/edge view of one dataset load. Node ids are derived
//! purely from canonical record fields, so rebuilding from the same batch
//! yields the same identity sets and downstream consumers can diff instead
//! of replacing wholesale.
//!
//! All collections are ordered; two walks over the same graph observe the
//! same sequence.

use std::collections::{BTreeMap, BTreeSet};

use atlas_common::network::address::SubnetKey;
use atlas_common::network::host::{Host, HostKind, is_placeholder};

mod assemble;

pub use assemble::assemble;

/// Node id of the single external/internet anchor.
pub const EXTERNAL_NODE_ID: &str = "external";

/// Node id of the hub synthesized for `key`.
pub fn hub_node_id(key: &SubnetKey) -> String {
    format!("subnet-{key}")
}

/// Node id of the logical container network `label`.
pub fn network_node_id(label: &str) -> String {
    format!("net-{label}")
}

/// Edge id for a `from → to` pair. Unique per ordered pair within a build.
pub fn edge_id(from: &str, to: &str) -> String {
    format!("{from}->{to}")
}

/// Synthesized node for one /24-equivalent subnet.
///
/// Members are ordinary hosts only; containerized hosts hang off their
/// [`NetworkGroup`] even though their subnet key is still recorded on the
/// host itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hub {
    pub key: SubnetKey,
    pub members: BTreeSet<String>,
}

impl Hub {
    pub fn node_id(&self) -> String {
        hub_node_id(&self.key)
    }
}

/// Synthesized node for one named logical container network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkGroup {
    pub label: String,
    pub members: BTreeSet<String>,
    /// Host node the group is anchored to, when a member's next-hop resolved
    /// to an already-registered host. Best-effort, at most one.
    pub uplink: Option<String>,
}

impl NetworkGroup {
    pub fn node_id(&self) -> String {
        network_node_id(&self.label)
    }
}

/// The optional "internet" node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalAnchor {
    pub record_id: String,
    pub address: String,
    /// Hub owning the detected default gateway, when one was found.
    pub connected_hub: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Host(Host),
    Hub(Hub),
    Network(NetworkGroup),
    External(ExternalAnchor),
}

impl Node {
    pub fn id(&self) -> String {
        match self {
            Node::Host(h) => h.id.clone(),
            Node::Hub(h) => h.node_id(),
            Node::Network(n) => n.node_id(),
            Node::External(_) => EXTERNAL_NODE_ID.to_string(),
        }
    }

    /// Structural scaffolding (hubs, networks, the external anchor) is never
    /// hidden by host-level filters.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Node::Host(_))
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Node::Host(h) => Some(h),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Hub to ordinary member host.
    HubMember,
    /// Network group to containerized member host.
    NetworkMember,
    /// Anchoring host to a container network.
    NetworkUplink,
    /// Inferred inter-subnet route between two hubs.
    Route,
    /// Gateway hub to the external anchor.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

impl Edge {
    fn new(from: &str, to: &str, kind: EdgeKind) -> Self {
        Self {
            id: edge_id(from, to),
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }
}

/// Host totals per kind, shown alongside the rendered map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounts {
    pub ordinary: usize,
    pub containerized: usize,
}

/// One consistent `{nodes, edges}` build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: BTreeMap<String, Node>,
    pub edges: BTreeMap<String, Edge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn node_ids(&self) -> BTreeSet<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn edge_ids(&self) -> BTreeSet<String> {
        self.edges.keys().cloned().collect()
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.nodes.values().filter_map(Node::as_host)
    }

    pub fn hubs(&self) -> impl Iterator<Item = &Hub> {
        self.nodes.values().filter_map(|n| match n {
            Node::Hub(hub) => Some(hub),
            _ => None,
        })
    }

    pub fn networks(&self) -> impl Iterator<Item = &NetworkGroup> {
        self.nodes.values().filter_map(|n| match n {
            Node::Network(net) => Some(net),
            _ => None,
        })
    }

    pub fn external(&self) -> Option<&ExternalAnchor> {
        self.nodes.values().find_map(|n| match n {
            Node::External(ext) => Some(ext),
            _ => None,
        })
    }

    pub fn routes(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .values()
            .filter(|e| matches!(e.kind, EdgeKind::Route))
    }

    pub fn counts(&self) -> HostCounts {
        let mut counts = HostCounts::default();
        for host in self.hosts() {
            match host.kind {
                HostKind::Ordinary => counts.ordinary += 1,
                HostKind::Containerized => counts.containerized += 1,
            }
        }
        counts
    }

    /// Distinct operating systems present, sorted, placeholders skipped.
    /// Feeds filter option lists.
    pub fn os_values(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .hosts()
            .filter(|h| !is_placeholder(&h.os))
            .map(|h| h.os.clone())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct subnet keys present, sorted.
    pub fn subnet_values(&self) -> Vec<String> {
        let set: BTreeSet<String> = self.hosts().map(|h| h.subnet().to_string()).collect();
        set.into_iter().collect()
    }
}
