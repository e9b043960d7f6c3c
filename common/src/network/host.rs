//! # Canonical Host Model
//!
//! One [`Host`] per discovered endpoint, whether a bare machine or a
//! container. Raw discovery rows are positional tuples; the two row shapes
//! are described by each kind's [`FieldOffsets`] table so that callers never
//! branch on magic indices.

use crate::network::address::SubnetKey;

/// Placeholder written into any optional field the discovery backend left
/// empty or marked unknown.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for an empty open-ports list.
pub const NO_PORTS: &str = "no_ports";
/// Default logical network label for containers reported without one.
pub const DEFAULT_NETWORK: &str = "docker";

/// The two discovery record shapes.
///
/// Containerized rows carry one extra identifier column (the container id)
/// between the record id and the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Ordinary,
    Containerized,
}

/// Positional layout of one raw discovery row.
#[derive(Debug, Clone, Copy)]
pub struct FieldOffsets {
    pub record_id: usize,
    pub container_id: Option<usize>,
    pub address: usize,
    pub name: usize,
    pub os: usize,
    pub mac: usize,
    pub open_ports: usize,
    pub next_hop: usize,
    pub network_label: usize,
    pub last_seen: usize,
    pub online_status: usize,
}

impl HostKind {
    /// The field-offset table for this record shape.
    pub fn offsets(&self) -> FieldOffsets {
        match self {
            HostKind::Ordinary => FieldOffsets {
                record_id: 0,
                container_id: None,
                address: 1,
                name: 2,
                os: 3,
                mac: 4,
                open_ports: 5,
                next_hop: 6,
                network_label: 7,
                last_seen: 8,
                online_status: 9,
            },
            HostKind::Containerized => FieldOffsets {
                record_id: 0,
                container_id: Some(1),
                address: 2,
                name: 3,
                os: 4,
                mac: 5,
                open_ports: 6,
                next_hop: 7,
                network_label: 8,
                last_seen: 9,
                online_status: 10,
            },
        }
    }

    /// Short tag used in node ids and display output.
    pub fn tag(&self) -> &'static str {
        match self {
            HostKind::Ordinary => "n",
            HostKind::Containerized => "c",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HostKind::Ordinary => "normal",
            HostKind::Containerized => "docker",
        }
    }

    /// Composes the stable node id for a host of this kind.
    ///
    /// Derivable solely from canonical fields, so two assembler runs over the
    /// same batch agree on every id.
    pub fn node_id(&self, record_id: &str, address: &str) -> String {
        format!("{}-{}-{}", self.tag(), record_id, address)
    }
}

/// Canonical entity for one discovered endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Stable identity within one dataset load, see [`HostKind::node_id`].
    pub id: String,
    pub record_id: String,
    pub container_id: Option<String>,
    /// Validated IPv4 dotted quad. The only hard validity gate.
    pub address: String,
    /// Record name, falling back to the address.
    pub display_name: String,
    pub os: String,
    pub mac: String,
    pub open_ports: String,
    pub next_hop: String,
    pub network_label: String,
    pub last_seen: String,
    pub online: bool,
    pub kind: HostKind,
}

impl Host {
    /// The /24-equivalent grouping key of this host's address.
    pub fn subnet(&self) -> SubnetKey {
        SubnetKey::of(&self.address)
    }

    /// Concatenated searchable text: address, name, os, mac, open ports.
    ///
    /// Placeholder values are skipped so that searching for "unknown" does
    /// not match every sparsely-scanned host.
    pub fn search_haystack(&self) -> String {
        [
            self.address.as_str(),
            self.display_name.as_str(),
            self.os.as_str(),
            self.mac.as_str(),
            self.open_ports.as_str(),
        ]
        .iter()
        .filter(|v| !is_placeholder(v))
        .map(|v| v.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// `true` for values the normalizer writes when the backend had no data.
pub fn is_placeholder(value: &str) -> bool {
    value == UNKNOWN || value == NO_PORTS
}
