//! # Grouping Resolver
//!
//! Pure key derivation: which subnet hub a host belongs to, and, for
//! containerized hosts only, which logical network group. Entity creation
//! from these keys is the assembler's job; nothing here allocates graph
//! state.

use atlas_common::network::address::SubnetKey;
use atlas_common::network::host::{DEFAULT_NETWORK, Host, HostKind, is_placeholder};

/// The /24-equivalent hub key for a host.
pub fn hub_key(host: &Host) -> SubnetKey {
    host.subnet()
}

/// The logical network key, `None` for ordinary hosts.
///
/// Containers reported without a usable label fall into the default
/// `"docker"` network rather than being left ungrouped.
pub fn network_key(host: &Host) -> Option<String> {
    match host.kind {
        HostKind::Ordinary => None,
        HostKind::Containerized => {
            let label = host.network_label.trim();
            if label.is_empty() || is_placeholder(label) {
                Some(DEFAULT_NETWORK.to_string())
            } else {
                Some(label.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_common::network::host::UNKNOWN;

    fn host(kind: HostKind, address: &str, network: &str) -> Host {
        Host {
            id: kind.node_id("1", address),
            record_id: "1".to_string(),
            container_id: None,
            address: address.to_string(),
            display_name: address.to_string(),
            os: UNKNOWN.to_string(),
            mac: UNKNOWN.to_string(),
            open_ports: UNKNOWN.to_string(),
            next_hop: UNKNOWN.to_string(),
            network_label: network.to_string(),
            last_seen: UNKNOWN.to_string(),
            online: true,
            kind,
        }
    }

    #[test]
    fn hub_key_follows_subnet() {
        let h = host(HostKind::Ordinary, "192.168.2.81", "");
        assert_eq!(hub_key(&h).as_str(), "192.168.2");
    }

    #[test]
    fn ordinary_hosts_have_no_network_key() {
        let h = host(HostKind::Ordinary, "10.0.0.5", "LAN");
        assert_eq!(network_key(&h), None);
    }

    #[test]
    fn containerized_hosts_group_by_label() {
        let h = host(HostKind::Containerized, "172.17.0.2", "bridge");
        assert_eq!(network_key(&h).as_deref(), Some("bridge"));
    }

    #[test]
    fn missing_label_falls_back_to_docker() {
        let h = host(HostKind::Containerized, "172.17.0.2", UNKNOWN);
        assert_eq!(network_key(&h).as_deref(), Some(DEFAULT_NETWORK));
    }
}
