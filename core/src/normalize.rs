//! # Host Normalizer
//!
//! Maps raw positional discovery rows onto the canonical [`Host`] entity.
//!
//! The address is the only hard validity gate: rows whose address field is
//! not a well-formed IPv4 dotted quad are silently dropped, never raised.
//! Every other field passes through one defaulting rule and can be missing
//! entirely (short rows are tolerated).

use atlas_common::network::address::is_valid_ipv4;
use atlas_common::network::host::{Host, HostKind, NO_PORTS, UNKNOWN};
use tracing::debug;

use crate::source::{HostBatch, RawRecord};

/// Normalizes one raw row of the given kind.
///
/// Returns `None` when the address fails validation; the caller treats that
/// as an excluded row, not an error.
pub fn normalize(kind: HostKind, record: &RawRecord) -> Option<Host> {
    let offsets = kind.offsets();
    let field = |idx: usize| record.get(idx).map(String::as_str).unwrap_or("");

    let address = field(offsets.address).trim();
    if !is_valid_ipv4(address) {
        debug!(kind = kind.label(), address, "dropping record with invalid address");
        return None;
    }

    let record_id = field(offsets.record_id).trim().to_string();
    let name = defaulted(field(offsets.name), UNKNOWN);
    let display_name = if name == UNKNOWN {
        address.to_string()
    } else {
        name
    };

    Some(Host {
        id: kind.node_id(&record_id, address),
        record_id,
        container_id: offsets
            .container_id
            .map(|idx| field(idx).trim().to_string()),
        address: address.to_string(),
        display_name,
        os: defaulted(field(offsets.os), UNKNOWN),
        mac: defaulted(field(offsets.mac), UNKNOWN),
        open_ports: defaulted(field(offsets.open_ports), NO_PORTS),
        next_hop: defaulted(field(offsets.next_hop), UNKNOWN),
        network_label: defaulted(field(offsets.network_label), UNKNOWN),
        last_seen: defaulted(field(offsets.last_seen), UNKNOWN),
        online: field(offsets.online_status).trim() != "offline",
        kind,
    })
}

/// Normalizes a full batch, ordinary rows first, containerized rows second.
/// Invalid rows are excluded, matching the tolerant backend behaviour.
pub fn normalize_batch(batch: &HostBatch) -> Vec<Host> {
    let mut hosts = Vec::with_capacity(batch.ordinary.len() + batch.containerized.len());
    hosts.extend(
        batch
            .ordinary
            .iter()
            .filter_map(|r| normalize(HostKind::Ordinary, r)),
    );
    hosts.extend(
        batch
            .containerized
            .iter()
            .filter_map(|r| normalize(HostKind::Containerized, r)),
    );
    hosts
}

/// The single defaulting rule: empty strings and the backend's assorted
/// "don't know" spellings collapse to one placeholder per field.
fn defaulted(raw: &str, placeholder: &str) -> String {
    let value = raw.trim();
    let absent = value.is_empty()
        || value.eq_ignore_ascii_case("unknown")
        || value.eq_ignore_ascii_case("unavailable")
        || value == "NoName";
    if absent {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
