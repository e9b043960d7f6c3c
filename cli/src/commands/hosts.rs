use atlas_common::network::host::{Host, HostKind};
use atlas_core::normalize;
use atlas_core::source::SourceSpec;
use colored::*;

use crate::terminal::{colors, print, spinner};

pub async fn hosts(source: &SourceSpec) -> anyhow::Result<()> {
    let spin = spinner::start("fetching dataset");
    let fetched = source.batch_source().fetch_hosts().await;
    spin.finish_and_clear();
    let batch = fetched?;

    let hosts = normalize::normalize_batch(&batch);

    print::header("known hosts");
    if hosts.is_empty() {
        print::status("no hosts in dataset");
        return Ok(());
    }

    for (idx, host) in hosts.iter().enumerate() {
        print_host(idx, host);
    }

    print::separator();
    print::status(format!(
        "{} hosts listed",
        hosts.len().to_string().bold().green()
    ));
    Ok(())
}

fn print_host(idx: usize, host: &Host) {
    print::tree_head(idx, &host.display_name);

    let kind_color = match host.kind {
        HostKind::Ordinary => colors::PRIMARY,
        HostKind::Containerized => colors::CONTAINER,
    };
    print::tree_detail("address", host.address.color(colors::IPV4_ADDR), false);
    print::tree_detail("kind", host.kind.label().color(kind_color), false);
    print::tree_detail("os", &host.os, false);
    print::tree_detail("mac", &host.mac, false);
    print::tree_detail("ports", &host.open_ports, false);
    print::tree_detail("next hop", &host.next_hop, false);
    print::tree_detail("last seen", &host.last_seen, false);

    let status = if host.online {
        "online".green()
    } else {
        "offline".color(colors::OFFLINE)
    };
    print::tree_detail("status", status, true);
}
