use atlas_core::refresh::Refresher;
use atlas_core::selection::{Detail, SelectionCoordinator};
use atlas_core::source::SourceSpec;
use colored::*;

use crate::terminal::{colors, print, spinner};

/// Resolves one node or edge id against a fresh build and prints its detail.
pub async fn inspect(source: &SourceSpec, id: &str) -> anyhow::Result<()> {
    let spin = spinner::start("fetching dataset");
    let refresher = Refresher::new(source.batch_source(), Some(source.external_source()));
    let built = refresher.build().await;
    spin.finish_and_clear();
    let graph = built?;

    let mut selection = SelectionCoordinator::new();
    selection.select(&graph, id);

    let Some(detail) = selection.detail(&graph) else {
        anyhow::bail!("nothing in the topology matches '{id}'");
    };

    print::header("detail");
    match detail {
        Detail::Host(host) => {
            print::tree_head(0, &host.display_name);
            print::tree_detail("address", host.address.color(colors::IPV4_ADDR), false);
            print::tree_detail("kind", host.kind.label(), false);
            print::tree_detail("os", &host.os, false);
            print::tree_detail("mac", &host.mac, false);
            print::tree_detail("ports", &host.open_ports, false);
            print::tree_detail("next hop", &host.next_hop, false);
            print::tree_detail("subnet", host.subnet().as_str(), false);
            let status = if host.online {
                "online".green()
            } else {
                "offline".color(colors::OFFLINE)
            };
            print::tree_detail("status", status, true);
        }
        Detail::Hub(hub) => {
            print::tree_head(0, &format!("subnet {}.x", hub.key));
            print::tree_detail("hosts", hub.members.len(), true);
        }
        Detail::Network(net) => {
            print::tree_head(0, &format!("network {}", net.label));
            print::tree_detail("containers", net.members.len(), false);
            let uplink = net.uplink.as_deref().unwrap_or("none");
            print::tree_detail("uplink", uplink, true);
        }
        Detail::External(ext) => {
            print::tree_head(0, "internet");
            print::tree_detail("address", ext.address.color(colors::IPV4_ADDR), false);
            let hub = ext.connected_hub.as_deref().unwrap_or("none");
            print::tree_detail("gateway hub", hub, true);
        }
        Detail::Route { from, to } => {
            print::tree_head(0, "route");
            print::tree_detail("between", format!("{from}.x"), false);
            print::tree_detail("and", format!("{to}.x"), true);
        }
    }

    Ok(())
}
