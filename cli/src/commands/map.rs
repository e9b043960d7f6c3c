use atlas_common::network::host::{Host, HostKind, is_placeholder};
use atlas_core::filter::{self, View};
use atlas_core::graph::Graph;
use atlas_core::refresh::Refresher;
use atlas_core::source::SourceSpec;
use colored::*;

use crate::commands::FilterArgs;
use crate::terminal::{colors, print, spinner};

pub async fn map(source: &SourceSpec, filters: &FilterArgs) -> anyhow::Result<()> {
    let spin = spinner::start("fetching dataset");
    let refresher = Refresher::new(source.batch_source(), Some(source.external_source()));
    let built = refresher.build().await;
    spin.finish_and_clear();
    let graph = built?;

    let config = filters.config();
    let view = filter::apply(&graph, &filters.state(), FilterArgs::mode(&config));

    print::header("network topology");
    print_hubs(&graph, &view);
    print_networks(&graph, &view);
    print_routes(&graph, &view);
    print_external(&graph);
    print_summary(&graph, &view);

    Ok(())
}

fn print_hubs(graph: &Graph, view: &View) {
    for (idx, hub) in graph.hubs().enumerate() {
        print::tree_head(idx, &format!("subnet {}.x", hub.key));

        if hub.members.is_empty() {
            print::tree_detail("hosts", "none tracked".bright_black(), true);
            continue;
        }
        let members: Vec<&Host> = hub
            .members
            .iter()
            .filter(|id| view.visible_nodes.contains(*id))
            .filter_map(|id| graph.node(id).and_then(|n| n.as_host()))
            .collect();

        if members.is_empty() {
            print::tree_detail("hosts", "none visible".bright_black(), true);
            continue;
        }
        for (pos, host) in members.iter().enumerate() {
            let last = pos + 1 == members.len();
            print::tree_detail("host", host_line(host, view), last);
        }
    }
}

fn print_networks(graph: &Graph, view: &View) {
    let hub_count = graph.hubs().count();
    for (idx, network) in graph.networks().enumerate() {
        print::tree_head(hub_count + idx, &format!("network {}", network.label));

        let members: Vec<&Host> = network
            .members
            .iter()
            .filter(|id| view.visible_nodes.contains(*id))
            .filter_map(|id| graph.node(id).and_then(|n| n.as_host()))
            .collect();

        if let Some(uplink) = &network.uplink {
            if let Some(anchor) = graph.node(uplink).and_then(|n| n.as_host()) {
                print::tree_detail(
                    "uplink",
                    anchor.address.color(colors::IPV4_ADDR),
                    members.is_empty(),
                );
            }
        }
        for (pos, host) in members.iter().enumerate() {
            let last = pos + 1 == members.len();
            print::tree_detail("container", host_line(host, view), last);
        }
    }
}

fn print_routes(graph: &Graph, view: &View) {
    for edge in graph.routes() {
        if !view.visible_edges.contains(&edge.id) {
            continue;
        }
        let from = edge.from.trim_start_matches("subnet-");
        let to = edge.to.trim_start_matches("subnet-");
        print::status(format!(
            "route {} {} {}",
            format!("{from}.x").color(colors::PRIMARY),
            "⇄".color(colors::SEPARATOR),
            format!("{to}.x").color(colors::PRIMARY)
        ));
    }
}

fn print_external(graph: &Graph) {
    let Some(anchor) = graph.external() else {
        return;
    };
    let address = anchor.address.color(colors::IPV4_ADDR);
    match &anchor.connected_hub {
        Some(hub) => {
            let subnet = hub.trim_start_matches("subnet-");
            print::status(format!(
                "internet {} via {}",
                address,
                format!("{subnet}.x").color(colors::PRIMARY)
            ));
        }
        None => print::status(format!("internet {address} (no gateway hub found)")),
    }
}

fn print_summary(graph: &Graph, view: &View) {
    let mut ordinary = 0usize;
    let mut containerized = 0usize;
    for host in graph.hosts() {
        if !view.visible_nodes.contains(&host.id) {
            continue;
        }
        match host.kind {
            HostKind::Ordinary => ordinary += 1,
            HostKind::Containerized => containerized += 1,
        }
    }

    print::separator();
    let hosts = format!("{} hosts", ordinary + containerized).bold().green();
    let breakdown = format!("({ordinary} normal / {containerized} docker)").bright_black();
    let routes = format!("{} routes", graph.routes().count()).bold().yellow();
    print::status(format!(
        "{hosts} {breakdown} across {} subnets, {routes}",
        graph.hubs().count()
    ));
    if !view.highlighted.is_empty() {
        print::status(format!(
            "{} matches flagged",
            view.highlighted.len().to_string().bold().yellow()
        ));
    }
}

fn host_line(host: &Host, view: &View) -> String {
    let highlighted = view.highlighted.contains(&host.id);
    let name = if highlighted {
        host.display_name.yellow().bold()
    } else {
        host.display_name.color(colors::TEXT_DEFAULT)
    };

    let mut line = format!(
        "{} ({})",
        name,
        host.address.color(colors::IPV4_ADDR)
    );
    if !is_placeholder(&host.os) {
        line.push_str(&format!(", {}", host.os));
    }
    if !is_placeholder(&host.open_ports) {
        line.push_str(&format!(", ports {}", host.open_ports));
    }
    if !host.online {
        line.push_str(&format!(" [{}]", "offline".color(colors::OFFLINE)));
    }
    line
}
