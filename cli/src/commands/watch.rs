use std::collections::BTreeSet;
use std::time::Duration;

use atlas_common::config::Config;
use atlas_core::refresh::Refresher;
use atlas_core::source::SourceSpec;
use colored::*;
use tracing::warn;

use crate::terminal::print;

/// Polls the data source and reports topology changes between rounds.
pub async fn watch(source: &SourceSpec, interval: u64, count: Option<u64>) -> anyhow::Result<()> {
    let config = Config {
        poll_interval_secs: interval,
        ..Config::default()
    };
    let mut refresher = Refresher::new(source.batch_source(), Some(source.external_source()));

    print::header("watching topology");
    print::status(format!(
        "polling every {}s, ctrl-c to stop",
        config.poll_interval_secs
    ));

    let mut previous: Option<(BTreeSet<String>, BTreeSet<String>)> = None;
    let mut rounds: u64 = 0;

    loop {
        match refresher.refresh().await {
            Ok(true) => {
                let graph = refresher
                    .graph()
                    .ok_or_else(|| anyhow::anyhow!("refresh applied without a graph"))?;
                let current = (graph.node_ids(), graph.edge_ids());
                match &previous {
                    Some(prev) => report_changes(prev, &current),
                    None => {
                        let counts = graph.counts();
                        print::status(format!(
                            "baseline: {} hosts, {} edges",
                            (counts.ordinary + counts.containerized).to_string().bold(),
                            current.1.len().to_string().bold()
                        ));
                    }
                }
                previous = Some(current);
            }
            Ok(false) => {}
            Err(err) => warn!("refresh failed, keeping last topology: {err:#}"),
        }

        rounds += 1;
        if let Some(limit) = count {
            if rounds >= limit {
                break;
            }
        }
        tokio::time::sleep(Duration::from_secs(config.poll_interval_secs)).await;
    }

    print::status(format!("stopped after {rounds} rounds"));
    Ok(())
}

fn report_changes(
    previous: &(BTreeSet<String>, BTreeSet<String>),
    current: &(BTreeSet<String>, BTreeSet<String>),
) {
    let mut changes = 0usize;

    for id in current.0.difference(&previous.0) {
        println!("  {} node {id}", "+".green().bold());
        changes += 1;
    }
    for id in previous.0.difference(&current.0) {
        println!("  {} node {id}", "-".red().bold());
        changes += 1;
    }
    for id in current.1.difference(&previous.1) {
        println!("  {} edge {id}", "+".green().bold());
        changes += 1;
    }
    for id in previous.1.difference(&current.1) {
        println!("  {} edge {id}", "-".red().bold());
        changes += 1;
    }

    if changes == 0 {
        print::status("no changes".bright_black().to_string());
    }
}
