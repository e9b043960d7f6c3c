//! # Filter Engine
//!
//! Computes the visible subgraph for a predicate set without touching the
//! underlying data. Hiding and highlighting are separate outputs: which of
//! the two a text match triggers is an explicit [`FilterMode`], never an
//! implicit mix.

use std::collections::BTreeSet;

use atlas_common::network::host::{Host, HostKind};

use crate::graph::Graph;

/// The active visibility predicates. A fresh value per filter application;
/// the engine never mutates hosts or graph state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Keep containerized hosts only.
    pub container_only: bool,
    /// Case-insensitive substring over address, name, os, mac and ports.
    pub text: String,
    /// Exact match on the normalized os field. `None` matches all.
    pub os: Option<String>,
    /// Exact match on the host's subnet key. `None` matches all.
    pub subnet: Option<String>,
}

impl FilterState {
    fn matches_text(&self, host: &Host) -> bool {
        self.text.is_empty() || host.search_haystack().contains(&self.text.to_lowercase())
    }

    /// All predicates except text.
    fn passes_structured(&self, host: &Host) -> bool {
        if self.container_only && host.kind != HostKind::Containerized {
            return false;
        }
        if let Some(os) = &self.os {
            if !os.is_empty() && *os != host.os {
                return false;
            }
        }
        if let Some(subnet) = &self.subnet {
            if !subnet.is_empty() && *subnet != host.subnet().to_string() {
                return false;
            }
        }
        true
    }
}

/// What a text match does to non-matching hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Non-matching hosts are hidden.
    #[default]
    Exclude,
    /// All hosts that pass the structured predicates stay visible; matches
    /// are flagged in the highlight set only.
    Highlight,
}

/// The computed visible subset plus the non-exclusionary highlight flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub visible_nodes: BTreeSet<String>,
    pub visible_edges: BTreeSet<String>,
    pub highlighted: BTreeSet<String>,
}

/// Applies `state` to `graph`.
///
/// Pure: identical inputs produce identical output sets. Edge visibility is
/// derived, never computed independently; an edge is visible exactly when
/// both endpoints are.
pub fn apply(graph: &Graph, state: &FilterState, mode: FilterMode) -> View {
    let mut view = View::default();

    for node in graph.nodes.values() {
        let id = node.id();
        if node.is_structural() {
            // Scaffolding is never hidden by host-level predicates.
            view.visible_nodes.insert(id);
            continue;
        }
        let Some(host) = node.as_host() else {
            continue;
        };
        if !state.passes_structured(host) {
            continue;
        }
        let text_match = state.matches_text(host);
        if !state.text.is_empty() && text_match {
            view.highlighted.insert(id.clone());
        }
        match mode {
            FilterMode::Exclude if !text_match => {}
            _ => {
                view.visible_nodes.insert(id);
            }
        }
    }

    for edge in graph.edges.values() {
        if view.visible_nodes.contains(&edge.from) && view.visible_nodes.contains(&edge.to) {
            view.visible_edges.insert(edge.id.clone());
        }
    }

    view
}
