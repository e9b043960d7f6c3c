//! # Selection Coordinator
//!
//! Three-state machine fed by presentation click events. Selecting resolves
//! an id against the current full graph; nothing here mutates an entity.

use atlas_common::network::host::Host;

use crate::graph::{Edge, EdgeKind, ExternalAnchor, Graph, Hub, NetworkGroup, Node};

/// Current selection. States are mutually exclusive; entering one clears
/// the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    NodeSelected(String),
    RouteSelected(String),
}

/// Resolved entity behind the current selection, borrowed from the graph.
#[derive(Debug, PartialEq)]
pub enum Detail<'g> {
    Host(&'g Host),
    Hub(&'g Hub),
    Network(&'g NetworkGroup),
    External(&'g ExternalAnchor),
    /// Synthesized route description: the two hub keys.
    Route { from: String, to: String },
}

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    state: Selection,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Selection {
        &self.state
    }

    /// Handles a click event carrying a node or edge id.
    ///
    /// Ids that resolve to nothing, or to an edge that is not a route,
    /// deselect, matching a click on empty canvas.
    pub fn select(&mut self, graph: &Graph, id: &str) {
        self.state = if graph.node(id).is_some() {
            Selection::NodeSelected(id.to_string())
        } else {
            match graph.edge(id) {
                Some(edge) if matches!(edge.kind, EdgeKind::Route) => {
                    Selection::RouteSelected(id.to_string())
                }
                _ => Selection::Idle,
            }
        };
    }

    /// Handles the cleared event.
    pub fn clear(&mut self) {
        self.state = Selection::Idle;
    }

    /// Resolves the selection against `graph` for the detail surface.
    ///
    /// A selection that no longer resolves (the graph was rebuilt without
    /// the entity) yields `None`; the caller decides whether to clear.
    pub fn detail<'g>(&self, graph: &'g Graph) -> Option<Detail<'g>> {
        match &self.state {
            Selection::Idle => None,
            Selection::NodeSelected(id) => graph.node(id).map(|node| match node {
                Node::Host(host) => Detail::Host(host),
                Node::Hub(hub) => Detail::Hub(hub),
                Node::Network(net) => Detail::Network(net),
                Node::External(ext) => Detail::External(ext),
            }),
            Selection::RouteSelected(id) => graph.edge(id).map(route_detail),
        }
    }
}

fn route_detail(edge: &Edge) -> Detail<'_> {
    Detail::Route {
        from: strip_hub_prefix(&edge.from),
        to: strip_hub_prefix(&edge.to),
    }
}

fn strip_hub_prefix(node_id: &str) -> String {
    node_id
        .strip_prefix("subnet-")
        .unwrap_or(node_id)
        .to_string()
}
