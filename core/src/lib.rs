//! # Topology Engine
//!
//! Turns periodic discovery batches into an explorable network graph:
//! normalization of raw rows, subnet/network grouping, graph assembly with
//! inferred inter-subnet routes, live filtering, and selection lookups.
//!
//! The crate never talks to a screen. It consumes two row lists from a
//! [`source::HostBatchSource`], produces plain node/edge data, and leaves
//! rendering to whoever owns the output.

pub mod filter;
pub mod graph;
pub mod grouping;
pub mod normalize;
pub mod refresh;
pub mod selection;
pub mod source;
