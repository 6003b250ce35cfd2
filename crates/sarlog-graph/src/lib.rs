//! # sarlog-graph: Relief Logistics Network
//!
//! The supply network for relief operations and the shortest-path search
//! over it.
//!
//! - **Node** (`node.rs`): supplier, hub and mission vertices behind the
//!   shared [`Vertex`] capability, with variant-specific inventory views.
//!
//! - **Graph** (`graph.rs`): owns all nodes and the in-transit ledger;
//!   exposes the load-bearing suppliers → hubs → missions iteration order.
//!
//! - **Shipment** (`shipment.rs`, `lifecycle.rs`): immutable per-leg
//!   shipment records and their phase machine.
//!
//! - **PathFinder** (`pathfinder.rs`): label-setting Dijkstra with
//!   deterministic tie-breaking.
//!
//! ## Crate Policy
//!
//! - Depends only on `sarlog-core` internally.
//! - Nodes are addressed by [`NodeId`](sarlog_core::NodeId) once inserted;
//!   name lookup exists for callers but the core never relies on it.

pub mod graph;
pub mod lifecycle;
pub mod node;
pub mod pathfinder;
pub mod shipment;

pub use graph::LogisticsGraph;
pub use lifecycle::ShipmentPhase;
pub use node::{Hub, Mission, Node, NodeKind, Supplier, Vertex};
pub use pathfinder::{PathFinder, Route};
pub use shipment::Shipment;
