//! # Error Types: Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Absence (edge, inventory entry, node) is a [`NotFoundError`] naming
//!   the node involved, so callers can probe for absence and recover.
//! - Unreachable destinations are [`LogisticsError::NoPath`].
//! - Planning failure is not an error at all: [`PlanningFailure`] is a
//!   value that the planner returns and the simulator records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::{Good, NodeId, NodeName};

/// Top-level error type for graph and simulation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogisticsError {
    /// Something an operation assumed present was absent.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// No route exists from the source to the destination.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Source node.
        from: NodeName,
        /// Destination node.
        to: NodeName,
    },

    /// A node with this name is already part of the graph.
    #[error("a node named {0:?} already exists")]
    DuplicateNode(NodeName),

    /// A shipment lifecycle transition was rejected.
    #[error("invalid shipment transition from {from} to {to}")]
    InvalidTransition {
        /// Phase the shipment was in.
        from: String,
        /// Phase it was asked to move to.
        to: String,
    },

    /// A route needs at least an origin and one further stop.
    #[error("route has {len} node(s); a shipment needs at least two")]
    RouteTooShort {
        /// Number of nodes in the rejected route.
        len: usize,
    },

    /// The node variant holds no outbound stock and cannot ship.
    #[error("{node} cannot ship goods")]
    NotShippable {
        /// The node asked to ship.
        node: NodeName,
    },
}

/// The specific thing that was missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    /// No directed edge between the two nodes.
    #[error("no edge from {from} to {to}")]
    Edge {
        /// Edge tail.
        from: NodeName,
        /// Edge head.
        to: NodeId,
    },

    /// The node never held the good.
    #[error("{node} holds no inventory of {good}")]
    Inventory {
        /// Node asked for the good.
        node: NodeName,
        /// The good requested.
        good: Good,
    },

    /// The handle does not refer to a node of the expected kind in the graph.
    #[error("{0} is not in the graph")]
    Node(NodeId),

    /// The supplier does not list the good.
    #[error("{node} does not provide {good}")]
    ProvidedGood {
        /// The supplier.
        node: NodeName,
        /// The good.
        good: Good,
    },

    /// The mission has no outstanding requirement for the good.
    #[error("{node} has no requirement for {good}")]
    Requirement {
        /// The mission.
        node: NodeName,
        /// The good.
        good: Good,
    },

    /// The shipment is not in transit.
    #[error("shipment of {good} from {from} to {to} is not in transit")]
    Shipment {
        /// Good carried.
        good: Good,
        /// Leg origin.
        from: NodeId,
        /// Leg destination.
        to: NodeId,
    },
}

/// Planning could not find a route for one of a mission's required goods.
///
/// Returned (not raised) by the planner: an unreachable mission is an
/// expected outcome during relief operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Unable to find path for mission {mission}")]
pub struct PlanningFailure {
    /// The first mission, in graph order, that could not be served.
    pub mission: NodeName,
}
