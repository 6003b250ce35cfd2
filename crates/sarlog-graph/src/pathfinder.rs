//! # Shortest-Path Search
//!
//! Label-setting Dijkstra over the graph's directed, weighted edges.
//!
//! ## Determinism
//!
//! Selection of the next node to settle scans [`LogisticsGraph::all_nodes`]
//! in order and takes the first node with the strictly smallest tentative
//! distance. Ties therefore resolve suppliers first, then hubs, then
//! missions, each in insertion order. Relaxation only replaces a
//! predecessor on a strictly shorter distance, so the first settled
//! predecessor wins equal-length alternatives.
//!
//! The scan is O(V²) per search, which is fine at the expected scale of
//! tens of nodes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sarlog_core::{LogisticsError, NodeId, NotFoundError, Weight};

use crate::graph::LogisticsGraph;
use crate::node::Vertex;

/// Tentative distance of a node not yet reached.
const UNREACHED: Weight = Weight::MAX;

/// A path through the graph, ordered from source to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<NodeId>,
    total_weight: Weight,
}

impl Route {
    /// Nodes from source to destination.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Take ownership of the node sequence.
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Sum of edge weights along the route.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// First node.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node.
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Dijkstra search bound to one graph.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    graph: &'g LogisticsGraph,
}

impl<'g> PathFinder<'g> {
    /// Search over `graph`.
    pub fn new(graph: &'g LogisticsGraph) -> Self {
        Self { graph }
    }

    /// Minimum-weight route from `source` to `destination`.
    ///
    /// Edges pointing at nodes no longer in the graph are ignored. Fails
    /// with `NotFound` if either endpoint is absent and `NoPath` if the
    /// destination is unreachable.
    pub fn shortest_path(
        &self,
        source: NodeId,
        destination: NodeId,
    ) -> Result<Route, LogisticsError> {
        let order = self.graph.all_nodes();
        let position: HashMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let start = *position.get(&source).ok_or(NotFoundError::Node(source))?;
        let goal = *position
            .get(&destination)
            .ok_or(NotFoundError::Node(destination))?;

        let mut distance = vec![UNREACHED; order.len()];
        let mut previous: Vec<Option<usize>> = vec![None; order.len()];
        let mut settled = vec![false; order.len()];
        distance[start] = 0;

        let mut current = start;
        while current != goal {
            settled[current] = true;

            for (neighbor, &weight) in self.graph.node(order[current])?.connections() {
                let Some(&n) = position.get(neighbor) else {
                    continue;
                };
                if settled[n] {
                    continue;
                }
                let candidate = distance[current].saturating_add(weight);
                if candidate < distance[n] {
                    distance[n] = candidate;
                    previous[n] = Some(current);
                }
            }

            let mut next: Option<usize> = None;
            for i in 0..order.len() {
                if settled[i] {
                    continue;
                }
                if next.map_or(true, |best| distance[i] < distance[best]) {
                    next = Some(i);
                }
            }

            match next {
                Some(i) if distance[i] != UNREACHED => current = i,
                _ => {
                    return Err(LogisticsError::NoPath {
                        from: self.graph.name(source)?.clone(),
                        to: self.graph.name(destination)?.clone(),
                    })
                }
            }
        }

        let mut nodes = vec![order[goal]];
        let mut cursor = goal;
        while let Some(prev) = previous[cursor] {
            nodes.push(order[prev]);
            cursor = prev;
        }
        nodes.reverse();

        tracing::debug!(
            source = %source,
            destination = %destination,
            hops = nodes.len().saturating_sub(1),
            total_weight = distance[goal],
            "shortest path found"
        );

        Ok(Route {
            nodes,
            total_weight: distance[goal],
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
