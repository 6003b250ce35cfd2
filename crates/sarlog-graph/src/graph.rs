//! # Logistics Graph
//!
//! Owns every supplier, hub and mission plus the ledger of shipments in
//! transit. Nodes live in an arena and are addressed by [`NodeId`]; handles
//! are allocated in insertion order and never reused, so a removed node
//! leaves a hole rather than shifting later handles.
//!
//! ## Ordering
//!
//! [`LogisticsGraph::all_nodes`] yields suppliers, then hubs, then missions,
//! each group in insertion order. Shortest-path tie-breaks depend on this
//! order, so it is part of the contract.

use serde::{Deserialize, Serialize};

use sarlog_core::{LogisticsError, NodeId, NodeName, NotFoundError, Weight};

use crate::node::{Hub, Mission, Node, NodeKind, Supplier, Vertex};
use crate::shipment::Shipment;

/// The supply network and its in-transit ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsGraph {
    slots: Vec<Option<Node>>,
    suppliers: Vec<NodeId>,
    hubs: Vec<NodeId>,
    missions: Vec<NodeId>,
    in_transit: Vec<Shipment>,
}

impl LogisticsGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Insertion and removal ───────────────────────────────────────

    /// Insert a supplier.
    pub fn add_supplier(&mut self, supplier: Supplier) -> Result<NodeId, LogisticsError> {
        let id = self.insert(supplier.into())?;
        self.suppliers.push(id);
        Ok(id)
    }

    /// Insert a hub.
    pub fn add_hub(&mut self, hub: Hub) -> Result<NodeId, LogisticsError> {
        let id = self.insert(hub.into())?;
        self.hubs.push(id);
        Ok(id)
    }

    /// Insert a mission.
    pub fn add_mission(&mut self, mission: Mission) -> Result<NodeId, LogisticsError> {
        let id = self.insert(mission.into())?;
        self.missions.push(id);
        Ok(id)
    }

    /// Remove a supplier, returning it.
    pub fn remove_supplier(&mut self, id: NodeId) -> Result<Supplier, LogisticsError> {
        match self.take(id, NodeKind::Supplier)? {
            Node::Supplier(s) => Ok(s),
            _ => Err(NotFoundError::Node(id).into()),
        }
    }

    /// Remove a hub, returning it.
    pub fn remove_hub(&mut self, id: NodeId) -> Result<Hub, LogisticsError> {
        match self.take(id, NodeKind::Hub)? {
            Node::Hub(h) => Ok(h),
            _ => Err(NotFoundError::Node(id).into()),
        }
    }

    /// Remove a mission, returning it.
    pub fn remove_mission(&mut self, id: NodeId) -> Result<Mission, LogisticsError> {
        match self.take(id, NodeKind::Mission)? {
            Node::Mission(m) => Ok(m),
            _ => Err(NotFoundError::Node(id).into()),
        }
    }

    fn insert(&mut self, node: Node) -> Result<NodeId, LogisticsError> {
        if self.find(node.name().as_str()).is_some() {
            return Err(LogisticsError::DuplicateNode(node.name().clone()));
        }
        let id = NodeId(self.slots.len());
        self.slots.push(Some(node));
        Ok(id)
    }

    fn take(&mut self, id: NodeId, kind: NodeKind) -> Result<Node, LogisticsError> {
        let group = match kind {
            NodeKind::Supplier => &mut self.suppliers,
            NodeKind::Hub => &mut self.hubs,
            NodeKind::Mission => &mut self.missions,
        };
        let position = group
            .iter()
            .position(|&member| member == id)
            .ok_or(NotFoundError::Node(id))?;
        group.remove(position);
        self.slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Supplier handles in insertion order.
    pub fn suppliers(&self) -> &[NodeId] {
        &self.suppliers
    }

    /// Hub handles in insertion order.
    pub fn hubs(&self) -> &[NodeId] {
        &self.hubs
    }

    /// Mission handles in insertion order.
    pub fn missions(&self) -> &[NodeId] {
        &self.missions
    }

    /// Suppliers, then hubs, then missions.
    pub fn all_nodes(&self) -> Vec<NodeId> {
        self.suppliers
            .iter()
            .chain(&self.hubs)
            .chain(&self.missions)
            .copied()
            .collect()
    }

    /// Number of nodes currently in the graph.
    pub fn len(&self) -> usize {
        self.suppliers.len() + self.hubs.len() + self.missions.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` refers to a node still in the graph.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Result<&Node, LogisticsError> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// Mutable node lookup.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, LogisticsError> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// Name of a node.
    pub fn name(&self, id: NodeId) -> Result<&NodeName, LogisticsError> {
        Ok(self.node(id)?.name())
    }

    /// Find a node by name. Intended for the request-handling layer; the
    /// core itself always works with handles.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref()
                .filter(|node| node.name().as_str() == name)
                .map(|_| NodeId(index))
        })
    }

    /// The supplier behind `id`.
    pub fn supplier(&self, id: NodeId) -> Result<&Supplier, LogisticsError> {
        self.node(id)?
            .as_supplier()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// Mutable supplier access.
    pub fn supplier_mut(&mut self, id: NodeId) -> Result<&mut Supplier, LogisticsError> {
        self.node_mut(id)?
            .as_supplier_mut()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// The hub behind `id`.
    pub fn hub(&self, id: NodeId) -> Result<&Hub, LogisticsError> {
        self.node(id)?
            .as_hub()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// Mutable hub access.
    pub fn hub_mut(&mut self, id: NodeId) -> Result<&mut Hub, LogisticsError> {
        self.node_mut(id)?
            .as_hub_mut()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// The mission behind `id`.
    pub fn mission(&self, id: NodeId) -> Result<&Mission, LogisticsError> {
        self.node(id)?
            .as_mission()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    /// Mutable mission access.
    pub fn mission_mut(&mut self, id: NodeId) -> Result<&mut Mission, LogisticsError> {
        self.node_mut(id)?
            .as_mission_mut()
            .ok_or_else(|| NotFoundError::Node(id).into())
    }

    // ── Edges ───────────────────────────────────────────────────────

    /// Insert or overwrite the directed edge `from → to`.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), LogisticsError> {
        if !self.contains(to) {
            return Err(NotFoundError::Node(to).into());
        }
        self.node_mut(from)?.connect(to, weight);
        Ok(())
    }

    /// Connect `a` and `b` in both directions with the same weight.
    pub fn connect_both(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: Weight,
    ) -> Result<(), LogisticsError> {
        self.connect(a, b, weight)?;
        self.connect(b, a, weight)
    }

    /// Remove the directed edge `from → to`, returning its weight.
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Result<Weight, LogisticsError> {
        self.node_mut(from)?.disconnect(to)
    }

    /// Weight of the directed edge `from → to`.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Result<Weight, LogisticsError> {
        self.node(from)?.weight_to(to)
    }

    // ── In-transit ledger ───────────────────────────────────────────

    /// Shipments currently travelling.
    pub fn in_transit_shipments(&self) -> &[Shipment] {
        &self.in_transit
    }

    /// Register a shipment as travelling.
    pub fn add_in_transit(&mut self, shipment: Shipment) {
        self.in_transit.push(shipment);
    }

    /// Remove one shipment from the ledger.
    pub fn remove_in_transit(&mut self, shipment: &Shipment) -> Result<Shipment, LogisticsError> {
        let position = self
            .in_transit
            .iter()
            .position(|s| s == shipment)
            .ok_or_else(|| NotFoundError::Shipment {
                good: shipment.good().clone(),
                from: shipment.origin(),
                to: shipment.destination(),
            })?;
        Ok(self.in_transit.remove(position))
    }

    /// Empty the ledger, returning everything that was travelling.
    pub fn drain_in_transit(&mut self) -> Vec<Shipment> {
        std::mem::take(&mut self.in_transit)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
