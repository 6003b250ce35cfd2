//! # Tick Reports
//!
//! What happened during one simulation tick: the fate of every shipment
//! that was in transit when the tick began, the shipments the planner
//! originated, and the planning failure if there was one.

use serde::{Deserialize, Serialize};

use sarlog_core::{Good, NodeId, PlanningFailure, Quantity, Tick};
use sarlog_graph::{Shipment, ShipmentPhase};

/// Fate of one in-transit leg during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentOutcome {
    /// Good carried.
    pub good: Good,
    /// Units carried.
    pub quantity: Quantity,
    /// Leg origin.
    pub origin: NodeId,
    /// Leg destination.
    pub destination: NodeId,
    /// Phase the leg was in when the tick observed it.
    pub from: ShipmentPhase,
    /// Phase reached.
    pub to: ShipmentPhase,
}

impl ShipmentOutcome {
    pub(crate) fn new(shipment: &Shipment, from: ShipmentPhase, to: ShipmentPhase) -> Self {
        Self {
            good: shipment.good().clone(),
            quantity: shipment.quantity(),
            origin: shipment.origin(),
            destination: shipment.destination(),
            from,
            to,
        }
    }
}

/// A shipment originated during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Mission the goods are for.
    pub mission: NodeId,
    /// Good dispatched.
    pub good: Good,
    /// Units dispatched.
    pub quantity: Quantity,
    /// Full route, supplier first.
    pub route: Vec<NodeId>,
}

/// Summary of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Clock value while the tick was processed.
    pub tick: Tick,
    /// Clock value after the tick.
    pub now: Tick,
    /// Whether the scripted disruption fired.
    pub disrupted: bool,
    /// One entry per shipment in transit at the start of the tick.
    pub outcomes: Vec<ShipmentOutcome>,
    /// Shipments originated by the planner.
    pub dispatched: Vec<Dispatch>,
    /// Set when planning failed and nothing was dispatched.
    pub planning_failure: Option<PlanningFailure>,
}

impl TickReport {
    pub(crate) fn new(tick: Tick) -> Self {
        Self {
            tick,
            now: tick,
            disrupted: false,
            outcomes: Vec::new(),
            dispatched: Vec::new(),
            planning_failure: None,
        }
    }

    /// Outcomes that reached `phase`.
    pub fn count(&self, phase: ShipmentPhase) -> usize {
        self.outcomes.iter().filter(|o| o.to == phase).count()
    }

    /// Legs completed with goods received at the route's end.
    pub fn delivered(&self) -> usize {
        self.count(ShipmentPhase::Delivered)
    }

    /// Legs handed off to a following leg.
    pub fn handed_off(&self) -> usize {
        self.count(ShipmentPhase::LegArrived)
    }

    /// Legs destroyed by the disruption.
    pub fn lost(&self) -> usize {
        self.count(ShipmentPhase::Lost)
    }
}
