//! # Shipments in Transit
//!
//! A [`Shipment`] is an immutable record of one good travelling one leg of
//! a route. A leg that has not arrived stays in the ledger exactly as it
//! was dispatched; a hand-off replaces it with a new record for the next
//! leg. The lifecycle phase is derived from the clock, never stored.
//!
//! Invariant: `route[leg]` is the leg origin and `route[leg + 1]` the leg
//! destination, so the route always holds the two as adjacent entries.

use serde::{Deserialize, Serialize};

use sarlog_core::{Good, LogisticsError, NodeId, Quantity, Tick, Weight};

use crate::lifecycle::ShipmentPhase;

/// One leg of a routed shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    good: Good,
    quantity: Quantity,
    route: Vec<NodeId>,
    leg: usize,
    departed: Tick,
}

impl Shipment {
    /// Originate the first leg of `route` at tick `departed`.
    pub fn first_leg(
        good: Good,
        quantity: Quantity,
        route: Vec<NodeId>,
        departed: Tick,
    ) -> Result<Self, LogisticsError> {
        if route.len() < 2 {
            return Err(LogisticsError::RouteTooShort { len: route.len() });
        }
        Ok(Self {
            good,
            quantity,
            route,
            leg: 0,
            departed,
        })
    }

    /// The good carried.
    pub fn good(&self) -> &Good {
        &self.good
    }

    /// Units carried.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Full route from ultimate source to ultimate destination.
    pub fn route(&self) -> &[NodeId] {
        &self.route
    }

    /// Zero-based index of the current leg.
    pub fn leg(&self) -> usize {
        self.leg
    }

    /// Origin of the current leg.
    pub fn origin(&self) -> NodeId {
        self.route[self.leg]
    }

    /// Destination of the current leg.
    pub fn destination(&self) -> NodeId {
        self.route[self.leg + 1]
    }

    /// Last node of the route.
    pub fn final_destination(&self) -> NodeId {
        self.route[self.route.len() - 1]
    }

    /// Tick the current leg departed.
    pub fn departed(&self) -> Tick {
        self.departed
    }

    /// Phase of this leg as seen by a tick running at `now`: departed
    /// while the clock has not moved past the departure, in flight after.
    pub fn phase_at(&self, now: Tick) -> ShipmentPhase {
        if now <= self.departed {
            ShipmentPhase::Departed
        } else {
            ShipmentPhase::InFlight
        }
    }

    /// Whether the route continues past the current leg destination.
    pub fn has_next_leg(&self) -> bool {
        self.leg + 2 < self.route.len()
    }

    /// Scheduled arrival over an edge of `weight`.
    pub fn arrival(&self, weight: Weight) -> Tick {
        self.departed.after(weight)
    }

    /// Whether the leg is complete at `now`.
    pub fn has_arrived(&self, weight: Weight, now: Tick) -> bool {
        self.arrival(weight) <= now
    }

    /// The record for the following leg, departing at `now`.
    pub fn next_leg(&self, now: Tick) -> Option<Shipment> {
        if !self.has_next_leg() {
            return None;
        }
        Some(Self {
            good: self.good.clone(),
            quantity: self.quantity,
            route: self.route.clone(),
            leg: self.leg + 1,
            departed: now,
        })
    }
}
