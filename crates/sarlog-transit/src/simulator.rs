//! # Transit Simulator
//!
//! Advances the simulation one tick at a time. Each tick:
//!
//! 1. Every shipment in transit at the start of the tick is examined.
//!    - At the disruption tick, it is lost. If the leg was bound for a
//!      mission, the quantity goes back onto that mission's requirement.
//!    - Otherwise, once `departed + weight <= now`, the leg completes: the
//!      next leg departs at `now`, or the goods are accepted at the end of
//!      the route.
//!    - Otherwise it stays in the ledger unchanged.
//! 2. The planner runs. Every planned route gets one batch dispatched on
//!    its first leg and the mission's requirement is reduced by the batch.
//! 3. The clock advances by one.
//!
//! Hand-offs depart at the tick they are processed, so each leg costs its
//! own weight and lateness is absorbed rather than compounded.
//!
//! A failed planning pass dispatches nothing; shipments already moving are
//! still advanced and the clock still ticks.

use sarlog_core::{Good, LogisticsError, NodeId, Quantity, SimulationConfig, Tick, Weight};
use sarlog_graph::{LogisticsGraph, Shipment, ShipmentPhase};

use crate::planner::DeliveryPlanner;
use crate::report::{Dispatch, ShipmentOutcome, TickReport};

/// Owns the simulation clock.
#[derive(Debug, Clone)]
pub struct TransitSimulator {
    config: SimulationConfig,
    clock: Tick,
}

impl Default for TransitSimulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl TransitSimulator {
    /// Start a simulation at tick zero.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            clock: Tick::ZERO,
        }
    }

    /// Current tick.
    pub fn now(&self) -> Tick {
        self.clock
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Originate a shipment outside the planner's batch policy.
    ///
    /// Every leg of the route must be an existing edge; otherwise this
    /// fails before anything is shipped. The route's first node releases
    /// the goods (a hub may release less than asked; a mission cannot
    /// ship) and the first leg departs at the current tick.
    pub fn dispatch(
        &self,
        graph: &mut LogisticsGraph,
        good: Good,
        quantity: Quantity,
        route: Vec<NodeId>,
    ) -> Result<Shipment, LogisticsError> {
        if route.len() < 2 {
            return Err(LogisticsError::RouteTooShort { len: route.len() });
        }
        for leg in route.windows(2) {
            graph.node(leg[1])?;
            graph.weight(leg[0], leg[1])?;
        }
        let shipped = graph.node_mut(route[0])?.ship_out(&good, quantity)?;
        let shipment = Shipment::first_leg(good, shipped, route, self.clock)?;
        tracing::debug!(
            good = %shipment.good(),
            quantity = shipped,
            origin = %shipment.origin(),
            destination = %shipment.destination(),
            tick = %self.clock,
            "manual shipment dispatched"
        );
        graph.add_in_transit(shipment.clone());
        Ok(shipment)
    }

    /// Run one tick and return its report. `report.now` is the new clock.
    ///
    /// Every in-flight leg's edge and destination are checked before any
    /// state changes; if one has been removed the tick fails with
    /// `NotFound` and nothing is modified.
    pub fn tick(&mut self, graph: &mut LogisticsGraph) -> Result<TickReport, LogisticsError> {
        let now = self.clock;
        let mut report = TickReport::new(now);
        report.disrupted = self.config.is_disruption(now);

        let legs = if report.disrupted {
            Vec::new()
        } else {
            leg_weights(graph)?
        };

        let in_flight = graph.drain_in_transit();
        if report.disrupted && !in_flight.is_empty() {
            tracing::warn!(
                tick = %now,
                shipments = in_flight.len(),
                "disruption: all shipments in transit lost"
            );
        }

        for (index, shipment) in in_flight.into_iter().enumerate() {
            if report.disrupted {
                self.lose(graph, &shipment, now, &mut report)?;
                continue;
            }
            let weight = legs[index];
            let phase = shipment.phase_at(now);
            if !shipment.has_arrived(weight, now) {
                let to = phase.transition(ShipmentPhase::InFlight)?;
                report.outcomes.push(ShipmentOutcome::new(&shipment, phase, to));
                graph.add_in_transit(shipment);
            } else if let Some(next) = shipment.next_leg(now) {
                let to = phase.transition(ShipmentPhase::LegArrived)?;
                tracing::debug!(
                    good = %shipment.good(),
                    at = %shipment.destination(),
                    next = %next.destination(),
                    tick = %now,
                    "leg complete, handing off"
                );
                report.outcomes.push(ShipmentOutcome::new(&shipment, phase, to));
                graph.add_in_transit(next);
            } else {
                let to = phase.transition(ShipmentPhase::Delivered)?;
                graph
                    .node_mut(shipment.destination())?
                    .accept(shipment.good(), shipment.quantity());
                tracing::info!(
                    good = %shipment.good(),
                    quantity = shipment.quantity(),
                    destination = %shipment.destination(),
                    tick = %now,
                    "shipment delivered"
                );
                report.outcomes.push(ShipmentOutcome::new(&shipment, phase, to));
            }
        }

        self.dispatch_planned(graph, &mut report)?;

        self.clock = now.next();
        report.now = self.clock;
        tracing::info!(
            tick = %now,
            delivered = report.delivered(),
            handed_off = report.handed_off(),
            lost = report.lost(),
            dispatched = report.dispatched.len(),
            "tick complete"
        );
        Ok(report)
    }

    fn lose(
        &self,
        graph: &mut LogisticsGraph,
        shipment: &Shipment,
        now: Tick,
        report: &mut TickReport,
    ) -> Result<(), LogisticsError> {
        let phase = shipment.phase_at(now);
        let to = phase.transition(ShipmentPhase::Lost)?;
        // Only missions track requirements; a leg bound for a hub just loses the goods.
        if let Ok(mission) = graph.mission_mut(shipment.destination()) {
            mission.restore_requirement(shipment.good().clone(), shipment.quantity());
        }
        report.outcomes.push(ShipmentOutcome::new(shipment, phase, to));
        Ok(())
    }

    fn dispatch_planned(
        &self,
        graph: &mut LogisticsGraph,
        report: &mut TickReport,
    ) -> Result<(), LogisticsError> {
        let plan = match DeliveryPlanner::new(graph).plan() {
            Ok(plan) => plan,
            Err(failure) => {
                tracing::warn!(tick = %self.clock, %failure, "planning failed; nothing dispatched");
                report.planning_failure = Some(failure);
                return Ok(());
            }
        };

        let batch = self.config.batch_size;
        for (mission, good, route) in plan.iter() {
            let shipment =
                Shipment::first_leg(good.clone(), batch, route.nodes().to_vec(), self.clock)?;
            graph.add_in_transit(shipment);
            graph
                .mission_mut(mission)?
                .receive_in_transit_commitment(good, batch);
            report.dispatched.push(Dispatch {
                mission,
                good: good.clone(),
                quantity: batch,
                route: route.nodes().to_vec(),
            });
        }
        Ok(())
    }
}

/// Edge weight of every in-transit leg, in ledger order.
fn leg_weights(graph: &LogisticsGraph) -> Result<Vec<Weight>, LogisticsError> {
    graph
        .in_transit_shipments()
        .iter()
        .map(|s| {
            graph.node(s.destination())?;
            graph.weight(s.origin(), s.destination())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
