//! # Logistics Agent
//!
//! The in-process call surface used by the request-handling layer. One
//! agent owns one graph and one simulation clock for its whole lifetime;
//! the layer above builds the network through [`LogisticsAgent::graph_mut`]
//! and drives time with [`LogisticsAgent::run_time_tick`].

use std::collections::BTreeMap;

use sarlog_core::{
    Good, LogisticsError, NodeId, NodeName, PlanningFailure, Quantity, SimulationConfig, Tick,
};
use sarlog_graph::{LogisticsGraph, Shipment, Vertex};

use crate::planner::{DeliveryPlan, DeliveryPlanner};
use crate::report::TickReport;
use crate::simulator::TransitSimulator;

/// Outstanding requirements of one mission.
pub type MissionRequest = (NodeName, BTreeMap<Good, Quantity>);

/// Graph, clock, and tick history of one logistics simulation.
#[derive(Debug, Clone, Default)]
pub struct LogisticsAgent {
    graph: LogisticsGraph,
    simulator: TransitSimulator,
    history: Vec<TickReport>,
}

impl LogisticsAgent {
    /// An empty network with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty network with an explicit configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            graph: LogisticsGraph::new(),
            simulator: TransitSimulator::new(config),
            history: Vec::new(),
        }
    }

    /// The network.
    pub fn graph(&self) -> &LogisticsGraph {
        &self.graph
    }

    /// The network, for construction and edits.
    pub fn graph_mut(&mut self) -> &mut LogisticsGraph {
        &mut self.graph
    }

    /// Current tick.
    pub fn now(&self) -> Tick {
        self.simulator.now()
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        self.simulator.config()
    }

    /// Each mission's name and a snapshot of its outstanding requirements,
    /// in graph order.
    pub fn get_requests(&self) -> Vec<MissionRequest> {
        self.graph
            .missions()
            .iter()
            .filter_map(|&id| self.graph.mission(id).ok())
            .map(|m| (m.name().clone(), m.requirements().clone()))
            .collect()
    }

    /// Plan routes for every outstanding requirement.
    pub fn calculate_deliveries(&self) -> Result<DeliveryPlan, PlanningFailure> {
        DeliveryPlanner::new(&self.graph).plan()
    }

    /// Originate a shipment along `path` outside the planner's batches.
    pub fn make_delivery(
        &mut self,
        good: impl Into<Good>,
        quantity: Quantity,
        path: Vec<NodeId>,
    ) -> Result<Shipment, LogisticsError> {
        self.simulator
            .dispatch(&mut self.graph, good.into(), quantity, path)
    }

    /// Advance one tick and return the new tick count.
    ///
    /// The tick's report is appended to the history; once the history holds
    /// `history_limit` reports the oldest are discarded.
    pub fn run_time_tick(&mut self) -> Result<Tick, LogisticsError> {
        let report = self.simulator.tick(&mut self.graph)?;
        let now = report.now;
        self.history.push(report);
        let limit = self.simulator.config().history_limit;
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
        Ok(now)
    }

    /// Report of the most recent retained tick.
    pub fn last_report(&self) -> Option<&TickReport> {
        self.history.last()
    }

    /// Retained tick reports, oldest first.
    pub fn history(&self) -> &[TickReport] {
        &self.history
    }

    /// Take every retained report, leaving the history empty.
    pub fn drain_history(&mut self) -> Vec<TickReport> {
        std::mem::take(&mut self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarlog_graph::{Hub, Mission, Supplier};

    #[test]
    fn new_agent_starts_at_tick_zero() {
        let agent = LogisticsAgent::new();
        assert_eq!(agent.now(), Tick::ZERO);
        assert!(agent.graph().is_empty());
        assert!(agent.last_report().is_none());
    }

    #[test]
    fn requests_follow_mission_order() {
        let mut agent = LogisticsAgent::new();
        let graph = agent.graph_mut();
        let b = graph.add_mission(Mission::new("bravo")).unwrap();
        let a = graph.add_mission(Mission::new("alpha")).unwrap();
        graph.mission_mut(b).unwrap().add_required("Rope", 3);
        graph.mission_mut(a).unwrap().add_required("Water", 8);

        let requests = agent.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0.as_str(), "bravo");
        assert_eq!(requests[0].1.get(&Good::from("Rope")), Some(&3));
        assert_eq!(requests[1].0.as_str(), "alpha");
    }

    #[test]
    fn ticks_count_up_even_with_nothing_to_do() {
        let mut agent = LogisticsAgent::new();
        assert_eq!(agent.run_time_tick(), Ok(Tick(1)));
        assert_eq!(agent.run_time_tick(), Ok(Tick(2)));
        assert_eq!(agent.history().len(), 2);
    }

    #[test]
    fn make_delivery_from_hub_clips_to_stock() {
        let mut agent = LogisticsAgent::new();
        let graph = agent.graph_mut();
        let h = graph.add_hub(Hub::new("hub1")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        graph.connect(h, m, 1).unwrap();
        graph.hub_mut(h).unwrap().receive("Rope", 4);

        let shipment = agent.make_delivery("Rope", 10, vec![h, m]).unwrap();
        assert_eq!(shipment.quantity(), 4);
        assert_eq!(shipment.departed(), Tick::ZERO);
        assert_eq!(agent.graph().hub(h).unwrap().on_hand(&Good::from("Rope")), 0);
        assert_eq!(agent.graph().in_transit_shipments().len(), 1);
    }

    #[test]
    fn make_delivery_of_unknown_good_from_hub_fails() {
        let mut agent = LogisticsAgent::new();
        let graph = agent.graph_mut();
        let h = graph.add_hub(Hub::new("hub1")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();

        let err = agent.make_delivery("Rope", 10, vec![h, m]).unwrap_err();
        assert!(matches!(err, LogisticsError::NotFound(_)));
        assert!(agent.graph().in_transit_shipments().is_empty());
    }

    #[test]
    fn make_delivery_from_mission_is_rejected() {
        let mut agent = LogisticsAgent::new();
        let graph = agent.graph_mut();
        let s = graph.add_supplier(Supplier::new("supply1")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();

        let err = agent.make_delivery("Rope", 10, vec![m, s]).unwrap_err();
        assert!(matches!(err, LogisticsError::NotShippable { .. }));
    }

    #[test]
    fn make_delivery_needs_a_leg() {
        let mut agent = LogisticsAgent::new();
        let s = agent
            .graph_mut()
            .add_supplier(Supplier::new("supply1"))
            .unwrap();
        assert_eq!(
            agent.make_delivery("Rope", 10, vec![s]).unwrap_err(),
            LogisticsError::RouteTooShort { len: 1 }
        );
    }

    #[test]
    fn history_keeps_only_the_most_recent_reports() {
        let mut agent = LogisticsAgent::with_config(SimulationConfig {
            history_limit: 3,
            ..SimulationConfig::default()
        });
        for _ in 0..5 {
            agent.run_time_tick().unwrap();
        }
        let ticks: Vec<Tick> = agent.history().iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![Tick(2), Tick(3), Tick(4)]);
        assert_eq!(agent.last_report().map(|r| r.now), Some(Tick(5)));

        let drained = agent.drain_history();
        assert_eq!(drained.len(), 3);
        assert!(agent.history().is_empty());
        agent.run_time_tick().unwrap();
        assert_eq!(agent.history().len(), 1);
    }

    #[test]
    fn zero_history_limit_keeps_nothing() {
        let mut agent = LogisticsAgent::with_config(SimulationConfig {
            history_limit: 0,
            ..SimulationConfig::default()
        });
        assert_eq!(agent.run_time_tick(), Ok(Tick(1)));
        assert!(agent.last_report().is_none());
    }
}
