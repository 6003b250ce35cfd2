//! # Delivery Planner
//!
//! For every mission and every good it still requires, picks the supplier
//! whose shortest route to the mission is lightest.
//!
//! ## Failure Propagation
//!
//! Planning is all-or-nothing. The first (mission, good) pair, in graph
//! order, for which no supplier of the good can reach the mission aborts
//! the pass and yields a [`PlanningFailure`] naming that mission, even if
//! every other mission could be served.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sarlog_core::{Good, NodeId, PlanningFailure};
use sarlog_graph::{LogisticsGraph, PathFinder, Route, Vertex};

/// Chosen routes: mission → good → route (supplier first, mission last).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    routes: BTreeMap<NodeId, BTreeMap<Good, Route>>,
}

impl DeliveryPlan {
    /// Routes planned for one mission.
    pub fn routes_for(&self, mission: NodeId) -> Option<&BTreeMap<Good, Route>> {
        self.routes.get(&mission)
    }

    /// Route planned for one (mission, good) pair.
    pub fn route(&self, mission: NodeId, good: &Good) -> Option<&Route> {
        self.routes.get(&mission).and_then(|goods| goods.get(good))
    }

    /// Every planned (mission, good, route), missions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Good, &Route)> {
        self.routes
            .iter()
            .flat_map(|(&mission, goods)| {
                goods
                    .iter()
                    .map(move |(good, route)| (mission, good, route))
            })
    }

    /// Number of planned (mission, good) pairs.
    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing needs shipping.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes a [`DeliveryPlan`] over one graph.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryPlanner<'g> {
    graph: &'g LogisticsGraph,
}

impl<'g> DeliveryPlanner<'g> {
    /// Plan over `graph`.
    pub fn new(graph: &'g LogisticsGraph) -> Self {
        Self { graph }
    }

    /// Choose a route for every outstanding requirement.
    pub fn plan(&self) -> Result<DeliveryPlan, PlanningFailure> {
        let mut plan = DeliveryPlan::default();

        for &mission_id in self.graph.missions() {
            let Ok(mission) = self.graph.mission(mission_id) else {
                continue;
            };
            for good in mission.requirements().keys() {
                let route = self
                    .best_route(good, mission_id)
                    .ok_or_else(|| PlanningFailure {
                        mission: mission.name().clone(),
                    })?;
                plan.routes
                    .entry(mission_id)
                    .or_default()
                    .insert(good.clone(), route);
            }
        }

        Ok(plan)
    }

    /// Lightest route to `mission` from any supplier of `good`; the earlier
    /// supplier wins ties.
    pub fn best_route(&self, good: &Good, mission: NodeId) -> Option<Route> {
        let finder = PathFinder::new(self.graph);
        let mut best: Option<Route> = None;

        for &supplier_id in self.graph.suppliers() {
            let provides = self
                .graph
                .supplier(supplier_id)
                .map(|s| s.provides(good))
                .unwrap_or(false);
            if !provides {
                continue;
            }
            match finder.shortest_path(supplier_id, mission) {
                Ok(route) => {
                    if best
                        .as_ref()
                        .map_or(true, |b| route.total_weight() < b.total_weight())
                    {
                        best = Some(route);
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        supplier = %supplier_id,
                        mission = %mission,
                        good = %good,
                        error = %e,
                        "supplier cannot reach mission"
                    );
                }
            }
        }

        best
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use sarlog_graph::{Hub, Mission, Supplier};

    fn rope() -> Good {
        Good::from("Rope")
    }

    #[test]
    fn empty_graph_plans_nothing() {
        let graph = LogisticsGraph::new();
        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn satisfied_missions_need_no_route() {
        let mut graph = LogisticsGraph::new();
        graph.add_mission(Mission::new("mission1")).unwrap();
        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn nearest_supplier_is_chosen() {
        let mut graph = LogisticsGraph::new();
        let far = graph.add_supplier(Supplier::new("far")).unwrap();
        let near = graph.add_supplier(Supplier::new("near")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        graph.supplier_mut(far).unwrap().add_provided("Rope");
        graph.supplier_mut(near).unwrap().add_provided("Rope");
        graph.mission_mut(m).unwrap().add_required("Rope", 5);
        graph.connect(far, m, 9).unwrap();
        graph.connect(near, m, 3).unwrap();

        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert_eq!(plan.route(m, &rope()).unwrap().nodes(), &[near, m]);
    }

    #[test]
    fn equal_suppliers_prefer_the_earlier_one() {
        let mut graph = LogisticsGraph::new();
        let first = graph.add_supplier(Supplier::new("first")).unwrap();
        let second = graph.add_supplier(Supplier::new("second")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        for s in [first, second] {
            graph.supplier_mut(s).unwrap().add_provided("Rope");
            graph.connect(s, m, 4).unwrap();
        }
        graph.mission_mut(m).unwrap().add_required("Rope", 5);

        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert_eq!(plan.route(m, &rope()).unwrap().source(), Some(first));
    }

    #[test]
    fn unreachable_supplier_is_skipped_when_another_reaches() {
        let mut graph = LogisticsGraph::new();
        let stranded = graph.add_supplier(Supplier::new("stranded")).unwrap();
        let linked = graph.add_supplier(Supplier::new("linked")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        graph.supplier_mut(stranded).unwrap().add_provided("Rope");
        graph.supplier_mut(linked).unwrap().add_provided("Rope");
        graph.connect(linked, m, 1).unwrap();
        graph.mission_mut(m).unwrap().add_required("Rope", 1);

        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert_eq!(plan.route(m, &rope()).unwrap().source(), Some(linked));
    }

    #[test]
    fn no_provider_fails_planning() {
        let mut graph = LogisticsGraph::new();
        let s = graph.add_supplier(Supplier::new("supply1")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        graph.connect(s, m, 1).unwrap();
        graph.mission_mut(m).unwrap().add_required("Water", 1);

        let failure = DeliveryPlanner::new(&graph).plan().unwrap_err();
        assert_eq!(failure.to_string(), "Unable to find path for mission mission1");
    }

    #[test]
    fn first_failing_mission_aborts_everything() {
        let mut graph = LogisticsGraph::new();
        let s = graph.add_supplier(Supplier::new("supply1")).unwrap();
        let ok = graph.add_mission(Mission::new("reachable")).unwrap();
        let cut = graph.add_mission(Mission::new("cut_off")).unwrap();
        let also_cut = graph.add_mission(Mission::new("also_cut_off")).unwrap();
        graph.supplier_mut(s).unwrap().add_provided("Rope");
        graph.connect(s, ok, 1).unwrap();
        for m in [ok, cut, also_cut] {
            graph.mission_mut(m).unwrap().add_required("Rope", 1);
        }

        let failure = DeliveryPlanner::new(&graph).plan().unwrap_err();
        assert_eq!(failure.mission.as_str(), "cut_off");
    }

    #[test]
    fn routes_through_hubs() {
        let mut graph = LogisticsGraph::new();
        let s = graph.add_supplier(Supplier::new("supply1")).unwrap();
        let h = graph.add_hub(Hub::new("hub1")).unwrap();
        let m = graph.add_mission(Mission::new("mission1")).unwrap();
        graph.supplier_mut(s).unwrap().add_provided("Rope");
        graph.supplier_mut(s).unwrap().add_provided("Water");
        graph.connect_both(s, h, 2).unwrap();
        graph.connect_both(h, m, 2).unwrap();
        graph.mission_mut(m).unwrap().add_required("Rope", 1);
        graph.mission_mut(m).unwrap().add_required("Water", 30);

        let plan = DeliveryPlanner::new(&graph).plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.routes_for(m).map(BTreeMap::len), Some(2));
        let planned: Vec<_> = plan.iter().map(|(_, good, _)| good.as_str()).collect();
        assert_eq!(planned, vec!["Rope", "Water"]);
        for (_, _, route) in plan.iter() {
            assert_eq!(route.nodes(), &[s, h, m]);
        }
    }
}
