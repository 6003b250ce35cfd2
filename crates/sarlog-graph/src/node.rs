//! # Node Variants
//!
//! The network has exactly three kinds of vertex:
//!
//! - [`Supplier`]: an unconstrained source of the goods it lists.
//! - [`Hub`]: a transfer point with finite on-hand stock.
//! - [`Mission`]: a demand site tracking outstanding requirements and
//!   goods actually received.
//!
//! All three share the [`Vertex`] capability (name plus a weighted,
//! directed adjacency map). Variant-specific operations live on the
//! concrete types and are reached through the closed [`Node`] enum.
//!
//! Edge weights are asymmetric: `a → b` and `b → a` are independent entries.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use sarlog_core::{Good, LogisticsError, NodeId, NodeName, NotFoundError, Quantity, Weight};

// ---------------------------------------------------------------------------
// Vertex capability
// ---------------------------------------------------------------------------

/// Capabilities shared by every node variant.
pub trait Vertex {
    /// Name of the node, unique within its graph.
    fn name(&self) -> &NodeName;

    /// Outbound edges: neighbor → transit time.
    fn connections(&self) -> &BTreeMap<NodeId, Weight>;

    /// Mutable access to the outbound edges.
    fn connections_mut(&mut self) -> &mut BTreeMap<NodeId, Weight>;

    /// Insert or overwrite the directed edge to `neighbor`.
    fn connect(&mut self, neighbor: NodeId, weight: Weight) {
        self.connections_mut().insert(neighbor, weight);
    }

    /// Remove the directed edge to `neighbor`, returning its weight.
    fn disconnect(&mut self, neighbor: NodeId) -> Result<Weight, LogisticsError> {
        match self.connections_mut().remove(&neighbor) {
            Some(weight) => Ok(weight),
            None => Err(NotFoundError::Edge {
                from: self.name().clone(),
                to: neighbor,
            }
            .into()),
        }
    }

    /// Weight of the directed edge to `neighbor`.
    fn weight_to(&self, neighbor: NodeId) -> Result<Weight, LogisticsError> {
        self.connections().get(&neighbor).copied().ok_or_else(|| {
            NotFoundError::Edge {
                from: self.name().clone(),
                to: neighbor,
            }
            .into()
        })
    }
}

macro_rules! impl_vertex {
    ($($ty:ty),+) => {
        $(
            impl Vertex for $ty {
                fn name(&self) -> &NodeName {
                    &self.name
                }

                fn connections(&self) -> &BTreeMap<NodeId, Weight> {
                    &self.connections
                }

                fn connections_mut(&mut self) -> &mut BTreeMap<NodeId, Weight> {
                    &mut self.connections
                }
            }
        )+
    };
}

impl_vertex!(Supplier, Hub, Mission);

// ---------------------------------------------------------------------------
// Supplier
// ---------------------------------------------------------------------------

/// A source that can provide any quantity of the goods it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    name: NodeName,
    connections: BTreeMap<NodeId, Weight>,
    provides: BTreeSet<Good>,
}

impl Supplier {
    /// Create a supplier with no edges and no goods.
    pub fn new(name: impl Into<NodeName>) -> Self {
        Self {
            name: name.into(),
            connections: BTreeMap::new(),
            provides: BTreeSet::new(),
        }
    }

    /// Goods this supplier offers.
    pub fn provided_goods(&self) -> &BTreeSet<Good> {
        &self.provides
    }

    /// Whether the supplier offers `good`.
    pub fn provides(&self, good: &Good) -> bool {
        self.provides.contains(good)
    }

    /// Start offering `good`.
    pub fn add_provided(&mut self, good: impl Into<Good>) {
        self.provides.insert(good.into());
    }

    /// Stop offering `good`.
    pub fn remove_provided(&mut self, good: &Good) -> Result<(), LogisticsError> {
        if self.provides.remove(good) {
            Ok(())
        } else {
            Err(NotFoundError::ProvidedGood {
                node: self.name.clone(),
                good: good.clone(),
            }
            .into())
        }
    }

    /// Suppliers hold no modelled stock: the full quantity always ships.
    pub fn ship_out(&mut self, _good: &Good, quantity: Quantity) -> Quantity {
        quantity
    }
}

// ---------------------------------------------------------------------------
// Hub
// ---------------------------------------------------------------------------

/// A transfer point holding finite stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    name: NodeName,
    connections: BTreeMap<NodeId, Weight>,
    stock: BTreeMap<Good, Quantity>,
}

impl Hub {
    /// Create an empty hub.
    pub fn new(name: impl Into<NodeName>) -> Self {
        Self {
            name: name.into(),
            connections: BTreeMap::new(),
            stock: BTreeMap::new(),
        }
    }

    /// On-hand stock per good.
    pub fn stock(&self) -> &BTreeMap<Good, Quantity> {
        &self.stock
    }

    /// On-hand quantity of `good`, zero if never received.
    pub fn on_hand(&self, good: &Good) -> Quantity {
        self.stock.get(good).copied().unwrap_or(0)
    }

    /// Add `quantity` of `good` to stock.
    pub fn receive(&mut self, good: impl Into<Good>, quantity: Quantity) {
        let entry = self.stock.entry(good.into()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Ship up to `quantity` of `good`, clipped to what is on hand.
    ///
    /// Returns the quantity actually shipped. Fails if the hub has never
    /// received the good.
    pub fn ship_out(
        &mut self,
        good: &Good,
        quantity: Quantity,
    ) -> Result<Quantity, LogisticsError> {
        let on_hand = self
            .stock
            .get_mut(good)
            .ok_or_else(|| NotFoundError::Inventory {
                node: self.name.clone(),
                good: good.clone(),
            })?;
        let shipped = quantity.min(*on_hand);
        *on_hand -= shipped;
        Ok(shipped)
    }
}

// ---------------------------------------------------------------------------
// Mission
// ---------------------------------------------------------------------------

/// A demand site.
///
/// `requires` holds only strictly positive outstanding quantities; an entry
/// disappears once it is fully committed. `has` is the ledger of goods that
/// actually arrived and is independent of `requires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    name: NodeName,
    connections: BTreeMap<NodeId, Weight>,
    requires: BTreeMap<Good, Quantity>,
    has: BTreeMap<Good, Quantity>,
}

impl Mission {
    /// Create a mission with no requirements.
    pub fn new(name: impl Into<NodeName>) -> Self {
        Self {
            name: name.into(),
            connections: BTreeMap::new(),
            requires: BTreeMap::new(),
            has: BTreeMap::new(),
        }
    }

    /// Outstanding requirements.
    pub fn requirements(&self) -> &BTreeMap<Good, Quantity> {
        &self.requires
    }

    /// Outstanding quantity of `good`, zero if not required.
    pub fn required(&self, good: &Good) -> Quantity {
        self.requires.get(good).copied().unwrap_or(0)
    }

    /// Goods received so far.
    pub fn received(&self) -> &BTreeMap<Good, Quantity> {
        &self.has
    }

    /// Whether nothing is outstanding.
    pub fn is_satisfied(&self) -> bool {
        self.requires.is_empty()
    }

    /// Set (or overwrite) the requirement for `good`. Zero clears it.
    pub fn add_required(&mut self, good: impl Into<Good>, quantity: Quantity) {
        let good = good.into();
        if quantity == 0 {
            self.requires.remove(&good);
        } else {
            self.requires.insert(good, quantity);
        }
    }

    /// Drop the requirement for `good` entirely.
    pub fn remove_required(&mut self, good: &Good) -> Result<Quantity, LogisticsError> {
        self.requires.remove(good).ok_or_else(|| {
            NotFoundError::Requirement {
                node: self.name.clone(),
                good: good.clone(),
            }
            .into()
        })
    }

    /// Count `quantity` of `good` as already en route.
    ///
    /// Over-commitment removes the entry; the excess is not carried as a
    /// surplus. Goods that are not required are ignored.
    pub fn receive_in_transit_commitment(&mut self, good: &Good, quantity: Quantity) {
        if let Some(outstanding) = self.requires.get_mut(good) {
            if quantity >= *outstanding {
                self.requires.remove(good);
            } else {
                *outstanding -= quantity;
            }
        }
    }

    /// Put `quantity` of `good` back on the outstanding requirement after a
    /// committed shipment was lost.
    pub fn restore_requirement(&mut self, good: impl Into<Good>, quantity: Quantity) {
        if quantity == 0 {
            return;
        }
        let entry = self.requires.entry(good.into()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Record the arrival of `quantity` of `good`.
    pub fn receive_goods(&mut self, good: impl Into<Good>, quantity: Quantity) {
        let entry = self.has.entry(good.into()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// See [`Supplier`].
    Supplier,
    /// See [`Hub`].
    Hub,
    /// See [`Mission`].
    Mission,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Supplier => "supplier",
            Self::Hub => "hub",
            Self::Mission => "mission",
        };
        f.write_str(s)
    }
}

/// Any vertex of the logistics graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// A supplier.
    Supplier(Supplier),
    /// A hub.
    Hub(Hub),
    /// A mission.
    Mission(Mission),
}

impl Node {
    /// Which variant this is.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Supplier(_) => NodeKind::Supplier,
            Self::Hub(_) => NodeKind::Hub,
            Self::Mission(_) => NodeKind::Mission,
        }
    }

    /// The supplier, if this node is one.
    pub fn as_supplier(&self) -> Option<&Supplier> {
        match self {
            Self::Supplier(s) => Some(s),
            _ => None,
        }
    }

    /// The hub, if this node is one.
    pub fn as_hub(&self) -> Option<&Hub> {
        match self {
            Self::Hub(h) => Some(h),
            _ => None,
        }
    }

    /// The mission, if this node is one.
    pub fn as_mission(&self) -> Option<&Mission> {
        match self {
            Self::Mission(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable supplier access.
    pub fn as_supplier_mut(&mut self) -> Option<&mut Supplier> {
        match self {
            Self::Supplier(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable hub access.
    pub fn as_hub_mut(&mut self) -> Option<&mut Hub> {
        match self {
            Self::Hub(h) => Some(h),
            _ => None,
        }
    }

    /// Mutable mission access.
    pub fn as_mission_mut(&mut self) -> Option<&mut Mission> {
        match self {
            Self::Mission(m) => Some(m),
            _ => None,
        }
    }

    /// Release `quantity` of `good` for shipment from this node.
    ///
    /// Suppliers always release the full amount; hubs release what they
    /// have on hand; missions cannot ship.
    pub fn ship_out(
        &mut self,
        good: &Good,
        quantity: Quantity,
    ) -> Result<Quantity, LogisticsError> {
        match self {
            Self::Supplier(s) => Ok(s.ship_out(good, quantity)),
            Self::Hub(h) => h.ship_out(good, quantity),
            Self::Mission(m) => Err(LogisticsError::NotShippable {
                node: m.name.clone(),
            }),
        }
    }

    /// Accept goods at the end of a route.
    ///
    /// Missions book them as received, hubs add them to stock, and
    /// suppliers absorb them (their stock is not modelled).
    pub fn accept(&mut self, good: &Good, quantity: Quantity) {
        match self {
            Self::Supplier(_) => {}
            Self::Hub(h) => h.receive(good.clone(), quantity),
            Self::Mission(m) => m.receive_goods(good.clone(), quantity),
        }
    }
}

impl Vertex for Node {
    fn name(&self) -> &NodeName {
        match self {
            Self::Supplier(s) => s.name(),
            Self::Hub(h) => h.name(),
            Self::Mission(m) => m.name(),
        }
    }

    fn connections(&self) -> &BTreeMap<NodeId, Weight> {
        match self {
            Self::Supplier(s) => s.connections(),
            Self::Hub(h) => h.connections(),
            Self::Mission(m) => m.connections(),
        }
    }

    fn connections_mut(&mut self) -> &mut BTreeMap<NodeId, Weight> {
        match self {
            Self::Supplier(s) => s.connections_mut(),
            Self::Hub(h) => h.connections_mut(),
            Self::Mission(m) => m.connections_mut(),
        }
    }
}

impl From<Supplier> for Node {
    fn from(s: Supplier) -> Self {
        Self::Supplier(s)
    }
}

impl From<Hub> for Node {
    fn from(h: Hub) -> Self {
        Self::Hub(h)
    }
}

impl From<Mission> for Node {
    fn from(m: Mission) -> Self {
        Self::Mission(m)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rope() -> Good {
        Good::from("Rope")
    }

    #[test]
    fn connect_overwrites_existing_edge() {
        let mut hub = Hub::new("hub1");
        hub.connect(NodeId(4), 3);
        hub.connect(NodeId(4), 7);
        assert_eq!(hub.weight_to(NodeId(4)), Ok(7));
        assert_eq!(hub.connections().len(), 1);
    }

    #[test]
    fn disconnect_missing_edge_is_not_found() {
        let mut supplier = Supplier::new("supply1");
        let err = supplier.disconnect(NodeId(1)).unwrap_err();
        assert_eq!(
            err,
            LogisticsError::NotFound(NotFoundError::Edge {
                from: NodeName::from("supply1"),
                to: NodeId(1),
            })
        );
    }

    #[test]
    fn disconnect_returns_weight() {
        let mut mission = Mission::new("mission1");
        mission.connect(NodeId(0), 2);
        assert_eq!(mission.disconnect(NodeId(0)), Ok(2));
        assert!(mission.connections().is_empty());
    }

    #[test]
    fn supplier_goods_membership() {
        let mut supplier = Supplier::new("supply1");
        supplier.add_provided("Rope");
        supplier.add_provided("Rope");
        assert!(supplier.provides(&rope()));
        assert_eq!(supplier.provided_goods().len(), 1);
        assert!(supplier.remove_provided(&rope()).is_ok());
        assert!(matches!(
            supplier.remove_provided(&rope()),
            Err(LogisticsError::NotFound(NotFoundError::ProvidedGood { .. }))
        ));
    }

    #[test]
    fn supplier_ships_unconstrained() {
        let mut supplier = Supplier::new("supply1");
        assert_eq!(supplier.ship_out(&rope(), 1_000), 1_000);
    }

    #[test]
    fn hub_ship_out_clips_to_stock() {
        let mut hub = Hub::new("hub1");
        hub.receive("Rope", 4);
        assert_eq!(hub.ship_out(&rope(), 10), Ok(4));
        assert_eq!(hub.on_hand(&rope()), 0);
        // The entry stays, so a second request ships nothing rather than failing.
        assert_eq!(hub.ship_out(&rope(), 10), Ok(0));
    }

    #[test]
    fn hub_ship_out_partial() {
        let mut hub = Hub::new("hub1");
        hub.receive("Rope", 15);
        hub.receive("Rope", 5);
        assert_eq!(hub.ship_out(&rope(), 12), Ok(12));
        assert_eq!(hub.on_hand(&rope()), 8);
    }

    #[test]
    fn hub_ship_out_never_received_is_not_found() {
        let mut hub = Hub::new("hub1");
        assert!(matches!(
            hub.ship_out(&rope(), 1),
            Err(LogisticsError::NotFound(NotFoundError::Inventory { .. }))
        ));
    }

    #[test]
    fn mission_requirement_overwrites() {
        let mut mission = Mission::new("mission1");
        mission.add_required("Rope", 5);
        mission.add_required("Rope", 2);
        assert_eq!(mission.required(&rope()), 2);
        mission.add_required("Rope", 0);
        assert!(mission.is_satisfied());
    }

    #[test]
    fn commitment_decrements_and_removes() {
        let mut mission = Mission::new("mission1");
        mission.add_required("Rope", 25);
        mission.receive_in_transit_commitment(&rope(), 10);
        assert_eq!(mission.required(&rope()), 15);
        mission.receive_in_transit_commitment(&rope(), 10);
        assert_eq!(mission.required(&rope()), 5);
        mission.receive_in_transit_commitment(&rope(), 10);
        assert!(mission.requirements().is_empty());
    }

    #[test]
    fn commitment_exactly_matching_removes_entry() {
        let mut mission = Mission::new("mission1");
        mission.add_required("Rope", 10);
        mission.receive_in_transit_commitment(&rope(), 10);
        assert!(!mission.requirements().contains_key(&rope()));
    }

    #[test]
    fn commitment_for_unrequired_good_is_ignored() {
        let mut mission = Mission::new("mission1");
        mission.receive_in_transit_commitment(&rope(), 10);
        assert!(mission.requirements().is_empty());
    }

    #[test]
    fn receive_goods_is_independent_of_requirements() {
        let mut mission = Mission::new("mission1");
        mission.add_required("Rope", 1);
        mission.receive_goods("Rope", 10);
        mission.receive_goods("Rope", 10);
        assert_eq!(mission.received().get(&rope()), Some(&20));
        assert_eq!(mission.required(&rope()), 1);
    }

    #[test]
    fn restore_requirement_adds_back() {
        let mut mission = Mission::new("mission1");
        mission.restore_requirement("Rope", 10);
        assert_eq!(mission.required(&rope()), 10);
        mission.restore_requirement("Rope", 3);
        assert_eq!(mission.required(&rope()), 13);
    }

    #[test]
    fn remove_required_missing_is_not_found() {
        let mut mission = Mission::new("mission1");
        assert!(mission.remove_required(&rope()).is_err());
        mission.add_required("Rope", 3);
        assert_eq!(mission.remove_required(&rope()), Ok(3));
    }

    #[test]
    fn node_dispatches_by_variant() {
        let mut node = Node::from(Mission::new("mission1"));
        assert_eq!(node.kind(), NodeKind::Mission);
        assert!(matches!(
            node.ship_out(&rope(), 1),
            Err(LogisticsError::NotShippable { .. })
        ));
        node.accept(&rope(), 10);
        assert_eq!(
            node.as_mission().map(|m| m.received().get(&rope()).copied()),
            Some(Some(10))
        );

        let mut hub = Node::from(Hub::new("hub1"));
        hub.accept(&rope(), 6);
        assert_eq!(hub.ship_out(&rope(), 4), Ok(4));
        assert_eq!(hub.as_hub().map(|h| h.on_hand(&rope())), Some(2));
    }

    #[test]
    fn node_vertex_delegates() {
        let mut node = Node::from(Supplier::new("supply1"));
        node.connect(NodeId(1), 3);
        assert_eq!(node.name().as_str(), "supply1");
        assert_eq!(node.weight_to(NodeId(1)), Ok(3));
        assert!(node.weight_to(NodeId(2)).is_err());
    }
}
