//! # sarlog-transit: Planning and Transit Simulation
//!
//! Moves relief goods through the network in discrete ticks.
//!
//! - **Planner** (`planner.rs`): for each mission and each outstanding
//!   good, the lightest route from any supplier of that good. All-or-nothing
//!   per pass.
//!
//! - **Simulator** (`simulator.rs`): per-tick hand-off, delivery and the
//!   scripted disruption, followed by batch dispatch of the planner's
//!   routes.
//!
//! - **Report** (`report.rs`): a serializable record of every tick.
//!
//! - **Agent** (`agent.rs`): the call surface handed to the request layer.
//!
//! ## Crate Policy
//!
//! - Single writer: one agent owns its graph and clock; a tick runs to
//!   completion before returning.
//! - Planning failure is a returned value, never a panic or an `Err` from
//!   the tick itself.

pub mod agent;
pub mod planner;
pub mod report;
pub mod simulator;

pub use agent::{LogisticsAgent, MissionRequest};
pub use planner::{DeliveryPlan, DeliveryPlanner};
pub use report::{Dispatch, ShipmentOutcome, TickReport};
pub use simulator::TransitSimulator;
