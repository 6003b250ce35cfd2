//! # sarlog-core: Foundational Types for Relief Logistics
//!
//! Every other crate in the workspace depends on `sarlog-core`; it depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `NodeId`, `NodeName` and `Good`
//!    are distinct types. A node handle cannot be confused with a node name,
//!    and neither can be confused with a good label.
//!
//! 2. **Time is explicit state.** [`Tick`] is a plain counter owned by one
//!    simulation instance and threaded through every tick call. There is no
//!    process-global clock.
//!
//! 3. **Expected absence is a value.** Missing edges, inventory entries and
//!    nodes are reported through [`NotFoundError`] rather than panics, since
//!    callers probe for absence routinely.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sarlog-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod identity;
pub mod temporal;

pub use config::SimulationConfig;
pub use error::{LogisticsError, NotFoundError, PlanningFailure};
pub use identity::{Good, NodeId, NodeName};
pub use temporal::Tick;

/// A non-negative count of units of one good.
pub type Quantity = u64;

/// Transit time, in ticks, to traverse one directed edge.
pub type Weight = u64;
