//! # Simulation Configuration
//!
//! Tunables for the transit simulator. The defaults reproduce the scripted
//! scenario: batches of ten units and a catastrophic loss of everything in
//! flight at tick 10.

use serde::{Deserialize, Serialize};

use crate::{Quantity, Tick};

/// Tick at which the scripted disruption destroys all in-flight shipments.
pub const DEFAULT_DISRUPTION_TICK: Tick = Tick(10);

/// Units dispatched per planned shipment.
pub const DEFAULT_BATCH_SIZE: Quantity = 10;

/// Tick reports an agent retains before discarding the oldest.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Simulation tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// When set, every shipment in transit at the start of this tick is lost.
    pub disruption_tick: Option<Tick>,
    /// Quantity of each shipment originated by the planner.
    pub batch_size: Quantity,
    /// Most recent tick reports kept by an agent. Zero keeps none.
    pub history_limit: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            disruption_tick: Some(DEFAULT_DISRUPTION_TICK),
            batch_size: DEFAULT_BATCH_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SimulationConfig {
    /// Whether the scripted disruption fires at `tick`.
    pub fn is_disruption(&self, tick: Tick) -> bool {
        self.disruption_tick == Some(tick)
    }
}
