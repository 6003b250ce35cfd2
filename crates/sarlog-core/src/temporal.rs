//! # Simulation Time
//!
//! A discrete, monotonically increasing tick counter. One [`Tick`] value is
//! owned by each simulation instance; it advances by exactly one per tick
//! call and never goes backwards.

use serde::{Deserialize, Serialize};

use crate::Weight;

/// One discrete unit of simulation time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    /// The first tick of every simulation.
    pub const ZERO: Tick = Tick(0);

    /// The raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// The tick following this one.
    pub fn next(self) -> Tick {
        Tick(self.0.saturating_add(1))
    }

    /// The tick at which a leg departing now over an edge of `weight`
    /// is scheduled to arrive.
    pub fn after(self, weight: Weight) -> Tick {
        Tick(self.0.saturating_add(weight))
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_advances_by_one() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick(41).next().value(), 42);
    }

    #[test]
    fn after_adds_edge_weight() {
        assert_eq!(Tick(3).after(2), Tick(5));
        assert_eq!(Tick(3).after(0), Tick(3));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(Tick(u64::MAX).next(), Tick(u64::MAX));
        assert_eq!(Tick(u64::MAX - 1).after(5), Tick(u64::MAX));
    }
}
