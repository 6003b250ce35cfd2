//! # Shipment Lifecycle
//!
//! Every shipment record describes one leg of a route and moves through:
//!
//! ```text
//! Departed ──▶ InFlight ──┬──▶ LegArrived   (more legs remain; a new
//!     │           ▲  │    │                  Departed record takes over)
//!     │           └──┘    ├──▶ Delivered    (route complete)
//!     │                   └──▶ Lost         (disruption)
//!     └──────────────────────▶ LegArrived | Delivered | Lost
//! ```
//!
//! A record that departed and arrives before anyone observed it in flight
//! skips `InFlight`. `LegArrived`, `Delivered` and `Lost` end the record.

use serde::{Deserialize, Serialize};

use sarlog_core::LogisticsError;

/// Phase of one shipment leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentPhase {
    /// Leg just originated; not yet observed by a tick.
    Departed,
    /// Observed by a tick, scheduled arrival not yet reached.
    InFlight,
    /// Leg complete and handed off to the next leg. Terminal.
    LegArrived,
    /// Final leg complete; goods received at the destination. Terminal.
    Delivered,
    /// Destroyed by the disruption. Terminal.
    Lost,
}

impl ShipmentPhase {
    /// Whether the record ends in this phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LegArrived | Self::Delivered | Self::Lost)
    }

    /// Canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Departed => "DEPARTED",
            Self::InFlight => "IN_FLIGHT",
            Self::LegArrived => "LEG_ARRIVED",
            Self::Delivered => "DELIVERED",
            Self::Lost => "LOST",
        }
    }

    /// Whether `self → to` is an allowed transition.
    pub fn can_transition_to(&self, to: ShipmentPhase) -> bool {
        match self {
            Self::Departed | Self::InFlight => to != Self::Departed,
            Self::LegArrived | Self::Delivered | Self::Lost => false,
        }
    }

    /// Validate and perform `self → to`.
    pub fn transition(self, to: ShipmentPhase) -> Result<ShipmentPhase, LogisticsError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(LogisticsError::InvalidTransition {
                from: self.name().to_string(),
                to: to.name().to_string(),
            })
        }
    }
}

impl std::fmt::Display for ShipmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ShipmentPhase; 5] = [
        ShipmentPhase::Departed,
        ShipmentPhase::InFlight,
        ShipmentPhase::LegArrived,
        ShipmentPhase::Delivered,
        ShipmentPhase::Lost,
    ];

    #[test]
    fn terminal_phases_reject_everything() {
        for from in ALL.iter().filter(|p| p.is_terminal()) {
            for to in ALL {
                assert!(from.transition(to).is_err(), "{from} -> {to} accepted");
            }
        }
    }

    #[test]
    fn nothing_returns_to_departed() {
        for from in ALL {
            assert!(!from.can_transition_to(ShipmentPhase::Departed));
        }
    }

    #[test]
    fn in_flight_may_stay_in_flight() {
        assert_eq!(
            ShipmentPhase::InFlight.transition(ShipmentPhase::InFlight),
            Ok(ShipmentPhase::InFlight)
        );
    }

    #[test]
    fn departed_can_finish_directly() {
        for to in [
            ShipmentPhase::LegArrived,
            ShipmentPhase::Delivered,
            ShipmentPhase::Lost,
        ] {
            assert_eq!(ShipmentPhase::Departed.transition(to), Ok(to));
        }
    }

    #[test]
    fn rejected_transition_names_both_phases() {
        let err = ShipmentPhase::Lost
            .transition(ShipmentPhase::InFlight)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid shipment transition from LOST to IN_FLIGHT"
        );
    }

    #[test]
    fn serde_uses_display_names() {
        for phase in ALL {
            let json = serde_json::to_value(phase).unwrap();
            assert_eq!(json, phase.name());
            let back: ShipmentPhase = serde_json::from_value(json).unwrap();
            assert_eq!(back, phase);
        }
    }
}
