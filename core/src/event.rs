//! Events reported by the engine to its front end.
//!
//! The front end uses them to redraw and to log; the simulation itself
//! never reads them back.

use crate::{
    charge::Charge,
    types::{Tick, WireId},
};
use serde::{Deserialize, Serialize};

/// Variants are appended, never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Stepping ───────────────────────────────────
    TickStarted {
        tick: Tick,
    },
    ChargeChanged {
        tick: Tick,
        wire: WireId,
        from: Charge,
        to:   Charge,
    },
    TickCompleted {
        tick:    Tick,
        changed: usize,
    },

    // ── Topology ───────────────────────────────────
    CircuitRebuilt {
        wires: usize,
        edges: usize,
    },
    PixelToggled {
        x:    u32,
        y:    u32,
        from: u8,
        to:   u8,
    },
    CircuitReset {
        wires: usize,
    },

    // ── External seeding ───────────────────────────
    ChargeSeeded {
        wire:   WireId,
        charge: Charge,
    },
}

impl SimEvent {
    /// Stable snake_case name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::TickStarted { .. }    => "tick_started",
            SimEvent::ChargeChanged { .. }  => "charge_changed",
            SimEvent::TickCompleted { .. }  => "tick_completed",
            SimEvent::CircuitRebuilt { .. } => "circuit_rebuilt",
            SimEvent::PixelToggled { .. }   => "pixel_toggled",
            SimEvent::CircuitReset { .. }   => "circuit_reset",
            SimEvent::ChargeSeeded { .. }   => "charge_seeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = SimEvent::ChargeChanged {
            tick: 4,
            wire: 2,
            from: Charge::OFF,
            to:   Charge::new(6, 6).unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"charge_changed","tick":4,"wire":2,"from":0,"to":6}"#);
        assert!(json.contains(event.name()));
    }
}
