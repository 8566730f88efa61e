//! The simulation engine: the front end's single handle on the core.
//!
//! The engine owns the grid on the front end's behalf, the current circuit
//! and the current snapshot. Circuits and snapshots never hold the grid.
//!
//! RULES:
//!   - A tick builds the next snapshot from the current one, redraws only
//!     the wires whose charge changed, then drops the old snapshot.
//!   - Any topology edit rebuilds the circuit and starts every wire OFF.
//!     The clock restarts at tick 0 with the blank snapshot, so the clock
//!     and the snapshot always report the same tick.
//!   - Seeding changes a charge without touching topology.

use crate::{
    charge::Charge,
    circuit::{Circuit, Wire},
    clock::SimClock,
    config::SimConfig,
    edit::{self, Toggled},
    error::{SimError, SimResult},
    event::SimEvent,
    grid::Grid,
    snapshot::Snapshot,
    types::{Material, Point, WireId},
};
use std::sync::Arc;

pub struct SimEngine {
    pub clock: SimClock,
    grid:      Grid,
    current:   Snapshot,
}

impl SimEngine {
    /// Build the circuit for `grid` and seed charges from its colors.
    pub fn new(mut grid: Grid, ticks_per_second: u32) -> SimResult<Self> {
        let circuit = Arc::new(Circuit::build(&grid));
        let current = Snapshot::initial(circuit);
        current.render(&mut grid)?;
        log::info!(
            "engine ready: {}x{} grid, {} wires, {} edges",
            grid.width(),
            grid.height(),
            current.circuit().len(),
            current.circuit().edge_count()
        );
        Ok(Self {
            clock: SimClock::new(ticks_per_second),
            grid,
            current,
        })
    }

    /// An empty grid synthesized from configuration.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        let grid = Grid::new(config.width, config.height, config.palette()?)?;
        Self::new(grid, config.ticks_per_second)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn circuit(&self) -> &Arc<Circuit> {
        self.current.circuit()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn wires(&self) -> &[Wire] {
        self.current.circuit().wires()
    }

    pub fn charge_of(&self, id: WireId) -> SimResult<Charge> {
        self.current.charge(id)
    }

    /// Charge of the wire under `p`, or `None` over background.
    pub fn charge_at(&self, p: Point) -> SimResult<Option<Charge>> {
        match self.circuit().wire_at(p)? {
            Some(id) => Ok(Some(self.current.charge(id)?)),
            None => Ok(None),
        }
    }

    /// One cadence tick. Does nothing while paused.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.clock.paused {
            return Ok(vec![]);
        }
        let tick = self.clock.advance();
        let mut events = vec![SimEvent::TickStarted { tick }];

        let next = self.current.step();
        let changed = next.changed_wires(&self.current);
        for &wire in &changed {
            events.push(SimEvent::ChargeChanged {
                tick,
                wire,
                from: self.current.charges()[wire],
                to:   next.charges()[wire],
            });
        }
        next.render_wires(&mut self.grid, changed.iter().copied())?;
        self.current = next;

        log::debug!(
            "tick={tick} changed={} charged={}",
            changed.len(),
            self.current.charged_count()
        );
        events.push(SimEvent::TickCompleted { tick, changed: changed.len() });
        Ok(events)
    }

    /// Run `n` ticks regardless of pause state, restoring it afterwards.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<Vec<SimEvent>> {
        let was_paused = self.clock.paused;
        self.clock.resume();
        let mut events = Vec::new();
        let result: SimResult<()> = (0..n).try_for_each(|_| {
            events.extend(self.tick()?);
            Ok(())
        });
        self.clock.paused = was_paused;
        result.map(|()| events)
    }

    pub fn pause(&mut self)  { self.clock.pause();  }
    pub fn resume(&mut self) { self.clock.resume(); }

    pub fn toggle_pause(&mut self) -> bool {
        self.clock.toggle_pause()
    }

    /// Toggle one pixel, wiring background as material 0.
    pub fn toggle(&mut self, p: Point) -> SimResult<Vec<SimEvent>> {
        self.toggle_material(p, 0)
    }

    /// Toggle one pixel, wiring background as `material`.
    pub fn toggle_material(&mut self, p: Point, material: Material) -> SimResult<Vec<SimEvent>> {
        let Toggled { point, from, to } = edit::toggle(&mut self.grid, p, material)?;
        let mut events = vec![SimEvent::PixelToggled { x: point.x, y: point.y, from, to }];
        events.push(self.rebuild()?);
        Ok(events)
    }

    /// Force the wire under `p` to `charge`.
    pub fn seed(&mut self, p: Point, charge: u8) -> SimResult<SimEvent> {
        let wire = self
            .circuit()
            .wire_at(p)?
            .ok_or(SimError::NoWireAt { x: p.x, y: p.y })?;
        self.seed_wire(wire, charge)
    }

    /// Force wire `id` to `charge`.
    pub fn seed_wire(&mut self, id: WireId, charge: u8) -> SimResult<SimEvent> {
        let charge = Charge::new(charge, self.circuit().palette().max_charge())?;
        let next = self.current.with_charge(id, charge)?;
        next.render_wires(&mut self.grid, [id])?;
        self.current = next;
        log::debug!("seeded wire {id} at {charge}");
        Ok(SimEvent::ChargeSeeded { wire: id, charge })
    }

    /// Pause, return every wire to its baseline color, and rebuild.
    pub fn reset(&mut self) -> SimResult<Vec<SimEvent>> {
        self.clock.pause();
        let rebuilt = self.rebuild()?;
        log::info!("reset: {} wires back to baseline", self.current.circuit().len());
        Ok(vec![
            SimEvent::CircuitReset { wires: self.current.circuit().len() },
            rebuilt,
        ])
    }

    /// Rebuild after an edit. Charge history is discarded.
    fn rebuild(&mut self) -> SimResult<SimEvent> {
        edit::clear_charges(&mut self.grid);
        let circuit = Arc::new(Circuit::build(&self.grid));
        let blank = Snapshot::blank(circuit);
        blank.render(&mut self.grid)?;
        self.current = blank;
        self.clock.current_tick = self.current.tick();
        let circuit = self.current.circuit();
        log::info!("circuit rebuilt: {} wires, {} edges", circuit.len(), circuit.edge_count());
        Ok(SimEvent::CircuitRebuilt {
            wires: circuit.len(),
            edges: circuit.edge_count(),
        })
    }
}
