//! Immutable simulation snapshots and the synchronous stepper.
//!
//! A snapshot pairs a shared circuit with one charge per wire. `step()`
//! reads only the previous snapshot, so the result never depends on the
//! order wires are visited in. Superseded snapshots are simply dropped.

use crate::{
    charge::Charge,
    circuit::Circuit,
    error::{SimError, SimResult},
    grid::Grid,
    types::{Tick, WireId},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Snapshot {
    circuit: Arc<Circuit>,
    tick:    Tick,
    charges: Vec<Charge>,
}

impl Snapshot {
    /// Tick-0 snapshot seeded from the charges drawn into the grid.
    pub fn initial(circuit: Arc<Circuit>) -> Self {
        let charges = circuit.wires().iter().map(|w| w.seed()).collect();
        Self { circuit, tick: 0, charges }
    }

    /// Tick-0 snapshot with every wire OFF.
    pub fn blank(circuit: Arc<Circuit>) -> Self {
        let charges = vec![Charge::OFF; circuit.len()];
        Self { circuit, tick: 0, charges }
    }

    pub fn circuit(&self) -> &Arc<Circuit> {
        &self.circuit
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn charge(&self, id: WireId) -> SimResult<Charge> {
        self.charges.get(id).copied().ok_or(SimError::UnknownWire { id })
    }

    /// Number of wires not OFF.
    pub fn charged_count(&self) -> usize {
        self.charges.iter().filter(|c| !c.is_off()).count()
    }

    /// The charge wire `id` will carry after one step.
    ///
    /// A neighbour at full charge drives the wire to full charge; otherwise
    /// the wire decays one level, resting at OFF.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a wire of this snapshot's circuit.
    pub fn next_charge(&self, id: WireId) -> Charge {
        let full = self.circuit.palette().full();
        let driven = self
            .circuit
            .neighbours(id)
            .iter()
            .any(|&n| self.charges[n] == full);
        if driven {
            full
        } else {
            self.charges[id].decayed()
        }
    }

    /// Advance every wire one tick.
    pub fn step(&self) -> Snapshot {
        let charges = (0..self.charges.len()).map(|id| self.next_charge(id)).collect();
        Snapshot {
            circuit: Arc::clone(&self.circuit),
            tick:    self.tick + 1,
            charges,
        }
    }

    /// A copy of this snapshot with wire `id` forced to `charge`.
    pub fn with_charge(&self, id: WireId, charge: Charge) -> SimResult<Snapshot> {
        if id >= self.charges.len() {
            return Err(SimError::UnknownWire { id });
        }
        let max = self.circuit.palette().max_charge();
        if charge.level() > max {
            return Err(SimError::ChargeOutOfRange { charge: charge.level(), max });
        }
        let mut charges = self.charges.clone();
        charges[id] = charge;
        Ok(Snapshot {
            circuit: Arc::clone(&self.circuit),
            tick: self.tick,
            charges,
        })
    }

    /// Wires whose charge differs from `previous`. Both snapshots must share
    /// one circuit.
    pub fn changed_wires(&self, previous: &Snapshot) -> Vec<WireId> {
        assert!(
            Arc::ptr_eq(&self.circuit, &previous.circuit),
            "diffing snapshots of different circuits"
        );
        self.charges
            .iter()
            .zip(&previous.charges)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(id, _)| id)
            .collect()
    }

    /// Paint every wire's charge color into `grid`.
    pub fn render(&self, grid: &mut Grid) -> SimResult<()> {
        self.render_wires(grid, 0..self.charges.len())
    }

    /// Paint only the listed wires. Every id is checked before the first
    /// write, so a failed render leaves `grid` untouched.
    pub fn render_wires<I>(&self, grid: &mut Grid, ids: I) -> SimResult<()>
    where
        I: IntoIterator<Item = WireId>,
    {
        if !self.circuit.fits(grid) {
            return Err(SimError::GridMismatch {
                reason: format!(
                    "circuit is {}x{} (depth {}), grid is {}x{} (depth {})",
                    self.circuit.width(),
                    self.circuit.height(),
                    self.circuit.palette().depth(),
                    grid.width(),
                    grid.height(),
                    grid.palette().depth()
                ),
            });
        }
        let wires = ids
            .into_iter()
            .map(|id| self.circuit.wire(id).ok_or(SimError::UnknownWire { id }))
            .collect::<SimResult<Vec<_>>>()?;
        let palette = self.circuit.palette();
        for wire in wires {
            let index = palette.index_of(wire.material(), self.charges[wire.id()]);
            for &p in wire.pixels() {
                grid.write(grid.offset(p)?, index);
            }
        }
        Ok(())
    }

    /// Serializable view of this snapshot.
    pub fn state(&self) -> SnapshotState {
        SnapshotState {
            tick:    self.tick,
            charges: self.charges.clone(),
        }
    }
}

/// Charges by wire id at a given tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotState {
    pub tick:    Tick,
    pub charges: Vec<Charge>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn circuit(rows: &[&str], max_charge: u8) -> Arc<Circuit> {
        let palette = Palette::with_max_charge(max_charge, 2).unwrap();
        Arc::new(Circuit::build(&Grid::from_rows(rows, palette).unwrap()))
    }

    #[test]
    fn isolated_wire_decays_to_off_and_stays() {
        let c = circuit(&["000"], 3);
        let mut s = Snapshot::blank(c).with_charge(0, Charge::new(3, 3).unwrap()).unwrap();
        let mut seen = vec![s.charge(0).unwrap().level()];
        for _ in 0..5 {
            s = s.step();
            seen.push(s.charge(0).unwrap().level());
        }
        assert_eq!(seen, vec![3, 2, 1, 0, 0, 0]);
        assert_eq!(s.tick(), 5);
    }

    #[test]
    fn full_neighbour_drives_next_tick() {
        // '0' is material 0 baseline, '4' material 1 baseline at max 3.
        let c = circuit(&["04"], 3);
        let s = Snapshot::blank(c).with_charge(0, Charge::new(3, 3).unwrap()).unwrap();
        let next = s.step();
        assert_eq!(next.charge(1).unwrap().level(), 3);
        assert_eq!(next.charge(0).unwrap().level(), 2);
        assert_eq!(next.changed_wires(&s), vec![0, 1]);
    }

    #[test]
    fn partial_charge_does_not_drive() {
        let c = circuit(&["04"], 3);
        let s = Snapshot::blank(c).with_charge(0, Charge::new(2, 3).unwrap()).unwrap();
        assert_eq!(s.step().charge(1).unwrap(), Charge::OFF);
    }

    #[test]
    fn with_charge_validates_inputs() {
        let s = Snapshot::blank(circuit(&["0"], 3));
        assert!(matches!(s.with_charge(1, Charge::OFF), Err(SimError::UnknownWire { id: 1 })));
        let too_high = Charge::new(5, 6).unwrap();
        assert!(matches!(
            s.with_charge(0, too_high),
            Err(SimError::ChargeOutOfRange { charge: 5, max: 3 })
        ));
    }

    #[test]
    fn render_writes_charge_ramp() {
        let palette = Palette::with_max_charge(3, 2).unwrap();
        let mut grid = Grid::from_rows(&["0.4"], palette).unwrap();
        let c = Arc::new(Circuit::build(&grid));
        let s = Snapshot::blank(c).with_charge(1, Charge::new(2, 3).unwrap()).unwrap();
        s.render(&mut grid).unwrap();
        assert_eq!(grid.pixels(), &[1, 0, 7]);
    }

    #[test]
    fn render_with_unknown_wire_leaves_grid_untouched() {
        let mut grid = Grid::from_rows(&["0.0"], Palette::default()).unwrap();
        let c = Arc::new(Circuit::build(&grid));
        let s = Snapshot::blank(c).with_charge(0, Charge::new(6, 6).unwrap()).unwrap();
        let before = grid.clone();
        assert!(matches!(
            s.render_wires(&mut grid, [0, 99]),
            Err(SimError::UnknownWire { id: 99 })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    #[should_panic]
    fn next_charge_panics_on_unknown_wire() {
        let s = Snapshot::blank(circuit(&["0"], 3));
        s.next_charge(5);
    }

    #[test]
    fn render_rejects_foreign_grid() {
        let s = Snapshot::blank(circuit(&["0"], 3));
        let mut other = Grid::new(2, 1, Palette::with_max_charge(3, 2).unwrap()).unwrap();
        assert!(matches!(s.render(&mut other), Err(SimError::GridMismatch { .. })));
    }
}
