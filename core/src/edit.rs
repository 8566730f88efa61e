//! Topology edits on the grid.
//!
//! TOGGLE RULE: a toggle flips conductivity and ignores transient charge.
//!   - background            -> baseline color of the requested material
//!   - any conductive color  -> background
//!
//! Every edit invalidates the circuit; callers rebuild afterwards.

use crate::{
    error::SimResult,
    grid::Grid,
    palette::{PixelClass, BACKGROUND},
    types::{Material, Point},
};

/// Outcome of a single toggle, as color indices before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    pub point: Point,
    pub from:  u8,
    pub to:    u8,
}

/// Flip the conductivity of one pixel.
pub fn toggle(grid: &mut Grid, point: Point, material: Material) -> SimResult<Toggled> {
    let from = grid.get(point)?;
    let to = match grid.palette().classify(from)? {
        PixelClass::Background => grid.palette().baseline(material)?,
        PixelClass::Conductive { .. } => BACKGROUND,
    };
    grid.set(point, to)?;
    Ok(Toggled { point, from, to })
}

/// Rewrite every conductive pixel to its material's baseline color.
pub fn clear_charges(grid: &mut Grid) {
    for offset in 0..grid.pixels().len() {
        grid.clear_charge_at(offset);
    }
}
