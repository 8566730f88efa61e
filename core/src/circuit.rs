//! Circuit builder: contracts a pixel grid into wires and their adjacency.
//!
//! RULES:
//!   - A wire is a maximal 4-connected run of pixels of one material.
//!   - Wire ids follow raster discovery order, so identical grids always
//!     produce identical circuits.
//!   - Two wires are adjacent when any of their pixels are 4-neighbours.
//!     Adjacency is symmetric, deduplicated and never includes self.
//!   - A circuit is immutable once built. Any topology edit rebuilds it.

use crate::{
    charge::Charge,
    error::{SimError, SimResult},
    grid::Grid,
    palette::{Palette, PixelClass},
    types::{Material, Point, Rect, WireId},
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    id:       WireId,
    material: Material,
    /// Raster-ordered, never empty.
    pixels:   Vec<Point>,
    bounds:   Rect,
    /// Highest charge drawn on any pixel when the grid was scanned.
    seed:     Charge,
}

impl Wire {
    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn seed(&self) -> Charge {
        self.seed
    }

    /// Row-major mask of `bounds`; true where the wire owns the pixel.
    /// Front ends stamp this in the charge color to redraw a single wire.
    pub fn mask(&self) -> Vec<bool> {
        let w = self.bounds.width() as usize;
        let mut mask = vec![false; w * self.bounds.height() as usize];
        for p in &self.pixels {
            let local = (p.y - self.bounds.min.y) as usize * w + (p.x - self.bounds.min.x) as usize;
            mask[local] = true;
        }
        mask
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    width:     u32,
    height:    u32,
    palette:   Palette,
    wires:     Vec<Wire>,
    /// Sorted neighbour ids per wire.
    adjacency: Vec<Vec<WireId>>,
    /// Owning wire per grid offset.
    labels:    Vec<Option<WireId>>,
}

impl Circuit {
    /// Scan `grid` once and build its circuit. Never fails: a grid with no
    /// conductive pixels yields a circuit with no wires.
    pub fn build(grid: &Grid) -> Self {
        let palette = grid.palette();
        let width = grid.width() as usize;
        let height = grid.height() as usize;
        let classes: Vec<PixelClass> = grid
            .pixels()
            .iter()
            .map(|&index| palette.classify(index).expect("grid holds only palette indices"))
            .collect();

        let mut labels: Vec<Option<WireId>> = vec![None; classes.len()];
        let mut wires: Vec<Wire> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for start in 0..classes.len() {
            let PixelClass::Conductive { material, .. } = classes[start] else {
                continue;
            };
            if labels[start].is_some() {
                continue;
            }

            let id = wires.len();
            let mut offsets = Vec::new();
            let mut seed = Charge::OFF;
            labels[start] = Some(id);
            stack.push(start);

            while let Some(at) = stack.pop() {
                offsets.push(at);
                if let PixelClass::Conductive { charge, .. } = classes[at] {
                    seed = seed.max(charge);
                }
                for next in neighbours(at, width, height) {
                    if labels[next].is_none() && classes[next].material() == Some(material) {
                        labels[next] = Some(id);
                        stack.push(next);
                    }
                }
            }

            offsets.sort_unstable();
            let pixels: Vec<Point> = offsets.iter().map(|&o| grid.point_at(o)).collect();
            let mut bounds = Rect::pixel(pixels[0]);
            for &p in &pixels[1..] {
                bounds.include(p);
            }
            wires.push(Wire { id, material, pixels, bounds, seed });
        }

        let mut edges: Vec<BTreeSet<WireId>> = vec![BTreeSet::new(); wires.len()];
        for at in 0..labels.len() {
            let Some(a) = labels[at] else { continue };
            // Right and down cover every 4-neighbour pair exactly once.
            let x = at % width;
            let right = (x + 1 < width).then_some(at + 1);
            let down = (at + width < labels.len()).then_some(at + width);
            for next in [right, down].into_iter().flatten() {
                if let Some(b) = labels[next] {
                    if a != b {
                        edges[a].insert(b);
                        edges[b].insert(a);
                    }
                }
            }
        }
        let adjacency = edges.into_iter().map(|s| s.into_iter().collect()).collect();

        let circuit = Self::assemble(grid.width(), grid.height(), palette, wires, adjacency, labels);
        log::debug!(
            "circuit built: {}x{} grid, {} wires, {} edges",
            circuit.width,
            circuit.height,
            circuit.wires.len(),
            circuit.edge_count()
        );
        circuit
    }

    /// Final consistency gate. A failure here is a builder defect.
    fn assemble(
        width: u32,
        height: u32,
        palette: Palette,
        wires: Vec<Wire>,
        adjacency: Vec<Vec<WireId>>,
        labels: Vec<Option<WireId>>,
    ) -> Self {
        assert_eq!(wires.len(), adjacency.len(), "adjacency table does not cover every wire");
        for (id, neighbours) in adjacency.iter().enumerate() {
            for &n in neighbours {
                assert!(n < wires.len(), "wire {id} adjacent to missing wire {n}");
                assert!(n != id, "wire {id} adjacent to itself");
            }
        }
        Self { width, height, palette, wires, adjacency, labels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Wires sharing at least one 4-neighbouring pixel with `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a wire of this circuit.
    pub fn neighbours(&self, id: WireId) -> &[WireId] {
        &self.adjacency[id]
    }

    /// Undirected edge count.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// The wire owning `p`, if any. Out-of-bounds points are an error.
    pub fn wire_at(&self, p: Point) -> SimResult<Option<WireId>> {
        if p.x >= self.width || p.y >= self.height {
            return Err(SimError::OutOfRange {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.labels[p.y as usize * self.width as usize + p.x as usize])
    }

    /// Same width, height and palette as `grid`.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height() && self.palette == grid.palette()
    }
}

fn neighbours(at: usize, width: usize, height: usize) -> impl Iterator<Item = usize> {
    let x = at % width;
    let y = at / width;
    let up = (y > 0).then(|| at - width);
    let down = (y + 1 < height).then(|| at + width);
    let left = (x > 0).then(|| at - 1);
    let right = (x + 1 < width).then(|| at + 1);
    [up, down, left, right].into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: &[&str]) -> Circuit {
        Circuit::build(&Grid::from_rows(rows, Palette::default()).unwrap())
    }

    #[test]
    fn empty_grid_has_no_wires() {
        let c = build(&["...", "..."]);
        assert!(c.is_empty());
        assert_eq!(c.edge_count(), 0);
        assert_eq!(c.wire_at(Point::new(1, 1)).unwrap(), None);
    }

    #[test]
    fn same_material_merges_across_four_neighbours() {
        let c = build(&["00.", ".0.", ".00"]);
        assert_eq!(c.len(), 1);
        let wire = &c.wires()[0];
        assert_eq!(wire.pixels().len(), 5);
        assert_eq!(wire.bounds(), Rect { min: Point::new(0, 0), max: Point::new(3, 3) });
    }

    #[test]
    fn diagonal_contact_neither_merges_nor_couples() {
        let c = build(&["0.", ".7"]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.edge_count(), 0);
        let c = build(&["0.", ".0"]);
        assert_eq!(c.len(), 2);
        assert!(c.neighbours(0).is_empty());
    }

    #[test]
    fn different_materials_touching_are_adjacent() {
        let c = build(&["0077", "..7."]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.neighbours(0), &[1]);
        assert_eq!(c.neighbours(1), &[0]);
        assert_eq!(c.edge_count(), 1);
    }

    #[test]
    fn ids_follow_raster_discovery() {
        let c = build(&["..7", "0.7", "0.."]);
        assert_eq!(c.wire_at(Point::new(2, 0)).unwrap(), Some(0));
        assert_eq!(c.wire_at(Point::new(0, 1)).unwrap(), Some(1));
        assert_eq!(c.wires()[1].material(), 0);
    }

    #[test]
    fn seed_is_highest_drawn_charge() {
        let c = build(&["0300", "...."]);
        assert_eq!(c.wires()[0].seed().level(), 3);
        let c = build(&["000."]);
        assert_eq!(c.wires()[0].seed(), Charge::OFF);
    }

    #[test]
    fn mask_marks_owned_pixels() {
        let c = build(&[".0", "00"]);
        assert_eq!(c.wires()[0].mask(), vec![false, true, true, true]);
    }

    #[test]
    #[should_panic]
    fn neighbours_panics_on_unknown_wire() {
        build(&["0"]).neighbours(1);
    }

    #[test]
    fn every_palette_index_classifies_during_build() {
        let rows = ["0123456789abcd"];
        let c = build(&rows);
        // Indices 1-7 are material 0, 8-14 material 1.
        assert_eq!(c.len(), 2);
        assert_eq!(c.wires()[0].pixels().len(), 7);
        assert_eq!(c.wires()[1].material(), 1);
    }

    #[test]
    fn wire_at_rejects_out_of_range() {
        let c = build(&["0"]);
        assert!(c.wire_at(Point::new(1, 0)).is_err());
    }
}
