//! Identical grids must contract to identical circuits, and identical
//! snapshots must step to identical successors.

mod common;

use common::{init_logging, random_grid};
use std::sync::Arc;
use wired_core::{circuit::Circuit, palette::Palette, snapshot::Snapshot};

#[test]
fn build_twice_yields_identical_circuits() {
    init_logging();
    for seed in 0..20u64 {
        let grid = random_grid(seed, 40, 30, 0.55, Palette::default());
        let a = Circuit::build(&grid);
        let b = Circuit::build(&grid);
        assert_eq!(a, b, "circuits diverged for seed {seed}");
        for (wa, wb) in a.wires().iter().zip(b.wires()) {
            assert_eq!(wa.id(), wb.id());
            assert_eq!(wa.pixels(), wb.pixels());
            assert_eq!(a.neighbours(wa.id()), b.neighbours(wb.id()));
        }
    }
}

#[test]
fn rebuild_of_unchanged_grid_after_render_is_identical() {
    let mut grid = random_grid(0xC0FFEE, 32, 32, 0.6, Palette::default());
    let first = Arc::new(Circuit::build(&grid));
    let mut s = Snapshot::initial(Arc::clone(&first));
    for _ in 0..4 {
        s = s.step();
    }
    s.render(&mut grid).expect("render");
    let second = Circuit::build(&grid);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.wires().iter().zip(second.wires()) {
        assert_eq!(a.pixels(), b.pixels(), "wire {} changed shape", a.id());
        assert_eq!(a.bounds(), b.bounds());
        assert_eq!(first.neighbours(a.id()), second.neighbours(b.id()));
        assert_eq!(s.charge(a.id()).unwrap(), b.seed(), "render did not round-trip charge");
    }
}

#[test]
fn same_start_produces_identical_histories() {
    const TICKS: usize = 50;
    let grid = random_grid(7, 48, 48, 0.5, Palette::default());

    let mut a = Snapshot::initial(Arc::new(Circuit::build(&grid)));
    let mut b = Snapshot::initial(Arc::new(Circuit::build(&grid)));
    for tick in 0..TICKS {
        a = a.step();
        b = b.step();
        assert_eq!(a.state(), b.state(), "histories diverged at tick {tick}");
    }
}
