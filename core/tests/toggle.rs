//! Toggle edits: background <-> baseline wire, ignoring transient charge.

mod common;

use common::grid;
use wired_core::{
    charge::Charge,
    engine::SimEngine,
    event::SimEvent,
    palette::BACKGROUND,
    types::Point,
};

fn build(rows: &[&str]) -> SimEngine {
    SimEngine::new(grid(rows), 15).expect("engine")
}

#[test]
fn toggling_background_creates_single_pixel_wire() {
    let mut engine = build(&["...", "...", "..."]);
    let original = engine.grid().clone();

    let events = engine.toggle(Point::new(1, 1)).unwrap();
    assert!(matches!(events[0], SimEvent::PixelToggled { x: 1, y: 1, from: 0, to: 1 }));
    assert!(matches!(events[1], SimEvent::CircuitRebuilt { wires: 1, edges: 0 }));
    assert_eq!(engine.wires().len(), 1);
    assert_eq!(engine.wires()[0].pixels(), &[Point::new(1, 1)]);
    assert_eq!(engine.charge_at(Point::new(1, 1)).unwrap(), Some(Charge::OFF));

    engine.toggle(Point::new(1, 1)).unwrap();
    assert_eq!(engine.grid(), &original);
    assert!(engine.wires().is_empty());
}

#[test]
fn charged_pixel_clears_to_background() {
    let mut engine = build(&["000"]);
    engine.seed(Point::new(0, 0), 6).unwrap();
    engine.toggle(Point::new(2, 0)).unwrap();
    assert_eq!(engine.grid().get(Point::new(2, 0)).unwrap(), BACKGROUND);
    // The rest of the wire survives, uncharged.
    assert_eq!(engine.wires().len(), 1);
    assert_eq!(engine.charge_of(0).unwrap(), Charge::OFF);
    assert_eq!(engine.grid().get(Point::new(0, 0)).unwrap(), 1);
}

#[test]
fn toggle_splits_and_joins_wires() {
    let mut engine = build(&["000"]);
    engine.toggle(Point::new(1, 0)).unwrap();
    assert_eq!(engine.wires().len(), 2);
    engine.toggle(Point::new(1, 0)).unwrap();
    assert_eq!(engine.wires().len(), 1);
}

#[test]
fn toggling_in_second_material_couples_wires() {
    let mut engine = build(&["0.", ".."]);
    engine.toggle_material(Point::new(1, 0), 1).unwrap();
    assert_eq!(engine.wires().len(), 2);
    assert_eq!(engine.circuit().edge_count(), 1);
}

#[test]
fn edits_discard_charge_history() {
    let mut engine = build(&["07..", "...."]);
    engine.seed(Point::new(0, 0), 6).unwrap();
    engine.run_ticks(1).unwrap();
    assert_eq!(engine.charge_at(Point::new(1, 0)).unwrap().unwrap().level(), 6);

    engine.toggle(Point::new(3, 1)).unwrap();
    assert!(engine.snapshot().charges().iter().all(|c| c.is_off()));
    assert_eq!(engine.snapshot().tick(), 0);
    assert_eq!(engine.clock.current_tick, 0);
}

#[test]
fn toggle_out_of_range_fails_without_rebuild() {
    let mut engine = build(&["0"]);
    let before = engine.circuit().clone();
    assert!(engine.toggle(Point::new(5, 5)).is_err());
    assert!(std::sync::Arc::ptr_eq(&before, engine.circuit()));
}
