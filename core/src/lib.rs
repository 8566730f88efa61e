//! Wired logic: signal propagation encoded in the pixel colors of a bitmap.
//!
//! A [`grid::Grid`] of palette indices is contracted into a
//! [`circuit::Circuit`] of wires and their adjacency, then advanced one
//! synchronous tick at a time through immutable [`snapshot::Snapshot`]s.

pub mod charge;
pub mod circuit;
pub mod clock;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod palette;
pub mod snapshot;
pub mod types;
