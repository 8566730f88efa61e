//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use wired_core::{grid::Grid, palette::Palette};

/// A seeded random grid. `fill` is the chance a pixel is conductive; every
/// conductive pixel gets a random material and charge.
pub fn random_grid(seed: u64, width: u32, height: u32, fill: f64, palette: Palette) -> Grid {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..width * height {
        if rng.gen_bool(fill) {
            pixels.push(rng.gen_range(1..palette.depth()) as u8);
        } else {
            pixels.push(0);
        }
    }
    Grid::from_pixels(width, height, palette, pixels).expect("random grid")
}

pub fn grid(rows: &[&str]) -> Grid {
    Grid::from_rows(rows, Palette::default()).expect("fixture grid")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
