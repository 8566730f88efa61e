//! The pixel grid: a rectangle of palette indices.
//!
//! The grid belongs to the front end. The circuit builder only reads it and
//! snapshots only write into it during a render; neither keeps a reference.

use crate::{
    charge::Charge,
    error::{SimError, SimResult},
    palette::{Palette, PixelClass, BACKGROUND},
    types::{Material, Point},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridFile", into = "GridFile")]
pub struct Grid {
    width:   u32,
    height:  u32,
    palette: Palette,
    pixels:  Vec<u8>,
}

impl Grid {
    /// An all-background grid.
    pub fn new(width: u32, height: u32, palette: Palette) -> SimResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            palette,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        })
    }

    /// Wrap existing row-major pixel data, validating every index.
    pub fn from_pixels(width: u32, height: u32, palette: Palette, pixels: Vec<u8>) -> SimResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SimError::GridMismatch {
                reason: format!("expected {expected} pixels, got {}", pixels.len()),
            });
        }
        if let Some(&index) = pixels.iter().find(|&&i| !palette.contains(i)) {
            return Err(SimError::InvalidColorIndex { index, depth: palette.depth() });
        }
        Ok(Self { width, height, palette, pixels })
    }

    /// Parse rows of single-character cells: `.` is background, `0`-`9`
    /// and `a`-`z` are palette indices 1.. in order. Handy for fixtures.
    pub fn from_rows(rows: &[&str], palette: Palette) -> SimResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        check_dimensions(width, height)?;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(SimError::GridMismatch {
                    reason: format!("row {y} is not {width} cells wide"),
                });
            }
            for ch in row.chars() {
                pixels.push(cell_index(ch).ok_or_else(|| SimError::GridMismatch {
                    reason: format!("unknown cell {ch:?} in row {y}"),
                })?);
            }
        }
        Self::from_pixels(width, height, palette, pixels)
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

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    pub fn get(&self, p: Point) -> SimResult<u8> {
        let i = self.offset(p)?;
        Ok(self.pixels[i])
    }

    pub fn set(&mut self, p: Point, index: u8) -> SimResult<()> {
        if !self.palette.contains(index) {
            return Err(SimError::InvalidColorIndex { index, depth: self.palette.depth() });
        }
        let i = self.offset(p)?;
        self.pixels[i] = index;
        Ok(())
    }

    pub fn classify(&self, p: Point) -> SimResult<PixelClass> {
        self.palette.classify(self.get(p)?)
    }

    /// Number of conductive pixels of any material.
    pub fn conductive_count(&self) -> usize {
        self.pixels.iter().filter(|&&i| i != BACKGROUND).count()
    }

    /// Row-major offset of `p`.
    pub fn offset(&self, p: Point) -> SimResult<usize> {
        if !self.contains(p) {
            return Err(SimError::OutOfRange {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Inverse of `offset`. Callers pass offsets below `width * height`.
    pub(crate) fn point_at(&self, offset: usize) -> Point {
        Point::new(
            (offset % self.width as usize) as u32,
            (offset / self.width as usize) as u32,
        )
    }

    /// Rewrite pixel `offset` to the baseline color of its material.
    pub(crate) fn clear_charge_at(&mut self, offset: usize) {
        if let Ok(PixelClass::Conductive { material, .. }) = self.palette.classify(self.pixels[offset]) {
            self.pixels[offset] = self.palette.index_of(material, Charge::OFF);
        }
    }

    pub(crate) fn write(&mut self, offset: usize, index: u8) {
        self.pixels[offset] = index;
    }
}

fn check_dimensions(width: u32, height: u32) -> SimResult<()> {
    if width == 0 || height == 0 {
        return Err(SimError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn cell_index(ch: char) -> Option<u8> {
    match ch {
        '.' => Some(BACKGROUND),
        '0'..='9' => Some(ch as u8 - b'0' + 1),
        'a'..='z' => Some(ch as u8 - b'a' + 11),
        _ => None,
    }
}

/// On-disk form of a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridFile {
    width:         u32,
    height:        u32,
    palette_depth: u16,
    materials:     Material,
    pixels:        Vec<u8>,
}

impl TryFrom<GridFile> for Grid {
    type Error = SimError;

    fn try_from(file: GridFile) -> SimResult<Self> {
        let palette = Palette::from_depth(file.palette_depth, file.materials)?;
        Grid::from_pixels(file.width, file.height, palette, file.pixels)
    }
}

impl From<Grid> for GridFile {
    fn from(grid: Grid) -> Self {
        Self {
            width:         grid.width,
            height:        grid.height,
            palette_depth: grid.palette.depth(),
            materials:     grid.palette.materials(),
            pixels:        grid.pixels,
        }
    }
}
