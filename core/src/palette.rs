//! Pixel classifier: maps palette indices to conductivity classes.
//!
//! LAYOUT: index 0 is the insulating background. Each conductive material
//! owns a band of `max_charge + 1` consecutive indices, starting at
//! `1 + material * (max_charge + 1)`. Band offset 0 is the baseline (OFF)
//! color; offset k is charge level k.
//!
//! Pixels of the same material merge into one wire. Pixels of different
//! materials never merge, but touching wires of different materials are
//! adjacent and drive each other.

use crate::{
    charge::Charge,
    error::{SimError, SimResult},
    types::Material,
};

pub const BACKGROUND: u8 = 0;

/// Conductivity class of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    Background,
    Conductive { material: Material, charge: Charge },
}

impl PixelClass {
    pub fn material(self) -> Option<Material> {
        match self {
            PixelClass::Background => None,
            PixelClass::Conductive { material, .. } => Some(material),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    max_charge: u8,
    materials:  Material,
}

impl Palette {
    /// Derive the charge ceiling from a palette depth (number of colors).
    pub fn from_depth(depth: u16, materials: Material) -> SimResult<Self> {
        let invalid = || SimError::InvalidPalette { depth, materials };
        if materials == 0 || depth == 0 || depth > 256 {
            return Err(invalid());
        }
        let per_material = depth - 1;
        if per_material % materials as u16 != 0 {
            return Err(invalid());
        }
        let band = per_material / materials as u16;
        if band < 2 {
            return Err(invalid());
        }
        Ok(Self {
            max_charge: (band - 1) as u8,
            materials,
        })
    }

    /// Build a palette from the charge ceiling directly.
    pub fn with_max_charge(max_charge: u8, materials: Material) -> SimResult<Self> {
        let depth = 1 + (max_charge as u16 + 1) * materials as u16;
        if max_charge == 0 {
            return Err(SimError::InvalidPalette { depth, materials });
        }
        Self::from_depth(depth, materials)
    }

    pub fn max_charge(&self) -> u8 {
        self.max_charge
    }

    /// The fully charged level for this palette.
    pub fn full(&self) -> Charge {
        Charge::from_level(self.max_charge)
    }

    pub fn materials(&self) -> Material {
        self.materials
    }

    /// Number of colors, background included.
    pub fn depth(&self) -> u16 {
        1 + self.band() * self.materials as u16
    }

    fn band(&self) -> u16 {
        self.max_charge as u16 + 1
    }

    pub fn contains(&self, index: u8) -> bool {
        (index as u16) < self.depth()
    }

    /// Classify a color index. Indices past the palette are rejected.
    pub fn classify(&self, index: u8) -> SimResult<PixelClass> {
        if index == BACKGROUND {
            return Ok(PixelClass::Background);
        }
        if !self.contains(index) {
            return Err(SimError::InvalidColorIndex { index, depth: self.depth() });
        }
        let offset = index as u16 - 1;
        Ok(PixelClass::Conductive {
            material: (offset / self.band()) as Material,
            charge:   Charge::from_level((offset % self.band()) as u8),
        })
    }

    /// Color index for a wire of `material` carrying `charge`.
    pub fn index_of(&self, material: Material, charge: Charge) -> u8 {
        debug_assert!(material < self.materials, "material {material} outside palette");
        debug_assert!(charge.level() <= self.max_charge, "charge {charge} above max");
        (1 + material as u16 * self.band() + charge.level() as u16) as u8
    }

    /// The uncharged color of `material`.
    pub fn baseline(&self, material: Material) -> SimResult<u8> {
        if material >= self.materials {
            return Err(SimError::InvalidMaterial { material, materials: self.materials });
        }
        Ok(self.index_of(material, Charge::OFF))
    }
}

impl Default for Palette {
    /// Two materials with the classic seven-step charge ramp.
    fn default() -> Self {
        Self { max_charge: 6, materials: 2 }
    }
}
