use crate::types::{Material, WireId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Coordinate ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange { x: u32, y: u32, width: u32, height: u32 },

    #[error("Color index {index} out of range for palette depth {depth}")]
    InvalidColorIndex { index: u8, depth: u16 },

    #[error("Invalid palette: depth {depth} cannot hold {materials} material(s)")]
    InvalidPalette { depth: u16, materials: Material },

    #[error("Material {material} out of range for palette with {materials} material(s)")]
    InvalidMaterial { material: Material, materials: Material },

    #[error("Charge {charge} out of range (max {max})")]
    ChargeOutOfRange { charge: u8, max: u8 },

    #[error("Wire {id} not found")]
    UnknownWire { id: WireId },

    #[error("No wire at ({x}, {y})")]
    NoWireAt { x: u32, y: u32 },

    #[error("Grid does not match circuit: {reason}")]
    GridMismatch { reason: String },
}

pub type SimResult<T> = Result<T, SimError>;
