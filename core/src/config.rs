use crate::{error::SimResult, palette::Palette, types::Material};
use serde::{Deserialize, Serialize};

/// Plain values handed to the core by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width of a synthesized empty grid.
    pub width: u32,
    /// Height of a synthesized empty grid.
    pub height: u32,
    /// Number of palette colors, background included.
    pub palette_depth: u16,
    /// Conductive materials sharing the palette.
    pub materials: Material,
    /// Front-end tick cadence. Does not affect core semantics.
    pub ticks_per_second: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width:            64,
            height:           64,
            palette_depth:    15,
            materials:        2,
            ticks_per_second: 15,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.palette()?;
        Ok(config)
    }

    /// The palette described by `palette_depth` and `materials`.
    pub fn palette(&self) -> SimResult<Palette> {
        Palette::from_depth(self.palette_depth, self.materials)
    }

    /// `MaxCharge` derived from the palette depth.
    pub fn max_charge(&self) -> SimResult<u8> {
        Ok(self.palette()?.max_charge())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_derives_max_charge_six() {
        let config = SimConfig::default();
        assert_eq!(config.max_charge().unwrap(), 6);
        assert_eq!(config.palette().unwrap(), Palette::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"width": 8, "palette_depth": 8, "materials": 1}"#).unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 64);
        assert_eq!(config.max_charge().unwrap(), 6);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SimConfig::load("/nonexistent/wired.json").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
