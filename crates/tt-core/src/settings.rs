//! Board settings supplied by the rendering layer

use serde::{Deserialize, Serialize};

use crate::model::TableId;

/// Pixel geometry of the rendered grid.
///
/// Drag snapping and drop quantization read these values; nothing in the
/// core hard-codes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    /// Width of one day column
    pub cell_width: f64,

    /// Height of one period row
    pub cell_height: f64,

    /// Height of the day header row
    pub header_height: f64,

    /// Width of the period label column
    pub label_width: f64,

    /// Border allowance around the grid interior
    pub border_width: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: 80.0,
            cell_height: 30.0,
            header_height: 40.0,
            label_width: 120.0,
            border_width: 1.0,
        }
    }
}

/// Settings used when the board store is created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Tables that exist at startup
    pub initial_tables: Vec<TableId>,

    /// Grid geometry
    pub geometry: GridGeometry,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            initial_tables: vec![TableId::from("schedule-1")],
            geometry: GridGeometry::default(),
        }
    }
}

impl BoardSettings {
    /// Parse settings from JSON, filling absent fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = BoardSettings::from_json(r#"{"geometry":{"cell_width":100.0}}"#).unwrap();
        assert_eq!(settings.geometry.cell_width, 100.0);
        assert_eq!(settings.geometry.cell_height, 30.0);
        assert_eq!(settings.initial_tables, vec![TableId::from("schedule-1")]);
    }
}
